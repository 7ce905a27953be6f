//! Shared fixtures for integration tests.
//!
//! Provides a small movie snapshot, its JSON form as the backend serves it,
//! and helpers for mounting a [`wiremock`] backend.

#![allow(dead_code)]

use reelview_common::{Country, CountryId, Director, DirectorId, Genre, GenreId, Movie};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_PREFIX: &str = "/api";

pub fn genre(id: i64, name: &str) -> Genre {
    Genre {
        id: GenreId::new(id),
        name: name.to_string(),
    }
}

pub fn country(id: i64, name: &str, flag: &str) -> Country {
    Country {
        id: CountryId::new(id),
        name: name.to_string(),
        flag_emoji: flag.to_string(),
    }
}

pub fn movie(id: i64, title: &str, year: i32, rating: Option<&str>) -> Movie {
    let mut movie = Movie::new(id, title, year);
    movie.rating = rating.map(str::to_string);
    movie
}

/// The two-movie snapshot used by the documented scenarios.
pub fn amelie_and_brazil() -> Vec<Movie> {
    vec![
        movie(1, "Amélie", 2001, Some("8.3")),
        movie(2, "Brazil", 1985, Some("7.9")),
    ]
}

/// A broader snapshot with associations, duplicates and odd ratings.
pub fn library() -> Vec<Movie> {
    let mut amelie = movie(1, "Amélie", 2001, Some("8.3"));
    amelie.alternative_title = Some("Le Fabuleux Destin d'Amélie Poulain".into());
    amelie.genres = vec![genre(1, "Comedy"), genre(3, "Romance")];
    amelie.countries = vec![country(10, "France", "🇫🇷")];
    amelie.directors = vec![Director {
        id: DirectorId::new(1),
        name: "Jean-Pierre Jeunet".into(),
    }];

    let mut brazil = movie(2, "Brazil", 1985, Some("7.9"));
    brazil.genres = vec![genre(2, "Sci-Fi"), genre(1, "Comedy")];
    brazil.countries = vec![country(11, "United Kingdom", "🇬🇧")];

    let mut solaris_72 = movie(3, "Solaris", 1972, Some("8.0"));
    solaris_72.genres = vec![genre(2, "Sci-Fi")];
    solaris_72.countries = vec![country(12, "Soviet Union", "🚩")];

    let mut solaris_02 = movie(4, "Solaris", 2002, Some("6.2"));
    solaris_02.genres = vec![genre(2, "Sci-Fi")];
    solaris_02.countries = vec![country(13, "United States", "🇺🇸")];

    let mut alien = movie(5, "Alien", 1979, Some("n/a"));
    alien.genres = vec![genre(2, "Sci-Fi"), genre(4, "Horror")];

    let heat = movie(6, "Heat", 1995, None);

    let mut edith = movie(7, "Édith et Marcel", 1983, Some("6.0"));
    edith.countries = vec![country(10, "France", "🇫🇷")];

    vec![amelie, brazil, solaris_72, solaris_02, alien, heat, edith]
}

/// Movies as the backend serialises them, with timestamps and join rows.
pub fn movies_json() -> Value {
    json!([
        {
            "id": 1,
            "title": "Amélie",
            "alternativeTitle": null,
            "releaseYear": 2001,
            "rating": "8.3",
            "watchedDate": "2023-04-15",
            "createdAt": "2023-04-15T10:00:00.000Z",
            "updatedAt": "2023-04-15T10:00:00.000Z",
            "Genres": [{"id": 1, "name": "Comedy", "MovieGenres": {"MovieId": 1, "GenreId": 1}}],
            "Countries": [{"id": 10, "name": "France", "flagEmoji": "🇫🇷"}],
            "Directors": [],
            "Actors": [{"id": 5, "name": "Audrey Tautou"}]
        },
        {
            "id": 2,
            "title": "Brazil",
            "alternativeTitle": null,
            "releaseYear": 1985,
            "rating": "7.9",
            "watchedDate": null,
            "Genres": [{"id": 2, "name": "Sci-Fi"}],
            "Countries": [],
            "Directors": [{"id": 3, "name": "Terry Gilliam"}],
            "Actors": []
        }
    ])
}

pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}{route}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount every catalog read route with fixture data.
pub async fn mount_catalog(server: &MockServer) {
    mount_json(server, "/movies", movies_json()).await;
    mount_json(
        server,
        "/genres",
        json!([{"id": 2, "name": "Sci-Fi"}, {"id": 1, "name": "Comedy"}]),
    )
    .await;
    mount_json(
        server,
        "/countries",
        json!([{"id": 10, "name": "France", "flagEmoji": "🇫🇷"}]),
    )
    .await;
    mount_json(server, "/directors", json!([{"id": 3, "name": "Terry Gilliam"}])).await;
    mount_json(server, "/actors", json!([{"id": 5, "name": "Audrey Tautou"}])).await;
}

pub fn api_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), API_PREFIX)
}

pub fn ids(movies: &[&Movie]) -> Vec<i64> {
    movies.iter().map(|m| m.id.get()).collect()
}
