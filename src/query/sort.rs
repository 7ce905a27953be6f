use std::borrow::Cow;

use reelview_common::{join_names, Movie, SortConfig, SortDirection, SortKey};

use super::collate::Collation;

/// The string a movie is compared by for `key`.
///
/// Missing values compare as the empty string; association keys compare by
/// their names joined in list order.
pub fn sort_value(movie: &Movie, key: SortKey) -> Cow<'_, str> {
    match key {
        SortKey::Id => Cow::Owned(movie.id.to_string()),
        SortKey::Title => Cow::Borrowed(movie.title.as_str()),
        SortKey::AlternativeTitle => Cow::Borrowed(movie.alternative_title.as_deref().unwrap_or("")),
        SortKey::ReleaseYear => Cow::Owned(movie.release_year.to_string()),
        SortKey::Rating => Cow::Borrowed(movie.rating.as_deref().unwrap_or("")),
        SortKey::WatchedDate => movie
            .watched_date
            .map(|d| Cow::Owned(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(Cow::Borrowed("")),
        SortKey::Genres => Cow::Owned(join_names(&movie.genres)),
        SortKey::Directors => Cow::Owned(join_names(&movie.directors)),
        SortKey::Actors => Cow::Owned(join_names(&movie.actors)),
        SortKey::Countries => Cow::Owned(join_names(&movie.countries)),
    }
}

/// Order movies by `sort`, keeping equal values in their incoming order.
pub fn sort_movies<'a>(movies: Vec<&'a Movie>, sort: SortConfig) -> Vec<&'a Movie> {
    let collation = Collation::new();
    sort_movies_with(&collation, movies, sort)
}

/// [`sort_movies`] with a caller-owned collator.
pub fn sort_movies_with<'a>(
    collation: &Collation,
    movies: Vec<&'a Movie>,
    sort: SortConfig,
) -> Vec<&'a Movie> {
    // Extract each key once; joined association strings are not free.
    let mut keyed: Vec<(Cow<'a, str>, &'a Movie)> = movies
        .into_iter()
        .map(|movie| (sort_value(movie, sort.key), movie))
        .collect();

    // slice::sort_by is a stable merge sort
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = collation.compare(a, b);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    keyed.into_iter().map(|(_, movie)| movie).collect()
}
