use reelview_common::{FilterCriteria, Movie};

/// Keep the movies matching every active criterion, in their original order.
///
/// No active criterion means every movie passes.
pub fn filter_movies<'a, I>(movies: I, criteria: &FilterCriteria) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    let search = criteria.search_term.to_lowercase();
    movies
        .into_iter()
        .filter(|movie| matches_prepared(movie, criteria, &search))
        .collect()
}

/// Check if a single movie passes the criteria
pub fn matches_filters(movie: &Movie, criteria: &FilterCriteria) -> bool {
    matches_prepared(movie, criteria, &criteria.search_term.to_lowercase())
}

fn matches_prepared(movie: &Movie, criteria: &FilterCriteria, search: &str) -> bool {
    // All specified criteria must match (AND logic)
    matches_search(movie, search)
        && matches_years(movie, criteria.min_year, criteria.max_year)
        && matches_genres(movie, criteria)
        && matches_countries(movie, criteria)
        && matches_rating(movie, criteria.min_rating, criteria.max_rating)
}

fn matches_search(movie: &Movie, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }

    movie.title.to_lowercase().contains(search)
        || movie
            .alternative_title
            .as_deref()
            .is_some_and(|alt| alt.to_lowercase().contains(search))
}

fn matches_years(movie: &Movie, min: Option<i32>, max: Option<i32>) -> bool {
    min.map_or(true, |min| movie.release_year >= min)
        && max.map_or(true, |max| movie.release_year <= max)
}

fn matches_genres(movie: &Movie, criteria: &FilterCriteria) -> bool {
    if criteria.genre_ids.is_empty() {
        return true;
    }

    movie
        .genres
        .iter()
        .any(|genre| criteria.genre_ids.contains(&genre.id))
}

fn matches_countries(movie: &Movie, criteria: &FilterCriteria) -> bool {
    if criteria.country_ids.is_empty() {
        return true;
    }

    movie
        .countries
        .iter()
        .any(|country| criteria.country_ids.contains(&country.id))
}

/// With a bound set, a rating that is missing or not a number fails it.
fn matches_rating(movie: &Movie, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }

    let Some(rating) = movie.numeric_rating() else {
        return false;
    };

    min.map_or(true, |min| rating >= min) && max.map_or(true, |max| rating <= max)
}
