//! Plain-text rendering of the visible movie rows.

use chrono::NaiveDate;
use reelview_common::{join_names, Movie, SortKey};

use crate::query::QueryState;

/// Placeholder for a missing or unparsable date.
pub const NO_DATE: &str = "—";

/// Placeholder for a movie without a rating.
pub const NO_RATING: &str = "-";

const COLUMNS: [(SortKey, &str); 10] = [
    (SortKey::Id, "ID"),
    (SortKey::Title, "Title"),
    (SortKey::AlternativeTitle, "Alternative Title"),
    (SortKey::ReleaseYear, "Year"),
    (SortKey::Rating, "Rating"),
    (SortKey::WatchedDate, "Watched"),
    (SortKey::Genres, "Genres"),
    (SortKey::Directors, "Directors"),
    (SortKey::Actors, "Actors"),
    (SortKey::Countries, "Countries"),
];

pub fn format_watched_date(date: Option<NaiveDate>, format: &str) -> String {
    match date {
        Some(date) => date.format(format).to_string(),
        None => NO_DATE.to_string(),
    }
}

fn cells(movie: &Movie, date_format: &str) -> Vec<String> {
    vec![
        movie.id.to_string(),
        movie.title.clone(),
        movie.alternative_title.clone().unwrap_or_default(),
        movie.release_year.to_string(),
        movie
            .rating
            .clone()
            .unwrap_or_else(|| NO_RATING.to_string()),
        format_watched_date(movie.watched_date, date_format),
        join_names(&movie.genres),
        join_names(&movie.directors),
        join_names(&movie.actors),
        join_names(&movie.countries),
    ]
}

/// Render `rows` as an aligned table; the active sort column carries its
/// direction arrow.
pub fn render_table(rows: &[&Movie], query: &QueryState, date_format: &str) -> String {
    let header: Vec<String> = COLUMNS
        .iter()
        .map(|(key, label)| format!("{}{}", label, query.sort_indicator(*key).unwrap_or("")))
        .collect();
    let body: Vec<Vec<String>> = rows.iter().map(|m| cells(m, date_format)).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &body {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
