use reelview_common::{FilterCriteria, Movie, SortConfig, SortDirection, SortKey};

use super::collate::Collation;
use super::{filter_movies, sort_movies_with};

/// The filter and sort currently applied to the movie table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub criteria: FilterCriteria,
    pub sort: SortConfig,
}

impl QueryState {
    pub fn new(criteria: FilterCriteria, sort: SortConfig) -> Self {
        Self { criteria, sort }
    }

    /// Clear every filter and order by id ascending.
    pub fn reset(&mut self) {
        self.criteria = FilterCriteria::default();
        self.sort = SortConfig::ascending(SortKey::Id);
    }

    /// Column-header click: the active ascending key flips to descending,
    /// anything else sorts ascending by `key`.
    pub fn request_sort(&mut self, key: SortKey) {
        let direction = if self.sort.key == key {
            self.sort.direction.toggled()
        } else {
            SortDirection::Ascending
        };
        self.sort = SortConfig::new(key, direction);
    }

    /// Arrow shown next to the active column header.
    pub fn sort_indicator(&self, key: SortKey) -> Option<&'static str> {
        if self.sort.key != key {
            return None;
        }
        Some(match self.sort.direction {
            SortDirection::Ascending => " 🔼",
            SortDirection::Descending => " 🔽",
        })
    }

    /// Rows to display: the snapshot filtered, then sorted.
    pub fn visible<'a>(&self, movies: &'a [Movie]) -> Vec<&'a Movie> {
        self.visible_with(&Collation::new(), movies)
    }

    pub fn visible_with<'a>(&self, collation: &Collation, movies: &'a [Movie]) -> Vec<&'a Movie> {
        let filtered = filter_movies(movies, &self.criteria);
        sort_movies_with(collation, filtered, self.sort)
    }
}
