//! Catalog and query type definitions.
//!
//! Field names follow the backend's JSON (camelCase scalars, capitalised
//! association lists such as `Genres`) so that snapshots and saved views
//! decode without an intermediate layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::{ActorId, CountryId, DirectorId, GenreId, MovieId, ViewId};
use crate::lenient;

// ---------------------------------------------------------------------------
// Reference entities
// ---------------------------------------------------------------------------

/// An entity with a display name that can be listed on a movie.
pub trait Named {
    /// Display name used in tables and joined sort strings.
    fn name(&self) -> &str;
}

/// A film genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// A production country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub flag_emoji: String,
}

/// A film director.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    pub id: DirectorId,
    pub name: String,
}

/// A cast member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
}

macro_rules! impl_named {
    ($($ty:ty),+) => {
        $(
            impl Named for $ty {
                fn name(&self) -> &str {
                    &self.name
                }
            }
        )+
    };
}

impl_named!(Genre, Country, Director, Actor);

/// Join the display names of an association list with `", "`, in list order.
pub fn join_names<T: Named>(entities: &[T]) -> String {
    entities
        .iter()
        .map(Named::name)
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Movie
// ---------------------------------------------------------------------------

/// A movie with its associated reference entities embedded.
///
/// Association lists carry no particular order and may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub alternative_title: Option<String>,
    pub release_year: i32,
    /// Free-text rating as entered (usually something like `"7.9"`).
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub watched_date: Option<NaiveDate>,
    #[serde(default, rename = "Genres", alias = "genres")]
    pub genres: Vec<Genre>,
    #[serde(default, rename = "Directors", alias = "directors")]
    pub directors: Vec<Director>,
    #[serde(default, rename = "Actors", alias = "actors")]
    pub actors: Vec<Actor>,
    #[serde(default, rename = "Countries", alias = "countries")]
    pub countries: Vec<Country>,
}

impl Movie {
    /// Create a movie with only the always-present fields set.
    pub fn new(id: i64, title: impl Into<String>, release_year: i32) -> Self {
        Self {
            id: MovieId::new(id),
            title: title.into(),
            alternative_title: None,
            release_year,
            rating: None,
            watched_date: None,
            genres: Vec::new(),
            directors: Vec::new(),
            actors: Vec::new(),
            countries: Vec::new(),
        }
    }

    /// The rating as a number, if it parses as one.
    pub fn numeric_rating(&self) -> Option<f64> {
        self.rating
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .and_then(|r| r.parse::<f64>().ok())
            .filter(|r| !r.is_nan())
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Criteria narrowing the visible movie set.
///
/// Absent bounds and empty id lists impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    #[serde(deserialize_with = "lenient::string")]
    pub search_term: String,
    #[serde(deserialize_with = "lenient::opt_i32")]
    pub min_year: Option<i32>,
    #[serde(deserialize_with = "lenient::opt_i32")]
    pub max_year: Option<i32>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub min_rating: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub max_rating: Option<f64>,
    #[serde(alias = "genreTerm", deserialize_with = "lenient::id_list")]
    pub genre_ids: Vec<GenreId>,
    #[serde(alias = "countryTerm", deserialize_with = "lenient::id_list")]
    pub country_ids: Vec<CountryId>,
}

impl FilterCriteria {
    /// True when no constraint is active.
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty()
            && self.min_year.is_none()
            && self.max_year.is_none()
            && self.min_rating.is_none()
            && self.max_rating.is_none()
            && self.genre_ids.is_empty()
            && self.country_ids.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Column a movie table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "alternativeTitle")]
    AlternativeTitle,
    #[serde(rename = "releaseYear")]
    ReleaseYear,
    #[serde(rename = "rating")]
    Rating,
    #[serde(rename = "watchedDate")]
    WatchedDate,
    /// Joined genre names.
    #[serde(rename = "Genres")]
    Genres,
    /// Joined director names.
    #[serde(rename = "Directors")]
    Directors,
    /// Joined actor names.
    #[serde(rename = "Actors")]
    Actors,
    /// Joined country names.
    #[serde(rename = "Countries")]
    Countries,
}

impl SortKey {
    /// Every sortable key, in table column order.
    pub const ALL: [SortKey; 10] = [
        Self::Id,
        Self::Title,
        Self::AlternativeTitle,
        Self::ReleaseYear,
        Self::Rating,
        Self::WatchedDate,
        Self::Genres,
        Self::Directors,
        Self::Actors,
        Self::Countries,
    ];

    /// Name used on the wire and in stored views.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::AlternativeTitle => "alternativeTitle",
            Self::ReleaseYear => "releaseYear",
            Self::Rating => "rating",
            Self::WatchedDate => "watchedDate",
            Self::Genres => "Genres",
            Self::Directors => "Directors",
            Self::Actors => "Actors",
            Self::Countries => "Countries",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = crate::Error;

    /// Accepts wire names (`releaseYear`, `Genres`) as well as kebab/snake
    /// spellings (`release-year`, `release_year`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().to_lowercase() == folded)
            .ok_or_else(|| crate::Error::invalid_input(format!("Unknown sort key: {s}")))
    }
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "ascending"),
            Self::Descending => write!(f, "descending"),
        }
    }
}

/// Key and direction of the table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Ascending by `key`.
    pub const fn ascending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    /// Descending by `key`.
    pub const fn descending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Descending)
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self::ascending(SortKey::Title)
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::Title
    }
}

// ---------------------------------------------------------------------------
// Saved views
// ---------------------------------------------------------------------------

/// A named filter + sort preset as persisted by the view store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub id: ViewId,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::filters")]
    pub filters: FilterCriteria,
    #[serde(default, deserialize_with = "lenient::sort_config")]
    pub sorting: SortConfig,
}

/// Body of a create or update request for a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewView {
    pub name: String,
    pub filters: FilterCriteria,
    pub sorting: SortConfig,
}

impl NewView {
    /// Attach a store-assigned id.
    pub fn into_view(self, id: ViewId) -> View {
        View {
            id,
            name: self.name,
            filters: self.filters,
            sorting: self.sorting,
        }
    }
}
