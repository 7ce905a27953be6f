//! Reelview-Common: shared ids, catalog types, and errors.
//!
//! This crate provides the data model used across reelview:
//!
//! - **Typed IDs**: integer newtypes for movies, reference entities, and views
//! - **Catalog Types**: movies and the genres, countries, directors and actors
//!   they reference
//! - **Query Types**: filter criteria, sortable keys, and saved views
//! - **Error Handling**: common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use reelview_common::{Error, FilterCriteria, Result, SortConfig, SortKey};
//!
//! let criteria = FilterCriteria {
//!     min_year: Some(1990),
//!     ..Default::default()
//! };
//! assert!(!criteria.is_empty());
//!
//! let sort = SortConfig::default();
//! assert_eq!(sort.key, SortKey::Title);
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("view 7"))
//! }
//! ```

pub mod error;
pub mod ids;
mod lenient;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
