//! Client-side query engine over a movie snapshot.
//!
//! - [`filter`] -- conjunctive criteria, original order preserved.
//! - [`sort`] -- stable, locale-aware ordering by a [`SortKey`](reelview_common::SortKey).
//! - [`state`] -- the criteria + sort pair the table is currently showing.
//!
//! Both engines are pure: they never touch the network and return the same
//! rows for the same inputs.

pub mod collate;
pub mod filter;
pub mod sort;
pub mod state;

pub use collate::Collation;
pub use filter::{filter_movies, matches_filters};
pub use sort::{sort_movies, sort_movies_with, sort_value};
pub use state::QueryState;
