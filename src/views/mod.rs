//! Named filter + sort presets.
//!
//! - [`store`] -- the [`ViewStore`] persistence trait and an in-memory store.
//! - [`manager`] -- [`ViewsManager`], which saves, loads, updates and deletes
//!   views against a [`QueryState`](crate::query::QueryState).

pub mod manager;
pub mod store;

pub use manager::{ViewsManager, EMPTY_NAME_MESSAGE};
pub use store::{InMemoryViewStore, ViewStore};
