//! Reelview - query engine for a personal movie catalog
//!
//! This library crate exposes the catalog snapshot, the filter/sort engine,
//! and saved-view management for the binary and for integration testing.

pub mod api;
pub mod catalog;
pub mod config;
pub mod query;
pub mod table;
pub mod views;
