//! REST client for the catalog backend (movies, reference entities, views).

mod client;

pub use client::ApiClient;
