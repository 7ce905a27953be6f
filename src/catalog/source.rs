//! Trait for the service the catalog snapshot is read from.

use async_trait::async_trait;
use reelview_common::{Actor, Country, Director, Genre, Movie};

/// Read side of the catalog backend.
///
/// [`ApiClient`](crate::api::ApiClient) implements this over HTTP; tests
/// substitute in-memory stubs.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every movie with its associations embedded.
    async fn fetch_movies(&self) -> anyhow::Result<Vec<Movie>>;

    async fn fetch_genres(&self) -> anyhow::Result<Vec<Genre>>;

    async fn fetch_countries(&self) -> anyhow::Result<Vec<Country>>;

    async fn fetch_directors(&self) -> anyhow::Result<Vec<Director>>;

    async fn fetch_actors(&self) -> anyhow::Result<Vec<Actor>>;
}
