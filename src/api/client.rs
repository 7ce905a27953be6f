use crate::catalog::CatalogSource;
use crate::config::BackendConfig;
use crate::views::ViewStore;
use anyhow::{Context, Result};
use reelview_common::{Actor, Country, Director, Genre, Movie, NewView, View, ViewId};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Used when the configured timeout cannot be applied
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// REST client for the catalog backend.
///
/// Every path is appended to the configured base URL, e.g.
/// `http://localhost:5000/api` + `/movies`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_timeout(&config.base_url, config.timeout())
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, context_msg: &str) -> Result<T> {
        tracing::debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .context(context_msg.to_string())?;

        if !response.status().is_success() {
            anyhow::bail!("{}: HTTP {}", context_msg, response.status());
        }

        response
            .json()
            .await
            .with_context(|| format!("{}: invalid response body", context_msg))
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
        context_msg: &str,
    ) -> Result<T> {
        tracing::debug!(path, %method, "sending");
        let response = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .context(context_msg.to_string())?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            anyhow::bail!("{}: HTTP {} {}", context_msg, status, error);
        }

        response
            .json()
            .await
            .with_context(|| format!("{}: invalid response body", context_msg))
    }

    pub async fn movies(&self) -> Result<Vec<Movie>> {
        self.get_json("/movies", "Failed to fetch movies").await
    }

    pub async fn genres(&self) -> Result<Vec<Genre>> {
        self.get_json("/genres", "Failed to fetch genres").await
    }

    pub async fn countries(&self) -> Result<Vec<Country>> {
        self.get_json("/countries", "Failed to fetch countries").await
    }

    pub async fn directors(&self) -> Result<Vec<Director>> {
        self.get_json("/directors", "Failed to fetch directors").await
    }

    pub async fn actors(&self) -> Result<Vec<Actor>> {
        self.get_json("/actors", "Failed to fetch actors").await
    }

    pub async fn views(&self) -> Result<Vec<View>> {
        self.get_json("/views", "Failed to fetch views").await
    }

    pub async fn create_view(&self, view: &NewView) -> Result<View> {
        self.send_json(reqwest::Method::POST, "/views", view, "Failed to save view")
            .await
    }

    pub async fn update_view(&self, id: ViewId, view: &NewView) -> Result<View> {
        self.send_json(
            reqwest::Method::PUT,
            &format!("/views/{}", id),
            view,
            "Failed to update view",
        )
        .await
    }

    pub async fn delete_view(&self, id: ViewId) -> Result<()> {
        let context_msg = "Failed to delete view";
        let response = self
            .client
            .delete(self.url(&format!("/views/{}", id)))
            .send()
            .await
            .context(context_msg)?;

        if !response.status().is_success() {
            anyhow::bail!("{}: HTTP {}", context_msg, response.status());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CatalogSource for ApiClient {
    async fn fetch_movies(&self) -> Result<Vec<Movie>> {
        self.movies().await
    }

    async fn fetch_genres(&self) -> Result<Vec<Genre>> {
        self.genres().await
    }

    async fn fetch_countries(&self) -> Result<Vec<Country>> {
        self.countries().await
    }

    async fn fetch_directors(&self) -> Result<Vec<Director>> {
        self.directors().await
    }

    async fn fetch_actors(&self) -> Result<Vec<Actor>> {
        self.actors().await
    }
}

#[async_trait::async_trait]
impl ViewStore for ApiClient {
    async fn list(&self) -> Result<Vec<View>> {
        self.views().await
    }

    async fn create(&self, view: &NewView) -> Result<View> {
        self.create_view(view).await
    }

    async fn update(&self, id: ViewId, view: &NewView) -> Result<View> {
        self.update_view(id, view).await
    }

    async fn delete(&self, id: ViewId) -> Result<()> {
        self.delete_view(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::with_base_url("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.url("/views/3"), "http://localhost:5000/api/views/3");
    }

    #[test]
    fn test_new_uses_config_url() {
        let config = BackendConfig {
            base_url: "https://catalog.example.com/api".to_string(),
            timeout_secs: 3,
        };
        assert_eq!(
            ApiClient::new(&config).base_url(),
            "https://catalog.example.com/api"
        );
    }
}
