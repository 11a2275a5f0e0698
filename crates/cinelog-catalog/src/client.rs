use crate::error::CatalogError;
use crate::types::{Credits, MovieDetails, MovieSummary, Page, VideoList};
use cinelog_config::CatalogConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Time window for the trending listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingWindow {
    Day,
    Week,
}

impl TrendingWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingWindow::Day => "day",
            TrendingWindow::Week => "week",
        }
    }
}

/// Thin GET wrapper over a TMDB-compatible catalog API. Bearer-token auth on
/// every request; no retry or timeout policy of its own.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    token: String,
    base_url: String,
    image_base_url: String,
    poster_size: String,
    language: String,
}

impl CatalogClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::from_config_unchecked(token.into(), &CatalogConfig::default())
    }

    /// Build a client from configuration. Fails when no token is configured,
    /// so callers surface the setup problem before the first request.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let token = config.resolved_token().ok_or(CatalogError::MissingToken)?;
        Ok(Self::from_config_unchecked(token, config))
    }

    fn from_config_unchecked(token: String, config: &CatalogConfig) -> Self {
        Self {
            client: Client::new(),
            token,
            base_url: config.base_url.clone(),
            image_base_url: config.image_base_url.clone(),
            poster_size: config.poster_size.clone(),
            language: config.language.clone(),
        }
    }

    async fn request<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json;charset=utf-8")
            .query(&[("language", self.language.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status { status, body });
        }

        Ok(response.json::<T>().await?)
    }

    pub async fn popular(&self, page: u32) -> Result<Page<MovieSummary>, CatalogError> {
        self.request("/movie/popular", &[("page", page.to_string())]).await
    }

    pub async fn top_rated(&self, page: u32) -> Result<Page<MovieSummary>, CatalogError> {
        self.request("/movie/top_rated", &[("page", page.to_string())]).await
    }

    pub async fn upcoming(&self, page: u32) -> Result<Page<MovieSummary>, CatalogError> {
        self.request("/movie/upcoming", &[("page", page.to_string())]).await
    }

    pub async fn trending(&self, window: TrendingWindow) -> Result<Page<MovieSummary>, CatalogError> {
        self.request(&format!("/trending/movie/{}", window.as_str()), &[]).await
    }

    pub async fn search(&self, query: &str, page: u32) -> Result<Page<MovieSummary>, CatalogError> {
        self.request(
            "/search/movie",
            &[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("include_adult", "false".to_string()),
            ],
        )
        .await
    }

    /// Movie details with videos, credits and recommendations appended in the
    /// same call, matching what the detail view renders.
    pub async fn movie_details(&self, id: u64) -> Result<MovieDetails, CatalogError> {
        self.request(
            &format!("/movie/{}", id),
            &[("append_to_response", "videos,credits,recommendations".to_string())],
        )
        .await
    }

    pub async fn movie_credits(&self, id: u64) -> Result<Credits, CatalogError> {
        self.request(&format!("/movie/{}/credits", id), &[]).await
    }

    pub async fn movie_videos(&self, id: u64) -> Result<VideoList, CatalogError> {
        self.request(&format!("/movie/{}/videos", id), &[]).await
    }

    /// Fully-qualified image URL for a poster/profile path. `None` for missing
    /// paths; absolute URLs pass through untouched.
    pub fn image_url(&self, path: Option<&str>, size: &str) -> Option<String> {
        let path = path.filter(|p| !p.is_empty())?;
        if path.starts_with("http") {
            return Some(path.to_string());
        }
        Some(format!("{}/{}{}", self.image_base_url, size, path))
    }

    /// `image_url` with the configured poster size.
    pub fn poster_url(&self, path: Option<&str>) -> Option<String> {
        self.image_url(path, &self.poster_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_for_missing_path() {
        let client = CatalogClient::new("t");
        assert_eq!(client.image_url(None, "w500"), None);
        assert_eq!(client.image_url(Some(""), "w500"), None);
    }

    #[test]
    fn test_image_url_passthrough_for_absolute() {
        let client = CatalogClient::new("t");
        assert_eq!(
            client.image_url(Some("https://elsewhere.example/p.jpg"), "w500").as_deref(),
            Some("https://elsewhere.example/p.jpg")
        );
    }

    #[test]
    fn test_image_url_composed_from_base_and_size() {
        let client = CatalogClient::new("t");
        assert_eq!(
            client.image_url(Some("/m.jpg"), "w185").as_deref(),
            Some("https://image.tmdb.org/t/p/w185/m.jpg")
        );
        assert_eq!(
            client.poster_url(Some("/m.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/m.jpg")
        );
    }

    #[test]
    fn test_from_config_requires_token() {
        let config = CatalogConfig::default();
        assert!(matches!(
            CatalogClient::from_config(&config),
            Err(CatalogError::MissingToken)
        ));
    }
}
