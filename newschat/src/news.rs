use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_PAGE_SIZE: u32 = 6;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sort order accepted by the news-search endpoint.
///
/// The classifier's JSON contract names the same three values, so an
/// out-of-enum string from the model fails at parse time instead of being
/// passed through to the news API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Relevancy,
    Popularity,
    PublishedAt,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevancy => "relevancy",
            SortBy::Popularity => "popularity",
            SortBy::PublishedAt => "publishedAt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSource {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub url: String,
    pub title: String,
    pub description: String,
    pub content: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub source: NewsSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsApiResponse {
    pub status: String,
    #[serde(rename = "totalResults")]
    pub total_results: i64,
    pub articles: Vec<NewsArticle>,
}

/// Client for a keyword news-search HTTP API (newsapi.org-compatible).
#[derive(Debug)]
pub struct NewsClient {
    api_url: String,
    api_key: String,
    page_size: u32,
    timeout: Duration,
    client: reqwest::Client,
}

impl NewsClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a client from configuration, resolving the API key from the
    /// environment variable named in `api_key_env`.
    pub fn from_config(cfg: &common::NewsConfig) -> Result<Self> {
        let key_env = cfg.api_key_env.as_deref().unwrap_or("NEWS_API_KEY");
        let api_key = std::env::var(key_env)
            .map_err(|_| Error::Config(format!("environment variable {} is not set", key_env)))?;

        let mut client = Self::new(cfg.api_url.as_deref().unwrap_or(DEFAULT_API_URL), api_key);
        if let Some(size) = cfg.page_size {
            client = client.with_page_size(size);
        }
        if let Some(secs) = cfg.timeout_seconds {
            client = client.with_timeout(Duration::from_secs(secs));
        }
        Ok(client)
    }

    /// Search news articles for a keyword query.
    ///
    /// Issues a single GET for the first page only; no post-filtering,
    /// no dedup, no pagination.
    pub async fn search(&self, query: &str, sort_by: SortBy) -> Result<NewsApiResponse> {
        let response = tokio::time::timeout(
            self.timeout,
            self.client
                .get(&self.api_url)
                .header("X-Api-Key", &self.api_key)
                .query(&[("q", query), ("sortBy", sort_by.as_str())])
                .query(&[("pageSize", self.page_size)])
                .send(),
        )
        .await
        .map_err(|_| Error::Timeout(self.timeout))??;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Upstream { status, message });
        }

        let body = response.text().await?;
        let parsed: NewsApiResponse = serde_json::from_str(&body)
            .map_err(|e| Error::malformed("failed to parse news API response", e))?;

        info!(
            query,
            sort_by = sort_by.as_str(),
            total_results = parsed.total_results,
            "news search returned {} articles",
            parsed.articles.len()
        );
        Ok(parsed)
    }
}
