//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the identifying user agent
//! - The `Catalog` trait the run loop talks to
//! - `HttpCatalog`, which fetches listing pages, detail pages and text assets
//!
//! There is no retry logic. A non-2xx response or a network error is returned
//! as `ShelfError::Http` and ends the run.

use crate::config::{Config, UserAgentConfig};
use crate::crawler::parser::{find_text_asset, parse_listing, LinkRules, ListingPage};
use crate::ShelfError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Read access to the book catalog
///
/// The run loop is written against this trait so it can be driven by a fake
/// catalog in tests.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetches one listing page and extracts its items and next link
    async fn listing(&self, url: &str) -> Result<ListingPage, ShelfError>;

    /// Fetches an item's detail page and finds its plain-text asset
    async fn text_link(&self, item_url: &str) -> Result<Option<String>, ShelfError>;

    /// Downloads a plain-text asset
    async fn download_text(&self, text_url: &str) -> Result<String, ShelfError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use shelf_press::config::UserAgentConfig;
/// use shelf_press::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `Catalog` backed by real HTTP requests
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    rules: LinkRules,
    page_timeout: Duration,
    asset_timeout: Duration,
}

impl HttpCatalog {
    /// Creates a catalog client from the crawler configuration
    pub fn new(config: &Config) -> Result<Self, ShelfError> {
        let client = build_http_client(&config.user_agent)?;
        let rules = LinkRules::from_config(&config.catalog)?;

        Ok(Self {
            client,
            rules,
            page_timeout: Duration::from_secs(config.crawler.page_timeout_secs),
            asset_timeout: Duration::from_secs(config.crawler.asset_timeout_secs),
        })
    }

    /// GETs `url` and returns the final URL (after redirects) with the body
    async fn get(&self, url: &str, timeout: Duration) -> Result<(Url, String), ShelfError> {
        let http_error = |source: reqwest::Error| ShelfError::Http {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(http_error)?
            .error_for_status()
            .map_err(http_error)?;

        let final_url = response.url().clone();
        let body = response.text().await.map_err(http_error)?;

        tracing::trace!("Fetched {} ({} bytes)", final_url, body.len());
        Ok((final_url, body))
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn listing(&self, url: &str) -> Result<ListingPage, ShelfError> {
        let (final_url, body) = self.get(url, self.page_timeout).await?;
        Ok(parse_listing(&body, &final_url, &self.rules))
    }

    async fn text_link(&self, item_url: &str) -> Result<Option<String>, ShelfError> {
        let (final_url, body) = self.get(item_url, self.page_timeout).await?;
        Ok(find_text_asset(&body, &final_url, &self.rules))
    }

    async fn download_text(&self, text_url: &str) -> Result<String, ShelfError> {
        let (_, body) = self.get(text_url, self.asset_timeout).await?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_catalog_from_default_config() {
        assert!(HttpCatalog::new(&Config::default()).is_ok());
    }

    #[test]
    fn test_http_catalog_rejects_bad_selector() {
        let mut config = Config::default();
        config.catalog.item_selector = "[[".to_string();
        assert!(matches!(
            HttpCatalog::new(&config),
            Err(ShelfError::Config(_))
        ));
    }

    // Request behavior is covered with wiremock in the integration tests
}
