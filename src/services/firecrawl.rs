//! Firecrawl scraper
//!
//! Calls the Firecrawl `/v1/scrape` endpoint and extracts the article's
//! markdown body, title, and author.

use crate::config::FirecrawlConfig;
use crate::error::{BlogcastError, Result};
use crate::services::{status_error, ScrapedArticle, Scraper};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Firecrawl-backed [`Scraper`]
pub struct FirecrawlScraper {
    client: Client,
    config: FirecrawlConfig,
}

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<ScrapeData>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScrapeData {
    #[serde(default)]
    markdown: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    metadata: ScrapeMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct ScrapeMetadata {
    #[serde(default)]
    title: Option<serde_json::Value>,
    #[serde(default)]
    author: Option<serde_json::Value>,
}

/// Metadata fields arrive either as a string or as a list of strings
fn first_text(value: Option<&serde_json::Value>) -> Option<String> {
    let text = match value? {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items.first()?.as_str()?.to_string(),
        _ => return None,
    };
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Check that `url` is an absolute http(s) URL with a host
///
/// # Errors
///
/// Returns `BlogcastError::InvalidUrl` otherwise
///
/// # Examples
///
/// ```
/// use blogcast::services::firecrawl::validate_url;
///
/// assert!(validate_url("https://example.com/post").is_ok());
/// assert!(validate_url("example.com/post").is_err());
/// assert!(validate_url("ftp://example.com/file").is_err());
/// ```
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed =
        Url::parse(url.trim()).map_err(|_| BlogcastError::InvalidUrl(url.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(BlogcastError::InvalidUrl(url.to_string()).into());
    }

    Ok(parsed)
}

impl FirecrawlScraper {
    /// Create a new Firecrawl scraper
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: FirecrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("blogcast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BlogcastError::Scrape(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!("Initialized Firecrawl scraper: base={}", config.api_base);

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/scrape", self.config.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl Scraper for FirecrawlScraper {
    async fn scrape(&self, url: &str) -> Result<ScrapedArticle> {
        let parsed = validate_url(url)?;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| BlogcastError::MissingCredentials("FIRECRAWL_API_KEY".to_string()))?;

        tracing::info!("Scraping {}", parsed);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&ScrapeRequest {
                url: parsed.as_str(),
                formats: ["markdown"],
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Firecrawl request failed: {}", e);
                if e.is_timeout() {
                    BlogcastError::Scrape(format!("Request timeout while scraping {}", url))
                } else {
                    BlogcastError::Scrape(format!("Network error while scraping {}: {}", url, e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Firecrawl returned error {}: {}", status, error_text);
            return Err(status_error("Firecrawl", status, &error_text, BlogcastError::Scrape).into());
        }

        let body: ScrapeResponse = response.json().await.map_err(|e| {
            BlogcastError::Scrape(format!("Failed to parse Firecrawl response: {}", e))
        })?;

        if !body.success {
            let reason = body.error.unwrap_or_else(|| "unknown error".to_string());
            return Err(BlogcastError::Scrape(format!("Firecrawl failed for {}: {}", url, reason)).into());
        }

        let data = body.data.ok_or_else(|| {
            BlogcastError::Scrape(format!("No content found in Firecrawl response for URL: {}", url))
        })?;

        let content = data
            .markdown
            .or(data.content)
            .unwrap_or_default()
            .trim()
            .to_string();
        if content.is_empty() {
            return Err(BlogcastError::Scrape(format!(
                "No content found in Firecrawl response for URL: {}",
                url
            ))
            .into());
        }

        let article = ScrapedArticle {
            title: first_text(data.metadata.title.as_ref())
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            author: first_text(data.metadata.author.as_ref())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            url: url.to_string(),
            content,
        };

        tracing::debug!(
            "Scraped '{}' by {} ({} chars)",
            article.title,
            article.author,
            article.content.len()
        );

        Ok(article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url(" https://blog.example.com/a/b?c=d ").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_bad_input() {
        for bad in ["", "not a url", "example.com", "file:///etc/passwd", "mailto:a@b.c"] {
            let err = validate_url(bad).unwrap_err();
            let err = err.downcast::<BlogcastError>().unwrap();
            assert!(matches!(err, BlogcastError::InvalidUrl(_)), "{}", bad);
        }
    }

    #[test]
    fn test_first_text_handles_strings_and_lists() {
        assert_eq!(first_text(Some(&json!("Ada"))), Some("Ada".to_string()));
        assert_eq!(
            first_text(Some(&json!(["Grace", "Ada"]))),
            Some("Grace".to_string())
        );
        assert_eq!(first_text(Some(&json!("  "))), None);
        assert_eq!(first_text(Some(&json!(3))), None);
        assert_eq!(first_text(None), None);
    }

    #[tokio::test]
    async fn test_scrape_without_key_fails_before_request() {
        let scraper = FirecrawlScraper::new(FirecrawlConfig {
            api_base: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        })
        .unwrap();
        let err = scraper.scrape("https://example.com").await.unwrap_err();
        let err = err.downcast::<BlogcastError>().unwrap();
        assert!(matches!(err, BlogcastError::MissingCredentials(_)));
    }

    #[tokio::test]
    async fn test_scrape_invalid_url_fails_before_key_check() {
        let scraper = FirecrawlScraper::new(FirecrawlConfig::default()).unwrap();
        let err = scraper.scrape("nope").await.unwrap_err();
        let err = err.downcast::<BlogcastError>().unwrap();
        assert!(matches!(err, BlogcastError::InvalidUrl(_)));
    }
}
