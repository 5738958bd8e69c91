//! External service abstractions for Blogcast
//!
//! Each conversion step is delegated to a remote service behind a trait:
//!
//! - [`Scraper`]: URL to article text (Firecrawl)
//! - [`ScriptWriter`]: article text to spoken-word script (OpenAI chat)
//! - [`SpeechSynthesizer`]: script to audio file (OpenAI speech)
//!
//! The pipeline is generic over these traits so tests can substitute
//! in-process fakes.

pub mod firecrawl;
pub mod openai;

pub use firecrawl::FirecrawlScraper;
pub use openai::{OpenAiScriptWriter, OpenAiSpeech};

use crate::error::{BlogcastError, Result};
use crate::voice::Voice;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::path::Path;

/// Article extracted from a blog URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedArticle {
    /// Article title
    pub title: String,
    /// Article author
    pub author: String,
    /// URL that was scraped
    pub url: String,
    /// Body text (markdown)
    pub content: String,
}

impl ScrapedArticle {
    /// Render the article as the text block handed to the script writer
    ///
    /// # Examples
    ///
    /// ```
    /// use blogcast::services::ScrapedArticle;
    ///
    /// let article = ScrapedArticle {
    ///     title: "Hello".to_string(),
    ///     author: "Ada".to_string(),
    ///     url: "https://example.com".to_string(),
    ///     content: "Body".to_string(),
    /// };
    /// let text = article.to_prompt_text();
    /// assert!(text.starts_with("BLOG POST CONTENT:"));
    /// assert!(text.contains("Title: Hello"));
    /// ```
    pub fn to_prompt_text(&self) -> String {
        format!(
            "BLOG POST CONTENT:\n\nTitle: {}\nAuthor: {}\nURL: {}\n\nContent:\n{}",
            self.title,
            self.author,
            self.url,
            self.content.trim()
        )
    }
}

/// Fetches article text for a URL
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Scrape `url` into an article
    async fn scrape(&self, url: &str) -> Result<ScrapedArticle>;
}

/// Rewrites article text as a spoken-word script
#[async_trait]
pub trait ScriptWriter: Send + Sync {
    /// Produce a script (without metadata header) from article text
    async fn write_script(&self, article_text: &str) -> Result<String>;

    /// Model name, recorded in the script footer
    fn model_name(&self) -> String;
}

/// Turns script text into an audio file
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with `voice` into `path`, returning bytes written
    async fn synthesize(&self, text: &str, voice: Voice, path: &Path) -> Result<u64>;
}

/// Map a non-success HTTP status to a typed error
///
/// `wrap` builds the service-specific variant for statuses that are not
/// authentication or rate-limit failures.
pub(crate) fn status_error(
    service: &str,
    status: StatusCode,
    body: &str,
    wrap: fn(String) -> BlogcastError,
) -> BlogcastError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BlogcastError::Authentication(
            format!("{} rejected the API key ({})", service, status),
        ),
        StatusCode::TOO_MANY_REQUESTS => BlogcastError::RateLimited(format!(
            "{} rate limit exceeded. Please try again later.",
            service
        )),
        _ => wrap(format!("{} returned error {}: {}", service, status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_maps_auth() {
        let err = status_error(
            "OpenAI",
            StatusCode::UNAUTHORIZED,
            "",
            BlogcastError::Synthesis,
        );
        assert!(matches!(err, BlogcastError::Authentication(_)));
    }

    #[test]
    fn test_status_error_maps_rate_limit() {
        let err = status_error(
            "Firecrawl",
            StatusCode::TOO_MANY_REQUESTS,
            "",
            BlogcastError::Scrape,
        );
        assert!(matches!(err, BlogcastError::RateLimited(_)));
    }

    #[test]
    fn test_status_error_wraps_other_statuses() {
        let err = status_error(
            "Firecrawl",
            StatusCode::INTERNAL_SERVER_ERROR,
            "boom",
            BlogcastError::Scrape,
        );
        match err {
            BlogcastError::Scrape(msg) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("boom"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_prompt_text_trims_content() {
        let article = ScrapedArticle {
            title: "T".to_string(),
            author: "A".to_string(),
            url: "https://x".to_string(),
            content: "\n\nbody\n\n".to_string(),
        };
        assert!(article.to_prompt_text().ends_with("Content:\nbody"));
    }
}
