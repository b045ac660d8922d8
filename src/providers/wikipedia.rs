//! Wikipedia page summaries

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{Article, KnowledgeProvider};
use crate::context::Language;
use crate::{Error, Result};

/// Wikipedia REST summary response
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    extract: String,
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: PageUrls,
}

#[derive(Debug, Deserialize)]
struct PageUrls {
    page: String,
}

/// Wikipedia client using the REST summary endpoint
pub struct Wikipedia {
    client: reqwest::Client,
}

impl Default for Wikipedia {
    fn default() -> Self {
        Self::new()
    }
}

impl Wikipedia {
    /// Create a new client
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

/// Summary endpoint URL for a term in a language edition
fn summary_url(term: &str, language: Language) -> String {
    let title = term.trim().replace(' ', "_");
    format!(
        "https://{}.wikipedia.org/api/rest_v1/page/summary/{}",
        language.code(),
        urlencoding::encode(&title)
    )
}

#[async_trait(?Send)]
impl KnowledgeProvider for Wikipedia {
    async fn lookup(&self, term: &str, language: Language) -> Result<Article> {
        let url = summary_url(term, language);
        tracing::debug!(term, url = %url, "wikipedia lookup");

        let response = self
            .client
            .get(&url)
            .header("User-Agent", concat!("martha/", env!("CARGO_PKG_VERSION")))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Article::default());
        }

        let response = response
            .error_for_status()
            .map_err(|e| Error::Knowledge(e.to_string()))?;

        let summary: SummaryResponse = response.json().await?;
        let page_url = summary
            .content_urls
            .map(|u| u.desktop.page)
            .unwrap_or_default();

        Ok(Article {
            exists: true,
            summary: summary.extract,
            url: page_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_url_encodes_title() {
        assert_eq!(
            summary_url("black hole", Language::En),
            "https://en.wikipedia.org/api/rest_v1/page/summary/black_hole"
        );
        assert!(summary_url("кот", Language::Ru).starts_with("https://ru.wikipedia.org/"));
        assert!(summary_url("кот", Language::Ru).ends_with("%D0%BA%D0%BE%D1%82"));
    }
}
