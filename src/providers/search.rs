//! Web search via configurable backends (Brave, Serper)

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::SearchProvider;
use crate::context::Language;
use crate::{Error, Result};

/// Results requested per query; only the first is used
const RESULT_LIMIT: usize = 1;

/// Search backend configuration
#[derive(Debug)]
pub enum SearchBackend {
    /// Brave Search API
    Brave {
        /// API key for Brave Search
        api_key: SecretString,
    },
    /// Serper (Google) Search API
    Serper {
        /// API key for Serper
        api_key: SecretString,
    },
    /// No search key configured; searches return nothing
    Disabled,
}

/// Web search client
pub struct WebSearch {
    backend: SearchBackend,
    client: reqwest::Client,
}

/// Brave Search API response
#[derive(Debug, Deserialize)]
struct BraveSearchResponse {
    web: Option<BraveWebResults>,
}

#[derive(Debug, Deserialize)]
struct BraveWebResults {
    results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    url: String,
}

/// Serper API response
#[derive(Debug, Deserialize)]
struct SerperSearchResponse {
    organic: Option<Vec<SerperResult>>,
}

#[derive(Debug, Deserialize)]
struct SerperResult {
    link: String,
}

/// Serper API request body
#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    hl: &'a str,
    num: usize,
}

impl WebSearch {
    /// Create a search client for a backend
    #[must_use]
    pub fn new(backend: SearchBackend) -> Self {
        Self {
            backend,
            client: reqwest::Client::new(),
        }
    }

    /// Pick a backend from whichever key is present, preferring Brave
    #[must_use]
    pub fn from_keys(brave: Option<SecretString>, serper: Option<SecretString>) -> Self {
        let backend = match (brave, serper) {
            (Some(api_key), _) => SearchBackend::Brave { api_key },
            (None, Some(api_key)) => SearchBackend::Serper { api_key },
            (None, None) => {
                tracing::info!("no search API key configured, first-result lookup disabled");
                SearchBackend::Disabled
            }
        };
        Self::new(backend)
    }

    /// Search using Brave Search API
    async fn search_brave(&self, api_key: &str, query: &str, language: Language) -> Result<Vec<String>> {
        let count = RESULT_LIMIT.to_string();
        let response = self
            .client
            .get("https://api.search.brave.com/res/v1/web/search")
            .header("X-Subscription-Token", api_key)
            .query(&[
                ("q", query),
                ("count", count.as_str()),
                ("search_lang", language.code()),
            ])
            .send()
            .await?;

        let response = response
            .error_for_status()
            .map_err(|e| Error::Search(e.to_string()))?;

        let brave_response: BraveSearchResponse = response.json().await?;

        Ok(brave_response
            .web
            .map(|web| web.results.into_iter().map(|r| r.url).collect())
            .unwrap_or_default())
    }

    /// Search using Serper API
    async fn search_serper(&self, api_key: &str, query: &str, language: Language) -> Result<Vec<String>> {
        let request_body = SerperRequest {
            q: query,
            hl: language.code(),
            num: RESULT_LIMIT,
        };

        let response = self
            .client
            .post("https://google.serper.dev/search")
            .header("X-API-KEY", api_key)
            .json(&request_body)
            .send()
            .await?;

        let response = response
            .error_for_status()
            .map_err(|e| Error::Search(e.to_string()))?;

        let serper_response: SerperSearchResponse = response.json().await?;

        Ok(serper_response
            .organic
            .map(|organic| organic.into_iter().map(|r| r.link).collect())
            .unwrap_or_default())
    }
}

#[async_trait(?Send)]
impl SearchProvider for WebSearch {
    async fn search(&self, query: &str, language: Language) -> Result<Vec<String>> {
        tracing::debug!(query, language = %language, "web search");
        match &self.backend {
            SearchBackend::Brave { api_key } => {
                self.search_brave(api_key.expose_secret(), query, language).await
            }
            SearchBackend::Serper { api_key } => {
                self.search_serper(api_key.expose_secret(), query, language).await
            }
            SearchBackend::Disabled => Ok(Vec::new()),
        }
    }
}
