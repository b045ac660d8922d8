//! Web searches that open results in the browser

use async_trait::async_trait;

use super::{Handler, Outcome, Services};
use crate::Result;
use crate::context::AssistantContext;

/// Google results page for a query
#[must_use]
pub fn google_search_url(query: &str) -> String {
    format!("https://google.com/search?q={}", urlencoding::encode(query))
}

/// Opens a Google search and its first result
pub struct GoogleSearch;

#[async_trait(?Send)]
impl Handler for GoogleSearch {
    async fn handle(
        &self,
        args: &[String],
        ctx: &mut AssistantContext,
        services: &mut Services,
    ) -> Result<Outcome> {
        if args.is_empty() {
            return Ok(Outcome::Continue);
        }
        let query = args.join(" ");

        services.browser.open(&google_search_url(&query))?;

        let results = services.search.search(&query, ctx.speech_language()).await?;
        tracing::info!(query = %query, results = ?results, "google search");
        if let Some(first) = results.first() {
            services.browser.open(first)?;
        }

        services
            .say_phrase(ctx, "Here is what I found for: {} on google", &[&query])
            .await?;
        Ok(Outcome::Continue)
    }
}

/// Opens a YouTube search
pub struct YoutubeSearch;

#[async_trait(?Send)]
impl Handler for YoutubeSearch {
    async fn handle(
        &self,
        args: &[String],
        ctx: &mut AssistantContext,
        services: &mut Services,
    ) -> Result<Outcome> {
        if args.is_empty() {
            return Ok(Outcome::Continue);
        }
        let query = args.join(" ");

        let url = format!(
            "https://www.youtube.com/results?search_query={}",
            urlencoding::encode(&query)
        );
        services.browser.open(&url)?;

        services
            .say_phrase(ctx, "Here is what I found for: {} on youtube", &[&query])
            .await?;
        Ok(Outcome::Continue)
    }
}

/// Looks a person up on Google and VK
pub struct PersonSearch;

#[async_trait(?Send)]
impl Handler for PersonSearch {
    async fn handle(
        &self,
        args: &[String],
        ctx: &mut AssistantContext,
        services: &mut Services,
    ) -> Result<Outcome> {
        if args.is_empty() {
            return Ok(Outcome::Continue);
        }
        let full_name = args.join(" ");
        let vk_name = args.join("_");

        services
            .browser
            .open(&google_search_url(&format!("{full_name} site: vk.com")))?;
        services.browser.open(&format!(
            "https://vk.com/people/{}",
            urlencoding::encode(&vk_name)
        ))?;

        services
            .say_phrase(ctx, "Here is what I found for {} on social nets", &[&full_name])
            .await?;
        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_search_url_encodes_query() {
        assert_eq!(
            google_search_url("rust async"),
            "https://google.com/search?q=rust%20async"
        );
    }
}
