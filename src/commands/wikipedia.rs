//! Encyclopedia definitions

use async_trait::async_trait;

use super::search::google_search_url;
use super::{Handler, Outcome, Services};
use crate::Result;
use crate::context::AssistantContext;

/// Sentences of the summary read aloud
const SUMMARY_SENTENCES: usize = 2;

/// The first `count` sentences of `text`, split on periods
#[must_use]
pub fn first_sentences(text: &str, count: usize) -> String {
    let sentences: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(count)
        .collect();

    if sentences.is_empty() {
        String::new()
    } else {
        format!("{}.", sentences.join(". "))
    }
}

/// Reads a Wikipedia summary, or falls back to a Google search
pub struct WikipediaSearch;

#[async_trait(?Send)]
impl Handler for WikipediaSearch {
    async fn handle(
        &self,
        args: &[String],
        ctx: &mut AssistantContext,
        services: &mut Services,
    ) -> Result<Outcome> {
        if args.is_empty() {
            return Ok(Outcome::Continue);
        }
        let term = args.join(" ");

        let article = services
            .knowledge
            .lookup(&term, ctx.speech_language())
            .await?;

        if article.exists {
            services
                .say_phrase(ctx, "Here is what I found for {} on Wikipedia", &[&term])
                .await?;
            if !article.url.is_empty() {
                services.browser.open(&article.url)?;
            }
            let summary = first_sentences(&article.summary, SUMMARY_SENTENCES);
            if !summary.is_empty() {
                services.say(ctx, &summary).await?;
            }
        } else {
            tracing::info!(term = %term, "no wikipedia article");
            services
                .say_phrase(
                    ctx,
                    "Can't find {} on Wikipedia. But here is what I found on google",
                    &[&term],
                )
                .await?;
            services.browser.open(&google_search_url(&term))?;
        }

        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sentences() {
        assert_eq!(
            first_sentences("Rust is a language. It is fast. It is safe.", 2),
            "Rust is a language. It is fast."
        );
        assert_eq!(first_sentences("One sentence only", 2), "One sentence only.");
        assert_eq!(first_sentences("", 2), "");
    }
}
