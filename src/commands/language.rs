//! Translation and speech language switching

use async_trait::async_trait;

use super::{Handler, Outcome, Services};
use crate::Result;
use crate::context::AssistantContext;

/// Translates between the user's native and target languages
///
/// When the assistant speaks a non-native language the phrase is translated
/// into the native one; otherwise native is translated into target. The
/// result is spoken in the destination language, then the previous language is
/// restored whether or not speaking succeeded.
pub struct Translate;

#[async_trait(?Send)]
impl Handler for Translate {
    async fn handle(
        &self,
        args: &[String],
        ctx: &mut AssistantContext,
        services: &mut Services,
    ) -> Result<Outcome> {
        if args.is_empty() {
            return Ok(Outcome::Continue);
        }
        let text = args.join(" ");

        let current = ctx.speech_language();
        let (source, dest) = if current == ctx.user.native_language {
            (ctx.user.native_language, ctx.user.target_language)
        } else {
            (current, ctx.user.native_language)
        };

        let translated = services.translator.translate(&text, source, dest).await?;
        tracing::info!(text = %text, translated = %translated, source = %source, dest = %dest, "translated");

        services
            .say_phrase(ctx, "The translation for {} is", &[&text])
            .await?;

        let spoken = {
            let guard = ctx.scoped_language(dest);
            services.say(&guard, &translated).await
        };
        spoken?;

        Ok(Outcome::Continue)
    }
}

/// Toggles the speech language between native and target
pub struct SwitchLanguage;

#[async_trait(?Send)]
impl Handler for SwitchLanguage {
    async fn handle(
        &self,
        _args: &[String],
        ctx: &mut AssistantContext,
        _services: &mut Services,
    ) -> Result<Outcome> {
        let language = ctx.toggle_language();
        tracing::info!(language = %language, "language switched");
        Ok(Outcome::Continue)
    }
}
