//! Greetings, farewells and the "didn't understand" fallback

use async_trait::async_trait;

use super::{Handler, Outcome, Services};
use crate::Result;
use crate::context::AssistantContext;

const GREETINGS: [&str; 2] = [
    "Hello, {}! How can I help today?",
    "Good day to you, {}! How can I help today?",
];

const FAREWELLS: [&str; 2] = ["Goodbye, {}! Have a nice day!", "See you soon, {}!"];

const FAILURE_PHRASES: [&str; 2] = ["Can you repeat, please?", "What did you say again?"];

/// Greets the user by name
pub struct Greeting;

#[async_trait(?Send)]
impl Handler for Greeting {
    async fn handle(
        &self,
        _args: &[String],
        ctx: &mut AssistantContext,
        services: &mut Services,
    ) -> Result<Outcome> {
        let name = ctx.user.name.clone();
        services.say_one_of(ctx, &GREETINGS, &[&name]).await?;
        Ok(Outcome::Continue)
    }
}

/// Says goodbye and stops the assistant
pub struct Farewell;

#[async_trait(?Send)]
impl Handler for Farewell {
    async fn handle(
        &self,
        _args: &[String],
        ctx: &mut AssistantContext,
        services: &mut Services,
    ) -> Result<Outcome> {
        let name = ctx.user.name.clone();
        // A failed goodbye must not keep the assistant running
        if let Err(e) = services.say_one_of(ctx, &FAREWELLS, &[&name]).await {
            tracing::warn!(error = %e, "failed to speak farewell");
        }
        tracing::info!("farewell, shutting down");
        Ok(Outcome::Quit)
    }
}

/// Asks the user to repeat when nothing matched
pub struct Fallback;

#[async_trait(?Send)]
impl Handler for Fallback {
    async fn handle(
        &self,
        _args: &[String],
        ctx: &mut AssistantContext,
        services: &mut Services,
    ) -> Result<Outcome> {
        services.say_one_of(ctx, &FAILURE_PHRASES, &[]).await?;
        Ok(Outcome::Continue)
    }
}
