//! One resolve and invoke cycle per utterance

use std::sync::Arc;

use crate::commands::{CommandRegistry, Outcome, Services};
use crate::context::AssistantContext;
use crate::intent::{IntentResolver, PhraseCatalog, Resolution};
use crate::{Error, Result};

/// Phrase spoken after any handler failure
pub const APOLOGY: &str = "Seems like we have a trouble. See logs for more information";

/// Resolves utterances to intents and runs their handlers
///
/// Handler failures stop here: they are logged with their [`ErrorKind`](crate::ErrorKind),
/// answered with a single spoken apology, and the cycle ends normally.
pub struct Dispatcher {
    resolver: IntentResolver,
    registry: CommandRegistry,
    services: Services,
    context: AssistantContext,
}

impl Dispatcher {
    /// Create a dispatcher, checking every catalog intent has a handler
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an intent is uncovered
    pub fn new(
        catalog: Arc<PhraseCatalog>,
        registry: CommandRegistry,
        services: Services,
        context: AssistantContext,
    ) -> Result<Self> {
        registry.ensure_covers(&catalog)?;
        tracing::debug!(phrases = catalog.len(), "dispatcher ready");

        Ok(Self {
            resolver: IntentResolver::new(catalog),
            registry,
            services,
            context,
        })
    }

    /// Shared assistant state
    #[must_use]
    pub const fn context(&self) -> &AssistantContext {
        &self.context
    }

    /// Providers and phrases
    #[must_use]
    pub const fn services(&self) -> &Services {
        &self.services
    }

    /// Mutable access for the listen step of the main loop
    pub fn parts_mut(&mut self) -> (&mut AssistantContext, &mut Services) {
        (&mut self.context, &mut self.services)
    }

    /// Resolve `tokens` and run exactly one handler
    ///
    /// Never fails; returns [`Outcome::Quit`] only when the farewell handler asks to stop.
    /// A failed handler leaves the context exactly as it found it.
    pub async fn run_cycle<S: AsRef<str>>(&mut self, tokens: &[S]) -> Outcome {
        let before = self.context.clone();

        let result = match self.resolver.resolve(tokens) {
            Resolution::Matched(command) => {
                tracing::info!(intent = %command.intent, args = ?command.args, "intent resolved");
                match self.registry.get(command.intent) {
                    Some(handler) => {
                        handler
                            .handle(&command.args, &mut self.context, &mut self.services)
                            .await
                    }
                    None => {
                        tracing::warn!(intent = %command.intent, "no handler bound, using fallback");
                        self.registry
                            .fallback()
                            .handle(&command.args, &mut self.context, &mut self.services)
                            .await
                    }
                }
            }
            Resolution::NoMatch => {
                tracing::info!("no intent matched");
                let args: Vec<String> = tokens.iter().map(|t| t.as_ref().to_string()).collect();
                self.registry
                    .fallback()
                    .handle(&args, &mut self.context, &mut self.services)
                    .await
            }
        };

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                self.context = before;
                self.report_failure(&e).await;
                Outcome::Continue
            }
        }
    }

    async fn report_failure(&mut self, error: &Error) {
        tracing::error!(error = %error, kind = ?error.kind(), "command failed");
        apologize(&self.context, &mut self.services).await;
    }
}

/// Speak the generic apology; a failure here is only logged
pub async fn apologize(ctx: &AssistantContext, services: &mut Services) {
    if let Err(e) = services.say_phrase(ctx, APOLOGY, &[]).await {
        tracing::error!(error = %e, kind = ?e.kind(), "failed to speak apology");
    }
}
