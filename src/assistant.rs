//! The listen, resolve and respond loop

use crate::commands::{Outcome, Services};
use crate::context::AssistantContext;
use crate::dispatcher::{Dispatcher, apologize};
use crate::intent::tokenize;
use crate::providers::SpeechInput;
use crate::Error;

const MICROPHONE_PROMPT: &str = "Can you check if your microphone is on, please?";
const REPEAT_PROMPT: &str = "What did you say again?";

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The farewell intent ran
    Farewell,
    /// Ctrl-C while listening
    Interrupted,
    /// The input source has no more utterances
    InputClosed,
    /// The input source failed in a way listening again cannot fix
    Failed,
}

/// Voice assistant main loop
pub struct Assistant {
    input: Box<dyn SpeechInput>,
    dispatcher: Dispatcher,
}

impl Assistant {
    /// Create an assistant reading utterances from `input`
    #[must_use]
    pub fn new(input: Box<dyn SpeechInput>, dispatcher: Dispatcher) -> Self {
        Self { input, dispatcher }
    }

    /// The dispatcher driving each cycle
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run cycles until farewell, Ctrl-C or end of input
    ///
    /// Recognition problems are answered with a spoken prompt and the loop
    /// keeps listening. Errors that are not recoverable stop it.
    #[allow(clippy::future_not_send)]
    pub async fn run(&mut self) -> StopReason {
        let ctx = self.dispatcher.context();
        tracing::info!(
            assistant = %ctx.assistant_name,
            language = %ctx.speech_language(),
            "assistant listening"
        );

        loop {
            let heard = {
                let voice = self.dispatcher.context().voice();
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => None,
                    heard = self.input.listen(voice) => Some(heard),
                }
            };

            let Some(heard) = heard else {
                tracing::info!("shutdown requested");
                return StopReason::Interrupted;
            };

            match heard {
                Ok(text) => {
                    tracing::info!(text = %text, "recognized");
                    let tokens = tokenize(&text);
                    if self.dispatcher.run_cycle(&tokens).await == Outcome::Quit {
                        return StopReason::Farewell;
                    }
                }
                Err(Error::InputClosed) => {
                    tracing::info!("input closed");
                    return StopReason::InputClosed;
                }
                Err(e) if !e.is_recoverable() => {
                    tracing::error!(error = %e, kind = ?e.kind(), "input failed, stopping");
                    return StopReason::Failed;
                }
                Err(e) => {
                    let (ctx, services) = self.dispatcher.parts_mut();
                    recover(&e, ctx, services).await;
                }
            }
        }
    }
}

async fn recover(error: &Error, ctx: &AssistantContext, services: &mut Services) {
    let prompt = match error {
        Error::RecognitionTimeout => MICROPHONE_PROMPT,
        Error::RecognitionUnclear => REPEAT_PROMPT,
        _ => {
            tracing::error!(error = %error, kind = ?error.kind(), "listening failed");
            apologize(ctx, services).await;
            return;
        }
    };

    tracing::debug!(error = %error, "recognition incomplete");
    if let Err(e) = services.say_phrase(ctx, prompt, &[]).await {
        tracing::error!(error = %e, kind = ?e.kind(), "failed to speak prompt");
    }
}
