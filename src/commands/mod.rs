//! Intent handlers
//!
//! Each [`Intent`] is served by exactly one [`Handler`]. The standard set is
//! chosen by an exhaustive `match` in [`standard_handler`], so adding an intent
//! without a handler fails to compile.

mod coin;
mod language;
mod search;
mod social;
mod weather;
mod wikipedia;

use std::collections::HashMap;

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::context::AssistantContext;
use crate::intent::{Intent, PhraseCatalog};
use crate::phrases::PhraseBook;
use crate::providers::{
    Browser, KnowledgeProvider, SearchProvider, SpeechOutput, TranslationProvider,
    WeatherProvider,
};
use crate::{Error, Result};

pub use coin::{CoinSide, DEFAULT_FLIPS, TossCoin, toss_coin};
pub use language::{SwitchLanguage, Translate};
pub use search::{GoogleSearch, PersonSearch, YoutubeSearch, google_search_url};
pub use social::{Fallback, Farewell, Greeting};
pub use weather::WeatherForecast;
pub use wikipedia::{WikipediaSearch, first_sentences};

/// What the main loop should do after a handler returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Listen for the next utterance
    Continue,
    /// Stop the assistant
    Quit,
}

/// Providers and phrase table available to handlers
pub struct Services {
    /// Speech output
    pub speech: Box<dyn SpeechOutput>,
    /// URL opener
    pub browser: Box<dyn Browser>,
    /// Web search
    pub search: Box<dyn SearchProvider>,
    /// Encyclopedia
    pub knowledge: Box<dyn KnowledgeProvider>,
    /// Machine translation
    pub translator: Box<dyn TranslationProvider>,
    /// Weather
    pub weather: Box<dyn WeatherProvider>,
    /// Localized responses
    pub phrases: PhraseBook,
}

impl Services {
    /// Speak literal text in the context's current voice
    ///
    /// # Errors
    ///
    /// Returns error if speech output fails
    pub async fn say(&mut self, ctx: &AssistantContext, text: &str) -> Result<()> {
        self.speech.say(text, ctx.voice()).await
    }

    /// Speak a localized phrase with `{}` placeholders filled from `args`
    ///
    /// # Errors
    ///
    /// Returns error if speech output fails
    pub async fn say_phrase(&mut self, ctx: &AssistantContext, key: &str, args: &[&str]) -> Result<()> {
        let text = self.phrases.format(key, ctx.speech_language(), args);
        self.say(ctx, &text).await
    }

    /// Speak one of several localized phrases, chosen uniformly at random
    ///
    /// # Errors
    ///
    /// Returns error if speech output fails
    pub async fn say_one_of(
        &mut self,
        ctx: &AssistantContext,
        keys: &[&str],
        args: &[&str],
    ) -> Result<()> {
        let Some(key) = keys.choose(&mut rand::thread_rng()).copied() else {
            return Ok(());
        };
        self.say_phrase(ctx, key, args).await
    }
}

/// Behavior bound to an intent
#[async_trait(?Send)]
pub trait Handler {
    /// Run with the words left after the matched phrase
    ///
    /// # Errors
    ///
    /// Returns error if a provider call fails; the dispatcher reports it
    async fn handle(
        &self,
        args: &[String],
        ctx: &mut AssistantContext,
        services: &mut Services,
    ) -> Result<Outcome>;
}

/// The standard handler for an intent
#[must_use]
pub fn standard_handler(intent: Intent) -> Box<dyn Handler> {
    match intent {
        Intent::Greeting => Box::new(Greeting),
        Intent::Farewell => Box::new(Farewell),
        Intent::GoogleSearch => Box::new(GoogleSearch),
        Intent::YoutubeSearch => Box::new(YoutubeSearch),
        Intent::WikipediaSearch => Box::new(WikipediaSearch),
        Intent::PersonSearch => Box::new(PersonSearch),
        Intent::WeatherForecast => Box::new(WeatherForecast),
        Intent::Translation => Box::new(Translate),
        Intent::Language => Box::new(SwitchLanguage),
        Intent::TossCoin => Box::new(TossCoin::default()),
    }
}

/// Intent to handler bindings plus the no-match fallback
pub struct CommandRegistry {
    handlers: HashMap<Intent, Box<dyn Handler>>,
    fallback: Box<dyn Handler>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl CommandRegistry {
    /// Registry with the standard handler for every intent
    #[must_use]
    pub fn standard() -> Self {
        Self {
            handlers: Intent::ALL
                .into_iter()
                .map(|intent| (intent, standard_handler(intent)))
                .collect(),
            fallback: Box::new(Fallback),
        }
    }

    /// Replace the handler for one intent
    #[must_use]
    pub fn with_handler(mut self, intent: Intent, handler: impl Handler + 'static) -> Self {
        self.handlers.insert(intent, Box::new(handler));
        self
    }

    /// Replace the no-match fallback
    #[must_use]
    pub fn with_fallback(mut self, handler: impl Handler + 'static) -> Self {
        self.fallback = Box::new(handler);
        self
    }

    /// Handler bound to `intent`
    #[must_use]
    pub fn get(&self, intent: Intent) -> Option<&dyn Handler> {
        self.handlers.get(&intent).map(|handler| handler.as_ref())
    }

    /// Handler for utterances that match no intent
    #[must_use]
    pub fn fallback(&self) -> &dyn Handler {
        self.fallback.as_ref()
    }

    /// Check that every intent in the catalog has a handler
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first uncovered intent
    pub fn ensure_covers(&self, catalog: &PhraseCatalog) -> Result<()> {
        match catalog.intents().find(|intent| !self.handlers.contains_key(intent)) {
            Some(intent) => Err(Error::Config(format!("no handler for intent {intent}"))),
            None => Ok(()),
        }
    }
}
