//! Intent recognition
//!
//! Utterances are tokenized, then matched against a [`PhraseCatalog`] by the
//! [`IntentResolver`] using a shortest-matching-prefix rule. The catalog is
//! built once at startup from the intent table (see [`table`]).

mod catalog;
mod resolver;
pub mod table;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

pub use catalog::{Phrase, PhraseCatalog};
pub use resolver::{IntentResolver, Resolution, ResolvedCommand};

/// Request categories the assistant understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Say hello to the user
    Greeting,
    /// Say goodbye and stop the assistant
    Farewell,
    /// Search the web on Google
    GoogleSearch,
    /// Search for videos on YouTube
    YoutubeSearch,
    /// Look up a definition on Wikipedia
    WikipediaSearch,
    /// Look a person up on social networks
    PersonSearch,
    /// Report the current weather
    WeatherForecast,
    /// Translate a phrase between native and target languages
    Translation,
    /// Switch the speech language
    Language,
    /// Toss a coin
    TossCoin,
}

impl Intent {
    /// Every intent, in declaration order
    pub const ALL: [Self; 10] = [
        Self::Greeting,
        Self::Farewell,
        Self::GoogleSearch,
        Self::YoutubeSearch,
        Self::WikipediaSearch,
        Self::PersonSearch,
        Self::WeatherForecast,
        Self::Translation,
        Self::Language,
        Self::TossCoin,
    ];

    /// Stable identifier used in intent tables and logs
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Farewell => "farewell",
            Self::GoogleSearch => "google_search",
            Self::YoutubeSearch => "youtube_search",
            Self::WikipediaSearch => "wikipedia_search",
            Self::PersonSearch => "person_search",
            Self::WeatherForecast => "weather_forecast",
            Self::Translation => "translation",
            Self::Language => "language",
            Self::TossCoin => "toss_coin",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Intent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|intent| intent.id() == s.trim())
            .ok_or_else(|| Error::UnknownIntent(s.to_string()))
    }
}

/// Split recognized text into lower-cased tokens
///
/// Runs of whitespace collapse, so `"  Найди   в Гугле "` yields
/// `["найди", "в", "гугле"]`.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_normalizes() {
        assert_eq!(
            tokenize("  Найди   в Гугле котики "),
            vec!["найди", "в", "гугле", "котики"]
        );
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_intent_id_roundtrip() {
        for intent in Intent::ALL {
            assert_eq!(intent.id().parse::<Intent>().unwrap(), intent);
        }
        assert!("dance".parse::<Intent>().is_err());
    }
}
