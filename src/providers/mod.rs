//! External collaborators
//!
//! Every outside service the assistant talks to sits behind a trait so the
//! dispatcher and handlers can be driven by test doubles. Production
//! implementations live in the submodules; speech I/O lives in
//! [`crate::voice`].

mod browser;
mod search;
mod translate;
mod weather;
mod wikipedia;

use async_trait::async_trait;

use crate::Result;
use crate::context::{Language, VoiceProfile};

pub use browser::SystemBrowser;
pub use search::{SearchBackend, WebSearch};
pub use translate::GoogleTranslate;
pub use weather::OpenWeatherMap;
pub use wikipedia::Wikipedia;

/// Source of recognized user speech
#[async_trait(?Send)]
pub trait SpeechInput {
    /// Wait for one utterance and return its transcript
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::RecognitionTimeout`] if nobody spoke within the
    /// capture window and [`crate::Error::RecognitionUnclear`] if speech could
    /// not be transcribed
    async fn listen(&mut self, voice: &VoiceProfile) -> Result<String>;
}

/// Sink for assistant speech
#[async_trait(?Send)]
pub trait SpeechOutput {
    /// Speak `text`, returning once playback has finished
    ///
    /// # Errors
    ///
    /// Returns error if synthesis or playback fails
    async fn say(&mut self, text: &str, voice: &VoiceProfile) -> Result<()>;
}

/// Opens pages for the user
pub trait Browser {
    /// Open `url` in the user's browser
    ///
    /// # Errors
    ///
    /// Returns error if the browser cannot be launched
    fn open(&self, url: &str) -> Result<()>;
}

/// Web search returning result URLs
#[async_trait(?Send)]
pub trait SearchProvider {
    /// Search for `query`, best result first
    ///
    /// # Errors
    ///
    /// Returns error if the search request fails
    async fn search(&self, query: &str, language: Language) -> Result<Vec<String>>;
}

/// Encyclopedia article summary
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Article {
    /// Whether a page exists for the term
    pub exists: bool,
    /// Plain-text summary of the page
    pub summary: String,
    /// Canonical page URL
    pub url: String,
}

/// Encyclopedia lookup
#[async_trait(?Send)]
pub trait KnowledgeProvider {
    /// Look up `term` in the encyclopedia for `language`
    ///
    /// # Errors
    ///
    /// Returns error if the lookup request fails
    async fn lookup(&self, term: &str, language: Language) -> Result<Article>;
}

/// Machine translation
#[async_trait(?Send)]
pub trait TranslationProvider {
    /// Translate `text` from `source` to `dest`
    ///
    /// # Errors
    ///
    /// Returns error if the translation request fails
    async fn translate(&self, text: &str, source: Language, dest: Language) -> Result<String>;
}

/// Current weather observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherReport {
    /// Air temperature in degrees Celsius
    pub temperature_c: f64,
    /// Wind speed in meters per second
    pub wind_speed: f64,
    /// Atmospheric pressure in hectopascals
    pub pressure_hpa: f64,
}

impl WeatherReport {
    /// Pressure converted to millimeters of mercury, truncated
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn pressure_mm_hg(&self) -> i64 {
        (self.pressure_hpa / 1.333) as i64
    }
}

/// Current weather lookup
#[async_trait(?Send)]
pub trait WeatherProvider {
    /// Fetch current weather for `city`
    ///
    /// # Errors
    ///
    /// Returns error if the weather request fails
    async fn current_weather(&self, city: &str) -> Result<WeatherReport>;
}
