//! Assistant state shared across listen/dispatch cycles
//!
//! The speech language can only be changed through
//! [`AssistantContext::set_speech_language`] or a [`LanguageGuard`], and both
//! recompute the [`VoiceProfile`] in the same step.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Languages the assistant can speak and recognize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Russian
    Ru,
    /// English
    En,
}

impl Language {
    /// ISO 639-1 code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
        }
    }

    /// Locale tag passed to speech recognition
    #[must_use]
    pub const fn recognition_locale(self) -> &'static str {
        match self {
            Self::Ru => "ru-RU",
            Self::En => "en-US",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ru" | "ru-ru" => Ok(Self::Ru),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            other => Err(Error::Config(format!("unsupported language: {other}"))),
        }
    }
}

/// Synthesis voice to use for each language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSettings {
    /// TTS voice for Russian speech
    pub ru: String,
    /// TTS voice for English speech
    pub en: String,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            ru: "nova".to_string(),
            en: "shimmer".to_string(),
        }
    }
}

impl VoiceSettings {
    fn voice_for(&self, language: Language) -> &str {
        match language {
            Language::Ru => &self.ru,
            Language::En => &self.en,
        }
    }
}

/// Recognition and synthesis settings derived from the speech language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceProfile {
    /// Language the assistant currently speaks and listens in
    pub language: Language,
    /// Locale tag for recognition (e.g. "ru-RU")
    pub recognition_locale: &'static str,
    /// Synthesis voice identifier
    pub tts_voice: String,
}

impl VoiceProfile {
    fn for_language(language: Language, voices: &VoiceSettings) -> Self {
        Self {
            language,
            recognition_locale: language.recognition_locale(),
            tts_voice: voices.voice_for(language).to_string(),
        }
    }
}

/// Information about the assistant's owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Name used in greetings and farewells
    pub name: String,
    /// City used for weather when none is named
    pub home_city: String,
    /// Language the user speaks natively
    pub native_language: Language,
    /// Language the user is learning; translation target
    pub target_language: Language,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Алексей".to_string(),
            home_city: "Tomsk".to_string(),
            native_language: Language::Ru,
            target_language: Language::En,
        }
    }
}

/// Mutable state handlers read and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantContext {
    /// Assistant's own name
    pub assistant_name: String,
    /// Owner profile
    pub user: UserProfile,
    voices: VoiceSettings,
    voice: VoiceProfile,
}

impl AssistantContext {
    /// Create a context speaking `speech_language`
    #[must_use]
    pub fn new(
        assistant_name: impl Into<String>,
        user: UserProfile,
        speech_language: Language,
        voices: VoiceSettings,
    ) -> Self {
        let voice = VoiceProfile::for_language(speech_language, &voices);
        Self {
            assistant_name: assistant_name.into(),
            user,
            voices,
            voice,
        }
    }

    /// Current speech language
    #[must_use]
    pub const fn speech_language(&self) -> Language {
        self.voice.language
    }

    /// Current recognition and synthesis settings
    #[must_use]
    pub const fn voice(&self) -> &VoiceProfile {
        &self.voice
    }

    /// Change the speech language and reconfigure the voice
    pub fn set_speech_language(&mut self, language: Language) {
        self.voice = VoiceProfile::for_language(language, &self.voices);
        tracing::debug!(
            language = %language,
            locale = self.voice.recognition_locale,
            tts_voice = %self.voice.tts_voice,
            "voice reconfigured"
        );
    }

    /// Switch between native and target language
    ///
    /// Any language other than native switches back to native.
    pub fn toggle_language(&mut self) -> Language {
        let next = if self.speech_language() == self.user.native_language {
            self.user.target_language
        } else {
            self.user.native_language
        };
        self.set_speech_language(next);
        next
    }

    /// Speak `language` until the returned guard is dropped
    pub fn scoped_language(&mut self, language: Language) -> LanguageGuard<'_> {
        let previous = self.speech_language();
        self.set_speech_language(language);
        LanguageGuard {
            context: self,
            previous,
        }
    }
}

impl Default for AssistantContext {
    fn default() -> Self {
        Self::new("Martha", UserProfile::default(), Language::Ru, VoiceSettings::default())
    }
}

/// Restores the previous speech language when dropped
pub struct LanguageGuard<'a> {
    context: &'a mut AssistantContext,
    previous: Language,
}

impl Deref for LanguageGuard<'_> {
    type Target = AssistantContext;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for LanguageGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl Drop for LanguageGuard<'_> {
    fn drop(&mut self) {
        self.context.set_speech_language(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_change_reconfigures_voice() {
        let mut ctx = AssistantContext::default();
        assert_eq!(ctx.voice().recognition_locale, "ru-RU");
        assert_eq!(ctx.voice().tts_voice, "nova");

        ctx.set_speech_language(Language::En);
        assert_eq!(ctx.speech_language(), Language::En);
        assert_eq!(ctx.voice().recognition_locale, "en-US");
        assert_eq!(ctx.voice().tts_voice, "shimmer");
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut ctx = AssistantContext::default();
        let original = ctx.clone();

        assert_eq!(ctx.toggle_language(), Language::En);
        assert_eq!(ctx.toggle_language(), Language::Ru);
        assert_eq!(ctx, original);
    }

    #[test]
    fn test_scoped_language_restores_on_drop() {
        let mut ctx = AssistantContext::default();
        {
            let guard = ctx.scoped_language(Language::En);
            assert_eq!(guard.speech_language(), Language::En);
            assert_eq!(guard.voice().recognition_locale, "en-US");
        }
        assert_eq!(ctx.speech_language(), Language::Ru);
        assert_eq!(ctx.voice().recognition_locale, "ru-RU");
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("RU".parse::<Language>().unwrap(), Language::Ru);
        assert_eq!("en-US".parse::<Language>().unwrap(), Language::En);
        assert!("de".parse::<Language>().is_err());
    }
}
