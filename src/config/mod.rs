//! Configuration management for Martha
//!
//! Every setting is resolved env > toml > default.

pub mod file;

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::Result;
use crate::context::{AssistantContext, Language, UserProfile, VoiceSettings};
use crate::voice::CaptureLimits;

use self::file::MarthaConfigFile;

/// Martha configuration
#[derive(Debug)]
pub struct Config {
    /// Owner profile
    pub user: UserProfile,

    /// Assistant's own name
    pub assistant_name: String,

    /// Language the assistant starts speaking
    pub speech_language: Language,

    /// Voice configuration
    pub voice: VoiceConfig,

    /// API keys
    pub api_keys: ApiKeys,

    /// Optional user intent table
    pub intents_file: Option<PathBuf>,
}

/// Voice processing configuration
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// STT model (e.g. "whisper-1")
    pub stt_model: String,

    /// TTS model (e.g. "tts-1")
    pub tts_model: String,

    /// TTS voice per language
    pub voices: VoiceSettings,

    /// TTS speed multiplier (0.25 to 4.0)
    pub tts_speed: f64,

    /// Listening window
    pub limits: CaptureLimits,
}

/// API keys for external services
#[derive(Debug, Default)]
pub struct ApiKeys {
    /// `OpenAI` API key (for Whisper and TTS)
    pub openai: Option<SecretString>,

    /// `OpenWeatherMap` API key
    pub weather: Option<SecretString>,

    /// Brave Search API key
    pub brave: Option<SecretString>,

    /// Serper API key
    pub serper: Option<SecretString>,
}

impl Config {
    /// Load configuration from the environment and the config file
    ///
    /// # Errors
    ///
    /// Returns error if a language code is not supported
    pub fn load() -> Result<Self> {
        let fc = file::load_config_file();
        Self::from_sources(fc, |name| std::env::var(name).ok())
    }

    /// Build configuration from a parsed file and an environment lookup
    ///
    /// # Errors
    ///
    /// Returns error if a language code is not supported
    pub fn from_sources(fc: MarthaConfigFile, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret = |name: &str, file_value: Option<String>| {
            env(name)
                .or(file_value)
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from)
        };

        // API keys (env > toml > None)
        let api_keys = ApiKeys {
            openai: secret("OPENAI_API_KEY", fc.api_keys.openai),
            weather: secret("WEATHER_API_KEY", fc.api_keys.weather),
            brave: secret("BRAVE_API_KEY", fc.api_keys.brave),
            serper: secret("SERPER_API_KEY", fc.api_keys.serper),
        };

        // User profile (env > toml > default)
        let defaults = UserProfile::default();
        let user = UserProfile {
            name: env("MARTHA_USER_NAME")
                .or(fc.user.name)
                .unwrap_or(defaults.name),
            home_city: env("MARTHA_HOME_CITY")
                .or(fc.user.home_city)
                .unwrap_or(defaults.home_city),
            native_language: parse_language(fc.user.native_language, defaults.native_language)?,
            target_language: parse_language(fc.user.target_language, defaults.target_language)?,
        };

        let speech_language = parse_language(fc.assistant.speech_language, user.native_language)?;

        // Voice config (env > toml > default)
        let default_voices = VoiceSettings::default();
        let default_limits = CaptureLimits::default();
        let voice = VoiceConfig {
            stt_model: env("MARTHA_STT_MODEL")
                .or(fc.voice.stt_model)
                .unwrap_or_else(|| "whisper-1".to_string()),
            tts_model: env("MARTHA_TTS_MODEL")
                .or(fc.voice.tts_model)
                .unwrap_or_else(|| "tts-1".to_string()),
            voices: VoiceSettings {
                ru: fc.voice.tts_voice_ru.unwrap_or(default_voices.ru),
                en: fc.voice.tts_voice_en.unwrap_or(default_voices.en),
            },
            tts_speed: fc.voice.tts_speed.unwrap_or(1.0),
            limits: CaptureLimits {
                initial_silence: fc
                    .voice
                    .initial_silence_secs
                    .map_or(default_limits.initial_silence, Duration::from_secs),
                max_utterance: fc
                    .voice
                    .max_utterance_secs
                    .map_or(default_limits.max_utterance, Duration::from_secs),
            },
        };

        Ok(Self {
            user,
            assistant_name: fc.assistant.name.unwrap_or_else(|| "Martha".to_string()),
            speech_language,
            voice,
            api_keys,
            intents_file: fc.intents_file,
        })
    }

    /// Initial assistant state for this configuration
    #[must_use]
    pub fn context(&self) -> AssistantContext {
        AssistantContext::new(
            self.assistant_name.clone(),
            self.user.clone(),
            self.speech_language,
            self.voice.voices.clone(),
        )
    }
}

fn parse_language(value: Option<String>, default: Language) -> Result<Language> {
    value.map_or(Ok(default), |code| code.parse())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;
    use crate::Error;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_sources(MarthaConfigFile::default(), env_from(&[])).unwrap();

        assert_eq!(config.user.name, "Алексей");
        assert_eq!(config.user.home_city, "Tomsk");
        assert_eq!(config.assistant_name, "Martha");
        assert_eq!(config.speech_language, Language::Ru);
        assert_eq!(config.voice.stt_model, "whisper-1");
        assert_eq!(config.voice.limits, CaptureLimits::default());
        assert!(config.api_keys.openai.is_none());
        assert!(config.intents_file.is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut fc = MarthaConfigFile::default();
        fc.user.name = Some("FromFile".to_string());
        fc.user.home_city = Some("Omsk".to_string());
        fc.api_keys.weather = Some("file-key".to_string());

        let config = Config::from_sources(
            fc,
            env_from(&[("MARTHA_USER_NAME", "FromEnv"), ("WEATHER_API_KEY", "env-key")]),
        )
        .unwrap();

        assert_eq!(config.user.name, "FromEnv");
        assert_eq!(config.user.home_city, "Omsk");
        assert_eq!(
            config.api_keys.weather.as_ref().map(|key| key.expose_secret()),
            Some("env-key")
        );
    }

    #[test]
    fn test_blank_key_is_absent() {
        let config =
            Config::from_sources(MarthaConfigFile::default(), env_from(&[("OPENAI_API_KEY", "  ")]))
                .unwrap();
        assert!(config.api_keys.openai.is_none());
    }

    #[test]
    fn test_languages_from_file() {
        let mut fc = MarthaConfigFile::default();
        fc.assistant.speech_language = Some("en".to_string());
        fc.voice.initial_silence_secs = Some(3);

        let config = Config::from_sources(fc, env_from(&[])).unwrap();
        assert_eq!(config.speech_language, Language::En);
        assert_eq!(config.voice.limits.initial_silence, Duration::from_secs(3));

        let ctx = config.context();
        assert_eq!(ctx.speech_language(), Language::En);
        assert_eq!(ctx.voice().tts_voice, "shimmer");
    }

    #[test]
    fn test_unsupported_language_is_config_error() {
        let mut fc = MarthaConfigFile::default();
        fc.user.target_language = Some("de".to_string());

        assert!(matches!(
            Config::from_sources(fc, env_from(&[])),
            Err(Error::Config(_))
        ));
    }
}
