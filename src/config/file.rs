//! TOML configuration file loading
//!
//! Supports `~/.config/martha/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct MarthaConfigFile {
    /// Owner profile
    #[serde(default)]
    pub user: UserFileConfig,

    /// Assistant identity and starting language
    #[serde(default)]
    pub assistant: AssistantFileConfig,

    /// Voice/audio configuration
    #[serde(default)]
    pub voice: VoiceFileConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysFileConfig,

    /// Extra intent phrases (same schema as the built-in table)
    pub intents_file: Option<PathBuf>,
}

/// Owner profile
#[derive(Debug, Default, Deserialize)]
pub struct UserFileConfig {
    pub name: Option<String>,
    pub home_city: Option<String>,
    /// Language code, e.g. "ru"
    pub native_language: Option<String>,
    /// Language code, e.g. "en"
    pub target_language: Option<String>,
}

/// Assistant identity
#[derive(Debug, Default, Deserialize)]
pub struct AssistantFileConfig {
    pub name: Option<String>,
    /// Language the assistant starts speaking
    pub speech_language: Option<String>,
}

/// Voice processing configuration
#[derive(Debug, Default, Deserialize)]
pub struct VoiceFileConfig {
    /// STT model (e.g. "whisper-1")
    pub stt_model: Option<String>,

    /// TTS model (e.g. "tts-1")
    pub tts_model: Option<String>,

    /// TTS voice used while speaking Russian
    pub tts_voice_ru: Option<String>,

    /// TTS voice used while speaking English
    pub tts_voice_en: Option<String>,

    /// TTS speed multiplier
    pub tts_speed: Option<f64>,

    /// Seconds to wait for speech to begin
    pub initial_silence_secs: Option<u64>,

    /// Longest utterance in seconds
    pub max_utterance_secs: Option<u64>,
}

/// API keys configuration
#[derive(Debug, Default, Deserialize)]
pub struct ApiKeysFileConfig {
    pub openai: Option<String>,
    pub weather: Option<String>,
    pub brave: Option<String>,
    pub serper: Option<String>,
}

/// Load the TOML config file from the standard path
///
/// Returns `MarthaConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> MarthaConfigFile {
    config_file_path().map_or_else(MarthaConfigFile::default, |path| load_config_file_from(&path))
}

/// Load a TOML config file from `path`, falling back to defaults
pub fn load_config_file_from(path: &Path) -> MarthaConfigFile {
    if !path.exists() {
        return MarthaConfigFile::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                MarthaConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            MarthaConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/martha/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("martha").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let fc = load_config_file_from(&dir.path().join("absent.toml"));
        assert!(fc.user.name.is_none());
        assert!(fc.intents_file.is_none());
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
intents_file = "/tmp/extra.toml"

[user]
name = "Ivan"

[voice]
tts_voice_en = "alloy"
max_utterance_secs = 10

[api_keys]
weather = "abc"
"#
        )
        .unwrap();

        let fc = load_config_file_from(file.path());
        assert_eq!(fc.user.name.as_deref(), Some("Ivan"));
        assert!(fc.user.home_city.is_none());
        assert_eq!(fc.voice.tts_voice_en.as_deref(), Some("alloy"));
        assert_eq!(fc.voice.max_utterance_secs, Some(10));
        assert_eq!(fc.api_keys.weather.as_deref(), Some("abc"));
        assert_eq!(fc.intents_file, Some(PathBuf::from("/tmp/extra.toml")));
    }

    #[test]
    fn test_unparsable_file_is_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[user\nname = ").unwrap();

        let fc = load_config_file_from(file.path());
        assert!(fc.user.name.is_none());
    }
}
