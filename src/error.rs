//! Error types for the Martha assistant

use thiserror::Error;

use crate::intent::Intent;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the assistant
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// The same phrase was registered for two intents
    #[error("phrase \"{phrase}\" is bound to {existing} and cannot also trigger {rejected}")]
    DuplicatePhrase {
        /// Normalized phrase text
        phrase: String,
        /// Intent that already owns the phrase
        existing: Intent,
        /// Intent whose registration was rejected
        rejected: Intent,
    },

    /// Intent table names an intent that does not exist
    #[error("unknown intent: {0}")]
    UnknownIntent(String),

    /// No speech within the capture window
    #[error("no speech detected before timeout")]
    RecognitionTimeout,

    /// Speech was captured but produced no transcript
    #[error("speech could not be transcribed")]
    RecognitionUnclear,

    /// Speech input has no more utterances (e.g. stdin closed)
    #[error("speech input closed")]
    InputClosed,

    /// Audio error
    #[error("audio error: {0}")]
    Audio(String),

    /// Speech-to-text error
    #[error("STT error: {0}")]
    Stt(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Web search error
    #[error("search error: {0}")]
    Search(String),

    /// Encyclopedia lookup error
    #[error("knowledge error: {0}")]
    Knowledge(String),

    /// Translation error
    #[error("translation error: {0}")]
    Translation(String),

    /// Weather lookup error
    #[error("weather error: {0}")]
    Weather(String),

    /// Browser launch error
    #[error("browser error: {0}")]
    Browser(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Failure classes used when reporting errors at the dispatch boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing was heard in the capture window
    RecognitionTimeout,
    /// Something was heard but not understood
    RecognitionUnclear,
    /// An external service call failed
    ProviderFailure,
    /// Startup configuration is inconsistent
    ConfigurationError,
}

impl Error {
    /// Classify this error for logging and recovery
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_)
            | Self::DuplicatePhrase { .. }
            | Self::UnknownIntent(_)
            | Self::Toml(_) => ErrorKind::ConfigurationError,
            Self::RecognitionTimeout => ErrorKind::RecognitionTimeout,
            Self::RecognitionUnclear => ErrorKind::RecognitionUnclear,
            Self::InputClosed
            | Self::Audio(_)
            | Self::Stt(_)
            | Self::Tts(_)
            | Self::Search(_)
            | Self::Knowledge(_)
            | Self::Translation(_)
            | Self::Weather(_)
            | Self::Browser(_)
            | Self::Io(_)
            | Self::Http(_)
            | Self::Serialization(_) => ErrorKind::ProviderFailure,
        }
    }

    /// Whether the main loop can continue after this error
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self.kind(), ErrorKind::ConfigurationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Error::RecognitionTimeout.kind(), ErrorKind::RecognitionTimeout);
        assert_eq!(Error::RecognitionUnclear.kind(), ErrorKind::RecognitionUnclear);
        assert_eq!(
            Error::Weather("offline".to_string()).kind(),
            ErrorKind::ProviderFailure
        );
        assert_eq!(
            Error::UnknownIntent("dance".to_string()).kind(),
            ErrorKind::ConfigurationError
        );
    }

    #[test]
    fn test_duplicate_phrase_is_fatal() {
        let err = Error::DuplicatePhrase {
            phrase: "google".to_string(),
            existing: Intent::GoogleSearch,
            rejected: Intent::YoutubeSearch,
        };
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("google_search"));
        assert!(err.to_string().contains("youtube_search"));
    }
}
