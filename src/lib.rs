//! Martha - voice-driven personal assistant
//!
//! This library provides the core of the assistant:
//! - Intent catalog and shortest-prefix resolution
//! - Handlers for greetings, searches, weather, translation and more
//! - Voice processing (utterance detection, STT, TTS) and console I/O
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    Speech I/O                        │
//! │        Microphone + Whisper  │  TTS + Speaker        │
//! └────────────────────┬────────────────────────────────┘
//!                      │ utterance tokens
//! ┌────────────────────▼────────────────────────────────┐
//! │                   Dispatcher                         │
//! │   IntentResolver  │  CommandRegistry  │  Context     │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                   Providers                          │
//! │  Browser │ Search │ Wikipedia │ Translate │ Weather  │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod assistant;
pub mod commands;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod intent;
pub mod phrases;
pub mod providers;
pub mod voice;

pub use assistant::{Assistant, StopReason};
pub use commands::{CommandRegistry, Handler, Outcome, Services};
pub use config::Config;
pub use context::{AssistantContext, Language, LanguageGuard, UserProfile, VoiceProfile};
pub use dispatcher::Dispatcher;
pub use error::{Error, ErrorKind, Result};
pub use intent::{Intent, IntentResolver, PhraseCatalog, Resolution, ResolvedCommand};
pub use phrases::PhraseBook;
