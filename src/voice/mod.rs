//! Speech input and output
//!
//! Microphone capture with energy-based utterance detection, Whisper
//! transcription, `OpenAI` synthesis and speaker playback, plus console
//! stand-ins for running without audio hardware.

mod capture;
mod console;
mod microphone;
mod playback;
mod speaker;
mod stt;
mod tts;
mod vad;

pub use capture::{AudioCapture, SAMPLE_RATE, SampleBuffer, SampleSource, rms, samples_to_wav};
pub use console::{ConsoleInput, ConsoleOutput};
pub use microphone::{MicrophoneInput, capture_utterance};
pub use playback::{AudioPlayback, decode_mp3};
pub use speaker::VoiceOutput;
pub use stt::SpeechToText;
pub use tts::TextToSpeech;
pub use vad::{CaptureLimits, DetectorEvent, UtteranceDetector};
