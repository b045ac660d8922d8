//! Microphone-backed speech input

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use super::capture::{AudioCapture, SAMPLE_RATE, SampleSource, samples_to_wav};
use super::stt::SpeechToText;
use super::vad::{CaptureLimits, DetectorEvent, UtteranceDetector};
use crate::context::VoiceProfile;
use crate::providers::SpeechInput;
use crate::{Error, Result};

/// Interval between microphone buffer polls
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Listens on a sample source and transcribes with Whisper
pub struct MicrophoneInput<S = AudioCapture> {
    source: S,
    limits: CaptureLimits,
    detector: UtteranceDetector,
    stt: SpeechToText,
}

impl MicrophoneInput {
    /// Open the default microphone and start capturing
    ///
    /// # Errors
    ///
    /// Returns error if the input device cannot be opened
    pub fn new(stt: SpeechToText, limits: CaptureLimits) -> Result<Self> {
        Ok(Self::with_source(AudioCapture::start()?, stt, limits))
    }
}

impl<S: SampleSource> MicrophoneInput<S> {
    /// Listen on an already running source
    pub fn with_source(source: S, stt: SpeechToText, limits: CaptureLimits) -> Self {
        Self {
            source,
            limits,
            detector: UtteranceDetector::new(limits),
            stt,
        }
    }
}

/// Poll `source` until `detector` reports one finished utterance
///
/// Bounded in wall-clock time as well as in samples: a source that stops
/// delivering gives up after `limits.initial_silence` while idle, or
/// `limits.max_utterance` after speech began, returning what was heard.
///
/// # Errors
///
/// Returns [`Error::RecognitionTimeout`] if no speech arrives in time
pub async fn capture_utterance<S: SampleSource + ?Sized>(
    source: &S,
    detector: &mut UtteranceDetector,
    limits: CaptureLimits,
) -> Result<Vec<f32>> {
    detector.reset();
    let mut deadline = Instant::now() + limits.initial_silence;
    let mut speaking = false;
    tracing::info!("listening...");

    loop {
        tokio::time::sleep(POLL_INTERVAL).await;

        let block = source.drain();
        if !block.is_empty() {
            match detector.process(&block) {
                DetectorEvent::TimedOut => {
                    detector.reset();
                    return Err(Error::RecognitionTimeout);
                }
                DetectorEvent::Complete => return Ok(detector.take_utterance()),
                DetectorEvent::Speaking if !speaking => {
                    speaking = true;
                    deadline = Instant::now() + limits.max_utterance;
                }
                DetectorEvent::Waiting | DetectorEvent::Speaking => {}
            }
        }

        if Instant::now() >= deadline {
            if detector.speech_buffer().is_empty() {
                tracing::warn!("microphone delivered no speech in time");
                detector.reset();
                return Err(Error::RecognitionTimeout);
            }
            tracing::warn!("microphone stalled mid-utterance");
            return Ok(detector.take_utterance());
        }
    }
}

#[async_trait(?Send)]
impl<S: SampleSource> SpeechInput for MicrophoneInput<S> {
    async fn listen(&mut self, voice: &VoiceProfile) -> Result<String> {
        // Drop anything heard while the assistant was talking
        self.source.clear();
        let utterance = capture_utterance(&self.source, &mut self.detector, self.limits).await?;

        tracing::info!(
            samples = utterance.len(),
            locale = voice.recognition_locale,
            "started recognition..."
        );
        let wav = samples_to_wav(&utterance, SAMPLE_RATE)?;
        let transcript = self.stt.transcribe(&wav, voice.language).await?;

        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(Error::RecognitionUnclear);
        }

        Ok(transcript.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::capture::SampleBuffer;

    fn limits() -> CaptureLimits {
        CaptureLimits {
            initial_silence: Duration::from_secs(2),
            max_utterance: Duration::from_secs(3),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn tone(samples: usize) -> Vec<f32> {
        (0..samples).map(|i| 0.3 * (i as f32 * 0.17).sin()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_source_times_out() {
        let source = SampleBuffer::default();
        let mut detector = UtteranceDetector::new(limits());
        let started = Instant::now();

        let result = capture_utterance(&source, &mut detector, limits()).await;

        assert!(matches!(result, Err(Error::RecognitionTimeout)));
        let waited = started.elapsed();
        assert!(waited >= limits().initial_silence, "gave up after {waited:?}");
        assert!(waited < limits().initial_silence + Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_source_keeps_partial_utterance() {
        let source = SampleBuffer::default();
        source.push(&tone(8000));
        let mut detector = UtteranceDetector::new(limits());
        let started = Instant::now();

        let utterance = capture_utterance(&source, &mut detector, limits())
            .await
            .unwrap();

        assert_eq!(utterance.len(), 8000);
        assert!(started.elapsed() >= limits().max_utterance);
        assert!(detector.speech_buffer().is_empty());
    }
}
