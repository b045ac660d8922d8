//! Energy-based utterance detection
//!
//! Splits the microphone stream into a single utterance: waits for speech up
//! to the initial-silence limit, then accumulates until a pause or the
//! maximum utterance length.

use std::time::Duration;

use super::capture::{SAMPLE_RATE, rms};

/// Minimum RMS energy considered speech
const ENERGY_THRESHOLD: f32 = 0.03;

/// Minimum speech length for a valid utterance (0.3s at 16kHz)
const MIN_SPEECH_SAMPLES: usize = 4800;

/// Trailing silence that ends an utterance (0.5s at 16kHz)
const SILENCE_SAMPLES: usize = 8000;

/// Capture window limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureLimits {
    /// How long to wait for speech to begin
    pub initial_silence: Duration,
    /// Longest utterance kept once speech has begun
    pub max_utterance: Duration,
}

impl Default for CaptureLimits {
    fn default() -> Self {
        Self {
            initial_silence: Duration::from_secs(5),
            max_utterance: Duration::from_secs(8),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn duration_to_samples(d: Duration) -> usize {
    (d.as_millis() as usize * SAMPLE_RATE as usize) / 1000
}

/// Detector progress after a block of samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorEvent {
    /// No speech yet
    Waiting,
    /// Speech in progress
    Speaking,
    /// Utterance finished; take it with [`UtteranceDetector::take_utterance`]
    Complete,
    /// No speech started within the initial-silence limit
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Speaking,
    Complete,
}

/// Tracks one utterance across microphone blocks
pub struct UtteranceDetector {
    state: State,
    speech_buffer: Vec<f32>,
    silence_counter: usize,
    waited: usize,
    initial_silence: usize,
    max_utterance: usize,
}

impl UtteranceDetector {
    /// Create a detector for the given capture window
    #[must_use]
    pub fn new(limits: CaptureLimits) -> Self {
        Self {
            state: State::Idle,
            speech_buffer: Vec::new(),
            silence_counter: 0,
            waited: 0,
            initial_silence: duration_to_samples(limits.initial_silence),
            max_utterance: duration_to_samples(limits.max_utterance),
        }
    }

    /// Feed a block of samples
    pub fn process(&mut self, samples: &[f32]) -> DetectorEvent {
        let energy = rms(samples);
        let is_speech = energy > ENERGY_THRESHOLD;

        match self.state {
            State::Idle => {
                if is_speech {
                    tracing::trace!(energy, "speech started");
                    self.state = State::Speaking;
                    self.speech_buffer.clear();
                    self.speech_buffer.extend_from_slice(samples);
                    self.silence_counter = 0;
                    return DetectorEvent::Speaking;
                }

                self.waited += samples.len();
                if self.waited > self.initial_silence {
                    tracing::debug!(waited = self.waited, "no speech before timeout");
                    return DetectorEvent::TimedOut;
                }
                DetectorEvent::Waiting
            }
            State::Speaking => {
                self.speech_buffer.extend_from_slice(samples);
                if is_speech {
                    self.silence_counter = 0;
                } else {
                    self.silence_counter += samples.len();
                }

                let voiced = self.speech_buffer.len().saturating_sub(self.silence_counter);
                let long_enough = voiced > MIN_SPEECH_SAMPLES;
                if (self.silence_counter > SILENCE_SAMPLES && long_enough)
                    || self.speech_buffer.len() >= self.max_utterance
                {
                    tracing::debug!(samples = self.speech_buffer.len(), "utterance complete");
                    self.state = State::Complete;
                    return DetectorEvent::Complete;
                }

                // A short noise burst followed by silence: go back to waiting
                if self.silence_counter > SILENCE_SAMPLES * 2 {
                    tracing::trace!("speech too short, resetting");
                    self.waited += self.speech_buffer.len();
                    self.state = State::Idle;
                    self.speech_buffer.clear();
                    self.silence_counter = 0;
                    return DetectorEvent::Waiting;
                }

                DetectorEvent::Speaking
            }
            State::Complete => DetectorEvent::Complete,
        }
    }

    /// Take the finished utterance and reset for the next one
    pub fn take_utterance(&mut self) -> Vec<f32> {
        let utterance = std::mem::take(&mut self.speech_buffer);
        self.reset();
        utterance
    }

    /// Samples accumulated so far
    #[must_use]
    pub fn speech_buffer(&self) -> &[f32] {
        &self.speech_buffer
    }

    /// Return to waiting for speech with a fresh timeout
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.speech_buffer.clear();
        self.silence_counter = 0;
        self.waited = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn tone(secs: f32) -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * secs) as usize;
        (0..n)
            .map(|i| 0.3 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / SAMPLE_RATE as f32).sin())
            .collect()
    }

    #[test]
    fn test_duration_to_samples() {
        assert_eq!(duration_to_samples(Duration::from_secs(1)), 16000);
        assert_eq!(duration_to_samples(Duration::from_millis(500)), 8000);
    }

    #[test]
    fn test_silence_times_out() {
        let mut detector = UtteranceDetector::new(CaptureLimits {
            initial_silence: Duration::from_secs(1),
            max_utterance: Duration::from_secs(8),
        });
        let block = vec![0.0; 8000];
        assert_eq!(detector.process(&block), DetectorEvent::Waiting);
        assert_eq!(detector.process(&block), DetectorEvent::Waiting);
        assert_eq!(detector.process(&block), DetectorEvent::TimedOut);
    }

    #[test]
    fn test_max_utterance_cuts_off() {
        let mut detector = UtteranceDetector::new(CaptureLimits {
            initial_silence: Duration::from_secs(5),
            max_utterance: Duration::from_secs(1),
        });
        assert_eq!(detector.process(&tone(0.5)), DetectorEvent::Speaking);
        assert_eq!(detector.process(&tone(0.6)), DetectorEvent::Complete);
        assert!(detector.take_utterance().len() >= 16000);
        assert!(detector.speech_buffer().is_empty());
    }
}
