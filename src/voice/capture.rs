//! Microphone sample sources

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleRate, Stream, StreamConfig};

use crate::{Error, Result};

/// Capture sample rate (16kHz mono, what Whisper expects)
pub const SAMPLE_RATE: u32 = 16000;

/// Anything that hands out captured mono samples at [`SAMPLE_RATE`]
pub trait SampleSource {
    /// Samples delivered since the previous drain
    fn drain(&self) -> Vec<f32>;

    /// Discard buffered samples (e.g. the assistant's own speech)
    fn clear(&self) {
        drop(self.drain());
    }
}

/// Sample queue shared between an audio callback and its reader
#[derive(Debug, Clone, Default)]
pub struct SampleBuffer(Arc<Mutex<Vec<f32>>>);

impl SampleBuffer {
    /// Append a block of samples
    pub fn push(&self, block: &[f32]) {
        if let Ok(mut queued) = self.0.lock() {
            queued.extend_from_slice(block);
        }
    }
}

impl SampleSource for SampleBuffer {
    fn drain(&self) -> Vec<f32> {
        self.0
            .lock()
            .map(|mut queued| std::mem::take(&mut *queued))
            .unwrap_or_default()
    }
}

/// Live stream from the default input device
///
/// Capture runs from [`AudioCapture::start`] until the value is dropped.
pub struct AudioCapture {
    samples: SampleBuffer,
    _stream: Stream,
}

impl AudioCapture {
    /// Open the default input device and start streaming into a buffer
    ///
    /// # Errors
    ///
    /// Returns error if there is no input device, it cannot record 16kHz
    /// mono, or the stream fails to start
    pub fn start() -> Result<Self> {
        let device = cpal::default_host()
            .default_input_device()
            .ok_or_else(|| Error::Audio("no input device available".to_string()))?;
        let config = speech_config(&device)?;

        let samples = SampleBuffer::default();
        let sink = samples.clone();
        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| sink.push(data),
                |err| tracing::error!(error = %err, "microphone stream error"),
                None,
            )
            .map_err(|e| Error::Audio(e.to_string()))?;
        stream.play().map_err(|e| Error::Audio(e.to_string()))?;

        tracing::debug!(
            device = device.name().unwrap_or_default(),
            sample_rate = SAMPLE_RATE,
            "microphone streaming"
        );
        Ok(Self {
            samples,
            _stream: stream,
        })
    }
}

impl SampleSource for AudioCapture {
    fn drain(&self) -> Vec<f32> {
        self.samples.drain()
    }
}

impl Drop for AudioCapture {
    fn drop(&mut self) {
        tracing::debug!("microphone stream closed");
    }
}

/// First mono input configuration that covers [`SAMPLE_RATE`]
fn speech_config(device: &Device) -> Result<StreamConfig> {
    let rate = SampleRate(SAMPLE_RATE);
    let range = device
        .supported_input_configs()
        .map_err(|e| Error::Audio(e.to_string()))?
        .filter(|c| c.channels() == 1)
        .find(|c| (c.min_sample_rate()..=c.max_sample_rate()).contains(&rate))
        .ok_or_else(|| Error::Audio("no 16kHz mono input config".to_string()))?;
    Ok(range.with_sample_rate(rate).config())
}

/// Encode mono f32 samples as 16-bit PCM WAV
///
/// # Errors
///
/// Returns error if WAV encoding fails
pub fn samples_to_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).map_err(|e| Error::Audio(e.to_string()))?;

        for &sample in samples {
            #[allow(clippy::cast_possible_truncation)]
            let pcm = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
            writer
                .write_sample(pcm)
                .map_err(|e| Error::Audio(e.to_string()))?;
        }

        writer.finalize().map_err(|e| Error::Audio(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}

/// RMS energy of a block of samples
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}
