//! Synthesized speech output

use async_trait::async_trait;

use super::playback::AudioPlayback;
use super::tts::TextToSpeech;
use crate::Result;
use crate::context::VoiceProfile;
use crate::providers::SpeechOutput;

/// Speaks through `OpenAI` TTS and the default speaker
pub struct VoiceOutput {
    tts: TextToSpeech,
    playback: AudioPlayback,
}

impl VoiceOutput {
    /// Open the speaker
    ///
    /// # Errors
    ///
    /// Returns error if the output device cannot be opened
    pub fn new(tts: TextToSpeech) -> Result<Self> {
        Ok(Self {
            tts,
            playback: AudioPlayback::open()?,
        })
    }
}

#[async_trait(?Send)]
impl SpeechOutput for VoiceOutput {
    async fn say(&mut self, text: &str, voice: &VoiceProfile) -> Result<()> {
        tracing::info!(text, language = %voice.language, "speaking");
        let audio = self.tts.synthesize(text, &voice.tts_voice).await?;
        self.playback.play_mp3(&audio)
    }
}
