//! Text-mode speech I/O for terminals without audio

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::context::VoiceProfile;
use crate::providers::{SpeechInput, SpeechOutput};
use crate::{Error, Result};

/// Reads utterances as lines from stdin
pub struct ConsoleInput {
    lines: Lines<BufReader<Stdin>>,
}

impl Default for ConsoleInput {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleInput {
    /// Read from the process's stdin
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

#[async_trait(?Send)]
impl SpeechInput for ConsoleInput {
    async fn listen(&mut self, voice: &VoiceProfile) -> Result<String> {
        eprint!("[{}] > ", voice.language);
        match self.lines.next_line().await? {
            Some(line) if line.trim().is_empty() => Err(Error::RecognitionUnclear),
            Some(line) => Ok(line.trim().to_lowercase()),
            None => Err(Error::InputClosed),
        }
    }
}

/// Prints assistant speech to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleOutput;

#[async_trait(?Send)]
impl SpeechOutput for ConsoleOutput {
    async fn say(&mut self, text: &str, voice: &VoiceProfile) -> Result<()> {
        println!("[{}] {text}", voice.language);
        Ok(())
    }
}
