use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use secrecy::{ExposeSecret, SecretString};
use tracing_subscriber::EnvFilter;

use martha::intent::table::build_catalog;
use martha::providers::{
    GoogleTranslate, OpenWeatherMap, SpeechInput, SpeechOutput, SystemBrowser, WebSearch,
    Wikipedia,
};
use martha::voice::{
    AudioCapture, AudioPlayback, ConsoleInput, ConsoleOutput, MicrophoneInput, SampleSource,
    SpeechToText, TextToSpeech, VoiceOutput, rms,
};
use martha::{Assistant, CommandRegistry, Config, Dispatcher, PhraseBook, Services, StopReason};

/// Martha - voice-driven personal assistant
#[derive(Parser)]
#[command(name = "martha", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Type commands and read replies in the terminal instead of using audio
    #[arg(long, env = "MARTHA_TEXT_MODE")]
    text: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Test microphone input
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
    /// Test TTS output
    TestTts {
        /// Text to speak
        #[arg(default_value = "Hello! This is a test of the text to speech system.")]
        text: String,
    },
    /// Print every registered phrase with its intent
    Phrases,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,martha=info",
        1 => "info,martha=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    tracing::debug!(?config, "loaded configuration");
    let keys = std::mem::take(&mut config.api_keys);

    // Handle subcommands
    if let Some(cmd) = cli.command {
        return match cmd {
            Command::TestMic { duration } => test_mic(duration).await,
            Command::TestTts { text } => test_tts(&config, keys.openai, &text).await,
            Command::Phrases => print_phrases(&config),
        };
    }

    let catalog = Arc::new(build_catalog(config.intents_file.as_deref())?);
    tracing::info!(phrases = catalog.len(), "intent catalog loaded");

    let (input, speech) = speech_io(&config, keys.openai, cli.text)?;

    let services = Services {
        speech,
        browser: Box::new(SystemBrowser),
        search: Box::new(WebSearch::from_keys(keys.brave, keys.serper)),
        knowledge: Box::new(Wikipedia::new()),
        translator: Box::new(GoogleTranslate::new()),
        weather: Box::new(OpenWeatherMap::new(keys.weather)),
        phrases: PhraseBook::builtin()?,
    };

    let dispatcher = Dispatcher::new(catalog, CommandRegistry::standard(), services, config.context())?;
    let mut assistant = Assistant::new(input, dispatcher);

    let reason = assistant.run().await;
    tracing::info!(?reason, "assistant stopped");
    match reason {
        StopReason::InputClosed if !cli.text => anyhow::bail!("speech input closed unexpectedly"),
        StopReason::Failed => anyhow::bail!("speech input failed, see the log for details"),
        _ => {}
    }

    Ok(())
}

/// Microphone and speaker, or the terminal in text mode
fn speech_io(
    config: &Config,
    openai: Option<SecretString>,
    text_mode: bool,
) -> anyhow::Result<(Box<dyn SpeechInput>, Box<dyn SpeechOutput>)> {
    if text_mode {
        tracing::info!("text mode, reading commands from stdin");
        return Ok((Box::new(ConsoleInput::new()), Box::new(ConsoleOutput)));
    }

    let key = require_openai(openai)?;
    let stt_key = SecretString::from(key.expose_secret().to_owned());
    let stt = SpeechToText::new(stt_key, config.voice.stt_model.clone())?;
    let tts = TextToSpeech::new(key, config.voice.tts_model.clone(), config.voice.tts_speed)?;

    Ok((
        Box::new(MicrophoneInput::new(stt, config.voice.limits)?),
        Box::new(VoiceOutput::new(tts)?),
    ))
}

fn require_openai(key: Option<SecretString>) -> anyhow::Result<SecretString> {
    key.context("OPENAI_API_KEY is required for voice mode (or run with --text)")
}

/// Test microphone input
#[allow(clippy::future_not_send)]
async fn test_mic(duration: u64) -> anyhow::Result<()> {
    println!("Testing microphone for {duration} seconds...");
    println!("Speak into your microphone!\n");

    let capture = AudioCapture::start()?;
    println!("---");

    for i in 0..duration {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let samples = capture.drain();
        let energy = rms(&samples);
        let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);

        // Visual meter
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let meter_len = (energy * 100.0).min(50.0) as usize;
        let meter: String = "#".repeat(meter_len) + &" ".repeat(50 - meter_len);

        println!("[{:2}s] RMS: {energy:.4} | Peak: {peak:.4} | [{meter}]", i + 1);
    }

    drop(capture);

    println!("\n---");
    println!("If you saw movement in the meter, your mic is working!");
    println!("If RMS stayed near 0, check that the mic is plugged in and selected as default input.");

    Ok(())
}

/// Test TTS output
async fn test_tts(config: &Config, openai: Option<SecretString>, text: &str) -> anyhow::Result<()> {
    println!("Testing TTS with text: \"{text}\"\n");

    let ctx = config.context();
    let tts = TextToSpeech::new(
        require_openai(openai)?,
        config.voice.tts_model.clone(),
        config.voice.tts_speed,
    )?;

    println!("Synthesizing speech with voice {}...", ctx.voice().tts_voice);
    let mp3_data = tts.synthesize(text, &ctx.voice().tts_voice).await?;
    println!("Got {} bytes of audio data", mp3_data.len());

    println!("Playing audio...");
    let playback = AudioPlayback::open()?;
    playback.play_mp3(&mp3_data)?;

    println!("\n---");
    println!("If you heard the speech, TTS is working!");

    Ok(())
}

/// Print the intent catalog
fn print_phrases(config: &Config) -> anyhow::Result<()> {
    let catalog = build_catalog(config.intents_file.as_deref())?;
    for (phrase, intent) in catalog.entries() {
        println!("{phrase}\t{intent}");
    }
    Ok(())
}
