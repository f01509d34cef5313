use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use voicescribe_core::audio::domain::normalizer::AudioNormalizer;
use voicescribe_core::audio::infrastructure::ffmpeg_decoder::FfmpegDecoder;
use voicescribe_core::pipeline::transcribe_use_case::TranscribeUseCase;
use voicescribe_core::recognition::infrastructure::whisper_recognizer::WhisperRecognizerFactory;
use voicescribe_core::shared::constants::AUDIO_EXTENSIONS;
use voicescribe_core::shared::model_resolver;

/// Offline speech-to-text transcription for audio files.
#[derive(Parser)]
#[command(name = "voicescribe")]
struct Cli {
    /// Input audio file.
    input: PathBuf,

    /// Output text file (prints to stdout when omitted).
    output: Option<PathBuf>,

    /// Path to a ggml Whisper model file.
    #[arg(long)]
    model: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let model_path = model_resolver::resolve(cli.model.as_deref())?;
    let use_case = TranscribeUseCase::new(
        AudioNormalizer::new(Box::new(FfmpegDecoder)),
        Box::new(WhisperRecognizerFactory),
        model_path,
    );

    let text = match use_case.run(&cli.input) {
        Ok(text) => text,
        Err(e) if e.is_reported() => {
            eprintln!("{e}");
            process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &text)?;
            log::info!("Transcript written to {}", path.display());
        }
        None => println!("{text}"),
    }

    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !is_audio(&cli.input) {
        return Err(format!(
            "Unsupported audio file: '{}'. Supported extensions: {}",
            cli.input.display(),
            AUDIO_EXTENSIONS.join(", ")
        )
        .into());
    }
    Ok(())
}

fn is_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
