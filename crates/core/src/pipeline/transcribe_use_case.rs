use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::audio::domain::normalizer::AudioNormalizer;
use crate::recognition::domain::recognizer_factory::RecognizerFactory;
use crate::recognition::domain::speech_recognizer::{DecodingState, SpeechRecognizer};
use crate::recognition::domain::utterance::parse_utterance;
use crate::shared::constants::{CANONICAL_SAMPLE_RATE, CHUNK_FRAMES};

#[derive(Error, Debug)]
pub enum TranscribeError {
    /// Reported failure: the user fixes this by supplying a model.
    #[error("speech model not found at {0}; download a ggml Whisper model and place it there")]
    ModelNotFound(PathBuf),
    #[error("audio normalization failed: {0}")]
    Normalize(String),
    #[error("failed to load speech model: {0}")]
    ModelLoad(String),
    #[error("failed to read normalized audio: {0}")]
    AudioRead(#[from] hound::Error),
    #[error("recognition failed: {0}")]
    Recognition(String),
    #[error("malformed recognizer result: {0}")]
    MalformedResult(#[from] serde_json::Error),
}

impl TranscribeError {
    /// Reported failures are expected conditions surfaced to the user as-is;
    /// everything else is unexpected and presented as a generic error.
    pub fn is_reported(&self) -> bool {
        matches!(self, TranscribeError::ModelNotFound(_))
    }
}

/// Orchestrates one transcription call: normalize the input, load the model,
/// stream fixed-size chunks through the recognizer and assemble the text.
///
/// One logical operation per call; no internal parallelism, no cancellation
/// once started, no retries. A failure after N chunks discards all partial
/// text.
pub struct TranscribeUseCase {
    normalizer: AudioNormalizer,
    factory: Box<dyn RecognizerFactory>,
    model_path: PathBuf,
}

impl TranscribeUseCase {
    pub fn new(
        normalizer: AudioNormalizer,
        factory: Box<dyn RecognizerFactory>,
        model_path: PathBuf,
    ) -> Self {
        Self {
            normalizer,
            factory,
            model_path,
        }
    }

    /// Transcribe an audio file to plain text.
    pub fn run(&self, input: &Path) -> Result<String, TranscribeError> {
        if !self.model_path.exists() {
            return Err(TranscribeError::ModelNotFound(self.model_path.clone()));
        }

        // The guard deletes any temporary file on every exit path below.
        let normalized = self
            .normalizer
            .normalize(input)
            .map_err(|e| TranscribeError::Normalize(e.to_string()))?;

        log::info!("loading speech model from {}", self.model_path.display());
        let mut recognizer = self
            .factory
            .load(&self.model_path, CANONICAL_SAMPLE_RATE)
            .map_err(|e| TranscribeError::ModelLoad(e.to_string()))?;

        let mut reader = hound::WavReader::open(normalized.path())?;
        let mut results: Vec<String> = Vec::new();
        let mut chunk: Vec<i16> = Vec::with_capacity(CHUNK_FRAMES);

        for sample in reader.samples::<i16>() {
            chunk.push(sample?);
            if chunk.len() == CHUNK_FRAMES {
                feed(recognizer.as_mut(), &chunk, &mut results)?;
                chunk.clear();
            }
        }
        if !chunk.is_empty() {
            feed(recognizer.as_mut(), &chunk, &mut results)?;
        }

        // The final result covers any trailing partial utterance and is
        // stored unconditionally.
        let final_raw = recognizer
            .final_result()
            .map_err(|e| TranscribeError::Recognition(e.to_string()))?;
        results.push(final_raw);

        let mut pieces = Vec::new();
        for raw in &results {
            if let Some(text) = parse_utterance(raw)? {
                pieces.push(text);
            }
        }
        Ok(pieces.join(" "))
    }
}

fn feed(
    recognizer: &mut dyn SpeechRecognizer,
    chunk: &[i16],
    results: &mut Vec<String>,
) -> Result<(), TranscribeError> {
    match recognizer
        .accept_waveform(chunk)
        .map_err(|e| TranscribeError::Recognition(e.to_string()))?
    {
        DecodingState::Finalized => results.push(recognizer.result()),
        DecodingState::Running => {}
    }
    Ok(())
}
