use std::path::PathBuf;
use std::thread;

use crossbeam_channel::Receiver;

use voicescribe_core::audio::domain::normalizer::AudioNormalizer;
use voicescribe_core::audio::infrastructure::ffmpeg_decoder::FfmpegDecoder;
use voicescribe_core::pipeline::transcribe_use_case::{TranscribeError, TranscribeUseCase};
use voicescribe_core::recognition::infrastructure::whisper_recognizer::WhisperRecognizerFactory;
use voicescribe_core::shared::model_resolver;

/// Messages sent from the worker thread to the UI.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    Done(String),
    ModelMissing(String),
    Error(String),
}

/// Parameters for a transcription job.
pub struct TranscribeParams {
    pub input_path: PathBuf,
    /// Explicit model path from settings; resolver defaults apply when unset.
    pub model_override: Option<PathBuf>,
}

/// Spawn a background transcription worker. Returns the channel receiver.
///
/// The job runs to completion or failure; there is no cancellation.
pub fn spawn(params: TranscribeParams) -> Receiver<WorkerMessage> {
    let (tx, rx) = crossbeam_channel::unbounded::<WorkerMessage>();

    thread::spawn(move || match run_transcription(&params) {
        Ok(text) => {
            let _ = tx.send(WorkerMessage::Done(text));
        }
        Err(e) if e.is_reported() => {
            let _ = tx.send(WorkerMessage::ModelMissing(e.to_string()));
        }
        Err(e) => {
            log::error!("transcription failed: {e}");
            let _ = tx.send(WorkerMessage::Error(e.to_string()));
        }
    });

    rx
}

fn run_transcription(params: &TranscribeParams) -> Result<String, TranscribeError> {
    let model_path = model_resolver::resolve(params.model_override.as_deref())
        .map_err(|e| TranscribeError::ModelLoad(e.to_string()))?;

    let use_case = TranscribeUseCase::new(
        AudioNormalizer::new(Box::new(FfmpegDecoder)),
        Box::new(WhisperRecognizerFactory),
        model_path,
    );
    use_case.run(&params.input_path)
}
