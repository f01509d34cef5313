use std::path::Path;

use crate::recognition::domain::speech_recognizer::SpeechRecognizer;

/// Domain interface for loading a speech model and constructing a stateful
/// recognizer bound to a sample rate.
///
/// Loading is synchronous and blocking; no progress is reported.
pub trait RecognizerFactory: Send {
    fn load(
        &self,
        model_path: &Path,
        sample_rate: u32,
    ) -> Result<Box<dyn SpeechRecognizer>, Box<dyn std::error::Error>>;
}
