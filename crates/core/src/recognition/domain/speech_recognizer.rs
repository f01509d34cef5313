/// Outcome of feeding one chunk of audio to a recognizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodingState {
    /// The recognizer is still inside an utterance.
    Running,
    /// A complete utterance boundary was reached; its result can be
    /// retrieved with [`SpeechRecognizer::result`].
    Finalized,
}

/// Domain interface for a stateful streaming speech recognizer bound to the
/// canonical sample rate.
///
/// Results are serialized structures (JSON) containing at least a `"text"`
/// field; callers decode them with [`super::utterance::parse_utterance`],
/// never by evaluating them.
pub trait SpeechRecognizer: Send {
    /// Feed a chunk of 16-bit PCM frames.
    fn accept_waveform(
        &mut self,
        frames: &[i16],
    ) -> Result<DecodingState, Box<dyn std::error::Error>>;

    /// Serialized result for the most recently finalized utterance.
    fn result(&mut self) -> String;

    /// Serialized result covering any trailing partial utterance.
    fn final_result(&mut self) -> Result<String, Box<dyn std::error::Error>>;
}
