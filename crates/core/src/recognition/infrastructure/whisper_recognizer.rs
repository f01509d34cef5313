use std::path::Path;

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::recognition::domain::recognizer_factory::RecognizerFactory;
use crate::recognition::domain::speech_recognizer::{DecodingState, SpeechRecognizer};
use crate::shared::constants::UTTERANCE_WINDOW_SECS;

/// Loads ggml Whisper models via whisper-rs.
pub struct WhisperRecognizerFactory;

impl RecognizerFactory for WhisperRecognizerFactory {
    fn load(
        &self,
        model_path: &Path,
        sample_rate: u32,
    ) -> Result<Box<dyn SpeechRecognizer>, Box<dyn std::error::Error>> {
        let ctx = WhisperContext::new_with_params(
            model_path.to_str().ok_or("Invalid model path")?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| format!("Failed to load Whisper model: {e}"))?;

        Ok(Box::new(WhisperRecognizer {
            ctx,
            sample_rate,
            window_frames: (sample_rate * UTTERANCE_WINDOW_SECS) as usize,
            buffer: Vec::new(),
            pending: None,
        }))
    }
}

/// Streaming speech recognizer over whisper.cpp via whisper-rs.
///
/// Whisper has no incremental utterance detection, so a full buffered window
/// is treated as one utterance: once enough frames have been accepted, the
/// window is decoded as a whole and reported as a finalized boundary.
/// Whatever remains at end of stream is decoded by `final_result`.
pub struct WhisperRecognizer {
    ctx: WhisperContext,
    sample_rate: u32,
    window_frames: usize,
    buffer: Vec<f32>,
    pending: Option<String>,
}

impl SpeechRecognizer for WhisperRecognizer {
    fn accept_waveform(
        &mut self,
        frames: &[i16],
    ) -> Result<DecodingState, Box<dyn std::error::Error>> {
        self.buffer
            .extend(frames.iter().map(|&s| s as f32 / i16::MAX as f32));

        if self.buffer.len() < self.window_frames {
            return Ok(DecodingState::Running);
        }

        let window: Vec<f32> = self.buffer.drain(..).collect();
        let text = self.decode_window(&window)?;
        self.pending = Some(serialize_result(&text));
        Ok(DecodingState::Finalized)
    }

    fn result(&mut self) -> String {
        self.pending.take().unwrap_or_else(|| "{}".to_string())
    }

    fn final_result(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        let window: Vec<f32> = self.buffer.drain(..).collect();
        if window.is_empty() {
            return Ok(serialize_result(""));
        }
        let text = self.decode_window(&window)?;
        Ok(serialize_result(&text))
    }
}

impl WhisperRecognizer {
    fn decode_window(&self, samples: &[f32]) -> Result<String, Box<dyn std::error::Error>> {
        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| format!("Failed to create Whisper state: {e}"))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 0 });
        params.set_language(Some("en"));
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);

        // whisper.cpp rejects sub-second input; pad with trailing silence.
        let min_frames = self.sample_rate as usize;
        let padded;
        let samples = if samples.len() < min_frames {
            padded = {
                let mut v = samples.to_vec();
                v.resize(min_frames, 0.0);
                v
            };
            &padded[..]
        } else {
            samples
        };

        state
            .full(params, samples)
            .map_err(|e| format!("Whisper inference failed: {e}"))?;

        let mut text = String::new();
        let num_segments = state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            let n_tokens = segment.n_tokens();
            for tok_idx in 0..n_tokens {
                let token = match segment.get_token(tok_idx) {
                    Some(t) => t,
                    None => continue,
                };

                let piece = match token.to_str() {
                    Ok(t) => t,
                    Err(_) => continue,
                };

                // Skip special tokens (start with [, like [_BEG_], [_SOT_], etc.)
                let trimmed = piece.trim();
                if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.starts_with('<') {
                    continue;
                }

                text.push_str(piece);
            }
        }

        Ok(text.trim().to_string())
    }
}

fn serialize_result(text: &str) -> String {
    serde_json::json!({ "text": text }).to_string()
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
