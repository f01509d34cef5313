use std::path::Path;

use crate::audio::domain::audio_segment::AudioSegment;

/// Domain interface for decoding an audio file of arbitrary container/codec
/// format into mono PCM at a target sample rate.
///
/// The container format is inferred from the file contents by the underlying
/// media library; any decode failure is fatal for the call.
pub trait AudioDecoder: Send {
    fn decode(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<AudioSegment, Box<dyn std::error::Error>>;
}
