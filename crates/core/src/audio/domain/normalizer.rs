use std::fs;
use std::path::{Path, PathBuf};

use crate::audio::domain::audio_decoder::AudioDecoder;
use crate::shared::constants::{CANONICAL_CHANNELS, CANONICAL_SAMPLE_RATE};

/// Output of [`AudioNormalizer::normalize`]: a path guaranteed to point at
/// canonical audio (mono, 16 kHz, 16-bit PCM WAV).
///
/// When the normalizer had to convert, the path is a pipeline-owned temporary
/// file deleted on drop, on every exit path. The caller-supplied original is
/// never touched.
#[derive(Debug)]
pub struct NormalizedAudio {
    path: PathBuf,
    temporary: bool,
}

impl NormalizedAudio {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self.temporary
    }
}

impl Drop for NormalizedAudio {
    fn drop(&mut self) {
        if self.temporary && self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                log::warn!(
                    "failed to remove temporary audio file {}: {e}",
                    self.path.display()
                );
            }
        }
    }
}

/// Converts an arbitrary input audio file into canonical decodable form.
pub struct AudioNormalizer {
    decoder: Box<dyn AudioDecoder>,
}

impl AudioNormalizer {
    pub fn new(decoder: Box<dyn AudioDecoder>) -> Self {
        Self { decoder }
    }

    /// Produce a path to canonical audio for `input`.
    ///
    /// An already-canonical WAV file is returned unchanged, so feeding the
    /// normalizer its own output is a no-op. Everything else is decoded,
    /// downmixed and resampled in one pass, then written to a single derived
    /// sibling path.
    pub fn normalize(&self, input: &Path) -> Result<NormalizedAudio, Box<dyn std::error::Error>> {
        if is_canonical_wav(input) {
            return Ok(NormalizedAudio {
                path: input.to_path_buf(),
                temporary: false,
            });
        }

        let segment = self.decoder.decode(input, CANONICAL_SAMPLE_RATE)?;
        let output = derived_path(input);
        write_canonical_wav(&output, segment.samples())?;
        log::debug!("normalized {} -> {}", input.display(), output.display());

        Ok(NormalizedAudio {
            path: output,
            temporary: true,
        })
    }
}

fn has_wav_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

/// True when the WAV header already reports the canonical form.
fn is_canonical_wav(path: &Path) -> bool {
    if !has_wav_extension(path) {
        return false;
    }
    match hound::WavReader::open(path) {
        Ok(reader) => {
            let spec = reader.spec();
            spec.channels == CANONICAL_CHANNELS
                && spec.sample_rate == CANONICAL_SAMPLE_RATE
                && spec.bits_per_sample == 16
                && spec.sample_format == hound::SampleFormat::Int
        }
        // A .wav hound cannot read goes through the full decode path.
        Err(_) => false,
    }
}

/// Derived sibling path for the converted file: extension swapped to `.wav`,
/// or `{stem}_converted.wav` when the input already was a non-canonical WAV.
fn derived_path(input: &Path) -> PathBuf {
    if !has_wav_extension(input) {
        input.with_extension("wav")
    } else {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{stem}_converted.wav"))
    }
}

fn write_canonical_wav(path: &Path, samples: &[f32]) -> Result<(), hound::Error> {
    let spec = hound::WavSpec {
        channels: CANONICAL_CHANNELS,
        sample_rate: CANONICAL_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample((sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)?;
    }
    writer.finalize()
}
