/// The only audio form the recognizer accepts: mono 16 kHz 16-bit PCM.
pub const CANONICAL_SAMPLE_RATE: u32 = 16000;
pub const CANONICAL_CHANNELS: u16 = 1;

/// Frames fed to the recognizer per read.
pub const CHUNK_FRAMES: usize = 4000;

/// Seconds of buffered audio treated as one utterance by the Whisper backend.
pub const UTTERANCE_WINDOW_SECS: u32 = 30;

pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "m4a", "ogg", "aac", "opus"];

pub const WHISPER_MODEL_FILENAME: &str = "ggml-tiny.en.bin";
