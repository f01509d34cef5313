use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::WHISPER_MODEL_FILENAME;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Resolve the on-disk location of the speech model.
///
/// Resolution order:
/// 1. Explicit path supplied by the caller (CLI flag or desktop settings)
/// 2. User cache directory (platform-specific)
/// 3. `models/` directory beside the executable (pre-packaged installs)
///
/// The model is user-supplied, so the first existing candidate wins. When no
/// candidate exists, the cache location is still returned so callers can
/// report where the model is expected to be placed.
pub fn resolve(explicit: Option<&Path>) -> Result<PathBuf, ModelResolveError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let cached = model_cache_dir()?.join(WHISPER_MODEL_FILENAME);
    if cached.exists() {
        return Ok(cached);
    }

    if let Some(bundled) = bundled_model_path() {
        if bundled.exists() {
            return Ok(bundled);
        }
    }

    Ok(cached)
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/VoiceScribe/models/`
/// - Linux: `$XDG_CACHE_HOME/VoiceScribe/models/` or `~/.cache/VoiceScribe/models/`
/// - Windows: `%LOCALAPPDATA%/VoiceScribe/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("VoiceScribe").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("VoiceScribe").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn bundled_model_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join("models").join(WHISPER_MODEL_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins_even_when_missing() {
        let explicit = Path::new("/nonexistent/custom-model.bin");
        let resolved = resolve(Some(explicit)).unwrap();
        assert_eq!(resolved, explicit);
    }

    #[test]
    fn test_resolve_without_explicit_returns_named_candidate() {
        let resolved = resolve(None).unwrap();
        assert_eq!(
            resolved.file_name().unwrap().to_string_lossy(),
            WHISPER_MODEL_FILENAME
        );
    }

    #[test]
    fn test_model_cache_dir_returns_path() {
        let dir = model_cache_dir();
        assert!(dir.is_ok());
        let path = dir.unwrap();
        assert!(path.to_string_lossy().contains("VoiceScribe"));
        assert!(path.to_string_lossy().contains("models"));
    }
}
