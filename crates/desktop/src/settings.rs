use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Explicit model path override; resolver defaults apply when unset.
    #[serde(default)]
    pub model_path: Option<PathBuf>,
}

impl Settings {
    pub fn load() -> Self {
        settings_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Some(path) = settings_path() {
            self.save_to(&path);
        }
    }

    fn save_to(&self, path: &Path) {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match serde_json::to_string_pretty(self) {
            Ok(raw) => {
                if let Err(e) = fs::write(path, raw) {
                    log::warn!("failed to save settings: {e}");
                }
            }
            Err(e) => log::warn!("failed to serialize settings: {e}"),
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("VoiceScribe").join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_creates_file_and_load_returns_model_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("VoiceScribe").join("settings.json");

        let settings = Settings {
            model_path: Some(PathBuf::from("/models/ggml-tiny.en.bin")),
        };
        settings.save_to(&path);

        assert!(path.exists());
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json"));
        assert_eq!(settings.model_path, None);
    }

    #[test]
    fn test_load_corrupt_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_cleared_override_round_trips_as_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        Settings {
            model_path: Some(PathBuf::from("/models/old.bin")),
        }
        .save_to(&path);
        Settings::default().save_to(&path);

        assert_eq!(Settings::load_from(&path).model_path, None);
    }
}
