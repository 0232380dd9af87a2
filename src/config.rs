use crate::app_dirs::AppDirs;
use crate::scoring::Difficulty;
use crate::store::{read_json, write_json, StoreError};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const SUPPORTED_WORD_LENGTHS: RangeInclusive<usize> = 4..=7;
pub const DEFAULT_WORD_LENGTH: usize = 5;

/// Player settings. Only `difficulty` and `word_length` matter to the engine; the
/// rest are carried for the host app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameSettings {
    pub difficulty: Difficulty,
    pub word_length: usize,
    pub haptic_feedback: bool,
    pub sound_effects: bool,
    pub dark_theme: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            word_length: DEFAULT_WORD_LENGTH,
            haptic_feedback: true,
            sound_effects: true,
            dark_theme: false,
        }
    }
}

impl GameSettings {
    /// Out-of-range word lengths fall back to the default
    pub fn validated(mut self) -> Self {
        if !SUPPORTED_WORD_LENGTHS.contains(&self.word_length) {
            warn!(word_length = self.word_length, "unsupported word length, using default");
            self.word_length = DEFAULT_WORD_LENGTH;
        }
        self
    }
}

pub trait SettingsStore {
    fn load(&self) -> GameSettings;
    fn save(&self, settings: &GameSettings) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::settings_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> GameSettings {
        match read_json::<GameSettings>(&self.path) {
            Ok(Some(settings)) => settings.validated(),
            Ok(None) => GameSettings::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable settings, using defaults");
                GameSettings::default()
            }
        }
    }

    fn save(&self, settings: &GameSettings) -> Result<(), StoreError> {
        write_json(&self.path, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_settings() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::with_path(dir.path().join("settings.json"));
        let settings = GameSettings::default();
        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn save_and_load_custom_settings() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::with_path(dir.path().join("settings.json"));
        let settings = GameSettings {
            difficulty: Difficulty::Hard,
            word_length: 7,
            haptic_feedback: false,
            sound_effects: false,
            dark_theme: true,
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), GameSettings::default());
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "][").unwrap();
        assert_eq!(FileSettingsStore::with_path(&path).load(), GameSettings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "difficulty": "Easy" }"#).unwrap();

        let loaded = FileSettingsStore::with_path(&path).load();
        assert_eq!(loaded.difficulty, Difficulty::Easy);
        assert_eq!(loaded.word_length, DEFAULT_WORD_LENGTH);
        assert!(loaded.haptic_feedback);
    }

    #[test]
    fn unsupported_word_length_is_reset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "word_length": 12 }"#).unwrap();

        assert_eq!(FileSettingsStore::with_path(&path).load().word_length, 5);
    }
}
