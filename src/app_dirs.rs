use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "wordlet";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `$HOME/.local/state/wordlet`, or the platform data dir when `HOME` is unset
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn settings_path() -> PathBuf {
        Self::in_state_dir("settings.json")
    }

    pub fn db_path() -> PathBuf {
        Self::in_state_dir("stats.db")
    }

    pub fn snapshot_path() -> PathBuf {
        Self::in_state_dir("snapshot.json")
    }

    fn in_state_dir(file: &str) -> PathBuf {
        Self::state_dir()
            .map(|dir| dir.join(file))
            .unwrap_or_else(|| PathBuf::from(format!("{APP_NAME}_{file}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_state_dir() {
        let settings = AppDirs::settings_path();
        let db = AppDirs::db_path();
        let snapshot = AppDirs::snapshot_path();

        assert_eq!(settings.parent(), db.parent());
        assert_eq!(db.parent(), snapshot.parent());
        assert!(db.to_string_lossy().ends_with("stats.db"));
    }
}
