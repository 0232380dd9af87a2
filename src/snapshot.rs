use crate::app_dirs::AppDirs;
use crate::session::GameState;
use crate::store::{read_json, write_json, StoreError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk envelope for an in-progress game
#[derive(Debug, Serialize, Deserialize)]
struct GameSnapshot<'a> {
    version: u32,
    state: Cow<'a, GameState>,
}

/// Keeps the current game around so it can be resumed after a restart
pub trait SnapshotStore {
    fn load(&self) -> Option<GameState>;
    fn save(&self, state: &GameState) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::snapshot_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileSnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for FileSnapshotStore {
    /// The saved game, or `None` when the file is missing, unreadable, from another
    /// version, or holds a state that fails [`GameState::validate`].
    fn load(&self) -> Option<GameState> {
        let snapshot = match read_json::<GameSnapshot>(&self.path) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable snapshot, ignoring");
                return None;
            }
        };

        if snapshot.version != SNAPSHOT_VERSION {
            warn!(version = snapshot.version, "ignoring snapshot with unknown version");
            return None;
        }

        let state = snapshot.state.into_owned();
        match state.validate() {
            Ok(()) => Some(state),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "inconsistent snapshot, ignoring");
                None
            }
        }
    }

    fn save(&self, state: &GameState) -> Result<(), StoreError> {
        write_json(
            &self.path,
            &GameSnapshot {
                version: SNAPSHOT_VERSION,
                state: Cow::Borrowed(state),
            },
        )
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
