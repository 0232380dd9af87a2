// Game engine for a Wordle-style guessing game. No UI lives here: hosts drive a
// `GameSession`, render its state, and persist through the stores below.
pub mod app_dirs;
pub mod config;
pub mod guess;
pub mod hint;
pub mod keyboard;
pub mod language;
pub mod matcher;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod stats;
pub mod store;

pub use config::{FileSettingsStore, GameSettings, SettingsStore};
pub use guess::{Guess, LetterOutcome};
pub use hint::HintResult;
pub use keyboard::KeyboardState;
pub use language::{WordList, WordListError, WordProvider};
pub use scoring::Difficulty;
pub use session::{GameSession, GameState, GameStatus, GuessError, InvalidState, SubmitResult};
pub use snapshot::{FileSnapshotStore, SnapshotStore};
pub use stats::{GameRecord, GameStatistics, StatisticsStore, StatsDb};
pub use store::StoreError;
