use crate::app_dirs::AppDirs;
use crate::scoring::Difficulty;
use crate::session::{GameState, GameStatus};
use crate::store::StoreError;
use chrono::{DateTime, Local};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Cumulative player statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStatistics {
    pub games_played: u32,
    pub games_won: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    pub total_score: u64,
    pub average_score: f64,
    pub win_percentage: f64,
    /// attempts needed to win -> number of wins
    pub guess_distribution: BTreeMap<u32, u32>,
    /// mean attempts over won games only
    pub average_guesses: f64,
    pub total_winning_attempts: u64,
}

impl GameStatistics {
    /// Rebuild statistics from stored results, oldest first.
    pub fn from_results(records: &[GameRecord]) -> Self {
        records.iter().fold(Self::default(), |stats, record| {
            stats.apply(record.won, record.attempts, record.score)
        })
    }

    fn apply(&self, won: bool, attempts: u32, score: u32) -> Self {
        let mut next = self.clone();

        next.games_played += 1;
        if won {
            next.games_won += 1;
            next.current_streak += 1;
            *next.guess_distribution.entry(attempts).or_insert(0) += 1;
            next.total_winning_attempts += u64::from(attempts);
        } else {
            next.current_streak = 0;
        }
        next.max_streak = next.max_streak.max(next.current_streak);
        next.total_score += u64::from(score);

        let played = f64::from(next.games_played);
        next.average_score = next.total_score as f64 / played;
        next.win_percentage = f64::from(next.games_won) / played * 100.0;
        next.average_guesses = if next.games_won > 0 {
            next.total_winning_attempts as f64 / f64::from(next.games_won)
        } else {
            0.0
        };

        next
    }
}

/// Fold a finished game into `stats`, returning the new totals.
pub fn update(stats: &GameStatistics, finished_game: &GameState, won: bool) -> GameStatistics {
    stats.apply(won, finished_game.attempts_used(), finished_game.score)
}

/// One finished game as stored in the results table
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub target_word: String,
    pub word_length: usize,
    pub difficulty: Difficulty,
    pub won: bool,
    pub attempts: u32,
    pub hints_used: u32,
    pub score: u32,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl GameRecord {
    /// `None` while the game is still being played
    pub fn from_state(state: &GameState) -> Option<Self> {
        let finished_at = state.end_time?;
        if !state.is_finished() {
            return None;
        }
        Some(Self {
            target_word: state.target_word.clone(),
            word_length: state.word_length,
            difficulty: state.difficulty,
            won: state.status == GameStatus::Won,
            attempts: state.attempts_used(),
            hints_used: state.hints_used,
            score: state.score,
            started_at: state.start_time,
            finished_at,
        })
    }
}

pub trait StatisticsStore {
    fn load(&self) -> GameStatistics;
    fn save(&self, stats: &GameStatistics) -> Result<(), StoreError>;
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS statistics (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    payload TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS game_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    target_word TEXT NOT NULL,
    word_length INTEGER NOT NULL,
    difficulty TEXT NOT NULL,
    won BOOLEAN NOT NULL,
    attempts INTEGER NOT NULL,
    hints_used INTEGER NOT NULL,
    score INTEGER NOT NULL,
    started_at TEXT NOT NULL,
    finished_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_game_results_finished_at ON game_results(finished_at);
"#;

const INSERT_RESULT: &str = r#"
INSERT INTO game_results
(target_word, word_length, difficulty, won, attempts, hints_used, score, started_at, finished_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

const UPSERT_STATISTICS: &str = r#"
INSERT INTO statistics (id, payload, updated_at) VALUES (1, ?1, ?2)
ON CONFLICT(id) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at
"#;

const SELECT_RESULTS: &str = r#"
SELECT target_word, word_length, difficulty, won, attempts, hints_used, score, started_at, finished_at
FROM game_results
"#;

/// SQLite-backed store for statistics and the history of finished games
#[derive(Debug)]
pub struct StatsDb {
    conn: Connection,
}

impl StatsDb {
    /// Open the database at the default location, creating it if needed
    pub fn new() -> Result<Self, StoreError> {
        Self::open(AppDirs::db_path())
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(StatsDb { conn })
    }

    /// Stored statistics, or `None` if nothing has been saved yet
    pub fn load_statistics(&self) -> Result<Option<GameStatistics>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT payload FROM statistics WHERE id = 1")?;
        let mut rows = stmt.query([])?;

        match rows.next()? {
            Some(row) => {
                let payload: String = row.get(0)?;
                Ok(Some(serde_json::from_str(&payload)?))
            }
            None => Ok(None),
        }
    }

    pub fn save_statistics(&self, stats: &GameStatistics) -> Result<(), StoreError> {
        let payload = serde_json::to_string(stats)?;
        self.conn
            .execute(UPSERT_STATISTICS, params![payload, Local::now().to_rfc3339()])?;
        Ok(())
    }

    pub fn record_game(&self, record: &GameRecord) -> Result<(), StoreError> {
        insert_record(&self.conn, record)?;
        Ok(())
    }

    /// Record a finished game and persist the updated statistics in one transaction.
    pub fn record_result(
        &mut self,
        stats: &GameStatistics,
        game: &GameState,
    ) -> Result<GameStatistics, StoreError> {
        let record = GameRecord::from_state(game).ok_or(StoreError::GameInProgress)?;
        let updated = update(stats, game, record.won);

        let tx = self.conn.transaction()?;
        insert_record(&tx, &record)?;
        tx.execute(
            UPSERT_STATISTICS,
            params![serde_json::to_string(&updated)?, Local::now().to_rfc3339()],
        )?;
        tx.commit()?;

        debug!(
            games_played = updated.games_played,
            current_streak = updated.current_streak,
            "recorded game result"
        );
        Ok(updated)
    }

    /// Most recent finished games, newest first
    pub fn recent_games(&self, limit: usize) -> Result<Vec<GameRecord>, StoreError> {
        let sql = format!("{SELECT_RESULTS} ORDER BY id DESC LIMIT ?1");
        self.query_records(&sql, params![limit as i64])
    }

    /// Every finished game, oldest first
    pub fn all_games(&self) -> Result<Vec<GameRecord>, StoreError> {
        let sql = format!("{SELECT_RESULTS} ORDER BY id ASC");
        self.query_records(&sql, [])
    }

    /// Clear all statistics and history (for testing or reset purposes)
    pub fn clear_all_stats(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch("DELETE FROM game_results; DELETE FROM statistics;")?;
        Ok(())
    }

    fn query_records<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<GameRecord>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let record_iter = stmt.query_map(params, record_from_row)?;

        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }
        Ok(records)
    }
}

impl StatisticsStore for StatsDb {
    fn load(&self) -> GameStatistics {
        match self.load_statistics() {
            Ok(Some(stats)) => stats,
            Ok(None) => GameStatistics::default(),
            Err(e) => {
                warn!(error = %e, "unreadable statistics, starting fresh");
                GameStatistics::default()
            }
        }
    }

    fn save(&self, stats: &GameStatistics) -> Result<(), StoreError> {
        self.save_statistics(stats)
    }
}

fn insert_record(conn: &Connection, record: &GameRecord) -> rusqlite::Result<usize> {
    conn.execute(
        INSERT_RESULT,
        params![
            record.target_word,
            record.word_length as i64,
            record.difficulty.to_string(),
            record.won,
            record.attempts,
            record.hints_used,
            record.score,
            record.started_at.to_rfc3339(),
            record.finished_at.to_rfc3339(),
        ],
    )
}

fn parse_timestamp(idx: usize, value: String) -> rusqlite::Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|t| t.with_timezone(&Local))
        .map_err(|_| {
            rusqlite::Error::InvalidColumnType(idx, "timestamp".to_string(), rusqlite::types::Type::Text)
        })
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<GameRecord> {
    let difficulty: String = row.get(2)?;
    let difficulty = Difficulty::from_name(&difficulty).ok_or_else(|| {
        rusqlite::Error::InvalidColumnType(2, "difficulty".to_string(), rusqlite::types::Type::Text)
    })?;

    let word_length = usize::try_from(row.get::<_, i64>(1)?).map_err(|_| {
        rusqlite::Error::InvalidColumnType(1, "word_length".to_string(), rusqlite::types::Type::Integer)
    })?;

    Ok(GameRecord {
        target_word: row.get(0)?,
        word_length,
        difficulty,
        won: row.get(3)?,
        attempts: row.get(4)?,
        hints_used: row.get(5)?,
        score: row.get(6)?,
        started_at: parse_timestamp(7, row.get(7)?)?,
        finished_at: parse_timestamp(8, row.get(8)?)?,
    })
}
