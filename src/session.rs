//! The game session: owns one game's state and enforces the rules around it.
//!
//! A session never touches persistence. When [`GameSession::submit_guess`] reports a
//! terminal status, the caller hands [`GameSession::state`] to
//! [`crate::stats::update`] and to whatever stores it keeps.

use crate::guess::Guess;
use crate::hint::{self, HintResult};
use crate::keyboard::{self, KeyboardState};
use crate::language::{WordListError, WordProvider};
use crate::matcher;
use crate::scoring::{self, Difficulty};
use chrono::{DateTime, Local};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Why a submitted guess was rejected. None of these consume an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("guess must be {expected} letters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("{0} is not in the word list")]
    NotAWord(String),
    #[error("the game is already over")]
    GameOver,
}

/// A restored [`GameState`] that breaks the rules a live session maintains
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidState {
    #[error("target {target:?} is not {word_length} ASCII letters")]
    TargetWord { target: String, word_length: usize },
    #[error("guess {index} does not have {word_length} scored letters")]
    GuessLength { index: usize, word_length: usize },
    #[error("{guesses} guesses recorded but only {max_attempts} allowed")]
    TooManyGuesses { guesses: usize, max_attempts: u32 },
    #[error("pending guess {0:?} does not fit the word")]
    CurrentGuess(String),
    #[error("status {0} does not match the recorded guesses")]
    Status(GameStatus),
    #[error("{revealed} hints revealed but only {hints_used} counted")]
    Hints { hints_used: u32, revealed: usize },
}

/// Everything needed to display, resume or score a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub target_word: String,
    pub word_length: usize,
    pub difficulty: Difficulty,
    pub guesses: Vec<Guess>,
    pub current_guess: String,
    pub status: GameStatus,
    pub hints_used: u32,
    pub score: u32,
    pub start_time: DateTime<Local>,
    pub end_time: Option<DateTime<Local>>,
    #[serde(default)]
    pub revealed_hints: Vec<HintResult>,
}

impl GameState {
    pub fn new(target_word: &str, difficulty: Difficulty) -> Self {
        let target_word = target_word.to_ascii_uppercase();
        Self {
            word_length: target_word.chars().count(),
            target_word,
            difficulty,
            guesses: Vec::new(),
            current_guess: String::new(),
            status: GameStatus::Playing,
            hints_used: 0,
            score: 0,
            start_time: Local::now(),
            end_time: None,
            revealed_hints: Vec::new(),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        scoring::max_attempts(self.difficulty)
    }

    pub fn attempts_used(&self) -> u32 {
        self.guesses.len() as u32
    }

    pub fn attempts_left(&self) -> u32 {
        self.max_attempts().saturating_sub(self.attempts_used())
    }

    pub fn is_finished(&self) -> bool {
        self.status != GameStatus::Playing
    }

    /// Shareable summary: a header line and one emoji row per guess.
    pub fn share_text(&self) -> String {
        let attempts = match self.status {
            GameStatus::Won => self.attempts_used().to_string(),
            _ => "X".to_string(),
        };
        let mut text = format!(
            "{} letters ({}) {}/{}",
            self.word_length,
            self.difficulty,
            attempts,
            self.max_attempts()
        );
        for guess in &self.guesses {
            text.push('\n');
            text.push_str(&guess.to_emoji());
        }
        text
    }

    /// Check the invariants a session relies on. Used on states restored from disk.
    pub fn validate(&self) -> Result<(), InvalidState> {
        let len = self.word_length;
        if len == 0
            || self.target_word.chars().count() != len
            || !self.target_word.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(InvalidState::TargetWord {
                target: self.target_word.clone(),
                word_length: len,
            });
        }

        if let Some(index) = self
            .guesses
            .iter()
            .position(|g| g.word().chars().count() != len || g.outcomes().len() != len)
        {
            return Err(InvalidState::GuessLength {
                index,
                word_length: len,
            });
        }

        if self.attempts_used() > self.max_attempts() {
            return Err(InvalidState::TooManyGuesses {
                guesses: self.guesses.len(),
                max_attempts: self.max_attempts(),
            });
        }

        if self.current_guess.chars().count() > len
            || !self.current_guess.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(InvalidState::CurrentGuess(self.current_guess.clone()));
        }

        let solved_at = self.guesses.iter().position(Guess::is_solved);
        let consistent = match self.status {
            GameStatus::Playing => solved_at.is_none() && self.attempts_left() > 0,
            GameStatus::Won => matches!(solved_at, Some(i) if i + 1 == self.guesses.len()),
            GameStatus::Lost => solved_at.is_none() && self.attempts_left() == 0,
        };
        if !consistent {
            return Err(InvalidState::Status(self.status));
        }

        if (self.hints_used as usize) < self.revealed_hints.len() {
            return Err(InvalidState::Hints {
                hints_used: self.hints_used,
                revealed: self.revealed_hints.len(),
            });
        }

        Ok(())
    }

    fn rescore(&mut self) {
        self.score = scoring::calculate_score(&self.guesses, self.attempts_left(), self.hints_used);
    }
}

/// Result of an accepted guess
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitResult {
    pub guess: Guess,
    pub status: GameStatus,
}

#[derive(Debug)]
pub struct GameSession<P: WordProvider> {
    provider: P,
    state: GameState,
    keyboard: KeyboardState,
}

impl<P: WordProvider> GameSession<P> {
    pub fn new(provider: P, difficulty: Difficulty, word_length: usize) -> Result<Self, WordListError> {
        let target = provider.random_word(word_length)?;
        debug!(%difficulty, word_length, "starting game");
        Ok(Self {
            provider,
            state: GameState::new(&target, difficulty),
            keyboard: KeyboardState::default(),
        })
    }

    /// Pick up a game restored from a snapshot. States that fail
    /// [`GameState::validate`] are refused.
    pub fn resume(provider: P, state: GameState) -> Result<Self, InvalidState> {
        state.validate()?;
        let keyboard = keyboard::aggregate(&state.guesses);
        debug!(
            difficulty = %state.difficulty,
            attempts = state.guesses.len(),
            status = %state.status,
            "resuming game"
        );
        Ok(Self {
            provider,
            state,
            keyboard,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn max_attempts(&self) -> u32 {
        self.state.max_attempts()
    }

    pub fn attempts_left(&self) -> u32 {
        self.state.attempts_left()
    }

    /// The completed game, once the session has reached `Won` or `Lost`
    pub fn finished_game(&self) -> Option<&GameState> {
        self.is_finished().then_some(&self.state)
    }

    /// Append a letter to the pending guess. Ignored when the game is over, the
    /// buffer is full, or `ch` is not an ASCII letter.
    pub fn add_letter(&mut self, ch: char) -> bool {
        if self.is_finished()
            || !ch.is_ascii_alphabetic()
            || self.state.current_guess.chars().count() >= self.state.word_length
        {
            return false;
        }
        self.state.current_guess.push(ch.to_ascii_uppercase());
        true
    }

    pub fn delete_letter(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.state.current_guess.pop().is_some()
    }

    pub fn submit_guess(&mut self) -> Result<SubmitResult, GuessError> {
        if self.is_finished() {
            return Err(GuessError::GameOver);
        }

        let buffer = &self.state.current_guess;
        let actual = buffer.chars().count();
        if actual != self.state.word_length {
            return Err(GuessError::InvalidLength {
                expected: self.state.word_length,
                actual,
            });
        }
        if !self.provider.is_valid_word(&buffer.to_ascii_lowercase()) {
            return Err(GuessError::NotAWord(buffer.clone()));
        }

        let guess = matcher::score_guess(buffer, &self.state.target_word);
        self.state.current_guess.clear();
        self.keyboard.record(&guess);
        self.state.guesses.push(guess.clone());
        self.state.rescore();

        debug!(
            attempt = self.state.guesses.len(),
            pattern = %guess.to_emoji(),
            score = self.state.score,
            "guess accepted"
        );

        if guess.is_solved() {
            self.finish(GameStatus::Won);
        } else if self.state.attempts_used() >= self.state.max_attempts() {
            self.finish(GameStatus::Lost);
        }

        Ok(SubmitResult {
            guess,
            status: self.state.status,
        })
    }

    /// Reveal a letter using the thread-local RNG.
    pub fn request_hint(&mut self) -> Option<HintResult> {
        self.request_hint_with(&mut rand::thread_rng())
    }

    pub fn request_hint_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<HintResult> {
        if self.is_finished() {
            return None;
        }

        let hint = hint::select_hint(
            &self.state.target_word,
            &self.state.guesses,
            &self.state.revealed_hints,
            rng,
        )?;
        self.state.hints_used += 1;
        self.state.revealed_hints.push(hint);
        self.state.rescore();

        debug!(hints_used = self.state.hints_used, score = self.state.score, "hint granted");
        Some(hint)
    }

    /// Throw the current game away and start a fresh one.
    ///
    /// If the provider has no words of `word_length`, the current game is kept as is.
    pub fn restart(&mut self, difficulty: Difficulty, word_length: usize) -> Result<(), WordListError> {
        let target = self.provider.random_word(word_length)?;
        self.state = GameState::new(&target, difficulty);
        self.keyboard = KeyboardState::default();
        debug!(%difficulty, word_length, "restarted game");
        Ok(())
    }

    fn finish(&mut self, status: GameStatus) {
        self.state.status = status;
        self.state.end_time = Some(Local::now());
        info!(
            %status,
            attempts = self.state.guesses.len(),
            score = self.state.score,
            "game finished"
        );
    }
}
