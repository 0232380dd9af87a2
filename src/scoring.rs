use crate::guess::{Guess, LetterOutcome};
use serde::{Deserialize, Serialize};

const CORRECT_POINTS: f64 = 1.0;
const PRESENT_POINTS: f64 = 0.5;
const ATTEMPT_LEFT_POINTS: f64 = 3.0;
const HINT_PENALTY: f64 = 0.5;

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum_macros::Display,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn max_attempts(self) -> u32 {
        match self {
            Difficulty::Easy => 7,
            Difficulty::Medium => 5,
            Difficulty::Hard => 3,
        }
    }

    /// Parse the `Display` name back, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(name))
    }
}

pub fn max_attempts(difficulty: Difficulty) -> u32 {
    difficulty.max_attempts()
}

/// Score for the guesses made so far.
///
/// Correct and present letters are counted across every guess, not just the last one.
/// The hint penalty is subtracted before flooring, and the result never drops below zero.
pub fn calculate_score(guesses: &[Guess], attempts_left: u32, hints_used: u32) -> u32 {
    let (correct, present) = guesses
        .iter()
        .flat_map(|g| g.outcomes().iter())
        .fold((0u32, 0u32), |(c, p), outcome| match outcome {
            LetterOutcome::Correct => (c + 1, p),
            LetterOutcome::Present => (c, p + 1),
            _ => (c, p),
        });

    let raw = f64::from(correct) * CORRECT_POINTS
        + f64::from(present) * PRESENT_POINTS
        + f64::from(attempts_left) * ATTEMPT_LEFT_POINTS
        - f64::from(hints_used) * HINT_PENALTY;

    raw.max(0.0).floor() as u32
}
