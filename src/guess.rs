use serde::{Deserialize, Serialize};

/// Per-letter result of comparing a guess against the target word
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterOutcome {
    /// right letter, right position
    Correct,
    /// right letter, wrong position
    Present,
    /// letter not in the target (after accounting for repeats)
    Absent,
    /// nothing guessed at this slot yet
    Empty,
}

impl LetterOutcome {
    /// Evidence strength used when several guesses disagree about a letter.
    pub fn rank(self) -> u8 {
        match self {
            LetterOutcome::Correct => 3,
            LetterOutcome::Present => 2,
            LetterOutcome::Absent => 1,
            LetterOutcome::Empty => 0,
        }
    }

    pub fn to_emoji(self) -> char {
        match self {
            LetterOutcome::Correct => '🟩',
            LetterOutcome::Present => '🟨',
            LetterOutcome::Absent => '⬜',
            LetterOutcome::Empty => '⬛',
        }
    }
}

/// A submitted, validated attempt together with its outcomes.
///
/// Only built by [`crate::matcher::score_guess`] or deserialized from a snapshot,
/// so `outcomes` always lines up with the letters of `word`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    word: String,
    outcomes: Vec<LetterOutcome>,
}

impl Guess {
    pub(crate) fn new(word: String, outcomes: Vec<LetterOutcome>) -> Self {
        debug_assert_eq!(word.chars().count(), outcomes.len());
        Self { word, outcomes }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn outcomes(&self) -> &[LetterOutcome] {
        &self.outcomes
    }

    /// Letters of the guess paired with their outcome, left to right
    pub fn letters(&self) -> impl Iterator<Item = (char, LetterOutcome)> + '_ {
        self.word.chars().zip(self.outcomes.iter().copied())
    }

    pub fn is_solved(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|o| *o == LetterOutcome::Correct)
    }

    pub fn count(&self, outcome: LetterOutcome) -> usize {
        self.outcomes.iter().filter(|o| **o == outcome).count()
    }

    pub fn to_emoji(&self) -> String {
        self.outcomes.iter().map(|o| o.to_emoji()).collect()
    }
}
