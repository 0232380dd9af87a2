use crate::guess::{Guess, LetterOutcome};
use itertools::Itertools;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A letter of the target revealed at a scoring cost
#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintResult {
    pub letter: char,
    pub position: Option<usize>,
}

fn guessed_letters(guesses: &[Guess]) -> HashSet<char> {
    guesses.iter().flat_map(|g| g.word().chars()).collect()
}

fn revealed_positions(guesses: &[Guess]) -> HashSet<usize> {
    guesses
        .iter()
        .flat_map(|g| {
            g.outcomes()
                .iter()
                .positions(|o| *o == LetterOutcome::Correct)
        })
        .collect()
}

/// Letters of `target` the player has neither typed nor had revealed in place.
///
/// Each letter appears once, in the order it first occurs in the target.
pub fn available_hint_letters(target: &str, guesses: &[Guess]) -> Vec<char> {
    let guessed = guessed_letters(guesses);
    let revealed = revealed_positions(guesses);

    target
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .enumerate()
        .filter(|(i, c)| !guessed.contains(c) && !revealed.contains(i))
        .map(|(_, c)| c)
        .unique()
        .collect()
}

/// Pick a random unrevealed letter of the target, or `None` once nothing is left.
pub fn get_hint<R: Rng + ?Sized>(target: &str, guesses: &[Guess], rng: &mut R) -> Option<HintResult> {
    select_hint(target, guesses, &[], rng)
}

/// Like [`get_hint`], skipping letters that earlier hints already gave away.
pub fn select_hint<R: Rng + ?Sized>(
    target: &str,
    guesses: &[Guess],
    already_hinted: &[HintResult],
    rng: &mut R,
) -> Option<HintResult> {
    let candidates: Vec<char> = available_hint_letters(target, guesses)
        .into_iter()
        .filter(|c| !already_hinted.iter().any(|h| h.letter == *c))
        .collect();
    let letter = *candidates.choose(rng)?;

    let revealed = revealed_positions(guesses);
    let position = target
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .enumerate()
        .filter(|(i, c)| *c == letter && !revealed.contains(i))
        .map(|(i, _)| i)
        .choose(rng);

    Some(HintResult { letter, position })
}
