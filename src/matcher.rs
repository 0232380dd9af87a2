//! Letter matching between a guess and the target word.
//!
//! Repeated letters are handled the way Wordle does it: exact matches claim their
//! letters first, and only the leftover copies can turn other positions `Present`.

use crate::guess::{Guess, LetterOutcome};
use std::collections::HashMap;

/// Compare `guess` against `target`, case-insensitively.
///
/// # Panics
/// Panics if the two words differ in length. The session checks lengths before
/// calling, so a mismatch here is a bug in the caller.
pub fn check(guess: &str, target: &str) -> Vec<LetterOutcome> {
    let guess: Vec<char> = guess.chars().map(|c| c.to_ascii_uppercase()).collect();
    let target: Vec<char> = target.chars().map(|c| c.to_ascii_uppercase()).collect();
    assert_eq!(
        guess.len(),
        target.len(),
        "guess and target must have the same length"
    );

    let mut remaining: HashMap<char, usize> = HashMap::new();
    for &c in &target {
        *remaining.entry(c).or_insert(0) += 1;
    }

    let mut outcomes = vec![LetterOutcome::Absent; guess.len()];

    // exact matches first
    for (i, (&g, &t)) in guess.iter().zip(target.iter()).enumerate() {
        if g == t {
            outcomes[i] = LetterOutcome::Correct;
            if let Some(count) = remaining.get_mut(&g) {
                *count -= 1;
            }
        }
    }

    for (i, &g) in guess.iter().enumerate() {
        if outcomes[i] == LetterOutcome::Correct {
            continue;
        }
        match remaining.get_mut(&g) {
            Some(count) if *count > 0 => {
                outcomes[i] = LetterOutcome::Present;
                *count -= 1;
            }
            _ => {}
        }
    }

    outcomes
}

/// Run [`check`] and package the result as a [`Guess`] with an uppercase word.
pub fn score_guess(guess: &str, target: &str) -> Guess {
    let outcomes = check(guess, target);
    Guess::new(guess.to_ascii_uppercase(), outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterOutcome::*;

    #[test]
    fn test_exact_match_is_all_correct() {
        assert_eq!(check("ALLOY", "ALLOY"), vec![Correct; 5]);
    }

    #[test]
    fn test_repeated_letters_do_not_overcount() {
        // ALLOY has two L's; position 1 claims one, position 0 gets the other
        // A appears once, so only the first A in LLAMA is present
        assert_eq!(
            check("LLAMA", "ALLOY"),
            vec![Present, Correct, Present, Absent, Absent]
        );
    }

    #[test]
    fn test_exact_match_consumes_before_partial() {
        // the only E in ABIDE is matched exactly, so the first E gets nothing
        assert_eq!(
            check("EERIE", "ABIDE"),
            vec![Absent, Absent, Absent, Present, Correct]
        );
    }

    #[test]
    fn test_speed_against_erase() {
        assert_eq!(
            check("SPEED", "ERASE"),
            vec![Present, Absent, Present, Present, Absent]
        );
    }

    #[test]
    fn test_robot_against_floor() {
        assert_eq!(
            check("ROBOT", "FLOOR"),
            vec![Present, Present, Absent, Correct, Absent]
        );
    }

    #[test]
    fn test_trace_against_crane() {
        assert_eq!(
            check("TRACE", "CRANE"),
            vec![Absent, Correct, Correct, Present, Correct]
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(check("trace", "CRANE"), check("TRACE", "crane"));
    }

    #[test]
    fn test_outcome_counts_sum_to_length() {
        let pairs = [
            ("LLAMA", "ALLOY"),
            ("AAAAA", "ABACA"),
            ("ZZZZZ", "CRANE"),
            ("EERIE", "ABIDE"),
            ("ABCD", "DCBA"),
            ("MISSISSIPPI", "SPIMISSISSI"),
        ];
        for (guess, target) in pairs {
            let outcomes = check(guess, target);
            let counted = outcomes
                .iter()
                .filter(|o| matches!(o, Correct | Present | Absent))
                .count();
            assert_eq!(counted, guess.len(), "{guess} vs {target}");
            assert!(!outcomes.contains(&Empty));
        }
    }

    #[test]
    fn test_check_is_idempotent() {
        assert_eq!(check("LLAMA", "ALLOY"), check("LLAMA", "ALLOY"));
    }

    #[test]
    fn test_score_guess_uppercases_word() {
        let guess = score_guess("trace", "crane");
        assert_eq!(guess.word(), "TRACE");
        assert_eq!(guess.count(Correct), 3);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_length_mismatch_panics() {
        check("CRANES", "CRANE");
    }
}
