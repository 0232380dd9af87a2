use crate::guess::{Guess, LetterOutcome};
use std::collections::BTreeMap;

/// Best evidence seen so far for every letter typed in a submitted guess
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    letters: BTreeMap<char, LetterOutcome>,
}

impl KeyboardState {
    /// Outcome to show for `letter`; untouched keys are `Empty`.
    pub fn get(&self, letter: char) -> LetterOutcome {
        self.letters
            .get(&letter.to_ascii_uppercase())
            .copied()
            .unwrap_or(LetterOutcome::Empty)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, LetterOutcome)> + '_ {
        self.letters.iter().map(|(c, o)| (*c, *o))
    }

    /// Fold one guess in. An existing entry only ever moves up in rank.
    pub fn record(&mut self, guess: &Guess) {
        for (letter, outcome) in guess.letters() {
            let entry = self.letters.entry(letter).or_insert(outcome);
            if outcome.rank() > entry.rank() {
                *entry = outcome;
            }
        }
    }
}

pub fn aggregate(guesses: &[Guess]) -> KeyboardState {
    guesses.iter().fold(KeyboardState::default(), |mut state, guess| {
        state.record(guess);
        state
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::score_guess;
    use itertools::Itertools;
    use LetterOutcome::*;

    #[test]
    fn test_empty_guesses() {
        let state = aggregate(&[]);
        assert!(state.is_empty());
        assert_eq!(state.get('A'), Empty);
    }

    #[test]
    fn test_correct_never_downgraded() {
        let guesses = vec![score_guess("CRANE", "CRONY"), score_guess("TRACK", "CRONY")];
        // C is correct in CRANE but only present in TRACK
        assert_eq!(guesses[1].letters().nth(3), Some(('C', Present)));
        assert_eq!(aggregate(&guesses).get('C'), Correct);
    }

    #[test]
    fn test_present_overrides_absent() {
        // second L of LLAMA is correct, the A at index 4 is absent but index 2 is present
        let state = aggregate(&[score_guess("LLAMA", "ALLOY")]);
        assert_eq!(state.get('A'), Present);
        assert_eq!(state.get('L'), Correct);
        assert_eq!(state.get('M'), Absent);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let state = aggregate(&[score_guess("TRACE", "CRANE")]);
        assert_eq!(state.get('t'), Absent);
        assert_eq!(state.get('c'), Present);
    }

    #[test]
    fn test_order_independent_across_permutations() {
        let target = "ALLOY";
        let guesses: Vec<Guess> = ["LLAMA", "HELLO", "YOLKS", "ATOLL"]
            .iter()
            .map(|w| score_guess(w, target))
            .collect();
        let expected = aggregate(&guesses);

        for perm in guesses.iter().cloned().permutations(guesses.len()) {
            assert_eq!(aggregate(&perm), expected);
        }
    }
}
