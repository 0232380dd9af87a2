use super::core::Language;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("no words of length {0}")]
    NoWordsOfLength(usize),
    #[error("word list {0} not found")]
    Missing(String),
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed word list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source of target words and the dictionary guesses are checked against
pub trait WordProvider {
    /// A random common word of `length` letters, uppercase.
    fn random_word(&self, length: usize) -> Result<String, WordListError>;

    /// Dictionary membership, ignoring case.
    fn is_valid_word(&self, word: &str) -> bool;
}

impl<T: WordProvider + ?Sized> WordProvider for &T {
    fn random_word(&self, length: usize) -> Result<String, WordListError> {
        (**self).random_word(length)
    }

    fn is_valid_word(&self, word: &str) -> bool {
        (**self).is_valid_word(word)
    }
}

/// In-memory word lists: common words bucketed by length, plus the full dictionary.
///
/// Every common word is also part of the dictionary, so a target is always a valid guess.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    common: HashMap<usize, Vec<String>>,
    all: HashSet<String>,
}

fn normalize(word: &str) -> Option<String> {
    let trimmed = word.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}

impl WordList {
    /// Entries that are empty or not purely ASCII letters are skipped.
    pub fn new<C, A, S, T>(common: C, all: A) -> Self
    where
        C: IntoIterator<Item = S>,
        A: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut list = WordList {
            common: HashMap::new(),
            all: all.into_iter().filter_map(|w| normalize(w.as_ref())).collect(),
        };

        let mut seen = HashSet::new();
        for word in common.into_iter().filter_map(|w| normalize(w.as_ref())) {
            if !seen.insert(word.clone()) {
                continue;
            }
            list.common
                .entry(word.len())
                .or_default()
                .push(word.to_ascii_uppercase());
            list.all.insert(word);
        }

        list
    }

    /// The lists compiled into the crate.
    pub fn embedded() -> Result<Self, WordListError> {
        let common = Language::embedded("common")?;
        let all = Language::embedded("all")?;
        Ok(Self::new(common.words, all.words))
    }

    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        common: P,
        all: Q,
    ) -> Result<Self, WordListError> {
        let common = Language::from_file(common)?;
        let all = Language::from_file(all)?;
        Ok(Self::new(common.words, all.words))
    }

    /// Number of target words available at `length`
    pub fn common_count(&self, length: usize) -> usize {
        self.common.get(&length).map_or(0, Vec::len)
    }

    /// Word lengths that have at least one target word, ascending
    pub fn lengths(&self) -> Vec<usize> {
        let mut lengths: Vec<usize> = self.common.keys().copied().collect();
        lengths.sort_unstable();
        lengths
    }

    pub fn dictionary_size(&self) -> usize {
        self.all.len()
    }
}

impl WordProvider for WordList {
    fn random_word(&self, length: usize) -> Result<String, WordListError> {
        self.common
            .get(&length)
            .and_then(|words| words.choose(&mut rand::thread_rng()))
            .cloned()
            .ok_or(WordListError::NoWordsOfLength(length))
    }

    fn is_valid_word(&self, word: &str) -> bool {
        self.all.contains(&word.to_ascii_lowercase())
    }
}
