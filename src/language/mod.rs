pub mod core;
pub mod provider;

// Re-export the main types for convenience
pub use core::Language;
pub use provider::{WordList, WordListError, WordProvider};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_word_list() {
        let list = WordList::embedded().unwrap();

        assert_eq!(list.lengths(), vec![4, 5, 6, 7]);
        for length in list.lengths() {
            let word = list.random_word(length).unwrap();
            assert_eq!(word.len(), length);
            assert!(list.is_valid_word(&word));
        }
    }

    #[test]
    fn test_embedded_dictionary_has_more_than_targets() {
        let list = WordList::embedded().unwrap();
        let targets: usize = list.lengths().iter().map(|l| list.common_count(*l)).sum();

        assert!(list.dictionary_size() > targets);
        assert!(list.is_valid_word("llama"));
        assert!(list.is_valid_word("Crane"));
    }
}
