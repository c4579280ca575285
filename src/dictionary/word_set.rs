//! Sorted in-memory word list
//!
//! Words are normalized, deduplicated and kept sorted, which gives membership
//! and prefix queries by binary search without a separate trie.

use super::{Dictionary, PrefixIndex};
use crate::core::normalize_word;
use rustc_hash::FxHashMap;

/// Sorted, deduplicated set of normalized words
#[derive(Debug, Clone, Default)]
pub struct WordSet {
    words: Vec<String>,
    alphabet: Vec<char>,
    frequency: FxHashMap<char, u32>,
}

impl WordSet {
    /// Build a set from any word source
    ///
    /// Blank entries and entries containing non-letters are skipped.
    ///
    /// # Examples
    /// ```
    /// use balda::dictionary::{Dictionary, WordSet};
    ///
    /// let words = WordSet::new(["cat", " Scat", "cats"]);
    /// assert!(words.contains("SCAT"));
    /// assert!(words.prefix_index().unwrap().has_prefix("SC"));
    /// ```
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|w| normalize_word(w.as_ref()))
            .filter(|w| !w.is_empty() && w.chars().all(char::is_alphabetic))
            .collect();
        words.sort_unstable();
        words.dedup();

        let mut frequency: FxHashMap<char, u32> = FxHashMap::default();
        for word in &words {
            for ch in word.chars() {
                *frequency.entry(ch).or_insert(0) += 1;
            }
        }

        let mut alphabet: Vec<char> = frequency.keys().copied().collect();
        alphabet.sort_unstable();

        Self {
            words,
            alphabet,
            frequency,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    fn lookup(&self, normalized: &str) -> bool {
        self.words
            .binary_search_by(|w| w.as_str().cmp(normalized))
            .is_ok()
    }
}

impl Dictionary for WordSet {
    fn contains(&self, word: &str) -> bool {
        self.lookup(&normalize_word(word))
    }

    fn prefix_index(&self) -> Option<&dyn PrefixIndex> {
        Some(self)
    }

    fn alphabet(&self) -> Vec<char> {
        self.alphabet.clone()
    }

    fn letter_frequency(&self, letter: char) -> Option<u32> {
        self.frequency.get(&letter).copied()
    }
}

impl PrefixIndex for WordSet {
    fn has_prefix(&self, prefix: &str) -> bool {
        let prefix = normalize_word(prefix);
        // First word not sorting before the prefix is the only candidate
        let start = self.words.partition_point(|w| w.as_str() < prefix.as_str());
        self.words
            .get(start)
            .is_some_and(|w| w.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WordSet {
        WordSet::new(["cat", "cats", "scat", "dog", "Dog", "  ", "c4t", "hello"])
    }

    #[test]
    fn words_are_normalized_and_deduplicated() {
        let words = sample();
        assert_eq!(
            words.iter().collect::<Vec<_>>(),
            vec!["CAT", "CATS", "DOG", "HELLO", "SCAT"]
        );
        assert_eq!(words.len(), 5);
    }

    #[test]
    fn membership_ignores_case_and_whitespace() {
        let words = sample();
        assert!(words.contains("cat"));
        assert!(words.contains(" CATS "));
        assert!(!words.contains("CA"));
        assert!(!words.contains("C4T"));
        assert!(!words.contains(""));
    }

    #[test]
    fn prefix_queries() {
        let words = sample();
        let index = words.prefix_index().unwrap();
        assert!(index.has_prefix("C"));
        assert!(index.has_prefix("CAT"));
        assert!(index.has_prefix("cats"));
        assert!(index.has_prefix("he"));
        assert!(index.has_prefix(""));
        assert!(!index.has_prefix("CATSS"));
        assert!(!index.has_prefix("X"));
        assert!(!index.has_prefix("SCATS"));
    }

    #[test]
    fn alphabet_and_frequency() {
        let words = WordSet::new(["aab", "bc"]);
        assert_eq!(words.alphabet(), vec!['A', 'B', 'C']);
        assert_eq!(words.letter_frequency('A'), Some(2));
        assert_eq!(words.letter_frequency('B'), Some(2));
        assert_eq!(words.letter_frequency('C'), Some(1));
        assert_eq!(words.letter_frequency('Z'), None);
    }

    #[test]
    fn empty_set() {
        let words = WordSet::default();
        assert!(words.is_empty());
        assert!(!words.contains("A"));
        assert!(!words.prefix_index().unwrap().has_prefix("A"));
    }
}
