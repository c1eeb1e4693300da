use std::collections::HashSet;

use crate::server::error::{Result, SearchError};
use crate::server::token::{is_valid_word, split_into_words};

/// Immutable set of words that are neither indexed nor searched
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<Box<str>>,
}

impl StopWords {
    /// Build from any collection of strings
    /// Empty strings are skipped, duplicates collapse.
    /// Fails with `InvalidStopWord` on the first word with control characters.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidStopWord(word.to_string()));
            }
            set.insert(Box::from(word));
        }
        Ok(Self { words: set })
    }

    /// Build from a space separated list
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_ref())
    }
}
