use std::collections::HashSet;

use crate::server::error::{Result, SearchError};
use crate::server::stop_words::StopWords;
use crate::server::token::{is_valid_word, split_query_tokens};

/// One classified query token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWord<'a> {
    /// word without the '-' marker
    pub data: &'a str,
    pub is_minus: bool,
}

impl<'a> QueryWord<'a> {
    /// Classify a raw token
    ///
    /// A leading '-' marks an excluded word. What remains must be non-empty,
    /// must not start with another '-' and must not contain control characters.
    pub fn parse(raw: &'a str) -> Result<Self> {
        if raw.is_empty() {
            return Err(SearchError::EmptyQueryWord);
        }
        let (data, is_minus) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        if data.is_empty() || data.starts_with('-') || !is_valid_word(data) {
            return Err(SearchError::InvalidQueryWord(raw.to_string()));
        }
        Ok(Self { data, is_minus })
    }
}

/// Parsed query: words a document should contain and words it must not contain
///
/// Both lists are free of duplicates and of stop words. A word that shows up
/// both with and without '-' stays in the list of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'a> {
    pub plus_words: Vec<&'a str>,
    pub minus_words: Vec<&'a str>,
}

impl<'a> Query<'a> {
    /// Parse space separated query text
    ///
    /// Every space separates two tokens, so a doubled, leading or trailing
    /// space fails with `EmptyQueryWord`. Empty text is an empty query.
    pub fn parse(text: &'a str, stop_words: &StopWords) -> Result<Self> {
        Self::from_words(split_query_tokens(text), stop_words)
    }

    /// Parse already split tokens
    pub fn from_words<I>(words: I, stop_words: &StopWords) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut query = Query::default();
        let mut seen: HashSet<&'a str> = HashSet::new();
        for raw in words {
            let word = QueryWord::parse(raw)?;
            if stop_words.contains(word.data) || !seen.insert(word.data) {
                continue;
            }
            if word.is_minus {
                query.minus_words.push(word.data);
            } else {
                query.plus_words.push(word.data);
            }
        }
        log::trace!(
            "parsed query: plus={:?} minus={:?}",
            query.plus_words,
            query.minus_words
        );
        Ok(query)
    }

    /// Sort both lists
    /// Gives parallel traversal a deterministic dispatch order. Scores do not depend on it.
    pub fn sorted(mut self) -> Self {
        self.plus_words.sort_unstable();
        self.minus_words.sort_unstable();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}
