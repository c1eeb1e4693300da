pub mod batch;
pub mod document;
pub mod duplicates;
pub mod error;
pub mod evaluate;
pub mod index;
pub mod policy;
pub mod stop_words;
pub mod token;

use std::iter::Copied;

use indexmap::map::Keys;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::server::document::{DocId, DocumentData, DocumentStatus};
use crate::server::error::{Result, SearchError};
use crate::server::index::{InvertedIndex, TermFrequencies};
use crate::server::policy::ExecutionPolicy;
use crate::server::stop_words::StopWords;
use crate::server::token::{is_valid_word, split_into_words};
use crate::utils::datastruct::map::DEFAULT_SHARD_COUNT;

/// Default number of documents returned by a top-K search
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are ranked as equal
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Construction-time settings of a [`SearchServer`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerOptions {
    /// K of top-K search
    pub max_result_count: usize,
    /// shards of the score accumulator in parallel searches
    pub shard_count: usize,
    /// tolerance under which two relevances tie
    pub relevance_epsilon: f64,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            max_result_count: MAX_RESULT_DOCUMENT_COUNT,
            shard_count: DEFAULT_SHARD_COUNT,
            relevance_epsilon: RELEVANCE_EPSILON,
        }
    }
}

impl ServerOptions {
    /// Check that every option is usable
    ///
    /// `relevance_epsilon` must be finite and non-negative. A zero
    /// `shard_count` is allowed and means one shard.
    pub fn validate(&self) -> Result<()> {
        if !self.relevance_epsilon.is_finite() || self.relevance_epsilon < 0.0 {
            return Err(SearchError::InvalidOption {
                name: "relevance_epsilon",
                reason: format!("{} is not a finite non-negative number", self.relevance_epsilon),
            });
        }
        Ok(())
    }
}

/// In-memory full-text search server
///
/// Holds the stop words, the inverted index and the metadata of every live
/// document. Documents are iterated in insertion order.
///
/// Reads take `&self` and may run from many threads at once. Mutations
/// take `&mut self`, so they can never overlap a read.
#[derive(Debug, Clone)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    documents: IndexMap<DocId, DocumentData>,
    options: ServerOptions,
}

impl SearchServer {
    /// Create a server from a collection of stop words
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_options(stop_words, ServerOptions::default())
    }

    /// Create a server from space separated stop words
    pub fn from_stop_words_text(stop_words_text: &str) -> Result<Self> {
        Self::new(split_into_words(stop_words_text))
    }

    /// Create a server with explicit options
    /// Fails with `InvalidOption` if `options` do not validate.
    pub fn with_options<I, S>(stop_words: I, options: ServerOptions) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        options.validate()?;
        Ok(Self {
            stop_words: StopWords::new(stop_words)?,
            index: InvertedIndex::new(),
            documents: IndexMap::new(),
            options,
        })
    }

    pub fn options(&self) -> &ServerOptions {
        &self.options
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Add a document
    ///
    /// Fails with `InvalidDocumentId` for a negative or live id and with
    /// `InvalidWord` if a word contains control characters. Nothing is
    /// changed on failure.
    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if id < 0 || self.documents.contains_key(&id) {
            return Err(SearchError::InvalidDocumentId(id));
        }
        let words = self.split_into_words_no_stop(text)?;
        self.index.insert_document(id, &words);
        self.documents.insert(id, DocumentData::new(ratings, status, text));
        log::debug!("added document {id} with {} words", words.len());
        Ok(())
    }

    /// Remove a document, sequentially
    pub fn remove_document(&mut self, id: DocId) -> bool {
        self.remove_document_with(ExecutionPolicy::Sequential, id)
    }

    /// Remove a document and all of its postings
    /// Returns false, changing nothing, if `id` is not live.
    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, id: DocId) -> bool {
        // shift_remove keeps the insertion order of the remaining ids
        if self.documents.shift_remove(&id).is_none() {
            return false;
        }
        let terms = self.index.remove_document(id, policy).map_or(0, |freqs| freqs.len());
        log::debug!("removed document {id} with {terms} terms");
        true
    }

    /// term -> frequency for `id`, empty if unknown or without words
    pub fn word_frequencies(&self, id: DocId) -> &TermFrequencies {
        static EMPTY: TermFrequencies = TermFrequencies::new();
        self.index.word_frequencies(id).unwrap_or(&EMPTY)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Metadata of a live document
    pub fn document(&self, id: DocId) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    pub fn contains_document(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Live ids in insertion order
    pub fn ids(&self) -> Ids<'_> {
        self.documents.keys().copied()
    }

    /// Id at `position` in insertion order
    pub fn id_at(&self, position: usize) -> Option<DocId> {
        self.documents.get_index(position).map(|(&id, _)| id)
    }

    fn split_into_words_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::InvalidWord(word.to_string()));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }
}

/// Iterator over live ids
pub type Ids<'a> = Copied<Keys<'a, DocId, DocumentData>>;

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = Ids<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids()
    }
}
