use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rayon::prelude::*;

use crate::server::document::DocId;
use crate::server::policy::ExecutionPolicy;

/// Indexed word, shared between the two directions of the index
pub type Term = Arc<str>;

/// term -> term frequency for one document, ordered by term
pub type TermFrequencies = BTreeMap<Term, f64>;

/// doc id -> term frequency for one term, ordered by id
pub type Postings = BTreeMap<DocId, f64>;

/// Inverted index kept together with its forward mirror
///
/// `word_to_document_freqs` and `document_to_word_freqs` always hold the
/// same (term, id, tf) triples. Only paired mutations are exposed.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    word_to_document_freqs: HashMap<Term, Postings>,
    document_to_word_freqs: HashMap<DocId, TermFrequencies>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `words` for `id`
    /// Each occurrence adds `1 / words.len()` to the term frequency.
    /// An id without words gets no postings.
    /// `id` must not be indexed already; the caller checks this.
    pub fn insert_document(&mut self, id: DocId, words: &[&str]) {
        if words.is_empty() {
            return;
        }
        let inv_word_count = 1.0 / words.len() as f64;
        let mut word_freqs = TermFrequencies::new();
        for &word in words {
            // reuse the Arc already stored for this term
            let term = match self.word_to_document_freqs.get_key_value(word) {
                Some((term, _)) => Arc::clone(term),
                None => match word_freqs.get_key_value(word) {
                    Some((term, _)) => Arc::clone(term),
                    None => Term::from(word),
                },
            };
            *word_freqs.entry(term).or_insert(0.0) += inv_word_count;
        }
        for (term, &freq) in &word_freqs {
            self.word_to_document_freqs
                .entry(Arc::clone(term))
                .or_default()
                .insert(id, freq);
        }
        self.document_to_word_freqs.insert(id, word_freqs);
    }

    /// Drop every posting of `id` from both maps
    ///
    /// Terms left without postings are removed. The parallel policy visits the
    /// vocabulary across threads, then drops emptied terms of `id` only.
    pub fn remove_document(&mut self, id: DocId, policy: ExecutionPolicy) -> Option<TermFrequencies> {
        let word_freqs = self.document_to_word_freqs.remove(&id)?;
        match policy {
            ExecutionPolicy::Sequential => {
                for term in word_freqs.keys() {
                    if let Some(postings) = self.word_to_document_freqs.get_mut(term) {
                        postings.remove(&id);
                        if postings.is_empty() {
                            self.word_to_document_freqs.remove(term);
                        }
                    }
                }
            }
            ExecutionPolicy::Parallel => {
                self.word_to_document_freqs
                    .par_iter_mut()
                    .filter(|(term, _)| word_freqs.contains_key::<str>(term))
                    .for_each(|(_, postings)| {
                        postings.remove(&id);
                    });
                for term in word_freqs.keys() {
                    if self.word_to_document_freqs.get(term).is_some_and(Postings::is_empty) {
                        self.word_to_document_freqs.remove(term);
                    }
                }
            }
        }
        Some(word_freqs)
    }

    /// Postings of `term`, `None` if no live document contains it
    #[inline]
    pub fn postings(&self, term: &str) -> Option<&Postings> {
        self.word_to_document_freqs.get(term)
    }

    /// Term frequencies of `id`, `None` if it has no postings
    #[inline]
    pub fn word_frequencies(&self, id: DocId) -> Option<&TermFrequencies> {
        self.document_to_word_freqs.get(&id)
    }

    /// Stored `Arc` for `term` within document `id`
    #[inline]
    pub fn document_term(&self, id: DocId, term: &str) -> Option<&Term> {
        self.document_to_word_freqs
            .get(&id)
            .and_then(|freqs| freqs.get_key_value(term))
            .map(|(term, _)| term)
    }

    /// Number of live documents containing `term`
    #[inline]
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings(term).map_or(0, BTreeMap::len)
    }

    /// Number of distinct indexed terms
    pub fn term_count(&self) -> usize {
        self.word_to_document_freqs.len()
    }

    /// Both directions describe the same triples
    #[cfg(test)]
    pub(crate) fn is_mirrored(&self) -> bool {
        let forward_ok = self.document_to_word_freqs.iter().all(|(id, freqs)| {
            freqs.iter().all(|(term, freq)| {
                self.word_to_document_freqs
                    .get(term)
                    .and_then(|postings| postings.get(id))
                    == Some(freq)
            })
        });
        let inverse_ok = self.word_to_document_freqs.iter().all(|(term, postings)| {
            !postings.is_empty()
                && postings.iter().all(|(id, freq)| {
                    self.document_to_word_freqs
                        .get(id)
                        .and_then(|freqs| freqs.get(term))
                        == Some(freq)
                })
        });
        forward_ok && inverse_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InvertedIndex {
        let mut index = InvertedIndex::new();
        index.insert_document(1, &["white", "cat", "yellow", "hat"]);
        index.insert_document(2, &["curly", "cat", "curly", "tail"]);
        index
    }

    #[test]
    fn term_frequency_counts_repeats() {
        let index = sample();
        let freqs = index.word_frequencies(2).unwrap();
        assert_eq!(freqs.len(), 3);
        assert!((freqs["curly"] - 0.5).abs() < 1e-12);
        assert!((freqs["tail"] - 0.25).abs() < 1e-12);
        assert_eq!(index.document_frequency("cat"), 2);
        assert_eq!(index.document_frequency("dog"), 0);
        assert!(index.is_mirrored());
    }

    #[test]
    fn terms_share_one_allocation() {
        let index = sample();
        let in_one = index.document_term(1, "cat").unwrap();
        let in_two = index.document_term(2, "cat").unwrap();
        assert!(Arc::ptr_eq(in_one, in_two));
    }

    #[test]
    fn empty_document_has_no_postings() {
        let mut index = sample();
        index.insert_document(3, &[]);
        assert!(index.word_frequencies(3).is_none());
        assert!(index.remove_document(3, ExecutionPolicy::Sequential).is_none());
    }

    #[test]
    fn removal_purges_both_directions() {
        for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
            let mut index = sample();
            let removed = index.remove_document(2, policy).unwrap();
            assert_eq!(removed.len(), 3);
            assert!(index.word_frequencies(2).is_none());
            assert!(index.postings("curly").is_none());
            assert!(index.postings("tail").is_none());
            assert_eq!(index.document_frequency("cat"), 1);
            assert_eq!(index.term_count(), 4);
            assert!(index.is_mirrored());
            assert!(index.remove_document(2, policy).is_none());

            index.remove_document(1, policy).unwrap();
            assert_eq!(index.term_count(), 0);
            assert!(index.is_mirrored());
        }
    }
}
