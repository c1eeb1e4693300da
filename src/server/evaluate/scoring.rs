use std::collections::BTreeMap;

use crate::server::document::{DocId, Document, DocumentStatus};
use crate::server::error::{Result, SearchError};
use crate::server::evaluate::query::Query;
use crate::server::index::{Postings, Term};
use crate::server::policy::ExecutionPolicy;
use crate::server::SearchServer;
use crate::utils::datastruct::map::ConcurrentMap;
use crate::utils::sort::sort_desc_with_tolerance;

/// Words of the query found in a document, and the document's status
/// The word list is empty when the document contains any excluded word.
pub type MatchDocumentResult = (Vec<Term>, DocumentStatus);

/// Top-K search
impl SearchServer {
    /// Search `Actual` documents, sequentially
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    /// Search documents with the given status, sequentially
    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, move |_, document_status, _| document_status == status)
    }

    /// Search documents admitted by `predicate(id, status, rating)`, sequentially
    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    /// Search documents admitted by `predicate(id, status, rating)`
    ///
    /// Results are ordered by descending relevance. Relevances closer than
    /// the configured epsilon are ordered by descending rating. At most
    /// `max_result_count` documents are returned.
    pub fn find_top_documents_with<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = self.parse_query(raw_query, policy)?;
        let mut matched = self.find_all_documents(&query, &predicate, policy);
        sort_desc_with_tolerance(
            &mut matched,
            self.options.relevance_epsilon,
            |doc| doc.relevance,
            |a, b| b.rating.cmp(&a.rating),
        );
        matched.truncate(self.options.max_result_count);
        Ok(matched)
    }

    /// Score every admitted document containing a plus word
    /// Documents containing a minus word are dropped whatever the predicate says.
    fn find_all_documents<P>(&self, query: &Query<'_>, predicate: &P, policy: ExecutionPolicy) -> Vec<Document>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let relevance: BTreeMap<DocId, f64> = match policy {
            ExecutionPolicy::Sequential => {
                let mut relevance = BTreeMap::new();
                for word in &query.plus_words {
                    self.for_each_weighted_posting(word, predicate, |id, score| {
                        *relevance.entry(id).or_default() += score;
                    });
                }
                for word in &query.minus_words {
                    for id in self.index.postings(word).into_iter().flat_map(Postings::keys) {
                        relevance.remove(id);
                    }
                }
                relevance
            }
            ExecutionPolicy::Parallel => {
                let relevance: ConcurrentMap<DocId, f64> = ConcurrentMap::new(self.options.shard_count);
                policy.for_each(&query.plus_words, |word| {
                    self.for_each_weighted_posting(word, predicate, |id, score| {
                        *relevance.access(id) += score;
                    });
                });
                policy.for_each(&query.minus_words, |word| {
                    for &id in self.index.postings(word).into_iter().flat_map(Postings::keys) {
                        relevance.erase(id);
                    }
                });
                relevance.into_ordinary_map()
            }
        };

        let matched: Vec<Document> = relevance
            .into_iter()
            .filter_map(|(id, score)| {
                self.documents
                    .get(&id)
                    .map(|data| Document::new(id, score, data.rating))
            })
            .collect();
        log::trace!("query matched {} documents", matched.len());
        matched
    }

    /// Call `f(id, tf * idf)` for every admitted posting of `word`
    fn for_each_weighted_posting<P, F>(&self, word: &str, predicate: &P, mut f: F)
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
        F: FnMut(DocId, f64),
    {
        let Some(postings) = self.index.postings(word) else {
            return;
        };
        let idf = self.inverse_document_freq(postings.len());
        for (&id, &term_freq) in postings {
            let Some(data) = self.documents.get(&id) else {
                continue;
            };
            if predicate(id, data.status, data.rating) {
                f(id, term_freq * idf);
            }
        }
    }

    /// ln(document count / documents containing the term)
    #[inline]
    fn inverse_document_freq(&self, document_frequency: usize) -> f64 {
        (self.document_count() as f64 / document_frequency as f64).ln()
    }

    /// Parallel traversal gets a sorted query
    fn parse_query<'q>(&self, raw_query: &'q str, policy: ExecutionPolicy) -> Result<Query<'q>> {
        let query = Query::parse(raw_query, &self.stop_words)?;
        Ok(if policy.is_parallel() { query.sorted() } else { query })
    }
}

/// Per-document matching
impl SearchServer {
    /// Which query words occur in document `id`, sequentially
    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<MatchDocumentResult> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, id)
    }

    /// Which query words occur in document `id`
    ///
    /// Fails with `UnknownDocumentId` if `id` is not live. Sequential mode
    /// lists words in query order, parallel mode in sorted order.
    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocId,
    ) -> Result<MatchDocumentResult> {
        let status = self
            .documents
            .get(&id)
            .map(|data| data.status)
            .ok_or(SearchError::UnknownDocumentId(id))?;
        let query = self.parse_query(raw_query, policy)?;

        let has_minus = policy.any(&query.minus_words, |word| {
            self.index.document_term(id, word).is_some()
        });
        if has_minus {
            return Ok((Vec::new(), status));
        }

        let words = policy.filter_map(&query.plus_words, |word| {
            self.index.document_term(id, word).cloned()
        });
        Ok((words, status))
    }
}
