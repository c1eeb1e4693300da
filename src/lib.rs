/// This crate is an in-process full-text search engine with TF-IDF ranking.
pub mod server;
pub mod utils;

/// Search Server
/// The top-level struct of this crate. It indexes short text documents and
/// answers top-K queries with required and excluded words.
///
/// Internally, it holds:
/// - The stop words, fixed at construction
/// - An inverted index (term -> documents) and its forward mirror (document -> terms)
/// - Rating, status and text of every live document, in insertion order
///
/// Searches take `&self` and can run concurrently from many threads.
/// Adding and removing documents takes `&mut self`.
///
/// # Scoring
/// A document's relevance is the sum over the query's plus words of
/// `tf * ln(document_count / documents_containing_word)`.
/// Documents containing any minus word are dropped.
pub use server::SearchServer;

/// Construction-time settings: K of top-K, accumulator shard count and
/// relevance tie tolerance.
pub use server::{ServerOptions, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};

/// Document types
/// - `Document`: one search hit (id, relevance, rating)
/// - `DocumentStatus`: status checked by the default search predicates
/// - `DocumentData`: metadata stored for a live document
pub use server::document::{DocId, Document, DocumentData, DocumentStatus};

/// Error type of every fallible operation, and its coarse classification
pub use server::error::{ErrorKind, Result, SearchError};

/// Execution Policy
/// Chooses per call whether a search, match or removal runs on the calling
/// thread or on the rayon thread pool. Both give the same results.
pub use server::policy::ExecutionPolicy;

/// Parsed query with its plus and minus words
pub use server::evaluate::query::Query;

/// Result of `SearchServer::match_document`
pub use server::evaluate::scoring::MatchDocumentResult;

/// Batch search helpers running queries on the rayon thread pool
pub use server::batch::{process_queries, process_queries_joined};

/// Removes documents repeating the word set of a lower id
pub use server::duplicates::remove_duplicates;

/// Sharded, lock-striped map used to accumulate relevance during a search
/// Each shard has its own mutex; `access` returns a guard that holds the
/// shard lock until it is dropped.
pub use utils::datastruct::map::ConcurrentMap;
