use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-assigned document id. Negative ids are rejected on insert.
pub type DocId = i32;

/// Document status, checked by the default search predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// current document, searched by default
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// A single search hit
/// relevance is the accumulated TF-IDF score, rating is the document's average rating
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self {
        Self { id, relevance, rating }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Metadata kept for every live document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
    /// text as passed to `add_document`
    pub text: Box<str>,
}

impl DocumentData {
    pub fn new(ratings: &[i32], status: DocumentStatus, text: &str) -> Self {
        Self {
            rating: compute_average_rating(ratings),
            status,
            text: Box::from(text),
        }
    }
}

/// Mean of `ratings` truncated toward zero, 0 for an empty slice
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    // i64 sum: a long list of large ratings must not overflow
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    (sum / ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rating_truncates_toward_zero() {
        assert_eq!(compute_average_rating(&[]), 0);
        assert_eq!(compute_average_rating(&[1, 2]), 1);
        assert_eq!(compute_average_rating(&[7, 2, 7]), 5);
        assert_eq!(compute_average_rating(&[-1, -2]), -1);
        assert_eq!(compute_average_rating(&[i32::MAX, i32::MAX]), i32::MAX);
    }

    #[test]
    fn default_status_is_actual() {
        assert_eq!(DocumentStatus::default(), DocumentStatus::Actual);
    }

    #[test]
    fn document_display() {
        let doc = Document::new(2, 0.5, 3);
        assert_eq!(doc.to_string(), "{ document_id = 2, relevance = 0.5, rating = 3 }");
    }
}
