use crate::server::document::DocId;

/// Coarse classification of a [`SearchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The server was constructed with bad input (a malformed stop word or option)
    Configuration,
    /// A document id, document word or query word was rejected
    InvalidArgument,
    /// The caller referred to a document that is not live
    NotFound,
}

/// Errors produced by the search server
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A stop word contains control characters
    #[error("stop word {0:?} is invalid")]
    InvalidStopWord(String),
    /// A construction option is out of range
    #[error("invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },
    /// Document id is negative or already in use
    #[error("invalid document id {0}")]
    InvalidDocumentId(DocId),
    /// A document word contains control characters
    #[error("word {0:?} is invalid")]
    InvalidWord(String),
    /// A raw query token is empty
    #[error("query word is empty")]
    EmptyQueryWord,
    /// A query word is empty after '-', starts with "--" or contains control characters
    #[error("query word {0:?} is invalid")]
    InvalidQueryWord(String),
    /// Document id is not live
    #[error("unknown document id {0}")]
    UnknownDocumentId(DocId),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::InvalidStopWord(_) | SearchError::InvalidOption { .. } => ErrorKind::Configuration,
            SearchError::InvalidDocumentId(_)
            | SearchError::InvalidWord(_)
            | SearchError::EmptyQueryWord
            | SearchError::InvalidQueryWord(_) => ErrorKind::InvalidArgument,
            SearchError::UnknownDocumentId(_) => ErrorKind::NotFound,
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(SearchError::InvalidStopWord("a\u{1}".into()).kind(), ErrorKind::Configuration);
        let option = SearchError::InvalidOption { name: "relevance_epsilon", reason: "NaN".into() };
        assert_eq!(option.kind(), ErrorKind::Configuration);
        assert_eq!(SearchError::InvalidDocumentId(-1).kind(), ErrorKind::InvalidArgument);
        assert_eq!(SearchError::EmptyQueryWord.kind(), ErrorKind::InvalidArgument);
        assert_eq!(SearchError::UnknownDocumentId(7).kind(), ErrorKind::NotFound);
    }

    #[test]
    fn messages_name_the_offender() {
        assert_eq!(SearchError::InvalidDocumentId(3).to_string(), "invalid document id 3");
        assert_eq!(SearchError::InvalidQueryWord("--cat".into()).to_string(), "query word \"--cat\" is invalid");
    }
}
