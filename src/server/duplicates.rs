use std::collections::{BTreeSet, HashSet};

use crate::server::document::DocId;
use crate::server::index::Term;
use crate::server::SearchServer;

/// Remove documents whose set of words equals that of a lower id
///
/// Word frequencies are ignored, only the sets are compared. Documents
/// without words are never treated as duplicates. Returns the removed ids
/// in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocId> {
    let mut ids: Vec<DocId> = server.ids().collect();
    ids.sort_unstable();

    let mut seen: HashSet<BTreeSet<Term>> = HashSet::new();
    let mut duplicates = Vec::new();
    for id in ids {
        let freqs = server.word_frequencies(id);
        if freqs.is_empty() {
            continue;
        }
        let words: BTreeSet<Term> = freqs.keys().cloned().collect();
        if !seen.insert(words) {
            duplicates.push(id);
        }
    }

    for &id in &duplicates {
        server.remove_document(id);
        log::info!("Found duplicate document id {id}");
    }
    duplicates
}
