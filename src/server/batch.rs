//! Batch searching on the rayon pool.

use rayon::prelude::*;

use crate::server::document::Document;
use crate::server::error::Result;
use crate::server::SearchServer;

/// Run `find_top_documents` for every query in parallel
/// Results keep the order of `queries`. If any query fails, one of the errors is returned.
pub fn process_queries<Q>(server: &SearchServer, queries: &[Q]) -> Result<Vec<Vec<Document>>>
where
    Q: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| server.find_top_documents(query.as_ref()))
        .collect()
}

/// Like [`process_queries`], flattened into one list in query order
pub fn process_queries_joined<Q>(server: &SearchServer, queries: &[Q]) -> Result<Vec<Document>>
where
    Q: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}
