use futures::future::join_all;
use tracing::warn;

use crate::{
    catalog::{fetch_author, CatalogClient},
    types::{
        author::AuthorRecord,
        detail::{AuthorSource, DetailRecord},
    },
};

/// Author records for a resolved detail record.
///
/// Referenced authors are fetched concurrently and every outcome is awaited
/// before failures are dropped, so one bad author never hides the others.
/// The result follows the order of the references. Records that only carry
/// flat author names get synthetic, non-navigable entries without any
/// request.
pub async fn resolve_authors<C: CatalogClient>(
    client: &C,
    record: &DetailRecord,
) -> Vec<AuthorRecord> {
    match record.author_source() {
        AuthorSource::References(keys) => {
            let outcomes = join_all(keys.iter().map(|key| fetch_author(client, key.as_str()))).await;
            keys.iter()
                .zip(outcomes)
                .filter_map(|(key, outcome)| match outcome {
                    Ok(author) => Some(author),
                    Err(e) => {
                        warn!("Skipping author {key}: {e}");
                        None
                    }
                })
                .collect()
        }
        AuthorSource::Names(names) => names
            .into_iter()
            .enumerate()
            .map(|(index, name)| AuthorRecord::synthetic(index, name))
            .collect(),
        AuthorSource::Empty => vec![],
    }
}
