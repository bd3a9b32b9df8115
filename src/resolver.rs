use serde_json::Value;
use tracing::debug;

use crate::{
    catalog::{decode, CatalogClient},
    error::{FetchError, ResolutionError},
    types::{
        detail::{DetailRecord, ResolvedDetail},
        key::{CatalogKey, KeyKind},
    },
};

/// Resolves a route parameter into a detail record.
///
/// The id is tried as a work first and as a book/edition second. A book that
/// points at a parent work gets the work's fields merged over its own. Any
/// failure of the work lookup, transient or not, falls through to the book
/// lookup.
pub async fn resolve_detail<C: CatalogClient>(
    client: &C,
    raw_id: &str,
) -> Result<ResolvedDetail, ResolutionError> {
    let id = CatalogKey::from(raw_id.trim()).id().to_string();

    let work_key = CatalogKey::with_kind(KeyKind::Work, &id);
    match fetch_record(client, &work_key).await {
        Ok((_, record)) => {
            return Ok(ResolvedDetail {
                canonical_key: work_key,
                record,
            })
        }
        Err(e) => debug!("{work_key} is not a work ({e}), trying as a book."),
    }

    let book_key = CatalogKey::with_kind(KeyKind::Book, &id);
    let (book_value, book) = match fetch_record(client, &book_key).await {
        Ok(fetched) => fetched,
        Err(e) => {
            debug!("{book_key} is not a book either ({e}).");
            return Err(ResolutionError::NotFound { id });
        }
    };

    let record = match book.parent_work() {
        Some(parent) => {
            debug!("{book_key} belongs to {parent}, merging.");
            let work_value = client
                .get(&parent.json_path(), &[])
                .await
                .map_err(|source| ResolutionError::ParentWork {
                    work_key: parent.to_string(),
                    source,
                })?;
            let merged = shallow_merge(book_value, work_value);
            decode(&parent.json_path(), merged).map_err(|source| {
                ResolutionError::ParentWork {
                    work_key: parent.to_string(),
                    source,
                }
            })?
        }
        None => book,
    };

    Ok(ResolvedDetail {
        canonical_key: book_key,
        record,
    })
}

async fn fetch_record<C: CatalogClient>(
    client: &C,
    key: &CatalogKey,
) -> Result<(Value, DetailRecord), FetchError> {
    let path = key.json_path();
    let value = client.get(&path, &[]).await?;
    let record = decode(&path, value.clone())?;
    Ok((value, record))
}

/// Top-level fields of `over` replace those of `base`. Non-object values
/// leave `base` untouched.
fn shallow_merge(base: Value, over: Value) -> Value {
    match (base, over) {
        (Value::Object(mut base), Value::Object(over)) => {
            base.extend(over);
            Value::Object(base)
        }
        (base, _) => base,
    }
}
