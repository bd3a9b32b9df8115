use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::{key::CatalogKey, text::TextValue};

/// Work or edition document as returned by `/works/{id}.json` and
/// `/books/{id}.json`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub key:                String,
    pub title:              String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors:            Option<Vec<AuthorReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name:        Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description:        Option<TextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date:       Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covers:             Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects:           Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishers:         Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub works:              Option<Vec<WorkReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,
}

/// Works nest the author key under a role entry, editions list it directly.
/// Entries of any other shape are kept as `Unknown` so they cannot fail the
/// whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorReference {
    Role { author: KeyReference },
    Direct(KeyReference),
    Unknown(Value),
}

impl AuthorReference {
    pub fn key(&self) -> Option<&str> {
        match self {
            AuthorReference::Role { author } => Some(author.key.as_str()),
            AuthorReference::Direct(reference) => Some(reference.key.as_str()),
            AuthorReference::Unknown(_) => None,
        }
        .filter(|key| !key.is_empty())
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyReference {
    pub key: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkReference {
    pub key: String,
}

/// Where a record's author information comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorSource {
    References(Vec<CatalogKey>),
    Names(Vec<String>),
    Empty,
}

impl DetailRecord {
    pub fn author_source(&self) -> AuthorSource {
        match (&self.authors, &self.author_name) {
            (Some(references), _) => AuthorSource::References(
                references
                    .iter()
                    .filter_map(|r| match r.key() {
                        Some(key) => Some(CatalogKey::new(key)),
                        None => {
                            warn!("Skipping author reference without a key: {r:?}");
                            None
                        }
                    })
                    .collect(),
            ),
            (None, Some(names)) => AuthorSource::Names(names.clone()),
            (None, None) => AuthorSource::Empty,
        }
    }

    pub fn parent_work(&self) -> Option<CatalogKey> {
        self.works
            .as_ref()
            .and_then(|works| works.first())
            .filter(|work| !work.key.is_empty())
            .map(|work| CatalogKey::new(work.key.as_str()))
    }

    pub fn description(&self) -> Option<&str> {
        TextValue::normalize(self.description.as_ref())
    }

    /// Search documents carry a numeric year, works and editions only
    /// free-text dates such as "October 1, 1988".
    pub fn publish_year(&self) -> Option<i32> {
        self.first_publish_year.or_else(|| {
            [&self.first_publish_date, &self.publish_date]
                .into_iter()
                .flatten()
                .find_map(|date| year_in(date))
        })
    }
}

/// First run of exactly four digits in a free-text date.
fn year_in(date: &str) -> Option<i32> {
    date.split(|c: char| !c.is_ascii_digit())
        .find(|run| run.len() == 4)
        .and_then(|run| run.parse().ok())
}

/// A record after the resolver's fallback chain, addressed by the key the
/// caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDetail {
    pub canonical_key: CatalogKey,
    pub record:        DetailRecord,
}
