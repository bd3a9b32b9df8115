use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One document of the search endpoint's `docs` array.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub key:                String,
    pub title:              String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name:        Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_i:            Option<i64>,
}

/// Documents stay undecoded so that only the ones shown are ever checked.
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default, rename = "numFound")]
    pub num_found: u64,
    #[serde(default)]
    pub docs:      Vec<Value>,
}
