use const_format::concatcp;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::FetchError,
    types::{
        author::AuthorRecord,
        key::{CatalogKey, KeyKind},
        search_result::{SearchResponse, SearchResult},
    },
};

pub const DEFAULT_API_BASE_URL: &str = "https://openlibrary.org";
pub const DEFAULT_COVERS_BASE_URL: &str = "https://covers.openlibrary.org";
pub const USER_AGENT: &str = concatcp!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Search responses are cut to this many documents.
pub const SEARCH_RESULT_CAP: usize = 20;

const SEARCH_PATH: &str = "/search.json";

/// Read-only access to the catalog service.
pub trait CatalogClient {
    /// GET `path` relative to the service root. Never retries.
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, FetchError>;
}

#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    client:   reqwest::Client,
    base_url: String,
}

impl OpenLibraryClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| FetchError::Transport {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl CatalogClient for OpenLibraryClient {
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

/// Decodes a response body, naming the offending field on failure.
pub fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, FetchError> {
    serde_path_to_error::deserialize(value).map_err(|e| FetchError::Decode {
        url:     path.to_string(),
        message: e.to_string(),
    })
}

pub async fn search<C: CatalogClient>(
    client: &C,
    query: &str,
) -> Result<Vec<SearchResult>, FetchError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(vec![]);
    }
    let value = client.get(SEARCH_PATH, &[("q", query)]).await?;
    let response: SearchResponse = decode(SEARCH_PATH, value)?;
    debug!(
        "Search for {query:?} matched {} documents.",
        response.num_found
    );
    Ok(response
        .docs
        .into_iter()
        .take(SEARCH_RESULT_CAP)
        .filter_map(|doc| match decode::<SearchResult>(SEARCH_PATH, doc) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Skipping malformed search result: {e}");
                None
            }
        })
        .collect())
}

/// Accepts a bare id (`OL23919A`) or a full key (`/authors/OL23919A`).
pub async fn fetch_author<C: CatalogClient>(
    client: &C,
    id: &str,
) -> Result<AuthorRecord, FetchError> {
    let key = CatalogKey::with_kind(KeyKind::Author, CatalogKey::from(id).id());
    let path = key.json_path();
    let value = client.get(&path, &[]).await?;
    decode(&path, value)
}

#[cfg(test)]
pub(crate) mod fake {
    use std::{collections::HashMap, sync::Mutex};

    use super::*;

    /// Serves canned bodies by path and records every request. Unknown paths
    /// answer 404.
    #[derive(Default)]
    pub(crate) struct FakeCatalog {
        responses: HashMap<String, Value>,
        requests:  Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        pub(crate) fn with(mut self, path: &str, body: Value) -> Self {
            self.responses.insert(path.to_string(), body);
            self
        }

        pub(crate) fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl CatalogClient for FakeCatalog {
        async fn get(&self, path: &str, _params: &[(&str, &str)]) -> Result<Value, FetchError> {
            self.requests.lock().unwrap().push(path.to_string());
            self.responses
                .get(path)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url:    path.to_string(),
                    status: 404,
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn get_returns_parsed_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/works/OL45804W.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"key": "/works/OL45804W", "title": "Fantastic Mr Fox"}"#)
            .create_async()
            .await;

        let client = OpenLibraryClient::new(server.url()).unwrap();
        let value = client.get("/works/OL45804W.json", &[]).await.unwrap();
        assert_eq!(value["title"], json!("Fantastic Mr Fox"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/works/missing.json")
            .with_status(404)
            .create_async()
            .await;

        let client = OpenLibraryClient::new(server.url()).unwrap();
        let err = client.get("/works/missing.json", &[]).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/works/OL1W.json")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = OpenLibraryClient::new(server.url()).unwrap();
        let err = client.get("/works/OL1W.json", &[]).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn search_encodes_query_and_caps_results() {
        let docs: Vec<Value> = (0..30)
            .map(|i| json!({"key": format!("/works/OL{i}W"), "title": format!("Book {i}")}))
            .collect();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/search.json")
            .match_query(Matcher::UrlEncoded("q".into(), "tom & jerry".into()))
            .with_status(200)
            .with_body(json!({"numFound": 30, "docs": docs}).to_string())
            .create_async()
            .await;

        let client = OpenLibraryClient::new(server.url()).unwrap();
        let results = search(&client, "  tom & jerry ").await.unwrap();
        assert_eq!(results.len(), SEARCH_RESULT_CAP);
        assert_eq!(results[0].key, "/works/OL0W");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn malformed_docs_past_the_cap_are_never_decoded() {
        let mut docs: Vec<Value> = (0..25)
            .map(|i| json!({"key": format!("/works/OL{i}W"), "title": format!("Book {i}")}))
            .collect();
        docs[22] = json!({"key": "/works/OL22W"});
        let catalog = fake::FakeCatalog::default().with(
            "/search.json",
            json!({"numFound": 25, "docs": docs}),
        );

        let results = search(&catalog, "dracula").await.unwrap();
        assert_eq!(results.len(), SEARCH_RESULT_CAP);
        assert_eq!(results[19].key, "/works/OL19W");
    }

    #[tokio::test]
    async fn malformed_doc_within_the_cap_is_skipped() {
        let catalog = fake::FakeCatalog::default().with(
            "/search.json",
            json!({"numFound": 3, "docs": [
                {"key": "/works/OL1W", "title": "Dracula"},
                {"key": "/works/OL2W", "title": 7},
                {"key": "/works/OL3W", "title": "Carmilla"}
            ]}),
        );

        let keys: Vec<String> = search(&catalog, "vampires")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.key)
            .collect();
        assert_eq!(keys, vec!["/works/OL1W", "/works/OL3W"]);
    }

    #[tokio::test]
    async fn blank_search_issues_no_request() {
        let catalog = fake::FakeCatalog::default();
        assert_eq!(search(&catalog, "   ").await.unwrap(), vec![]);
        assert!(catalog.requests().is_empty());
    }

    #[tokio::test]
    async fn fetch_author_accepts_full_key() {
        let catalog = fake::FakeCatalog::default().with(
            "/authors/OL23919A.json",
            json!({"key": "/authors/OL23919A", "name": "J. K. Rowling"}),
        );
        let author = fetch_author(&catalog, "/authors/OL23919A").await.unwrap();
        assert_eq!(author.name, "J. K. Rowling");
        assert_eq!(catalog.requests(), vec!["/authors/OL23919A.json"]);
    }

    #[test]
    fn decode_names_the_bad_field() {
        let err = decode::<AuthorRecord>("/authors/x.json", json!({"key": 3})).unwrap_err();
        match err {
            FetchError::Decode { message, .. } => assert!(message.contains("key")),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
