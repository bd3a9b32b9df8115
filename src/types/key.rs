use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// What kind of catalog entity a key addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Work,
    Book,
    Author,
    Unknown,
}

impl KeyKind {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "works" => Some(KeyKind::Work),
            "books" => Some(KeyKind::Book),
            "authors" => Some(KeyKind::Author),
            _ => None,
        }
    }

    /// Open Library ids end in a letter naming their kind (`OL45804W`).
    fn from_id(id: &str) -> Self {
        if !id.starts_with("OL") {
            return KeyKind::Unknown;
        }
        match id.chars().last() {
            Some('W') => KeyKind::Work,
            Some('M') => KeyKind::Book,
            Some('A') => KeyKind::Author,
            _ => KeyKind::Unknown,
        }
    }

    pub fn segment(&self) -> Option<&'static str> {
        match self {
            KeyKind::Work => Some("works"),
            KeyKind::Book => Some("books"),
            KeyKind::Author => Some("authors"),
            KeyKind::Unknown => None,
        }
    }
}

/// Opaque catalog identifier such as `/works/OL45804W` or a bare `OL7353617M`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(String);

impl CatalogKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Builds `/{segment}/{id}` from a bare id.
    pub fn with_kind(kind: KeyKind, id: &str) -> Self {
        match kind.segment() {
            Some(segment) => Self(format!("/{segment}/{id}")),
            None => Self(id.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last path segment, i.e. the form used as a route parameter.
    pub fn id(&self) -> &str {
        self.0
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.0)
    }

    pub fn kind(&self) -> KeyKind {
        let mut segments = self.0.trim_matches('/').split('/');
        match (segments.next(), segments.next()) {
            (Some(segment), Some(_)) => {
                KeyKind::from_segment(segment).unwrap_or(KeyKind::Unknown)
            }
            _ => KeyKind::from_id(self.id()),
        }
    }

    /// Request path for the JSON document of this key.
    pub fn json_path(&self) -> String {
        let key = self.0.trim_end_matches('/');
        if key.starts_with('/') {
            format!("{key}.json")
        } else {
            format!("/{key}.json")
        }
    }
}

impl Display for CatalogKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CatalogKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
