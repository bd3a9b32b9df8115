use serde::{Deserialize, Serialize};

use super::{
    key::{CatalogKey, KeyKind},
    text::TextValue,
};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub key:           String,
    #[serde(default)]
    pub name:          String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date:    Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date:    Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio:           Option<TextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos:        Option<Vec<i64>>,
}

impl AuthorRecord {
    /// Stand-in for an author known only by name.
    pub fn synthetic(index: usize, name: impl Into<String>) -> Self {
        Self {
            key: format!("author-{index}"),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn display_name(&self) -> &str {
        match (&self.name, &self.personal_name) {
            (name, Some(personal)) if name.is_empty() => personal,
            (name, _) => name,
        }
    }

    /// Only records fetched from the catalog can be opened as an author view.
    pub fn is_navigable(&self) -> bool {
        CatalogKey::from(self.key.as_str()).kind() == KeyKind::Author
    }

    pub fn bio(&self) -> Option<&str> {
        TextValue::normalize(self.bio.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decodes_catalog_author() {
        let author: AuthorRecord = serde_json::from_value(json!({
            "key": "/authors/OL23919A",
            "name": "J. K. Rowling",
            "personal_name": "Joanne Rowling",
            "birth_date": "31 July 1965",
            "bio": {"type": "/type/text", "value": "British author."},
            "photos": [5543033, -1]
        }))
        .unwrap();
        assert_eq!(author.bio(), Some("British author."));
        assert!(author.is_navigable());
        assert_eq!(author.display_name(), "J. K. Rowling");
    }

    #[test]
    fn synthetic_authors_are_not_navigable() {
        let author = AuthorRecord::synthetic(1, "Jane Doe");
        assert_eq!(author.key, "author-1");
        assert!(!author.is_navigable());
    }

    #[test]
    fn display_name_falls_back_to_personal_name() {
        let author = AuthorRecord {
            key: "/authors/OL1A".into(),
            personal_name: Some("Mary Shelley".into()),
            ..AuthorRecord::default()
        };
        assert_eq!(author.display_name(), "Mary Shelley");
    }
}
