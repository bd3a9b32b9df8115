use serde::{Deserialize, Serialize};

use super::{
    author::AuthorRecord, cover::first_cover, detail::ResolvedDetail,
    search_result::SearchResult,
};

/// Bookmarked item, stored with enough data to show a card without a
/// request.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavouriteEntry {
    pub key:                String,
    pub title:              String,
    #[serde(default)]
    pub author_name:        Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_i:            Option<i64>,
}

impl FavouriteEntry {
    /// Author keys are dropped, only display names are kept.
    pub fn from_detail(detail: &ResolvedDetail, authors: &[AuthorRecord]) -> Self {
        let record = &detail.record;
        Self {
            key:                detail.canonical_key.to_string(),
            title:              record.title.clone(),
            author_name:        authors
                .iter()
                .map(|a| a.display_name().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
            first_publish_year: record.publish_year(),
            cover_i:            first_cover(record.covers.as_deref()),
        }
    }
}

impl From<&SearchResult> for FavouriteEntry {
    fn from(result: &SearchResult) -> Self {
        Self {
            key:                result.key.clone(),
            title:              result.title.clone(),
            author_name:        result.author_name.clone().unwrap_or_default(),
            first_publish_year: result.first_publish_year,
            cover_i:            result.cover_i,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{detail::DetailRecord, key::CatalogKey};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn projection_of_resolved_detail() {
        let detail = ResolvedDetail {
            canonical_key: CatalogKey::from("/books/OL7353617M"),
            record:        DetailRecord {
                key: "/works/OL45804W".into(),
                title: "Fantastic Mr Fox".into(),
                covers: Some(vec![-1, 6498519]),
                first_publish_year: Some(1970),
                ..DetailRecord::default()
            },
        };
        let authors = vec![AuthorRecord {
            key: "/authors/OL34184A".into(),
            name: "Roald Dahl".into(),
            ..AuthorRecord::default()
        }];
        assert_eq!(
            FavouriteEntry::from_detail(&detail, &authors),
            FavouriteEntry {
                key:                "/books/OL7353617M".into(),
                title:              "Fantastic Mr Fox".into(),
                author_name:        vec!["Roald Dahl".into()],
                first_publish_year: Some(1970),
                cover_i:            Some(6498519),
            }
        );
    }

    #[test]
    fn detail_projection_takes_year_from_work_date() {
        let detail = ResolvedDetail {
            canonical_key: CatalogKey::from("/works/OL45804W"),
            record:        serde_json::from_value(json!({
                "key": "/works/OL45804W",
                "title": "Fantastic Mr Fox",
                "first_publish_date": "1970"
            }))
            .unwrap(),
        };
        let entry = FavouriteEntry::from_detail(&detail, &[]);
        assert_eq!(entry.first_publish_year, Some(1970));
    }

    #[test]
    fn stored_shape() {
        let entry = FavouriteEntry {
            key: "/works/OL1W".into(),
            title: "Dracula".into(),
            ..FavouriteEntry::default()
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"key": "/works/OL1W", "title": "Dracula", "author_name": []})
        );
    }
}
