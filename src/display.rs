use std::fmt::Write;

use anyhow::Result;

use crate::{
    config::Config,
    traits::DisplayTerminal,
    types::{
        author::AuthorRecord,
        cover::{cover_url, first_cover, CoverSize},
        detail::ResolvedDetail,
        favourite::FavouriteEntry,
        search_result::SearchResult,
    },
};

pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_BIO: &str = "No bio available.";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const NO_RESULTS: &str = "No books found.";
pub const NO_FAVOURITES: &str = "You have no favourite books yet.";
pub const BOOK_NOT_FOUND: &str = "Book not found";
pub const BOOK_LOAD_FAILED: &str =
    "Failed to load book details. The book might not be available.";
pub const AUTHOR_LOAD_FAILED: &str = "Failed to load author details.";

/// Result card shared by search results and favourites.
fn fmt_card(
    f: &mut String,
    config: &Config,
    key: &str,
    title: &str,
    authors: &[String],
    year: Option<i32>,
    cover: Option<i64>,
) -> Result<()> {
    writeln!(
        f,
        "{} {}",
        config.output_title.format_str(title),
        config.output_key.format_str(key)
    )?;
    if authors.is_empty() {
        writeln!(f, "  {}", config.output_author.format_str(UNKNOWN_AUTHOR))?;
    } else {
        writeln!(f, "  {}", config.output_author.format_vec(authors))?;
    }
    if let Some(year) = year {
        writeln!(f, "  {}", config.output_year.format_str(year))?;
    }
    if let Some(cover) = cover {
        let url = cover_url(&config.covers_base_url, cover, CoverSize::Medium);
        writeln!(f, "  {}", config.output_cover.format_str(url))?;
    }
    Ok(())
}

impl DisplayTerminal for SearchResult {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        fmt_card(
            f,
            config,
            &self.key,
            &self.title,
            self.author_name.as_deref().unwrap_or_default(),
            self.first_publish_year,
            self.cover_i,
        )
    }
}

impl DisplayTerminal for FavouriteEntry {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        fmt_card(
            f,
            config,
            &self.key,
            &self.title,
            &self.author_name,
            self.first_publish_year,
            self.cover_i,
        )
    }
}

/// A resolved record together with its authors.
pub struct DetailView<'a> {
    pub detail:  &'a ResolvedDetail,
    pub authors: &'a [AuthorRecord],
}

impl DisplayTerminal for DetailView<'_> {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        let record = &self.detail.record;
        writeln!(
            f,
            "{} {}",
            config.output_title.format_str(&record.title),
            config.output_key.format_str(&self.detail.canonical_key)
        )?;
        if !self.authors.is_empty() {
            let names: Vec<String> = self
                .authors
                .iter()
                .map(|a| {
                    if a.is_navigable() {
                        format!("{} ({})", a.display_name(), a.key)
                    } else {
                        a.display_name().to_string()
                    }
                })
                .collect();
            writeln!(f, "{}", config.output_author.format_vec(names.as_slice()))?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            config
                .output_description
                .format_str(record.description().unwrap_or(NO_DESCRIPTION))
        )?;
        writeln!(f)?;
        if let Some(date) = &record.publish_date {
            writeln!(f, "{}", config.output_published.format_str(date))?;
        }
        if let Some(publishers) = record.publishers.as_deref().filter(|p| !p.is_empty()) {
            writeln!(f, "{}", config.output_publisher.format_vec(publishers))?;
        }
        if let Some(subjects) = record.subjects.as_deref().filter(|s| !s.is_empty()) {
            let shown = &subjects[..subjects.len().min(config.subject_limit)];
            writeln!(f, "{}", config.output_subject.format_vec(shown))?;
        }
        if let Some(cover) = first_cover(record.covers.as_deref()) {
            let url = cover_url(&config.covers_base_url, cover, CoverSize::Large);
            writeln!(f, "{}", config.output_cover.format_str(url))?;
        }
        Ok(())
    }
}

impl DisplayTerminal for AuthorRecord {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        writeln!(
            f,
            "{} {}",
            config.output_title.format_str(self.display_name()),
            config.output_key.format_str(&self.key)
        )?;
        if let Some(personal_name) = self.personal_name.as_ref().filter(|n| **n != self.name) {
            writeln!(f, "{}", config.output_lifespan.format_str(personal_name))?;
        }
        if self.birth_date.is_some() || self.death_date.is_some() {
            let lifespan = format!(
                "{} - {}",
                self.birth_date.as_deref().unwrap_or_default(),
                self.death_date.as_deref().unwrap_or_default()
            );
            writeln!(f, "{}", config.output_lifespan.format_str(lifespan.trim()))?;
        }
        if let Some(photo) = first_cover(self.photos.as_deref()) {
            let url = cover_url(&config.covers_base_url, photo, CoverSize::Large);
            writeln!(f, "{}", config.output_cover.format_str(url))?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            config.output_bio.format_str(self.bio().unwrap_or(NO_BIO))
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{detail::DetailRecord, key::CatalogKey, text::TextValue};

    fn detail(description: Option<TextValue>) -> ResolvedDetail {
        ResolvedDetail {
            canonical_key: CatalogKey::from("/works/OL45804W"),
            record:        DetailRecord {
                key: "/works/OL45804W".into(),
                title: "Fantastic Mr Fox".into(),
                description,
                subjects: Some((0..15).map(|i| format!("subject-{i}")).collect()),
                covers: Some(vec![6498519]),
                ..DetailRecord::default()
            },
        }
    }

    #[test]
    fn detail_uses_placeholder_and_subject_limit() {
        let config = Config::default();
        let detail = detail(None);
        let s = DetailView {
            detail:  &detail,
            authors: &[],
        }
        .fmt_to_string(&config)
        .unwrap();

        assert!(s.contains(NO_DESCRIPTION));
        assert!(s.contains("subject-9"));
        assert!(!s.contains("subject-10"));
        assert!(s.contains("https://covers.openlibrary.org/b/id/6498519-L.jpg"));
    }

    #[test]
    fn detail_marks_only_navigable_authors() {
        let config = Config::default();
        let detail = detail(Some(TextValue::Plain("A fox.".into())));
        let authors = vec![
            AuthorRecord {
                key: "/authors/OL34184A".into(),
                name: "Roald Dahl".into(),
                ..AuthorRecord::default()
            },
            AuthorRecord::synthetic(1, "Quentin Blake"),
        ];
        let s = DetailView {
            detail:  &detail,
            authors: &authors,
        }
        .fmt_to_string(&config)
        .unwrap();

        assert!(s.contains("A fox."));
        assert!(s.contains("Roald Dahl (/authors/OL34184A)"));
        assert!(s.contains("Quentin Blake"));
        assert!(!s.contains("author-1"));
    }

    #[test]
    fn card_without_authors() {
        let config = Config::default();
        let result = SearchResult {
            key: "/works/OL1W".into(),
            title: "Beowulf".into(),
            ..SearchResult::default()
        };
        let s = result.fmt_to_string(&config).unwrap();
        assert!(s.contains(UNKNOWN_AUTHOR));
    }

    #[test]
    fn author_without_bio() {
        let config = Config::default();
        let author = AuthorRecord {
            key: "/authors/OL1A".into(),
            name: "Homer".into(),
            ..AuthorRecord::default()
        };
        let s = author.fmt_to_string(&config).unwrap();
        assert!(s.contains(NO_BIO));
    }
}
