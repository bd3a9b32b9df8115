#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    pub fn code(&self) -> char {
        match self {
            CoverSize::Small => 'S',
            CoverSize::Medium => 'M',
            CoverSize::Large => 'L',
        }
    }
}

/// Image URL for a cover or author photo id.
pub fn cover_url(base: &str, id: i64, size: CoverSize) -> String {
    format!(
        "{}/b/id/{id}-{}.jpg",
        base.trim_end_matches('/'),
        size.code()
    )
}

/// Open Library marks missing covers with `-1`.
pub fn first_cover(ids: Option<&[i64]>) -> Option<i64> {
    ids.and_then(|ids| ids.iter().copied().find(|id| *id > 0))
}
