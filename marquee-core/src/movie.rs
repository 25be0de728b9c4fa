//! Movie records shared by the catalog and the widget.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Image reference shown when a title has no poster.
pub const PLACEHOLDER_POSTER: &str = "image_not_found.png";

/// Sentinel the catalog uses for fields it has no value for.
const NOT_AVAILABLE: &str = "N/A";

/// Opaque catalog identifier for a title (an IMDb id for OMDb).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    /// Wraps a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as sent to the catalog.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Poster image for a title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Poster {
    /// Remote image location.
    Url(String),
    /// Catalog has no poster; rendered as [`PLACEHOLDER_POSTER`].
    #[default]
    Missing,
}

impl Poster {
    /// Builds a poster from the catalog's raw field.
    ///
    /// An absent field, a blank value and the catalog's `"N/A"` sentinel all
    /// map to [`Poster::Missing`].
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(url) if !url.is_empty() && url != NOT_AVAILABLE => Self::Url(url.to_string()),
            _ => Self::Missing,
        }
    }

    /// Image reference to render: the poster URL or the placeholder.
    pub fn display_source(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::Missing => PLACEHOLDER_POSTER,
        }
    }
}

/// One search result before its full record has been fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Identifier, unique within one result set
    pub id: MovieId,
    /// Display title
    pub title: String,
    /// Display year exactly as the catalog reports it
    pub year: String,
    /// Poster or placeholder
    pub poster: Poster,
}

impl Candidate {
    /// Numeric year used for ordering.
    ///
    /// Reads the leading integer of the year text, so ranges such as
    /// `"2019–2021"` order by their first year. Returns `None` when the text
    /// has no leading digits.
    pub fn numeric_year(&self) -> Option<i64> {
        leading_integer(&self.year)
    }
}

/// Fully fetched record for one selected title.
///
/// Fields are carried as the catalog sent them; a missing field is empty text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Detail {
    /// Identifier of the title
    pub id: MovieId,
    /// Display title
    pub title: String,
    /// Display year
    pub year: String,
    /// Poster or placeholder
    pub poster: Poster,
    /// Content rating
    pub rated: String,
    /// Release date
    pub released: String,
    /// Genre list
    pub genre: String,
    /// Writer credits
    pub writer: String,
    /// Main cast
    pub actors: String,
    /// Plot summary
    pub plot: String,
    /// Spoken languages
    pub language: String,
    /// Awards text
    pub awards: String,
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;

    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate_with_year(year: &str) -> Candidate {
        Candidate {
            id: MovieId::new("tt0000001"),
            title: "Example".to_string(),
            year: year.to_string(),
            poster: Poster::Missing,
        }
    }

    #[test]
    fn test_poster_sentinel_maps_to_placeholder() {
        assert_eq!(Poster::from_raw(Some("N/A")), Poster::Missing);
        assert_eq!(Poster::from_raw(Some("  ")), Poster::Missing);
        assert_eq!(Poster::from_raw(None), Poster::Missing);
        assert_eq!(Poster::Missing.display_source(), PLACEHOLDER_POSTER);

        let poster = Poster::from_raw(Some("https://img.example/batman.jpg"));
        assert_eq!(poster.display_source(), "https://img.example/batman.jpg");
    }

    #[test]
    fn test_numeric_year_reads_leading_digits() {
        assert_eq!(candidate_with_year("1989").numeric_year(), Some(1989));
        assert_eq!(candidate_with_year("2019–2021").numeric_year(), Some(2019));
        assert_eq!(candidate_with_year("2005-").numeric_year(), Some(2005));
        assert_eq!(candidate_with_year(" 1999").numeric_year(), Some(1999));
        assert_eq!(candidate_with_year("N/A").numeric_year(), None);
        assert_eq!(candidate_with_year("").numeric_year(), None);
    }

    #[test]
    fn test_detail_without_poster_uses_placeholder() {
        let detail = Detail::default();
        assert_eq!(detail.poster.display_source(), PLACEHOLDER_POSTER);
    }
}
