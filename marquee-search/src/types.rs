//! Wire types of the OMDb API and their conversion into movie records.

use marquee_core::{Candidate, Detail, MovieId, Poster, SearchOutcome};
use serde::{Deserialize, Serialize};

/// Value of the `Response` field on success.
const RESPONSE_TRUE: &str = "True";

/// Response from OMDb for a term search (`?s=`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbSearchResponse {
    /// Matching titles, absent when nothing matched
    #[serde(rename = "Search")]
    pub search: Option<Vec<OmdbSearchEntry>>,
    /// Total match count across all pages
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
    /// API response status ("True" or "False")
    #[serde(rename = "Response")]
    pub response: Option<String>,
    /// Error message if the search failed or matched nothing
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

/// One entry of a term search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbSearchEntry {
    /// Title of the media item
    #[serde(rename = "Title")]
    pub title: Option<String>,
    /// Release year or year range
    #[serde(rename = "Year")]
    pub year: Option<String>,
    /// IMDb identifier
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    /// Media type (movie, series, episode)
    #[serde(rename = "Type")]
    pub media_type: Option<String>,
    /// URL to poster image or "N/A"
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
}

/// Response from OMDb for a title lookup (`?i=`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OmdbTitleResponse {
    /// Title of the media item
    #[serde(rename = "Title")]
    pub title: Option<String>,
    /// Release year or year range
    #[serde(rename = "Year")]
    pub year: Option<String>,
    /// Content rating
    #[serde(rename = "Rated")]
    pub rated: Option<String>,
    /// Release date
    #[serde(rename = "Released")]
    pub released: Option<String>,
    /// Genre classification
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    /// Writer credits
    #[serde(rename = "Writer")]
    pub writer: Option<String>,
    /// Main cast
    #[serde(rename = "Actors")]
    pub actors: Option<String>,
    /// Plot summary
    #[serde(rename = "Plot")]
    pub plot: Option<String>,
    /// Spoken languages
    #[serde(rename = "Language")]
    pub language: Option<String>,
    /// Awards text
    #[serde(rename = "Awards")]
    pub awards: Option<String>,
    /// URL to poster image or "N/A"
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
    /// IMDb identifier
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    /// API response status ("True" or "False")
    #[serde(rename = "Response")]
    pub response: Option<String>,
    /// Error message if the lookup failed
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    /// Converts the response into a search outcome.
    ///
    /// Anything but a successful response whose entries all carry an id and
    /// a title is treated as no matches.
    pub fn into_outcome(self) -> SearchOutcome {
        if self.response.as_deref() != Some(RESPONSE_TRUE) {
            tracing::debug!(error = ?self.error, "Catalog reported no matches");
            return SearchOutcome::NoMatches;
        }

        let entries = self.search.unwrap_or_default();
        let candidates: Option<Vec<Candidate>> =
            entries.into_iter().map(OmdbSearchEntry::into_candidate).collect();

        match candidates {
            Some(candidates) => SearchOutcome::from_candidates(candidates),
            None => {
                tracing::warn!("Search entry without id or title, treating as no matches");
                SearchOutcome::NoMatches
            }
        }
    }
}

impl OmdbSearchEntry {
    fn into_candidate(self) -> Option<Candidate> {
        Some(Candidate {
            id: MovieId::new(self.imdb_id?),
            title: self.title?,
            year: self.year.unwrap_or_default(),
            poster: Poster::from_raw(self.poster.as_deref()),
        })
    }
}

impl OmdbTitleResponse {
    /// Whether OMDb flagged the lookup as failed.
    pub fn is_failure(&self) -> bool {
        self.response.as_deref() == Some("False")
    }

    /// Converts the record into a detail, keeping field text as sent.
    ///
    /// `requested` fills in the id when the record omits it.
    pub fn into_detail(self, requested: &MovieId) -> Detail {
        Detail {
            id: self
                .imdb_id
                .map(MovieId::new)
                .unwrap_or_else(|| requested.clone()),
            title: self.title.unwrap_or_default(),
            year: self.year.unwrap_or_default(),
            poster: Poster::from_raw(self.poster.as_deref()),
            rated: self.rated.unwrap_or_default(),
            released: self.released.unwrap_or_default(),
            genre: self.genre.unwrap_or_default(),
            writer: self.writer.unwrap_or_default(),
            actors: self.actors.unwrap_or_default(),
            plot: self.plot.unwrap_or_default(),
            language: self.language.unwrap_or_default(),
            awards: self.awards.unwrap_or_default(),
        }
    }
}
