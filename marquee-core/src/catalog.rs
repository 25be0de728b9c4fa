//! Seam between the widget and the remote movie catalog.

use async_trait::async_trait;

use crate::errors::CatalogError;
use crate::movie::{Candidate, Detail, MovieId};

/// Result of a term search that reached the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// At least one title matched, in catalog order.
    Matches(Vec<Candidate>),
    /// Catalog reported no matches or answered with an unexpected shape.
    NoMatches,
}

impl SearchOutcome {
    /// Builds an outcome from a candidate list; an empty list means no matches.
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        if candidates.is_empty() {
            Self::NoMatches
        } else {
            Self::Matches(candidates)
        }
    }
}

/// Movie catalog queried by the widget.
///
/// Implementations provide the two lookups the widget needs through
/// different backends (the OMDb HTTP API, bundled demo data, scripted
/// catalogs for testing).
#[async_trait]
pub trait MovieCatalog: Send + Sync + std::fmt::Debug {
    /// Searches titles by free-text term.
    ///
    /// # Errors
    /// - `CatalogError::Transport` - Request could not be completed
    /// - `CatalogError::Status` - Catalog answered with a failure status
    /// - `CatalogError::Parse` - Body was not valid JSON
    async fn search(&self, term: &str) -> Result<SearchOutcome, CatalogError>;

    /// Fetches the full record for one title.
    ///
    /// # Errors
    /// - `CatalogError::Transport` - Request could not be completed
    /// - `CatalogError::Status` - Catalog answered with a failure status
    /// - `CatalogError::Parse` - Body was not valid JSON
    /// - `CatalogError::NotFound` - Catalog has no record for `id`
    async fn lookup(&self, id: &MovieId) -> Result<Detail, CatalogError>;
}
