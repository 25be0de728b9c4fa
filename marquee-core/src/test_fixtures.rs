//! Test fixtures for widget testing.
//!
//! Provides a scripted in-memory catalog with controllable latency and a
//! recording view observer, so widget behavior can be asserted under paused
//! tokio time without network access.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::catalog::{MovieCatalog, SearchOutcome};
use crate::errors::CatalogError;
use crate::movie::{Candidate, Detail, MovieId, Poster};
use crate::widget::{ViewObserver, WidgetView};

/// Scripted reply for one search term or lookup id.
#[derive(Debug, Clone)]
struct Reply<T> {
    delay: Duration,
    result: Result<T, CatalogError>,
}

/// In-memory catalog answering from scripted replies.
///
/// Unscripted terms answer `NoMatches`; unscripted ids answer `NotFound`.
/// Every call is recorded in order.
#[derive(Debug, Default)]
pub struct ScriptedCatalog {
    searches: Mutex<HashMap<String, Reply<SearchOutcome>>>,
    lookups: Mutex<HashMap<MovieId, Reply<Detail>>>,
    search_calls: Mutex<Vec<String>>,
    lookup_calls: Mutex<Vec<MovieId>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `term` with `candidates` after `delay`.
    pub fn with_matches(self, term: &str, candidates: Vec<Candidate>, delay: Duration) -> Self {
        self.searches.lock().insert(
            term.to_string(),
            Reply {
                delay,
                result: Ok(SearchOutcome::from_candidates(candidates)),
            },
        );
        self
    }

    /// Answers `term` with a catalog failure.
    pub fn with_search_failure(self, term: &str, error: CatalogError) -> Self {
        self.searches.lock().insert(
            term.to_string(),
            Reply {
                delay: Duration::ZERO,
                result: Err(error),
            },
        );
        self
    }

    /// Answers lookups of `detail.id` with `detail` after `delay`.
    pub fn with_detail(self, detail: Detail, delay: Duration) -> Self {
        self.lookups.lock().insert(
            detail.id.clone(),
            Reply {
                delay,
                result: Ok(detail),
            },
        );
        self
    }

    /// Terms searched so far, in call order.
    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().clone()
    }

    /// Ids looked up so far, in call order.
    pub fn lookup_calls(&self) -> Vec<MovieId> {
        self.lookup_calls.lock().clone()
    }
}

#[async_trait]
impl MovieCatalog for ScriptedCatalog {
    async fn search(&self, term: &str) -> Result<SearchOutcome, CatalogError> {
        self.search_calls.lock().push(term.to_string());
        let reply = self.searches.lock().get(term).cloned();

        match reply {
            Some(reply) => {
                tokio::time::sleep(reply.delay).await;
                reply.result
            }
            None => Ok(SearchOutcome::NoMatches),
        }
    }

    async fn lookup(&self, id: &MovieId) -> Result<Detail, CatalogError> {
        self.lookup_calls.lock().push(id.clone());
        let reply = self.lookups.lock().get(id).cloned();

        match reply {
            Some(reply) => {
                tokio::time::sleep(reply.delay).await;
                reply.result
            }
            None => Err(CatalogError::NotFound {
                reason: format!("no scripted detail for {id}"),
            }),
        }
    }
}

/// Observer that records every published view.
#[derive(Debug, Clone, Default)]
pub struct ViewRecorder {
    views: Arc<Mutex<Vec<WidgetView>>>,
}

impl ViewRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Views published so far, oldest first.
    pub fn views(&self) -> Vec<WidgetView> {
        self.views.lock().clone()
    }
}

impl ViewObserver for ViewRecorder {
    fn view_changed(&mut self, view: &WidgetView) {
        self.views.lock().push(view.clone());
    }
}

/// Builds a candidate with the given fields.
pub fn candidate(id: &str, title: &str, year: &str, poster: Poster) -> Candidate {
    Candidate {
        id: MovieId::new(id),
        title: title.to_string(),
        year: year.to_string(),
        poster,
    }
}

/// Two-entry result set for the term "bat", in catalog order.
pub fn batman_results() -> Vec<Candidate> {
    vec![
        candidate(
            "tt0096895",
            "Batman",
            "1989",
            Poster::Url("https://img.example/batman-1989.jpg".to_string()),
        ),
        candidate("tt0372784", "Batman Begins", "2005", Poster::Missing),
    ]
}

/// Full record for the second entry of [`batman_results`].
pub fn batman_begins_detail() -> Detail {
    Detail {
        id: MovieId::new("tt0372784"),
        title: "Batman Begins".to_string(),
        year: "2005".to_string(),
        poster: Poster::Missing,
        rated: "PG-13".to_string(),
        released: "15 Jun 2005".to_string(),
        genre: "Action, Crime, Drama".to_string(),
        writer: "Bob Kane, David S. Goyer, Christopher Nolan".to_string(),
        actors: "Christian Bale, Michael Caine, Ken Watanabe".to_string(),
        plot: concat!(
            "After witnessing his parents' death, ",
            "Bruce learns the art of fighting to confront injustice."
        )
        .to_string(),
        language: "English, Mandarin".to_string(),
        awards: "Nominated for 1 Oscar. 14 wins & 79 nominations total".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_catalog_records_calls() {
        let catalog =
            ScriptedCatalog::new().with_matches("bat", batman_results(), Duration::ZERO);

        let outcome = catalog.search("bat").await.unwrap();
        assert_eq!(outcome, SearchOutcome::Matches(batman_results()));
        assert_eq!(
            catalog.search("zzzznotreal").await.unwrap(),
            SearchOutcome::NoMatches
        );
        assert!(catalog.lookup(&MovieId::new("tt0")).await.is_err());

        assert_eq!(catalog.search_calls(), ["bat", "zzzznotreal"]);
        assert_eq!(catalog.lookup_calls(), [MovieId::new("tt0")]);
    }
}
