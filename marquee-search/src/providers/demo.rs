//! Bundled demo catalog for offline use.

use std::time::Duration;

use async_trait::async_trait;
use marquee_core::{
    Candidate, CatalogError, Detail, MovieCatalog, MovieId, Poster, SearchOutcome,
};

/// Maximum entries returned per search, matching one OMDb page.
const PAGE_SIZE: usize = 10;

/// Demo catalog for development and demonstrations.
///
/// Answers from a small built-in set of titles with a configurable simulated
/// latency, so the full widget flow works without an API key or network.
#[derive(Debug)]
pub struct DemoCatalog {
    titles: Vec<Detail>,
    latency: Duration,
}

impl DemoCatalog {
    /// Creates a demo catalog with the bundled titles and a short latency.
    pub fn new() -> Self {
        Self {
            titles: demo_titles(),
            latency: Duration::from_millis(150),
        }
    }

    /// Overrides the simulated latency of every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl Default for DemoCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieCatalog for DemoCatalog {
    async fn search(&self, term: &str) -> Result<SearchOutcome, CatalogError> {
        tokio::time::sleep(self.latency).await;

        let needle = term.trim().to_lowercase();
        let candidates = self
            .titles
            .iter()
            .filter(|detail| detail.title.to_lowercase().contains(&needle))
            .take(PAGE_SIZE)
            .map(|detail| Candidate {
                id: detail.id.clone(),
                title: detail.title.clone(),
                year: detail.year.clone(),
                poster: detail.poster.clone(),
            })
            .collect();

        Ok(SearchOutcome::from_candidates(candidates))
    }

    async fn lookup(&self, id: &MovieId) -> Result<Detail, CatalogError> {
        tokio::time::sleep(self.latency).await;

        self.titles
            .iter()
            .find(|detail| &detail.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                reason: "Incorrect IMDb ID.".to_string(),
            })
    }
}

#[allow(clippy::too_many_arguments)]
fn title(
    id: &str,
    name: &str,
    year: &str,
    rated: &str,
    released: &str,
    genre: &str,
    writer: &str,
    actors: &str,
    plot: &str,
) -> Detail {
    Detail {
        id: MovieId::new(id),
        title: name.to_string(),
        year: year.to_string(),
        poster: Poster::Missing,
        rated: rated.to_string(),
        released: released.to_string(),
        genre: genre.to_string(),
        writer: writer.to_string(),
        actors: actors.to_string(),
        plot: plot.to_string(),
        language: "English".to_string(),
        awards: "N/A".to_string(),
    }
}

fn demo_titles() -> Vec<Detail> {
    vec![
        title(
            "tt0096895",
            "Batman",
            "1989",
            "PG-13",
            "23 Jun 1989",
            "Action, Adventure",
            "Bob Kane, Sam Hamm, Warren Skaaren",
            "Michael Keaton, Jack Nicholson, Kim Basinger",
            "The Dark Knight of Gotham City begins his war on crime with his first major enemy being Jack Napier.",
        ),
        title(
            "tt0372784",
            "Batman Begins",
            "2005",
            "PG-13",
            "15 Jun 2005",
            "Action, Crime, Drama",
            "Bob Kane, David S. Goyer, Christopher Nolan",
            "Christian Bale, Michael Caine, Ken Watanabe",
            "After witnessing his parents' death, Bruce learns the art of fighting to confront injustice.",
        ),
        title(
            "tt0103776",
            "Batman Returns",
            "1992",
            "PG-13",
            "19 Jun 1992",
            "Action, Crime, Fantasy",
            "Bob Kane, Daniel Waters, Sam Hamm",
            "Michael Keaton, Danny DeVito, Michelle Pfeiffer",
            "While Batman deals with a deformed man calling himself the Penguin, an employee of a corrupt businessman transforms into the Catwoman.",
        ),
        title(
            "tt1877830",
            "The Batman",
            "2022",
            "PG-13",
            "04 Mar 2022",
            "Action, Crime, Drama",
            "Matt Reeves, Peter Craig, Bob Kane",
            "Robert Pattinson, Zoë Kravitz, Jeffrey Wright",
            "When a sadistic serial killer begins murdering key political figures in Gotham, Batman is forced to investigate.",
        ),
        title(
            "tt0133093",
            "The Matrix",
            "1999",
            "R",
            "31 Mar 1999",
            "Action, Sci-Fi",
            "Lilly Wachowski, Lana Wachowski",
            "Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss",
            "When a beautiful stranger leads computer hacker Neo to a forbidding underworld, he discovers the shocking truth.",
        ),
        title(
            "tt0076759",
            "Star Wars: Episode IV - A New Hope",
            "1977",
            "PG",
            "25 May 1977",
            "Action, Adventure, Fantasy",
            "George Lucas",
            "Mark Hamill, Harrison Ford, Carrie Fisher",
            "Luke Skywalker joins forces with a Jedi Knight, a cocky pilot, a Wookiee and two droids to save the galaxy.",
        ),
        title(
            "tt0903747",
            "Breaking Bad",
            "2008–2013",
            "TV-MA",
            "20 Jan 2008",
            "Crime, Drama, Thriller",
            "Vince Gilligan",
            "Bryan Cranston, Aaron Paul, Anna Gunn",
            "A chemistry teacher diagnosed with inoperable lung cancer turns to manufacturing methamphetamine.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_search_matches_title_substring() {
        let catalog = DemoCatalog::new();

        let SearchOutcome::Matches(found) = catalog.search("BAT").await.unwrap() else {
            panic!("expected matches");
        };
        let titles: Vec<_> = found.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Batman", "Batman Begins", "Batman Returns", "The Batman"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_term_has_no_matches() {
        let catalog = DemoCatalog::new().with_latency(Duration::ZERO);
        assert_eq!(
            catalog.search("zzzznotreal").await.unwrap(),
            SearchOutcome::NoMatches
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_by_id() {
        let catalog = DemoCatalog::new();

        let detail = catalog.lookup(&MovieId::new("tt0133093")).await.unwrap();
        assert_eq!(detail.title, "The Matrix");

        let err = catalog.lookup(&MovieId::new("tt0")).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }
}
