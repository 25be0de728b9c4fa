//! Re-ordering of the fetched candidate list.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::movie::Candidate;

/// Ordering requested by the filter control.
///
/// Unknown keys are kept verbatim and leave the fetch order untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Ascending numeric year
    OldestToNewest,
    /// Descending numeric year
    NewestToOldest,
    /// Ascending title
    AToZ,
    /// Descending title
    ZToA,
    /// Any other key; preserves catalog order
    Unrecognized(String),
}

impl SortKey {
    /// Wire name used by the filter control.
    pub fn as_str(&self) -> &str {
        match self {
            SortKey::OldestToNewest => "Oldest_To_Newest",
            SortKey::NewestToOldest => "Newest_To_Oldest",
            SortKey::AToZ => "A_To_Z",
            SortKey::ZToA => "Z_To_A",
            SortKey::Unrecognized(raw) => raw,
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Oldest_To_Newest" => SortKey::OldestToNewest,
            "Newest_To_Oldest" => SortKey::NewestToOldest,
            "A_To_Z" => SortKey::AToZ,
            "Z_To_A" => SortKey::ZToA,
            other => SortKey::Unrecognized(other.to_string()),
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns a stably sorted copy of `candidates`; the input is never reordered.
pub fn sorted(candidates: &[Candidate], key: &SortKey) -> Vec<Candidate> {
    let mut ordered = candidates.to_vec();

    match key {
        SortKey::OldestToNewest => ordered.sort_by(|a, b| compare_years(a, b, false)),
        SortKey::NewestToOldest => ordered.sort_by(|a, b| compare_years(a, b, true)),
        SortKey::AToZ => ordered.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortKey::ZToA => ordered.sort_by(|a, b| compare_titles(&b.title, &a.title)),
        SortKey::Unrecognized(_) => {}
    }

    ordered
}

// Titles without a numeric year go last in both directions.
fn compare_years(a: &Candidate, b: &Candidate, descending: bool) -> Ordering {
    match (a.numeric_year(), b.numeric_year()) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive title comparison; lowercase sorts first among titles
/// that differ only by case.
fn compare_titles(a: &str, b: &str) -> Ordering {
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    folded.then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map_or(Ordering::Equal, |(x, y)| {
                x.is_uppercase().cmp(&y.is_uppercase())
            })
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::movie::{MovieId, Poster};

    fn movie(id: &str, title: &str, year: &str) -> Candidate {
        Candidate {
            id: MovieId::new(id),
            title: title.to_string(),
            year: year.to_string(),
            poster: Poster::Missing,
        }
    }

    fn titles(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.title.as_str()).collect()
    }

    fn sample() -> Vec<Candidate> {
        vec![
            movie("tt1", "batman Returns", "1992"),
            movie("tt2", "Batman", "1989"),
            movie("tt3", "The Batman", "2022"),
            movie("tt4", "Batman Begins", "2005"),
        ]
    }

    #[test]
    fn test_parse_known_and_unknown_keys() {
        assert_eq!("A_To_Z".parse::<SortKey>().unwrap(), SortKey::AToZ);
        assert_eq!(
            "Oldest_To_Newest".parse::<SortKey>().unwrap(),
            SortKey::OldestToNewest
        );
        let unknown: SortKey = "Rating".parse().unwrap();
        assert_eq!(unknown, SortKey::Unrecognized("Rating".to_string()));
        assert_eq!(unknown.as_str(), "Rating");
    }

    #[test]
    fn test_year_orderings() {
        let movies = sample();

        let oldest = sorted(&movies, &SortKey::OldestToNewest);
        assert_eq!(
            titles(&oldest),
            ["Batman", "batman Returns", "Batman Begins", "The Batman"]
        );

        let newest = sorted(&movies, &SortKey::NewestToOldest);
        assert_eq!(
            titles(&newest),
            ["The Batman", "Batman Begins", "batman Returns", "Batman"]
        );
    }

    #[test]
    fn test_title_orderings_ignore_case() {
        let movies = sample();

        let a_to_z = sorted(&movies, &SortKey::AToZ);
        assert_eq!(
            titles(&a_to_z),
            ["Batman", "Batman Begins", "batman Returns", "The Batman"]
        );

        let z_to_a = sorted(&movies, &SortKey::ZToA);
        assert_eq!(
            titles(&z_to_a),
            ["The Batman", "batman Returns", "Batman Begins", "Batman"]
        );
    }

    #[test]
    fn test_lowercase_first_on_case_only_difference() {
        assert_eq!(compare_titles("alien", "Alien"), Ordering::Less);
        assert_eq!(compare_titles("Alien", "alien"), Ordering::Greater);
        assert_eq!(compare_titles("Alien", "Alien"), Ordering::Equal);
    }

    #[test]
    fn test_equal_years_keep_fetch_order() {
        let movies = vec![
            movie("tt1", "First", "2000"),
            movie("tt2", "Second", "2000"),
            movie("tt3", "Older", "1990"),
        ];

        let ordered = sorted(&movies, &SortKey::NewestToOldest);
        assert_eq!(titles(&ordered), ["First", "Second", "Older"]);
    }

    #[test]
    fn test_non_numeric_years_sort_last() {
        let movies = vec![
            movie("tt1", "Unknown", "N/A"),
            movie("tt2", "Series", "2019–2021"),
            movie("tt3", "Film", "2001"),
        ];

        let oldest = sorted(&movies, &SortKey::OldestToNewest);
        assert_eq!(titles(&oldest), ["Film", "Series", "Unknown"]);

        let newest = sorted(&movies, &SortKey::NewestToOldest);
        assert_eq!(titles(&newest), ["Series", "Film", "Unknown"]);
    }

    #[test]
    fn test_unrecognized_key_preserves_order() {
        let movies = sample();
        let ordered = sorted(&movies, &SortKey::Unrecognized("Rating".to_string()));
        assert_eq!(ordered, movies);
    }

    fn arb_candidates() -> impl Strategy<Value = Vec<Candidate>> {
        prop::collection::vec(("[A-Za-z ]{1,12}", 1900u16..2030), 0..12).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (title, year))| movie(&format!("tt{i}"), &title, &year.to_string()))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_sorting_is_deterministic(movies in arb_candidates(), key in 0usize..5) {
            let key = [
                SortKey::OldestToNewest,
                SortKey::NewestToOldest,
                SortKey::AToZ,
                SortKey::ZToA,
                SortKey::Unrecognized("none".to_string()),
            ][key].clone();

            prop_assert_eq!(sorted(&movies, &key), sorted(&movies, &key));
        }

        #[test]
        fn prop_sorting_never_mutates_source(movies in arb_candidates()) {
            let original = movies.clone();
            for key in [SortKey::AToZ, SortKey::NewestToOldest, SortKey::ZToA] {
                let _ = sorted(&movies, &key);
            }
            let restored = sorted(&movies, &SortKey::Unrecognized(String::new()));
            prop_assert_eq!(restored, original);
        }

        #[test]
        fn prop_year_directions_reverse_without_ties(
            years in prop::collection::hash_set(1900u16..2030, 0..12)
        ) {
            let movies: Vec<Candidate> = years
                .into_iter()
                .enumerate()
                .map(|(i, year)| movie(&format!("tt{i}"), "Title", &year.to_string()))
                .collect();

            let mut ascending = sorted(&movies, &SortKey::OldestToNewest);
            ascending.reverse();
            prop_assert_eq!(ascending, sorted(&movies, &SortKey::NewestToOldest));
        }
    }
}
