//! Search session state: the current result set and the pending timer.

use std::fmt;

use tokio::sync::mpsc;

use super::commands::WidgetEvent;
use super::debounce::Debouncer;
use crate::movie::Candidate;

/// Monotonic token identifying one issued search or detail lookup.
///
/// Completions carrying anything but the current generation are stale and
/// must not reach the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mutable state of one search box.
///
/// Holds at most one pending debounce timer. Every transition that discards
/// the result set also advances the search generation, so responses to
/// superseded searches are recognizable when they arrive.
#[derive(Debug)]
pub struct SearchSession {
    candidates: Vec<Candidate>,
    debouncer: Debouncer,
    search_generation: Generation,
    detail_generation: Generation,
}

impl SearchSession {
    /// Creates an empty session whose searches wait `debouncer`'s interval.
    pub fn new(debouncer: Debouncer) -> Self {
        Self {
            candidates: Vec::new(),
            debouncer,
            search_generation: Generation::default(),
            detail_generation: Generation::default(),
        }
    }

    /// Candidates of the last successful search, in catalog order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Whether a debounce timer is waiting to fire.
    pub fn has_pending_search(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Cancels the pending timer, drops the result set and supersedes any
    /// in-flight search.
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        self.candidates.clear();
        self.search_generation = self.search_generation.next();
    }

    /// Starts a debounced search for `term`, superseding everything before it.
    pub fn begin_search(
        &mut self,
        term: String,
        events: &mpsc::UnboundedSender<WidgetEvent>,
    ) -> Generation {
        self.clear();
        self.debouncer.schedule(self.search_generation, term, events);
        self.search_generation
    }

    /// Records that the timer for `generation` fired.
    ///
    /// Returns false when the timer belongs to a superseded search.
    pub fn timer_fired(&mut self, generation: Generation) -> bool {
        if generation != self.search_generation {
            return false;
        }
        self.debouncer.fired();
        true
    }

    /// Whether a search completion for `generation` is still wanted.
    pub fn is_current_search(&self, generation: Generation) -> bool {
        generation == self.search_generation
    }

    /// Replaces the result set with a fresh search response.
    pub fn store(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
    }

    /// Drops the result set without superseding the current search.
    pub fn discard_candidates(&mut self) {
        self.candidates.clear();
    }

    /// Issues a token for a new detail lookup, superseding earlier ones.
    pub fn begin_detail(&mut self) -> Generation {
        self.detail_generation = self.detail_generation.next();
        self.detail_generation
    }

    /// Invalidates any in-flight detail lookup without starting a new one.
    pub fn supersede_detail(&mut self) {
        self.detail_generation = self.detail_generation.next();
    }

    /// Whether a detail completion for `generation` is still wanted.
    pub fn is_current_detail(&self, generation: Generation) -> bool {
        generation == self.detail_generation
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_fixtures::batman_results;

    fn session() -> SearchSession {
        SearchSession::new(Debouncer::new(Duration::from_millis(100)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_begin_search_supersedes_previous_generation() {
        let (events, _rx) = mpsc::unbounded_channel();
        let mut session = session();

        let first = session.begin_search("bat".to_string(), &events);
        let second = session.begin_search("batm".to_string(), &events);

        assert!(second > first);
        assert!(!session.is_current_search(first));
        assert!(session.is_current_search(second));
        assert!(session.has_pending_search());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cancels_timer_and_drops_candidates() {
        let (events, _rx) = mpsc::unbounded_channel();
        let mut session = session();
        let generation = session.begin_search("bat".to_string(), &events);
        session.store(batman_results());

        session.clear();

        assert!(session.candidates().is_empty());
        assert!(!session.has_pending_search());
        assert!(!session.is_current_search(generation));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_is_rejected() {
        let (events, _rx) = mpsc::unbounded_channel();
        let mut session = session();
        let stale = session.begin_search("b".to_string(), &events);
        let current = session.begin_search("ba".to_string(), &events);

        assert!(!session.timer_fired(stale));
        assert!(session.has_pending_search());
        assert!(session.timer_fired(current));
        assert!(!session.has_pending_search());
    }

    #[test]
    fn test_detail_generations_advance() {
        let mut session = session();
        let first = session.begin_detail();
        let second = session.begin_detail();

        assert!(!session.is_current_detail(first));
        assert!(session.is_current_detail(second));
    }

    #[test]
    fn test_supersede_detail_invalidates_in_flight_lookup() {
        let mut session = session();
        let in_flight = session.begin_detail();

        session.supersede_detail();

        assert!(!session.is_current_detail(in_flight));
    }
}
