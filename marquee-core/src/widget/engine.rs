//! Widget state machine driven by the actor loop.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::commands::{ClickTarget, WidgetEvent};
use super::debounce::Debouncer;
use super::session::{Generation, SearchSession};
use super::sort::{self, SortKey};
use super::view::{NO_MOVIES_TO_SORT, ViewObserver, WidgetView};
use crate::catalog::{MovieCatalog, SearchOutcome};
use crate::config::WidgetConfig;
use crate::errors::{CatalogError, WidgetError};
use crate::movie::{Detail, MovieId};

/// Search session, view model and catalog access of one widget.
///
/// All methods are synchronous: catalog calls and timers run in spawned
/// tasks and report back through the event channel, so input handling is
/// never blocked by the network.
pub struct WidgetEngine {
    catalog: Arc<dyn MovieCatalog>,
    session: SearchSession,
    view: WidgetView,
    events: mpsc::UnboundedSender<WidgetEvent>,
    observer: Option<Box<dyn ViewObserver>>,
}

impl WidgetEngine {
    /// Creates an engine that posts timer and catalog completions to `events`.
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        config: &WidgetConfig,
        events: mpsc::UnboundedSender<WidgetEvent>,
        observer: Option<Box<dyn ViewObserver>>,
    ) -> Self {
        Self {
            catalog,
            session: SearchSession::new(Debouncer::new(config.debounce_interval)),
            view: WidgetView::default(),
            events,
            observer,
        }
    }

    /// Current view model.
    pub fn view(&self) -> &WidgetView {
        &self.view
    }

    /// Current search session.
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Runs `apply` and notifies the observer if the view changed.
    pub fn observed<R>(&mut self, apply: impl FnOnce(&mut Self) -> R) -> R {
        let before = self.view.clone();
        let result = apply(self);

        if self.view != before
            && let Some(observer) = self.observer.as_mut()
        {
            observer.view_changed(&self.view);
        }

        result
    }

    /// Search box text changed.
    ///
    /// Empty (after trimming) text clears the session and hides the list.
    /// Anything else shows the spinner at once and debounces a search.
    pub fn on_input(&mut self, text: String) {
        self.view.input.text = text;
        let term = self.view.input.text.trim().to_string();

        if term.is_empty() {
            tracing::debug!("Search input emptied, clearing session");
            self.clear_search();
        } else {
            self.schedule_search(term);
        }
    }

    /// Search box received focus: hides the detail card and restarts the
    /// search for whatever text is already typed.
    pub fn on_focus(&mut self) {
        self.hide_detail();
        let term = self.view.input.text.trim().to_string();

        if term.is_empty() {
            self.clear_search();
        } else {
            tracing::debug!(term, "Focus re-triggers search");
            self.schedule_search(term);
        }
    }

    /// Closes the search area when a click lands outside it.
    pub fn on_click(&mut self, target: ClickTarget) {
        if target.is_inside_search_area() {
            return;
        }

        tracing::debug!(?target, "Click outside search area, dismissing");
        self.dismiss();
    }

    /// Selects a rendered candidate and starts fetching its detail record.
    ///
    /// # Errors
    /// - `WidgetError::UnknownCandidate` - `id` is not a currently rendered entry
    pub fn select(&mut self, id: MovieId) -> Result<(), WidgetError> {
        if self.view.list.entry(&id).is_none() {
            return Err(WidgetError::UnknownCandidate { id });
        }

        self.dismiss();
        let generation = self.session.begin_detail();
        tracing::info!(%id, %generation, "Fetching movie detail");
        self.spawn_lookup(generation, id);

        Ok(())
    }

    /// Re-renders the fetched candidates in the requested order.
    ///
    /// The session keeps catalog order, so switching keys never compounds.
    pub fn apply_sort(&mut self, key: &SortKey) {
        let candidates = self.session.candidates();

        if candidates.is_empty() {
            self.view.list.show_message(NO_MOVIES_TO_SORT);
            return;
        }

        let ordered = sort::sorted(candidates, key);
        tracing::debug!(%key, count = ordered.len(), "Sorted candidates");
        self.view.list.show_candidates(&ordered);
    }

    /// Clears the search box, the candidate list and the detail card.
    pub fn reset(&mut self) {
        self.hide_detail();
        self.dismiss();
    }

    /// Applies a timer or catalog completion.
    pub fn handle_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::DebounceElapsed { generation, term } => {
                self.on_debounce_elapsed(generation, term)
            }
            WidgetEvent::SearchCompleted {
                generation,
                term,
                result,
            } => self.on_search_completed(generation, &term, result),
            WidgetEvent::DetailLoaded {
                generation,
                id,
                result,
            } => self.on_detail_loaded(generation, &id, result),
        }
    }

    fn schedule_search(&mut self, term: String) {
        self.view.list.show_loading();
        self.hide_detail();
        let generation = self.session.begin_search(term, &self.events);
        tracing::trace!(%generation, "Search scheduled");
    }

    // A hidden card must not be revived by a lookup still in flight.
    fn hide_detail(&mut self) {
        self.view.detail.hide();
        self.session.supersede_detail();
    }

    fn clear_search(&mut self) {
        self.session.clear();
        self.view.list.hide_and_clear();
    }

    fn dismiss(&mut self) {
        self.view.list.hide_and_clear();
        self.view.input.text.clear();
        self.session.clear();
    }

    fn on_debounce_elapsed(&mut self, generation: Generation, term: String) {
        if !self.session.timer_fired(generation) {
            tracing::trace!(%generation, "Ignoring superseded debounce timer");
            return;
        }

        tracing::debug!(term, %generation, "Searching catalog");
        self.spawn_search(generation, term);
    }

    fn on_search_completed(
        &mut self,
        generation: Generation,
        term: &str,
        result: Result<SearchOutcome, CatalogError>,
    ) {
        if !self.session.is_current_search(generation) {
            tracing::debug!(term, %generation, "Discarding stale search response");
            return;
        }

        match result {
            Ok(SearchOutcome::Matches(candidates)) => {
                tracing::info!(term, count = candidates.len(), "Search returned candidates");
                self.view.list.show_candidates(&candidates);
                self.session.store(candidates);
            }
            Ok(SearchOutcome::NoMatches) => {
                // Spinner stays up until the user edits or dismisses the search.
                tracing::info!(term, "Search returned no matches");
                self.session.discard_candidates();
                self.view.list.show_loading();
            }
            Err(e) => {
                tracing::warn!(term, error = %e, "Search failed");
                self.session.discard_candidates();
                self.view.list.show_error(format!("Search failed: {e}"));
            }
        }
    }

    fn on_detail_loaded(
        &mut self,
        generation: Generation,
        id: &MovieId,
        result: Result<Detail, CatalogError>,
    ) {
        if !self.session.is_current_detail(generation) {
            tracing::debug!(%id, %generation, "Discarding stale detail response");
            return;
        }

        match result {
            Ok(detail) => {
                tracing::info!(%id, title = %detail.title, "Detail loaded");
                self.view.detail.show_card(&detail);
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "Detail lookup failed");
                self.view
                    .detail
                    .show_error(format!("Could not load details: {e}"));
            }
        }
    }

    fn spawn_search(&self, generation: Generation, term: String) {
        let catalog = Arc::clone(&self.catalog);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = catalog.search(&term).await;
            let _ = events.send(WidgetEvent::SearchCompleted {
                generation,
                term,
                result,
            });
        });
    }

    fn spawn_lookup(&self, generation: Generation, id: MovieId) {
        let catalog = Arc::clone(&self.catalog);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = catalog.lookup(&id).await;
            let _ = events.send(WidgetEvent::DetailLoaded {
                generation,
                id,
                result,
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_fixtures::{ScriptedCatalog, batman_begins_detail, batman_results};
    use crate::widget::view::{DetailContent, ListContent};

    struct Harness {
        engine: WidgetEngine,
        events: mpsc::UnboundedReceiver<WidgetEvent>,
        catalog: Arc<ScriptedCatalog>,
    }

    impl Harness {
        fn new(catalog: ScriptedCatalog) -> Self {
            let catalog = Arc::new(catalog);
            let (sender, events) = mpsc::unbounded_channel();
            let engine = WidgetEngine::new(
                catalog.clone(),
                &WidgetConfig::default(),
                sender,
                None,
            );
            Self {
                engine,
                events,
                catalog,
            }
        }

        /// Advances paused time in small steps, applying completions as they arrive.
        async fn run_for(&mut self, duration: Duration) {
            let step = Duration::from_millis(10);
            let mut elapsed = Duration::ZERO;
            while elapsed < duration {
                tokio::time::sleep(step).await;
                elapsed += step;
                while let Ok(event) = self.events.try_recv() {
                    self.engine.handle_event(event);
                }
            }
        }
    }

    fn bat_catalog() -> ScriptedCatalog {
        ScriptedCatalog::new()
            .with_matches("bat", batman_results(), Duration::from_millis(20))
            .with_detail(batman_begins_detail(), Duration::from_millis(20))
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_shows_spinner_before_search() {
        let mut harness = Harness::new(bat_catalog());

        harness.engine.on_input("bat".to_string());

        assert!(harness.engine.view().list.visible);
        assert_eq!(harness.engine.view().list.content, ListContent::Loading);
        assert!(harness.engine.session().has_pending_search());
        assert!(harness.catalog.search_calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_results_render_in_catalog_order() {
        let mut harness = Harness::new(bat_catalog());

        harness.engine.on_input("bat".to_string());
        harness.run_for(Duration::from_millis(200)).await;

        let titles: Vec<_> = harness
            .engine
            .view()
            .list
            .entries()
            .iter()
            .map(|e| e.title.clone())
            .collect();
        assert_eq!(titles, ["Batman", "Batman Begins"]);
        assert_eq!(harness.engine.session().candidates(), batman_results());
        assert_eq!(harness.catalog.search_calls(), ["bat"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_term_is_trimmed() {
        let mut harness = Harness::new(bat_catalog());

        harness.engine.on_input("  bat ".to_string());
        harness.run_for(Duration::from_millis(200)).await;

        assert_eq!(harness.catalog.search_calls(), ["bat"]);
        assert_eq!(harness.engine.view().input.text, "  bat ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_hides_list_and_cancels_timer() {
        let mut harness = Harness::new(bat_catalog());

        harness.engine.on_input("bat".to_string());
        harness.engine.on_input("   ".to_string());
        harness.run_for(Duration::from_millis(200)).await;

        assert!(!harness.engine.view().list.visible);
        assert_eq!(harness.engine.view().list.content, ListContent::Empty);
        assert!(harness.engine.session().candidates().is_empty());
        assert!(harness.catalog.search_calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_matches_keeps_spinner_visible() {
        let mut harness = Harness::new(bat_catalog());

        harness.engine.on_input("zzzznotreal".to_string());
        harness.run_for(Duration::from_millis(200)).await;

        assert!(harness.engine.view().list.visible);
        assert_eq!(harness.engine.view().list.content, ListContent::Loading);
        assert!(harness.engine.session().candidates().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_failure_shows_error_state() {
        let catalog = ScriptedCatalog::new().with_search_failure(
            "bat",
            CatalogError::Transport {
                reason: "connection refused".to_string(),
            },
        );
        let mut harness = Harness::new(catalog);

        harness.engine.on_input("bat".to_string());
        harness.run_for(Duration::from_millis(200)).await;

        assert!(harness.engine.view().list.visible);
        assert!(matches!(
            &harness.engine.view().list.content,
            ListContent::Error(message) if message.contains("connection refused")
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_clears_search_and_renders_detail() {
        let mut harness = Harness::new(bat_catalog());
        harness.engine.on_input("bat".to_string());
        harness.run_for(Duration::from_millis(200)).await;

        let second = batman_results()[1].id.clone();
        harness.engine.select(second.clone()).unwrap();

        assert!(!harness.engine.view().list.visible);
        assert!(harness.engine.view().input.text.is_empty());
        assert!(harness.engine.session().candidates().is_empty());

        harness.run_for(Duration::from_millis(100)).await;

        let detail = &harness.engine.view().detail;
        assert!(detail.visible);
        let DetailContent::Card(card) = &detail.content else {
            panic!("expected a detail card");
        };
        assert_eq!(card.title, "Batman Begins");
        assert_eq!(harness.catalog.lookup_calls(), [second]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_selecting_unrendered_id_is_rejected() {
        let mut harness = Harness::new(bat_catalog());

        let err = harness
            .engine
            .select(MovieId::new("tt0372784"))
            .unwrap_err();

        assert!(matches!(err, WidgetError::UnknownCandidate { .. }));
        assert!(harness.catalog.lookup_calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_lookup_shows_detail_error() {
        let catalog =
            ScriptedCatalog::new().with_matches("bat", batman_results(), Duration::ZERO);
        let mut harness = Harness::new(catalog);
        harness.engine.on_input("bat".to_string());
        harness.run_for(Duration::from_millis(200)).await;

        harness.engine.select(batman_results()[0].id.clone()).unwrap();
        harness.run_for(Duration::from_millis(50)).await;

        let detail = &harness.engine.view().detail;
        assert!(detail.visible);
        assert!(matches!(detail.content, DetailContent::Error(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sort_without_results_shows_message() {
        let mut harness = Harness::new(bat_catalog());

        harness.engine.apply_sort(&SortKey::AToZ);

        assert!(harness.engine.view().list.visible);
        assert_eq!(
            harness.engine.view().list.content,
            ListContent::Message(NO_MOVIES_TO_SORT.to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_sort_renders_copy_and_keeps_session_order() {
        let mut harness = Harness::new(bat_catalog());
        harness.engine.on_input("bat".to_string());
        harness.run_for(Duration::from_millis(200)).await;

        harness.engine.apply_sort(&SortKey::NewestToOldest);
        let first = harness.engine.view().list.entries()[0].title.clone();
        assert_eq!(first, "Batman Begins");
        assert_eq!(harness.engine.session().candidates(), batman_results());

        harness
            .engine
            .apply_sort(&SortKey::Unrecognized("Original".to_string()));
        let first = harness.engine.view().list.entries()[0].title.clone();
        assert_eq!(first, "Batman");
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_inside_search_area_is_ignored() {
        let mut harness = Harness::new(bat_catalog());
        harness.engine.on_input("bat".to_string());
        harness.run_for(Duration::from_millis(200)).await;

        for target in [
            ClickTarget::SearchInput,
            ClickTarget::CandidateList,
            ClickTarget::FilterOption,
            ClickTarget::FilterClass,
        ] {
            harness.engine.on_click(target);
        }

        assert_eq!(harness.engine.view().list.entries().len(), 2);
        assert_eq!(harness.engine.view().input.text, "bat");
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_outside_dismisses_but_keeps_detail() {
        let mut harness = Harness::new(bat_catalog());
        harness.engine.on_input("bat".to_string());
        harness.run_for(Duration::from_millis(200)).await;
        harness.engine.select(batman_results()[1].id.clone()).unwrap();
        harness.run_for(Duration::from_millis(100)).await;

        harness.engine.on_input("bat".to_string());
        harness.engine.on_click(ClickTarget::Outside);
        harness.run_for(Duration::from_millis(200)).await;

        let view = harness.engine.view();
        assert!(!view.list.visible);
        assert!(view.input.text.is_empty());
        assert!(harness.engine.session().candidates().is_empty());
        assert!(!harness.engine.session().has_pending_search());
        assert!(matches!(view.detail.content, DetailContent::Card(_)));
        assert_eq!(harness.catalog.search_calls(), ["bat"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_hides_detail_and_researches_typed_text() {
        let mut harness = Harness::new(bat_catalog());
        harness.engine.on_input("bat".to_string());
        harness.run_for(Duration::from_millis(200)).await;

        harness.engine.on_focus();

        assert!(!harness.engine.view().detail.visible);
        assert_eq!(harness.engine.view().list.content, ListContent::Loading);
        assert!(harness.engine.session().candidates().is_empty());

        harness.run_for(Duration::from_millis(200)).await;
        assert_eq!(harness.catalog.search_calls(), ["bat", "bat"]);
        assert_eq!(harness.engine.view().list.entries().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_with_empty_input_hides_list() {
        let mut harness = Harness::new(bat_catalog());
        harness.engine.apply_sort(&SortKey::AToZ);

        harness.engine.on_focus();

        assert!(!harness.engine.view().list.visible);
        assert!(!harness.engine.view().detail.visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_every_region() {
        let mut harness = Harness::new(bat_catalog());
        harness.engine.on_input("bat".to_string());
        harness.run_for(Duration::from_millis(200)).await;
        harness.engine.select(batman_results()[1].id.clone()).unwrap();
        harness.run_for(Duration::from_millis(100)).await;

        harness.engine.reset();

        let view = harness.engine.view();
        assert!(!view.list.visible);
        assert!(!view.detail.visible);
        assert!(view.input.text.is_empty());
    }

    fn slow_detail_catalog() -> ScriptedCatalog {
        ScriptedCatalog::new()
            .with_matches("bat", batman_results(), Duration::from_millis(20))
            .with_detail(batman_begins_detail(), Duration::from_millis(500))
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_detail_after_reset_stays_hidden() {
        let mut harness = Harness::new(slow_detail_catalog());
        harness.engine.on_input("bat".to_string());
        harness.run_for(Duration::from_millis(200)).await;
        harness.engine.select(batman_results()[1].id.clone()).unwrap();

        harness.engine.reset();
        harness.engine.on_input("alien".to_string());
        harness.run_for(Duration::from_millis(800)).await;

        let view = harness.engine.view();
        assert_eq!(harness.catalog.lookup_calls(), [batman_results()[1].id.clone()]);
        assert!(!view.detail.visible);
        assert_eq!(view.detail.content, DetailContent::Empty);
        assert_eq!(view.input.text, "alien");
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_detail_after_focus_stays_hidden() {
        let mut harness = Harness::new(slow_detail_catalog());
        harness.engine.on_input("bat".to_string());
        harness.run_for(Duration::from_millis(200)).await;
        harness.engine.select(batman_results()[1].id.clone()).unwrap();

        harness.engine.on_focus();
        harness.run_for(Duration::from_millis(800)).await;

        assert!(!harness.engine.view().detail.visible);
        assert_eq!(harness.engine.view().detail.content, DetailContent::Empty);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_search_response_is_discarded() {
        let catalog = ScriptedCatalog::new()
            .with_matches("bat", batman_results(), Duration::from_millis(500))
            .with_matches("batman", batman_results()[..1].to_vec(), Duration::from_millis(10));
        let mut harness = Harness::new(catalog);

        harness.engine.on_input("bat".to_string());
        harness.run_for(Duration::from_millis(150)).await;
        harness.engine.on_input("batman".to_string());
        harness.run_for(Duration::from_millis(800)).await;

        assert_eq!(harness.catalog.search_calls(), ["bat", "batman"]);
        assert_eq!(harness.engine.view().list.entries().len(), 1);
        assert_eq!(harness.engine.session().candidates().len(), 1);
    }
}
