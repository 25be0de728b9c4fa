//! Message definitions for the widget actor.

use tokio::sync::oneshot;

use super::session::Generation;
use super::sort::SortKey;
use super::view::WidgetView;
use crate::catalog::SearchOutcome;
use crate::errors::{CatalogError, WidgetError};
use crate::movie::{Detail, MovieId};

/// Where a pointer click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the search box
    SearchInput,
    /// Inside the candidate list
    CandidateList,
    /// A sort option of the filter control
    FilterOption,
    /// The filter control itself
    FilterClass,
    /// Anywhere else on the page
    Outside,
}

impl ClickTarget {
    /// Whether the click keeps the search area open.
    pub fn is_inside_search_area(self) -> bool {
        !matches!(self, ClickTarget::Outside)
    }
}

/// User-facing commands sent through [`super::WidgetHandle`].
///
/// Each command carries a responder that is answered once the actor has
/// applied the command to the view; network work it starts completes later.
pub enum WidgetCommand {
    /// Search box text changed.
    Input {
        text: String,
        responder: oneshot::Sender<()>,
    },
    /// Search box received focus.
    Focus { responder: oneshot::Sender<()> },
    /// Pointer click somewhere on the page.
    Click {
        target: ClickTarget,
        responder: oneshot::Sender<()>,
    },
    /// A rendered candidate was chosen.
    Select {
        id: MovieId,
        responder: oneshot::Sender<Result<(), WidgetError>>,
    },
    /// Filter control changed.
    Sort {
        key: SortKey,
        responder: oneshot::Sender<()>,
    },
    /// Reset button pressed.
    Reset { responder: oneshot::Sender<()> },
    /// Snapshot of the current view.
    GetView {
        responder: oneshot::Sender<WidgetView>,
    },
    /// Stop the actor.
    Shutdown { responder: oneshot::Sender<()> },
}

/// Internal notifications from timers and catalog calls.
#[derive(Debug)]
pub enum WidgetEvent {
    /// Typing paused long enough to search `term`.
    DebounceElapsed { generation: Generation, term: String },
    /// A term search finished.
    SearchCompleted {
        generation: Generation,
        term: String,
        result: Result<SearchOutcome, CatalogError>,
    },
    /// A detail lookup finished.
    DetailLoaded {
        generation: Generation,
        id: MovieId,
        result: Result<Detail, CatalogError>,
    },
}
