//! Debounced search widget.
//!
//! One actor owns the search session and the view model. Keystrokes are
//! debounced into catalog searches, results render as a selectable list,
//! and selecting an entry fetches and renders its detail card. Every search
//! and lookup carries a generation token, so a slow response to a
//! superseded request never overwrites a newer render.

pub mod actor;
pub mod commands;
pub mod debounce;
pub mod engine;
pub mod handle;
pub mod session;
pub mod sort;
pub mod view;

pub use actor::spawn_widget;
pub use commands::{ClickTarget, WidgetCommand, WidgetEvent};
pub use debounce::Debouncer;
pub use engine::WidgetEngine;
pub use handle::WidgetHandle;
pub use session::{Generation, SearchSession};
pub use sort::SortKey;
pub use view::{
    DetailCard, DetailContent, DetailRegion, ListContent, ListEntry, ListRegion,
    NO_MOVIES_TO_SORT, SearchInput, ViewObserver, WidgetView,
};
