//! Marquee Core - Search session and view model for the movie search widget
//!
//! This crate holds the movie records, the catalog seam, configuration and
//! the widget engine: a single actor that owns the search session, debounces
//! typed input, issues catalog calls and keeps a deterministic view model of
//! the search input, candidate list and detail card.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod movie;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
pub mod tracing_setup;
pub mod widget;

// Re-export main types for convenient access
pub use catalog::{MovieCatalog, SearchOutcome};
pub use config::MarqueeConfig;
pub use errors::{CatalogError, WidgetError};
pub use movie::{Candidate, Detail, MovieId, PLACEHOLDER_POSTER, Poster};
pub use widget::{ClickTarget, SortKey, WidgetHandle, WidgetView, spawn_widget};

/// Top-level errors that can bubble up from any Marquee subsystem.
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    #[error("Widget error: {0}")]
    Widget(#[from] WidgetError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MarqueeError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            MarqueeError::Widget(WidgetError::UnknownCandidate { id }) => {
                format!("No search result with id {id} is on screen")
            }
            MarqueeError::Widget(_) => "Search widget stopped unexpectedly".to_string(),
            MarqueeError::Catalog(CatalogError::NotFound { reason }) => {
                format!("Movie not found: {reason}")
            }
            MarqueeError::Catalog(_) => "Could not reach the movie catalog".to_string(),
            MarqueeError::Configuration { reason } => format!("Invalid configuration: {reason}"),
            MarqueeError::Io(_) => "Terminal I/O error occurred".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
