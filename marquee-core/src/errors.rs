//! Error types for catalog access and the widget actor.

use thiserror::Error;

use crate::movie::MovieId;

/// Errors raised while talking to the movie catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Request could not be sent or the connection failed.
    #[error("Network error: {reason}")]
    Transport {
        /// The reason for the transport failure
        reason: String,
    },

    /// Catalog answered with a non-success HTTP status.
    #[error("Catalog returned HTTP {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Response body was not the JSON shape the catalog documents.
    #[error("Parse error: {reason}")]
    Parse {
        /// The reason for the parse error
        reason: String,
    },

    /// Configured endpoint is not a usable URL.
    #[error("Invalid catalog endpoint '{url}': {reason}")]
    InvalidEndpoint {
        /// The configured URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Catalog reported that the requested title does not exist.
    #[error("Title not found: {reason}")]
    NotFound {
        /// Message supplied by the catalog
        reason: String,
    },
}

/// Errors returned by the widget handle.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The widget actor is no longer running.
    #[error("Widget engine has shut down")]
    EngineShutdown,

    /// Selection targeted an entry that is not currently rendered.
    #[error("No rendered candidate with id {id}")]
    UnknownCandidate {
        /// Identifier that was requested
        id: MovieId,
    },
}
