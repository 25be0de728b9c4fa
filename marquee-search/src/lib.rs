//! Marquee Search - Movie catalog backends

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Implements the widget's catalog seam against the OMDb HTTP API, plus a
//! bundled demo catalog for offline use.

pub mod omdb;
pub mod providers;
pub mod service;
pub mod types;

// Re-export main types
pub use omdb::OmdbCatalog;
pub use providers::DemoCatalog;
pub use service::build_catalog;
