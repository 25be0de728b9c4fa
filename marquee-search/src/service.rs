//! Catalog selection for front ends.

use std::sync::Arc;

use marquee_core::config::CatalogConfig;
use marquee_core::{CatalogError, MovieCatalog};

use crate::omdb::OmdbCatalog;
use crate::providers::DemoCatalog;

/// Builds the catalog a front end should use.
///
/// `demo` selects the bundled offline titles; otherwise the OMDb client is
/// configured from `config`. A missing API key is allowed but logged, since
/// OMDb rejects most keyless requests.
///
/// # Errors
///
/// - `CatalogError::InvalidEndpoint` - Configured base URL is unusable
/// - `CatalogError::Transport` - HTTP client could not be built
pub fn build_catalog(
    config: &CatalogConfig,
    demo: bool,
) -> Result<Arc<dyn MovieCatalog>, CatalogError> {
    if demo {
        tracing::info!("Using bundled demo catalog");
        return Ok(Arc::new(DemoCatalog::new()));
    }

    if config.api_key.is_none() {
        tracing::warn!("No OMDb API key configured; set MARQUEE_OMDB_API_KEY");
    }

    tracing::info!(base_url = %config.base_url, "Using OMDb catalog");
    Ok(Arc::new(OmdbCatalog::new(config)?))
}
