//! Centralized configuration for Marquee.
//!
//! All tunable parameters are defined here to avoid hard-coded values
//! scattered throughout the workspace.

use std::time::Duration;

use crate::MarqueeError;

/// Central configuration for all Marquee components.
///
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct MarqueeConfig {
    pub catalog: CatalogConfig,
    pub widget: WidgetConfig,
}

/// Movie catalog endpoint configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the OMDb-compatible API
    pub base_url: String,
    /// API key appended to every request (None = omit the parameter)
    pub api_key: Option<String>,
    /// Result page requested for term searches
    pub page: u32,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.omdbapi.com/".to_string(),
            api_key: None,
            page: 1,
            request_timeout: Duration::from_secs(10),
            user_agent: "marquee/0.1.0",
        }
    }
}

/// Search widget behavior.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Quiet interval before a typed term is searched
    pub debounce_interval: Duration,
    /// Capacity of the widget command channel
    pub command_buffer: usize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            debounce_interval: Duration::from_millis(100),
            command_buffer: 64,
        }
    }
}

impl MarqueeConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// `MARQUEE_OMDB_API_KEY` takes precedence over the conventional
    /// `OMDB_API_KEY`. Unparseable numeric values keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.catalog.api_key = std::env::var("MARQUEE_OMDB_API_KEY")
            .or_else(|_| std::env::var("OMDB_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        if let Ok(base_url) = std::env::var("MARQUEE_OMDB_BASE_URL") {
            config.catalog.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("MARQUEE_REQUEST_TIMEOUT")
            && let Ok(seconds) = timeout.parse::<u64>()
        {
            config.catalog.request_timeout = Duration::from_secs(seconds);
        }

        if let Ok(debounce) = std::env::var("MARQUEE_DEBOUNCE_MS")
            && let Ok(millis) = debounce.parse::<u64>()
        {
            config.widget.debounce_interval = Duration::from_millis(millis);
        }

        config
    }

    /// Checks values that would make the widget unusable.
    ///
    /// # Errors
    /// - `MarqueeError::Configuration` - A value is out of range
    pub fn validate(&self) -> Result<(), MarqueeError> {
        if self.catalog.base_url.trim().is_empty() {
            return Err(MarqueeError::Configuration {
                reason: "catalog base URL is empty".to_string(),
            });
        }

        if self.catalog.page == 0 {
            return Err(MarqueeError::Configuration {
                reason: "catalog pages start at 1".to_string(),
            });
        }

        if self.widget.command_buffer == 0 {
            return Err(MarqueeError::Configuration {
                reason: "widget command buffer must hold at least one command".to_string(),
            });
        }

        Ok(())
    }
}
