//! Movie catalog backed by the OMDb API.

use async_trait::async_trait;
use marquee_core::config::CatalogConfig;
use marquee_core::{CatalogError, Detail, MovieCatalog, MovieId, SearchOutcome};
use url::Url;

use crate::types::{OmdbSearchResponse, OmdbTitleResponse};

/// OMDb client implementing the widget's catalog seam.
#[derive(Debug, Clone)]
pub struct OmdbCatalog {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    page: u32,
}

impl OmdbCatalog {
    /// Creates a catalog client from configuration.
    ///
    /// # Errors
    ///
    /// - `CatalogError::InvalidEndpoint` - Base URL does not parse or is not HTTP(S)
    /// - `CatalogError::Transport` - HTTP client could not be built
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| CatalogError::InvalidEndpoint {
                url: config.base_url.clone(),
                reason: e.to_string(),
            })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidEndpoint {
                url: config.base_url.clone(),
                reason: format!("unsupported scheme '{}'", base_url.scheme()),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| CatalogError::Transport {
                reason: format!("HTTP client setup failed: {e}"),
            })?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            page: config.page,
        })
    }

    /// Builds the request URL for the given query parameters plus the API key.
    pub fn request_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in params {
                query.append_pair(name, value);
            }
            if let Some(ref api_key) = self.api_key {
                query.append_pair("apikey", api_key);
            }
        }
        url
    }

    async fn fetch(&self, url: Url) -> Result<String, CatalogError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Transport {
                reason: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| CatalogError::Transport {
            reason: format!("Reading response body failed: {e}"),
        })
    }
}

#[async_trait]
impl MovieCatalog for OmdbCatalog {
    async fn search(&self, term: &str) -> Result<SearchOutcome, CatalogError> {
        let page = self.page.to_string();
        let url = self.request_url(&[("s", term), ("page", &page)]);
        tracing::debug!(term, page = self.page, "OMDb search");

        let body = self.fetch(url).await?;
        parse_search_body(&body)
    }

    async fn lookup(&self, id: &MovieId) -> Result<Detail, CatalogError> {
        let url = self.request_url(&[("i", id.as_str())]);
        tracing::debug!(%id, "OMDb lookup");

        let body = self.fetch(url).await?;
        parse_title_body(&body, id)
    }
}

/// Parses a search body.
///
/// # Errors
///
/// - `CatalogError::Parse` - Body is not JSON
pub fn parse_search_body(body: &str) -> Result<SearchOutcome, CatalogError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| CatalogError::Parse {
            reason: format!("JSON parsing failed: {e}"),
        })?;

    match serde_json::from_value::<OmdbSearchResponse>(value) {
        Ok(response) => Ok(response.into_outcome()),
        Err(e) => {
            tracing::warn!(error = %e, "Unexpected search response shape, treating as no matches");
            Ok(SearchOutcome::NoMatches)
        }
    }
}

/// Parses a lookup body for `requested`.
///
/// # Errors
///
/// - `CatalogError::Parse` - Body is not a JSON object of text fields
/// - `CatalogError::NotFound` - OMDb flagged the lookup as failed
pub fn parse_title_body(body: &str, requested: &MovieId) -> Result<Detail, CatalogError> {
    let response: OmdbTitleResponse =
        serde_json::from_str(body).map_err(|e| CatalogError::Parse {
            reason: format!("JSON parsing failed: {e}"),
        })?;

    if response.is_failure() {
        return Err(CatalogError::NotFound {
            reason: response
                .error
                .unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    Ok(response.into_detail(requested))
}
