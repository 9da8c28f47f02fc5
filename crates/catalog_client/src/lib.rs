use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::Item, error::ApiError, protocol::decode_catalog};
use tracing::{debug, info};

mod endpoint;
pub mod error;

pub use endpoint::{CatalogEndpoint, DEFAULT_BASE_URL, DEFAULT_LOCALE, DEFAULT_PATH};
pub use error::{EndpointError, FetchError, FetchErrorKind};

/// Source of the full item list. The screen only ever talks to this seam, so
/// tests can substitute a fake for the HTTP client.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<Item>, FetchError>;
}

/// Catalog source backed by one HTTP GET per call.
///
/// No retry, no cache and no timeout beyond the transport defaults.
pub struct RemoteCatalogClient {
    http: Client,
    endpoint: CatalogEndpoint,
}

impl RemoteCatalogClient {
    pub fn new(endpoint: CatalogEndpoint) -> Self {
        Self::with_http(endpoint, Client::new())
    }

    pub fn with_http(endpoint: CatalogEndpoint, http: Client) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &CatalogEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalogClient {
    async fn fetch_items(&self) -> Result<Vec<Item>, FetchError> {
        let url = self.endpoint.request_url()?;
        debug!(%url, "fetching catalog");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = ApiError::from_body(&body)
                .map(|api| api.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let items = decode_catalog(&body)?;
        info!(%url, count = items.len(), "catalog fetched");
        Ok(items)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
