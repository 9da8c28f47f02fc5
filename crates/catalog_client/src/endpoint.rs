use url::Url;

use crate::error::EndpointError;

pub const DEFAULT_BASE_URL: &str = "https://android-kotlin-fun-mars-server.appspot.com/amphibians/";
pub const DEFAULT_PATH: &str = "endpoint_data";
pub const DEFAULT_LOCALE: &str = "id";
const LOCALE_QUERY_KEY: &str = "hl";

/// Fixed location of the catalog: base URL, resource path and locale flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoint {
    pub base_url: String,
    pub path: String,
    pub locale: String,
}

impl Default for CatalogEndpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            path: DEFAULT_PATH.into(),
            locale: DEFAULT_LOCALE.into(),
        }
    }
}

impl CatalogEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Full GET target. `path` is resolved relative to `base_url`, so a base
    /// without a trailing slash replaces its last segment.
    pub fn request_url(&self) -> Result<Url, EndpointError> {
        let base = Url::parse(self.base_url.trim()).map_err(|source| EndpointError::InvalidBase {
            base_url: self.base_url.clone(),
            source,
        })?;
        let mut url = base
            .join(self.path.trim_start_matches('/'))
            .map_err(|source| EndpointError::InvalidPath {
                base_url: self.base_url.clone(),
                path: self.path.clone(),
                source,
            })?;
        if !self.locale.is_empty() {
            url.query_pairs_mut().append_pair(LOCALE_QUERY_KEY, &self.locale);
        }
        Ok(url)
    }
}
