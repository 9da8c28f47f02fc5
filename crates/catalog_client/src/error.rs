use thiserror::Error;

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid catalog base url '{base_url}': {source}")]
    InvalidBase {
        base_url: String,
        source: url::ParseError,
    },
    #[error("cannot join path '{path}' onto '{base_url}': {source}")]
    InvalidPath {
        base_url: String,
        path: String,
        source: url::ParseError,
    },
}

/// Coarse failure category of a fetch, as seen by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Network,
    Decode,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("catalog endpoint misconfigured: {0}")]
    Endpoint(#[from] EndpointError),
    #[error("catalog request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("catalog server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed catalog payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Endpoint(_) | Self::Network(_) | Self::Status { .. } => FetchErrorKind::Network,
            Self::Decode(_) => FetchErrorKind::Decode,
        }
    }
}
