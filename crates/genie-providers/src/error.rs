//! Error taxonomy for the dispatch pipeline.
//!
//! Only configuration and transport failures are errors. A model that fails
//! to honor the schema is reported through [`crate::Answer`], not here.

use thiserror::Error;

/// Failures surfaced to the caller of [`crate::Requester::function_calling`].
#[derive(Debug, Error)]
pub enum GenieError {
    /// No implementation is registered for the requested provider.
    #[error("Provider {0} not supported")]
    UnsupportedProvider(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl GenieError {
    /// Configuration errors never succeed on retry; transport errors might.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenieError::Transport(_))
    }
}

/// The provider could not be reached, or answered with something that is not
/// a usable HTTP/JSON response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider response is not valid JSON: {source}")]
    InvalidJson {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("request to provider failed: {0}")]
    Request(String),
}

impl TransportError {
    /// The raw response body, when the provider sent one.
    pub fn body(&self) -> Option<&str> {
        match self {
            TransportError::Status { body, .. } | TransportError::InvalidJson { body, .. } => {
                Some(body)
            }
            TransportError::Request(_) => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Request(err.to_string())
    }
}

pub type Result<T, E = GenieError> = std::result::Result<T, E>;
