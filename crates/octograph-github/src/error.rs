use std::sync::Arc;

use thiserror::Error;

/// Errors returned by the GitHub contribution client and fetcher.
///
/// Cloneable so that a single failed in-flight request can be delivered to
/// every caller waiting on it; non-`Clone` sources are held in an [`Arc`].
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// No bearer token was configured. Raised before any request is sent.
    #[error("GitHub token is required: set GITHUB_TOKEN or OCTOGRAPH_GITHUB_TOKEN")]
    MissingCredential,

    /// GitHub answered HTTP 401.
    #[error("GitHub rejected the credential (HTTP 401)")]
    Authentication,

    /// The body was JSON but not a contribution calendar.
    #[error("response does not match the contribution calendar schema for {context}: {source}")]
    SchemaValidation {
        context: String,
        #[source]
        source: Arc<serde_json::Error>,
    },

    /// The GraphQL layer reported errors (unknown user, bad arguments).
    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[source] Arc<reqwest::Error>),

    #[error("rate limited by GitHub (HTTP {status})")]
    RateLimited { status: u16 },

    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The background task driving a shared request did not finish.
    #[error("contribution fetch task ended unexpectedly: {0}")]
    TaskAborted(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(Arc::new(err))
    }
}

impl FetchError {
    /// Returns `true` for transient failures worth retrying after a back-off delay.
    ///
    /// **Retriable:** timeouts, connection failures, connections dropped
    /// while sending or reading, HTTP 5xx, HTTP 429.
    ///
    /// **Terminal:** everything else, including [`FetchError::Authentication`],
    /// [`FetchError::SchemaValidation`], undecodable bodies and requests that
    /// could not be built.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.is_request()
                    || e.is_body()
                    || e.status().is_some_and(|s| s.is_server_error())
            }
            Self::RateLimited { .. } => true,
            Self::UnexpectedStatus { status } => *status >= 500,
            Self::MissingCredential
            | Self::Authentication
            | Self::SchemaValidation { .. }
            | Self::GraphQl(_)
            | Self::InvalidUrl { .. }
            | Self::TaskAborted(_) => false,
        }
    }
}
