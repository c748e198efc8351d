//! Connection settings supplied by the caller.

use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

use url::Url;

/// Request timeout applied when the caller does not choose one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoint, credentials, and diagnostics toggle for an [`crate::ApiClient`].
#[derive(Clone)]
pub struct ApiConfig {
    /// GraphQL endpoint, e.g. `https://api.example.com/graphql`.
    pub endpoint: Url,
    /// Bearer token sent in the `Authorization` header.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Dump outgoing requests and incoming result fields.
    pub debug: bool,
}

impl ApiConfig {
    /// Configuration for `endpoint` with no token, default timeout, and
    /// diagnostics off.
    #[must_use]
    pub const fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            token: None,
            timeout: DEFAULT_TIMEOUT,
            debug: false,
        }
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Toggle request/response diagnostics.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Debug for ApiConfig {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ApiConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("debug", &self.debug)
            .finish()
    }
}
