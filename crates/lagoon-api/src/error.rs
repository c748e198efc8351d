//! Error types for dispatcher operations.
//!
//! # Design
//!
//! - Transport and protocol failures keep their source and are never retried.
//! - Messages stay constant; operational context lives in structured fields.
//! - A null result field is its own variant so callers can tell "nothing came
//!   back" apart from a failed round trip.

use thiserror::Error;

/// Convenience alias for dispatcher results.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised while executing a GraphQL operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Building the underlying HTTP client failed.
    #[error("failed to build http client")]
    ClientBuild {
        /// Source client builder error.
        source: reqwest::Error,
    },
    /// The configured token cannot be carried in an HTTP header.
    #[error("api token contains invalid header characters")]
    InvalidToken,
    /// Sending the request or reading the response failed.
    #[error("graphql request failed")]
    Transport {
        /// Source transport error.
        source: reqwest::Error,
    },
    /// The endpoint answered with a non-success status and no GraphQL errors.
    #[error("graphql endpoint returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, trimmed.
        body: String,
    },
    /// The response carried a GraphQL `errors` array.
    #[error("graphql: {}", first_message(.messages))]
    Graphql {
        /// Messages reported by the server, in order.
        messages: Vec<String>,
    },
    /// The response body or `data` object could not be decoded.
    #[error("failed to decode graphql response")]
    Decode {
        /// Source serde error.
        source: serde_json::Error,
    },
    /// A variable or result field could not be encoded as JSON.
    #[error("failed to encode graphql payload")]
    Encode {
        /// Source serde error.
        source: serde_json::Error,
    },
    /// The result field was `null` or missing.
    #[error(
        "GraphQL API returned a null response, the requested resource may not exist, or there was an error. Use `--debug` to check what was returned"
    )]
    NullResponse {
        /// Result field that came back empty.
        operation: &'static str,
    },
}

fn first_message(messages: &[String]) -> &str {
    messages.first().map_or("unknown error", String::as_str)
}
