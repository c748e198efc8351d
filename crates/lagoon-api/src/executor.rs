//! Execution capability and the HTTP implementation used in production.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// Header carrying the per-client request identifier.
pub const HEADER_REQUEST_ID: &str = "x-request-id";

/// A document plus its bound variables, serialized as the standard
/// `{"query": ..., "variables": {...}}` request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlRequest {
    query: &'static str,
    variables: Map<String, Value>,
}

impl GraphqlRequest {
    /// Start a request for `document` with no variables bound.
    #[must_use]
    pub fn new(document: &'static str) -> Self {
        Self {
            query: document,
            variables: Map::new(),
        }
    }

    /// Bind `value` to the variable `name`. `None` binds an explicit `null`;
    /// nothing is omitted.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] when `value` cannot be represented as JSON.
    pub fn var(mut self, name: &str, value: impl Serialize) -> ApiResult<Self> {
        let value = serde_json::to_value(value).map_err(|source| ApiError::Encode { source })?;
        self.variables.insert(name.to_string(), value);
        Ok(self)
    }

    /// Document text.
    #[must_use]
    pub const fn query(&self) -> &'static str {
        self.query
    }

    /// All bound variables.
    #[must_use]
    pub const fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// A single bound variable.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }
}

/// Sends a document to an endpoint and returns the decoded `data` object.
#[async_trait]
pub trait GraphqlExecutor: Send + Sync {
    /// Execute `request`, returning the response `data` object (or `null`).
    async fn execute(&self, request: &GraphqlRequest) -> ApiResult<Value>;
}

/// Shared reference to an execution capability.
pub type SharedExecutor = Arc<dyn GraphqlExecutor>;

/// Executor that POSTs requests to a GraphQL endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    endpoint: Url,
}

impl HttpExecutor {
    /// Build an executor from caller configuration. A blank token sends no
    /// `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidToken`] when the token cannot be sent as a
    /// header and [`ApiError::ClientBuild`] when the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut default_headers = HeaderMap::new();
        if let Ok(request_id) = HeaderValue::from_str(&Uuid::new_v4().to_string()) {
            default_headers.insert(HEADER_REQUEST_ID, request_id);
        }

        if let Some(token) = config
            .token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
        {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::InvalidToken)?;
            value.set_sensitive(true);
            default_headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|source| ApiError::ClientBuild { source })?;

        Ok(Self::with_client(client, config.endpoint.clone()))
    }

    /// Wrap an already configured HTTP client.
    #[must_use]
    pub const fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// Endpoint requests are sent to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

fn graphql_error(errors: Vec<GraphqlErrorEntry>) -> ApiError {
    ApiError::Graphql {
        messages: errors.into_iter().map(|entry| entry.message).collect(),
    }
}

#[async_trait]
impl GraphqlExecutor for HttpExecutor {
    async fn execute(&self, request: &GraphqlRequest) -> ApiResult<Value> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|source| ApiError::Transport { source })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { source })?;
        tracing::trace!(status = status.as_u16(), body = %String::from_utf8_lossy(&bytes), "graphql response received");

        let parsed = serde_json::from_slice::<GraphqlResponse>(&bytes);
        if !status.is_success() {
            return Err(match parsed {
                Ok(envelope) if !envelope.errors.is_empty() => graphql_error(envelope.errors),
                _ => ApiError::Status {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&bytes).trim().to_string(),
                },
            });
        }

        let envelope = parsed.map_err(|source| ApiError::Decode { source })?;
        if !envelope.errors.is_empty() {
            return Err(graphql_error(envelope.errors));
        }
        Ok(envelope.data.unwrap_or(Value::Null))
    }
}
