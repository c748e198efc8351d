//! `ApiClient` and the dispatch path shared by every operation.

use std::sync::Arc;

use tracing::{Instrument, debug, info_span};

use crate::config::ApiConfig;
use crate::diagnostics;
use crate::error::{ApiError, ApiResult};
use crate::executor::{GraphqlRequest, HttpExecutor, SharedExecutor};
use crate::operation::{Operation, ResponseData};

/// Issues the supported user and SSH key operations through an executor.
///
/// Each call is a single stateless round trip; the client holds no per-call
/// state and may be cloned and shared across tasks.
#[derive(Clone)]
pub struct ApiClient {
    executor: SharedExecutor,
    debug: bool,
}

impl ApiClient {
    /// Client over an arbitrary execution capability.
    #[must_use]
    pub fn new(executor: SharedExecutor, debug: bool) -> Self {
        Self { executor, debug }
    }

    /// Client over HTTP using the caller's configuration.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpExecutor::new`] failures.
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        let executor = HttpExecutor::new(config)?;
        Ok(Self::new(Arc::new(executor), config.debug))
    }

    /// Whether request/response diagnostics are emitted.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    pub(crate) async fn dispatch(
        &self,
        operation: Operation,
        request: GraphqlRequest,
    ) -> ApiResult<Vec<u8>> {
        let span = info_span!("graphql", operation = operation.field());
        async move {
            if self.debug {
                diagnostics::request(operation, &request);
            }

            let data = self.executor.execute(&request).await?;
            let field = ResponseData::decode(data)?.take(operation);
            let bytes = serde_json::to_vec(&field).map_err(|source| ApiError::Encode { source })?;

            if self.debug {
                diagnostics::response(operation, &bytes);
            }

            if field.is_none() {
                return Err(ApiError::NullResponse {
                    operation: operation.field(),
                });
            }
            debug!(bytes = bytes.len(), "graphql operation completed");
            Ok(bytes)
        }
        .instrument(span)
        .await
    }
}
