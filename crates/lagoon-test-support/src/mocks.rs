//! Fake execution capabilities that record what they were asked to send.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use lagoon_api::{ApiError, ApiResult, GraphqlExecutor, GraphqlRequest};
use serde_json::Value;

#[derive(Debug, Clone)]
enum Outcome {
    Data(Value),
    Status { status: u16, body: String },
    Graphql(Vec<String>),
}

/// Executor that replays a fixed outcome and records every request.
#[derive(Debug)]
pub struct FakeExecutor {
    outcome: Outcome,
    requests: Mutex<Vec<GraphqlRequest>>,
}

impl FakeExecutor {
    fn with_outcome(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Answer every request with `data` as the response `data` object.
    #[must_use]
    pub fn returning(data: Value) -> Arc<Self> {
        Self::with_outcome(Outcome::Data(data))
    }

    /// Fail every request with [`ApiError::Status`].
    #[must_use]
    pub fn failing_with_status(status: u16, body: impl Into<String>) -> Arc<Self> {
        Self::with_outcome(Outcome::Status {
            status,
            body: body.into(),
        })
    }

    /// Fail every request with [`ApiError::Graphql`].
    #[must_use]
    pub fn failing_with_graphql(messages: &[&str]) -> Arc<Self> {
        Self::with_outcome(Outcome::Graphql(
            messages.iter().map(ToString::to_string).collect(),
        ))
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<GraphqlRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<GraphqlRequest> {
        self.requests().pop()
    }
}

#[async_trait]
impl GraphqlExecutor for FakeExecutor {
    async fn execute(&self, request: &GraphqlRequest) -> ApiResult<Value> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        match &self.outcome {
            Outcome::Data(data) => Ok(data.clone()),
            Outcome::Status { status, body } => Err(ApiError::Status {
                status: *status,
                body: body.clone(),
            }),
            Outcome::Graphql(messages) => Err(ApiError::Graphql {
                messages: messages.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn records_requests_in_order() -> ApiResult<()> {
        let fake = FakeExecutor::returning(json!({ "ok": true }));
        let first = GraphqlRequest::new("query { a }");
        let second = GraphqlRequest::new("query { b }");

        assert_eq!(fake.execute(&first).await?, json!({ "ok": true }));
        fake.execute(&second).await?;

        assert_eq!(fake.requests(), vec![first, second.clone()]);
        assert_eq!(fake.last_request(), Some(second));
        Ok(())
    }

    #[tokio::test]
    async fn failing_fakes_return_their_error() {
        let fake = FakeExecutor::failing_with_status(503, "maintenance");
        let result = fake.execute(&GraphqlRequest::new("query { a }")).await;
        assert!(matches!(result, Err(ApiError::Status { status: 503, .. })));

        let fake = FakeExecutor::failing_with_graphql(&["denied"]);
        let result = fake.execute(&GraphqlRequest::new("query { a }")).await;
        assert!(matches!(result, Err(ApiError::Graphql { messages }) if messages == ["denied"]));
    }
}
