//! Request and response dumps emitted when the debug flag is set.

use tracing::debug;

use crate::executor::GraphqlRequest;
use crate::operation::Operation;

pub(crate) fn request(operation: Operation, request: &GraphqlRequest) {
    match serde_json::to_string_pretty(request) {
        Ok(rendered) => debug!(
            operation = operation.field(),
            "outgoing graphql request:\n{rendered}"
        ),
        Err(err) => debug!(
            operation = operation.field(),
            error = %err,
            "outgoing graphql request could not be rendered"
        ),
    }
}

pub(crate) fn response(operation: Operation, bytes: &[u8]) {
    debug!(
        operation = operation.field(),
        "graphql response field: {}",
        String::from_utf8_lossy(bytes)
    );
}
