//! SSH key operations.

use lagoon_api_models::{AddSshKey, DeleteSshKey};

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::executor::GraphqlRequest;
use crate::operation::Operation;

fn add_ssh_key_request(key: &AddSshKey) -> ApiResult<GraphqlRequest> {
    GraphqlRequest::new(Operation::AddSshKey.document())
        .var("id", key.id)?
        .var("name", &key.name)?
        .var("keyValue", &key.key_value)?
        .var("keyType", key.key_type)?
        .var("userEmail", &key.user_email)
}

fn delete_ssh_key_request(key: &DeleteSshKey) -> ApiResult<GraphqlRequest> {
    GraphqlRequest::new(Operation::DeleteSshKey.document()).var("name", &key.name)
}

impl ApiClient {
    /// Attach a public key to a user and return the JSON of the created
    /// `SshKey`.
    ///
    /// # Errors
    ///
    /// Returns executor failures unchanged, and
    /// [`crate::ApiError::NullResponse`] when the server returns no key.
    pub async fn add_ssh_key(&self, key: &AddSshKey) -> ApiResult<Vec<u8>> {
        let request = add_ssh_key_request(key)?;
        self.dispatch(Operation::AddSshKey, request).await
    }

    /// Remove the key named `key.name`; returns the server's status value.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::add_ssh_key`].
    pub async fn delete_ssh_key(&self, key: &DeleteSshKey) -> ApiResult<Vec<u8>> {
        let request = delete_ssh_key_request(key)?;
        self.dispatch(Operation::DeleteSshKey, request).await
    }
}
