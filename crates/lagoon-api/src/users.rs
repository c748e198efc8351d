//! User operations.

use lagoon_api_models::{SshKeyValue, UpdateUser, User};

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::executor::GraphqlRequest;
use crate::operation::Operation;

fn add_user_request(user: &User) -> ApiResult<GraphqlRequest> {
    GraphqlRequest::new(Operation::AddUser.document())
        .var("email", &user.email)?
        .var("firstName", &user.first_name)?
        .var("lastName", &user.last_name)?
        .var("comment", &user.comment)?
        .var("gitlabId", user.gitlab_id)
}

fn update_user_request(update: &UpdateUser) -> ApiResult<GraphqlRequest> {
    GraphqlRequest::new(Operation::UpdateUser.document())
        .var("email", &update.user.email)?
        .var("patch", &update.patch)
}

fn delete_user_request(user: &User) -> ApiResult<GraphqlRequest> {
    GraphqlRequest::new(Operation::DeleteUser.document()).var("email", &user.email)
}

fn user_by_ssh_key_request(key: &SshKeyValue) -> ApiResult<GraphqlRequest> {
    GraphqlRequest::new(Operation::UserBySshKey.document()).var("sshKey", key)
}

impl ApiClient {
    /// Create a user and return the JSON of the created `User`.
    ///
    /// Unset optional fields are bound as `null`.
    ///
    /// # Errors
    ///
    /// Returns executor failures unchanged, and
    /// [`crate::ApiError::NullResponse`] when the server returns no user.
    pub async fn add_user(&self, user: &User) -> ApiResult<Vec<u8>> {
        let request = add_user_request(user)?;
        self.dispatch(Operation::AddUser, request).await
    }

    /// Apply `update.patch` to the user selected by `update.user.email`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::add_user`].
    pub async fn update_user(&self, update: &UpdateUser) -> ApiResult<Vec<u8>> {
        let request = update_user_request(update)?;
        self.dispatch(Operation::UpdateUser, request).await
    }

    /// Delete the user with `user.email`; returns the server's status value.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::add_user`]. A user that does not exist surfaces as
    /// [`crate::ApiError::NullResponse`].
    pub async fn delete_user(&self, user: &User) -> ApiResult<Vec<u8>> {
        let request = delete_user_request(user)?;
        self.dispatch(Operation::DeleteUser, request).await
    }

    /// Look up the user owning the given public key.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::add_user`].
    pub async fn user_by_ssh_key(&self, key: &SshKeyValue) -> ApiResult<Vec<u8>> {
        let request = user_by_ssh_key_request(key)?;
        self.dispatch(Operation::UserBySshKey, request).await
    }
}
