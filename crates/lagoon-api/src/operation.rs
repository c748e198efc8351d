//! Operation names and the typed response envelope.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::documents;
use crate::error::{ApiError, ApiResult};

/// Every operation the dispatcher can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `addUser` mutation.
    AddUser,
    /// `updateUser` mutation.
    UpdateUser,
    /// `deleteUser` mutation.
    DeleteUser,
    /// `userBySshKey` query.
    UserBySshKey,
    /// `addSshKey` mutation.
    AddSshKey,
    /// `deleteSshKey` mutation.
    DeleteSshKey,
}

impl Operation {
    /// All operations, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::AddUser,
        Self::UpdateUser,
        Self::DeleteUser,
        Self::UserBySshKey,
        Self::AddSshKey,
        Self::DeleteSshKey,
    ];

    /// Name of the top-level result field in the response `data` object.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::AddUser => "addUser",
            Self::UpdateUser => "updateUser",
            Self::DeleteUser => "deleteUser",
            Self::UserBySshKey => "userBySshKey",
            Self::AddSshKey => "addSshKey",
            Self::DeleteSshKey => "deleteSshKey",
        }
    }

    /// Document text sent for this operation.
    #[must_use]
    pub const fn document(self) -> &'static str {
        match self {
            Self::AddUser => documents::ADD_USER,
            Self::UpdateUser => documents::UPDATE_USER,
            Self::DeleteUser => documents::DELETE_USER,
            Self::UserBySshKey => documents::USER_BY_SSH_KEY,
            Self::AddSshKey => documents::ADD_SSH_KEY,
            Self::DeleteSshKey => documents::DELETE_SSH_KEY,
        }
    }
}

/// Decoded `data` object with one slot per supported operation.
///
/// A slot is `None` when the server returned `null` or omitted the field.
/// Payloads stay as [`Value`] so they re-encode exactly as received.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    /// Result of `addUser`.
    #[serde(default)]
    pub add_user: Option<Value>,
    /// Result of `updateUser`.
    #[serde(default)]
    pub update_user: Option<Value>,
    /// Result of `deleteUser`.
    #[serde(default)]
    pub delete_user: Option<Value>,
    /// Result of `userBySshKey`.
    #[serde(default)]
    pub user_by_ssh_key: Option<Value>,
    /// Result of `addSshKey`.
    #[serde(default)]
    pub add_ssh_key: Option<Value>,
    /// Result of `deleteSshKey`.
    #[serde(default)]
    pub delete_ssh_key: Option<Value>,
}

impl ResponseData {
    /// Decode the `data` object returned by an executor. A `null` data object
    /// decodes to an envelope with every slot empty.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when `data` is neither an object nor null.
    pub fn decode(data: Value) -> ApiResult<Self> {
        let Some(object) = serde_json::from_value::<Option<Map<String, Value>>>(data)
            .map_err(|source| ApiError::Decode { source })?
        else {
            return Ok(Self::default());
        };
        serde_json::from_value(Value::Object(object)).map_err(|source| ApiError::Decode { source })
    }

    /// Move the slot belonging to `operation` out of the envelope.
    #[must_use]
    pub fn take(self, operation: Operation) -> Option<Value> {
        match operation {
            Operation::AddUser => self.add_user,
            Operation::UpdateUser => self.update_user,
            Operation::DeleteUser => self.delete_user,
            Operation::UserBySshKey => self.user_by_ssh_key,
            Operation::AddSshKey => self.add_ssh_key,
            Operation::DeleteSshKey => self.delete_ssh_key,
        }
    }
}
