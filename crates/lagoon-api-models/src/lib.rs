#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared payload types for the Lagoon administration API.
//!
//! These types are used by the dispatcher to bind GraphQL variables and by the
//! CLI to build requests and render responses. Field names follow the remote
//! schema (`camelCase`) so a payload can be serialized straight into a
//! variable set.
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing key material supplied by an operator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The public key line was blank.
    #[error("public key is empty")]
    EmptyPublicKey,
    /// The public key line carried a type but no key material.
    #[error("public key is missing key material")]
    MissingKeyMaterial,
    /// The key type is not one the remote schema accepts.
    #[error("unsupported ssh key type")]
    UnknownKeyType {
        /// Key type label provided by the caller.
        value: String,
    },
}

/// User record as submitted to and returned by the administration API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Server-assigned identifier, only present on responses.
    pub id: Option<i64>,
    /// Email address; the unique key for lookups and mutations.
    pub email: String,
    #[serde(default)]
    /// Given name.
    pub first_name: Option<String>,
    #[serde(default)]
    /// Family name.
    pub last_name: Option<String>,
    #[serde(default)]
    /// Free-text comment attached to the account.
    pub comment: Option<String>,
    #[serde(default)]
    /// Identifier of the linked GitLab account.
    pub gitlab_id: Option<i64>,
}

impl User {
    /// Build a user selector carrying only the email address.
    #[must_use]
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }
}

/// Partial user used as the `patch` payload of `updateUser`.
///
/// Unset fields are omitted from the serialized payload so the server leaves
/// them untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement email address.
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement given name.
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement family name.
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement comment.
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement GitLab identifier.
    pub gitlab_id: Option<i64>,
}

impl UpdateUserPatch {
    /// Returns `true` when no field would be changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.comment.is_none()
            && self.gitlab_id.is_none()
    }
}

/// Update request: the user to change plus the fields to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateUser {
    /// Selector for the user being updated; only the email is used.
    pub user: User,
    /// Fields to change.
    pub patch: UpdateUserPatch,
}

/// SSH key algorithms accepted by the remote schema.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SshKeyType {
    /// `ssh-rsa`
    SshRsa,
    /// `ssh-ed25519`
    SshEd25519,
    /// `ecdsa-sha2-nistp256`
    EcdsaSha2Nistp256,
    /// `ecdsa-sha2-nistp384`
    EcdsaSha2Nistp384,
    /// `ecdsa-sha2-nistp521`
    EcdsaSha2Nistp521,
}

impl SshKeyType {
    /// Enum value used by the GraphQL schema.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SshRsa => "SSH_RSA",
            Self::SshEd25519 => "SSH_ED25519",
            Self::EcdsaSha2Nistp256 => "ECDSA_SHA2_NISTP256",
            Self::EcdsaSha2Nistp384 => "ECDSA_SHA2_NISTP384",
            Self::EcdsaSha2Nistp521 => "ECDSA_SHA2_NISTP521",
        }
    }

    /// Algorithm name as written in an OpenSSH public key line.
    #[must_use]
    pub const fn openssh_name(self) -> &'static str {
        match self {
            Self::SshRsa => "ssh-rsa",
            Self::SshEd25519 => "ssh-ed25519",
            Self::EcdsaSha2Nistp256 => "ecdsa-sha2-nistp256",
            Self::EcdsaSha2Nistp384 => "ecdsa-sha2-nistp384",
            Self::EcdsaSha2Nistp521 => "ecdsa-sha2-nistp521",
        }
    }

    const ALL: [Self; 5] = [
        Self::SshRsa,
        Self::SshEd25519,
        Self::EcdsaSha2Nistp256,
        Self::EcdsaSha2Nistp384,
        Self::EcdsaSha2Nistp521,
    ];
}

impl Display for SshKeyType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SshKeyType {
    type Err = ModelError;

    /// Accepts either the schema spelling (`SSH_ED25519`) or the OpenSSH
    /// spelling (`ssh-ed25519`), case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.as_str().eq_ignore_ascii_case(trimmed)
                    || kind.openssh_name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| ModelError::UnknownKeyType {
                value: trimmed.to_string(),
            })
    }
}

/// SSH key record as returned by the `SshKey` fragment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SshKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Server-assigned identifier.
    pub id: Option<i64>,
    /// Key name; the identifier used for deletion.
    pub name: String,
    /// Base64 key material without the algorithm prefix.
    pub key_value: String,
    /// Key algorithm.
    pub key_type: SshKeyType,
}

/// Request payload for `addSshKey`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddSshKey {
    /// Optional explicit identifier.
    pub id: Option<i64>,
    /// Key name.
    pub name: String,
    /// Base64 key material.
    pub key_value: String,
    /// Key algorithm.
    pub key_type: SshKeyType,
    /// Email of the user that will own the key.
    pub user_email: String,
}

/// Request payload for `deleteSshKey`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteSshKey {
    /// Name of the key to remove.
    pub name: String,
}

/// Public key material used to look a user up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SshKeyValue(pub String);

impl SshKeyValue {
    /// Borrow the raw key material.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SshKeyValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A parsed OpenSSH public key line (`<type> <base64> [comment]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    /// Key algorithm.
    pub key_type: SshKeyType,
    /// Base64 key material.
    pub key_value: String,
    /// Trailing comment, usually `user@host`.
    pub comment: Option<String>,
}

impl PublicKey {
    /// Parse a single OpenSSH public key line.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when the line is blank, lacks key material, or
    /// names an algorithm the schema does not support.
    pub fn parse(line: &str) -> Result<Self, ModelError> {
        let mut parts = line.split_whitespace();
        let kind = parts.next().ok_or(ModelError::EmptyPublicKey)?;
        let key_type = kind.parse::<SshKeyType>()?;
        let key_value = parts.next().ok_or(ModelError::MissingKeyMaterial)?;
        let comment = parts.collect::<Vec<_>>().join(" ");

        Ok(Self {
            key_type,
            key_value: key_value.to_string(),
            comment: (!comment.is_empty()).then_some(comment),
        })
    }

    /// Render the key back into `<type> <base64>` form, dropping the comment.
    #[must_use]
    pub fn to_openssh(&self) -> String {
        format!("{} {}", self.key_type.openssh_name(), self.key_value)
    }
}
