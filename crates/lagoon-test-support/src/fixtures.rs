//! Sample payloads shaped like real API traffic.

use lagoon_api::Operation;
use lagoon_api::models::{AddSshKey, DeleteSshKey, SshKeyType, SshKeyValue, UpdateUser, User};
use serde_json::{Value, json};

/// Ed25519 key material used throughout the fixtures.
pub const SAMPLE_KEY_VALUE: &str =
    "AAAAC3NzaC1lZDI1NTE5AAAAIMdoNOuHx8rRjYB5vHMhm2zn3Kcj6sB8V4ubnJm2B6tT";

/// A fully populated user request.
#[must_use]
pub fn sample_user() -> User {
    User {
        id: None,
        email: "ada@example.com".into(),
        first_name: Some("Ada".into()),
        last_name: Some("Lovelace".into()),
        comment: Some("platform team".into()),
        gitlab_id: Some(42),
    }
}

/// An update that renames the sample user.
#[must_use]
pub fn sample_update() -> UpdateUser {
    let mut update = UpdateUser {
        user: User::with_email("ada@example.com"),
        ..UpdateUser::default()
    };
    update.patch.last_name = Some("King".into());
    update
}

/// A key request owned by the sample user.
#[must_use]
pub fn sample_add_ssh_key() -> AddSshKey {
    AddSshKey {
        id: None,
        name: "ada-laptop".into(),
        key_value: SAMPLE_KEY_VALUE.into(),
        key_type: SshKeyType::SshEd25519,
        user_email: "ada@example.com".into(),
    }
}

/// A delete request for the sample key.
#[must_use]
pub fn sample_delete_ssh_key() -> DeleteSshKey {
    DeleteSshKey {
        name: "ada-laptop".into(),
    }
}

/// The sample key in `<type> <base64>` form.
#[must_use]
pub fn sample_key_value() -> SshKeyValue {
    SshKeyValue(format!("ssh-ed25519 {SAMPLE_KEY_VALUE}"))
}

/// A `User` fragment payload as the server would return it.
#[must_use]
pub fn user_payload() -> Value {
    json!({
        "id": 7,
        "email": "ada@example.com",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "comment": "platform team",
        "gitlabId": 42
    })
}

/// An `SshKey` fragment payload as the server would return it.
#[must_use]
pub fn ssh_key_payload() -> Value {
    json!({
        "id": 3,
        "name": "ada-laptop",
        "keyValue": SAMPLE_KEY_VALUE,
        "keyType": "SSH_ED25519"
    })
}

/// The payload the server returns for `operation`.
#[must_use]
pub fn payload_for(operation: Operation) -> Value {
    match operation {
        Operation::AddUser | Operation::UpdateUser | Operation::UserBySshKey => user_payload(),
        Operation::AddSshKey => ssh_key_payload(),
        Operation::DeleteUser | Operation::DeleteSshKey => json!("success"),
    }
}

/// A `data` object answering `operation`.
#[must_use]
pub fn data_for(operation: Operation) -> Value {
    let mut data = serde_json::Map::new();
    data.insert(operation.field().to_string(), payload_for(operation));
    Value::Object(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_for_keys_payload_by_field_name() {
        for operation in Operation::ALL {
            let data = data_for(operation);
            assert_eq!(data.get(operation.field()), Some(&payload_for(operation)));
        }
    }

    #[test]
    fn sample_update_only_patches_last_name() {
        let update = sample_update();
        assert_eq!(update.patch.last_name.as_deref(), Some("King"));
        assert!(update.patch.email.is_none());
    }
}
