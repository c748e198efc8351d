use lagoon_api::models::{AddSshKey, DeleteSshKey};

use crate::cli::{OutputFormat, SshKeyAddArgs, SshKeyDeleteArgs};
use crate::client::{AppContext, CliError, CliResult, classify_api_error, read_public_key};
use crate::output::render_payload;

pub(crate) async fn handle_ssh_key_add(
    ctx: &AppContext,
    args: SshKeyAddArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let key = add_request_from_args(args)?;
    let payload = ctx
        .api
        .add_ssh_key(&key)
        .await
        .map_err(classify_api_error)?;
    render_payload(&payload, format)
}

pub(crate) async fn handle_ssh_key_delete(
    ctx: &AppContext,
    args: SshKeyDeleteArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let key = DeleteSshKey { name: args.name };
    let payload = ctx
        .api
        .delete_ssh_key(&key)
        .await
        .map_err(classify_api_error)?;
    render_payload(&payload, format)
}

/// Key material comes from `--public-key`, or from `--key-value` plus
/// `--key-type`. The name falls back to the key file comment.
fn add_request_from_args(args: SshKeyAddArgs) -> CliResult<AddSshKey> {
    let (key_type, key_value, comment) = match (args.public_key, args.key_value, args.key_type) {
        (Some(path), _, _) => {
            let key = read_public_key(&path)?;
            (key.key_type, key.key_value, key.comment)
        }
        (None, Some(value), Some(kind)) => (kind, value, None),
        _ => {
            return Err(CliError::validation(
                "key material is required (pass --public-key, or --key-value with --key-type)",
            ));
        }
    };

    let name = args.name.or(comment).ok_or_else(|| {
        CliError::validation("--name is required when the public key has no comment")
    })?;

    Ok(AddSshKey {
        id: args.id,
        name,
        key_value,
        key_type,
        user_email: args.user_email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use httpmock::prelude::*;
    use lagoon_api::documents;
    use lagoon_api::models::SshKeyType;
    use serde_json::json;

    use crate::commands::testing::{GRAPHQL_PATH, context_with, key_file};

    fn bare_args() -> SshKeyAddArgs {
        SshKeyAddArgs {
            name: None,
            user_email: "ada@example.com".into(),
            id: None,
            key_value: None,
            key_type: None,
            public_key: None,
        }
    }

    #[test]
    fn public_key_comment_names_the_key() -> Result<()> {
        let path = key_file("ssh-rsa AAAAB3Nz ada@laptop\n")?;
        let request = add_request_from_args(SshKeyAddArgs {
            public_key: Some(path.clone()),
            ..bare_args()
        });
        std::fs::remove_file(&path)?;
        let request = request.map_err(|err| anyhow!(err.display_message()))?;
        assert_eq!(request.name, "ada@laptop");
        assert_eq!(request.key_type, SshKeyType::SshRsa);
        assert_eq!(request.key_value, "AAAAB3Nz");
        Ok(())
    }

    #[test]
    fn missing_name_or_material_is_a_validation_error() {
        let no_material = add_request_from_args(SshKeyAddArgs {
            name: Some("laptop".into()),
            ..bare_args()
        });
        assert_eq!(no_material.err().map(|err| err.exit_code()), Some(2));

        let no_name = add_request_from_args(SshKeyAddArgs {
            key_value: Some("AAAA".into()),
            key_type: Some(SshKeyType::SshEd25519),
            ..bare_args()
        });
        assert_eq!(no_name.err().map(|err| err.exit_code()), Some(2));
    }

    #[tokio::test]
    async fn ssh_key_add_binds_id_and_schema_enum() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path(GRAPHQL_PATH).json_body(json!({
                "query": documents::ADD_SSH_KEY,
                "variables": {
                    "id": 9,
                    "name": "laptop",
                    "keyValue": "AAAAC3Nz",
                    "keyType": "SSH_ED25519",
                    "userEmail": "ada@example.com"
                }
            }));
            then.status(200).json_body(json!({
                "data": {
                    "addSshKey": {
                        "id": 9,
                        "name": "laptop",
                        "keyValue": "AAAAC3Nz",
                        "keyType": "SSH_ED25519"
                    }
                }
            }));
        });

        let ctx = context_with(&server)?;
        let args = SshKeyAddArgs {
            name: Some("laptop".into()),
            id: Some(9),
            key_value: Some("AAAAC3Nz".into()),
            key_type: Some(SshKeyType::SshEd25519),
            ..bare_args()
        };
        handle_ssh_key_add(&ctx, args, OutputFormat::Table).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn ssh_key_delete_prints_status_scalar() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path(GRAPHQL_PATH).json_body(json!({
                "query": documents::DELETE_SSH_KEY,
                "variables": { "name": "laptop" }
            }));
            then.status(200)
                .json_body(json!({ "data": { "deleteSshKey": "success" } }));
        });

        let ctx = context_with(&server)?;
        handle_ssh_key_delete(
            &ctx,
            SshKeyDeleteArgs {
                name: "laptop".into(),
            },
            OutputFormat::Json,
        )
        .await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn graphql_errors_are_failures() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path(GRAPHQL_PATH);
            then.status(200).json_body(json!({
                "errors": [{ "message": "Unauthorized: You don't have permission" }]
            }));
        });

        let ctx = context_with(&server)?;
        let err = handle_ssh_key_delete(
            &ctx,
            SshKeyDeleteArgs {
                name: "laptop".into(),
            },
            OutputFormat::Json,
        )
        .await
        .err()
        .ok_or_else(|| anyhow!("expected graphql error"))?;
        mock.assert();
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().contains("Unauthorized"));
        Ok(())
    }
}
