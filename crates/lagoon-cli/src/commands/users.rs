use lagoon_api::models::{SshKeyValue, UpdateUser, UpdateUserPatch, User};

use crate::cli::{OutputFormat, UserAddArgs, UserBySshKeyArgs, UserDeleteArgs, UserUpdateArgs};
use crate::client::{AppContext, CliError, CliResult, classify_api_error, read_public_key};
use crate::output::render_payload;

pub(crate) async fn handle_user_add(
    ctx: &AppContext,
    args: UserAddArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let user = User {
        id: None,
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
        comment: args.comment,
        gitlab_id: args.gitlab_id,
    };
    let payload = ctx.api.add_user(&user).await.map_err(classify_api_error)?;
    render_payload(&payload, format)
}

pub(crate) async fn handle_user_update(
    ctx: &AppContext,
    args: UserUpdateArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let patch = UpdateUserPatch {
        email: args.new_email,
        first_name: args.first_name,
        last_name: args.last_name,
        comment: args.comment,
        gitlab_id: args.gitlab_id,
    };
    if patch.is_empty() {
        return Err(CliError::validation(
            "nothing to update (pass at least one of --new-email, --first-name, --last-name, --comment, --gitlab-id)",
        ));
    }

    let update = UpdateUser {
        user: User::with_email(args.email),
        patch,
    };
    let payload = ctx
        .api
        .update_user(&update)
        .await
        .map_err(classify_api_error)?;
    render_payload(&payload, format)
}

pub(crate) async fn handle_user_delete(
    ctx: &AppContext,
    args: UserDeleteArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let user = User::with_email(args.email);
    let payload = ctx
        .api
        .delete_user(&user)
        .await
        .map_err(classify_api_error)?;
    render_payload(&payload, format)
}

pub(crate) async fn handle_user_by_ssh_key(
    ctx: &AppContext,
    args: UserBySshKeyArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let key = match (args.key_value, args.public_key) {
        (Some(value), _) => SshKeyValue(value),
        (None, Some(path)) => SshKeyValue(read_public_key(&path)?.to_openssh()),
        (None, None) => {
            return Err(CliError::validation(
                "a key is required (pass --key-value or --public-key)",
            ));
        }
    };
    let payload = ctx
        .api
        .user_by_ssh_key(&key)
        .await
        .map_err(classify_api_error)?;
    render_payload(&payload, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use httpmock::prelude::*;
    use lagoon_api::documents;
    use serde_json::json;

    use crate::commands::testing::{GRAPHQL_PATH, context_with, key_file};

    fn add_args() -> UserAddArgs {
        UserAddArgs {
            email: "ada@example.com".into(),
            first_name: Some("Ada".into()),
            last_name: None,
            comment: None,
            gitlab_id: Some(42),
        }
    }

    fn update_args() -> UserUpdateArgs {
        UserUpdateArgs {
            email: "ada@example.com".into(),
            new_email: None,
            first_name: None,
            last_name: None,
            comment: None,
            gitlab_id: None,
        }
    }

    #[tokio::test]
    async fn user_add_sends_all_variables() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(GRAPHQL_PATH)
                .header("authorization", "Bearer secret")
                .json_body(json!({
                    "query": documents::ADD_USER,
                    "variables": {
                        "email": "ada@example.com",
                        "firstName": "Ada",
                        "lastName": null,
                        "comment": null,
                        "gitlabId": 42
                    }
                }));
            then.status(200).json_body(json!({
                "data": { "addUser": { "id": 1, "email": "ada@example.com" } }
            }));
        });

        let ctx = context_with(&server)?;
        handle_user_add(&ctx, add_args(), OutputFormat::Json).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn user_update_sends_sparse_patch() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path(GRAPHQL_PATH).json_body(json!({
                "query": documents::UPDATE_USER,
                "variables": {
                    "email": "ada@example.com",
                    "patch": { "lastName": "King" }
                }
            }));
            then.status(200).json_body(json!({
                "data": { "updateUser": { "email": "ada@example.com", "lastName": "King" } }
            }));
        });

        let ctx = context_with(&server)?;
        let args = UserUpdateArgs {
            last_name: Some("King".into()),
            ..update_args()
        };
        handle_user_update(&ctx, args, OutputFormat::Table).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn user_update_without_changes_is_rejected_locally() -> Result<()> {
        let server = MockServer::start_async().await;
        let ctx = context_with(&server)?;
        let err = handle_user_update(&ctx, update_args(), OutputFormat::Json)
            .await
            .err()
            .ok_or_else(|| anyhow!("expected validation error"))?;
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("--new-email"));
        Ok(())
    }

    #[tokio::test]
    async fn user_delete_prints_status_scalar() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path(GRAPHQL_PATH).json_body(json!({
                "query": documents::DELETE_USER,
                "variables": { "email": "ada@example.com" }
            }));
            then.status(200)
                .json_body(json!({ "data": { "deleteUser": "success" } }));
        });

        let ctx = context_with(&server)?;
        handle_user_delete(
            &ctx,
            UserDeleteArgs {
                email: "ada@example.com".into(),
            },
            OutputFormat::Table,
        )
        .await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn user_by_ssh_key_reads_public_key_file() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path(GRAPHQL_PATH).json_body(json!({
                "query": documents::USER_BY_SSH_KEY,
                "variables": { "sshKey": "ssh-ed25519 AAAAC3Nz" }
            }));
            then.status(200).json_body(json!({
                "data": { "userBySshKey": { "email": "ada@example.com" } }
            }));
        });

        let ctx = context_with(&server)?;
        let path = key_file("ssh-ed25519 AAAAC3Nz ada@laptop\n")?;
        let result = handle_user_by_ssh_key(
            &ctx,
            UserBySshKeyArgs {
                key_value: None,
                public_key: Some(path.clone()),
            },
            OutputFormat::Json,
        )
        .await;
        std::fs::remove_file(&path)?;
        result?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn user_by_ssh_key_without_match_is_a_failure() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path(GRAPHQL_PATH);
            then.status(200)
                .json_body(json!({ "data": { "userBySshKey": null } }));
        });

        let ctx = context_with(&server)?;
        let err = handle_user_by_ssh_key(
            &ctx,
            UserBySshKeyArgs {
                key_value: Some("ssh-rsa AAAAB3Nz".into()),
                public_key: None,
            },
            OutputFormat::Json,
        )
        .await
        .err()
        .ok_or_else(|| anyhow!("expected null response"))?;
        mock.assert();
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().contains("null response"));
        Ok(())
    }

    #[tokio::test]
    async fn conflicting_user_is_a_validation_error() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path(GRAPHQL_PATH);
            then.status(409).body("user already exists");
        });

        let ctx = context_with(&server)?;
        let err = handle_user_add(&ctx, add_args(), OutputFormat::Json)
            .await
            .err()
            .ok_or_else(|| anyhow!("expected conflict"))?;
        mock.assert();
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("user already exists"));
        Ok(())
    }
}
