//! API client construction, error types, and key file helpers for the CLI.

use std::fmt::{self, Display, Formatter};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, anyhow};
use lagoon_api::models::PublicKey;
use lagoon_api::{ApiClient, ApiConfig, ApiError};
use tracing::debug;

use crate::cli::Cli;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Shared state handed to every command handler.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) api: ApiClient,
}

impl AppContext {
    pub(crate) fn from_cli(cli: &Cli) -> CliResult<Self> {
        let mut config = ApiConfig::new(cli.api_url.clone())
            .with_timeout(Duration::from_secs(cli.timeout))
            .with_debug(cli.debug);
        if let Some(token) = cli.token.as_deref().map(str::trim)
            && !token.is_empty()
        {
            config = config.with_token(token);
        }
        debug!(
            endpoint = %config.endpoint,
            timeout_secs = cli.timeout,
            authenticated = config.token.is_some(),
            "api client configured"
        );
        Self::from_config(&config)
    }

    pub(crate) fn from_config(config: &ApiConfig) -> CliResult<Self> {
        let api = ApiClient::from_config(config).map_err(classify_api_error)?;
        Ok(Self { api })
    }
}

/// Map dispatcher failures onto CLI exit semantics.
///
/// Rejections the operator can fix by changing input exit with the validation
/// code; everything else is an operational failure.
pub(crate) fn classify_api_error(err: ApiError) -> CliError {
    match err {
        ApiError::InvalidToken => CliError::validation(err.to_string()),
        ApiError::Status {
            status: status @ (400 | 409 | 422),
            ref body,
        } => {
            if body.is_empty() {
                CliError::validation(format!("request rejected with status {status}"))
            } else {
                CliError::validation(format!("request rejected with status {status}: {body}"))
            }
        }
        ApiError::Status { status, ref body } if !body.is_empty() => {
            CliError::failure(anyhow!("graphql endpoint returned status {status}: {body}"))
        }
        other => CliError::failure(other),
    }
}

/// Read the first key line from an OpenSSH public key file.
pub(crate) fn read_public_key(path: &Path) -> CliResult<PublicKey> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))
        .map_err(CliError::failure)?;

    let line = contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .ok_or_else(|| CliError::validation(format!("{} contains no key", path.display())))?;

    PublicKey::parse(line)
        .map_err(|err| CliError::validation(format!("{}: {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::commands::testing::key_file as temp_key_file;

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(CliError::validation("bad").exit_code(), 2);
        assert_eq!(CliError::failure(anyhow!("boom")).exit_code(), 3);
        assert_eq!(CliError::validation("bad").display_message(), "bad");
    }

    #[test]
    fn rejected_requests_are_validation_errors() {
        for status in [400, 409, 422] {
            let err = classify_api_error(ApiError::Status {
                status,
                body: "duplicate email".into(),
            });
            assert_eq!(err.exit_code(), 2);
            assert!(err.display_message().contains("duplicate email"));
        }
        assert_eq!(classify_api_error(ApiError::InvalidToken).exit_code(), 2);
    }

    #[test]
    fn remaining_errors_are_failures() {
        let status = classify_api_error(ApiError::Status {
            status: 502,
            body: "bad gateway".into(),
        });
        assert_eq!(status.exit_code(), 3);
        assert!(status.display_message().contains("502: bad gateway"));

        let graphql = classify_api_error(ApiError::Graphql {
            messages: vec!["Unauthorized".into()],
        });
        assert_eq!(graphql.exit_code(), 3);
        assert!(graphql.display_message().contains("Unauthorized"));

        let null = classify_api_error(ApiError::NullResponse {
            operation: "userBySshKey",
        });
        assert_eq!(null.exit_code(), 3);
        assert!(null.display_message().contains("--debug"));
    }

    #[test]
    fn public_key_file_skips_comments() -> anyhow::Result<()> {
        let path = temp_key_file("# laptop\n\nssh-ed25519 AAAAC3Nz ada@laptop\n")?;
        let key = read_public_key(&path).map_err(|err| anyhow!(err.display_message()))?;
        std::fs::remove_file(&path)?;
        assert_eq!(key.key_value, "AAAAC3Nz");
        assert_eq!(key.comment.as_deref(), Some("ada@laptop"));
        Ok(())
    }

    #[test]
    fn public_key_file_errors_are_classified() -> anyhow::Result<()> {
        let empty = temp_key_file("\n# nothing here\n")?;
        let err = read_public_key(&empty).err();
        std::fs::remove_file(&empty)?;
        assert_eq!(err.map(|err| err.exit_code()), Some(2));

        let bad = temp_key_file("ssh-dss AAAA\n")?;
        let err = read_public_key(&bad).err();
        std::fs::remove_file(&bad)?;
        assert_eq!(err.map(|err| err.exit_code()), Some(2));

        let missing = std::env::temp_dir().join(format!("lagoon-cli-missing-{}", Uuid::new_v4()));
        assert_eq!(read_public_key(&missing).err().map(|err| err.exit_code()), Some(3));
        Ok(())
    }
}
