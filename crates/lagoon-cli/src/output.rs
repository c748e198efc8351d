//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use lagoon_api::models::{SshKey, User};
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

/// Print the JSON bytes of a result field in the selected format.
pub(crate) fn render_payload(bytes: &[u8], format: OutputFormat) -> CliResult<()> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|err| CliError::failure(anyhow!("response is not valid JSON: {err}")))?;
    println!("{}", format_payload(&value, format)?);
    Ok(())
}

pub(crate) fn format_payload(value: &Value, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}"))),
        OutputFormat::Table => Ok(format_table(value)),
    }
}

fn format_table(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(map) if map.contains_key("email") => {
            serde_json::from_value::<User>(value.clone())
                .map_or_else(|_| format_fields(value), |user| format_user(&user))
        }
        Value::Object(map) if map.contains_key("keyValue") => {
            serde_json::from_value::<SshKey>(value.clone())
                .map_or_else(|_| format_fields(value), |key| format_ssh_key(&key))
        }
        Value::Object(_) => format_fields(value),
        other => other.to_string(),
    }
}

fn format_user(user: &User) -> String {
    let mut out = String::new();
    if let Some(id) = user.id {
        let _ = writeln!(out, "id: {id}");
    }
    let _ = writeln!(out, "email: {}", user.email);
    let name = [user.first_name.as_deref(), user.last_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if !name.is_empty() {
        let _ = writeln!(out, "name: {name}");
    }
    if let Some(comment) = &user.comment {
        let _ = writeln!(out, "comment: {comment}");
    }
    if let Some(gitlab_id) = user.gitlab_id {
        let _ = writeln!(out, "gitlab id: {gitlab_id}");
    }
    out.trim_end().to_string()
}

fn format_ssh_key(key: &SshKey) -> String {
    let mut out = String::new();
    if let Some(id) = key.id {
        let _ = writeln!(out, "id: {id}");
    }
    let _ = writeln!(out, "name: {}", key.name);
    let _ = writeln!(out, "type: {}", key.key_type.openssh_name());
    let _ = write!(out, "key: {}", abbreviate(&key.key_value));
    out
}

fn format_fields(value: &Value) -> String {
    let Value::Object(map) = value else {
        return value.to_string();
    };
    map.iter()
        .map(|(key, field)| match field {
            Value::Null => format!("{key}: -"),
            Value::String(text) => format!("{key}: {text}"),
            other => format!("{key}: {other}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn abbreviate(key_value: &str) -> String {
    const EDGE: usize = 12;
    if key_value.len() <= EDGE * 2 || !key_value.is_ascii() {
        return key_value.to_string();
    }
    format!(
        "{}...{}",
        &key_value[..EDGE],
        &key_value[key_value.len() - EDGE..]
    )
}
