//! Command-line client for administering users and SSH keys on a Lagoon API.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use lagoon_api::config::DEFAULT_TIMEOUT;
use lagoon_api::models::SshKeyType;
use lagoon_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use url::Url;

use crate::client::{AppContext, CliResult};
use crate::commands::ssh_keys::{handle_ssh_key_add, handle_ssh_key_delete};
use crate::commands::users::{
    handle_user_add, handle_user_by_ssh_key, handle_user_delete, handle_user_update,
};

pub(crate) const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/graphql";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = DEFAULT_TIMEOUT.as_secs();
const DEBUG_DIRECTIVES: &[&str] = &["lagoon_api=debug", "lagoon_cli=debug"];

/// Parses CLI arguments, installs logging, and executes the requested command.
/// Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: DEFAULT_LOG_LEVEL,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        directives: debug_directives(cli.debug),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

/// Filter directives that surface request/response dumps regardless of `RUST_LOG`.
const fn debug_directives(debug: bool) -> &'static [&'static str] {
    if debug { DEBUG_DIRECTIVES } else { &[] }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let ctx = AppContext::from_cli(&cli)?;
    let format = cli.output;

    match cli.command {
        Command::User(users) => match users {
            UserCommand::Add(args) => handle_user_add(&ctx, args, format).await,
            UserCommand::Update(args) => handle_user_update(&ctx, args, format).await,
            UserCommand::Delete(args) => handle_user_delete(&ctx, args, format).await,
            UserCommand::BySshKey(args) => handle_user_by_ssh_key(&ctx, args, format).await,
        },
        Command::SshKey(keys) => match keys {
            SshKeyCommand::Add(args) => handle_ssh_key_add(&ctx, args, format).await,
            SshKeyCommand::Delete(args) => handle_ssh_key_delete(&ctx, args, format).await,
        },
    }
}

#[derive(Parser)]
#[command(name = "lagoon", about = "Manage Lagoon users and SSH keys")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "LAGOON_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL
    )]
    pub(crate) api_url: Url,
    #[arg(long, global = true, env = "LAGOON_TOKEN", hide_env_values = true)]
    pub(crate) token: Option<String>,
    #[arg(
        long,
        global = true,
        env = "LAGOON_HTTP_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..),
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long,
        global = true,
        env = "LAGOON_DEBUG",
        help = "Log every GraphQL request and the returned result field"
    )]
    pub(crate) debug: bool,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Json,
        help = "Select output format for the returned payload"
    )]
    pub(crate) output: OutputFormat,
    #[arg(long, global = true, env = "LAGOON_LOG_FORMAT", value_parser = parse_log_format)]
    pub(crate) log_format: Option<LogFormat>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    #[command(subcommand)]
    User(UserCommand),
    #[command(subcommand)]
    SshKey(SshKeyCommand),
}

#[derive(Subcommand)]
pub(crate) enum UserCommand {
    /// Create a user.
    Add(UserAddArgs),
    /// Change fields on an existing user.
    Update(UserUpdateArgs),
    /// Delete a user by email.
    Delete(UserDeleteArgs),
    /// Find the user owning a public key.
    BySshKey(UserBySshKeyArgs),
}

#[derive(Subcommand)]
pub(crate) enum SshKeyCommand {
    /// Attach a public key to a user.
    Add(SshKeyAddArgs),
    /// Remove a key by name.
    Delete(SshKeyDeleteArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct UserAddArgs {
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) first_name: Option<String>,
    #[arg(long)]
    pub(crate) last_name: Option<String>,
    #[arg(long)]
    pub(crate) comment: Option<String>,
    #[arg(long)]
    pub(crate) gitlab_id: Option<i64>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct UserUpdateArgs {
    #[arg(long, help = "Email of the user to update")]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) new_email: Option<String>,
    #[arg(long)]
    pub(crate) first_name: Option<String>,
    #[arg(long)]
    pub(crate) last_name: Option<String>,
    #[arg(long)]
    pub(crate) comment: Option<String>,
    #[arg(long)]
    pub(crate) gitlab_id: Option<i64>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct UserDeleteArgs {
    #[arg(long)]
    pub(crate) email: String,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct UserBySshKeyArgs {
    #[arg(long, conflicts_with = "public_key")]
    pub(crate) key_value: Option<String>,
    #[arg(long, help = "Read the key from an OpenSSH public key file")]
    pub(crate) public_key: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct SshKeyAddArgs {
    #[arg(long, help = "Key name; defaults to the public key comment")]
    pub(crate) name: Option<String>,
    #[arg(long)]
    pub(crate) user_email: String,
    #[arg(long)]
    pub(crate) id: Option<i64>,
    #[arg(long, conflicts_with = "public_key", requires = "key_type")]
    pub(crate) key_value: Option<String>,
    #[arg(long, value_parser = parse_key_type, conflicts_with = "public_key")]
    pub(crate) key_type: Option<SshKeyType>,
    #[arg(long, help = "Read type and key material from an OpenSSH public key file")]
    pub(crate) public_key: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct SshKeyDeleteArgs {
    #[arg(long)]
    pub(crate) name: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Table,
}

pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

pub(crate) fn parse_key_type(input: &str) -> Result<SshKeyType, String> {
    input
        .parse::<SshKeyType>()
        .map_err(|err| format!("{err} '{input}'"))
}

pub(crate) fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse::<LogFormat>().map_err(|err| err.to_string())
}
