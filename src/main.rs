mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod telemetry;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::Level;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::fields::{self, FieldsCommandArgs};
use crate::cmd::scan;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::github::GitHubClient;
use crate::infra::jira::JiraClient;
use crate::infra::notifier::WebhookNotifier;

#[derive(Parser)]
#[command(
    name = "dependabot-tickets",
    author,
    version,
    about = "File Jira tickets for open Dependabot alerts"
)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,
    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the organization once and file tickets for open alerts.
    Scan(ScanArgs),
    /// Print tracker metadata for a custom field.
    Fields(FieldsArgs),
    /// Inspect the configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Report what would be filed without creating tickets.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct FieldsArgs {
    /// Field id, e.g. customfield_11536.
    field_id: String,
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

async fn run() -> AppResult<i32> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    telemetry::init_tracing(cli.log_json, level);

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(0)
        }
        Commands::Scan(args) => run_scan(args).await,
        Commands::Fields(args) => run_fields(args).await,
    }
}

fn build_context(config: AppConfig) -> AppResult<AppContext> {
    let source_control = Arc::new(GitHubClient::new(&config.github)?);
    let issue_tracker = Arc::new(JiraClient::new(&config.jira));
    let notifier = Arc::new(WebhookNotifier::new(config.notification_topic.clone()));
    Ok(AppContext::new(config, source_control, issue_tracker, notifier))
}

async fn run_scan(args: ScanArgs) -> AppResult<i32> {
    let mut config = AppConfig::from_env()?;
    config.dry_run |= args.dry_run;
    if config.dry_run {
        tracing::info!("dry run enabled; no tickets will be created");
    }

    let context = build_context(config)?;
    let response = scan::run(&context).await;

    println!("{}", serde_json::to_string(&response)?);
    Ok(if response.is_success() { 0 } else { 1 })
}

async fn run_fields(args: FieldsArgs) -> AppResult<i32> {
    let context = build_context(AppConfig::from_env()?)?;
    let report = fields::run(
        &context,
        FieldsCommandArgs {
            field_id: args.field_id,
        },
    )
    .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(0)
}
