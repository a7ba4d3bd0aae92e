use clap::{Args, Subcommand};

use crate::config::AppConfig;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the configuration resolved from the environment (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(),
    }
}

fn run_show() -> AppResult<()> {
    let cfg = AppConfig::from_env()?;
    for line in render(&cfg) {
        println!("{line}");
    }
    Ok(())
}

fn render(cfg: &AppConfig) -> Vec<String> {
    let custom_fields = if cfg.jira.fields.custom.is_empty() {
        "<none>".to_string()
    } else {
        cfg.jira
            .fields
            .custom
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    vec![
        format!("Dry run: {}", cfg.dry_run),
        format!("Notification topic: {}", cfg.notification_topic),
        format!("GitHub API URL: {}", cfg.github.api_url),
        format!("GitHub organization: {}", cfg.github.organization),
        format!("GitHub token: {}", mask_secret(&cfg.github.token)),
        format!("Repository type: {}", cfg.github.repo_type),
        format!("Jira base URL: {}", cfg.jira.base_url),
        format!("Jira username: {}", cfg.jira.username),
        format!("Jira API token: {}", mask_secret(&cfg.jira.api_token)),
        format!("Jira project: {}", cfg.jira.project_key),
        format!("Jira security epic: {}", cfg.jira.security_epic),
        format!("Jira issue type: {}", cfg.jira.issue_type),
        format!("Epic field: {}", cfg.jira.fields.epic_field),
        format!("Custom fields: {custom_fields}"),
    ]
}

fn mask_secret(value: &str) -> String {
    let count = value.chars().count();
    match value {
        token if count > 6 => {
            let prefix: String = token.chars().take(3).collect();
            let suffix: String = token.chars().skip(count - 3).collect();
            format!("{prefix}***{suffix}")
        }
        token if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
