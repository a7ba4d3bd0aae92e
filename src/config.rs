use std::env;

use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_REPO_TYPE: &str = "private";
pub const DEFAULT_ISSUE_TYPE: &str = "Task";
pub const DEFAULT_EPIC_FIELD: &str = "customfield_10007";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dry_run: bool,
    pub notification_topic: String,
    pub github: GitHubConfig,
    pub jira: JiraConfig,
}

#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_url: String,
    pub organization: String,
    pub token: String,
    pub repo_type: String,
}

#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub base_url: String,
    pub username: String,
    pub api_token: String,
    pub project_key: String,
    pub security_epic: String,
    pub issue_type: String,
    pub fields: FieldMapping,
}

/// Instance-specific issue fields. The epic key is written into `epic_field`
/// and every entry of `custom` is merged into the issue body unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMapping {
    pub epic_field: String,
    pub custom: Map<String, Value>,
}

impl FieldMapping {
    pub fn parse(epic_field: Option<String>, custom: Option<&str>) -> AppResult<Self> {
        let custom = match custom.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    return Err(AppError::Configuration(
                        "JIRA_CUSTOM_FIELDS must be a JSON object".to_string(),
                    ));
                }
                Err(err) => {
                    return Err(AppError::Configuration(format!(
                        "JIRA_CUSTOM_FIELDS is not valid JSON: {err}"
                    )));
                }
            },
            None => Map::new(),
        };

        Ok(Self {
            epic_field: epic_field.unwrap_or_else(|| DEFAULT_EPIC_FIELD.to_string()),
            custom,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |key: &str| {
            optional(key)
                .ok_or_else(|| AppError::Configuration(format!("{key} is not set")))
        };

        let dry_run = optional("DRY_RUN")
            .map(|value| value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let github = GitHubConfig {
            api_url: optional("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            organization: required("ORGANIZATION_NAME")?,
            token: required("GITHUB_ACCESS_TOKEN")?,
            repo_type: optional("GITHUB_REPO_TYPE").unwrap_or_else(|| DEFAULT_REPO_TYPE.to_string()),
        };

        let jira = JiraConfig {
            base_url: required("JIRA_BASE_URL")?.trim_end_matches('/').to_string(),
            username: required("JIRA_USERNAME")?,
            api_token: required("JIRA_API_TOKEN")?,
            project_key: required("JIRA_PROJECT_KEY")?,
            security_epic: required("JIRA_SECURITY_EPIC")?,
            issue_type: optional("JIRA_ISSUE_TYPE").unwrap_or_else(|| DEFAULT_ISSUE_TYPE.to_string()),
            fields: FieldMapping::parse(
                optional("JIRA_EPIC_FIELD"),
                optional("JIRA_CUSTOM_FIELDS").as_deref(),
            )?,
        };

        Ok(Self {
            dry_run,
            notification_topic: required("NOTIFICATION_TOPIC")?,
            github,
            jira,
        })
    }
}
