use serde::Serialize;
use serde_json::json;

use crate::domain::repository::Repository;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySummary {
    #[serde(rename = "Repository Name")]
    pub name: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Dependabot Alert Count")]
    pub alert_count: usize,
}

impl RepositorySummary {
    pub fn new(repository: &Repository, alert_count: usize) -> Self {
        Self {
            name: repository.name.clone(),
            url: repository.html_url.clone(),
            alert_count,
        }
    }
}

/// Result of one invocation: an HTTP-style status plus a JSON text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn success(summaries: &[RepositorySummary]) -> Self {
        Self {
            status_code: 200,
            body: serde_json::to_string(summaries).unwrap_or_else(|_| "[]".to_string()),
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            status_code: 500,
            body: json!({ "error": message }).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}
