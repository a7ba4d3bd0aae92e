use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::config::tests::sample_config;
use crate::context::AppContext;
use crate::domain::alert::Alert;
use crate::domain::repository::{CustomProperty, Repository};
use crate::domain::severity::Severity;
use crate::domain::ticket::{FieldMetadata, IssueDraft, IssueRef, Ticket};
use crate::error::{AppError, AppResult};
use crate::services::{IssueTrackerService, NotificationService, SourceControlService};

#[derive(Clone, Default)]
pub struct FakeSourceControl {
    repositories: Vec<Repository>,
    properties: HashMap<String, Vec<CustomProperty>>,
    alerts: HashMap<String, Vec<Alert>>,
    failing_alerts: Option<String>,
    alert_requests: Arc<Mutex<Vec<String>>>,
}

impl FakeSourceControl {
    pub fn repo(mut self, name: &str, dependencies: &str, severities: &[Severity]) -> Self {
        self.properties.insert(
            name.to_string(),
            vec![CustomProperty {
                property_name: "dependencies".to_string(),
                value: Some(Value::String(dependencies.to_string())),
            }],
        );
        self.push_repo(name, severities)
    }

    pub fn repo_without_property(mut self, name: &str) -> Self {
        self.properties.insert(
            name.to_string(),
            vec![CustomProperty {
                property_name: "team".to_string(),
                value: Some(Value::String("platform".to_string())),
            }],
        );
        self.push_repo(name, &[])
    }

    pub fn failing_alerts(mut self, name: &str) -> Self {
        self.failing_alerts = Some(name.to_string());
        self
    }

    pub fn alert_requests(&self) -> Vec<String> {
        self.alert_requests.lock().unwrap().clone()
    }

    fn push_repo(mut self, name: &str, severities: &[Severity]) -> Self {
        self.repositories.push(Repository {
            name: name.to_string(),
            html_url: format!("https://github.com/acme/{name}"),
        });
        self.alerts.insert(
            name.to_string(),
            severities.iter().copied().map(Alert::with_severity).collect(),
        );
        self
    }
}

#[async_trait]
impl SourceControlService for FakeSourceControl {
    async fn list_repositories(&self) -> AppResult<Vec<Repository>> {
        Ok(self.repositories.clone())
    }

    async fn custom_properties(&self, repo: &str) -> AppResult<Vec<CustomProperty>> {
        Ok(self.properties.get(repo).cloned().unwrap_or_default())
    }

    async fn open_alerts(&self, repo: &str) -> AppResult<Vec<Alert>> {
        self.alert_requests.lock().unwrap().push(repo.to_string());
        if self.failing_alerts.as_deref() == Some(repo) {
            return Err(AppError::Http(format!("connection reset fetching {repo}")));
        }
        Ok(self.alerts.get(repo).cloned().unwrap_or_default())
    }
}

#[derive(Clone, Default)]
pub struct FakeTracker {
    pub existing: usize,
    pub search_fails: bool,
    pub reject_create: bool,
    pub create_transport_fails: bool,
    pub fields: Vec<FieldMetadata>,
    pub options: Option<Value>,
    pub create_meta: Option<Value>,
    pub(crate) searches: Arc<Mutex<Vec<String>>>,
    pub(crate) created: Arc<Mutex<Vec<IssueDraft>>>,
}

impl FakeTracker {
    pub fn with_existing(existing: usize) -> Self {
        Self {
            existing,
            ..Self::default()
        }
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<IssueDraft> {
        self.created.lock().unwrap().clone()
    }

    fn rejected(body: &str) -> AppError {
        AppError::Rejected {
            service: "Jira",
            status: 400,
            body: body.to_string(),
        }
    }
}

#[async_trait]
impl IssueTrackerService for FakeTracker {
    async fn search_issues(&self, jql: &str) -> AppResult<Vec<IssueRef>> {
        self.searches.lock().unwrap().push(jql.to_string());
        if self.search_fails {
            return Err(Self::rejected("search unavailable"));
        }
        Ok((0..self.existing)
            .map(|n| IssueRef {
                key: Some(format!("SEC-{n}")),
            })
            .collect())
    }

    async fn create_issue(&self, draft: &IssueDraft) -> AppResult<Ticket> {
        if self.create_transport_fails {
            return Err(AppError::Http("connection refused".to_string()));
        }
        if self.reject_create {
            return Err(Self::rejected(r#"{"errors":{"priority":"invalid"}}"#));
        }
        let mut created = self.created.lock().unwrap();
        created.push(draft.clone());
        Ok(Ticket {
            id: Some(format!("{}", 10_000 + created.len())),
            key: format!("SEC-{}", 99 + created.len()),
            url: None,
        })
    }

    async fn fields(&self) -> AppResult<Vec<FieldMetadata>> {
        Ok(self.fields.clone())
    }

    async fn field_context_options(&self, _field_id: &str, _context_id: &str) -> AppResult<Value> {
        self.options
            .clone()
            .ok_or_else(|| Self::rejected("context not found"))
    }

    async fn create_metadata(&self, _project_key: &str, _issue_type: &str) -> AppResult<Value> {
        self.create_meta
            .clone()
            .ok_or_else(|| Self::rejected("no create metadata"))
    }
}

#[derive(Clone, Default)]
pub struct FakeNotifier {
    pub fails: bool,
    pub(crate) published: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeNotifier {
    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationService for FakeNotifier {
    async fn publish(&self, subject: &str, message: &str) -> AppResult<()> {
        self.published
            .lock()
            .unwrap()
            .push((subject.to_string(), message.to_string()));
        if self.fails {
            return Err(AppError::Notification("topic unreachable".to_string()));
        }
        Ok(())
    }
}

pub fn context_with(source: FakeSourceControl, tracker: FakeTracker, dry_run: bool) -> AppContext {
    context_with_notifier(source, tracker, FakeNotifier::default(), dry_run)
}

pub fn context_with_notifier(
    source: FakeSourceControl,
    tracker: FakeTracker,
    notifier: FakeNotifier,
    dry_run: bool,
) -> AppContext {
    let mut config = sample_config();
    config.dry_run = dry_run;
    config
        .jira
        .fields
        .custom
        .insert("customfield_10300".to_string(), json!({"value": "No"}));
    AppContext::new(config, Arc::new(source), Arc::new(tracker), Arc::new(notifier))
}
