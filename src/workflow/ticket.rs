use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::ticket::{DEPENDENCIES_LABEL, DuplicateCheck, IssueDraft, TicketOutcome};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

#[derive(Debug, Clone)]
pub struct TicketRequest {
    pub repository: String,
    pub detail_url: String,
    pub priority_id: String,
    pub due_date: Option<NaiveDate>,
}

pub fn duplicate_query(project_key: &str, epic: &str, label: &str) -> String {
    format!(
        "project = {project_key} AND 'Epic Link' = '{epic}' AND (labels = '{label}' AND labels = '{DEPENDENCIES_LABEL}') AND status IN ('Open', 'To Do', 'In Progress')"
    )
}

/// Looks for an open dependency ticket for `label` under the epic.
/// A failed search never blocks creation.
pub async fn check_for_ticket(
    tracker: &dyn IssueTrackerService,
    project_key: &str,
    epic: &str,
    label: &str,
) -> DuplicateCheck {
    let jql = duplicate_query(project_key, epic, label);
    debug!(%jql, "checking for existing ticket");

    match tracker.search_issues(&jql).await {
        Ok(issues) if issues.is_empty() => DuplicateCheck::Proceed,
        Ok(issues) => {
            let keys: Vec<&str> = issues.iter().filter_map(|issue| issue.key.as_deref()).collect();
            info!(label, matches = issues.len(), ?keys, "found open ticket");
            DuplicateCheck::Cancel
        }
        Err(err) => {
            warn!(label, error = %err, "ticket search failed; assuming no duplicate");
            DuplicateCheck::Proceed
        }
    }
}

pub fn build_draft(config: &AppConfig, request: &TicketRequest) -> IssueDraft {
    let jira = &config.jira;
    IssueDraft {
        project_key: jira.project_key.clone(),
        issue_type: jira.issue_type.clone(),
        summary: format!("Security updates for {}", request.repository),
        detail_url: request.detail_url.clone(),
        priority_id: request.priority_id.clone(),
        due_date: request.due_date,
        labels: vec![request.repository.clone(), DEPENDENCIES_LABEL.to_string()],
        epic_field: jira.fields.epic_field.clone(),
        epic_key: jira.security_epic.clone(),
        custom_fields: jira.fields.custom.clone(),
    }
}

pub async fn file_ticket(ctx: &AppContext, request: TicketRequest) -> AppResult<TicketOutcome> {
    let jira = &ctx.config.jira;
    let check = check_for_ticket(
        ctx.issue_tracker.as_ref(),
        &jira.project_key,
        &jira.security_epic,
        &request.repository,
    )
    .await;

    if check == DuplicateCheck::Cancel {
        info!(repo = %request.repository, "ticket already exists");
        return Ok(TicketOutcome::AlreadyExists);
    }

    let draft = build_draft(&ctx.config, &request);

    if ctx.config.dry_run {
        info!(repo = %request.repository, priority = %draft.priority_id, "dry run: would create ticket");
        return Ok(TicketOutcome::DryRun);
    }

    match ctx.issue_tracker.create_issue(&draft).await {
        Ok(ticket) => {
            info!(
                repo = %request.repository,
                key = %ticket.key,
                id = ?ticket.id,
                url = ?ticket.url,
                "created ticket"
            );
            Ok(TicketOutcome::Created(ticket))
        }
        Err(AppError::Rejected { status, body, .. }) => {
            error!(repo = %request.repository, status, %body, "error creating ticket");
            Ok(TicketOutcome::Rejected)
        }
        Err(err) => Err(err),
    }
}
