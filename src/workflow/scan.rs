use chrono::{DateTime, NaiveDate, Utc};
use tracing::{error, info, warn};

use crate::context::AppContext;
use crate::domain::repository::DependencyScanning;
use crate::domain::severity::highest_severity;
use crate::domain::summary::{InvocationResponse, RepositorySummary};
use crate::error::AppResult;
use crate::workflow::ticket::{TicketRequest, file_ticket};

pub const FAILURE_SUBJECT: &str = "Dependabot ticket sync failed";

/// One full pass over the organization. Any unexpected error aborts the pass,
/// sends a single notification and yields a 500 response.
pub async fn run_scan(ctx: &AppContext, now: DateTime<Utc>) -> InvocationResponse {
    match scan_repositories(ctx, now.date_naive()).await {
        Ok(summaries) => {
            info!(repositories = summaries.len(), "scan finished");
            InvocationResponse::success(&summaries)
        }
        Err(err) => {
            let message = format!("An error occurred: {err}");
            error!(error = %err, "scan aborted");
            if let Err(notify_err) = ctx.notifier.publish(FAILURE_SUBJECT, &message).await {
                error!(error = %notify_err, "failed to send failure notification");
            }
            InvocationResponse::failure(&message)
        }
    }
}

pub async fn scan_repositories(
    ctx: &AppContext,
    today: NaiveDate,
) -> AppResult<Vec<RepositorySummary>> {
    let repositories = ctx.source_control.list_repositories().await?;
    info!(count = repositories.len(), "scanning repositories");

    let mut summaries = Vec::new();
    for repository in &repositories {
        let repo = repository.name.as_str();

        let properties = ctx.source_control.custom_properties(repo).await?;
        match DependencyScanning::from_properties(&properties) {
            DependencyScanning::Enabled => {}
            DependencyScanning::Disabled => {
                info!(repo, "dependency tracking disabled; skipping");
                continue;
            }
            DependencyScanning::Unset => {
                warn!(repo, "repository has no dependencies property; skipping");
                continue;
            }
        }

        let alerts = ctx.source_control.open_alerts(repo).await?;
        if alerts.is_empty() {
            summaries.push(RepositorySummary::new(repository, 0));
            continue;
        }

        let severity = highest_severity(&alerts);
        let policy = severity.policy();
        info!(
            repo,
            alerts = alerts.len(),
            severity = severity.as_str(),
            "open alerts found"
        );

        let outcome = file_ticket(
            ctx,
            TicketRequest {
                repository: repository.name.clone(),
                detail_url: repository.security_url(),
                priority_id: policy.priority_id.to_string(),
                due_date: policy.due_date(today),
            },
        )
        .await?;
        info!(repo, ?outcome, "ticket step complete");

        summaries.push(RepositorySummary::new(repository, alerts.len()));
    }

    Ok(summaries)
}
