use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::domain::ticket::FieldMetadata;
use crate::error::{AppError, AppResult};

/// What the tracker knows about one custom field, gathered so operators can
/// fill in the field mapping table.
#[derive(Debug, Default, Serialize)]
pub struct FieldReport {
    pub field_id: String,
    pub field: Option<FieldMetadata>,
    pub context_options: Option<Value>,
    pub allowed_values: Option<Value>,
    pub problems: Vec<String>,
}

pub async fn inspect_field(ctx: &AppContext, field_id: &str) -> AppResult<FieldReport> {
    let tracker = ctx.issue_tracker.as_ref();
    let mut report = FieldReport {
        field_id: field_id.to_string(),
        ..FieldReport::default()
    };

    if let Some(fields) = absorb_rejection(tracker.fields().await, &mut report.problems)? {
        report.field = fields.into_iter().find(|field| field.id == field_id);
        if report.field.is_none() {
            report.problems.push(format!("field {field_id} not found"));
        }
    }

    let context_id = report
        .field
        .as_ref()
        .filter(|field| field.has_options())
        .and_then(FieldMetadata::context_id);
    if let Some(context_id) = context_id {
        debug!(field_id, %context_id, "fetching context options");
        report.context_options = absorb_rejection(
            tracker.field_context_options(field_id, &context_id).await,
            &mut report.problems,
        )?;
    }

    let jira = &ctx.config.jira;
    let metadata = absorb_rejection(
        tracker
            .create_metadata(&jira.project_key, &jira.issue_type)
            .await,
        &mut report.problems,
    )?;
    if let Some(metadata) = metadata {
        report.allowed_values = allowed_values(&metadata, field_id);
        if report.allowed_values.is_none() {
            report
                .problems
                .push(format!("no allowed values for {field_id} in create metadata"));
        }
    }

    Ok(report)
}

/// Pulls `allowedValues` for `field_id` from the first project and issue type.
pub fn allowed_values(metadata: &Value, field_id: &str) -> Option<Value> {
    metadata
        .pointer(&format!("/projects/0/issuetypes/0/fields/{field_id}/allowedValues"))
        .filter(|values| values.as_array().is_some_and(|values| !values.is_empty()))
        .cloned()
}

fn absorb_rejection<T>(result: AppResult<T>, problems: &mut Vec<String>) -> AppResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err @ AppError::Rejected { .. }) => {
            warn!(error = %err, "field metadata request was rejected");
            problems.push(err.to_string());
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::workflow::testing::{FakeTracker, context_with};

    fn cascading_field() -> FieldMetadata {
        serde_json::from_value(json!({
            "id": "customfield_11536",
            "name": "Client / Program",
            "schema": {"type": "option", "custom": "cascadingselect"},
            "context": "10400"
        }))
        .unwrap()
    }

    fn create_meta() -> Value {
        json!({
            "projects": [{
                "key": "SEC",
                "issuetypes": [{
                    "name": "Task",
                    "fields": {
                        "customfield_11536": {
                            "allowedValues": [{"id": "11881", "value": "All Clients"}]
                        }
                    }
                }]
            }]
        })
    }

    #[test]
    fn extracts_allowed_values() {
        let values = allowed_values(&create_meta(), "customfield_11536").unwrap();
        assert_eq!(values[0]["id"], "11881");
        assert_eq!(allowed_values(&create_meta(), "customfield_99999"), None);
        assert_eq!(allowed_values(&json!({"projects": []}), "customfield_11536"), None);
    }

    #[tokio::test]
    async fn reports_field_options_and_allowed_values() {
        let tracker = FakeTracker {
            fields: vec![cascading_field()],
            options: Some(json!({"values": [{"id": "11882", "value": "Platform"}]})),
            create_meta: Some(create_meta()),
            ..FakeTracker::default()
        };
        let ctx = context_with(Default::default(), tracker, false);

        let report = inspect_field(&ctx, "customfield_11536").await.unwrap();

        assert_eq!(report.field.unwrap().name.as_deref(), Some("Client / Program"));
        assert_eq!(report.context_options.unwrap()["values"][0]["id"], "11882");
        assert_eq!(report.allowed_values.unwrap()[0]["value"], "All Clients");
        assert!(report.problems.is_empty());
    }

    #[tokio::test]
    async fn rejected_calls_become_problems() {
        let tracker = FakeTracker {
            fields: vec![cascading_field()],
            ..FakeTracker::default()
        };
        let ctx = context_with(Default::default(), tracker, false);

        let report = inspect_field(&ctx, "customfield_11536").await.unwrap();

        assert!(report.field.is_some());
        assert!(report.context_options.is_none());
        assert!(report.allowed_values.is_none());
        assert_eq!(report.problems.len(), 2);
    }

    #[tokio::test]
    async fn unknown_field_is_reported() {
        let tracker = FakeTracker {
            create_meta: Some(create_meta()),
            ..FakeTracker::default()
        };
        let ctx = context_with(Default::default(), tracker, false);

        let report = inspect_field(&ctx, "customfield_404").await.unwrap();

        assert!(report.field.is_none());
        assert!(report.problems.iter().any(|problem| problem.contains("not found")));
    }
}
