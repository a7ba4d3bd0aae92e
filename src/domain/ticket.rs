use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEPENDENCIES_LABEL: &str = "dependencies";

/// Everything needed to file one remediation ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueDraft {
    pub project_key: String,
    pub issue_type: String,
    pub summary: String,
    pub detail_url: String,
    pub priority_id: String,
    pub due_date: Option<NaiveDate>,
    pub labels: Vec<String>,
    pub epic_field: String,
    pub epic_key: String,
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: Option<String>,
    pub key: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketOutcome {
    Created(Ticket),
    AlreadyExists,
    DryRun,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateCheck {
    Proceed,
    Cancel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueRef {
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMetadata {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<FieldSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl FieldMetadata {
    pub fn has_options(&self) -> bool {
        matches!(
            self.schema.as_ref().and_then(|schema| schema.field_type.as_deref()),
            Some("option") | Some("array")
        )
    }

    pub fn context_id(&self) -> Option<String> {
        match self.context.as_ref()? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}
