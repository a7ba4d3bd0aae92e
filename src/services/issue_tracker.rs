use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ticket::{FieldMetadata, IssueDraft, IssueRef, Ticket};
use crate::error::AppResult;

/// Non-2xx responses surface as `AppError::Rejected`; transport failures as
/// `AppError::Http`.
#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn search_issues(&self, jql: &str) -> AppResult<Vec<IssueRef>>;
    async fn create_issue(&self, draft: &IssueDraft) -> AppResult<Ticket>;
    async fn fields(&self) -> AppResult<Vec<FieldMetadata>>;
    async fn field_context_options(&self, field_id: &str, context_id: &str) -> AppResult<Value>;
    async fn create_metadata(&self, project_key: &str, issue_type: &str) -> AppResult<Value>;
}
