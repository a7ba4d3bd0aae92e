use async_trait::async_trait;

use crate::domain::alert::Alert;
use crate::domain::repository::{CustomProperty, Repository};
use crate::error::AppResult;

/// Unsuccessful responses degrade to empty results; only transport or decode
/// failures are returned as errors.
#[async_trait]
pub trait SourceControlService: Send + Sync {
    async fn list_repositories(&self) -> AppResult<Vec<Repository>>;
    async fn custom_properties(&self, repo: &str) -> AppResult<Vec<CustomProperty>>;
    async fn open_alerts(&self, repo: &str) -> AppResult<Vec<Alert>>;
}
