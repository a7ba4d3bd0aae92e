use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{IssueTrackerService, NotificationService, SourceControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub source_control: Arc<dyn SourceControlService>,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
    pub notifier: Arc<dyn NotificationService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        source_control: Arc<dyn SourceControlService>,
        issue_tracker: Arc<dyn IssueTrackerService>,
        notifier: Arc<dyn NotificationService>,
    ) -> Self {
        Self {
            config,
            source_control,
            issue_tracker,
            notifier,
        }
    }
}
