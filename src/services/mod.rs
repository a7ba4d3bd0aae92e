pub mod issue_tracker;
pub mod notifier;
pub mod source_control;

pub use issue_tracker::IssueTrackerService;
pub use notifier::NotificationService;
pub use source_control::SourceControlService;
