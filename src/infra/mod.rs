pub mod github;
pub mod jira;
pub mod notifier;
pub mod pagination;
