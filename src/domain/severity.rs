use chrono::{Days, NaiveDate};
use serde::Deserialize;

use crate::domain::alert::Alert;

/// Advisory severity, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn policy(&self) -> RemediationPolicy {
        match self {
            Severity::Critical => RemediationPolicy::new("2", Some(5)),
            Severity::High => RemediationPolicy::new("3", Some(14)),
            Severity::Medium => RemediationPolicy::new("4", Some(30)),
            Severity::Low => RemediationPolicy::new("5", None),
            Severity::None => RemediationPolicy::new("0", None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemediationPolicy {
    pub priority_id: &'static str,
    pub due_in_days: Option<u64>,
}

impl RemediationPolicy {
    const fn new(priority_id: &'static str, due_in_days: Option<u64>) -> Self {
        Self {
            priority_id,
            due_in_days,
        }
    }

    pub fn due_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.due_in_days
            .and_then(|days| today.checked_add_days(Days::new(days)))
    }
}

pub fn highest_severity(alerts: &[Alert]) -> Severity {
    let mut highest = Severity::None;
    for alert in alerts {
        highest = highest.max(alert.severity());
        if highest == Severity::Critical {
            break;
        }
    }
    highest
}
