use serde::Deserialize;

use crate::domain::severity::Severity;

/// An open Dependabot alert. Only the advisory severity is consulted.
#[derive(Debug, Clone, Deserialize)]
pub struct Alert {
    pub security_advisory: SecurityAdvisory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityAdvisory {
    pub severity: Severity,
}

impl Alert {
    pub fn severity(&self) -> Severity {
        self.security_advisory.severity
    }

    #[cfg(test)]
    pub fn with_severity(severity: Severity) -> Self {
        Self {
            security_advisory: SecurityAdvisory { severity },
        }
    }
}
