use serde::Deserialize;
use serde_json::Value;

pub const DEPENDENCIES_PROPERTY: &str = "dependencies";

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub html_url: String,
}

impl Repository {
    /// Link to the repository's security overview, used in ticket descriptions.
    pub fn security_url(&self) -> String {
        format!("{}/security", self.html_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomProperty {
    pub property_name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyScanning {
    Enabled,
    Disabled,
    Unset,
}

impl DependencyScanning {
    /// Only an explicit `"false"` opts a repository out.
    pub fn from_properties(properties: &[CustomProperty]) -> Self {
        match properties
            .iter()
            .find(|property| property.property_name == DEPENDENCIES_PROPERTY)
        {
            None => DependencyScanning::Unset,
            Some(property) => match &property.value {
                Some(Value::String(value)) if value == "false" => DependencyScanning::Disabled,
                _ => DependencyScanning::Enabled,
            },
        }
    }
}
