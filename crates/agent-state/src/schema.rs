//! Project state schema - the `.ai-agents/project-state.json` document.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Service categories counted towards overall progress, in report order.
pub const SERVICE_CATEGORIES: [&str; 5] = [
    "infrastructure_services",
    "core_business_services",
    "ats_services",
    "template_services",
    "data_services",
];

/// Root of the project state file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectState {
    /// Phase, timestamp and owning agent
    pub project_metadata: ProjectMetadata,

    /// Services grouped by category
    pub services: Services,

    /// Tasks suggested for the next session
    #[serde(default)]
    pub next_recommended_tasks: Vec<RecommendedTask>,

    /// Additional fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Project metadata block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub current_phase: Scalar,
    pub last_updated: Scalar,
    pub active_agent: Scalar,

    /// Additional fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A task recommended to the next agent session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedTask {
    pub task: Scalar,
    pub agent: Scalar,
    pub priority: Scalar,

    /// Additional fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Services keyed by category, then by service name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Services {
    #[serde(default)]
    pub infrastructure_services: BTreeMap<String, ServiceInfo>,
    #[serde(default)]
    pub core_business_services: BTreeMap<String, ServiceInfo>,
    #[serde(default)]
    pub ats_services: BTreeMap<String, ServiceInfo>,
    #[serde(default)]
    pub template_services: BTreeMap<String, ServiceInfo>,
    #[serde(default)]
    pub data_services: BTreeMap<String, ServiceInfo>,

    /// Categories outside [`SERVICE_CATEGORIES`]; kept but never counted
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Services {
    /// Known categories paired with their services, in [`SERVICE_CATEGORIES`] order.
    pub fn categories(&self) -> [(&'static str, &BTreeMap<String, ServiceInfo>); 5] {
        [
            (SERVICE_CATEGORIES[0], &self.infrastructure_services),
            (SERVICE_CATEGORIES[1], &self.core_business_services),
            (SERVICE_CATEGORIES[2], &self.ats_services),
            (SERVICE_CATEGORIES[3], &self.template_services),
            (SERVICE_CATEGORIES[4], &self.data_services),
        ]
    }
}

/// Per-service record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<ServiceStatus>,

    /// Additional fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServiceInfo {
    /// Effective status; an absent status means the service was not started.
    pub fn status(&self) -> ServiceStatus {
        self.status.unwrap_or_default()
    }
}

/// Any JSON value is accepted; only the two progress strings count.
fn lenient_status<'de, D>(deserializer: D) -> Result<Option<ServiceStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let status = Option::<Value>::deserialize(deserializer)?.map(|value| match value.as_str() {
        Some("completed") => ServiceStatus::Completed,
        Some("in_progress") => ServiceStatus::InProgress,
        _ => ServiceStatus::NotStarted,
    });
    Ok(status)
}

/// Progress of a single service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Completed,
    InProgress,
    /// Also used for any unrecognized status value
    #[default]
    #[serde(other)]
    NotStarted,
}

/// A JSON scalar shown as-is in reports (strings without quotes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scalar(pub Value);

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}
