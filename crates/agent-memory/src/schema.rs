//! Memory service schema - request payloads and response descriptors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Memory sector filter for queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryType {
    /// Saved project state snapshots
    State,
    /// Agent actions (episodic)
    Actions,
    /// Coding patterns (procedural)
    Patterns,
    /// Architectural decisions (reflective)
    Decisions,
    /// Every sector
    #[default]
    All,
}

impl MemoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryType::State => "state",
            MemoryType::Actions => "actions",
            MemoryType::Patterns => "patterns",
            MemoryType::Decisions => "decisions",
            MemoryType::All => "all",
        }
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown memory type `{0}` (expected state, actions, patterns, decisions or all)")]
pub struct UnknownMemoryType(String);

impl FromStr for MemoryType {
    type Err = UnknownMemoryType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "state" => Ok(MemoryType::State),
            "actions" => Ok(MemoryType::Actions),
            "patterns" => Ok(MemoryType::Patterns),
            "decisions" => Ok(MemoryType::Decisions),
            "all" => Ok(MemoryType::All),
            _ => Err(UnknownMemoryType(s.to_string())),
        }
    }
}

/// An agent action, stored as episodic memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry {
    pub agent_name: String,
    pub action: String,
    pub context: Option<String>,
    pub outcome: Option<String>,
}

impl ActionEntry {
    pub fn new(agent_name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            action: action.into(),
            context: None,
            outcome: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }
}

/// A coding pattern, stored as procedural memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternEntry {
    pub pattern_name: String,
    pub description: String,
    pub example: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PatternEntry {
    pub fn new(pattern_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            pattern_name: pattern_name.into(),
            description: description.into(),
            example: None,
            tags: Vec::new(),
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// An architectural decision, stored as reflective memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionEntry {
    pub decision: String,
    pub rationale: String,
    pub alternatives: Option<String>,
    pub consequences: Option<String>,
}

impl DecisionEntry {
    pub fn new(decision: impl Into<String>, rationale: impl Into<String>) -> Self {
        Self {
            decision: decision.into(),
            rationale: rationale.into(),
            alternatives: None,
            consequences: None,
        }
    }

    pub fn with_alternatives(mut self, alternatives: impl Into<String>) -> Self {
        self.alternatives = Some(alternatives.into());
        self
    }

    pub fn with_consequences(mut self, consequences: impl Into<String>) -> Self {
        self.consequences = Some(consequences.into());
        self
    }
}

/// Body of a memory query.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct QueryRequest<'a> {
    pub query: &'a str,
    pub memory_type: MemoryType,
    pub k: usize,
}

/// Body of a state snapshot.
#[derive(Debug, Serialize)]
pub(crate) struct StateSnapshot<'a, S: Serialize + ?Sized> {
    pub state: &'a S,
}

/// Project and user scope wrapped around every POST body.
#[derive(Debug, Serialize)]
pub(crate) struct Scoped<'a, T: Serialize + ?Sized> {
    pub project_name: &'a str,
    #[serde(flatten)]
    pub body: &'a T,
    pub user_id: &'a str,
}

/// Descriptor returned by every write endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub memory_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,

    /// Additional fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub version: Option<String>,

    /// Additional fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
