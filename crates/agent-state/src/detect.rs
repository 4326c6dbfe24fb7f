//! Local INITIALIZE/RESUME detection from the state file.

use crate::error::StateError;
use crate::mode::Mode;
use crate::progress::ServiceTally;
use crate::report::Report;
use crate::schema::ProjectState;
use crate::state::StateFile;
use serde_json::json;

/// Outcome of inspecting a state file.
#[derive(Debug)]
pub enum Detection {
    /// No state file: start fresh
    Initialize,
    /// State file parsed
    Resume(Box<ProjectState>),
    /// State file present but unreadable; its existence still implies prior work
    ResumeUnreadable(StateError),
}

impl Detection {
    pub fn mode(&self) -> Mode {
        match self {
            Detection::Initialize => Mode::Initialize,
            Detection::Resume(_) | Detection::ResumeUnreadable(_) => Mode::Resume,
        }
    }

    /// Full text report for the detection.
    pub fn render(&self, state_file: &StateFile) -> String {
        let path = state_file.path().as_str();
        let mut report = Report::new();
        report.header();
        match self {
            Detection::Initialize => {
                report.initialize(path);
            }
            Detection::Resume(state) => {
                report.resume_banner(path).project_state(state);
            }
            Detection::ResumeUnreadable(err) => {
                report.resume_banner(path).unreadable(path, err);
            }
        }
        report.into_string()
    }

    /// One-line machine-readable summary.
    pub fn summary(&self, state_file: &StateFile) -> serde_json::Value {
        let (progress, warning) = match self {
            Detection::Initialize => (None, None),
            Detection::Resume(state) => (Some(ServiceTally::from_state(state)), None),
            Detection::ResumeUnreadable(err) => (None, Some(err.to_string())),
        };
        json!({
            "mode": self.mode(),
            "state_file": state_file.path().as_str(),
            "progress": progress,
            "warning": warning,
        })
    }
}

/// Inspect `state_file` and decide the start-up mode.
pub fn detect(state_file: &StateFile) -> Detection {
    if !state_file.exists() {
        tracing::debug!(path = %state_file.path(), "state file absent");
        return Detection::Initialize;
    }

    match state_file.load() {
        Ok(state) => Detection::Resume(Box::new(state)),
        Err(err) => {
            tracing::warn!(error = %err, "state file exists but could not be read");
            Detection::ResumeUnreadable(err)
        }
    }
}
