//! Human-readable detector report.

use crate::progress::ServiceTally;
use crate::schema::ProjectState;
use std::fmt::Write;

/// Number of recommended tasks shown in the report.
pub const MAX_TASKS_SHOWN: usize = 3;

const WIDTH: usize = 70;

/// Report text builder. Writes to a `String` so callers choose the sink.
#[derive(Debug, Default)]
pub struct Report {
    out: String,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let _ = writeln!(self.out, "{}", text.as_ref());
        self
    }

    fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    fn section(&mut self, title: &str) -> &mut Self {
        self.line(title).line("-".repeat(WIDTH))
    }

    pub fn header(&mut self) -> &mut Self {
        self.line("=".repeat(WIDTH))
            .line("AI AGENT INITIALIZATION DETECTOR")
            .line("=".repeat(WIDTH))
            .blank()
    }

    pub fn initialize(&mut self, state_path: &str) -> &mut Self {
        self.line("✓ STATUS: INITIALIZE MODE")
            .blank()
            .line(format!("The {} file does NOT exist.", state_path))
            .line("This is a fresh start.")
            .blank();

        self.section("ACTION FOR AI AGENT:")
            .line("  1. Read README.md for architecture overview")
            .line("  2. Read .ai-agents/README.md for system documentation")
            .line("  3. Begin Phase 1: Foundation & Infrastructure")
            .line("  4. The system will guide you through initialization")
            .blank();

        self.section("FIRST STEPS:")
            .line("  1. Create project directory structure")
            .line("  2. Implement shared libraries (libs/)")
            .line("  3. Build infrastructure services (service_registry, event_bus)")
            .line("  4. Update project-state.json as you progress")
            .blank()
    }

    pub fn resume_banner(&mut self, state_path: &str) -> &mut Self {
        self.line("✓ STATUS: RESUME MODE")
            .blank()
            .line(format!("The {} file exists.", state_path))
            .line("This means development was previously started.")
            .blank()
    }

    pub fn project_state(&mut self, state: &ProjectState) -> &mut Self {
        let meta = &state.project_metadata;
        self.section("CURRENT PROJECT STATE:")
            .line(format!("  Phase: {}", meta.current_phase))
            .line(format!("  Last Updated: {}", meta.last_updated))
            .line(format!("  Active Agent: {}", meta.active_agent))
            .blank();

        self.section("NEXT RECOMMENDED TASKS:");
        for (i, task) in state
            .next_recommended_tasks
            .iter()
            .take(MAX_TASKS_SHOWN)
            .enumerate()
        {
            self.line(format!("  {}. {}", i + 1, task.task))
                .line(format!("     Agent: {}", task.agent))
                .line(format!("     Priority: {}", task.priority))
                .blank();
        }

        self.progress(&ServiceTally::from_state(state));

        self.section("ACTION FOR AI AGENT:")
            .line(format!(
                "  1. Read {} for full context",
                crate::state::STATE_FILE_RELATIVE
            ))
            .line("  2. Continue with next_recommended_tasks")
            .line("  3. Update state as you complete tasks")
            .blank()
    }

    /// Progress block; omitted entirely when there are no services.
    pub fn progress(&mut self, tally: &ServiceTally) -> &mut Self {
        let Some(percent) = tally.completion_percent() else {
            return self;
        };
        self.section("PROGRESS SUMMARY:")
            .line(format!(
                "  Completed: {}/{} services ({:.1}%)",
                tally.completed,
                tally.total(),
                percent
            ))
            .line(format!("  In Progress: {} services", tally.in_progress))
            .line(format!("  Not Started: {} services", tally.not_started))
            .blank()
    }

    pub fn unreadable(&mut self, state_path: &str, error: &dyn std::error::Error) -> &mut Self {
        self.line(format!("⚠ Warning: Could not read state file: {}", error))
            .line(format!("You may need to manually inspect {}", state_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        let mut report = Report::new();
        report.header();
        let text = report.into_string();
        assert!(text.starts_with(&"=".repeat(70)));
        assert!(text.contains("AI AGENT INITIALIZATION DETECTOR"));
    }

    #[test]
    fn test_progress_block() {
        let tally = ServiceTally {
            completed: 3,
            in_progress: 1,
            not_started: 1,
        };
        let mut report = Report::new();
        report.progress(&tally);
        insta::assert_snapshot!(report.into_string(), @r"
        PROGRESS SUMMARY:
        ----------------------------------------------------------------------
          Completed: 3/5 services (60.0%)
          In Progress: 1 services
          Not Started: 1 services
        ");
    }

    #[test]
    fn test_progress_block_skipped_without_services() {
        let mut report = Report::new();
        report.progress(&ServiceTally::default());
        assert!(report.into_string().is_empty());
    }

    #[test]
    fn test_initialize_guidance() {
        let mut report = Report::new();
        report.initialize(".ai-agents/project-state.json");
        let text = report.into_string();
        assert!(text.contains("INITIALIZE MODE"));
        assert!(text.contains("does NOT exist"));
        assert!(text.contains("Begin Phase 1: Foundation & Infrastructure"));
    }
}
