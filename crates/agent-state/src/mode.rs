//! Agent start-up mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::process::ExitCode;

/// Whether an agent starts a fresh project or continues saved work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    /// No saved progress exists
    Initialize,
    /// Saved progress exists
    Resume,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Initialize => "INITIALIZE",
            Mode::Resume => "RESUME",
        }
    }

    /// Process exit status callers branch on: 0 to resume, 1 to initialize.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Mode::Resume => ExitCode::SUCCESS,
            Mode::Initialize => ExitCode::from(1),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_serialization() {
        assert_eq!(Mode::Initialize.to_string(), "INITIALIZE");
        assert_eq!(serde_json::to_string(&Mode::Resume).unwrap(), "\"RESUME\"");
        let mode: Mode = serde_json::from_str("\"INITIALIZE\"").unwrap();
        assert_eq!(mode, Mode::Initialize);
    }
}
