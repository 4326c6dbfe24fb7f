//! State file location and loading.

use crate::error::{Result, StateError};
use crate::schema::ProjectState;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use std::fs;

/// Location of the state file relative to the project root.
pub const STATE_FILE_RELATIVE: &str = ".ai-agents/project-state.json";

/// Handle on a project state file. Never writes to it.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: Utf8PathBuf,
}

impl StateFile {
    /// Create a handle for the given path.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get default state file path.
    ///
    /// Priority:
    /// 1. AI_AGENTS_STATE_FILE environment variable (if set)
    /// 2. $CLAUDE_PROJECT_DIR/.ai-agents/project-state.json
    /// 3. ./.ai-agents/project-state.json
    pub fn default_path() -> Utf8PathBuf {
        if let Ok(custom_path) = std::env::var("AI_AGENTS_STATE_FILE") {
            return Utf8PathBuf::from(custom_path);
        }

        let project_dir = std::env::var("CLAUDE_PROJECT_DIR").unwrap_or_else(|_| ".".to_string());
        Utf8PathBuf::from(project_dir).join(STATE_FILE_RELATIVE)
    }

    /// Handle on the state file at [`StateFile::default_path`].
    pub fn discover() -> Self {
        Self::new(Self::default_path())
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Check if the state file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and validate the whole document.
    pub fn load(&self) -> Result<ProjectState> {
        let content = self.read()?;
        serde_json::from_str(&content).map_err(|source| StateError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Read the document as untyped JSON, without schema checks.
    pub fn load_raw(&self) -> Result<Value> {
        let content = self.read()?;
        serde_json::from_str(&content).map_err(|source| StateError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|source| StateError::Read {
            path: self.path.clone(),
            source,
        })
    }
}
