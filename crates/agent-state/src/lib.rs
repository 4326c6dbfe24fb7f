//! Local project state for agent sessions.
//!
//! This crate provides what the detector and other entry points share:
//! - Project state file schema
//! - State file discovery and loading
//! - Service progress tally
//! - INITIALIZE/RESUME detection and its report
//! - Logging setup

pub mod detect;
pub mod error;
pub mod logging;
pub mod mode;
pub mod progress;
pub mod report;
pub mod schema;
pub mod state;

pub use detect::{Detection, detect};
pub use error::StateError;
pub use mode::Mode;
pub use progress::ServiceTally;
pub use report::Report;
pub use schema::{ProjectState, SERVICE_CATEGORIES, ServiceInfo, ServiceStatus};
pub use state::StateFile;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::detect::{Detection, detect};
    pub use crate::mode::Mode;
    pub use crate::schema::ProjectState;
    pub use crate::state::StateFile;
    pub use anyhow::{Context, Result};
}
