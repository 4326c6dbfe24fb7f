//! Client for the remote memory service used by AI agents.
//!
//! Provides:
//! - Connection configuration (defaults, environment overrides)
//! - Typed request payloads and response descriptors
//! - A blocking client with one method per endpoint

pub mod client;
pub mod config;
pub mod error;
pub mod lookup;
pub mod schema;

pub use client::{DEFAULT_HISTORY_LIMIT, DEFAULT_QUERY_K, MemoryClient};
pub use config::ClientConfig;
pub use error::ClientError;
pub use lookup::Lookup;
pub use schema::{
    ActionEntry, DecisionEntry, HealthStatus, MemoryType, PatternEntry, StoredRecord,
    UnknownMemoryType,
};
