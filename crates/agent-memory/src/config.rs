//! Memory client configuration.

/// Service address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// User id all requests are scoped to unless overridden.
pub const DEFAULT_USER_ID: &str = "ai-agent-system";

/// Connection settings for [`crate::MemoryClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the memory service, without trailing slash
    pub base_url: String,
    /// Bearer token sent on every request
    pub api_key: Option<String>,
    /// Isolation key scoping every request
    pub user_id: String,
    /// Project used when a call does not name one
    pub project_name: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            user_id: DEFAULT_USER_ID.to_string(),
            project_name: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given service address.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Build a configuration from the environment.
    ///
    /// Reads OPENMEMORY_URL, OPENMEMORY_API_KEY, OPENMEMORY_USER_ID and
    /// OPENMEMORY_PROJECT; unset or empty variables keep the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        if let Some(url) = var("OPENMEMORY_URL") {
            config = config.with_base_url(url);
        }
        if let Some(user_id) = var("OPENMEMORY_USER_ID") {
            config.user_id = user_id;
        }
        config.api_key = var("OPENMEMORY_API_KEY");
        config.project_name = var("OPENMEMORY_PROJECT");
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_project(mut self, project_name: impl Into<String>) -> Self {
        self.project_name = Some(project_name.into());
        self
    }
}
