//! Blocking client for the memory service's `/ai-agents` API.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::lookup::Lookup;
use crate::schema::{
    ActionEntry, DecisionEntry, HealthStatus, MemoryType, PatternEntry, QueryRequest, Scoped,
    StateSnapshot, StoredRecord,
};
use agent_state::Mode;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Number of results returned by [`MemoryClient::query_memories`] by default.
pub const DEFAULT_QUERY_K: usize = 10;

/// Number of history entries returned by [`MemoryClient::get_history`] by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Client bound to one service, user and (optionally) default project.
///
/// Every method is a single blocking request over a shared connection pool;
/// nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct MemoryClient {
    http: Client,
    config: ClientConfig,
}

impl MemoryClient {
    /// Create a client; the bearer header is attached here once.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &config.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| ClientError::Config(format!("api key is not a valid header: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check the service is up. Never fails: problems come back as [`Lookup::Unavailable`].
    pub fn health_check(&self) -> Lookup<HealthStatus> {
        let url = self.url("/health");
        let response = match self.send(self.http.get(&url), &url) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "health check failed");
                return Lookup::Unavailable(err);
            }
        };

        if response.status() != StatusCode::OK {
            let err = ClientError::Status {
                url,
                status: response.status(),
            };
            tracing::warn!(error = %err, "health check failed");
            return Lookup::Unavailable(err);
        }

        match decode::<HealthStatus>(response, &url) {
            Ok(health) => Lookup::Found(health),
            Err(err) => {
                tracing::warn!(error = %err, "health check failed");
                Lookup::Unavailable(err)
            }
        }
    }

    /// Store a project state snapshot.
    pub fn save_project_state<S>(&self, state: &S, project: Option<&str>) -> Result<StoredRecord>
    where
        S: Serialize + ?Sized,
    {
        let project = self.project(project)?;
        self.post("/ai-agents/state", project, &StateSnapshot { state })
    }

    /// Fetch the latest project state snapshot.
    ///
    /// 404 and an empty `state` come back as [`Lookup::Empty`]; transport and
    /// body decoding failures as [`Lookup::Unavailable`]. Any other error
    /// status is returned as [`ClientError::Status`].
    pub fn load_project_state(&self, project: Option<&str>) -> Result<Lookup<Value>> {
        let project = self.project(project)?;
        let url = self.project_url("/ai-agents/state", project)?;
        let request = self.http.get(&url).query(&[("user_id", &self.config.user_id)]);

        let response = match self.send(request, &url) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(project, error = %err, "error loading project state");
                return Ok(Lookup::Unavailable(err));
            }
        };

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(project, "no project state stored");
            return Ok(Lookup::Empty);
        }
        let response = check_status(response, &url)?;

        match decode::<Map<String, Value>>(response, &url) {
            Ok(mut body) => match body.remove("state") {
                Some(state) if !is_blank(&state) => Ok(Lookup::Found(state)),
                _ => Ok(Lookup::Empty),
            },
            Err(err) => {
                tracing::warn!(project, error = %err, "error loading project state");
                Ok(Lookup::Unavailable(err))
            }
        }
    }

    /// RESUME when the service holds a state for the project, INITIALIZE otherwise.
    pub fn detect_mode(&self, project: Option<&str>) -> Result<Mode> {
        let mode = match self.load_project_state(project)? {
            Lookup::Found(_) => Mode::Resume,
            Lookup::Empty | Lookup::Unavailable(_) => Mode::Initialize,
        };
        Ok(mode)
    }

    /// Record an agent action in episodic memory.
    pub fn record_action(
        &self,
        entry: &ActionEntry,
        project: Option<&str>,
    ) -> Result<StoredRecord> {
        let project = self.project(project)?;
        self.post("/ai-agents/action", project, entry)
    }

    /// Store a coding pattern in procedural memory.
    pub fn store_pattern(
        &self,
        entry: &PatternEntry,
        project: Option<&str>,
    ) -> Result<StoredRecord> {
        let project = self.project(project)?;
        self.post("/ai-agents/pattern", project, entry)
    }

    /// Record an architectural decision in reflective memory.
    pub fn record_decision(
        &self,
        entry: &DecisionEntry,
        project: Option<&str>,
    ) -> Result<StoredRecord> {
        let project = self.project(project)?;
        self.post("/ai-agents/decision", project, entry)
    }

    /// Search project memories; missing `results` means no matches.
    pub fn query_memories(
        &self,
        query: &str,
        memory_type: MemoryType,
        k: usize,
        project: Option<&str>,
    ) -> Result<Vec<Value>> {
        let project = self.project(project)?;
        let request = QueryRequest {
            query,
            memory_type,
            k,
        };
        let body: Map<String, Value> = self.post("/ai-agents/query", project, &request)?;
        Ok(take_list(body, "results"))
    }

    /// Most recent development history, newest entries as the service orders them.
    pub fn get_history(&self, limit: usize, project: Option<&str>) -> Result<Vec<Value>> {
        let project = self.project(project)?;
        let limit = limit.to_string();
        let body = self.get("/ai-agents/history", project, &[("limit", limit.as_str())])?;
        Ok(take_list(body, "history"))
    }

    pub fn get_patterns(&self, project: Option<&str>) -> Result<Vec<Value>> {
        let project = self.project(project)?;
        let body = self.get("/ai-agents/patterns", project, &[])?;
        Ok(take_list(body, "patterns"))
    }

    pub fn get_decisions(&self, project: Option<&str>) -> Result<Vec<Value>> {
        let project = self.project(project)?;
        let body = self.get("/ai-agents/decisions", project, &[])?;
        Ok(take_list(body, "decisions"))
    }

    /// State, recent actions, patterns and decisions in one response.
    pub fn get_full_context(&self, project: Option<&str>) -> Result<Map<String, Value>> {
        let project = self.project(project)?;
        let mut body = self.get("/ai-agents/context", project, &[])?;
        match body.remove("context") {
            Some(Value::Object(context)) => Ok(context),
            _ => Ok(Map::new()),
        }
    }

    /// Effective project: the explicit argument, else the configured default.
    fn project<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str> {
        explicit
            .filter(|p| !p.is_empty())
            .or(self.config.project_name.as_deref().filter(|p| !p.is_empty()))
            .ok_or(ClientError::MissingProject)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// `{base}{prefix}/{project}` with the project percent-encoded as one segment.
    fn project_url(&self, prefix: &str, project: &str) -> Result<String> {
        let mut url = reqwest::Url::parse(&self.url(prefix))
            .map_err(|e| ClientError::Config(format!("invalid base url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Config("base url cannot carry path segments".to_string()))?
            .push(project);
        Ok(url.into())
    }

    fn post<T, R>(&self, path: &str, project: &str, body: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        let payload = Scoped {
            project_name: project,
            body,
            user_id: &self.config.user_id,
        };
        let response = self.send(self.http.post(&url).json(&payload), &url)?;
        let response = check_status(response, &url)?;
        decode(response, &url)
    }

    fn get(
        &self,
        prefix: &str,
        project: &str,
        params: &[(&str, &str)],
    ) -> Result<Map<String, Value>> {
        let url = self.project_url(prefix, project)?;
        let request = self
            .http
            .get(&url)
            .query(params)
            .query(&[("user_id", self.config.user_id.as_str())]);
        let response = self.send(request, &url)?;
        let response = check_status(response, &url)?;
        decode(response, &url)
    }

    fn send(&self, request: RequestBuilder, url: &str) -> Result<Response> {
        let response = request.send().map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;
        tracing::debug!(url, status = %response.status(), "memory service responded");
        Ok(response)
    }
}

fn check_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status {
            url: url.to_string(),
            status,
        })
    }
}

fn decode<T: DeserializeOwned>(response: Response, url: &str) -> Result<T> {
    let text = response.text().map_err(|source| ClientError::Transport {
        url: url.to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ClientError::Decode {
        url: url.to_string(),
        source,
    })
}

fn take_list(mut body: Map<String, Value>, field: &str) -> Vec<Value> {
    match body.remove(field) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Values that mean "no state saved".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(project: Option<&str>) -> MemoryClient {
        let mut config = ClientConfig::new("http://127.0.0.1:9");
        config.project_name = project.map(str::to_string);
        MemoryClient::new(config).unwrap()
    }

    #[test]
    fn test_explicit_project_wins() {
        let client = client(Some("default"));
        assert_eq!(client.project(Some("explicit")).unwrap(), "explicit");
        assert_eq!(client.project(None).unwrap(), "default");
        assert_eq!(client.project(Some("")).unwrap(), "default");
    }

    #[test]
    fn test_missing_project() {
        let client = client(None);
        assert!(matches!(client.project(None), Err(ClientError::MissingProject)));
    }

    #[test]
    fn test_project_url_encodes_segment() {
        let client = client(None);
        let url = client.project_url("/ai-agents/state", "my project/v2").unwrap();
        assert_eq!(url, "http://127.0.0.1:9/ai-agents/state/my%20project%2Fv2");
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let config = ClientConfig::default().with_api_key("bad\nkey");
        assert!(matches!(MemoryClient::new(config), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_blank_states() {
        assert!(is_blank(&json!(null)));
        assert!(is_blank(&json!({})));
        assert!(is_blank(&json!("")));
        assert!(!is_blank(&json!({"project_metadata": {}})));
        assert!(is_blank(&json!(0)));
        assert!(is_blank(&json!(0.0)));
        assert!(!is_blank(&json!(3)));
    }

    #[test]
    fn test_take_list_defaults_to_empty() {
        let body = json!({"success": true, "count": 0});
        let Value::Object(map) = body else { unreachable!() };
        assert!(take_list(map, "results").is_empty());
    }
}
