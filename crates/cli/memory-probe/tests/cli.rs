use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::net::TcpListener;
use tempfile::tempdir;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock memory service kept alive on its own runtime while the binary runs.
struct Harness {
    server: MockServer,
    runtime: Runtime,
}

impl Harness {
    fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    fn healthy(&self) {
        self.mount(
            Mock::given(method("GET"))
                .and(path("/health"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!({"ok": true, "version": "2.0"})),
                ),
        );
    }

    /// The binary pointed at this server for project `checkout`.
    fn command(&self) -> Command {
        let mut cmd = memory_probe();
        cmd.args(["--base-url", &self.server.uri(), "--project", "checkout"]);
        cmd
    }

    fn verify(&self) {
        self.runtime.block_on(self.server.verify());
    }
}

/// Address nothing listens on.
fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn memory_probe() -> Command {
    let mut cmd = Command::cargo_bin("memory-probe").unwrap();
    for key in [
        "OPENMEMORY_URL",
        "OPENMEMORY_API_KEY",
        "OPENMEMORY_USER_ID",
        "OPENMEMORY_PROJECT",
        "CLAUDE_PROJECT_DIR",
        "AI_AGENTS_STATE_FILE",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn test_walkthrough_fails_when_service_down() {
    memory_probe()
        .args(["--base-url", &closed_address()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("memory service is not available"));
}

#[test]
fn test_health_fails_when_service_down() {
    memory_probe()
        .args(["--base-url", &closed_address(), "health"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not available"));
}

#[test]
fn test_missing_project_is_reported() {
    memory_probe()
        .args(["--base-url", &closed_address(), "history"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project_name must be provided"));
}

#[test]
fn test_walkthrough_fresh_project() {
    let harness = Harness::start();
    harness.healthy();
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/ai-agents/state/checkout"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"err": "not_found"}))),
    );

    harness
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Memory service is running"))
        .stdout(predicate::str::contains("  Version: 2.0"))
        .stdout(predicate::str::contains("✓ Project mode: INITIALIZE"))
        .stdout(predicate::str::contains("This is a fresh project."));
}

#[test]
fn test_walkthrough_existing_project() {
    let harness = Harness::start();
    harness.healthy();
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/ai-agents/state/checkout"))
            .and(query_param("user_id", "ai-agent-system"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "state": {"project_metadata": {"current_phase": "Phase 2"}}
            }))),
    );

    harness
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Project mode: RESUME"))
        .stdout(predicate::str::contains("This project has existing state."));
}

#[test]
fn test_walkthrough_unhealthy_service() {
    let harness = Harness::start();
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": false}))),
    );

    harness
        .command()
        .assert()
        .failure()
        .stdout(predicate::str::contains("Please start the memory service first"));
}

#[test]
fn test_save_state_uploads_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("project-state.json");
    fs::write(
        &file,
        r#"{"project_metadata": {"current_phase": "Phase 1"}, "services": {}}"#,
    )
    .unwrap();

    let harness = Harness::start();
    harness.mount(
        Mock::given(method("POST"))
            .and(path("/ai-agents/state"))
            .and(body_json(json!({
                "project_name": "checkout",
                "state": {"project_metadata": {"current_phase": "Phase 1"}, "services": {}},
                "user_id": "ai-agent-system"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "memory_id": "m-1"
            })))
            .expect(1),
    );

    harness
        .command()
        .arg("save-state")
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""memory_id": "m-1""#));
    harness.verify();
}

#[test]
fn test_save_state_missing_file_fails() {
    let dir = tempdir().unwrap();
    let harness = Harness::start();

    harness
        .command()
        .arg("save-state")
        .arg("--file")
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.json"));
}

#[test]
fn test_load_state_not_found_exits_one() {
    let harness = Harness::start();
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/ai-agents/state/checkout"))
            .respond_with(ResponseTemplate::new(404)),
    );

    harness
        .command()
        .arg("load-state")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No project state stored"));
}

#[test]
fn test_query_prints_results() {
    let harness = Harness::start();
    harness.mount(
        Mock::given(method("POST"))
            .and(path("/ai-agents/query"))
            .and(body_json(json!({
                "project_name": "checkout",
                "query": "latest changes",
                "memory_type": "decisions",
                "k": 3,
                "user_id": "ai-agent-system"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "results": [{"id": "d-7"}]
            })))
            .expect(1),
    );

    harness
        .command()
        .args(["query", "latest changes", "--type", "decisions", "-k", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""id": "d-7""#));
    harness.verify();
}
