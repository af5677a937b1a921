//! End-to-end tests for the `tracker` binary

mod common;

use common::user_json;
use serde_json::{json, Value};
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run the binary against `server` with an isolated working directory
async fn tracker(server: &MockServer, dir: &TempDir, args: &[&str]) -> Output {
    let session = dir.path().join("session.json");
    Command::new(env!("CARGO_BIN_EXE_tracker"))
        .current_dir(dir.path())
        .env("RUST_ENV", "test")
        .env("RUST_LOG", "off")
        .env_remove("TRACKER__API__BASE_URL")
        .env_remove("TRACKER__API__FLAVOR")
        .env_remove("TRACKER_PASSWORD")
        .arg("--flavor")
        .arg("fitness")
        .arg("--base-url")
        .arg(server.uri())
        .arg("--session")
        .arg(&session)
        .args(args)
        .output()
        .await
        .expect("Failed to run tracker")
}

fn seed_session(dir: &TempDir) {
    let entries = json!({
        "access_token": "stale",
        "refresh_token": "revoked",
        "user": user_json(1, "sam").to_string(),
    });
    std::fs::write(dir.path().join("session.json"), entries.to_string())
        .expect("Failed to seed session");
}

fn read_session(file: &Path) -> Value {
    let raw = std::fs::read_to_string(file).expect("Failed to read session");
    serde_json::from_str(&raw).expect("Session file is not JSON")
}

#[tokio::test]
async fn test_login_after_expired_session_succeeds() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    seed_session(&dir);

    // Bootstrap fails on the stale session and its refresh
    Mock::given(method("GET"))
        .and(path("/auth/profile/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "new-a",
            "refresh": "new-r",
            "user": user_json(1, "sam")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = tracker(&server, &dir, &["login", "-u", "sam", "--password", "pw"]).await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {}", stderr);
    assert!(stdout.contains("Logged in as sam"));
    let session = read_session(&dir.path().join("session.json"));
    assert_eq!(session["access_token"], "new-a");
    assert_eq!(session["refresh_token"], "new-r");
}

#[tokio::test]
async fn test_refresh_failure_during_command_reports_expired_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    seed_session(&dir);

    Mock::given(method("GET"))
        .and(path("/auth/profile/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "sam")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/(analytics|workouts)/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let output = tracker(&server, &dir, &["dashboard"]).await;

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Session expired"), "stderr: {}", stderr);
    let session = read_session(&dir.path().join("session.json"));
    assert!(session.get("access_token").is_none());
}
