//! Common test utilities for integration tests
//!
//! Each test gets its own mock backend, an in-memory session store and a
//! navigator that records redirects.

#![allow(dead_code)]

use chrono::NaiveDate;
use fake::faker::internet::en::{SafeEmail, Username};
use fake::Fake;
use serde_json::{json, Value};
use std::sync::Arc;
use tracker_client::api::{ApiClient, AppFlavor};
use tracker_client::config::AppConfig;
use tracker_client::navigation::RecordingNavigator;
use tracker_client::session::{MemoryStore, SessionKey, SessionStore};
use wiremock::MockServer;

/// Test client wrapper around a mock backend
pub struct TestApp {
    pub server: MockServer,
    pub store: Arc<MemoryStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub client: ApiClient,
    pub flavor: AppFlavor,
}

impl TestApp {
    /// Start a mock backend and a client pointed at it
    pub async fn new(flavor: AppFlavor) -> Self {
        let server = MockServer::start().await;
        let config = test_config(&server.uri(), flavor);
        let store = Arc::new(MemoryStore::new(flavor));
        let navigator = Arc::new(RecordingNavigator::new());
        let client = ApiClient::new(&config.api, store.clone(), navigator.clone())
            .expect("Failed to build client");

        Self {
            server,
            store,
            navigator,
            client,
            flavor,
        }
    }

    /// Seed a persisted session as if a previous run had logged in
    pub fn seed_session(&self, access: &str, refresh: Option<&str>, user: Option<&Value>) {
        self.store
            .set(SessionKey::AccessToken, access)
            .expect("Failed to seed access token");
        if let Some(refresh) = refresh {
            self.store
                .set(SessionKey::RefreshToken, refresh)
                .expect("Failed to seed refresh token");
        }
        if let Some(user) = user {
            self.store
                .set(SessionKey::User, &user.to_string())
                .expect("Failed to seed user");
        }
    }

    /// Whether no session entry survives
    pub fn session_is_empty(&self) -> bool {
        SessionKey::ALL
            .iter()
            .all(|key| self.store.get(*key).is_none())
    }

    /// Requests the mock backend received for a path
    pub async fn hits(&self, path: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == path)
            .collect()
    }
}

/// Create test configuration
pub fn test_config(base_url: &str, flavor: AppFlavor) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.flavor = flavor;
    config.api.timeout_secs = 5;
    config
}

pub fn fake_username() -> String {
    Username().fake()
}

pub fn fake_email() -> String {
    SafeEmail().fake()
}

/// User JSON as the profile endpoint returns it
pub fn user_json(id: i64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "first_name": "",
        "last_name": ""
    })
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Bearer header value the client should send
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
