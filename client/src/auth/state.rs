//! Auth state holder
//!
//! Owns the current user and exposes the narrow set of transitions the
//! views need. Startup validates any persisted session against the profile
//! endpoint before trusting it.

use crate::api::{decode, ApiClient};
use crate::error::{ClientError, ClientResult};
use crate::services::AuthService;
use crate::session::SessionStore;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};
use tracker_shared::models::User;
use tracker_shared::types::{LoginRequest, ProfileUpdate, RegisterRequest};

/// Authentication state
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Startup validation has not finished
    Loading,
    Authenticated(User),
    Unauthenticated,
}

/// A failed login or registration, with the message to show
#[derive(Error, Debug)]
#[error("{message}")]
pub struct AuthFailure {
    pub message: String,
    #[source]
    pub source: ClientError,
}

/// Holder for the current session
pub struct AuthSession {
    client: ApiClient,
    state: AuthState,
}

impl AuthSession {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: AuthState::Loading,
        }
    }

    #[inline]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[inline]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, AuthState::Loading)
    }

    fn store(&self) -> &dyn SessionStore {
        self.client.store()
    }

    /// Validate the persisted session, if any
    pub async fn bootstrap(&mut self) -> &AuthState {
        let has_token = self.store().access_token().is_some();
        let has_user = self.store().cached_user().is_some();

        if !(has_token && has_user) {
            self.state = AuthState::Unauthenticated;
            return &self.state;
        }

        match AuthService::profile(&self.client).await {
            Ok(user) => {
                if let Err(e) = self.store().store_user(&user) {
                    warn!("Failed to cache profile: {}", e);
                }
                info!(user_id = user.id, "Session restored");
                self.state = AuthState::Authenticated(user);
            }
            Err(e) => {
                warn!("Stored session is no longer valid: {}", e);
                self.logout().await;
            }
        }
        &self.state
    }

    /// Log in with credentials
    ///
    /// On failure the state is left as it was and the message is normalized
    /// from the backend response.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User, AuthFailure> {
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };

        let tokens = AuthService::login(&self.client, &request)
            .await
            .map_err(login_failure)?;

        let access = SecretString::new(tokens.access);
        let refresh = SecretString::new(tokens.refresh);
        self.store()
            .store_tokens(&access, &refresh)
            .map_err(login_failure)?;

        // Some backends return only the token pair
        let user = match tokens.user {
            Some(raw) => decode::<User>(raw),
            None => AuthService::profile(&self.client).await,
        };
        let user = match user.and_then(|user| self.store().store_user(&user).map(|_| user)) {
            Ok(user) => user,
            Err(e) => {
                if let Err(clear_err) = self.store().clear() {
                    warn!("Failed to clear partial session: {}", clear_err);
                }
                return Err(login_failure(e));
            }
        };

        info!(user_id = user.id, "Logged in");
        self.state = AuthState::Authenticated(user.clone());
        Ok(user)
    }

    /// Create an account; the user logs in afterwards
    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, AuthFailure> {
        AuthService::register(&self.client, request)
            .await
            .map_err(register_failure)
    }

    /// End the session
    ///
    /// The backend call is best-effort; local state is always cleared.
    pub async fn logout(&mut self) {
        if let Some(refresh) = self.store().refresh_token() {
            if let Err(e) = AuthService::logout(&self.client, refresh.expose_secret()).await {
                warn!("Logout request failed: {}", e);
            }
        }
        if let Err(e) = self.store().clear() {
            warn!("Failed to clear session: {}", e);
        }
        info!("Logged out");
        self.state = AuthState::Unauthenticated;
    }

    /// Re-fetch the profile and replace the current user
    pub async fn refresh_profile(&mut self) -> ClientResult<&User> {
        let user = AuthService::profile(&self.client).await?;
        self.store().store_user(&user)?;
        self.state = AuthState::Authenticated(user);
        self.current()
    }

    /// Update profile fields and merge the response into the current user
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> ClientResult<&User> {
        let current = self.current()?.clone();
        let response = AuthService::update_profile(&self.client, update).await?;
        let merged = merge_user(&current, response)?;
        self.store().store_user(&merged)?;
        info!(user_id = merged.id, "Profile updated");
        self.state = AuthState::Authenticated(merged);
        self.current()
    }

    fn current(&self) -> ClientResult<&User> {
        self.user()
            .ok_or_else(|| ClientError::Unauthorized("Not logged in".to_string()))
    }
}

/// Shallow merge: top-level fields in `response` replace the user's
pub fn merge_user(user: &User, response: Value) -> ClientResult<User> {
    let mut merged = serde_json::to_value(user)
        .map_err(|e| ClientError::Session(format!("Failed to encode user: {}", e)))?;
    if let (Some(target), Value::Object(changes)) = (merged.as_object_mut(), response) {
        for (key, value) in changes {
            target.insert(key, value);
        }
    }
    decode(merged)
}

fn login_failure(source: ClientError) -> AuthFailure {
    let message = match &source {
        ClientError::Form(form) => form.to_string(),
        other => other.detail().unwrap_or("Login failed").to_string(),
    };
    AuthFailure { message, source }
}

fn register_failure(source: ClientError) -> AuthFailure {
    let message = match &source {
        ClientError::Form(form) => form.to_string(),
        ClientError::Validation { fields, .. } if !fields.is_empty() => fields
            .values()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(", "),
        other => other.detail().unwrap_or("Registration failed").to_string(),
    };
    AuthFailure { message, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> User {
        serde_json::from_value(json!({
            "id": 4, "username": "kim", "email": "kim@example.com",
            "weight": "70.0", "height": 175
        }))
        .unwrap()
    }

    #[test]
    fn test_merge_user_replaces_top_level_fields() {
        let merged = merge_user(&user(), json!({"weight": 68.5, "age": 31})).unwrap();
        assert_eq!(merged.weight, Some(68.5));
        assert_eq!(merged.age, Some(31));
        assert_eq!(merged.height, Some(175.0));
        assert_eq!(merged.username, "kim");
    }

    #[test]
    fn test_merge_user_ignores_non_object_response() {
        let merged = merge_user(&user(), json!("ok")).unwrap();
        assert_eq!(merged, user());
    }

    #[test]
    fn test_login_failure_messages() {
        let failure = login_failure(ClientError::from_response(401, r#"{"error": "Invalid credentials"}"#));
        assert_eq!(failure.message, "Invalid credentials");

        let failure = login_failure(ClientError::from_response(401, ""));
        assert_eq!(failure.message, "Login failed");
    }

    #[test]
    fn test_register_failure_flattens_fields() {
        let failure = register_failure(ClientError::from_response(
            400,
            r#"{"email": ["Enter a valid email address."], "username": ["Taken."]}"#,
        ));
        assert_eq!(failure.message, "Enter a valid email address., Taken.");
    }
}
