//! Authentication service
//!
//! Login and registration go out without a bearer token and never trigger
//! a refresh. Profile calls use the normal interceptor.

use crate::api::{decode, ApiClient, RequestContext};
use crate::error::{ClientError, ClientResult};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;
use tracker_shared::models::User;
use tracker_shared::types::{AuthTokens, LoginRequest, LogoutRequest, ProfileUpdate, RegisterRequest};
use tracker_shared::validation::form_error;
use validator::Validate;

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Exchange credentials for a token pair
    pub async fn login(client: &ApiClient, request: &LoginRequest) -> ClientResult<AuthTokens> {
        request.validate().map_err(|e| form_error(&e))?;
        let ctx = RequestContext::new(Method::POST, client.endpoints().login).with_json(request)?;
        decode(client.send_public(ctx).await?)
    }

    /// Create an account; the response body is returned as sent
    pub async fn register(client: &ApiClient, request: &RegisterRequest) -> ClientResult<Value> {
        request.validate().map_err(|e| form_error(&e))?;
        let ctx =
            RequestContext::new(Method::POST, client.endpoints().register).with_json(request)?;
        client.send_public(ctx).await
    }

    /// Fetch the current user's profile
    pub async fn profile(client: &ApiClient) -> ClientResult<User> {
        client.get(client.endpoints().profile).await
    }

    /// Send a partial profile update
    ///
    /// Returns the raw response so the caller can merge whatever fields the
    /// backend echoes back.
    pub async fn update_profile(client: &ApiClient, update: &ProfileUpdate) -> ClientResult<Value> {
        let Some(path) = client.endpoints().profile_update else {
            return Err(ClientError::Config(
                "Profile updates are not available for this app".to_string(),
            ));
        };
        update.validate().map_err(|e| form_error(&e))?;
        client.put(path, update).await
    }

    /// Tell the backend to revoke the refresh token
    ///
    /// Does nothing for backends without a logout route.
    pub async fn logout(client: &ApiClient, refresh_token: &str) -> ClientResult<()> {
        let Some(path) = client.endpoints().logout else {
            debug!("Backend has no logout route, skipping");
            return Ok(());
        };
        let body = LogoutRequest {
            refresh_token: refresh_token.to_string(),
        };
        client.post::<_, Value>(path, &body).await.map(|_| ())
    }
}
