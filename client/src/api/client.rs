//! Authenticated request client
//!
//! Every request carries the persisted access token as a bearer credential.
//! A 401 on a request that has not been retried triggers exactly one token
//! refresh; on success the request is resent once with the new token, on
//! failure the session is cleared and the user is sent to the login route.
//!
//! # Design Principles
//!
//! 1. **Explicit retry state**: the `retried` flag lives on `RequestContext`
//! 2. **Persist before resend**: the new access token is stored first
//! 3. **Refresh bypasses the interceptor**: no bearer header, no retry

use super::endpoints::Endpoints;
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::navigation::{Navigator, Route};
use crate::session::{SessionKey, SessionStore};
use reqwest::{Method, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::any::type_name;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracker_shared::errors::DecodeError;
use tracker_shared::types::{Listing, RefreshRequest, RefreshResponse};

/// One logical request, including its retry state
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Set once a refresh has been attempted for this request
    pub retried: bool,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| DecodeError::shape("request body", e))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// HTTP client bound to one backend and one session
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    endpoints: Endpoints,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(
        config: &ApiConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            endpoints: Endpoints::for_flavor(config.flavor),
            store,
            navigator,
        })
    }

    #[inline]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    #[inline]
    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    #[inline]
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // Interceptor
    // ========================================================================

    /// Send a request through the refresh interceptor
    ///
    /// Returns the decoded JSON body, or `Value::Null` for an empty body.
    pub async fn send(&self, mut ctx: RequestContext) -> ClientResult<Value> {
        let token = self.store.access_token();
        let err = match self.dispatch(&ctx, token.as_ref()).await {
            Err(err) if err.is_unauthorized() && !ctx.retried => err,
            other => return other,
        };

        ctx.retried = true;
        let Some(refresh) = self.store.refresh_token() else {
            debug!(path = %ctx.path, "401 without a refresh token");
            record_refresh("missing_token");
            return Err(err);
        };

        match self.refresh_access_token(&refresh).await {
            Ok(access) => {
                // Persisted before the resend; the retry uses the fresh token directly
                self.store
                    .set(SessionKey::AccessToken, access.expose_secret())?;
                record_refresh("success");
                info!(path = %ctx.path, "Access token refreshed, retrying request");
                self.dispatch(&ctx, Some(&access)).await
            }
            Err(refresh_err) => {
                record_refresh("failure");
                warn!(error = %refresh_err, "Token refresh failed, clearing session");
                if let Err(e) = self.store.clear() {
                    warn!("Failed to clear session: {}", e);
                }
                self.navigator.redirect(Route::Login);
                Err(refresh_err)
            }
        }
    }

    /// Send a request without a bearer header or refresh handling
    pub async fn send_public(&self, ctx: RequestContext) -> ClientResult<Value> {
        self.dispatch(&ctx, None).await
    }

    async fn dispatch(
        &self,
        ctx: &RequestContext,
        token: Option<&SecretString>,
    ) -> ClientResult<Value> {
        let mut request = self.http.request(ctx.method.clone(), self.url(&ctx.path));
        if !ctx.query.is_empty() {
            request = request.query(&ctx.query);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = &ctx.body {
            request = request.json(body);
        }

        debug!(method = %ctx.method, path = %ctx.path, retried = ctx.retried, "Sending request");
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                record_request("network_error");
                warn!(path = %ctx.path, "Request failed: {}", e);
                return Err(ClientError::from(e));
            }
        };
        read_response(response).await
    }

    async fn refresh_access_token(&self, refresh: &SecretString) -> ClientResult<SecretString> {
        let body = RefreshRequest {
            refresh: refresh.expose_secret().to_string(),
        };
        let response = self
            .http
            .post(self.url(self.endpoints.refresh))
            .json(&body)
            .send()
            .await?;
        let value = read_response(response).await?;

        let refreshed: RefreshResponse = serde_json::from_value(value).map_err(|_| {
            ClientError::Unauthorized("Token refresh response had no access token".to_string())
        })?;
        if let Some(rotated) = refreshed.refresh {
            self.store.set(SessionKey::RefreshToken, &rotated)?;
        }
        Ok(SecretString::new(refreshed.access))
    }

    // ========================================================================
    // Typed helpers
    // ========================================================================

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        decode(self.send(RequestContext::get(path)).await?)
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ClientResult<T> {
        decode(self.send(RequestContext::get(path).with_query(query)).await?)
    }

    /// GET a collection that may be bare, paginated or missing
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Vec<T>> {
        self.get::<Listing<T>>(path).await.map(Listing::into_items)
    }

    pub async fn get_list_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ClientResult<Vec<T>> {
        self.get_with_query::<Listing<T>>(path, query)
            .await
            .map(Listing::into_items)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let ctx = RequestContext::new(Method::POST, path).with_json(body)?;
        decode(self.send(ctx).await?)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let ctx = RequestContext::new(Method::PUT, path).with_json(body)?;
        decode(self.send(ctx).await?)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let ctx = RequestContext::new(Method::PATCH, path).with_json(body)?;
        decode(self.send(ctx).await?)
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send(RequestContext::delete(path)).await.map(|_| ())
    }
}

async fn read_response(response: Response) -> ClientResult<Value> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        record_request("error");
        debug!(status = status.as_u16(), "Request returned an error status");
        return Err(ClientError::from_response(status.as_u16(), &text));
    }

    record_request("success");
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| DecodeError::shape("response body", e).into())
}

/// Decode a JSON value into a strict type
pub fn decode<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    serde_json::from_value(value).map_err(|e| DecodeError::shape(entity_name::<T>(), e).into())
}

fn entity_name<T>() -> &'static str {
    let full = type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

fn record_request(outcome: &'static str) {
    metrics::counter!("tracker_client_requests_total", "outcome" => outcome).increment(1);
}

fn record_refresh(outcome: &'static str) {
    metrics::counter!("tracker_client_token_refresh_total", "outcome" => outcome).increment(1);
}
