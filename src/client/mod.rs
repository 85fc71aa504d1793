//! HTTP client for the authentication API under test
//!
//! One method per endpoint, each returning the status, parsed body and any
//! issued session cookie. The session token is threaded explicitly by the
//! caller rather than through a cookie jar; the scenario contract is about
//! which requests carry the cookie, so nothing may attach it implicitly.

pub mod types;

use std::time::Duration;

use reqwest::header::{self, HeaderMap};
use reqwest::{RequestBuilder, Url};
use serde_json::Value;
use tracing::debug;

use crate::common::{Error, Result};

pub use types::ApiReply;
use types::{LoginRequest, RegisterRequest, ResetRequest, UpdatePasswordRequest};

/// Name of the session cookie issued by the service
pub const SESSION_COOKIE: &str = "session_id";

/// Client for the authentication service under test
#[derive(Debug)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|_| Error::InvalidBaseUrl(base_url.to_string()))?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, base_url })
    }

    /// Register a new account: POST /users
    pub async fn register(&self, email: &str, password: &str) -> Result<ApiReply> {
        let url = self.endpoint("/users")?;
        self.execute(self.http.post(url).json(&RegisterRequest { email, password }))
            .await
    }

    /// Open a session: POST /sessions
    pub async fn login(&self, email: &str, password: &str) -> Result<ApiReply> {
        let url = self.endpoint("/sessions")?;
        self.execute(self.http.post(url).json(&LoginRequest { email, password }))
            .await
    }

    /// Fetch the profile: GET /profile, optionally with a session cookie
    pub async fn profile(&self, session_id: Option<&str>) -> Result<ApiReply> {
        let url = self.endpoint("/profile")?;
        let mut request = self.http.get(url);
        if let Some(sid) = session_id {
            request = request.header(header::COOKIE, session_cookie_header(sid));
        }
        self.execute(request).await
    }

    /// Invalidate a session: DELETE /sessions
    pub async fn logout(&self, session_id: &str) -> Result<ApiReply> {
        let url = self.endpoint("/sessions")?;
        self.execute(
            self.http
                .delete(url)
                .header(header::COOKIE, session_cookie_header(session_id)),
        )
        .await
    }

    /// Ask for a reset token: POST /reset_password
    pub async fn request_reset(&self, email: &str) -> Result<ApiReply> {
        let url = self.endpoint("/reset_password")?;
        self.execute(self.http.post(url).json(&ResetRequest { email }))
            .await
    }

    /// Consume a reset token: PUT /reset_password
    pub async fn update_password(
        &self,
        email: &str,
        reset_token: &str,
        new_password: &str,
    ) -> Result<ApiReply> {
        let url = self.endpoint("/reset_password")?;
        self.execute(self.http.put(url).json(&UpdatePasswordRequest {
            email,
            reset_token,
            new_password,
        }))
        .await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|_| Error::InvalidBaseUrl(format!("{}{}", self.base_url, path)))
    }

    /// Send a request and collect status, body and session cookie
    async fn execute(&self, request: RequestBuilder) -> Result<ApiReply> {
        let response = request.send().await?;

        let status = response.status();
        let session_id = extract_cookie(response.headers(), SESSION_COOKIE);
        // The body is read before parsing so that non-JSON responses
        // (empty bodies, HTML error pages) reach the assertions as Null
        // instead of aborting the run with a decode error.
        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        debug!(status = status.as_u16(), body = %body, "response");

        Ok(ApiReply {
            status,
            body,
            session_id,
        })
    }
}

fn session_cookie_header(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}")
}

/// Extract a cookie value from Set-Cookie response headers
///
/// Only the name=value pair before the first attribute is considered;
/// malformed or empty pairs are skipped.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|raw| {
            let pair = raw.split(';').next()?.trim();
            let (cookie_name, cookie_value) = pair.split_once('=')?;
            (cookie_name == name && !cookie_value.is_empty())
                .then(|| cookie_value.to_string())
        })
}
