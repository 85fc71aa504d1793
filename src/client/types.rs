//! Request payloads and the reply shape for the auth API
//!
//! Payloads borrow their fields; every request is built and sent within one
//! call, so nothing needs an owned copy.

use serde::Serialize;
use serde_json::Value;

/// POST /users
#[derive(Serialize, Debug)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// POST /sessions
#[derive(Serialize, Debug)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// POST /reset_password
#[derive(Serialize, Debug)]
pub struct ResetRequest<'a> {
    pub email: &'a str,
}

/// PUT /reset_password
#[derive(Serialize, Debug)]
pub struct UpdatePasswordRequest<'a> {
    pub email: &'a str,
    pub reset_token: &'a str,
    pub new_password: &'a str,
}

/// Everything a scenario step needs from one HTTP exchange
#[derive(Debug)]
pub struct ApiReply {
    /// Response status code
    pub status: reqwest::StatusCode,
    /// Parsed JSON body, `Value::Null` if the body was empty or not JSON
    pub body: Value,
    /// Session token from a `Set-Cookie: session_id=...` header, if present
    pub session_id: Option<String>,
}

impl ApiReply {
    /// Get a non-empty string field from the response body
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.body.get(name)?.as_str().filter(|s| !s.is_empty())
    }
}
