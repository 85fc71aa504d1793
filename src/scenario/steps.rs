//! The individual steps of the authentication contract
//!
//! Each step performs one request, checks the status and body the service
//! is required to produce, and returns whatever value later steps thread
//! through (session token, reset token). The first unmet expectation
//! aborts the run.

use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::client::AuthClient;
use crate::common::{Error, Result};

/// Register a new account, expecting 201 and the creation confirmation
pub async fn register_user(client: &AuthClient, email: &str, password: &str) -> Result<()> {
    const STEP: &str = "register user";
    let reply = client.register(email, password).await?;
    expect_status(STEP, StatusCode::CREATED, reply.status)?;
    expect_body(
        STEP,
        &reply.body,
        &json!({"email": email, "message": "user created"}),
    )
}

/// Attempt a login with the wrong password, expecting a generic 401
pub async fn log_in_wrong_password(
    client: &AuthClient,
    email: &str,
    password: &str,
) -> Result<()> {
    const STEP: &str = "login with wrong password";
    let reply = client.login(email, password).await?;
    expect_status(STEP, StatusCode::UNAUTHORIZED, reply.status)?;
    expect_body(STEP, &reply.body, &json!({"message": "invalid credentials"}))
}

/// Fetch the profile without a session, expecting 403
pub async fn profile_unlogged(client: &AuthClient) -> Result<()> {
    const STEP: &str = "profile without session";
    let reply = client.profile(None).await?;
    expect_status(STEP, StatusCode::FORBIDDEN, reply.status)
}

/// Log in with correct credentials, expecting 200 and a session cookie
pub async fn log_in(client: &AuthClient, email: &str, password: &str) -> Result<String> {
    const STEP: &str = "login";
    let reply = client.login(email, password).await?;
    expect_status(STEP, StatusCode::OK, reply.status)?;
    reply.session_id.ok_or(Error::MissingCookie {
        step: STEP,
        cookie: crate::client::SESSION_COOKIE,
    })
}

/// Fetch the profile with a session, expecting 200 and an email field
pub async fn profile_logged(client: &AuthClient, session_id: &str) -> Result<()> {
    const STEP: &str = "profile with session";
    let reply = client.profile(Some(session_id)).await?;
    expect_status(STEP, StatusCode::OK, reply.status)?;
    if reply.field_str("email").is_none() {
        return Err(Error::MissingField {
            step: STEP,
            field: "email",
            body: reply.body.to_string(),
        });
    }
    Ok(())
}

/// Invalidate the session, expecting 200
pub async fn log_out(client: &AuthClient, session_id: &str) -> Result<()> {
    const STEP: &str = "logout";
    let reply = client.logout(session_id).await?;
    expect_status(STEP, StatusCode::OK, reply.status)
}

/// The invalidated session must no longer authorize profile access
pub async fn profile_after_logout(client: &AuthClient, session_id: &str) -> Result<()> {
    const STEP: &str = "profile with stale session";
    let reply = client.profile(Some(session_id)).await?;
    expect_status(STEP, StatusCode::FORBIDDEN, reply.status)
}

/// Request a password reset, expecting 200 and a non-empty reset token
pub async fn reset_password_token(client: &AuthClient, email: &str) -> Result<String> {
    const STEP: &str = "request password reset";
    let reply = client.request_reset(email).await?;
    expect_status(STEP, StatusCode::OK, reply.status)?;
    match reply.field_str("reset_token") {
        Some(token) => Ok(token.to_string()),
        None => Err(Error::MissingField {
            step: STEP,
            field: "reset_token",
            body: reply.body.to_string(),
        }),
    }
}

/// Consume the reset token, expecting 200 and the update confirmation
pub async fn update_password(
    client: &AuthClient,
    email: &str,
    reset_token: &str,
    new_password: &str,
) -> Result<()> {
    const STEP: &str = "update password";
    let reply = client.update_password(email, reset_token, new_password).await?;
    expect_status(STEP, StatusCode::OK, reply.status)?;
    expect_body(
        STEP,
        &reply.body,
        &json!({"email": email, "message": "Password updated"}),
    )
}

/// The pre-reset password must no longer work
pub async fn log_in_old_password(
    client: &AuthClient,
    email: &str,
    password: &str,
) -> Result<()> {
    const STEP: &str = "login with old password";
    let reply = client.login(email, password).await?;
    expect_status(STEP, StatusCode::UNAUTHORIZED, reply.status)
}

fn expect_status(step: &'static str, expected: StatusCode, actual: StatusCode) -> Result<()> {
    if actual != expected {
        return Err(Error::unexpected_status(step, expected, actual));
    }
    Ok(())
}

fn expect_body(step: &'static str, actual: &Value, expected: &Value) -> Result<()> {
    if actual != expected {
        return Err(Error::assertion(
            step,
            format!("unexpected response body: {actual}, expected {expected}"),
        ));
    }
    Ok(())
}
