//! In-process stub of the authentication service under test
//!
//! Implements the six-endpoint contract with in-memory state, bound to an
//! ephemeral port. `Fault` switches make the stub violate the contract in
//! one specific way so tests can check that the runner fails on the right
//! step.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Deserialize;
use serde_json::json;

/// A single deliberate contract violation
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Fault {
    #[default]
    None,
    /// GET /profile returns 200 even without a session
    OpenProfile,
    /// Login succeeds but never sets the session cookie
    NoSessionCookie,
    /// POST /reset_password returns 200 without a token
    NoResetToken,
    /// PUT /reset_password confirms with the wrong message
    WrongUpdateMessage,
    /// PUT /reset_password succeeds but the old password keeps working
    ResetNotPersisted,
}

struct AppState {
    /// email -> password
    users: Mutex<HashMap<String, String>>,
    /// session_id -> email
    sessions: Mutex<HashMap<String, String>>,
    /// email -> reset token
    reset_tokens: Mutex<HashMap<String, String>>,
    fault: Fault,
}

/// Handle to a running stub, torn down on drop
pub struct StubService {
    pub base_url: String,
    server: tokio::task::JoinHandle<()>,
}

impl StubService {
    pub async fn spawn() -> Self {
        Self::spawn_with(Fault::None).await
    }

    pub async fn spawn_with(fault: Fault) -> Self {
        let state = Arc::new(AppState {
            users: Mutex::new(HashMap::new()),
            sessions: Mutex::new(HashMap::new()),
            reset_tokens: Mutex::new(HashMap::new()),
            fault,
        });

        let app = Router::new()
            .route("/users", post(register))
            .route("/sessions", post(login).delete(logout))
            .route("/profile", get(profile))
            .route("/reset_password", post(reset_token).put(update_password))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub serve");
        });

        Self {
            base_url: format!("http://{addr}"),
            server,
        }
    }
}

impl Drop for StubService {
    fn drop(&mut self) {
        self.server.abort();
    }
}

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(creds): Json<Credentials>,
) -> Response {
    let mut users = state.users.lock().unwrap();
    if users.contains_key(&creds.email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "email already registered"})),
        )
            .into_response();
    }
    users.insert(creds.email.clone(), creds.password);

    (
        StatusCode::CREATED,
        Json(json!({"email": creds.email, "message": "user created"})),
    )
        .into_response()
}

async fn login(State(state): State<Arc<AppState>>, Json(creds): Json<Credentials>) -> Response {
    let valid = state.users.lock().unwrap().get(&creds.email) == Some(&creds.password);
    if !valid {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "invalid credentials"})),
        )
            .into_response();
    }

    let body = Json(json!({"email": creds.email, "message": "logged in"}));
    if state.fault == Fault::NoSessionCookie {
        return (StatusCode::OK, body).into_response();
    }

    let session_id = opaque_token();
    state
        .sessions
        .lock()
        .unwrap()
        .insert(session_id.clone(), creds.email);

    let mut response = (StatusCode::OK, body).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        format!("session_id={session_id}; Path=/; HttpOnly")
            .parse()
            .unwrap(),
    );
    response
}

async fn profile(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if state.fault == Fault::OpenProfile {
        return (StatusCode::OK, Json(json!({"email": "anonymous@example.com"})))
            .into_response();
    }

    let email = session_from(&headers)
        .and_then(|sid| state.sessions.lock().unwrap().get(&sid).cloned());
    match email {
        Some(email) => (StatusCode::OK, Json(json!({"email": email}))).into_response(),
        None => StatusCode::FORBIDDEN.into_response(),
    }
}

async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let destroyed = session_from(&headers)
        .map(|sid| state.sessions.lock().unwrap().remove(&sid).is_some())
        .unwrap_or(false);
    if destroyed {
        (StatusCode::OK, Json(json!({"message": "logged out"}))).into_response()
    } else {
        StatusCode::FORBIDDEN.into_response()
    }
}

#[derive(Deserialize)]
struct ResetRequest {
    email: String,
}

async fn reset_token(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResetRequest>,
) -> Response {
    if !state.users.lock().unwrap().contains_key(&request.email) {
        return StatusCode::FORBIDDEN.into_response();
    }

    if state.fault == Fault::NoResetToken {
        return (StatusCode::OK, Json(json!({"email": request.email}))).into_response();
    }

    let token = opaque_token();
    state
        .reset_tokens
        .lock()
        .unwrap()
        .insert(request.email.clone(), token.clone());

    (
        StatusCode::OK,
        Json(json!({"email": request.email, "reset_token": token})),
    )
        .into_response()
}

#[derive(Deserialize)]
struct UpdateRequest {
    email: String,
    reset_token: String,
    new_password: String,
}

async fn update_password(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateRequest>,
) -> Response {
    {
        let mut tokens = state.reset_tokens.lock().unwrap();
        if tokens.get(&request.email) != Some(&request.reset_token) {
            return StatusCode::FORBIDDEN.into_response();
        }
        // Single logical use
        tokens.remove(&request.email);
    }

    if state.fault != Fault::ResetNotPersisted {
        state
            .users
            .lock()
            .unwrap()
            .insert(request.email.clone(), request.new_password);
    }

    let message = if state.fault == Fault::WrongUpdateMessage {
        "password changed"
    } else {
        "Password updated"
    };
    (
        StatusCode::OK,
        Json(json!({"email": request.email, "message": message})),
    )
        .into_response()
}

fn session_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == "session_id" && !value.is_empty()).then(|| value.to_string())
        })
}

fn opaque_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}
