//! auth-smoke - end-to-end smoke tester for a user-authentication HTTP API
//!
//! This library drives an external authentication service through its full
//! user lifecycle (register, login, profile, logout, password reset) and
//! validates every response with fail-fast structured assertions.

pub mod cli;
pub mod client;
pub mod commands;
pub mod common;
pub mod scenario;

// Re-export commonly used types for tests
pub use client::AuthClient;
pub use common::{Error, Result};
pub use scenario::{run_scenario, ScenarioOptions, ScenarioReport};
