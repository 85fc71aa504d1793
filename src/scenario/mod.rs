//! Sequential scenario runner for the authentication contract
//!
//! The step order is fixed in code: register, failed login, unauthenticated
//! profile, login, profile, logout, stale-session check, reset request,
//! password update, old-password check, login with the new password.
//! Assertions are made against structured data (status codes and parsed
//! JSON bodies) and the first mismatch ends the run.

mod runner;
mod steps;

pub use runner::{run_scenario, ScenarioOptions, ScenarioReport, SCENARIO_NAME, STEPS_TOTAL};
