//! Scenario runner
//!
//! Drives the authentication contract in strict order against one service
//! and stops at the first failed assertion. The runner always hands back a
//! [`ScenarioReport`]; only transport-level setup problems surface as `Err`.

use std::time::Duration;

use colored::Colorize;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::debug;

use crate::client::AuthClient;
use crate::common::Result;

use super::steps;

/// Display name of the built-in scenario
pub const SCENARIO_NAME: &str = "user-auth-flow";

/// Number of steps in the built-in scenario
pub const STEPS_TOTAL: usize = 11;

/// Options for one scenario run
#[derive(Debug, Clone)]
pub struct ScenarioOptions {
    pub base_url: String,
    pub email: String,
    pub password: String,
    pub new_password: String,
    /// Derive a unique email so reruns don't collide with earlier users
    pub fresh_email: bool,
    pub request_timeout: Duration,
    pub verbose: bool,
}

/// Result of a scenario run
#[derive(Debug)]
pub struct ScenarioReport {
    pub name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub steps_total: usize,
    pub error: Option<String>,
}

/// Run the authentication scenario against the configured service
pub async fn run_scenario(options: &ScenarioOptions) -> Result<ScenarioReport> {
    let client = AuthClient::new(&options.base_url, options.request_timeout)?;

    let email = if options.fresh_email {
        fresh_email(&options.email)
    } else {
        options.email.clone()
    };

    println!(
        "\n{} {}",
        "Running scenario:".blue().bold(),
        SCENARIO_NAME.white().bold()
    );
    println!("  {}", options.base_url.dimmed());
    if options.verbose {
        println!("  email: {}", email.dimmed());
    }

    println!("\n{}", "Steps:".cyan());

    let mut progress = Progress::default();
    match drive(&client, &email, options, &mut progress).await {
        Ok(()) => {
            println!(
                "\n{} {}\n",
                "✓".green().bold(),
                "Scenario Passed".green().bold()
            );
            Ok(ScenarioReport {
                name: SCENARIO_NAME.to_string(),
                passed: true,
                steps_run: STEPS_TOTAL,
                steps_total: STEPS_TOTAL,
                error: None,
            })
        }
        Err(e) => {
            println!("  {} Step {}: {}", "✗".red(), progress.run + 1, e);
            println!(
                "\n{} {}\n",
                "✗".red().bold(),
                "Scenario Failed".red().bold()
            );
            Ok(ScenarioReport {
                name: SCENARIO_NAME.to_string(),
                passed: false,
                steps_run: progress.run,
                steps_total: STEPS_TOTAL,
                error: Some(e.to_string()),
            })
        }
    }
}

/// Execute the steps in contract order, threading tokens between them
async fn drive(
    client: &AuthClient,
    email: &str,
    options: &ScenarioOptions,
    progress: &mut Progress,
) -> Result<()> {
    let password = options.password.as_str();
    let new_password = options.new_password.as_str();

    steps::register_user(client, email, password).await?;
    progress.step("register user");

    // The future password doubles as the wrong one
    steps::log_in_wrong_password(client, email, new_password).await?;
    progress.step("login with wrong password rejected");

    steps::profile_unlogged(client).await?;
    progress.step("profile without session rejected");

    let session_id = steps::log_in(client, email, password).await?;
    progress.step("login");

    steps::profile_logged(client, &session_id).await?;
    progress.step("profile with session");

    steps::log_out(client, &session_id).await?;
    progress.step("logout");

    steps::profile_after_logout(client, &session_id).await?;
    progress.step("stale session rejected");

    let reset_token = steps::reset_password_token(client, email).await?;
    progress.step("request password reset");

    steps::update_password(client, email, &reset_token, new_password).await?;
    progress.step("update password");

    steps::log_in_old_password(client, email, password).await?;
    progress.step("old password rejected");

    let session_id = steps::log_in(client, email, new_password).await?;
    progress.step("login with new password");

    // Teardown: don't leave the last session behind on the service
    if let Err(e) = client.logout(&session_id).await {
        debug!("teardown logout failed: {e}");
    }

    Ok(())
}

/// Per-step progress, counted for the report and echoed to stdout
#[derive(Default)]
struct Progress {
    run: usize,
}

impl Progress {
    fn step(&mut self, label: &str) {
        self.run += 1;
        println!("  {} Step {}: {}", "✓".green(), self.run, label.dimmed());
    }
}

/// Derive a unique email by suffixing the local part
fn fresh_email(email: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    let suffix = suffix.to_lowercase();

    match email.split_once('@') {
        Some((local, domain)) => format!("{local}+{suffix}@{domain}"),
        None => format!("{email}+{suffix}"),
    }
}
