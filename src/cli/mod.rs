//! CLI command handling
//!
//! Merges flags over the config file, runs the scenario and maps a failed
//! run to a non-zero exit.

use std::time::Duration;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{paths, Error, Result};
use crate::scenario::{run_scenario, ScenarioOptions};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            base_url,
            email,
            password,
            new_password,
            fresh_email,
            timeout,
            verbose,
        } => {
            let config = Config::load()?;

            let options = ScenarioOptions {
                base_url: base_url.unwrap_or(config.service.base_url),
                email: email.unwrap_or(config.credentials.email),
                password: password.unwrap_or(config.credentials.password),
                new_password: new_password.unwrap_or(config.credentials.new_password),
                fresh_email,
                request_timeout: Duration::from_secs(
                    timeout.unwrap_or(config.timeouts.request_secs),
                ),
                verbose,
            };

            let report = run_scenario(&options).await?;

            if report.passed {
                Ok(())
            } else {
                Err(Error::ScenarioFailed {
                    steps_run: report.steps_run,
                    steps_total: report.steps_total,
                    detail: report
                        .error
                        .unwrap_or_else(|| "unknown failure".to_string()),
                })
            }
        }

        Commands::Config => {
            let config = Config::load()?;

            match paths::config_path() {
                Some(path) if path.exists() => {
                    println!("Config file: {}", path.display());
                }
                Some(path) => {
                    println!("Config file: {} (not present, using defaults)", path.display());
                }
                None => println!("Config file: <no config directory>"),
            }
            println!("Base URL:     {}", config.service.base_url);
            println!("Email:        {}", config.credentials.email);
            println!("Timeout:      {}s", config.timeouts.request_secs);

            Ok(())
        }
    }
}
