//! auth-smoke - end-to-end smoke tester for a user-authentication HTTP API
//!
//! Runs a fixed sequence of HTTP requests against an authentication service
//! (registration, login, profile, logout, password reset) and fails fast on
//! the first response that breaks the contract.

use auth_smoke::{cli, commands::Commands, common};
use clap::Parser;

#[derive(Parser)]
#[command(name = "auth-smoke", about = "Smoke tester for a user-authentication HTTP API")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    common::logging::init_cli();

    let cli = Cli::parse();

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
