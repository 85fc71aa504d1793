//! CLI command definitions
//!
//! Defines the clap commands for the auth-smoke CLI.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full authentication smoke scenario
    Run {
        /// Base URL of the service under test (default: http://localhost:5000)
        #[arg(long)]
        base_url: Option<String>,

        /// Email to register (unique user identifier)
        #[arg(long)]
        email: Option<String>,

        /// Initial account password
        #[arg(long)]
        password: Option<String>,

        /// Password applied by the reset flow
        #[arg(long)]
        new_password: Option<String>,

        /// Derive a unique email for this run so the scenario can be
        /// repeated against a live service without wiping its store
        #[arg(long)]
        fresh_email: bool,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Verbose output
        #[arg(long, short)]
        verbose: bool,
    },

    /// Print the effective configuration and exit
    Config,
}
