//! Configuration file handling
//!
//! Everything has a built-in default matching the service contract, so the
//! tool runs with no config file at all. CLI flags override these values.

use serde::Deserialize;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Service under test
    #[serde(default)]
    pub service: ServiceConfig,

    /// Test credentials
    #[serde(default)]
    pub credentials: Credentials,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// Location of the service under test
#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    /// Base URL all endpoint paths are joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

/// Credentials the scenario registers and mutates
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// Email to register (unique user identifier)
    #[serde(default = "default_email")]
    pub email: String,

    /// Initial account password
    #[serde(default = "default_password")]
    pub password: String,

    /// Password applied by the reset flow
    #[serde(default = "default_new_password")]
    pub new_password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: default_email(),
            password: default_password(),
            new_password: default_new_password(),
        }
    }
}

fn default_email() -> String {
    "guillaume@holberton.io".to_string()
}

fn default_password() -> String {
    "b4l0u".to_string()
}

fn default_new_password() -> String {
    "t4rt1fl3tt3".to_string()
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Timeout for each HTTP request
    #[serde(default = "default_request")]
    pub request_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request_secs: default_request(),
        }
    }
}

fn default_request() -> u64 {
    30
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    super::Error::Config(format!(
                        "Failed to read '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                return Self::parse(&content);
            }
        }
        Ok(Self::default())
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}
