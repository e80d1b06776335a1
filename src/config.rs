//! Run configuration.
//!
//! The only value taken from the environment is the API token, loaded through
//! [`EnvConfig`]. Everything else comes from the command line. The resolved
//! [`AppConfig`] is passed explicitly to the client and the pipeline; nothing
//! reads the environment after startup.

use crate::metrics::Metric;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SERVER: &str = "https://api.github.com";
pub const DEFAULT_WORKERS: usize = 1;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Please set GITHUB_TOKEN")]
    MissingToken,

    #[error("could not read environment: {0}")]
    Env(#[from] envy::Error),
}

/// Settings read from environment variables (or a `.env` file).
#[derive(Clone, Deserialize)]
pub struct EnvConfig {
    pub github_token: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(envy::from_env()?)
    }

    /// The API token. Unset and empty are both treated as missing.
    pub fn github_token(self) -> Result<String, ConfigError> {
        self.github_token
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingToken)
    }
}

/// Fully resolved settings for one run.
#[derive(Clone)]
pub struct AppConfig {
    pub metric: Metric,
    /// Base URL of the GitHub-compatible API.
    pub server: String,
    pub organizations: Vec<String>,
    /// Number of concurrent repository workers, at least 1.
    pub workers: usize,
    /// Logins whose comments never count as a first reply.
    pub ignored_users: HashSet<String>,
    /// Deadline applied to every API request.
    pub request_timeout: Duration,
    pub github_token: String,
}

impl AppConfig {
    /// A configuration with defaults for everything but the metric, organizations and token.
    pub fn new(metric: Metric, organizations: Vec<String>, github_token: String) -> Self {
        Self {
            metric,
            server: DEFAULT_SERVER.to_string(),
            organizations,
            workers: DEFAULT_WORKERS,
            ignored_users: HashSet::new(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            github_token,
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("metric", &self.metric)
            .field("server", &self.server)
            .field("organizations", &self.organizations)
            .field("workers", &self.workers)
            .field("ignored_users", &self.ignored_users)
            .field("request_timeout", &self.request_timeout)
            .field("github_token", &"<redacted>")
            .finish()
    }
}
