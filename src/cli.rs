use crate::config::{AppConfig, DEFAULT_SERVER, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};
use crate::metrics::Metric;
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    name = "gloss",
    version,
    about = "Measures how quickly issues and pull requests get their first human reply"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report first reply times in minutes.
    ResponseTimes(MetricArgs),
    /// Report first reply times in days.
    FirstContactTimes(MetricArgs),
}

#[derive(Debug, Args)]
pub struct MetricArgs {
    /// Server from which to collect response time data.
    #[arg(long, default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Organization to collect response time data from. Can be passed multiple times.
    #[arg(long = "org", value_name = "NAME", required = true)]
    pub orgs: Vec<String>,

    /// Number of repositories processed concurrently.
    #[arg(long, default_value_t = DEFAULT_WORKERS as u16, value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: u16,

    /// Login whose comments are not counted as replies. Can be passed multiple times.
    #[arg(long = "ignore-user", value_name = "LOGIN")]
    pub ignored_users: Vec<String>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
}

impl Cli {
    pub fn into_config(self, github_token: String) -> AppConfig {
        let (metric, args) = match self.command {
            Command::ResponseTimes(args) => (Metric::ResponseTimes, args),
            Command::FirstContactTimes(args) => (Metric::FirstContactTimes, args),
        };

        AppConfig {
            metric,
            server: args.server,
            organizations: args.orgs,
            workers: usize::from(args.workers),
            ignored_users: args.ignored_users.into_iter().collect(),
            request_timeout: Duration::from_secs(args.timeout),
            github_token,
        }
    }
}
