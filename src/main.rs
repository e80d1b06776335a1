use clap::Parser;
use gloss::cli::Cli;
use gloss::clock::SystemClock;
use gloss::config::EnvConfig;
use gloss::github::GitHubClient;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout only carries the report.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gloss=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    // Checked before any client exists, so a missing token never reaches the network.
    let github_token = EnvConfig::from_env()?.github_token()?;
    let config = cli.into_config(github_token);
    tracing::debug!(?config, "Loaded configuration");

    let client = GitHubClient::new(&config.server, &config.github_token, config.request_timeout)?;

    let mut stdout = std::io::stdout();
    gloss::run(&config, Arc::new(client), Arc::new(SystemClock), &mut stdout).await?;

    Ok(())
}
