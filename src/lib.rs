//! First-reply latency metrics for issues and pull requests across GitHub organizations.
//!
//! A run lists every repository of the configured organizations, fetches each
//! repository's recent issues on a pool of workers, resolves the first human
//! reply on every issue, and aggregates the elapsed times into mean, median
//! and 95th-percentile statistics.

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod github;
pub mod issue;
pub mod metrics;
pub mod organization;
pub mod pipeline;
pub mod report;
pub mod repository;
pub mod response_time;
pub mod types;

#[cfg(test)]
mod fakes;

use anyhow::Context;
use clock::Clock;
use config::AppConfig;
use github::ApiClient;
use metrics::{Aggregator, Summary};
use pipeline::WorkerContext;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

/// Runs the pipeline to completion, writing one line per issue and a summary block to `out`.
///
/// Fails on the first error any stage reports; the summary is only written
/// when every result succeeded.
pub async fn run<W: Write>(
    config: &AppConfig,
    client: Arc<dyn ApiClient>,
    clock: Arc<dyn Clock>,
    out: &mut W,
) -> anyhow::Result<Summary> {
    let started = Instant::now();
    tracing::info!(
        orgs = ?config.organizations,
        workers = config.workers,
        metric = ?config.metric,
        "Starting run"
    );

    let ctx = WorkerContext {
        client,
        clock,
        ignored_users: Arc::new(config.ignored_users.clone()),
    };
    let mut results = pipeline::start(config.organizations.clone(), config.workers, ctx);

    let mut aggregator = Aggregator::new();
    while let Some(result) = results.recv().await {
        let time = aggregator
            .record(result)
            .context("failed to calculate response times")?;
        report::write_response(out, &time)?;
    }

    let summary = aggregator.finish().summarize(config.metric);
    report::write_summary(out, &summary)?;
    report::write_elapsed(out, started.elapsed())?;

    tracing::info!(
        count = summary.count,
        elapsed_secs = started.elapsed().as_secs_f64(),
        "Run finished"
    );

    Ok(summary)
}
