//! The concurrent fetch-compute stage of a run.
//!
//! ```text
//! organizations -> producer -> shared queue -> worker 0..N -> merge -> TimeResult stream
//! ```
//!
//! Every stage owns its sending half and closes its stream by dropping it.
//! Errors travel downstream as values; a stage stops early only when the
//! stage after it has hung up.

use crate::clock::Clock;
use crate::error::PipelineError;
use crate::github::ApiClient;
use crate::issue::RemoteIssue;
use crate::response_time::first_response_time;
use crate::types::{Issue, Organization, Repository, RepositoryResult, TimeResult};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

const CHANNEL_CAPACITY: usize = 32;

/// The repository stream, shared by all workers so each item goes to exactly one of them.
pub type RepositoryQueue = Arc<Mutex<mpsc::Receiver<RepositoryResult>>>;

/// Everything a worker needs to turn a repository into response times.
#[derive(Clone)]
pub struct WorkerContext {
    pub client: Arc<dyn ApiClient>,
    pub clock: Arc<dyn Clock>,
    pub ignored_users: Arc<HashSet<String>>,
}

/// Wires producer, workers and merger together and returns the merged result stream.
pub fn start(
    organizations: Vec<String>,
    workers: usize,
    ctx: WorkerContext,
) -> mpsc::Receiver<TimeResult> {
    let repos = produce_repositories(organizations, ctx.client.clone());
    let queue: RepositoryQueue = Arc::new(Mutex::new(repos));

    tracing::info!("Running with {} workers", workers.max(1));
    let outputs = (0..workers.max(1))
        .map(|id| spawn_worker(id, queue.clone(), ctx.clone()))
        .collect();

    merge(outputs)
}

/// Streams the repositories of every organization in turn.
///
/// A failure to list one organization becomes a single error item and the
/// next organization is still listed.
pub fn produce_repositories(
    organizations: Vec<String>,
    client: Arc<dyn ApiClient>,
) -> mpsc::Receiver<RepositoryResult> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

    tokio::spawn(async move {
        for name in organizations {
            let org = Organization::new(name);

            match org.repositories(client.as_ref()).await {
                Ok(repos) => {
                    tracing::info!(org = %org, repos = repos.len(), "Listed organization repositories");
                    for repo in repos {
                        if tx.send(Ok(repo)).await.is_err() {
                            return;
                        }
                    }
                }
                Err(e) => {
                    tracing::error!(org = %org, "Failed to list repositories: {}", e);
                    if tx.send(Err(e.into())).await.is_err() {
                        return;
                    }
                }
            }
        }
    });

    rx
}

/// Starts a worker that drains `queue` until it is empty and closed.
///
/// Repository errors pulled from the queue are forwarded as-is and the
/// worker moves on to the next item.
pub fn spawn_worker(
    id: usize,
    queue: RepositoryQueue,
    ctx: WorkerContext,
) -> mpsc::Receiver<TimeResult> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

    tokio::spawn(async move {
        tracing::debug!(worker = id, "Worker started");

        loop {
            let next = queue.lock().await.recv().await;
            let Some(item) = next else {
                break;
            };

            let downstream_open = match item {
                Ok(repo) => process_repository(&repo, &ctx, &tx).await,
                Err(e) => tx.send(Err(e)).await.is_ok(),
            };

            if !downstream_open {
                tracing::debug!(worker = id, "Output closed, stopping early");
                break;
            }
        }

        tracing::debug!(worker = id, "Worker finished");
    });

    rx
}

/// Issue authors containing "bot" are excluded from the sample entirely.
fn is_bot_author(issue: &Issue) -> bool {
    issue.author().contains("bot")
}

/// Emits one result per non-bot issue. Returns false once the receiver is gone.
async fn process_repository(
    repo: &Repository,
    ctx: &WorkerContext,
    tx: &mpsc::Sender<TimeResult>,
) -> bool {
    let issues = match repo
        .recent_issues(ctx.client.as_ref(), ctx.clock.as_ref())
        .await
    {
        Ok(issues) => issues,
        Err(e) => {
            tracing::error!(repo = %repo, "Failed to fetch recent issues: {}", e);
            return tx.send(Err(e.into())).await.is_ok();
        }
    };

    tracing::info!(repo = %repo, issues = issues.len(), "Fetched recent issues");

    for issue in issues {
        if is_bot_author(&issue) {
            tracing::debug!(repo = %repo, number = issue.number, author = issue.author(), "Skipping bot-authored issue");
            continue;
        }

        let number = issue.number;
        let remote = RemoteIssue::new(issue, ctx.client.clone());
        let result = first_response_time(
            &remote,
            &repo.full_name,
            ctx.clock.as_ref(),
            &ctx.ignored_users,
        )
        .await
        .map_err(|source| PipelineError::ResponseTime {
            repo: repo.full_name.clone(),
            number,
            source,
        });

        if tx.send(result).await.is_err() {
            return false;
        }
    }

    true
}

/// Fans the worker streams into one.
///
/// The merged stream closes only after every forwarder has finished, which
/// the coordinating task tracks by counting completions.
pub fn merge(inputs: Vec<mpsc::Receiver<TimeResult>>) -> mpsc::Receiver<TimeResult> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let total = inputs.len();

    let mut forwarders = JoinSet::new();
    for mut input in inputs {
        let tx = tx.clone();
        forwarders.spawn(async move {
            while let Some(result) = input.recv().await {
                if tx.send(result).await.is_err() {
                    break;
                }
            }
        });
    }

    tokio::spawn(async move {
        let mut finished = 0;
        while finished < total {
            match forwarders.join_next().await {
                Some(Ok(())) => {}
                Some(Err(e)) => tracing::error!("Merge forwarder failed: {}", e),
                None => break,
            }
            finished += 1;
        }
        tracing::debug!(finished, total, "All workers drained");
        drop(tx);
    });

    rx
}
