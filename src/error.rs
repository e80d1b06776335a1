//! Error types for every stage of the response-time pipeline.
//!
//! Errors below the application edge travel through the pipeline as values,
//! so each one carries enough context (organization, repository, issue) to be
//! understood on its own once it reaches the aggregator.

use thiserror::Error;

/// Failures raised by an [`ApiClient`](crate::github::ApiClient).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not parse server URL: {0}")]
    InvalidServerUrl(#[from] url::ParseError),

    #[error("server URL {0} cannot carry an API path; include a scheme such as https://")]
    NotABaseUrl(String),

    #[error("invalid GITHUB_TOKEN header value")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error("client couldn't make HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Failures listing an organization's repositories.
#[derive(Debug, Error)]
pub enum OrganizationError {
    #[error("getting org repos for {org}: {source}")]
    Request {
        org: String,
        #[source]
        source: ClientError,
    },

    #[error("getting org repos for {org}: could not unmarshal response: '{body}': {source}")]
    Decode {
        org: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures listing a repository's recent issues.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("getting recent issues for {repo}: {source}")]
    Request {
        repo: String,
        #[source]
        source: ClientError,
    },

    #[error("getting recent issues for {repo}: could not unmarshal JSON '{body}' : {source}")]
    Decode {
        repo: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures resolving the first reply on an issue.
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("parsing comments url: {source}")]
    CommentsUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("getting issue comments: {0}")]
    Request(#[source] ClientError),

    #[error("getting issue comments: could not unmarshal JSON '{body}' : {source}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures turning an issue and its first reply into an elapsed time.
#[derive(Debug, Error)]
pub enum ResponseTimeError {
    #[error("could not get first reply: {0}")]
    FirstReply(#[from] IssueError),

    #[error("could not parse first reply time: {0}")]
    ReplyTime(#[source] chrono::ParseError),

    #[error("could not parse issue creation time: {0}")]
    IssueTime(#[source] chrono::ParseError),
}

/// The error half of the tagged results flowing between pipeline stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to get repositories: {0}")]
    Repositories(#[from] OrganizationError),

    #[error("getting repo response times: {0}")]
    Issues(#[from] RepositoryError),

    #[error("getting repo response times for {repo} #{number}: {source}")]
    ResponseTime {
        repo: String,
        number: u64,
        #[source]
        source: ResponseTimeError,
    },
}

/// Raised by the aggregator on the first error-tagged result it observes.
#[derive(Debug, Error)]
#[error("{source} (after {collected} successful results)")]
pub struct AggregateError {
    /// Successful results already recorded before the failure arrived.
    pub collected: usize,
    #[source]
    pub source: PipelineError,
}
