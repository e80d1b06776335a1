//! First-reply resolution.
//!
//! [`CommentGetter`] is the seam between an issue and wherever its comments
//! come from: [`RemoteIssue`] asks the API, [`FixedIssue`] replays a known list.
//! Both share the same filtering in [`CommentGetter::first_reply`].

use crate::error::IssueError;
use crate::github::ApiClient;
use crate::types::{Comment, Issue};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

#[async_trait]
pub trait CommentGetter: Send + Sync {
    fn issue(&self) -> &Issue;

    /// All comments on the issue, in the order the source returns them.
    async fn comments(&self) -> Result<Vec<Comment>, IssueError>;

    /// The first comment from someone other than the author, an ignored user, or a bot.
    ///
    /// Returns `None` when no comment qualifies. Issues without comments
    /// never reach [`comments`](Self::comments). Comments are scanned in the
    /// order received and are not re-sorted.
    async fn first_reply(
        &self,
        ignored_users: &HashSet<String>,
    ) -> Result<Option<Comment>, IssueError> {
        let issue = self.issue();
        if issue.num_comments == 0 {
            return Ok(None);
        }

        let comments = self.comments().await?;
        Ok(comments
            .into_iter()
            .find(|comment| is_reply(issue, comment, ignored_users)))
    }
}

fn is_reply(issue: &Issue, comment: &Comment, ignored_users: &HashSet<String>) -> bool {
    comment.author() != issue.author()
        && !ignored_users.contains(comment.author())
        && !comment.is_bot()
}

/// An issue whose comments are fetched from its `comments_url`.
pub struct RemoteIssue {
    issue: Issue,
    client: Arc<dyn ApiClient>,
}

impl RemoteIssue {
    pub fn new(issue: Issue, client: Arc<dyn ApiClient>) -> Self {
        Self { issue, client }
    }
}

#[async_trait]
impl CommentGetter for RemoteIssue {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    async fn comments(&self) -> Result<Vec<Comment>, IssueError> {
        let comments_url =
            Url::parse(&self.issue.comments_url).map_err(|source| IssueError::CommentsUrl {
                url: self.issue.comments_url.clone(),
                source,
            })?;

        // The path alone, so the request goes to the configured server.
        let body = self
            .client
            .get(comments_url.path(), &[])
            .await
            .map_err(IssueError::Request)?;

        serde_json::from_slice(&body).map_err(|source| IssueError::Decode {
            body: String::from_utf8_lossy(&body).into_owned(),
            source,
        })
    }
}

/// An issue with a predetermined comment list, for deterministic runs without a server.
pub struct FixedIssue {
    issue: Issue,
    comments: Vec<Comment>,
    fetches: AtomicUsize,
}

impl FixedIssue {
    pub fn new(issue: Issue, comments: Vec<Comment>) -> Self {
        Self {
            issue,
            comments,
            fetches: AtomicUsize::new(0),
        }
    }

    /// How many times the comment list has been requested.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommentGetter for FixedIssue {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    async fn comments(&self) -> Result<Vec<Comment>, IssueError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.comments.clone())
    }
}
