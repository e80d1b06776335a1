use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A source-forge organization whose repositories are measured.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Organization {
    pub name: String,
}

impl Organization {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The `login` of an account, as nested under `owner` or `user` in API payloads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
    /// Account type, e.g. "User" or "Bot". Absent on repository owners.
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// The "owner/repo" name.
    pub full_name: String,
    pub url: String,
    pub owner: Account,
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

/// An issue or pull request. Timestamps stay as strings until the calculator parses them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub created_at: String,
    #[serde(rename = "comments")]
    pub num_comments: u64,
    pub comments_url: String,
    pub number: u64,
    pub user: Account,
}

impl Issue {
    pub fn author(&self) -> &str {
        &self.user.login
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub user: Account,
    pub created_at: String,
}

impl Comment {
    pub fn author(&self) -> &str {
        &self.user.login
    }

    pub fn is_bot(&self) -> bool {
        self.user.kind == "Bot"
    }
}

/// One observation in the sample: how long an issue waited for its first reply.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseTime {
    pub repo: String,
    pub number: u64,
    pub author: String,
    /// Empty when nobody has replied yet.
    pub reply_author: String,
    /// Whole minutes, never negative.
    pub minutes: f64,
}

pub type RepositoryResult = Result<Repository, PipelineError>;

pub type TimeResult = Result<ResponseTime, PipelineError>;
