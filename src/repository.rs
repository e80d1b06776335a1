use crate::clock::Clock;
use crate::error::RepositoryError;
use crate::github::ApiClient;
use crate::organization::PAGE_SIZE;
use crate::types::{Issue, Repository};
use chrono::{Duration, SecondsFormat};

/// Issues updated or created within this many days are considered recent.
pub const RECENT_DAYS: i64 = 30;

impl Repository {
    /// Lists issues and pull requests in any state touched within the last [`RECENT_DAYS`].
    ///
    /// Single page only, like [`Organization::repositories`](crate::types::Organization).
    pub async fn recent_issues(
        &self,
        client: &dyn ApiClient,
        clock: &dyn Clock,
    ) -> Result<Vec<Issue>, RepositoryError> {
        let since = (clock.now() - Duration::days(RECENT_DAYS))
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let per_page = PAGE_SIZE.to_string();

        let body = client
            .get(
                &format!("repos/{}/issues", self.full_name),
                &[
                    ("state", "all"),
                    ("per_page", per_page.as_str()),
                    ("since", since.as_str()),
                ],
            )
            .await
            .map_err(|source| RepositoryError::Request {
                repo: self.full_name.clone(),
                source,
            })?;

        let issues: Vec<Issue> =
            serde_json::from_slice(&body).map_err(|source| RepositoryError::Decode {
                repo: self.full_name.clone(),
                body: String::from_utf8_lossy(&body).into_owned(),
                source,
            })?;

        if issues.len() >= PAGE_SIZE {
            tracing::warn!(
                repo = %self.full_name,
                "Repository has at least {} recent issues; only the first page is measured",
                PAGE_SIZE
            );
        }

        Ok(issues)
    }
}
