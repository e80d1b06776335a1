use crate::error::OrganizationError;
use crate::github::ApiClient;
use crate::types::{Organization, Repository};

/// Maximum page size the API accepts; only the first page is ever requested.
pub const PAGE_SIZE: usize = 100;

impl Organization {
    /// Lists the organization's repositories.
    ///
    /// Only the first page of up to [`PAGE_SIZE`] repositories is fetched, so
    /// larger organizations are partially covered.
    pub async fn repositories(
        &self,
        client: &dyn ApiClient,
    ) -> Result<Vec<Repository>, OrganizationError> {
        let per_page = PAGE_SIZE.to_string();
        let body = client
            .get(&format!("orgs/{}/repos", self.name), &[("per_page", per_page.as_str())])
            .await
            .map_err(|source| OrganizationError::Request {
                org: self.name.clone(),
                source,
            })?;

        let repos: Vec<Repository> =
            serde_json::from_slice(&body).map_err(|source| OrganizationError::Decode {
                org: self.name.clone(),
                body: String::from_utf8_lossy(&body).into_owned(),
                source,
            })?;

        if repos.len() >= PAGE_SIZE {
            tracing::warn!(
                org = %self.name,
                "Organization has at least {} repositories; only the first page is measured",
                PAGE_SIZE
            );
        }

        Ok(repos)
    }
}
