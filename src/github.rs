use crate::error::ClientError;
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;
use url::Url;

/// Authenticated, read-only access to a GitHub-compatible REST API.
///
/// Implementations must be safe to share between workers; every call is
/// independent and carries no session state.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Issues a GET for `path` with the given query parameters and returns the raw body.
    ///
    /// Relative paths are resolved under the server URL's own path, absolute
    /// paths replace it.
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<u8>, ClientError>;
}

pub struct GitHubClient {
    server_url: Url,
    http: reqwest::Client,
}

impl GitHubClient {
    /// Builds a client for `server_url` that authenticates every request with `token`.
    ///
    /// `timeout` bounds each request from connect to end of body.
    pub fn new(server_url: &str, token: &str, timeout: Duration) -> Result<Self, ClientError> {
        let server_url = Url::parse(server_url)?;
        if server_url.cannot_be_a_base() {
            return Err(ClientError::NotABaseUrl(server_url.to_string()));
        }

        let mut auth = HeaderValue::from_str(&format!("token {}", token))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { server_url, http })
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.server_url.clone();

        if path.starts_with('/') {
            url.set_path(path);
        } else {
            let base = url.path().trim_end_matches('/').to_string();
            url.set_path(&format!("{}/{}", base, path));
        }

        url.set_query(None);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        url
    }
}

#[async_trait]
impl ApiClient for GitHubClient {
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<u8>, ClientError> {
        let url = self.endpoint(path, params);
        tracing::debug!(%url, "GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }
}
