//! In-memory stand-in for the GitHub API used by unit tests.

use crate::error::ClientError;
use crate::github::ApiClient;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// A recorded `ApiClient::get` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub path: String,
    pub params: Vec<(String, String)>,
}

enum Canned {
    Body(String),
    Failure(u16, String),
}

/// Serves canned bodies by path and records every request it receives.
#[derive(Default)]
pub struct FakeClient {
    responses: Mutex<HashMap<String, Canned>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, path: &str, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), Canned::Body(body.to_string()));
        self
    }

    pub fn fail(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), Canned::Failure(status, body.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiClient for FakeClient {
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<u8>, ClientError> {
        self.calls.lock().unwrap().push(Call {
            path: path.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        match self.responses.lock().unwrap().get(path) {
            Some(Canned::Body(body)) => Ok(body.clone().into_bytes()),
            Some(Canned::Failure(status, body)) => Err(ClientError::Status {
                status: *status,
                body: body.clone(),
            }),
            None => Err(ClientError::Status {
                status: 404,
                body: format!("unknown path: {}", path),
            }),
        }
    }
}
