//! Backend Search Collaborator
//!
//! The document search engine lives in a separate service. The core only needs
//! one call from it, expressed by [`SearchBackend`]; [`HttpSearchBackend`] is
//! the JSON-over-HTTP transport used in production. Calls are never retried here.

use super::types::{BackendRequest, BackendResponse};
use crate::error::{QueryError, QueryResult};

use async_trait::async_trait;
use std::time::Duration;

pub const ENDPOINT_SEARCH: &str = "/search";

#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &BackendRequest) -> QueryResult<BackendResponse>;
}

pub struct HttpSearchBackend {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpSearchBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, ENDPOINT_SEARCH)
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, request: &BackendRequest) -> QueryResult<BackendResponse> {
        let response = self
            .http_client
            .post(self.endpoint())
            .json(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| QueryError::BackendUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(QueryError::BackendUnavailable(format!(
                "backend returned {}",
                response.status()
            )));
        }

        response
            .json::<BackendResponse>()
            .await
            .map_err(|e| QueryError::BackendUnavailable(e.to_string()))
    }
}
