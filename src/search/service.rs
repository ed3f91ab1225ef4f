//! Request Orchestrator
//!
//! Glue between the HTTP boundary and the core. A search request:
//! 1. hands the raw query to the ingestion queue without waiting;
//! 2. fetches ranked documents from the backend;
//! 3. asks the spelling corrector for a rewrite;
//! 4. merges everything into one response.
//!
//! Only a backend failure fails the request. Queue, index and correction
//! problems are logged and degrade to "no suggestion".

use super::backend::SearchBackend;
use super::suggest::PrefixSuggester;
use super::types::{BackendRequest, SearchRequest, SearchResponse};
use crate::error::QueryResult;
use crate::spelling::SpellingCorrector;
use crate::storage::{QueryQueue, bounded};

use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct QueryService {
    queue: Arc<dyn QueryQueue>,
    suggester: PrefixSuggester,
    corrector: SpellingCorrector,
    backend: Arc<dyn SearchBackend>,
    store_timeout: Duration,
}

impl QueryService {
    pub fn new(
        queue: Arc<dyn QueryQueue>,
        suggester: PrefixSuggester,
        corrector: SpellingCorrector,
        backend: Arc<dyn SearchBackend>,
    ) -> Self {
        let store_timeout = suggester.settings().store_timeout;
        Self {
            queue,
            suggester,
            corrector,
            backend,
            store_timeout,
        }
    }

    /// Fire-and-forget hand-off to the ingestion queue. Returns before the
    /// enqueue completes; failures are only logged.
    pub fn enqueue_for_indexing(&self, query: &str) {
        if query.trim().is_empty() {
            return;
        }

        let queue = self.queue.clone();
        let query = query.to_string();
        let timeout = self.store_timeout;
        tokio::spawn(async move {
            if let Err(e) = bounded(timeout, queue.enqueue(query.clone())).await {
                tracing::warn!("Failed to enqueue {:?} for indexing: {}", query, e);
            }
        });
    }

    pub async fn suggest_prefix(&self, prefix: &str, limit: Option<usize>) -> Vec<String> {
        self.suggester.suggest_or_empty(prefix, limit).await
    }

    pub fn correct_query(&self, query: &str) -> Option<String> {
        self.corrector.correct(query)
    }

    pub async fn search(&self, request: SearchRequest) -> QueryResult<SearchResponse> {
        let started = Instant::now();

        self.enqueue_for_indexing(&request.query);

        let backend_request = BackendRequest {
            query: request.query.clone(),
            page: request.page,
            count: request.count,
        };
        let response = self.backend.search(&backend_request).await?;

        let suggestion = self.correct_query(&request.query);
        let total = response.total.unwrap_or(response.results.len() as u64);

        tracing::info!(
            "Search {:?}: {} results, suggestion {:?}",
            request.query,
            response.results.len(),
            suggestion
        );

        Ok(SearchResponse {
            results: response.results,
            total,
            suggestion,
            query_time: started.elapsed().as_secs_f64() * 1000.0,
        })
    }
}
