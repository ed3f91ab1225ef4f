//! Ingestion Worker Pool
//!
//! Background consumers that drain the raw query queue into the ranked index.
//!
//! ## Lifecycle
//! Each worker alternates between two states:
//! - **Idle**: the queue was empty (or the pop failed). Sleep for the configured backoff, then poll again.
//! - **Processing**: one raw query was popped. Tokenize it, expand it into n-grams and bump every n-gram.
//!
//! Indexing is at-most-once per n-gram occurrence: a failed bump is logged and
//! skipped, and the worker moves on to the next n-gram. Workers only stop when
//! the shutdown token is cancelled.

use super::types::{IngestSettings, IngestStats};
use crate::error::QueryResult;
use crate::storage::{QueryQueue, RankedIndex, bounded};
use crate::text::{generate_ngrams, tokenize};

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct IngestionWorker {
    queue: Arc<dyn QueryQueue>,
    index: Arc<dyn RankedIndex>,
    settings: IngestSettings,
}

impl IngestionWorker {
    pub fn new(
        queue: Arc<dyn QueryQueue>,
        index: Arc<dyn RankedIndex>,
        settings: IngestSettings,
    ) -> Arc<Self> {
        Arc::new(Self {
            queue,
            index,
            settings,
        })
    }

    /// Spawns the configured number of workers and returns immediately.
    pub fn start(self: Arc<Self>, shutdown: CancellationToken) -> Vec<JoinHandle<()>> {
        let worker_count = self.settings.workers.max(1);
        tracing::info!("Starting {} ingestion workers", worker_count);

        (0..worker_count)
            .map(|worker_id| {
                let worker = self.clone();
                let shutdown = shutdown.clone();
                tokio::spawn(async move {
                    worker.worker_loop(worker_id, shutdown).await;
                })
            })
            .collect()
    }

    async fn worker_loop(&self, worker_id: usize, shutdown: CancellationToken) {
        tracing::info!("Ingestion worker {} started", worker_id);

        while !shutdown.is_cancelled() {
            match self.dequeue().await {
                Ok(Some(raw)) => {
                    let stats = self.process_query(&raw).await;
                    tracing::debug!(
                        "Worker {} indexed {:?}: {} n-grams, {} dropped",
                        worker_id,
                        raw,
                        stats.ngrams,
                        stats.dropped
                    );
                    continue;
                }
                Ok(None) => {
                    tracing::trace!("Worker {} found the queue empty", worker_id);
                }
                Err(e) => {
                    tracing::warn!("Worker {} failed to dequeue: {}", worker_id, e);
                }
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.settings.backoff) => {}
            }
        }

        tracing::info!("Ingestion worker {} stopped", worker_id);
    }

    async fn dequeue(&self) -> QueryResult<Option<String>> {
        bounded(self.settings.store_timeout, self.queue.try_dequeue()).await
    }

    /// Indexes a single raw query. Never fails: storage errors are counted in
    /// [`IngestStats::dropped`] and logged.
    pub async fn process_query(&self, raw: &str) -> IngestStats {
        let ngrams = generate_ngrams(&tokenize(raw));
        let mut stats = IngestStats {
            ngrams: ngrams.len(),
            ..IngestStats::default()
        };

        for ngram in &ngrams {
            match bounded(self.settings.store_timeout, self.index.bump(ngram)).await {
                Ok(()) => stats.bumped += 1,
                Err(e) => {
                    stats.dropped += 1;
                    tracing::error!("Dropped update for n-gram {:?}: {}", ngram, e);
                }
            }
        }

        stats
    }

    /// Processes queued queries until the queue reports empty. Returns how many
    /// queries were indexed.
    pub async fn drain(&self) -> QueryResult<usize> {
        let mut processed = 0;
        while let Some(raw) = self.dequeue().await? {
            self.process_query(&raw).await;
            processed += 1;
        }
        Ok(processed)
    }
}
