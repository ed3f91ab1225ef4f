//! Ingestion Data Types

use std::time::Duration;

/// Runtime knobs for the ingestion worker pool.
#[derive(Debug, Clone)]
pub struct IngestSettings {
    /// Number of concurrent consumers. One is the normal deployment; more are
    /// safe but interleave bumps from different queries in undefined order.
    pub workers: usize,
    /// Delay before polling again after an empty or failed dequeue.
    pub backoff: Duration,
    /// Upper bound on each queue pop and index write.
    pub store_timeout: Duration,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            workers: 1,
            backoff: Duration::from_secs(1),
            store_timeout: Duration::from_millis(250),
        }
    }
}

/// Outcome of indexing one raw query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// N-grams generated from the query, duplicates included.
    pub ngrams: usize,
    /// N-grams whose count was successfully incremented.
    pub bumped: usize,
    /// N-grams whose update failed and was skipped.
    pub dropped: usize,
}
