//! Ingestion Pipeline Module
//!
//! Turns the stream of raw user queries into popularity counts.
//!
//! ## Workflow
//! 1. **Enqueue**: The request boundary pushes every searched query onto the `QueryQueue` (fire-and-forget).
//! 2. **Dequeue**: An `IngestionWorker` polls the queue without blocking.
//! 3. **Expand**: The query is tokenized and expanded into unigrams, bigrams and trigrams.
//! 4. **Bump**: Each n-gram occurrence increments its count in the `RankedIndex`.

pub mod types;
pub mod worker;

pub use types::{IngestSettings, IngestStats};
pub use worker::IngestionWorker;
