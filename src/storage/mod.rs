//! Storage Module
//!
//! Shared state between the ingestion workers and the read path.
//!
//! ## Core Concepts
//! - **Ranked Index**: n-gram popularity counts plus an ordered key set for prefix scans.
//! - **Query Queue**: FIFO of raw queries waiting to be indexed.
//! - **Snapshots**: Atomic JSON persistence so counts survive restarts.
//!
//! Both stores are injected as trait objects (`Arc<dyn RankedIndex>`,
//! `Arc<dyn QueryQueue>`); each implementation is responsible for its own
//! internal synchronisation.

pub mod index;
pub mod memory;
pub mod queue;
pub mod snapshot;

pub use index::RankedIndex;
pub use memory::MemoryIndex;
pub use queue::{MemoryQueue, QueryQueue};

use crate::error::QueryResult;
use std::future::Future;
use std::time::Duration;

/// Runs a store round-trip under `limit`. An expired timer becomes `StorageUnavailable`.
pub async fn bounded<T, F>(limit: Duration, op: F) -> QueryResult<T>
where
    F: Future<Output = QueryResult<T>>,
{
    tokio::time::timeout(limit, op).await?
}
