//! Raw Query Queue
//!
//! FIFO hand-off between the request boundary (producer) and the ingestion
//! workers (consumers). Dequeue never blocks: an empty queue returns `None`
//! and the caller decides how long to back off.

use crate::error::QueryResult;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

#[async_trait]
pub trait QueryQueue: Send + Sync {
    /// Appends a raw query at the tail.
    async fn enqueue(&self, query: String) -> QueryResult<()>;

    /// Pops the head of the queue, or `None` when it is empty.
    async fn try_dequeue(&self) -> QueryResult<Option<String>>;

    /// Drops every pending query.
    async fn clear(&self) -> QueryResult<()>;
}

#[derive(Default)]
pub struct MemoryQueue {
    items: Mutex<VecDeque<String>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

#[async_trait]
impl QueryQueue for MemoryQueue {
    async fn enqueue(&self, query: String) -> QueryResult<()> {
        self.items.lock().push_back(query);
        Ok(())
    }

    async fn try_dequeue(&self) -> QueryResult<Option<String>> {
        Ok(self.items.lock().pop_front())
    }

    async fn clear(&self) -> QueryResult<()> {
        self.items.lock().clear();
        Ok(())
    }
}
