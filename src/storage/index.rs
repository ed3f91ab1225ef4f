//! Ranked Index Contract
//!
//! The ranked index pairs two structures per n-gram:
//! - a **frequency map** (`n-gram -> count`) that only ever grows by one per observed occurrence;
//! - a **lexical set** of every n-gram seen, kept in byte order so prefix range scans are cheap.
//!
//! The two are written by separate operations. A fault between them can leave an
//! n-gram in one structure but not the other, so readers treat a missing score as 0.

use crate::error::QueryResult;
use async_trait::async_trait;

#[async_trait]
pub trait RankedIndex: Send + Sync {
    /// Adds 1 to the n-gram's count (creating it at 1) and makes sure it is in the lexical set.
    async fn bump(&self, ngram: &str) -> QueryResult<()>;

    /// Up to `cap` n-grams that start with `prefix`, ascending lexicographic order.
    /// An empty prefix yields no candidates.
    async fn prefix_candidates(&self, prefix: &str, cap: usize) -> QueryResult<Vec<String>>;

    /// Current counts for `ngrams`, positionally aligned. Unknown n-grams resolve to 0.
    async fn scores_of(&self, ngrams: &[String]) -> QueryResult<Vec<u64>>;

    /// Administrative wipe of both structures.
    async fn reset(&self) -> QueryResult<()>;
}
