//! In-Memory Ranked Index
//!
//! Process-local implementation of [`RankedIndex`]. Counts live in a `DashMap`
//! so concurrent bumps on different n-grams never contend; the lexical set is a
//! `BTreeSet` behind a read-mostly lock.

use super::index::RankedIndex;
use super::snapshot::IndexSnapshot;
use crate::error::QueryResult;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::ops::Bound;

#[derive(Default)]
pub struct MemoryIndex {
    scores: DashMap<String, u64>,
    lexical: RwLock<BTreeSet<String>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an index from a snapshot. Scored n-grams missing from the
    /// snapshot's lexical set are added back so prefix scans can find them.
    pub fn from_snapshot(snapshot: IndexSnapshot) -> Self {
        let mut lexical: BTreeSet<String> = snapshot.lexical.into_iter().collect();
        let scores = DashMap::with_capacity(snapshot.scores.len());
        for (ngram, count) in snapshot.scores {
            lexical.insert(ngram.clone());
            scores.insert(ngram, count);
        }

        Self {
            scores,
            lexical: RwLock::new(lexical),
        }
    }

    /// Point-in-time copy of both structures. Not atomic with concurrent bumps.
    pub fn snapshot(&self) -> IndexSnapshot {
        let scores = self
            .scores
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        let lexical = self.lexical.read().iter().cloned().collect();

        IndexSnapshot { scores, lexical }
    }

    /// Number of distinct n-grams in the lexical set.
    pub fn len(&self) -> usize {
        self.lexical.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexical.read().is_empty()
    }

    /// Local, non-async count lookup.
    pub fn score(&self, ngram: &str) -> u64 {
        self.scores.get(ngram).map(|count| *count).unwrap_or(0)
    }
}

#[async_trait]
impl RankedIndex for MemoryIndex {
    async fn bump(&self, ngram: &str) -> QueryResult<()> {
        *self.scores.entry(ngram.to_string()).or_insert(0) += 1;

        // Most bumps hit an n-gram that is already known; only take the write lock for new ones.
        if !self.lexical.read().contains(ngram) {
            self.lexical.write().insert(ngram.to_string());
        }
        Ok(())
    }

    async fn prefix_candidates(&self, prefix: &str, cap: usize) -> QueryResult<Vec<String>> {
        if prefix.is_empty() || cap == 0 {
            return Ok(Vec::new());
        }

        let lexical = self.lexical.read();
        let candidates = lexical
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|ngram| ngram.starts_with(prefix))
            .take(cap)
            .cloned()
            .collect();
        Ok(candidates)
    }

    async fn scores_of(&self, ngrams: &[String]) -> QueryResult<Vec<u64>> {
        Ok(ngrams.iter().map(|ngram| self.score(ngram)).collect())
    }

    async fn reset(&self) -> QueryResult<()> {
        self.scores.clear();
        self.lexical.write().clear();
        tracing::info!("Ranked index reset");
        Ok(())
    }
}
