//! Prefix Suggestion Engine
//!
//! Read-only path over the ranked index: fetch every n-gram starting with the
//! typed prefix (capped), score them in one batch, and return the most popular.
//! Equal scores are ordered alphabetically so repeated calls are stable.

use super::types::{SuggestSettings, SuggestionCandidate};
use crate::error::QueryResult;
use crate::storage::{RankedIndex, bounded};

use std::sync::Arc;

#[derive(Clone)]
pub struct PrefixSuggester {
    index: Arc<dyn RankedIndex>,
    settings: SuggestSettings,
}

impl PrefixSuggester {
    pub fn new(index: Arc<dyn RankedIndex>, settings: SuggestSettings) -> Self {
        Self { index, settings }
    }

    pub fn settings(&self) -> &SuggestSettings {
        &self.settings
    }

    /// Top `limit` n-grams for `prefix`, most popular first.
    pub async fn suggest(
        &self,
        prefix: &str,
        limit: usize,
        candidate_cap: usize,
    ) -> QueryResult<Vec<String>> {
        let ranked = self.ranked(prefix, limit, candidate_cap).await?;
        Ok(ranked.into_iter().map(|c| c.ngram).collect())
    }

    /// Same as [`suggest`](Self::suggest) with scores attached.
    pub async fn ranked(
        &self,
        prefix: &str,
        limit: usize,
        candidate_cap: usize,
    ) -> QueryResult<Vec<SuggestionCandidate>> {
        let prefix = prefix.to_lowercase();
        if prefix.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let timeout = self.settings.store_timeout;
        let ngrams = bounded(timeout, self.index.prefix_candidates(&prefix, candidate_cap)).await?;
        if ngrams.is_empty() {
            return Ok(Vec::new());
        }

        let scores = bounded(timeout, self.index.scores_of(&ngrams)).await?;
        let mut candidates: Vec<SuggestionCandidate> = ngrams
            .into_iter()
            .enumerate()
            .map(|(i, ngram)| SuggestionCandidate {
                ngram,
                score: scores.get(i).copied().unwrap_or(0),
            })
            .collect();

        candidates.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.ngram.cmp(&b.ngram)));
        candidates.truncate(limit);
        Ok(candidates)
    }

    /// Suggestions with the configured defaults. Failures degrade to an empty list.
    pub async fn suggest_or_empty(&self, prefix: &str, limit: Option<usize>) -> Vec<String> {
        let limit = limit.unwrap_or(self.settings.limit);
        match self.suggest(prefix, limit, self.settings.candidate_cap).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                tracing::warn!("Suggestions for {:?} unavailable: {}", prefix, e);
                Vec::new()
            }
        }
    }
}
