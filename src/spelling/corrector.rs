//! Per-Word Spelling Correction
//!
//! Each query word is matched independently against the unigram table and
//! replaced by its closest term within the edit-distance threshold. Words
//! without a close match, and words that are already dictionary terms, are
//! kept as typed.
//!
//! Among equally close terms, the one forming the most frequent bigram with the
//! previous (already corrected) word wins; unigram frequency breaks the
//! remaining ties.

use super::dictionary::Dictionary;
use super::types::{CorrectionCandidate, CorrectorSettings, TermSuggestion};
use crate::text::tokenize;

use std::sync::Arc;

#[derive(Clone)]
pub struct SpellingCorrector {
    dictionary: Arc<Dictionary>,
    settings: CorrectorSettings,
}

impl SpellingCorrector {
    pub fn new(dictionary: Arc<Dictionary>, settings: CorrectorSettings) -> Self {
        Self {
            dictionary,
            settings,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Proposed rewrite of `query`, or `None` when nothing should be suggested.
    pub fn correct(&self, query: &str) -> Option<String> {
        self.correct_with_distance(query).map(|candidate| candidate.text)
    }

    pub fn correct_with_distance(&self, query: &str) -> Option<CorrectionCandidate> {
        if self.is_suppressed(query) {
            return None;
        }

        let tokens = tokenize(query);
        if tokens.is_empty() {
            return None;
        }

        let mut corrected: Vec<String> = Vec::with_capacity(tokens.len());
        for token in &tokens {
            let previous = corrected.last().map(String::as_str);
            let word = self
                .best_term(token, previous)
                .unwrap_or_else(|| token.clone());
            corrected.push(word);
        }

        let normalized = tokens.join(" ");
        let text = corrected.join(" ");
        if text == normalized {
            return None;
        }

        let distance = strsim::levenshtein(&normalized, &text);
        tracing::debug!("Correction {:?} -> {:?} (distance {})", query, text, distance);
        Some(CorrectionCandidate { text, distance })
    }

    /// Inputs that are too short or look like URLs/paths are left alone.
    fn is_suppressed(&self, query: &str) -> bool {
        query.chars().count() < self.settings.min_query_len
            || query.to_lowercase().contains("http")
            || query.contains('/')
    }

    fn best_term(&self, token: &str, previous: Option<&str>) -> Option<String> {
        if self.dictionary.contains(token) {
            return None;
        }
        let reach = self.dictionary.max_term_len() + self.settings.max_edit_distance;
        if token.chars().count() > reach {
            return None;
        }

        let suggestions = self
            .dictionary
            .lookup(token, self.settings.max_edit_distance);
        let closest = suggestions.first()?.distance;

        suggestions
            .iter()
            .take_while(|s| s.distance == closest)
            .max_by(|a, b| self.context_order(a, b, previous))
            .map(|s| s.term.clone())
    }

    /// Ordering among equally distant terms; `max_by` picks the greatest.
    fn context_order(
        &self,
        a: &TermSuggestion,
        b: &TermSuggestion,
        previous: Option<&str>,
    ) -> std::cmp::Ordering {
        let bigram = |s: &TermSuggestion| {
            previous
                .map(|prev| self.dictionary.bigram_count(prev, &s.term))
                .unwrap_or(0)
        };

        bigram(a)
            .cmp(&bigram(b))
            .then_with(|| a.count.cmp(&b.count))
            .then_with(|| b.term.cmp(&a.term))
    }
}
