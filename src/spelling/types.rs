//! Spelling Data Types

/// Tunables for [`super::SpellingCorrector`].
#[derive(Debug, Clone)]
pub struct CorrectorSettings {
    /// Largest Levenshtein distance a per-word replacement may have.
    pub max_edit_distance: usize,
    /// Queries shorter than this (in characters) are never corrected.
    pub min_query_len: usize,
}

impl Default for CorrectorSettings {
    fn default() -> Self {
        Self {
            max_edit_distance: 2,
            min_query_len: 3,
        }
    }
}

/// A dictionary term proposed for one input word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermSuggestion {
    pub term: String,
    /// Levenshtein distance from the input word.
    pub distance: usize,
    /// Unigram frequency of `term`.
    pub count: u64,
}

/// A full-query rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionCandidate {
    pub text: String,
    /// Levenshtein distance between the normalized query and `text`.
    pub distance: usize,
}
