use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_COUNT: u32 = 10;

/// Runtime knobs for prefix suggestions.
#[derive(Debug, Clone)]
pub struct SuggestSettings {
    /// Suggestions returned when the caller gives no limit.
    pub limit: usize,
    /// Maximum prefix matches fetched and scored per request.
    pub candidate_cap: usize,
    /// Upper bound on each index round-trip.
    pub store_timeout: Duration,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            limit: 10,
            candidate_cap: 200,
            store_timeout: Duration::from_millis(250),
        }
    }
}

/// An n-gram paired with its popularity count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionCandidate {
    pub ngram: String,
    pub score: u64,
}

// ---------------------------------------------------------------
// Client-facing API
// ---------------------------------------------------------------

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_count() -> u32 {
    DEFAULT_COUNT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_count")]
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub total: u64,
    /// Spelling rewrite of the query, if one was found.
    pub suggestion: Option<String>,
    /// Milliseconds spent serving the request.
    pub query_time: f64,
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub prefix: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CorrectParams {
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ---------------------------------------------------------------
// Backend search contract
// ---------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendRequest {
    pub query: String,
    pub page: u32,
    pub count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BackendResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
    /// Total hit count across all pages, when the backend reports it.
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub doc: DocMetadata,
    #[serde(default)]
    pub score: f64,
    #[serde(default, alias = "termCount")]
    pub term_count: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocMetadata {
    pub url: String,
    #[serde(default)]
    pub depth: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, alias = "firstParagraph")]
    pub first_paragraph: String,
}
