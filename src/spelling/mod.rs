//! Spelling Correction Module
//!
//! Proposes a corrected rewrite of a possibly misspelled query before results
//! are shown. The dictionary is static: it is loaded once at startup and never
//! mutated while serving, so the corrector is freely shareable across requests.
//!
//! ## Submodules
//! - **`dictionary`**: Unigram/bigram frequency tables and verified term lookup.
//! - **`symspell`**: Symmetric delete index used to find candidate terms quickly.
//! - **`corrector`**: Query-level guards and per-word rewriting.
//! - **`types`**: Settings and result types.

pub mod corrector;
pub mod dictionary;
pub mod symspell;
pub mod types;

pub use corrector::SpellingCorrector;
pub use dictionary::Dictionary;
pub use types::{CorrectionCandidate, CorrectorSettings, TermSuggestion};
