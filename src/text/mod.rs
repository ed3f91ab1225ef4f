//! Text Processing Module
//!
//! Pure functions that turn raw query text into the units the rest of the
//! system works with.
//!
//! ## Submodules
//! - **`tokenizer`**: Lowercases and splits query text on whitespace.
//! - **`ngram`**: Expands a token sequence into contiguous unigrams, bigrams and trigrams.

pub mod ngram;
pub mod tokenizer;

pub use ngram::{MAX_NGRAM_LEN, generate_ngrams};
pub use tokenizer::tokenize;
