//! Query Understanding Library
//!
//! The layer that sits in front of a document search backend. It learns which
//! phrases users search for and serves autocomplete from them, and it proposes
//! spelling corrections before results are shown.
//!
//! ## Architecture Modules
//! - **`text`**: Tokenizer and n-gram generator (pure functions).
//! - **`storage`**: The ranked n-gram index, the raw query queue, and index snapshots.
//! - **`ingestion`**: Background workers that drain the queue into the ranked index.
//! - **`spelling`**: Static frequency dictionary and the per-word spelling corrector.
//! - **`search`**: Prefix suggestions, the request orchestrator, and the HTTP handlers.
//! - **`config`**: Command-line/environment configuration for the binary.
//! - **`error`**: The shared error type.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod search;
pub mod spelling;
pub mod storage;
pub mod text;

pub use error::{QueryError, QueryResult};
