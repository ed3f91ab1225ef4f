//! Search Service Module
//!
//! The request path of the query-understanding layer.
//!
//! ## Responsibilities
//! - **Autocomplete**: Ranking learned n-grams that start with a typed prefix.
//! - **Orchestration**: Enqueueing searched queries, calling the backend, attaching spelling suggestions.
//! - **API**: Exposing search, suggest and correct over HTTP.
//!
//! ## Submodules
//! - **`suggest`**: Prefix suggestion engine over the ranked index.
//! - **`backend`**: Contract and HTTP transport for the document search service.
//! - **`service`**: Request orchestrator.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Data Transfer Objects (DTOs) and settings.

pub mod backend;
pub mod handlers;
pub mod service;
pub mod suggest;
pub mod types;

pub use backend::{HttpSearchBackend, SearchBackend};
pub use service::QueryService;
pub use suggest::PrefixSuggester;

#[cfg(test)]
mod tests;
