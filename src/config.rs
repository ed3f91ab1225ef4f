//! Process Configuration
//!
//! Command-line flags, each with an environment variable fallback. Library
//! code never sees [`Config`] directly; it receives the narrower settings
//! structs built by the accessor methods below.

use crate::ingestion::types::IngestSettings;
use crate::search::types::SuggestSettings;
use crate::spelling::types::CorrectorSettings;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "querysense", about = "Query autocomplete and spelling correction service")]
pub struct Config {
    /// Address the HTTP API listens on.
    #[arg(long, env = "QS_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Base URL of the backend search service.
    #[arg(long, env = "QS_BACKEND_URL", default_value = "http://127.0.0.1:50051")]
    pub backend_url: String,

    /// Unigram frequency dictionary (`term count` per line).
    #[arg(long, env = "QS_UNIGRAM_DICT")]
    pub unigram_dict: Option<PathBuf>,

    /// Bigram frequency dictionary (`term1 term2 count` per line).
    #[arg(long, env = "QS_BIGRAM_DICT")]
    pub bigram_dict: Option<PathBuf>,

    /// Where the ranked index is persisted between restarts.
    #[arg(long, env = "QS_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    #[arg(long, env = "QS_SNAPSHOT_INTERVAL_SECS", default_value_t = 60)]
    pub snapshot_interval_secs: u64,

    /// Number of concurrent ingestion consumers.
    #[arg(long, env = "QS_INGEST_WORKERS", default_value_t = 1)]
    pub ingest_workers: usize,

    /// Sleep between polls of an empty queue.
    #[arg(long, env = "QS_INGEST_BACKOFF_MS", default_value_t = 1000)]
    pub ingest_backoff_ms: u64,

    /// Upper bound on a single index or queue round-trip.
    #[arg(long, env = "QS_STORE_TIMEOUT_MS", default_value_t = 250)]
    pub store_timeout_ms: u64,

    #[arg(long, env = "QS_BACKEND_TIMEOUT_MS", default_value_t = 5000)]
    pub backend_timeout_ms: u64,

    #[arg(long, env = "QS_SUGGEST_LIMIT", default_value_t = 10)]
    pub suggest_limit: usize,

    /// Maximum prefix matches scored per suggestion request.
    #[arg(long, env = "QS_CANDIDATE_CAP", default_value_t = 200)]
    pub candidate_cap: usize,

    #[arg(long, env = "QS_MAX_EDIT_DISTANCE", default_value_t = 2)]
    pub max_edit_distance: usize,

    /// Wipe the ranked index and the queue before serving.
    #[arg(long, env = "QS_RESET_ON_START", default_value_t = false)]
    pub reset_on_start: bool,

    #[arg(long, env = "QS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn ingest_settings(&self) -> IngestSettings {
        IngestSettings {
            workers: self.ingest_workers.max(1),
            backoff: Duration::from_millis(self.ingest_backoff_ms),
            store_timeout: self.store_timeout(),
        }
    }

    pub fn suggest_settings(&self) -> SuggestSettings {
        SuggestSettings {
            limit: self.suggest_limit,
            candidate_cap: self.candidate_cap,
            store_timeout: self.store_timeout(),
        }
    }

    pub fn corrector_settings(&self) -> CorrectorSettings {
        CorrectorSettings {
            max_edit_distance: self.max_edit_distance,
            ..CorrectorSettings::default()
        }
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_millis(self.backend_timeout_ms)
    }

    pub fn snapshot_interval(&self) -> Duration {
        Duration::from_secs(self.snapshot_interval_secs.max(1))
    }

    /// Parsed log level, falling back to INFO on an unknown value.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
