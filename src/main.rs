use clap::Parser;
use querysense::config::Config;
use querysense::ingestion::IngestionWorker;
use querysense::search::handlers::router;
use querysense::search::{HttpSearchBackend, PrefixSuggester, QueryService};
use querysense::spelling::{Dictionary, SpellingCorrector};
use querysense::storage::snapshot::{load_or_new, save_snapshot};
use querysense::storage::{MemoryIndex, MemoryQueue, QueryQueue, RankedIndex};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    tracing::info!("Starting querysense on {}", config.bind);

    // 1. Spelling dictionary (static for the life of the process):
    let dictionary = match &config.unigram_dict {
        Some(path) => Dictionary::from_files(
            path,
            config.bigram_dict.as_deref(),
            config.max_edit_distance,
        )?,
        None => {
            tracing::warn!("No unigram dictionary configured, spelling correction disabled");
            Dictionary::new(config.max_edit_distance)
        }
    };
    let corrector = SpellingCorrector::new(Arc::new(dictionary), config.corrector_settings());

    // 2. Ranked index and ingestion queue:
    let index = Arc::new(match &config.snapshot {
        Some(path) => load_or_new(path)?,
        None => MemoryIndex::new(),
    });
    let queue = Arc::new(MemoryQueue::new());

    if config.reset_on_start {
        tracing::info!("Resetting ranked index and query queue");
        index.reset().await?;
        queue.clear().await?;
    }

    // 3. Ingestion workers:
    let shutdown = CancellationToken::new();
    let worker = IngestionWorker::new(queue.clone(), index.clone(), config.ingest_settings());
    let worker_handles = worker.start(shutdown.clone());

    // 4. Periodic snapshots:
    let snapshot_handle = config.snapshot.clone().map(|path| {
        spawn_snapshot_task(index.clone(), path, config.snapshot_interval(), shutdown.clone())
    });

    // 5. Request path:
    let backend = Arc::new(HttpSearchBackend::new(
        &config.backend_url,
        config.backend_timeout(),
    ));
    let suggester = PrefixSuggester::new(index.clone(), config.suggest_settings());
    let service = Arc::new(QueryService::new(queue.clone(), suggester, corrector, backend));
    let app = router(service);

    // 6. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            server_shutdown.cancel();
        })
        .await?;

    // 7. Drain background tasks:
    shutdown.cancel();
    for handle in worker_handles {
        if let Err(e) = handle.await {
            tracing::error!("Ingestion worker panicked: {}", e);
        }
    }
    if let Some(handle) = snapshot_handle
        && let Err(e) = handle.await
    {
        tracing::error!("Snapshot task panicked: {}", e);
    }
    if let Some(path) = &config.snapshot {
        save_snapshot(&index, path)?;
        tracing::info!("Final snapshot written to {}", path.display());
    }

    tracing::info!(
        "Shutdown complete ({} n-grams indexed, {} queries left in queue)",
        index.len(),
        queue.len()
    );
    Ok(())
}

fn spawn_snapshot_task(
    index: Arc<MemoryIndex>,
    path: PathBuf,
    every: std::time::Duration,
    shutdown: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = interval.tick() => {}
            }

            let index = index.clone();
            let path = path.clone();
            let result = tokio::task::spawn_blocking(move || save_snapshot(&index, &path)).await;
            match result {
                Ok(Ok(())) => tracing::debug!("Index snapshot saved"),
                Ok(Err(e)) => tracing::error!("Failed to save index snapshot: {}", e),
                Err(e) => tracing::error!("Snapshot task panicked: {}", e),
            }
        }
    })
}
