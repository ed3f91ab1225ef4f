//! Search Module Tests
//!
//! ## Test Scopes
//! - **Suggest**: Popularity ranking, tie-break, limits, degraded index.
//! - **Orchestrator**: Enqueue hand-off, backend merge, error propagation.
//! - **Handlers**: Status codes and JSON bodies.
//! - **Serialization**: Request defaults and backend field aliases.

#[cfg(test)]
mod tests {
    use crate::error::{QueryError, QueryResult};
    use crate::ingestion::{IngestSettings, IngestionWorker};
    use crate::search::handlers::{handle_correct, handle_search, handle_suggest};
    use crate::search::types::{
        BackendRequest, BackendResponse, CorrectParams, DocMetadata, SearchHit, SearchRequest,
        SuggestParams, SuggestSettings,
    };
    use crate::search::{PrefixSuggester, QueryService, SearchBackend};
    use crate::spelling::{CorrectorSettings, Dictionary, SpellingCorrector};
    use crate::storage::snapshot::IndexSnapshot;
    use crate::storage::{MemoryIndex, MemoryQueue, QueryQueue, RankedIndex};
    use async_trait::async_trait;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::{Extension, Json};
    use parking_lot::Mutex;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::time::Duration;

    // ============================================================
    // FIXTURES
    // ============================================================

    struct StubBackend {
        response: Option<BackendResponse>,
        requests: Mutex<Vec<BackendRequest>>,
    }

    impl StubBackend {
        fn returning(response: BackendResponse) -> Arc<Self> {
            Arc::new(Self {
                response: Some(response),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                response: None,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SearchBackend for StubBackend {
        async fn search(&self, request: &BackendRequest) -> QueryResult<BackendResponse> {
            self.requests.lock().push(request.clone());
            self.response
                .clone()
                .ok_or_else(|| QueryError::BackendUnavailable("connection refused".to_string()))
        }
    }

    /// Index that is down or too slow to answer.
    struct BrokenIndex {
        delay: Option<Duration>,
    }

    #[async_trait]
    impl RankedIndex for BrokenIndex {
        async fn bump(&self, _ngram: &str) -> QueryResult<()> {
            Err(QueryError::StorageUnavailable("down".to_string()))
        }

        async fn prefix_candidates(&self, _prefix: &str, _cap: usize) -> QueryResult<Vec<String>> {
            match self.delay {
                Some(delay) => {
                    tokio::time::sleep(delay).await;
                    Ok(vec!["math".to_string()])
                }
                None => Err(QueryError::StorageUnavailable("down".to_string())),
            }
        }

        async fn scores_of(&self, ngrams: &[String]) -> QueryResult<Vec<u64>> {
            Ok(vec![1; ngrams.len()])
        }

        async fn reset(&self) -> QueryResult<()> {
            Ok(())
        }
    }

    /// Queue that rejects every enqueue.
    struct RejectingQueue;

    #[async_trait]
    impl QueryQueue for RejectingQueue {
        async fn enqueue(&self, _query: String) -> QueryResult<()> {
            Err(QueryError::StorageUnavailable("queue full".to_string()))
        }

        async fn try_dequeue(&self) -> QueryResult<Option<String>> {
            Ok(None)
        }

        async fn clear(&self) -> QueryResult<()> {
            Ok(())
        }
    }

    fn fast_suggest_settings() -> SuggestSettings {
        SuggestSettings {
            store_timeout: Duration::from_millis(50),
            ..SuggestSettings::default()
        }
    }

    async fn learned_index(queries: &[&str]) -> Arc<MemoryIndex> {
        let queue = Arc::new(MemoryQueue::new());
        let index = Arc::new(MemoryIndex::new());
        for query in queries {
            queue.enqueue(query.to_string()).await.unwrap();
        }
        IngestionWorker::new(queue, index.clone(), IngestSettings::default())
            .drain()
            .await
            .unwrap();
        index
    }

    fn corrector() -> SpellingCorrector {
        let mut dictionary = Dictionary::new(2);
        dictionary.add_unigram("mathematics", 100);
        dictionary.add_unigram("tutor", 10);
        SpellingCorrector::new(Arc::new(dictionary), CorrectorSettings::default())
    }

    fn sample_hit() -> SearchHit {
        SearchHit {
            doc: DocMetadata {
                url: "https://example.com/mathematics".to_string(),
                depth: 1,
                title: "Mathematics".to_string(),
                hash: "abc123".to_string(),
                images: vec![],
                first_paragraph: String::new(),
            },
            score: 4.2,
            term_count: 3,
        }
    }

    fn service_with(
        queue: Arc<dyn QueryQueue>,
        index: Arc<dyn RankedIndex>,
        backend: Arc<dyn SearchBackend>,
    ) -> Arc<QueryService> {
        Arc::new(QueryService::new(
            queue,
            PrefixSuggester::new(index, fast_suggest_settings()),
            corrector(),
            backend,
        ))
    }

    async fn wait_for_len(queue: &MemoryQueue, len: usize) {
        for _ in 0..100 {
            if queue.len() == len {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("queue never reached length {}", len);
    }

    // ============================================================
    // SUGGEST TESTS
    // ============================================================

    #[tokio::test]
    async fn test_suggest_ranks_by_popularity() {
        let index = learned_index(&["mathematics", "math", "maths", "math"]).await;
        let suggester = PrefixSuggester::new(index, fast_suggest_settings());

        let suggestions = suggester.suggest("math", 10, 200).await.unwrap();

        // math=2, then the tie between mathematics=1 and maths=1 is alphabetical.
        assert_eq!(suggestions, vec!["math", "mathematics", "maths"]);
    }

    #[tokio::test]
    async fn test_suggest_lowercases_prefix() {
        let index = learned_index(&["Math Tutor", "math"]).await;
        let suggester = PrefixSuggester::new(index, fast_suggest_settings());

        let suggestions = suggester.suggest("MATH", 10, 200).await.unwrap();
        assert_eq!(suggestions, vec!["math", "math tutor"]);
    }

    #[tokio::test]
    async fn test_suggest_empty_prefix_and_zero_limit() {
        let index = learned_index(&["math"]).await;
        let suggester = PrefixSuggester::new(index, fast_suggest_settings());

        assert!(suggester.suggest("", 10, 200).await.unwrap().is_empty());
        assert!(suggester.suggest("math", 0, 200).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_suggest_no_matches() {
        let index = learned_index(&["math"]).await;
        let suggester = PrefixSuggester::new(index, fast_suggest_settings());

        assert!(suggester.suggest("zebra", 10, 200).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_suggest_truncates_to_limit() {
        let index = learned_index(&[
            "investing in stocks and bonds",
            "investing",
            "investing in stocks",
            "invest",
        ])
        .await;
        let suggester = PrefixSuggester::new(index, fast_suggest_settings());

        let ranked = suggester.ranked("invest", 2, 200).await.unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].ngram, "investing");
        assert_eq!(ranked[0].score, 3);
        assert_eq!(ranked[1].ngram, "investing in");
        assert_eq!(ranked[1].score, 2);
    }

    #[tokio::test]
    async fn test_suggest_candidate_cap_limits_scan() {
        let index = learned_index(&["ma", "mb", "mc", "mc", "mc"]).await;
        let suggester = PrefixSuggester::new(index, fast_suggest_settings());

        // Only the first two lexicographic matches are scored, so "mc" is never seen.
        let suggestions = suggester.suggest("m", 10, 2).await.unwrap();
        assert_eq!(suggestions, vec!["ma", "mb"]);
    }

    #[tokio::test]
    async fn test_suggest_missing_score_counts_as_zero() {
        let mut scores = BTreeMap::new();
        scores.insert("math".to_string(), 3);
        let index = Arc::new(MemoryIndex::from_snapshot(IndexSnapshot {
            scores,
            lexical: vec!["mathx".to_string()],
        }));
        let suggester = PrefixSuggester::new(index, fast_suggest_settings());

        let ranked = suggester.ranked("math", 10, 200).await.unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].ngram, "mathx");
        assert_eq!(ranked[1].score, 0);
    }

    #[tokio::test]
    async fn test_suggest_is_idempotent() {
        let index = learned_index(&["math", "maths", "mathematics"]).await;
        let suggester = PrefixSuggester::new(index, fast_suggest_settings());

        let first = suggester.suggest("mat", 10, 200).await.unwrap();
        let second = suggester.suggest("mat", 10, 200).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_suggest_degrades_when_index_down() {
        let suggester = PrefixSuggester::new(Arc::new(BrokenIndex { delay: None }), fast_suggest_settings());

        assert!(suggester.suggest("math", 10, 200).await.is_err());
        assert!(suggester.suggest_or_empty("math", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_suggest_abandons_slow_index() {
        let index = Arc::new(BrokenIndex {
            delay: Some(Duration::from_millis(500)),
        });
        let suggester = PrefixSuggester::new(index, fast_suggest_settings());

        let result = suggester.suggest("math", 10, 200).await;
        assert!(matches!(result, Err(QueryError::StorageUnavailable(_))));
        assert!(suggester.suggest_or_empty("math", Some(5)).await.is_empty());
    }

    // ============================================================
    // ORCHESTRATOR TESTS
    // ============================================================

    #[tokio::test]
    async fn test_search_merges_results_and_suggestion() {
        let queue = Arc::new(MemoryQueue::new());
        let backend = StubBackend::returning(BackendResponse {
            results: vec![sample_hit()],
            total: Some(42),
        });
        let service = service_with(queue.clone(), Arc::new(MemoryIndex::new()), backend.clone());

        let response = service
            .search(SearchRequest {
                query: "mathematcs tutor".to_string(),
                page: 2,
                count: 5,
            })
            .await
            .unwrap();

        assert_eq!(response.results, vec![sample_hit()]);
        assert_eq!(response.total, 42);
        assert_eq!(response.suggestion.as_deref(), Some("mathematics tutor"));
        assert!(response.query_time >= 0.0);

        let requests = backend.requests.lock().clone();
        assert_eq!(
            requests,
            vec![BackendRequest {
                query: "mathematcs tutor".to_string(),
                page: 2,
                count: 5,
            }]
        );

        wait_for_len(&queue, 1).await;
        assert_eq!(
            queue.try_dequeue().await.unwrap().as_deref(),
            Some("mathematcs tutor")
        );
    }

    #[tokio::test]
    async fn test_search_total_falls_back_to_result_count() {
        let backend = StubBackend::returning(BackendResponse {
            results: vec![sample_hit(), sample_hit()],
            total: None,
        });
        let service = service_with(Arc::new(MemoryQueue::new()), Arc::new(MemoryIndex::new()), backend);

        let response = service
            .search(SearchRequest {
                query: "mathematics".to_string(),
                page: 1,
                count: 10,
            })
            .await
            .unwrap();

        assert_eq!(response.total, 2);
        assert_eq!(response.suggestion, None);
    }

    #[tokio::test]
    async fn test_search_backend_failure_surfaces() {
        let service = service_with(
            Arc::new(MemoryQueue::new()),
            Arc::new(MemoryIndex::new()),
            StubBackend::failing(),
        );

        let result = service
            .search(SearchRequest {
                query: "math".to_string(),
                page: 1,
                count: 10,
            })
            .await;

        assert!(matches!(result, Err(QueryError::BackendUnavailable(_))));
    }

    #[tokio::test]
    async fn test_search_survives_queue_and_index_failures() {
        let backend = StubBackend::returning(BackendResponse {
            results: vec![sample_hit()],
            total: Some(1),
        });
        let service = service_with(
            Arc::new(RejectingQueue),
            Arc::new(BrokenIndex { delay: None }),
            backend,
        );

        let response = service
            .search(SearchRequest {
                query: "mathematcs".to_string(),
                page: 1,
                count: 10,
            })
            .await
            .unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.suggestion.as_deref(), Some("mathematics"));
        assert!(service.suggest_prefix("math", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_not_enqueued() {
        let queue = Arc::new(MemoryQueue::new());
        let service = service_with(
            queue.clone(),
            Arc::new(MemoryIndex::new()),
            StubBackend::returning(BackendResponse::default()),
        );

        service.enqueue_for_indexing("   ");
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_searched_queries_become_suggestions() {
        let queue = Arc::new(MemoryQueue::new());
        let index = Arc::new(MemoryIndex::new());
        let service = service_with(
            queue.clone(),
            index.clone(),
            StubBackend::returning(BackendResponse::default()),
        );

        for query in ["investing in stocks", "investing", "invest"] {
            service
                .search(SearchRequest {
                    query: query.to_string(),
                    page: 1,
                    count: 10,
                })
                .await
                .unwrap();
        }
        wait_for_len(&queue, 3).await;
        IngestionWorker::new(queue, index, IngestSettings::default())
            .drain()
            .await
            .unwrap();

        let suggestions = service.suggest_prefix("inv", Some(3)).await;
        assert_eq!(suggestions, vec!["investing", "invest", "investing in"]);
    }

    // ============================================================
    // HANDLER TESTS
    // ============================================================

    #[tokio::test]
    async fn test_handle_search_maps_backend_failure_to_bad_gateway() {
        let service = service_with(
            Arc::new(MemoryQueue::new()),
            Arc::new(MemoryIndex::new()),
            StubBackend::failing(),
        );

        let response = handle_search(
            Extension(service),
            Json(SearchRequest {
                query: "math".to_string(),
                page: 1,
                count: 10,
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_handle_search_ok() {
        let service = service_with(
            Arc::new(MemoryQueue::new()),
            Arc::new(MemoryIndex::new()),
            StubBackend::returning(BackendResponse::default()),
        );

        let response = handle_search(
            Extension(service),
            Json(SearchRequest {
                query: "math".to_string(),
                page: 1,
                count: 10,
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_handle_suggest_and_correct() {
        let index = learned_index(&["math", "math", "maths"]).await;
        let service = service_with(
            Arc::new(MemoryQueue::new()),
            index,
            StubBackend::returning(BackendResponse::default()),
        );

        let Json(suggestions) = handle_suggest(
            Extension(service.clone()),
            Query(SuggestParams {
                prefix: "ma".to_string(),
                limit: Some(1),
            }),
        )
        .await;
        assert_eq!(suggestions, vec!["math"]);

        let Json(correction) = handle_correct(
            Extension(service),
            Query(CorrectParams {
                q: "mathematcs".to_string(),
            }),
        )
        .await;
        assert_eq!(correction.as_deref(), Some("mathematics"));
    }

    // ============================================================
    // SERIALIZATION TESTS
    // ============================================================

    #[test]
    fn test_search_request_defaults() {
        let request: SearchRequest = serde_json::from_str(r#"{"query": "math"}"#).unwrap();

        assert_eq!(request.page, 1);
        assert_eq!(request.count, 10);
    }

    #[test]
    fn test_backend_response_accepts_camel_case() {
        let json = r#"{
            "results": [{
                "doc": {"url": "https://a.example", "title": "A", "firstParagraph": "Intro"},
                "score": 1.5,
                "termCount": 4
            }],
            "total": 9
        }"#;

        let response: BackendResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.total, Some(9));
        assert_eq!(response.results[0].term_count, 4);
        assert_eq!(response.results[0].doc.first_paragraph, "Intro");
        assert!(response.results[0].doc.images.is_empty());
    }

    #[test]
    fn test_backend_response_empty_object() {
        let response: BackendResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response, BackendResponse::default());
    }
}
