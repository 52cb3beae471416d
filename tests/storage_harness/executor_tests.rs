//! Macro-generated test suite for `QueryExecutor<TestDocument>` contract validation.
//!
//! The `executor_tests!` macro generates a test module that drives the
//! paginator against any `QueryExecutor<TestDocument>` implementation and
//! checks the keyset pagination contract: cursor bounds, ordering, limits,
//! filters and projections.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//!
//! executor_tests!(docs => seeded_collection(docs));
//! ```
//!
//! # Generated Tests
//!
//! ## Walks
//! - `test_ascending_walk`: ids 1..=5, limit 2 gives [1,2] [3,4] [5]
//! - `test_descending_walk`: ids 1..=5, limit 2 gives [5,4] [3,2] [1]
//! - `test_full_walk_is_disjoint_and_complete`: 23 scrambled documents, limit 5
//! - `test_exact_multiple_ends_on_empty_page`: 4 documents, limit 2
//!
//! ## Query shape
//! - `test_first_page_has_no_bound`
//! - `test_limit_caps_page`
//! - `test_filter_combines_with_cursor`
//! - `test_range_filter_combines_with_cursor`
//! - `test_identifier_condition_in_filter_is_replaced`
//! - `test_projection_passthrough`
//! - `test_identifier_only_projection`: `{"_id": 1}` keeps only the identifier
//! - `test_identifier_condition_inside_and_is_replaced`
//!
//! ## Edge Cases
//! - `test_cursor_not_in_collection`: bound still applies
//! - `test_cursor_past_end`: empty page
//! - `test_empty_collection`
//! - `test_non_positive_limit_rejected`

/// Generate a `QueryExecutor<TestDocument>` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an executor holding
/// exactly the documents bound to `$docs` (a `Vec<TestDocument>`). It is
/// re-evaluated for each test to ensure isolation.
#[macro_export]
macro_rules! executor_tests {
    ($docs:ident => $factory:expr) => {
        mod executor_contract_tests {
            use super::*;
            use keyset::core::{
                PaginateFilter, PaginateOptions, Paginator, Projection, SortOrder,
            };
            use futures::TryStreamExt;
            use serde_json::json;

            // ==================================================================
            // Walks
            // ==================================================================

            #[tokio::test]
            async fn test_ascending_walk() {
                init_tracing();
                let $docs = sample_documents(&[1, 2, 3, 4, 5]);
                let collection = $factory;

                let pages = walk_pages(&collection, PaginateOptions::new(2)).await;
                assert_eq!(pages, vec![vec![1, 2], vec![3, 4], vec![5]]);
            }

            #[tokio::test]
            async fn test_descending_walk() {
                init_tracing();
                let $docs = sample_documents(&[1, 2, 3, 4, 5]);
                let collection = $factory;

                let pages = walk_pages(
                    &collection,
                    PaginateOptions::new(2).with_order(SortOrder::Descending),
                )
                .await;
                assert_eq!(pages, vec![vec![5, 4], vec![3, 2], vec![1]]);
            }

            #[tokio::test]
            async fn test_full_walk_is_disjoint_and_complete() {
                init_tracing();
                let $docs = scrambled_documents(23);
                let collection = $factory;

                let pages = walk_pages(&collection, PaginateOptions::new(5)).await;
                assert_eq!(pages.len(), 5);
                assert!(pages.iter().all(|page| page.len() <= 5));

                let all: Vec<i64> = pages.into_iter().flatten().collect();
                assert_strictly_ascending(&all);
                assert_eq!(all, (1..=23).collect::<Vec<i64>>());

                let pages = walk_pages(
                    &collection,
                    PaginateOptions::new(5).with_order(SortOrder::Descending),
                )
                .await;
                let all: Vec<i64> = pages.into_iter().flatten().collect();
                assert_strictly_descending(&all);
                assert_eq!(all.len(), 23);
            }

            #[tokio::test]
            async fn test_exact_multiple_ends_on_empty_page() {
                init_tracing();
                let $docs = sample_documents(&[1, 2, 3, 4]);
                let collection = $factory;

                let pages = walk_pages(&collection, PaginateOptions::new(2)).await;
                assert_eq!(pages, vec![vec![1, 2], vec![3, 4], vec![]]);
            }

            // ==================================================================
            // Query shape
            // ==================================================================

            #[tokio::test]
            async fn test_first_page_has_no_bound() {
                init_tracing();
                let $docs = sample_documents(&[-5, 0, 7]);
                let collection = $factory;

                assert_eq!(
                    page_ids(&collection, PaginateOptions::new(10)).await,
                    vec![-5, 0, 7]
                );
            }

            #[tokio::test]
            async fn test_limit_caps_page() {
                init_tracing();
                let $docs = sample_documents(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
                let collection = $factory;

                assert_eq!(
                    page_ids(&collection, PaginateOptions::new(3)).await,
                    vec![1, 2, 3]
                );
                assert_eq!(
                    page_ids(&collection, PaginateOptions::new(1).with_cursor(9)).await,
                    vec![10]
                );
            }

            #[tokio::test]
            async fn test_filter_combines_with_cursor() {
                init_tracing();
                let $docs = sample_documents(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
                let collection = $factory;

                let options = PaginateOptions::new(2)
                    .with_filter(PaginateFilter::new().with("category", "even"));

                assert_eq!(page_ids(&collection, options.clone()).await, vec![2, 4]);
                assert_eq!(page_ids(&collection, options.after(4)).await, vec![6, 8]);
                assert_eq!(page_ids(&collection, options.after(8)).await, vec![10]);

                let descending = options.with_order(SortOrder::Descending);
                assert_eq!(page_ids(&collection, descending.after(7)).await, vec![6, 4]);
            }

            #[tokio::test]
            async fn test_range_filter_combines_with_cursor() {
                init_tracing();
                let $docs = sample_documents(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
                let collection = $factory;

                let options = PaginateOptions::new(10)
                    .with_filter(PaginateFilter::new().with("score", json!({"$lte": 60})))
                    .with_cursor(3);

                assert_eq!(page_ids(&collection, options).await, vec![4, 5, 6]);
            }

            #[tokio::test]
            async fn test_identifier_condition_in_filter_is_replaced() {
                init_tracing();
                let $docs = sample_documents(&[1, 2, 3, 4, 5]);
                let collection = $factory;

                let filter = PaginateFilter::new()
                    .with("_id", json!({"$gte": 4}))
                    .with("category", "odd");
                let options = PaginateOptions::new(10)
                    .with_filter(filter.clone())
                    .with_cursor(1);

                assert_eq!(page_ids(&collection, options).await, vec![3, 5]);
                assert_eq!(filter.get("_id"), Some(&json!({"$gte": 4})));
            }

            #[tokio::test]
            async fn test_projection_passthrough() {
                init_tracing();
                let $docs = sample_documents(&[1, 2, 3]);
                let collection = $factory;

                let stream = Paginator::default()
                    .paginate::<TestDocument, _>(
                        &collection,
                        PaginateOptions::new(2)
                            .with_cursor(1)
                            .with_projection(Projection::include(["name"])),
                    )
                    .await
                    .unwrap();
                let docs: Vec<TestDocument> = stream.try_collect().await.unwrap();

                assert_eq!(docs.len(), 2);
                assert_eq!(docs[0].id, 2);
                assert_eq!(docs[0].name, "doc-2");
                assert_eq!(docs[0].category, "");
                assert_eq!(docs[1].score, 0);
            }

            #[tokio::test]
            async fn test_identifier_only_projection() {
                init_tracing();
                let $docs = sample_documents(&[1, 2, 3]);
                let collection = $factory;

                let stream = Paginator::default()
                    .paginate::<TestDocument, _>(
                        &collection,
                        PaginateOptions::new(5).with_projection(Projection::include(["_id"])),
                    )
                    .await
                    .unwrap();
                let docs: Vec<TestDocument> = stream.try_collect().await.unwrap();

                let ids: Vec<i64> = docs.iter().map(|doc| doc.id).collect();
                assert_eq!(ids, vec![1, 2, 3]);
                assert!(docs.iter().all(|doc| doc.name.is_empty()));
                assert!(docs.iter().all(|doc| doc.category.is_empty() && doc.score == 0));
            }

            #[tokio::test]
            async fn test_identifier_condition_inside_and_is_replaced() {
                init_tracing();
                let $docs = sample_documents(&[1, 2, 3, 4, 5]);
                let collection = $factory;

                let filter = PaginateFilter::try_from(json!({
                    "$and": [{"_id": {"$lt": 2}}, {"category": "odd"}]
                }))
                .unwrap();
                let options = PaginateOptions::new(10).with_filter(filter).with_cursor(2);

                assert_eq!(page_ids(&collection, options).await, vec![3, 5]);
            }

            // ==================================================================
            // Edge cases
            // ==================================================================

            #[tokio::test]
            async fn test_cursor_not_in_collection() {
                init_tracing();
                let $docs = sample_documents(&[10, 20, 30]);
                let collection = $factory;

                assert_eq!(
                    page_ids(&collection, PaginateOptions::new(5).with_cursor(15)).await,
                    vec![20, 30]
                );
                assert_eq!(
                    page_ids(
                        &collection,
                        PaginateOptions::new(5)
                            .with_cursor(25)
                            .with_order(SortOrder::Descending)
                    )
                    .await,
                    vec![20, 10]
                );
            }

            #[tokio::test]
            async fn test_cursor_past_end() {
                init_tracing();
                let $docs = sample_documents(&[1, 2, 3]);
                let collection = $factory;

                assert!(
                    page_ids(&collection, PaginateOptions::new(5).with_cursor(3))
                        .await
                        .is_empty()
                );
                assert!(
                    page_ids(
                        &collection,
                        PaginateOptions::new(5)
                            .with_cursor(1)
                            .with_order(SortOrder::Descending)
                    )
                    .await
                    .is_empty()
                );
            }

            #[tokio::test]
            async fn test_empty_collection() {
                init_tracing();
                let $docs: Vec<TestDocument> = Vec::new();
                let collection = $factory;

                let page = Paginator::default()
                    .next_page::<TestDocument, _>(&collection, PaginateOptions::new(10))
                    .await
                    .unwrap();
                assert!(page.is_empty());
                assert_eq!(page.next_cursor, None);
            }

            #[tokio::test]
            async fn test_non_positive_limit_rejected() {
                init_tracing();
                let $docs = sample_documents(&[1, 2, 3]);
                let collection = $factory;

                for limit in [0, -1, i64::MIN] {
                    let result = Paginator::default()
                        .paginate::<TestDocument, _>(&collection, PaginateOptions::new(limit))
                        .await;
                    match result {
                        Ok(_) => panic!("limit {} should be rejected", limit),
                        Err(err) => {
                            assert!(err.is_invalid_argument());
                            assert_eq!(err.argument(), Some("limit"));
                        }
                    }
                }
            }
        }
    };
}
