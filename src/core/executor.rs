//! Query executor trait: the storage collaborator seam

use crate::core::document::Document;
use crate::core::query::RangeQuery;
use anyhow::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Lazy sequence of documents produced by an executor
///
/// Items are fetched as the stream is polled. Errors raised while streaming
/// (a dropped connection mid-batch, a document that fails to decode) are
/// yielded in place.
pub type DocumentStream<T> = BoxStream<'static, Result<T>>;

/// Runs range queries against an ordered collection
///
/// Implementations own document retrieval and lifetime. They must return
/// documents matching the query's filter and bound, ordered on
/// `query.sort()`, at most `query.limit()` of them. Their failures are
/// opaque to the paginator and surface to the caller unchanged.
#[async_trait]
pub trait QueryExecutor<T: Document>: Send + Sync {
    /// Start a range query and return its lazy result sequence
    async fn find(&self, query: RangeQuery<T::Id>) -> Result<DocumentStream<T>>;
}

#[async_trait]
impl<T, E> QueryExecutor<T> for std::sync::Arc<E>
where
    T: Document,
    E: QueryExecutor<T> + ?Sized,
{
    async fn find(&self, query: RangeQuery<T::Id>) -> Result<DocumentStream<T>> {
        (**self).find(query).await
    }
}
