//! Keyset paginator
//!
//! Turns a page request into a [`RangeQuery`] bounded on the identifier and
//! hands it to a [`QueryExecutor`]. Pages are chained by value, not by
//! position: the next request carries the last identifier seen as its
//! cursor, so concurrent inserts and deletes elsewhere in the collection
//! never shift a page.
//!
//! # Example
//!
//! ```rust,ignore
//! let first = paginate(&orders, PaginateOptions::new(20)).await?;
//! let page = Page::collect(first, 20).await?;
//!
//! if let Some(cursor) = page.next_cursor {
//!     let second = paginate(&orders, PaginateOptions::new(20).with_cursor(cursor)).await?;
//! }
//! ```

use crate::config::PaginatorConfig;
use crate::core::document::{Document, Identifier};
use crate::core::error::{ConfigResult, PaginateError, PaginateResult};
use crate::core::executor::{DocumentStream, QueryExecutor};
use crate::core::page::Page;
use crate::core::query::{
    CursorFilter, IdBound, PaginateFilter, Projection, RangeQuery, SortOrder, SortSpec,
};

/// A page request
#[derive(Debug, Clone, PartialEq)]
pub struct PaginateOptions<I> {
    /// Predicate over non-identifier fields (empty matches all)
    pub filter: PaginateFilter,

    /// Page size, must be greater than 0
    pub limit: i64,

    /// Optional field selection, passed to the executor as is
    pub projection: Option<Projection>,

    /// Identifier of the previous page's boundary document, `None` on the first page
    pub cursor: Option<I>,

    /// Sort direction, the paginator's default when `None`
    pub order: Option<SortOrder>,
}

impl<I> PaginateOptions<I> {
    /// First-page request matching every document
    pub fn new(limit: i64) -> Self {
        Self {
            filter: PaginateFilter::new(),
            limit,
            projection: None,
            cursor: None,
            order: None,
        }
    }

    pub fn with_filter(mut self, filter: PaginateFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn with_cursor(mut self, cursor: I) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }
}

impl<I: Clone> PaginateOptions<I> {
    /// Request for the page following `cursor`, same filter/limit/order
    pub fn after(&self, cursor: I) -> Self {
        Self {
            cursor: Some(cursor),
            ..self.clone()
        }
    }
}

/// Builds keyset range queries and delegates them to an executor
///
/// Stateless apart from its configuration; clone it freely or share one
/// instance across tasks.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    config: PaginatorConfig,
}

impl Paginator {
    /// Create a paginator from a configuration as is
    ///
    /// The configuration is not validated here; configs loaded with
    /// [`PaginatorConfig::from_yaml_str`] or built by hand and passed to
    /// [`Paginator::try_new`] are.
    pub fn new(config: PaginatorConfig) -> Self {
        Self { config }
    }

    /// Create a paginator, rejecting an unusable identifier field
    pub fn try_new(config: PaginatorConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    /// Translate a page request into a range query
    ///
    /// Fails with [`PaginateError::InvalidArgument`] if `limit <= 0`. The
    /// caller's filter is copied; any condition it holds on the identifier
    /// field is replaced by the cursor bound.
    pub fn range_query<I: Identifier>(
        &self,
        options: &PaginateOptions<I>,
    ) -> PaginateResult<RangeQuery<I>> {
        if options.limit <= 0 {
            tracing::debug!(limit = options.limit, "rejecting page request");
            return Err(PaginateError::invalid_argument(
                "limit",
                "limit must be greater than 0",
            ));
        }

        let order = options.order.unwrap_or(self.config.default_order);
        let field = &self.config.identifier_field;

        let bound = options
            .cursor
            .clone()
            .map(|cursor| IdBound::after(cursor, order));
        let filter = CursorFilter::new(options.filter.without_field(field), bound);

        tracing::debug!(
            limit = options.limit,
            order = order.as_str(),
            cursor = ?options.cursor,
            identifier_field = %field,
            "built range query"
        );

        Ok(RangeQuery::new(
            filter,
            options.limit,
            options.projection.clone(),
            SortSpec {
                field: field.clone(),
                order,
            },
        ))
    }

    /// Run one page request against `collection`
    ///
    /// Returns the executor's lazy stream; executor failures are returned
    /// unchanged as [`PaginateError::Executor`].
    pub async fn paginate<T, E>(
        &self,
        collection: &E,
        options: PaginateOptions<T::Id>,
    ) -> PaginateResult<DocumentStream<T>>
    where
        T: Document,
        E: QueryExecutor<T> + ?Sized,
    {
        let query = self.range_query(&options)?;
        let stream = collection.find(query).await?;
        Ok(stream)
    }

    /// Run one page request and collect it into a [`Page`]
    pub async fn next_page<T, E>(
        &self,
        collection: &E,
        options: PaginateOptions<T::Id>,
    ) -> PaginateResult<Page<T>>
    where
        T: Document,
        E: QueryExecutor<T> + ?Sized,
    {
        let limit = options.limit;
        let stream = self.paginate::<T, E>(collection, options).await?;
        Ok(Page::collect(stream, limit).await?)
    }
}

/// Run one page request with the default [`Paginator`]
///
/// Identifier field `_id`, ascending unless `options.order` says otherwise.
pub async fn paginate<T, E>(
    collection: &E,
    options: PaginateOptions<T::Id>,
) -> PaginateResult<DocumentStream<T>>
where
    T: Document,
    E: QueryExecutor<T> + ?Sized,
{
    Paginator::default()
        .paginate::<T, E>(collection, options)
        .await
}
