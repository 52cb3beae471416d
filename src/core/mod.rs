//! Core module containing the paginator and the types it exchanges with executors

pub mod document;
pub mod error;
pub mod executor;
pub mod page;
pub mod paginator;
pub mod params;
pub mod query;

pub use document::{Document, Identifier};
pub use error::{ConfigError, PaginateError, PaginateResult};
pub use executor::{DocumentStream, QueryExecutor};
pub use page::Page;
pub use paginator::{PaginateOptions, Paginator, paginate};
pub use params::PageParams;
pub use query::{
    CursorFilter, IdBound, PaginateFilter, Projection, RangeQuery, SortOrder, SortSpec,
};
