//! # keyset
//!
//! Cursor-based (keyset) pagination over ordered document collections.
//!
//! Instead of `skip`/`offset`, each page request carries the identifier of
//! the last document already seen. The paginator turns that into a range
//! predicate on the identifier index (`_id > cursor` ascending,
//! `_id < cursor` descending), so pages stay stable while the collection
//! changes and every page costs one index seek.
//!
//! ## Features
//!
//! - **Stateless**: no server-side cursor is held between requests
//! - **Storage-agnostic**: queries run through the [`QueryExecutor`](core::QueryExecutor) trait
//! - **Generic**: over the document type and its identifier type
//! - **In-memory executor**: ordered `BTreeMap` collection for tests and development
//! - **MongoDB executor**: behind the `mongodb_backend` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use keyset::prelude::*;
//!
//! #[derive(Clone, Serialize, Deserialize)]
//! struct Event {
//!     #[serde(rename = "_id")]
//!     id: i64,
//!     kind: String,
//! }
//!
//! impl Document for Event {
//!     type Id = i64;
//!     fn id(&self) -> &i64 {
//!         &self.id
//!     }
//! }
//!
//! let events = InMemoryCollection::<Event>::new();
//! let paginator = Paginator::default();
//!
//! let mut options = PaginateOptions::new(100)
//!     .with_filter(PaginateFilter::new().with("kind", "login"));
//! loop {
//!     let page = paginator.next_page(&events, options.clone()).await?;
//!     handle(&page.items);
//!     match page.next_cursor {
//!         Some(cursor) => options = options.after(cursor),
//!         None => break,
//!     }
//! }
//! ```

pub mod config;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Document, DocumentStream, Identifier, Page, PageParams, PaginateFilter, PaginateOptions,
        Paginator, Projection, QueryExecutor, RangeQuery, SortOrder, paginate,
    };

    // === Errors ===
    pub use crate::core::error::{ConfigError, PaginateError, PaginateResult};

    // === Config ===
    pub use crate::config::PaginatorConfig;

    // === Storage ===
    pub use crate::storage::InMemoryCollection;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoCollection;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
