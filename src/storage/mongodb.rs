//! MongoDB query executor using the official MongoDB async driver.
//!
//! Provides `MongoCollection<T>`, a [`QueryExecutor`] backed by a
//! `mongodb::Collection<T>`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! keyset-rs = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Query mapping
//!
//! A [`RangeQuery`] maps one-to-one onto a `find`:
//!
//! | RangeQuery | find |
//! |---|---|
//! | filter + cursor bound | `{..filter, <id>: {"$gt" \| "$lt": cursor}}` |
//! | limit | `limit` |
//! | sort | `sort: {<id>: 1 \| -1}` |
//! | projection | `projection` |
//!
//! The filter is converted JSON → BSON as is; its structure is validated by
//! the server. The cursor is serialized with the BSON serializer, so an
//! `ObjectId` identifier stays an `ObjectId`.

use crate::core::{
    CursorFilter, Document, DocumentStream, Identifier, QueryExecutor, RangeQuery,
};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use mongodb::Collection;
use mongodb::bson::{self, doc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a JSON object into a BSON document.
fn map_to_document(map: &Map<String, Value>) -> Result<bson::Document> {
    bson::to_document(map).map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))
}

/// Build the BSON filter for a cursor filter, the bound overriding any
/// existing condition on the identifier field.
fn cursor_filter_document<I: Identifier>(
    filter: &CursorFilter<I>,
    identifier_field: &str,
) -> Result<bson::Document> {
    let mut document = map_to_document(filter.filter().as_map())?;

    if let Some(bound) = filter.bound() {
        let cursor = bson::to_bson(bound.cursor())
            .map_err(|e| anyhow!("Failed to convert cursor to BSON: {}", e))?;
        let operator = bound.operator();
        document.insert(identifier_field, doc! { operator: cursor });
    }

    Ok(document)
}

// ---------------------------------------------------------------------------
// MongoCollection<T>
// ---------------------------------------------------------------------------

/// Range query executor backed by a MongoDB collection.
///
/// # Type bounds
///
/// `T` must implement:
/// - `Document` for identifier access
/// - `DeserializeOwned` for decoding result documents
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use keyset::storage::MongoCollection;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let orders = MongoCollection::<Order>::new(client.database("shop").collection("orders"));
/// let stream = paginate(&orders, PaginateOptions::new(50)).await?;
/// ```
pub struct MongoCollection<T: Send + Sync> {
    collection: Collection<T>,
}

impl<T: Send + Sync> Clone for MongoCollection<T> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
        }
    }
}

impl<T: Send + Sync> std::fmt::Debug for MongoCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoCollection")
            .field("namespace", &self.collection.namespace().to_string())
            .finish()
    }
}

impl<T: Send + Sync> MongoCollection<T> {
    /// Create a new `MongoCollection` around a collection handle.
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection }
    }

    /// Open `name` in `database`.
    pub fn from_database(database: &mongodb::Database, name: &str) -> Self {
        Self::new(database.collection(name))
    }

    /// Get a reference to the underlying collection.
    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    /// Create an ascending index on the identifier field.
    ///
    /// `_id` is always indexed by the server, so nothing is done for it.
    /// Any other identifier field needs a unique index for pages to be
    /// served by an index seek.
    ///
    /// Idempotent, can be called on every startup.
    pub async fn ensure_identifier_index(&self, identifier_field: &str) -> Result<()> {
        use mongodb::IndexModel;
        use mongodb::options::IndexOptions;

        if identifier_field == "_id" {
            return Ok(());
        }

        let index = IndexModel::builder()
            .keys(doc! { identifier_field: 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection
            .create_index(index)
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to create index on {}.{}: {}",
                    self.collection.name(),
                    identifier_field,
                    e
                )
            })?;

        Ok(())
    }
}

#[async_trait]
impl<T> QueryExecutor<T> for MongoCollection<T>
where
    T: Document + DeserializeOwned + Unpin,
{
    async fn find(&self, query: RangeQuery<T::Id>) -> Result<DocumentStream<T>> {
        let identifier_field = query.identifier_field();
        let filter = cursor_filter_document(query.filter(), identifier_field)?;
        let sort = doc! { identifier_field: query.order().index_direction() };

        tracing::debug!(
            collection = %self.collection.name(),
            filter = %filter,
            limit = query.limit(),
            "mongodb range query"
        );

        let mut find = self
            .collection
            .find(filter)
            .sort(sort)
            .limit(query.limit());
        if let Some(projection) = query.projection() {
            find = find.projection(map_to_document(projection.as_map())?);
        }

        let cursor = find
            .await
            .map_err(|e| anyhow!("Failed to run range query: {}", e))?;

        Ok(cursor.map_err(anyhow::Error::from).boxed())
    }
}
