//! In-memory ordered collection for testing and development

use crate::core::query::IdBound;
use crate::core::{Document, DocumentStream, QueryExecutor, RangeQuery};
use crate::storage::matcher;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::{StreamExt, stream};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Arc, RwLock};

/// In-memory collection indexed on the document identifier
///
/// Documents live in a `BTreeMap` keyed by identifier, so cursor bounds are
/// seeks into the index rather than scans. Cloning shares the same
/// underlying data. Uses RwLock for thread-safe access.
///
/// Filters and projections are evaluated on the JSON form of each document
/// (equality, comparison and set operators, `$and`/`$or`/`$nor`).
pub struct InMemoryCollection<T: Document> {
    documents: Arc<RwLock<BTreeMap<T::Id, T>>>,
}

impl<T: Document> Clone for InMemoryCollection<T> {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
        }
    }
}

impl<T: Document> Default for InMemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> InMemoryCollection<T> {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Insert a document, replacing any document with the same identifier
    pub fn insert(&self, document: T) -> Result<Option<T>> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(documents.insert(document.id().clone(), document))
    }

    /// Insert several documents
    pub fn insert_many(&self, batch: impl IntoIterator<Item = T>) -> Result<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        for document in batch {
            documents.insert(document.id().clone(), document);
        }

        Ok(())
    }

    /// Remove a document by identifier
    pub fn remove(&self, id: &T::Id) -> Result<Option<T>> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(documents.remove(id))
    }

    pub fn len(&self) -> Result<usize> {
        let documents = self
            .documents
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(documents.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<T> InMemoryCollection<T>
where
    T: Document + Serialize + DeserializeOwned,
{
    /// Evaluate a range query into an owned snapshot
    fn run(&self, query: &RangeQuery<T::Id>) -> Result<Vec<T>> {
        let limit = usize::try_from(query.limit())
            .map_err(|_| anyhow!("limit must be positive, got {}", query.limit()))?;
        let predicate = query.filter().filter().as_map();
        let identifier_field = query.identifier_field();

        let documents = self
            .documents
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let range = match query.filter().bound() {
            Some(IdBound::GreaterThan(c)) => {
                documents.range::<T::Id, _>((Bound::Excluded(c), Bound::Unbounded))
            }
            Some(IdBound::LessThan(c)) => {
                documents.range::<T::Id, _>((Bound::Unbounded, Bound::Excluded(c)))
            }
            None => documents.range::<T::Id, _>(..),
        };
        let ordered: Box<dyn Iterator<Item = &T> + '_> = if query.order().is_ascending() {
            Box::new(range.map(|(_, doc)| doc))
        } else {
            Box::new(range.rev().map(|(_, doc)| doc))
        };

        let mut page = Vec::with_capacity(limit.min(1024));
        for document in ordered {
            if page.len() == limit {
                break;
            }

            let value = serde_json::to_value(document)
                .map_err(|e| anyhow!("Failed to serialize document: {}", e))?;
            if !matcher::matches(&value, predicate)? {
                continue;
            }

            let projected = match query.projection() {
                Some(projection) => {
                    matcher::project(value, projection.as_map(), identifier_field)?
                }
                None => value,
            };
            let document: T = serde_json::from_value(projected)
                .map_err(|e| anyhow!("Failed to deserialize projected document: {}", e))?;
            page.push(document);
        }

        Ok(page)
    }
}

#[async_trait]
impl<T> QueryExecutor<T> for InMemoryCollection<T>
where
    T: Document + Serialize + DeserializeOwned,
{
    /// Returns a stream over a snapshot taken under the read lock, so
    /// writes made while the caller consumes the page are not observed.
    async fn find(&self, query: RangeQuery<T::Id>) -> Result<DocumentStream<T>> {
        let page = self.run(&query)?;

        tracing::trace!(
            returned = page.len(),
            limit = query.limit(),
            "in-memory range query"
        );

        Ok(stream::iter(page.into_iter().map(Ok)).boxed())
    }
}
