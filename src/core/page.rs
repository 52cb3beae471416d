//! Materialized page with the cursor for the next request

use crate::core::document::Document;
use crate::core::executor::DocumentStream;
use anyhow::Result;
use futures::TryStreamExt;
use serde::Serialize;

/// One page of documents
///
/// `next_cursor` is the identifier of the last document when the page came
/// back full, i.e. when more documents may follow. A short page means the
/// walk is over. No totals or backward links are computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "T: Serialize, T::Id: Serialize"))]
pub struct Page<T: Document> {
    /// The documents, in index order
    pub items: Vec<T>,

    /// Cursor for the following page, if one may exist
    pub next_cursor: Option<T::Id>,
}

impl<T: Document> Page<T> {
    /// Drain a document stream into a page of at most `limit` items
    ///
    /// Stops at the first stream error and returns it unchanged.
    pub async fn collect(mut stream: DocumentStream<T>, limit: i64) -> Result<Self> {
        let cap = usize::try_from(limit).unwrap_or(0);
        let mut items = Vec::with_capacity(cap.min(1024));

        while items.len() < cap {
            match stream.try_next().await? {
                Some(doc) => items.push(doc),
                None => break,
            }
        }

        Ok(Self::from_items(items, limit))
    }

    /// Build a page from already fetched items
    pub fn from_items(items: Vec<T>, limit: i64) -> Self {
        let full = limit > 0 && i64::try_from(items.len()).is_ok_and(|n| n >= limit);
        let next_cursor = if full {
            items.last().map(|doc| doc.id().clone())
        } else {
            None
        };

        Self { items, next_cursor }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if another page may follow
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }
}
