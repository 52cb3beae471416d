//! Document and identifier traits

use serde::Serialize;
use std::fmt::Debug;

/// Bound for values usable as a pagination key.
///
/// An identifier must be totally ordered (the index walks it in order),
/// serializable (executors embed it in their range predicates) and cheap
/// enough to clone into the next request.
///
/// Implemented automatically for every type meeting the bounds, e.g. `i64`,
/// `String`, `uuid::Uuid` (v7 ids are monotonic) or a BSON `ObjectId`.
pub trait Identifier: Clone + Ord + Debug + Serialize + Send + Sync + 'static {}

impl<I> Identifier for I where I: Clone + Ord + Debug + Serialize + Send + Sync + 'static {}

/// A record stored in a paginated collection.
///
/// The paginator never looks inside a document. Only executors and the
/// [`Page`](crate::core::page::Page) helper read the identifier.
///
/// # Example
///
/// ```rust
/// use keyset::core::Document;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Serialize, Deserialize)]
/// struct Order {
///     #[serde(rename = "_id")]
///     id: i64,
///     customer: String,
/// }
///
/// impl Document for Order {
///     type Id = i64;
///
///     fn id(&self) -> &i64 {
///         &self.id
///     }
/// }
/// ```
pub trait Document: Send + Sync + 'static {
    /// The unique, totally ordered key of this document type
    type Id: Identifier;

    /// Get the identifier of this document
    fn id(&self) -> &Self::Id;
}
