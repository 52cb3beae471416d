//! Query executor implementations for different backends

pub mod in_memory;
pub(crate) mod matcher;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::InMemoryCollection;
#[cfg(feature = "mongodb_backend")]
pub use self::mongodb::MongoCollection;
