use thiserror::Error;

/// Errors raised by the persistence gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying MongoDB driver call failed.
    #[error("document store error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    /// A document failed to (de)serialize to/from BSON.
    #[error("bson (de)serialization error: {0}")]
    Bson(#[from] bson::ser::Error),
    /// A requested document does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// The kind of document that was looked up (e.g. `"operation"`, `"wallet"`).
        kind: &'static str,
        /// The id or key used to look it up.
        id: String,
    },
    /// An id string was not a valid document identifier.
    #[error("invalid id: {0}")]
    InvalidId(String),
}

/// Result alias for [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
