use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by catalog store operations.
pub enum VectorDbError {
    /// Could not connect to the Qdrant endpoint.
    #[error("failed to connect to Qdrant at '{url}': {message}")]
    ConnectionFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// Collection creation failed.
    #[error("failed to create collection '{collection}': {message}")]
    CreateCollectionFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// Collection does not exist.
    #[error("collection not found: {collection}")]
    CollectionNotFound {
        /// Collection name.
        collection: String,
    },

    /// Insert failed.
    #[error("failed to insert product into '{collection}': {message}")]
    InsertFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// Similarity search failed.
    #[error("failed to search in '{collection}': {message}")]
    SearchFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// Verification update failed.
    #[error("failed to update product {id} in '{collection}': {message}")]
    UpdateFailed {
        /// Collection name.
        collection: String,
        /// Product id.
        id: i64,
        /// Error message.
        message: String,
    },

    /// No product with the given id.
    #[error("product not found: {id}")]
    NotFound {
        /// Product id.
        id: i64,
    },

    /// Vector dimension mismatch. Fatal to the one operation; the index is
    /// never silently truncated or padded into accepting the vector.
    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },
}
