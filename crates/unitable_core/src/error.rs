//! Error types for UniTable core.

use serde_json::Value;
use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while resolving collections or wrapping documents.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No definition is registered under the requested name.
    #[error("collection not found: {name}")]
    CollectionNotFound {
        /// Name of the collection.
        name: String,
    },

    /// The document carries an `_id` that is not a string.
    #[error("invalid _id: expected a string, got {value}")]
    InvalidId {
        /// The offending `_id` value.
        value: Value,
    },

    /// A child document's foreign key does not resolve to a string.
    #[error(
        "invalid parent id {} for collection {collection} (parent collection {parent_collection})",
        describe_parent_id(.value)
    )]
    InvalidParentId {
        /// The value found at the foreign key path, `None` when missing.
        value: Option<Value>,
        /// The child collection being written.
        collection: String,
        /// The parent collection the foreign key points into.
        parent_collection: String,
    },

    /// A declared key path resolved to a value that cannot be indexed.
    #[error("persistence error: {message}")]
    Persistence {
        /// Description of the failure.
        message: String,
    },

    /// Collection definitions or configuration are inconsistent.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the problem.
        message: String,
    },

    /// Configuration could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn describe_parent_id(value: &Option<Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "<missing>".to_string(),
    }
}

impl CoreError {
    /// Creates a collection not found error.
    pub fn collection_not_found(name: impl Into<String>) -> Self {
        Self::CollectionNotFound { name: name.into() }
    }

    /// Creates an invalid id error.
    pub fn invalid_id(value: Value) -> Self {
        Self::InvalidId { value }
    }

    /// Creates an invalid parent id error.
    pub fn invalid_parent_id(
        value: Option<Value>,
        collection: impl Into<String>,
        parent_collection: impl Into<String>,
    ) -> Self {
        Self::InvalidParentId {
            value,
            collection: collection.into(),
            parent_collection: parent_collection.into(),
        }
    }

    /// Creates a persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}
