//! Context configuration.
//!
//! Collections can be declared in JSON and loaded at startup:
//!
//! ```json
//! {
//!   "collections": [
//!     {
//!       "name": "users",
//!       "layout": {
//!         "tableName": "my-objects",
//!         "primaryKey": { "partitionKey": "pkey", "sortKey": "skey" },
//!         "indexKeys": { "gsi1": { "partitionKey": "gpk1", "sortKey": "gsk1" } }
//!       },
//!       "accessPatterns": [
//!         { "indexName": "gsi1", "partitionKeys": ["email"],
//!           "options": { "stringNormalizer": "lowercase" } }
//!       ]
//!     },
//!     {
//!       "name": "orders",
//!       "layout": { "tableName": "my-objects",
//!                   "primaryKey": { "partitionKey": "pkey", "sortKey": "skey" } },
//!       "parent": { "collectionName": "users", "foreignKeyPath": "userId" }
//!     }
//!   ]
//! }
//! ```

use crate::collection::CollectionConfig;
use crate::context::{Context, ContextBuilder};
use crate::error::CoreResult;
use crate::id::IdGenerator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Configuration for building a [`Context`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Collections to register.
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
}

impl Config {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collection.
    #[must_use]
    pub fn collection(mut self, collection: CollectionConfig) -> Self {
        self.collections.push(collection);
        self
    }

    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Json`](crate::CoreError::Json) on malformed input.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`](crate::CoreError::Io) if the file cannot be
    /// read and [`CoreError::Json`](crate::CoreError::Json) if it is malformed.
    pub fn from_path(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading collection configuration");
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Compiles every collection into a context builder.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`CollectionConfig::into_definition`].
    pub fn into_builder(self) -> CoreResult<ContextBuilder> {
        self.collections
            .into_iter()
            .try_fold(ContextBuilder::new(), |builder, collection| {
                Ok(builder.collection(collection.into_definition()?))
            })
    }

    /// Builds a validated context with the default id generator.
    ///
    /// # Errors
    ///
    /// Returns compilation or validation errors.
    pub fn into_context(self) -> CoreResult<Context> {
        self.into_builder()?.build()
    }

    /// Builds a validated context using `id_generator`.
    ///
    /// # Errors
    ///
    /// Returns compilation or validation errors.
    pub fn into_context_with(self, id_generator: impl IdGenerator + 'static) -> CoreResult<Context> {
        self.into_builder()?.id_generator(id_generator).build()
    }
}
