//! Declarative collection configuration.
//!
//! Collections are usually described in terms of query access patterns,
//! each mapped onto one secondary index of the layout. Compiling a
//! [`CollectionConfig`] turns those into the per-attribute extraction rules
//! the wrapper works from.

use crate::access_pattern::{AccessPattern, AccessPatternOptions, KeyType};
use crate::collection::definition::{
    ChildCollectionDefinition, CollectionDefinition, RootCollectionDefinition, WrapperExtractKey,
};
use crate::error::{CoreError, CoreResult};
use crate::key_path::KeyPath;
use crate::layout::Layout;
use serde::{Deserialize, Serialize};

/// Parent reference of a child collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParentConfig {
    /// Name of the parent collection.
    pub collection_name: String,
    /// Path of the parent's `_id` inside child documents.
    pub foreign_key_path: KeyPath,
}

/// Serializable description of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CollectionConfig {
    /// Collection name.
    pub name: String,
    /// Physical table layout.
    pub layout: Layout,
    /// Query access patterns, one per secondary index.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_patterns: Vec<AccessPattern>,
    /// Parent reference; `None` for root collections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentConfig>,
}

impl CollectionConfig {
    /// Creates a root collection config.
    pub fn root(name: impl Into<String>, layout: Layout) -> Self {
        Self {
            name: name.into(),
            layout,
            access_patterns: Vec::new(),
            parent: None,
        }
    }

    /// Creates a child collection config.
    pub fn child(
        name: impl Into<String>,
        layout: Layout,
        parent_collection_name: impl Into<String>,
        foreign_key_path: impl Into<KeyPath>,
    ) -> Self {
        Self {
            name: name.into(),
            layout,
            access_patterns: Vec::new(),
            parent: Some(ParentConfig {
                collection_name: parent_collection_name.into(),
                foreign_key_path: foreign_key_path.into(),
            }),
        }
    }

    /// Adds an access pattern.
    #[must_use]
    pub fn access_pattern(mut self, pattern: AccessPattern) -> Self {
        self.access_patterns.push(pattern);
        self
    }

    /// Compiles the configuration into a collection definition.
    ///
    /// Each access pattern yields an index partition rule and, when the
    /// index has a sort attribute, a sort rule. A pattern without
    /// `sort_keys` on such an index gets a sort rule with no paths, so the
    /// record is still indexed under the collection name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfiguration`] if a pattern names an
    /// index missing from the layout, or declares sort keys for an index
    /// without a sort attribute.
    pub fn into_definition(self) -> CoreResult<CollectionDefinition> {
        let wrapper_extract_keys = self.extract_keys()?;

        Ok(match self.parent {
            None => CollectionDefinition::Root(RootCollectionDefinition {
                name: self.name,
                layout: self.layout,
                wrapper_extract_keys,
            }),
            Some(parent) => CollectionDefinition::Child(ChildCollectionDefinition {
                name: self.name,
                layout: self.layout,
                wrapper_extract_keys,
                parent_collection_name: parent.collection_name,
                foreign_key_path: parent.foreign_key_path,
            }),
        })
    }

    fn extract_keys(&self) -> CoreResult<Vec<WrapperExtractKey>> {
        let mut keys = Vec::with_capacity(self.access_patterns.len() * 2);

        for pattern in &self.access_patterns {
            let index = self.layout.index_key(&pattern.index_name).ok_or_else(|| {
                CoreError::invalid_configuration(format!(
                    "collection {} references unknown index {}",
                    self.name, pattern.index_name
                ))
            })?;
            let options = AccessPatternOptions::from(&pattern.options);

            keys.push(WrapperExtractKey {
                key_type: KeyType::Partition,
                key: index.partition_key.clone(),
                value_paths: pattern.partition_keys.clone(),
                options: options.clone(),
            });

            match (&index.sort_key, &pattern.sort_keys) {
                (Some(sort_key), sort_paths) => keys.push(WrapperExtractKey {
                    key_type: KeyType::Sort,
                    key: sort_key.clone(),
                    value_paths: sort_paths.clone().unwrap_or_default(),
                    options,
                }),
                (None, Some(_)) => {
                    return Err(CoreError::invalid_configuration(format!(
                        "collection {} declares sort keys for index {} which has no sort key",
                        self.name, pattern.index_name
                    )));
                }
                (None, None) => {}
            }
        }

        Ok(keys)
    }
}
