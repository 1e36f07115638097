//! Physical table layout.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Names of the two physical attributes holding a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrimaryKey {
    /// Partition key attribute name.
    pub partition_key: String,
    /// Sort key attribute name.
    pub sort_key: String,
}

/// Attribute names of one secondary index.
///
/// An index without a sort attribute is partition-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IndexKey {
    /// Partition key attribute name.
    pub partition_key: String,
    /// Sort key attribute name, if the index has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<String>,
}

/// The physical table shared by a set of collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Layout {
    /// Physical table name.
    pub table_name: String,
    /// Primary key attribute names.
    pub primary_key: PrimaryKey,
    /// Secondary indexes keyed by index name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub index_keys: BTreeMap<String, IndexKey>,
}

impl Layout {
    /// Creates a layout with no secondary indexes.
    pub fn new(
        table_name: impl Into<String>,
        partition_key: impl Into<String>,
        sort_key: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            primary_key: PrimaryKey {
                partition_key: partition_key.into(),
                sort_key: sort_key.into(),
            },
            index_keys: BTreeMap::new(),
        }
    }

    /// Adds a secondary index with partition and sort attributes.
    #[must_use]
    pub fn index(
        mut self,
        index_name: impl Into<String>,
        partition_key: impl Into<String>,
        sort_key: impl Into<String>,
    ) -> Self {
        self.index_keys.insert(
            index_name.into(),
            IndexKey {
                partition_key: partition_key.into(),
                sort_key: Some(sort_key.into()),
            },
        );
        self
    }

    /// Adds a partition-only secondary index.
    #[must_use]
    pub fn partition_index(
        mut self,
        index_name: impl Into<String>,
        partition_key: impl Into<String>,
    ) -> Self {
        self.index_keys.insert(
            index_name.into(),
            IndexKey {
                partition_key: partition_key.into(),
                sort_key: None,
            },
        );
        self
    }

    /// Looks up a secondary index by name.
    #[must_use]
    pub fn index_key(&self, index_name: &str) -> Option<&IndexKey> {
        self.index_keys.get(index_name)
    }
}
