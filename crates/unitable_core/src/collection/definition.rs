//! Compiled collection definitions.

use crate::access_pattern::{AccessPatternOptions, KeyType};
use crate::key_path::KeyPath;
use crate::layout::Layout;

/// Derivation rule for one secondary-index key attribute.
#[derive(Debug, Clone)]
pub struct WrapperExtractKey {
    /// Whether the attribute is an index partition or sort key.
    pub key_type: KeyType,
    /// Physical attribute name written to the wrapped record.
    pub key: String,
    /// Document paths joined into the attribute value.
    pub value_paths: Vec<KeyPath>,
    /// Derivation options.
    pub options: AccessPatternOptions,
}

impl WrapperExtractKey {
    /// Creates an extract key without options.
    pub fn new<I, P>(key_type: KeyType, key: impl Into<String>, value_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<KeyPath>,
    {
        Self {
            key_type,
            key: key.into(),
            value_paths: value_paths.into_iter().map(Into::into).collect(),
            options: AccessPatternOptions::default(),
        }
    }

    /// Sets the derivation options.
    #[must_use]
    pub fn with_options(mut self, options: AccessPatternOptions) -> Self {
        self.options = options;
        self
    }
}

/// A collection whose documents own their partition.
#[derive(Debug, Clone)]
pub struct RootCollectionDefinition {
    /// Collection name, used as key prefix.
    pub name: String,
    /// Physical table layout.
    pub layout: Layout,
    /// Secondary-index key derivation rules.
    pub wrapper_extract_keys: Vec<WrapperExtractKey>,
}

impl RootCollectionDefinition {
    /// Creates a root collection with no secondary-index keys.
    pub fn new(name: impl Into<String>, layout: Layout) -> Self {
        Self {
            name: name.into(),
            layout,
            wrapper_extract_keys: Vec::new(),
        }
    }

    /// Adds a secondary-index key rule.
    #[must_use]
    pub fn extract_key(mut self, key: WrapperExtractKey) -> Self {
        self.wrapper_extract_keys.push(key);
        self
    }
}

/// A collection whose documents are stored in a parent's partition.
#[derive(Debug, Clone)]
pub struct ChildCollectionDefinition {
    /// Collection name, used as sort-key prefix.
    pub name: String,
    /// Physical table layout.
    pub layout: Layout,
    /// Secondary-index key derivation rules.
    pub wrapper_extract_keys: Vec<WrapperExtractKey>,
    /// Name of the parent (root) collection.
    pub parent_collection_name: String,
    /// Path of the parent's `_id` inside child documents.
    pub foreign_key_path: KeyPath,
}

impl ChildCollectionDefinition {
    /// Creates a child collection with no secondary-index keys.
    pub fn new(
        name: impl Into<String>,
        layout: Layout,
        parent_collection_name: impl Into<String>,
        foreign_key_path: impl Into<KeyPath>,
    ) -> Self {
        Self {
            name: name.into(),
            layout,
            wrapper_extract_keys: Vec::new(),
            parent_collection_name: parent_collection_name.into(),
            foreign_key_path: foreign_key_path.into(),
        }
    }

    /// Adds a secondary-index key rule.
    #[must_use]
    pub fn extract_key(mut self, key: WrapperExtractKey) -> Self {
        self.wrapper_extract_keys.push(key);
        self
    }
}

/// A root or child collection definition.
#[derive(Debug, Clone)]
pub enum CollectionDefinition {
    /// Documents own their partition.
    Root(RootCollectionDefinition),
    /// Documents live in a parent's partition.
    Child(ChildCollectionDefinition),
}

impl CollectionDefinition {
    /// Returns the collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            CollectionDefinition::Root(root) => &root.name,
            CollectionDefinition::Child(child) => &child.name,
        }
    }

    /// Returns the physical layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        match self {
            CollectionDefinition::Root(root) => &root.layout,
            CollectionDefinition::Child(child) => &child.layout,
        }
    }

    /// Returns the secondary-index key rules.
    #[must_use]
    pub fn wrapper_extract_keys(&self) -> &[WrapperExtractKey] {
        match self {
            CollectionDefinition::Root(root) => &root.wrapper_extract_keys,
            CollectionDefinition::Child(child) => &child.wrapper_extract_keys,
        }
    }

    /// Returns the parent collection name for child collections.
    #[must_use]
    pub fn parent_collection_name(&self) -> Option<&str> {
        match self {
            CollectionDefinition::Root(_) => None,
            CollectionDefinition::Child(child) => Some(&child.parent_collection_name),
        }
    }

    /// Returns true for root collections.
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self, CollectionDefinition::Root(_))
    }
}

impl From<RootCollectionDefinition> for CollectionDefinition {
    fn from(root: RootCollectionDefinition) -> Self {
        CollectionDefinition::Root(root)
    }
}

impl From<ChildCollectionDefinition> for CollectionDefinition {
    fn from(child: ChildCollectionDefinition) -> Self {
        CollectionDefinition::Child(child)
    }
}
