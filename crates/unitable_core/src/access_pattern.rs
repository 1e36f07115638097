//! Access patterns and their key-derivation options.

use crate::key_path::KeyPath;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Which half of a composite key a value is assembled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// Partition (hash) key.
    Partition,
    /// Sort (range) key.
    Sort,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Partition => write!(f, "partition"),
            KeyType::Sort => write!(f, "sort"),
        }
    }
}

/// Transform applied to every present extracted string before assembly.
pub type StringNormalizer = Arc<dyn Fn(&KeyPath, &str) -> String + Send + Sync>;

/// Built-in normalizers that can be named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizerKind {
    /// Unicode lowercase.
    Lowercase,
    /// Unicode uppercase.
    Uppercase,
    /// Strip leading and trailing whitespace.
    Trim,
}

impl NormalizerKind {
    /// Returns the normalizer function for this kind.
    #[must_use]
    pub fn normalizer(self) -> StringNormalizer {
        match self {
            NormalizerKind::Lowercase => Arc::new(|_: &KeyPath, value: &str| value.to_lowercase()),
            NormalizerKind::Uppercase => Arc::new(|_: &KeyPath, value: &str| value.to_uppercase()),
            NormalizerKind::Trim => Arc::new(|_: &KeyPath, value: &str| value.trim().to_string()),
        }
    }
}

/// Options controlling how an access pattern's key values are derived.
#[derive(Clone, Default)]
pub struct AccessPatternOptions {
    string_normalizer: Option<StringNormalizer>,
}

impl AccessPatternOptions {
    /// Creates options with no normalizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom string normalizer.
    #[must_use]
    pub fn string_normalizer<F>(mut self, normalizer: F) -> Self
    where
        F: Fn(&KeyPath, &str) -> String + Send + Sync + 'static,
    {
        self.string_normalizer = Some(Arc::new(normalizer));
        self
    }

    /// Sets one of the built-in normalizers.
    #[must_use]
    pub fn normalizer_kind(mut self, kind: NormalizerKind) -> Self {
        self.string_normalizer = Some(kind.normalizer());
        self
    }

    /// Applies the normalizer, if any, to an extracted value.
    #[must_use]
    pub fn normalize(&self, path: &KeyPath, value: &str) -> String {
        match &self.string_normalizer {
            Some(normalize) => normalize(path, value),
            None => value.to_string(),
        }
    }

    /// Returns true if a normalizer is configured.
    #[must_use]
    pub fn has_normalizer(&self) -> bool {
        self.string_normalizer.is_some()
    }
}

impl fmt::Debug for AccessPatternOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessPatternOptions")
            .field("string_normalizer", &self.string_normalizer.is_some())
            .finish()
    }
}

/// Serializable form of [`AccessPatternOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AccessPatternOptionsConfig {
    /// Named normalizer applied to extracted strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_normalizer: Option<NormalizerKind>,
}

impl From<&AccessPatternOptionsConfig> for AccessPatternOptions {
    fn from(config: &AccessPatternOptionsConfig) -> Self {
        match config.string_normalizer {
            Some(kind) => AccessPatternOptions::new().normalizer_kind(kind),
            None => AccessPatternOptions::new(),
        }
    }
}

/// A query access pattern mapped onto one secondary index of a layout.
///
/// `partition_keys` and `sort_keys` list the document paths whose values
/// are joined into the index's partition and sort attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AccessPattern {
    /// Name of the index in [`Layout::index_keys`](crate::Layout).
    pub index_name: String,
    /// Paths assembled into the index partition attribute.
    #[serde(default)]
    pub partition_keys: Vec<KeyPath>,
    /// Paths assembled into the index sort attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_keys: Option<Vec<KeyPath>>,
    /// Key-derivation options.
    #[serde(default)]
    pub options: AccessPatternOptionsConfig,
}

impl AccessPattern {
    /// Creates an access pattern with partition paths only.
    pub fn new<I, P>(index_name: impl Into<String>, partition_keys: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<KeyPath>,
    {
        Self {
            index_name: index_name.into(),
            partition_keys: partition_keys.into_iter().map(Into::into).collect(),
            sort_keys: None,
            options: AccessPatternOptionsConfig::default(),
        }
    }

    /// Sets the sort-key paths.
    #[must_use]
    pub fn sort_keys<I, P>(mut self, sort_keys: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<KeyPath>,
    {
        self.sort_keys = Some(sort_keys.into_iter().map(Into::into).collect());
        self
    }

    /// Sets a named string normalizer.
    #[must_use]
    pub fn normalizer(mut self, kind: NormalizerKind) -> Self {
        self.options.string_normalizer = Some(kind);
        self
    }
}
