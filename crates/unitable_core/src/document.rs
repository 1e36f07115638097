//! Documents and their wrapped physical form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// An application document: an open attribute map.
pub type Document = Map<String, Value>;

/// Attribute holding a document's identifier.
pub const ID_ATTRIBUTE: &str = "_id";

/// Attribute of a wrapped record holding the full document.
pub const VALUE_ATTRIBUTE: &str = "value";

/// A document as stored in the physical table.
///
/// `keys` holds the primary-key attributes and every secondary-index
/// attribute that was not sparse. Serializes as one flat map with the
/// document under [`VALUE_ATTRIBUTE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedDocument {
    /// Key attributes by physical attribute name.
    #[serde(flatten)]
    pub keys: BTreeMap<String, String>,
    /// The wrapped document, including its `_id`.
    pub value: Document,
}

impl WrappedDocument {
    /// Returns a key attribute by name.
    #[must_use]
    pub fn key(&self, attribute: &str) -> Option<&str> {
        self.keys.get(attribute).map(String::as_str)
    }

    /// Returns the wrapped document's `_id`.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.value.get(ID_ATTRIBUTE).and_then(Value::as_str)
    }

    /// Renders the flat physical attribute map.
    ///
    /// [`to_wrapped`](crate::to_wrapped) never produces a key attribute
    /// named [`VALUE_ATTRIBUTE`]; one inserted by hand is overwritten by the
    /// document.
    #[must_use]
    pub fn into_attributes(self) -> Map<String, Value> {
        let mut attributes: Map<String, Value> = self
            .keys
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect();
        attributes.insert(VALUE_ATTRIBUTE.to_string(), Value::Object(self.value));
        attributes
    }
}
