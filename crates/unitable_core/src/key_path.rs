//! Attribute paths into documents.
//!
//! A [`KeyPath`] names a location inside a document by a sequence of
//! segments. Object members are addressed by name and array elements by
//! decimal index, so `items.0.sku` reaches the `sku` of the first item.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Ordered attribute-name segments locating a value inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "KeyPathRepr", into = "Vec<String>")]
pub struct KeyPath(Vec<String>);

/// Configuration accepts either `"a.b"` or `["a", "b"]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum KeyPathRepr {
    Dotted(String),
    Segments(Vec<String>),
}

impl From<KeyPathRepr> for KeyPath {
    fn from(repr: KeyPathRepr) -> Self {
        match repr {
            KeyPathRepr::Dotted(s) => Self::parse(&s),
            KeyPathRepr::Segments(segments) => Self(segments),
        }
    }
}

impl From<KeyPath> for Vec<String> {
    fn from(path: KeyPath) -> Self {
        path.0
    }
}

impl KeyPath {
    /// Creates a path from explicit segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parses a dotted path such as `address.city`.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self(path.split('.').map(str::to_string).collect())
    }

    /// Returns the path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolves the path against a document.
    ///
    /// Returns `None` when any segment is missing or the path is empty.
    /// `null` is a present value and is returned as such.
    #[must_use]
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        let (first, rest) = self.0.split_first()?;
        rest.iter()
            .try_fold(step(document, first)?, |current, segment| step(current, segment))
    }

    /// Resolves the path against a document's top-level attribute map.
    ///
    /// Agrees with [`KeyPath::resolve`] on the same document as an object.
    #[must_use]
    pub fn resolve_in<'a>(&self, document: &'a serde_json::Map<String, Value>) -> Option<&'a Value> {
        let (first, rest) = self.0.split_first()?;
        rest.iter()
            .try_fold(document.get(first)?, |current, segment| step(current, segment))
    }
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => items.get(segment.parse::<usize>().ok()?),
        _ => None,
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for KeyPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn parse_dotted() {
        let path = KeyPath::parse("address.city");
        assert_eq!(path.segments(), &["address", "city"]);
        assert_eq!(path.to_string(), "address.city");
    }

    #[test]
    fn resolve_nested() {
        let doc = json!({ "address": { "city": "Nairobi" } });
        let path = KeyPath::parse("address.city");
        assert_eq!(path.resolve(&doc), Some(&json!("Nairobi")));
    }

    #[test]
    fn resolve_missing_segment_is_absent() {
        let doc = json!({ "address": { "city": "Nairobi" } });
        assert_eq!(KeyPath::parse("address.zip").resolve(&doc), None);
        assert_eq!(KeyPath::parse("phone.home").resolve(&doc), None);
        // Traversing through a scalar is absent, not an error
        assert_eq!(KeyPath::parse("address.city.name").resolve(&doc), None);
    }

    #[test]
    fn resolve_array_index() {
        let doc = json!({ "items": [{ "sku": "a1" }, { "sku": "b2" }] });
        assert_eq!(KeyPath::parse("items.1.sku").resolve(&doc), Some(&json!("b2")));
        assert_eq!(KeyPath::parse("items.5.sku").resolve(&doc), None);
        assert_eq!(KeyPath::parse("items.x.sku").resolve(&doc), None);
    }

    #[test]
    fn resolve_null_is_present() {
        let doc = json!({ "email": null });
        assert_eq!(KeyPath::parse("email").resolve(&doc), Some(&Value::Null));
    }

    #[test]
    fn resolve_in_matches_resolve() {
        let doc = json!({ "a": { "b": "c" } });
        let map = doc.as_object().unwrap();
        let path = KeyPath::parse("a.b");
        assert_eq!(path.resolve_in(map), path.resolve(&doc));
    }

    #[test]
    fn empty_path_is_absent() {
        let doc = json!({ "a": "x" });
        let empty = KeyPath::new(Vec::<String>::new());
        assert!(empty.is_empty());
        assert_eq!(empty.resolve(&doc), None);
        assert_eq!(empty.resolve_in(doc.as_object().unwrap()), None);
    }

    proptest! {
        #[test]
        fn dotted_form_round_trips(segments in prop::collection::vec("[a-z0-9_]{1,8}", 1..5)) {
            let path = KeyPath::new(segments.clone());
            let reparsed: KeyPath = path.to_string().parse().unwrap();
            prop_assert_eq!(reparsed.segments(), segments.as_slice());
        }

        #[test]
        fn resolve_agrees_with_resolve_in(
            segments in prop::collection::vec("[a-c]{1,2}", 0..4),
            doc in prop::collection::btree_map("[a-c]{1,2}", "[a-z]{0,4}", 0..4),
        ) {
            let map: serde_json::Map<String, Value> =
                doc.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
            let value = Value::Object(map.clone());
            let path = KeyPath::new(segments);
            prop_assert_eq!(path.resolve(&value), path.resolve_in(&map));
        }
    }

    #[test]
    fn deserialize_both_forms() {
        let dotted: KeyPath = serde_json::from_value(json!("a.b")).unwrap();
        let segments: KeyPath = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(dotted, segments);
        assert_eq!(serde_json::to_value(&dotted).unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn segment_array_keeps_dots() {
        let path: KeyPath = serde_json::from_value(json!(["a.b"])).unwrap();
        assert_eq!(path.len(), 1);
        let doc = json!({ "a.b": "x" });
        assert_eq!(path.resolve(&doc), Some(&json!("x")));
    }
}
