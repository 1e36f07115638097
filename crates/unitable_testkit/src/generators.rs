//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random test data
//! that maintains required invariants.

use proptest::prelude::*;
use serde_json::{Map, Value};
use unitable_core::{Document, ID_ATTRIBUTE};

/// Strategy for generating valid collection names.
///
/// Names never contain the key separator.
pub fn collection_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9_-]{0,31}").expect("Invalid regex")
}

/// Strategy for generating document ids.
pub fn id_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_.:-]{1,40}").expect("Invalid regex")
}

/// Strategy for generating index components: present strings or absent.
pub fn key_component_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::string::string_regex("[a-z0-9@. ]{0,12}").expect("Invalid regex"))
}

/// Strategy for generating arbitrary JSON values of bounded depth.
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

/// Strategy for generating documents without an `_id`.
///
/// Keys are lowercase letters only, so `_id` never appears.
pub fn document_strategy() -> impl Strategy<Value = Document> {
    prop::collection::btree_map("[a-z]{1,10}", json_value_strategy(), 0..6)
        .prop_map(|map| map.into_iter().collect::<Map<String, Value>>())
}

/// Strategy for generating documents carrying a string `_id`.
pub fn document_with_id_strategy() -> impl Strategy<Value = Document> {
    (document_strategy(), id_strategy()).prop_map(|(mut doc, id)| {
        doc.insert(ID_ATTRIBUTE.to_string(), Value::String(id));
        doc
    })
}
