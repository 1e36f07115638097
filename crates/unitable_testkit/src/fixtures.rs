//! Test fixtures.
//!
//! Provides a shared table layout, the `users` / `orders` collections used
//! throughout the tests, and a deterministic id generator.

use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use unitable_core::{
    AccessPattern, CollectionConfig, Config, Context, Document, IdGenerator, Layout,
    NormalizerKind,
};

/// Table name used by every fixture layout.
pub const TABLE_NAME: &str = "my-objects";

/// Produces `prefix-1`, `prefix-2`, ... in call order.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose ids start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}

/// Layout with primary key `pkey`/`skey` and no secondary indexes.
pub fn basic_layout() -> Layout {
    Layout::new(TABLE_NAME, "pkey", "skey")
}

/// Layout with primary key `pkey`/`skey` and two secondary indexes:
/// `gsi1` (`gpk1`/`gsk1`) and the partition-only `gsi2` (`gpk2`).
pub fn indexed_layout() -> Layout {
    basic_layout()
        .index("gsi1", "gpk1", "gsk1")
        .partition_index("gsi2", "gpk2")
}

/// Root `users` collection.
///
/// - `gsi1`: lowercased `email`, sorted by `name`
/// - `gsi2`: `team.id`, only for users on a team
pub fn users_config() -> CollectionConfig {
    CollectionConfig::root("users", indexed_layout())
        .access_pattern(
            AccessPattern::new("gsi1", ["email"])
                .sort_keys(["name"])
                .normalizer(NormalizerKind::Lowercase),
        )
        .access_pattern(AccessPattern::new("gsi2", ["team.id"]))
}

/// Child `orders` collection stored under `users` through `userId`.
///
/// - `gsi1`: `status`, with the collection name as sort value
pub fn orders_config() -> CollectionConfig {
    CollectionConfig::child("orders", indexed_layout(), "users", "userId")
        .access_pattern(AccessPattern::new("gsi1", ["status"]))
}

/// Configuration holding `users` and `orders`.
pub fn users_and_orders_config() -> Config {
    Config::new()
        .collection(users_config())
        .collection(orders_config())
}

/// Context holding `users` and `orders` with random ids.
pub fn users_and_orders_context() -> Context {
    users_and_orders_config()
        .into_context()
        .expect("fixture configuration is valid")
}

/// Context holding `users` and `orders` with sequential ids.
pub fn sequential_context(prefix: &str) -> Context {
    users_and_orders_config()
        .into_context_with(SequentialIdGenerator::new(prefix))
        .expect("fixture configuration is valid")
}

/// Converts a JSON object literal into a document.
///
/// # Panics
///
/// Panics if `value` is not an object.
pub fn document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sequential_ids() {
        let generator = SequentialIdGenerator::new("t");
        assert_eq!(generator.generate(), "t-1");
        assert_eq!(generator.generate(), "t-2");
    }

    #[test]
    fn fixture_context_is_valid() {
        let ctx = users_and_orders_context();
        assert_eq!(ctx.len(), 2);
        assert!(ctx.get_root_collection("users").is_ok());
        assert!(ctx.get_child_collection("orders").is_ok());
    }

    #[test]
    fn document_from_object() {
        let doc = document(json!({ "a": 1 }));
        assert_eq!(doc.get("a"), Some(&json!(1)));
    }

    #[test]
    #[should_panic(expected = "expected a JSON object")]
    fn document_rejects_non_object() {
        let _ = document(json!([1, 2]));
    }
}
