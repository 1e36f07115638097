//! Benchmark utilities.

use serde_json::{json, Value};
use unitable_core::Document;

/// Generate a user document with `extra` padding attributes.
pub fn user_document(n: usize, extra: usize) -> Document {
    let mut doc = json!({
        "_id": format!("user-{n}"),
        "name": format!("User {n}"),
        "email": format!("User{n}@Example.com"),
        "team": { "id": format!("team-{}", n % 16) },
    });
    if let Value::Object(map) = &mut doc {
        for i in 0..extra {
            map.insert(format!("field_{i}"), Value::String("x".repeat(32)));
        }
    }
    unitable_testkit::document(doc)
}

/// Generate a batch of user documents without ids.
pub fn anonymous_users(count: usize) -> Vec<Document> {
    (0..count)
        .map(|n| {
            let mut doc = user_document(n, 0);
            doc.remove("_id");
            doc
        })
        .collect()
}
