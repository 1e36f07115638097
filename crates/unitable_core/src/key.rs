//! Key assembly.
//!
//! Every physical key value is prefixed with the owning collection's name
//! followed by [`SEPARATOR`], so values from different collections can
//! share a table (and an index) without colliding.
//!
//! Secondary-index values follow a three-way policy:
//!
//! - no paths declared: the value is the collection name alone, so the
//!   record always appears in the index;
//! - paths declared but all absent: no value, the attribute is omitted and
//!   the record stays out of the index;
//! - otherwise: the collection name and every value joined by the
//!   separator, with absent values rendered as empty segments.

use crate::access_pattern::{AccessPatternOptions, KeyType};
use crate::document::Document;
use crate::error::{CoreError, CoreResult};
use crate::key_path::KeyPath;
use serde_json::Value;

/// Token placed between the collection name and each key component.
pub const SEPARATOR: &str = "|-|";

/// Assembles the primary key value of a document.
#[must_use]
pub fn assemble_primary_key_value(collection_name: &str, id: &str) -> String {
    let mut key = String::with_capacity(collection_name.len() + SEPARATOR.len() + id.len());
    key.push_str(collection_name);
    key.push_str(SEPARATOR);
    key.push_str(id);
    key
}

/// Splits a primary key value into its collection name and id.
///
/// Returns `None` if the value contains no separator.
#[must_use]
pub fn parse_primary_key_value(value: &str) -> Option<(&str, &str)> {
    value.split_once(SEPARATOR)
}

/// Assembles a secondary-index value from already-extracted components.
///
/// `key_type` does not change the result; partition and sort values are
/// assembled the same way.
#[must_use]
pub fn assemble_indexed_value(
    _key_type: KeyType,
    collection_name: &str,
    values: &[Option<String>],
) -> Option<String> {
    if values.is_empty() {
        return Some(collection_name.to_string());
    }
    if values.iter().all(Option::is_none) {
        return None;
    }

    let mut key = String::from(collection_name);
    for value in values {
        key.push_str(SEPARATOR);
        if let Some(value) = value {
            key.push_str(value);
        }
    }
    Some(key)
}

/// Extracts `value_paths` from `document` and assembles an index value.
///
/// # Errors
///
/// Returns [`CoreError::Persistence`] if a path resolves to a value that is
/// present but not a string.
pub fn construct_key_value(
    key_type: KeyType,
    collection_name: &str,
    value_paths: &[KeyPath],
    options: &AccessPatternOptions,
    document: &Document,
) -> CoreResult<Option<String>> {
    let values = value_paths
        .iter()
        .map(|path| match path.resolve_in(document) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(options.normalize(path, s))),
            Some(_) => Err(CoreError::persistence(format!(
                "indexed value at path {path} was not a string for collection {collection_name}"
            ))),
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(assemble_indexed_value(key_type, collection_name, &values))
}
