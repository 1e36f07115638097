//! Document wrapping.
//!
//! Wrapping turns an application document into the physical record stored
//! in the shared table: the primary key pair, every non-sparse
//! secondary-index attribute, and the document itself under `value`.

use crate::collection::CollectionDefinition;
use crate::document::{Document, WrappedDocument, ID_ATTRIBUTE, VALUE_ATTRIBUTE};
use crate::error::{CoreError, CoreResult};
use crate::id::IdGenerator;
use crate::key::{assemble_primary_key_value, construct_key_value};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Wraps a document for storage in `collection`.
///
/// A missing `_id` is filled from `id_generator`. When a secondary-index
/// attribute has the same name as a primary-key attribute, the index value
/// is written last and wins; [`ContextBuilder`](crate::ContextBuilder)
/// rejects such layouts.
///
/// # Errors
///
/// - [`CoreError::InvalidConfiguration`] if a key attribute is named
///   [`VALUE_ATTRIBUTE`], which holds the document.
/// - [`CoreError::InvalidId`] if `_id` is present but not a string.
/// - [`CoreError::Persistence`] if an indexed path holds a non-string.
/// - [`CoreError::InvalidParentId`] if a child document's foreign key is
///   missing or not a string.
pub fn to_wrapped(
    collection: &CollectionDefinition,
    mut document: Document,
    id_generator: &dyn IdGenerator,
) -> CoreResult<WrappedDocument> {
    check_value_attribute(collection)?;

    let id = match document.get(ID_ATTRIBUTE) {
        Some(Value::String(id)) => id.clone(),
        Some(other) => return Err(CoreError::invalid_id(other.clone())),
        None => {
            let id = id_generator.generate();
            trace!(collection = collection.name(), id = %id, "assigned document id");
            document.insert(ID_ATTRIBUTE.to_string(), Value::String(id.clone()));
            id
        }
    };

    let mut index_keys = Vec::with_capacity(collection.wrapper_extract_keys().len());
    for extract in collection.wrapper_extract_keys() {
        match construct_key_value(
            extract.key_type,
            collection.name(),
            &extract.value_paths,
            &extract.options,
            &document,
        )? {
            Some(value) => index_keys.push((extract.key.clone(), value)),
            None => debug!(
                collection = collection.name(),
                attribute = %extract.key,
                "omitting sparse index key"
            ),
        }
    }

    let (partition_value, sort_value) = match collection {
        CollectionDefinition::Child(child) => {
            let parent_id = match child.foreign_key_path.resolve_in(&document) {
                Some(Value::String(parent_id)) => parent_id,
                other => {
                    return Err(CoreError::invalid_parent_id(
                        other.cloned(),
                        &child.name,
                        &child.parent_collection_name,
                    ))
                }
            };
            (
                assemble_primary_key_value(&child.parent_collection_name, parent_id),
                assemble_primary_key_value(&child.name, &id),
            )
        }
        CollectionDefinition::Root(root) => {
            let key = assemble_primary_key_value(&root.name, &id);
            (key.clone(), key)
        }
    };

    let primary_key = &collection.layout().primary_key;
    let mut keys = BTreeMap::new();
    keys.insert(primary_key.partition_key.clone(), partition_value);
    keys.insert(primary_key.sort_key.clone(), sort_value);
    keys.extend(index_keys);

    trace!(
        collection = collection.name(),
        id = %id,
        attributes = keys.len(),
        "wrapped document"
    );

    Ok(WrappedDocument {
        keys,
        value: document,
    })
}

fn check_value_attribute(collection: &CollectionDefinition) -> CoreResult<()> {
    let primary_key = &collection.layout().primary_key;
    let clash = [&primary_key.partition_key, &primary_key.sort_key]
        .into_iter()
        .chain(collection.wrapper_extract_keys().iter().map(|extract| &extract.key))
        .any(|attribute| attribute == VALUE_ATTRIBUTE);

    if clash {
        return Err(CoreError::invalid_configuration(format!(
            "collection {} writes a key attribute named {VALUE_ATTRIBUTE}",
            collection.name()
        )));
    }
    Ok(())
}

/// Returns the document held by a wrapped record.
#[must_use]
pub fn unwrap(wrapped: WrappedDocument) -> Document {
    wrapped.value
}
