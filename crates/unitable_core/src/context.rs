//! Collection lookup context.
//!
//! A [`Context`] is built once from the full set of collection definitions
//! and is read-only afterwards. It is `Send + Sync` and is meant to be
//! shared by reference (or `Arc`) with every caller that wraps documents.

use crate::collection::{ChildCollectionDefinition, CollectionDefinition, RootCollectionDefinition};
use crate::document::{Document, WrappedDocument, VALUE_ATTRIBUTE};
use crate::error::{CoreError, CoreResult};
use crate::id::{IdGenerator, UuidGenerator};
use crate::key::SEPARATOR;
use crate::wrapper::to_wrapped;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Read-only registry of collection definitions.
pub struct Context {
    definitions: HashMap<String, CollectionDefinition>,
    root_definitions: HashMap<String, RootCollectionDefinition>,
    child_definitions: HashMap<String, ChildCollectionDefinition>,
    id_generator: Arc<dyn IdGenerator>,
}

impl Context {
    /// Starts building a context.
    #[must_use]
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    /// Builds a context from definitions using the default id generator.
    ///
    /// # Errors
    ///
    /// See [`ContextBuilder::build`].
    pub fn new<I>(definitions: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = CollectionDefinition>,
    {
        definitions
            .into_iter()
            .fold(ContextBuilder::new(), |builder, definition| {
                builder.collection(definition)
            })
            .build()
    }

    /// Looks up any collection by name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CollectionNotFound`] if no collection has this name.
    pub fn get_collection(&self, name: &str) -> CoreResult<&CollectionDefinition> {
        self.definitions
            .get(name)
            .ok_or_else(|| CoreError::collection_not_found(name))
    }

    /// Looks up a root collection by name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CollectionNotFound`] if no root collection has
    /// this name.
    pub fn get_root_collection(&self, name: &str) -> CoreResult<&RootCollectionDefinition> {
        self.root_definitions
            .get(name)
            .ok_or_else(|| CoreError::collection_not_found(name))
    }

    /// Looks up a child collection by name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CollectionNotFound`] if no child collection has
    /// this name.
    pub fn get_child_collection(&self, name: &str) -> CoreResult<&ChildCollectionDefinition> {
        self.child_definitions
            .get(name)
            .ok_or_else(|| CoreError::collection_not_found(name))
    }

    /// Wraps a document for the named collection.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CollectionNotFound`] for unknown collections and
    /// any error of [`to_wrapped`].
    pub fn wrap(&self, collection: &str, document: Document) -> CoreResult<WrappedDocument> {
        let definition = self.get_collection(collection)?;
        to_wrapped(definition, document, self.id_generator.as_ref())
    }

    /// Returns the id generator used by [`Context::wrap`].
    #[must_use]
    pub fn id_generator(&self) -> &dyn IdGenerator {
        self.id_generator.as_ref()
    }

    /// Returns the number of registered collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if no collections are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Context")
            .field("collections", &names)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Context`].
pub struct ContextBuilder {
    definitions: Vec<CollectionDefinition>,
    id_generator: Arc<dyn IdGenerator>,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self {
            definitions: Vec::new(),
            id_generator: Arc::new(UuidGenerator),
        }
    }
}

impl ContextBuilder {
    /// Creates an empty builder using [`UuidGenerator`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collection.
    #[must_use]
    pub fn collection(mut self, definition: impl Into<CollectionDefinition>) -> Self {
        self.definitions.push(definition.into());
        self
    }

    /// Sets the id generator used by [`Context::wrap`].
    #[must_use]
    pub fn id_generator(mut self, id_generator: impl IdGenerator + 'static) -> Self {
        self.id_generator = Arc::new(id_generator);
        self
    }

    /// Sets a shared id generator.
    #[must_use]
    pub fn shared_id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// Validates the definitions and builds the context.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfiguration`] if:
    /// - two collections share a name, or a name is empty or contains
    ///   [`SEPARATOR`];
    /// - a child's parent is not a registered root collection, or lives in
    ///   a different table;
    /// - an index key attribute collides with a primary-key attribute, with
    ///   `value`, or with another index key attribute of the collection.
    pub fn build(self) -> CoreResult<Context> {
        let mut definitions = HashMap::with_capacity(self.definitions.len());
        for definition in self.definitions {
            validate_name(definition.name())?;
            validate_attributes(&definition)?;

            let name = definition.name().to_string();
            if definitions.contains_key(&name) {
                return Err(CoreError::invalid_configuration(format!(
                    "collection {name} is defined more than once"
                )));
            }
            definitions.insert(name, definition);
        }

        let mut root_definitions = HashMap::new();
        let mut child_definitions = HashMap::new();
        for (name, definition) in &definitions {
            match definition {
                CollectionDefinition::Root(root) => {
                    debug!(collection = %name, table = %root.layout.table_name, "registered root collection");
                    root_definitions.insert(name.clone(), root.clone());
                }
                CollectionDefinition::Child(child) => {
                    validate_parent(child, &definitions)?;
                    debug!(
                        collection = %name,
                        parent = %child.parent_collection_name,
                        table = %child.layout.table_name,
                        "registered child collection"
                    );
                    child_definitions.insert(name.clone(), child.clone());
                }
            }
        }

        debug!(
            collections = definitions.len(),
            roots = root_definitions.len(),
            children = child_definitions.len(),
            "built context"
        );

        Ok(Context {
            definitions,
            root_definitions,
            child_definitions,
            id_generator: self.id_generator,
        })
    }
}

fn validate_name(name: &str) -> CoreResult<()> {
    if name.is_empty() {
        return Err(CoreError::invalid_configuration(
            "collection name must not be empty",
        ));
    }
    if name.contains(SEPARATOR) {
        return Err(CoreError::invalid_configuration(format!(
            "collection name {name} contains the key separator {SEPARATOR}"
        )));
    }
    Ok(())
}

fn validate_attributes(definition: &CollectionDefinition) -> CoreResult<()> {
    let primary_key = &definition.layout().primary_key;
    if primary_key.partition_key == primary_key.sort_key {
        return Err(CoreError::invalid_configuration(format!(
            "collection {} uses {} as both partition and sort key",
            definition.name(),
            primary_key.partition_key
        )));
    }

    if primary_key.partition_key == VALUE_ATTRIBUTE || primary_key.sort_key == VALUE_ATTRIBUTE {
        return Err(CoreError::invalid_configuration(format!(
            "collection {} uses {VALUE_ATTRIBUTE} as a primary key attribute",
            definition.name()
        )));
    }

    let mut reserved: HashSet<&str> = HashSet::new();
    reserved.insert(&primary_key.partition_key);
    reserved.insert(&primary_key.sort_key);
    reserved.insert(VALUE_ATTRIBUTE);

    for extract in definition.wrapper_extract_keys() {
        if !reserved.insert(&extract.key) {
            return Err(CoreError::invalid_configuration(format!(
                "collection {} writes attribute {} more than once",
                definition.name(),
                extract.key
            )));
        }
    }
    Ok(())
}

fn validate_parent(
    child: &ChildCollectionDefinition,
    definitions: &HashMap<String, CollectionDefinition>,
) -> CoreResult<()> {
    match definitions.get(&child.parent_collection_name) {
        Some(CollectionDefinition::Root(parent)) => {
            if parent.layout.table_name != child.layout.table_name {
                return Err(CoreError::invalid_configuration(format!(
                    "child collection {} is stored in table {} but its parent {} is stored in {}",
                    child.name,
                    child.layout.table_name,
                    parent.name,
                    parent.layout.table_name
                )));
            }
            Ok(())
        }
        Some(CollectionDefinition::Child(_)) => Err(CoreError::invalid_configuration(format!(
            "parent {} of collection {} must be a root collection",
            child.parent_collection_name, child.name
        ))),
        None => Err(CoreError::invalid_configuration(format!(
            "parent {} of collection {} is not defined",
            child.parent_collection_name, child.name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access_pattern::KeyType;
    use crate::collection::WrapperExtractKey;
    use crate::layout::Layout;
    use serde_json::json;

    fn layout() -> Layout {
        Layout::new("my-objects", "pkey", "skey")
    }

    fn context() -> Context {
        Context::builder()
            .collection(RootCollectionDefinition::new("users", layout()))
            .collection(ChildCollectionDefinition::new("orders", layout(), "users", "userId"))
            .build()
            .unwrap()
    }

    #[test]
    fn lookups() {
        let ctx = context();
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.get_collection("users").unwrap().name(), "users");
        assert_eq!(ctx.get_collection("orders").unwrap().name(), "orders");
        assert_eq!(ctx.get_root_collection("users").unwrap().name, "users");
        assert_eq!(
            ctx.get_child_collection("orders").unwrap().parent_collection_name,
            "users"
        );
    }

    #[test]
    fn lookups_respect_kind() {
        let ctx = context();
        assert!(matches!(
            ctx.get_root_collection("orders"),
            Err(CoreError::CollectionNotFound { ref name }) if name == "orders"
        ));
        assert!(matches!(
            ctx.get_child_collection("users"),
            Err(CoreError::CollectionNotFound { .. })
        ));
        assert!(matches!(
            ctx.get_collection("widgets"),
            Err(CoreError::CollectionNotFound { .. })
        ));
    }

    #[test]
    fn wrap_by_name() {
        let ctx = Context::builder()
            .collection(RootCollectionDefinition::new("users", layout()))
            .id_generator(|| "fixed".to_string())
            .build()
            .unwrap();

        let document = json!({ "name": "Chris" }).as_object().cloned().unwrap();
        let wrapped = ctx.wrap("users", document).unwrap();
        assert_eq!(wrapped.key("pkey"), Some("users|-|fixed"));

        let missing = ctx.wrap("widgets", Document::new());
        assert!(matches!(missing, Err(CoreError::CollectionNotFound { .. })));
    }

    #[test]
    fn new_uses_default_generator() {
        let ctx = Context::new([CollectionDefinition::from(RootCollectionDefinition::new(
            "users",
            layout(),
        ))])
        .unwrap();
        let wrapped = ctx.wrap("users", Document::new()).unwrap();
        assert_eq!(wrapped.id().map(str::len), Some(36));
    }

    #[test]
    fn rejects_duplicate_names() {
        let result = Context::builder()
            .collection(RootCollectionDefinition::new("users", layout()))
            .collection(RootCollectionDefinition::new("users", layout()))
            .build();
        assert!(matches!(result, Err(CoreError::InvalidConfiguration { .. })));
    }

    #[test]
    fn rejects_separator_in_name() {
        let result = Context::builder()
            .collection(RootCollectionDefinition::new("us|-|ers", layout()))
            .build();
        assert!(matches!(result, Err(CoreError::InvalidConfiguration { .. })));

        let result = Context::builder()
            .collection(RootCollectionDefinition::new("", layout()))
            .build();
        assert!(matches!(result, Err(CoreError::InvalidConfiguration { .. })));
    }

    #[test]
    fn rejects_unknown_parent() {
        let err = Context::builder()
            .collection(ChildCollectionDefinition::new("orders", layout(), "users", "userId"))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("not defined"));
    }

    #[test]
    fn rejects_child_of_child() {
        let result = Context::builder()
            .collection(RootCollectionDefinition::new("users", layout()))
            .collection(ChildCollectionDefinition::new("orders", layout(), "users", "userId"))
            .collection(ChildCollectionDefinition::new("lines", layout(), "orders", "orderId"))
            .build();
        assert!(matches!(result, Err(CoreError::InvalidConfiguration { .. })));
    }

    #[test]
    fn rejects_parent_in_other_table() {
        let result = Context::builder()
            .collection(RootCollectionDefinition::new("users", layout()))
            .collection(ChildCollectionDefinition::new(
                "orders",
                Layout::new("other-table", "pkey", "skey"),
                "users",
                "userId",
            ))
            .build();
        assert!(matches!(result, Err(CoreError::InvalidConfiguration { .. })));
    }

    #[test]
    fn rejects_attribute_collisions() {
        for attribute in ["pkey", "skey", "value"] {
            let result = Context::builder()
                .collection(RootCollectionDefinition::new("users", layout()).extract_key(
                    WrapperExtractKey::new(KeyType::Partition, attribute, ["email"]),
                ))
                .build();
            assert!(
                matches!(result, Err(CoreError::InvalidConfiguration { .. })),
                "attribute {attribute} should collide"
            );
        }

        let result = Context::builder()
            .collection(
                RootCollectionDefinition::new("users", layout())
                    .extract_key(WrapperExtractKey::new(KeyType::Partition, "gpk1", ["email"]))
                    .extract_key(WrapperExtractKey::new(KeyType::Sort, "gpk1", ["name"])),
            )
            .build();
        assert!(matches!(result, Err(CoreError::InvalidConfiguration { .. })));
    }

    #[test]
    fn rejects_shared_primary_key_attribute() {
        let result = Context::builder()
            .collection(RootCollectionDefinition::new(
                "users",
                Layout::new("my-objects", "key", "key"),
            ))
            .build();
        assert!(matches!(result, Err(CoreError::InvalidConfiguration { .. })));
    }

    #[test]
    fn rejects_primary_key_named_value() {
        let result = Context::builder()
            .collection(RootCollectionDefinition::new(
                "users",
                Layout::new("my-objects", "pkey", "value"),
            ))
            .build();
        assert!(matches!(result, Err(CoreError::InvalidConfiguration { .. })));
    }

    #[test]
    fn context_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Context>();
    }
}
