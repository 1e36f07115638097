//! # UniTable Core
//!
//! Key assembly and document wrapping for single-table key-value designs.
//!
//! Several logical collections share one physical table. Each document is
//! wrapped into a record whose partition and sort keys are derived from the
//! collection name and the document `_id` (or, for child collections, the
//! parent's `_id`), plus any secondary-index keys declared by the
//! collection's access patterns.
//!
//! This crate provides:
//! - Key assembly with the empty / sparse / populated index policy
//! - Root and child collection definitions
//! - A read-only [`Context`] for looking up collections by name
//! - [`to_wrapped`] / [`unwrap`] between documents and physical records
//! - JSON configuration of collections and access patterns
//!
//! ## Usage
//!
//! ```
//! use unitable_core::{Context, Layout, RootCollectionDefinition};
//! use serde_json::json;
//!
//! let layout = Layout::new("my-objects", "pkey", "skey");
//! let ctx = Context::builder()
//!     .collection(RootCollectionDefinition::new("users", layout))
//!     .build()
//!     .unwrap();
//!
//! let document = json!({ "_id": "test-id", "name": "Chris" });
//! let wrapped = ctx.wrap("users", document.as_object().cloned().unwrap()).unwrap();
//! assert_eq!(wrapped.key("pkey"), Some("users|-|test-id"));
//! assert_eq!(wrapped.key("skey"), Some("users|-|test-id"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod access_pattern;
mod collection;
mod config;
mod context;
mod document;
mod error;
mod id;
mod key;
mod key_path;
mod layout;
mod wrapper;

pub use access_pattern::{
    AccessPattern, AccessPatternOptions, AccessPatternOptionsConfig, KeyType, NormalizerKind,
    StringNormalizer,
};
pub use collection::{
    ChildCollectionDefinition, CollectionConfig, CollectionDefinition, ParentConfig,
    RootCollectionDefinition, WrapperExtractKey,
};
pub use config::Config;
pub use context::{Context, ContextBuilder};
pub use document::{Document, WrappedDocument, ID_ATTRIBUTE, VALUE_ATTRIBUTE};
pub use error::{CoreError, CoreResult};
pub use id::{IdGenerator, UuidGenerator};
pub use key::{
    assemble_indexed_value, assemble_primary_key_value, construct_key_value,
    parse_primary_key_value, SEPARATOR,
};
pub use key_path::KeyPath;
pub use layout::{IndexKey, Layout, PrimaryKey};
pub use wrapper::{to_wrapped, unwrap};
