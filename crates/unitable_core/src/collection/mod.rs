//! Collection definitions.
//!
//! A collection is either a root collection, whose documents own their
//! partition, or a child collection, whose documents live in the partition
//! of a parent document referenced through a foreign key.

mod config;
mod definition;

pub use config::{CollectionConfig, ParentConfig};
pub use definition::{
    ChildCollectionDefinition, CollectionDefinition, RootCollectionDefinition, WrapperExtractKey,
};
