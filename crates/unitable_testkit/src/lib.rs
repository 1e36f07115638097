//! # UniTable Testkit
//!
//! Test utilities for UniTable.
//!
//! This crate provides:
//! - Fixture layouts, collections and contexts
//! - A deterministic id generator
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use unitable_testkit::prelude::*;
//!
//! #[test]
//! fn wraps_users() {
//!     let ctx = users_and_orders_context();
//!     let wrapped = ctx.wrap("users", document(json!({ "_id": "u1" }))).unwrap();
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
