//! Document identifier generation.

use std::fmt;
use uuid::Uuid;

/// Source of fresh document identifiers.
///
/// Every call must return a string not returned before for the lifetime
/// of the system. Implementations are shared across threads.
pub trait IdGenerator: Send + Sync {
    /// Returns a new unique identifier.
    fn generate(&self) -> String;
}

/// Generates random (v4) UUIDs in hyphenated form.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct UuidGenerator;

impl UuidGenerator {
    /// Creates a UUID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl fmt::Debug for UuidGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UuidGenerator(v4)")
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}
