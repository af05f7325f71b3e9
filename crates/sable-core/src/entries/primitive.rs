//! Primitive type entry.

use crate::{PrimitiveKind, TypeHash};

/// Registry entry for a built-in primitive value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveEntry {
    /// The primitive kind.
    pub kind: PrimitiveKind,
    /// Type hash for identity.
    pub type_hash: TypeHash,
}

impl PrimitiveEntry {
    /// Create a new primitive entry.
    pub fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            type_hash: kind.type_hash(),
        }
    }

    /// Get the name of this primitive type.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}
