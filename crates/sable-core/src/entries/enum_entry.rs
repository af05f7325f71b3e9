//! Enumeration type entry.

use crate::{PrimitiveKind, TypeHash};

/// Registry entry for an enumeration over an integral primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEntry {
    /// Fully qualified name.
    pub name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// The primitive the enum is stored as.
    pub underlying: PrimitiveKind,
}

impl EnumEntry {
    /// Create a new enum entry.
    pub fn new(name: impl Into<String>, underlying: PrimitiveKind) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Self {
            name,
            type_hash,
            underlying,
        }
    }
}
