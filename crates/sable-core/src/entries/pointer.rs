//! Unmanaged pointer type entry.

use crate::TypeHash;

/// Registry entry for a pointer type such as `int*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEntry {
    /// Name, the pointee's name followed by `*`.
    pub name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// The pointed-to type.
    pub pointee: TypeHash,
}

impl PointerEntry {
    /// Create a pointer entry over a named pointee.
    pub fn new(pointee_name: &str, pointee: TypeHash) -> Self {
        let name = format!("{pointee_name}*");
        let type_hash = TypeHash::from_name(&name);
        Self {
            name,
            type_hash,
            pointee,
        }
    }
}
