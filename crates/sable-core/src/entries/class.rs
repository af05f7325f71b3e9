//! Class type entry.

use crate::TypeHash;

use super::{FieldEntry, MethodSignature, TypeSource};

/// Registry entry for a class type.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassEntry {
    /// Fully qualified name.
    pub name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Source (host or synthesized).
    pub source: TypeSource,

    // === Inheritance ===
    /// Base class type hash. `None` only for the root object type.
    pub base_class: Option<TypeHash>,
    /// Directly implemented interface type hashes.
    pub interfaces: Vec<TypeHash>,

    // === Members ===
    /// Declared fields.
    pub fields: Vec<FieldEntry>,
    /// Declared methods (not including inherited ones).
    pub methods: Vec<MethodSignature>,

    /// Class cannot be derived from.
    pub is_sealed: bool,
}

impl ClassEntry {
    /// Create a new class entry.
    pub fn new(name: impl Into<String>, source: TypeSource) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Self {
            name,
            type_hash,
            source,
            base_class: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            is_sealed: false,
        }
    }

    /// Create a host class entry.
    pub fn host(name: impl Into<String>) -> Self {
        Self::new(name, TypeSource::Host)
    }

    // === Builder Methods ===

    /// Set the base class.
    pub fn with_base(mut self, base: TypeHash) -> Self {
        self.base_class = Some(base);
        self
    }

    /// Add an implemented interface.
    pub fn with_interface(mut self, interface: TypeHash) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a method. The method's declaring type is set to this class.
    pub fn with_method(mut self, mut method: MethodSignature) -> Self {
        method.declaring_type = self.type_hash;
        self.methods.push(method);
        self
    }

    /// Add a field.
    pub fn with_field(mut self, field: FieldEntry) -> Self {
        self.fields.push(field);
        self
    }

    /// Mark as sealed.
    pub fn as_sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    // === Query Methods ===

    /// Find the first declared method with a name.
    pub fn find_method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Find a field by name.
    pub fn find_field(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check if this class directly implements an interface.
    pub fn implements(&self, interface: TypeHash) -> bool {
        self.interfaces.contains(&interface)
    }
}
