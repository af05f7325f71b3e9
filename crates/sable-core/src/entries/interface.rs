//! Interface type entry, including generic interface templates and their
//! instances.

use crate::{DataType, TypeHash};

use super::{MethodSignature, TypeSource};

/// Registry entry for an interface type.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceEntry {
    /// Fully qualified name.
    pub name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Source (host or synthesized).
    pub source: TypeSource,
    /// Declared abstract methods (not including base interfaces' methods).
    pub methods: Vec<MethodSignature>,
    /// Base interface type hashes.
    pub base_interfaces: Vec<TypeHash>,

    // === Generic Info ===
    /// Type parameter hashes (non-empty = generic definition).
    pub template_params: Vec<TypeHash>,
    /// Generic definition this was instantiated from.
    pub template: Option<TypeHash>,
    /// Type arguments of an instantiation.
    pub type_args: Vec<DataType>,
}

impl InterfaceEntry {
    /// Create a new interface entry.
    pub fn new(name: impl Into<String>, source: TypeSource) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Self {
            name,
            type_hash,
            source,
            methods: Vec::new(),
            base_interfaces: Vec::new(),
            template_params: Vec::new(),
            template: None,
            type_args: Vec::new(),
        }
    }

    /// Create a host interface entry.
    pub fn host(name: impl Into<String>) -> Self {
        Self::new(name, TypeSource::Host)
    }

    /// Add an abstract method. The method's declaring type is set to this interface.
    pub fn with_method(mut self, mut method: MethodSignature) -> Self {
        method.declaring_type = self.type_hash;
        self.methods.push(method);
        self
    }

    /// Add a base interface.
    pub fn with_base(mut self, base: TypeHash) -> Self {
        self.base_interfaces.push(base);
        self
    }

    /// Set type parameters (makes this a generic definition).
    pub fn with_template_params(mut self, params: Vec<TypeHash>) -> Self {
        self.template_params = params;
        self
    }

    /// Check if this is a generic definition.
    pub fn is_template(&self) -> bool {
        !self.template_params.is_empty()
    }

    /// Check if this is a generic instance.
    pub fn is_template_instance(&self) -> bool {
        self.template.is_some()
    }
}
