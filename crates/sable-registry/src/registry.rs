//! TypeRegistry - the host type system the pass builds on.
//!
//! This module provides [`TypeRegistry`], the central storage for every host
//! and synthesized type. Types are stored by [`TypeHash`] with a name index for
//! resolution of type names as written in source.
//!
//! # Storage Model
//!
//! - **Types**: All type entries stored in a single map by `TypeHash`
//! - **Names**: Reverse index from full type name to hash
//! - **Generic instances**: Stored alongside other types under the hash of
//!   their definition and arguments, so instantiation is cached by lookup
//!
//! # Thread Safety
//!
//! `TypeRegistry` is not thread-safe. A compilation owns the registry mutably
//! for the whole pass; synthesized types are added synchronously while the
//! pass runs.

use rustc_hash::{FxHashMap, FxHashSet};

use sable_core::{
    ClassEntry, DataType, InterfaceEntry, MethodSignature, PointerEntry, PrimitiveEntry,
    PrimitiveKind, RegistrationError, TypeEntry, TypeHash, primitives,
};

/// Registry of host and synthesized types.
#[derive(Default)]
pub struct TypeRegistry {
    /// Types stored by hash (primary storage).
    types: FxHashMap<TypeHash, TypeEntry>,
    /// Full name -> hash.
    names: FxHashMap<String, TypeHash>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all primitives registered.
    pub fn with_primitives() -> Self {
        let mut registry = Self::new();
        registry.register_all_primitives();
        registry
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a type.
    pub fn register(&mut self, entry: impl Into<TypeEntry>) -> Result<TypeHash, RegistrationError> {
        let entry = entry.into();
        let hash = entry.type_hash();

        if self.names.contains_key(entry.name()) || self.types.contains_key(&hash) {
            return Err(RegistrationError::DuplicateType {
                name: entry.name().to_string(),
            });
        }

        self.names.insert(entry.name().to_string(), hash);
        self.types.insert(hash, entry);
        Ok(hash)
    }

    /// Register every primitive type.
    pub fn register_all_primitives(&mut self) {
        for kind in PrimitiveKind::ALL {
            self.insert(PrimitiveEntry::new(kind).into());
        }
    }

    /// Store a built-in entry, keeping an existing entry of the same name.
    pub(crate) fn insert(&mut self, entry: TypeEntry) {
        if self.names.contains_key(entry.name()) {
            return;
        }
        self.names.insert(entry.name().to_string(), entry.type_hash());
        self.types.insert(entry.type_hash(), entry);
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Get a type by hash.
    pub fn get(&self, hash: TypeHash) -> Option<&TypeEntry> {
        self.types.get(&hash)
    }

    /// Get a type by its full name.
    pub fn get_by_name(&self, name: &str) -> Option<&TypeEntry> {
        self.names.get(name).and_then(|hash| self.types.get(hash))
    }

    /// Check if a type exists.
    pub fn contains(&self, hash: TypeHash) -> bool {
        self.types.contains_key(&hash)
    }

    /// Check if a type name is taken.
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Get a class entry.
    pub fn class(&self, hash: TypeHash) -> Option<&ClassEntry> {
        self.get(hash)?.as_class()
    }

    /// Get an interface entry.
    pub fn interface(&self, hash: TypeHash) -> Option<&InterfaceEntry> {
        self.get(hash)?.as_interface()
    }

    /// Whether the hash names a registered interface.
    pub fn is_interface(&self, hash: TypeHash) -> bool {
        self.get(hash).is_some_and(TypeEntry::is_interface)
    }

    /// Number of registered types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Iterate over all types.
    pub fn types(&self) -> impl Iterator<Item = &TypeEntry> {
        self.types.values()
    }

    /// The name of a type, or its hash when unregistered.
    pub fn type_name(&self, hash: TypeHash) -> String {
        match self.get(hash) {
            Some(entry) => entry.name().to_string(),
            None => hash.to_string(),
        }
    }

    /// Render a type reference as written in source.
    pub fn display_type(&self, data_type: DataType) -> String {
        format!(
            "{}{}",
            self.type_name(data_type.type_hash),
            data_type.ref_modifier
        )
    }

    /// Render a list of type references, comma-separated.
    pub fn display_types(&self, types: &[DataType]) -> String {
        types
            .iter()
            .map(|t| self.display_type(*t))
            .collect::<Vec<_>>()
            .join(", ")
    }

    // ==========================================================================
    // Name Resolution
    // ==========================================================================

    /// Resolve a type name as written in source.
    ///
    /// A trailing `&` marks a by-reference type. A trailing `*` names the
    /// pointer type over the preceding type, registered on first use.
    pub fn resolve_type(&mut self, name: &str) -> Option<DataType> {
        let name = name.trim();
        if let Some(element) = name.strip_suffix('&') {
            let element = self.resolve_type(element)?;
            if element.is_by_ref() {
                return None;
            }
            return Some(DataType::by_ref(element.type_hash));
        }
        if let Some(pointee) = name.strip_suffix('*') {
            let pointee = self.resolve_type(pointee)?;
            if pointee.is_by_ref() {
                return None;
            }
            return Some(DataType::simple(self.pointer_to(pointee.type_hash)));
        }
        self.names.get(name).map(|hash| DataType::simple(*hash))
    }

    /// Get or create the pointer type over a pointee.
    pub fn pointer_to(&mut self, pointee: TypeHash) -> TypeHash {
        let pointee_name = self.type_name(pointee);
        let entry = PointerEntry::new(&pointee_name, pointee);
        let hash = entry.type_hash;
        self.insert(entry.into());
        hash
    }

    // ==========================================================================
    // Hierarchy
    // ==========================================================================

    /// The base class chain of a class, from its immediate base to the root.
    pub fn base_class_chain(&self, hash: TypeHash) -> Vec<&ClassEntry> {
        let mut chain = Vec::new();
        let mut current = hash;

        while let Some(class) = self.class(current)
            && let Some(base) = class.base_class
            && let Some(base_class) = self.class(base)
        {
            chain.push(base_class);
            current = base;
        }

        chain
    }

    /// Every interface a type implements, directly or through its bases and
    /// the interfaces' own bases. Discovery order, without duplicates.
    pub fn all_interfaces(&self, hash: TypeHash) -> Vec<TypeHash> {
        let mut roots = Vec::new();
        match self.get(hash) {
            Some(TypeEntry::Class(class)) => {
                roots.extend(class.interfaces.iter().copied());
                for base in self.base_class_chain(hash) {
                    roots.extend(base.interfaces.iter().copied());
                }
            }
            Some(TypeEntry::Interface(iface)) => roots.extend(iface.base_interfaces.iter().copied()),
            _ => {}
        }

        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for root in roots {
            self.collect_interfaces(root, &mut seen, &mut out);
        }
        out
    }

    fn collect_interfaces(
        &self,
        hash: TypeHash,
        seen: &mut FxHashSet<TypeHash>,
        out: &mut Vec<TypeHash>,
    ) {
        if !seen.insert(hash) {
            return;
        }
        out.push(hash);
        if let Some(iface) = self.interface(hash) {
            for base in &iface.base_interfaces {
                self.collect_interfaces(*base, seen, out);
            }
        }
    }

    /// Whether a value of type `sub` may be used where `sup` is expected.
    pub fn is_subtype(&self, sub: TypeHash, sup: TypeHash) -> bool {
        if sub == sup {
            return true;
        }
        let Some(entry) = self.get(sub) else {
            return false;
        };
        if sup == primitives::OBJECT {
            return entry.is_reference_type();
        }
        match entry {
            TypeEntry::Class(class) => {
                class.base_class == Some(sup)
                    || self.base_class_chain(sub).iter().any(|b| b.type_hash == sup)
                    || self.all_interfaces(sub).contains(&sup)
            }
            TypeEntry::Interface(_) => self.all_interfaces(sub).contains(&sup),
            _ => false,
        }
    }

    // ==========================================================================
    // Members
    // ==========================================================================

    /// Instance methods visible on a class, including inherited ones.
    ///
    /// Walks from the class to the root; an override shadows the signature it
    /// overrides, so each signature appears once, declared by its most-derived
    /// owner. For an interface, its own methods.
    pub fn methods_of(&self, hash: TypeHash) -> Vec<&MethodSignature> {
        match self.get(hash) {
            Some(TypeEntry::Class(class)) => {
                let mut seen = FxHashSet::default();
                let mut methods = Vec::new();
                let chain = std::iter::once(class).chain(self.base_class_chain(hash));
                for owner in chain {
                    for method in owner.methods.iter().filter(|m| !m.is_static()) {
                        if seen.insert(method.signature_key()) {
                            methods.push(method);
                        }
                    }
                }
                methods
            }
            Some(TypeEntry::Interface(iface)) => iface.methods.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Methods a subclass of `hash` may override.
    pub fn overridable_methods_of(&self, hash: TypeHash) -> Vec<&MethodSignature> {
        self.methods_of(hash)
            .into_iter()
            .filter(|m| m.attrs.is_overridable())
            .collect()
    }

    /// Methods of an interface and every interface it extends, in discovery
    /// order. A signature repeated across the hierarchy appears once.
    pub fn interface_methods(&self, hash: TypeHash) -> Vec<&MethodSignature> {
        let mut seen = FxHashSet::default();
        let mut methods = Vec::new();
        let hierarchy = std::iter::once(hash).chain(self.all_interfaces(hash));
        for iface in hierarchy.filter_map(|h| self.interface(h)) {
            for method in &iface.methods {
                if seen.insert(method.signature_key()) {
                    methods.push(method);
                }
            }
        }
        methods
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.types.len())
            .finish()
    }
}
