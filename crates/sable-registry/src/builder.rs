//! Three-phase construction of synthesized types.
//!
//! ```text
//! registry.begin(..)          -> ClassBuilder      (name reserved, nothing visible)
//! builder.declare_field(..)                         (any order, any count)
//! builder.declare_method(..)
//! registry.finalize(builder)  -> TypeHash           (entry registered, builder consumed)
//! ```
//!
//! A builder owns its member lists privately; they are only observable through
//! the registry once finalized. Finalizing consumes the builder, so no member
//! can be added to a finalized type. Dropping a builder discards the type.

use sable_core::{
    ClassEntry, DataType, FieldAttrs, FieldEntry, InterfaceEntry, MethodAttrs, MethodSignature,
    RegistrationError, TypeEntry, TypeHash, TypeSource,
};
use tracing::debug;

use crate::TypeRegistry;

/// A class under construction.
#[derive(Debug)]
pub struct ClassBuilder {
    entry: ClassEntry,
}

impl ClassBuilder {
    /// The full name of the type being built.
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// The hash the type will have once finalized.
    pub fn type_hash(&self) -> TypeHash {
        self.entry.type_hash
    }

    /// The base class.
    pub fn base(&self) -> Option<TypeHash> {
        self.entry.base_class
    }

    /// The interfaces the type implements.
    pub fn interfaces(&self) -> &[TypeHash] {
        &self.entry.interfaces
    }

    /// Declare a field.
    pub fn declare_field(&mut self, name: impl Into<String>, data_type: DataType, attrs: FieldAttrs) {
        self.entry.fields.push(FieldEntry::new(name, data_type, attrs));
    }

    /// Declare a method.
    pub fn declare_method(
        &mut self,
        name: impl Into<String>,
        attrs: MethodAttrs,
        return_type: DataType,
        params: Vec<DataType>,
    ) {
        self.entry.methods.push(MethodSignature::new(
            name,
            self.entry.type_hash,
            params,
            return_type,
            attrs,
        ));
    }

    /// Number of fields declared so far.
    pub fn field_count(&self) -> usize {
        self.entry.fields.len()
    }
}

/// An interface under construction.
#[derive(Debug)]
pub struct InterfaceBuilder {
    entry: InterfaceEntry,
}

impl InterfaceBuilder {
    /// The full name of the interface being built.
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// The hash the interface will have once finalized.
    pub fn type_hash(&self) -> TypeHash {
        self.entry.type_hash
    }

    /// Declare an abstract method.
    pub fn declare_method(
        &mut self,
        name: impl Into<String>,
        return_type: DataType,
        params: Vec<DataType>,
    ) {
        self.entry.methods.push(MethodSignature::interface(
            name,
            self.entry.type_hash,
            params,
            return_type,
        ));
    }
}

impl TypeRegistry {
    /// Begin a synthesized class deriving from `base` and implementing
    /// `interfaces`.
    pub fn begin(
        &self,
        name: impl Into<String>,
        base: TypeHash,
        interfaces: &[TypeHash],
    ) -> Result<ClassBuilder, RegistrationError> {
        let name = name.into();
        self.check_available(&name)?;

        let base_class = self.class(base).ok_or_else(|| RegistrationError::UnknownType {
            name: self.type_name(base),
        })?;
        if base_class.is_sealed {
            return Err(RegistrationError::SealedBase {
                name: base_class.name.clone(),
            });
        }
        self.check_interfaces(interfaces)?;

        let mut entry = ClassEntry::new(name, TypeSource::Synthesized).with_base(base);
        for iface in interfaces {
            if !entry.implements(*iface) {
                entry = entry.with_interface(*iface);
            }
        }
        debug!(name = %entry.name, base = %self.type_name(base), "begin class");
        Ok(ClassBuilder { entry })
    }

    /// Begin a synthesized interface extending `extends`.
    pub fn begin_interface(
        &self,
        name: impl Into<String>,
        extends: &[TypeHash],
    ) -> Result<InterfaceBuilder, RegistrationError> {
        let name = name.into();
        self.check_available(&name)?;
        self.check_interfaces(extends)?;

        let mut entry = InterfaceEntry::new(name, TypeSource::Synthesized);
        for base in extends {
            entry = entry.with_base(*base);
        }
        debug!(name = %entry.name, "begin interface");
        Ok(InterfaceBuilder { entry })
    }

    /// Finalize a type, making it visible to lookups.
    pub fn finalize(&mut self, builder: impl Into<Finalizable>) -> Result<TypeHash, RegistrationError> {
        let entry: TypeEntry = match builder.into() {
            Finalizable::Class(b) => b.entry.into(),
            Finalizable::Interface(b) => b.entry.into(),
        };
        debug!(name = %entry.name(), hash = %entry.type_hash(), "finalize");
        self.register(entry)
    }

    fn check_available(&self, name: &str) -> Result<(), RegistrationError> {
        if self.contains_name(name) {
            return Err(RegistrationError::DuplicateType {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn check_interfaces(&self, interfaces: &[TypeHash]) -> Result<(), RegistrationError> {
        for iface in interfaces {
            match self.get(*iface) {
                Some(entry) if entry.is_interface() => {}
                Some(entry) => {
                    return Err(RegistrationError::NotAnInterface {
                        name: entry.name().to_string(),
                    });
                }
                None => {
                    return Err(RegistrationError::UnknownType {
                        name: iface.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Either kind of builder, accepted by [`TypeRegistry::finalize`].
#[derive(Debug)]
pub enum Finalizable {
    Class(ClassBuilder),
    Interface(InterfaceBuilder),
}

impl From<ClassBuilder> for Finalizable {
    fn from(builder: ClassBuilder) -> Self {
        Finalizable::Class(builder)
    }
}

impl From<InterfaceBuilder> for Finalizable {
    fn from(builder: InterfaceBuilder) -> Self {
        Finalizable::Interface(builder)
    }
}
