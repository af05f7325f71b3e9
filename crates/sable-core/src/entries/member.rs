//! Member entries shared by class and interface types.

use crate::{DataType, FieldAttrs, MethodAttrs, TypeHash};

/// A field declared on a class type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    /// Field name.
    pub name: String,
    /// Field type.
    pub data_type: DataType,
    /// Field attributes.
    pub attrs: FieldAttrs,
}

impl FieldEntry {
    /// Create a new field entry.
    pub fn new(name: impl Into<String>, data_type: DataType, attrs: FieldAttrs) -> Self {
        Self {
            name: name.into(),
            data_type,
            attrs,
        }
    }

    /// Whether the field may be assigned after construction.
    pub fn is_writable(&self) -> bool {
        !self.attrs.contains(FieldAttrs::INIT_ONLY)
    }

    /// Whether the field is volatile.
    pub fn is_volatile(&self) -> bool {
        self.attrs.contains(FieldAttrs::VOLATILE)
    }
}

/// A member signature as the host type system reports it.
///
/// This is what overload resolution selects among and what a synthesized
/// method implements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    /// Member name.
    pub name: String,
    /// The type that declares this member.
    pub declaring_type: TypeHash,
    /// Parameter types, in order.
    pub params: Vec<DataType>,
    /// Return type.
    pub return_type: DataType,
    /// Member attributes.
    pub attrs: MethodAttrs,
}

impl MethodSignature {
    /// Create a new method signature.
    pub fn new(
        name: impl Into<String>,
        declaring_type: TypeHash,
        params: Vec<DataType>,
        return_type: DataType,
        attrs: MethodAttrs,
    ) -> Self {
        Self {
            name: name.into(),
            declaring_type,
            params,
            return_type,
            attrs,
        }
    }

    /// Create an abstract interface method signature.
    pub fn interface(
        name: impl Into<String>,
        declaring_type: TypeHash,
        params: Vec<DataType>,
        return_type: DataType,
    ) -> Self {
        Self::new(name, declaring_type, params, return_type, MethodAttrs::INTERFACE)
    }

    /// Number of parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Owner-independent hash of name and parameter types (with modifiers).
    ///
    /// Two signatures with the same key are the same slot: one overrides or
    /// implements the other.
    pub fn signature_key(&self) -> TypeHash {
        let params: Vec<TypeHash> = self.params.iter().map(param_key).collect();
        TypeHash::from_signature(&self.name, &params)
    }

    /// Hash bound to the declaring type, for identifying this exact member.
    pub fn member_hash(&self) -> TypeHash {
        let params: Vec<TypeHash> = self.params.iter().map(param_key).collect();
        TypeHash::from_method(self.declaring_type, &self.name, &params)
    }

    /// Whether this is a static member.
    pub fn is_static(&self) -> bool {
        self.attrs.contains(MethodAttrs::STATIC)
    }
}

// by-ref parameters must not collide with their by-value counterparts
fn param_key(dt: &DataType) -> TypeHash {
    if dt.is_by_ref() {
        TypeHash(dt.type_hash.0.rotate_left(17) ^ 0x5bd1e995)
    } else {
        dt.type_hash
    }
}
