//! DataType - a host type reference together with its passing mode.
//!
//! A [`TypeHash`] only identifies the base type. Member signatures on the host
//! platform can also take parameters by reference, and overload resolution has
//! to compare those structurally, so parameter and argument types are carried as
//! a `DataType`.
//!
//! # Example
//!
//! ```
//! use sable_core::{DataType, RefModifier, primitives};
//!
//! let plain = DataType::simple(primitives::INT32);
//! assert!(!plain.is_by_ref());
//!
//! let by_ref = DataType::by_ref(primitives::INT32);
//! assert_eq!(by_ref.ref_modifier, RefModifier::Ref);
//! assert_eq!(by_ref.element(), plain);
//! ```

use std::fmt::{self, Display, Formatter};

use crate::{TypeHash, primitives};

/// Reference modifier for parameters.
///
/// - `Ref`: the callee reads and writes the caller's storage
/// - `Out`: the callee only writes the caller's storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefModifier {
    /// Passed by value
    #[default]
    None,
    /// Passed by reference
    Ref,
    /// Passed by reference, write-only
    Out,
}

impl Display for RefModifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RefModifier::None => Ok(()),
            RefModifier::Ref => write!(f, "&"),
            RefModifier::Out => write!(f, "&out"),
        }
    }
}

/// A type reference with its parameter passing mode. `Copy` so it can be
/// threaded through environments and signatures freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    /// The base type hash.
    pub type_hash: TypeHash,
    /// Reference modifier for parameters.
    pub ref_modifier: RefModifier,
}

impl DataType {
    /// Create a by-value type.
    #[inline]
    pub const fn simple(type_hash: TypeHash) -> Self {
        Self {
            type_hash,
            ref_modifier: RefModifier::None,
        }
    }

    /// Create a by-reference parameter type.
    #[inline]
    pub const fn by_ref(type_hash: TypeHash) -> Self {
        Self {
            type_hash,
            ref_modifier: RefModifier::Ref,
        }
    }

    /// Create an out parameter type.
    #[inline]
    pub const fn out(type_hash: TypeHash) -> Self {
        Self {
            type_hash,
            ref_modifier: RefModifier::Out,
        }
    }

    /// The root object type; the type of anything without a hint.
    #[inline]
    pub const fn object() -> Self {
        Self::simple(primitives::OBJECT)
    }

    /// The `void` return type.
    #[inline]
    pub const fn void() -> Self {
        Self::simple(primitives::VOID)
    }

    /// Whether this is passed by reference (either `Ref` or `Out`).
    #[inline]
    pub const fn is_by_ref(&self) -> bool {
        !matches!(self.ref_modifier, RefModifier::None)
    }

    /// Whether this is the root object type passed by value.
    #[inline]
    pub fn is_object(&self) -> bool {
        self.type_hash == primitives::OBJECT && !self.is_by_ref()
    }

    /// Whether this is `void`.
    #[inline]
    pub fn is_void(&self) -> bool {
        self.type_hash == primitives::VOID
    }

    /// The by-value type a by-reference type refers to.
    #[inline]
    pub const fn element(&self) -> Self {
        Self::simple(self.type_hash)
    }
}

impl From<TypeHash> for DataType {
    fn from(type_hash: TypeHash) -> Self {
        DataType::simple(type_hash)
    }
}
