//! Argument-to-parameter conversion costs.
//!
//! Determines whether a value of one type may be passed where another is
//! expected, and how good a match that is. Overload selection sums these costs.
//!
//! ## Conversion Priority
//!
//! 1. Identity (exact match)
//! 2. Primitive widening (`int` -> `long`, `float` -> `double`)
//! 3. Default-width narrowing (`long` -> `int`, `double` -> `float`), the
//!    widths literals are read at
//! 4. Integer to floating point
//! 5. Boxing (value type to `object`)
//! 6. Reference cast (derived to base, class to interface), then to `object`
//! 7. Untyped (an `object` argument passed to any parameter)
//!
//! By-reference parameters match structurally: the argument must also be
//! by-reference over the identical element type.

use sable_core::{DataType, PrimitiveKind, TypeEntry, primitives};
use sable_registry::TypeRegistry;

/// A conversion with its cost for overload selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    /// The kind of conversion being performed.
    pub kind: ConversionKind,
    /// The cost of this conversion (lower is better).
    pub cost: u32,
}

/// The kind of conversion being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    /// No conversion needed.
    Identity,
    /// Primitive widening.
    Widening,
    /// Narrowing from a literal's default width.
    Narrowing,
    /// Integer to floating point.
    IntToFloat,
    /// Value type to `object`.
    Boxing,
    /// Derived to base or class to interface.
    ReferenceCast,
    /// Argument type unknown statically.
    Untyped,
}

impl Conversion {
    /// Cost for exact match.
    pub const COST_EXACT: u32 = 0;
    /// Cost for primitive widening.
    pub const COST_PRIMITIVE_WIDENING: u32 = 4;
    /// Cost for narrowing from a literal's default width.
    pub const COST_PRIMITIVE_NARROWING: u32 = 5;
    /// Cost for integer to floating point.
    pub const COST_INT_TO_FLOAT: u32 = 8;
    /// Cost for boxing a value type.
    pub const COST_BOXING: u32 = 9;
    /// Cost for a reference cast.
    pub const COST_REFERENCE_CAST: u32 = 10;
    /// Cost for a reference cast to the root object type.
    pub const COST_TO_OBJECT: u32 = 11;
    /// Cost for an untyped argument.
    pub const COST_UNTYPED: u32 = 13;

    fn new(kind: ConversionKind, cost: u32) -> Self {
        Self { kind, cost }
    }

    /// Check if this is an exact match.
    pub fn is_exact(&self) -> bool {
        matches!(self.kind, ConversionKind::Identity)
    }
}

/// Check whether an argument of type `arg` can be passed to a parameter of
/// type `param`.
pub fn find_conversion(arg: DataType, param: DataType, registry: &TypeRegistry) -> Option<Conversion> {
    if arg.is_by_ref() || param.is_by_ref() {
        return (arg.is_by_ref() && param.is_by_ref() && arg.element() == param.element())
            .then(|| Conversion::new(ConversionKind::Identity, Conversion::COST_EXACT));
    }

    if arg.type_hash == param.type_hash {
        return Some(Conversion::new(ConversionKind::Identity, Conversion::COST_EXACT));
    }

    if let (Some(from), Some(to)) = (
        PrimitiveKind::from_hash(arg.type_hash),
        PrimitiveKind::from_hash(param.type_hash),
    ) {
        return find_primitive_conversion(from, to);
    }

    if param.type_hash == primitives::OBJECT {
        return match registry.get(arg.type_hash) {
            Some(TypeEntry::Primitive(p)) if p.kind != PrimitiveKind::Void => Some(
                Conversion::new(ConversionKind::Boxing, Conversion::COST_BOXING),
            ),
            Some(TypeEntry::Enum(_)) => Some(Conversion::new(
                ConversionKind::Boxing,
                Conversion::COST_BOXING,
            )),
            Some(entry) if entry.is_reference_type() => Some(Conversion::new(
                ConversionKind::ReferenceCast,
                Conversion::COST_TO_OBJECT,
            )),
            _ => None,
        };
    }

    if arg.type_hash == primitives::OBJECT {
        return (param.type_hash != primitives::VOID)
            .then(|| Conversion::new(ConversionKind::Untyped, Conversion::COST_UNTYPED));
    }

    registry
        .is_subtype(arg.type_hash, param.type_hash)
        .then(|| Conversion::new(ConversionKind::ReferenceCast, Conversion::COST_REFERENCE_CAST))
}

/// Conversion between two primitive types.
pub fn find_primitive_conversion(from: PrimitiveKind, to: PrimitiveKind) -> Option<Conversion> {
    use PrimitiveKind::*;

    if from == to {
        return Some(Conversion::new(ConversionKind::Identity, Conversion::COST_EXACT));
    }

    if to.is_float() && (from.is_integer() || from == Char) {
        return Some(Conversion::new(
            ConversionKind::IntToFloat,
            Conversion::COST_INT_TO_FLOAT,
        ));
    }

    let widens = match from {
        SByte => matches!(to, Int16 | Int32 | Int64),
        Byte => matches!(to, Int16 | UInt16 | Int32 | UInt32 | Int64 | UInt64),
        Int16 => matches!(to, Int32 | Int64),
        UInt16 => matches!(to, Int32 | UInt32 | Int64 | UInt64),
        Char => matches!(to, UInt16 | Int32 | UInt32 | Int64 | UInt64),
        Int32 => to == Int64,
        UInt32 => matches!(to, Int64 | UInt64),
        Float => to == Double,
        _ => false,
    };
    if widens {
        return Some(Conversion::new(
            ConversionKind::Widening,
            Conversion::COST_PRIMITIVE_WIDENING,
        ));
    }

    let narrows = (from == Int64 && to.is_integer()) || (from == Double && to == Float);
    narrows.then(|| Conversion::new(ConversionKind::Narrowing, Conversion::COST_PRIMITIVE_NARROWING))
}
