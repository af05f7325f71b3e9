//! Sable Core
//!
//! Shared vocabulary for the sable compiler front end: type identity, type
//! references, host type registry entries, and errors.
//!
//! ## Modules
//!
//! - [`type_hash`]: Deterministic hash-based identity for types and members
//! - [`data_type`]: Type references with parameter passing modes
//! - [`primitive_kind`]: The host platform's primitive value types
//! - [`attrs`]: Field and method attribute flags
//! - [`entries`]: Registry entries describing host and synthesized types
//! - [`error`]: Registration and compilation errors
//! - [`span`]: Source locations

pub mod attrs;
pub mod data_type;
pub mod entries;
pub mod error;
pub mod primitive_kind;
pub mod span;
pub mod type_hash;

pub use attrs::{FieldAttrs, MethodAttrs};
pub use data_type::{DataType, RefModifier};
pub use entries::{
    ClassEntry, EnumEntry, FieldEntry, InterfaceEntry, MethodSignature, PointerEntry,
    PrimitiveEntry, TypeEntry, TypeSource,
};
pub use error::{CompilationError, RegistrationError};
pub use primitive_kind::PrimitiveKind;
pub use span::Span;
pub use type_hash::{TypeHash, primitives};
