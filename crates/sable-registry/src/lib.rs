//! Sable Registry
//!
//! The host type system collaborator: resolves type names, reports the members a
//! type inherits and implements, instantiates generic interfaces, and builds new
//! nominal types through a three-phase protocol.
//!
//! ## Modules
//!
//! - [`registry`]: Type storage, name resolution, hierarchy and member queries
//! - [`builder`]: `begin` / `declare_*` / `finalize` type construction
//! - [`template`]: Invoker definitions and generic interface instantiation
//! - [`host`]: The built-in host types

pub mod builder;
pub mod host;
pub mod registry;
pub mod template;

pub use builder::{ClassBuilder, Finalizable, InterfaceBuilder};
pub use host::{EXCEPTION, METADATA_INTERFACE};
pub use registry::TypeRegistry;
pub use template::{INVOKE_METHOD, INVOKER_TEMPLATE, invoker_template_name};
