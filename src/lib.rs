//! Sable
//!
//! Type resolution and object synthesis for a Lisp-style language targeting a
//! statically typed host platform.
//!
//! ```text
//! sable-core      type identity, registry entries, errors
//! sable-ast       the analyzed syntax tree
//! sable-registry  the host type system and the three-phase type builder
//! sable-compiler  environment, member resolution, synthesis, tree walker
//! ```
//!
//! # Example
//!
//! ```
//! use sable::{Compiler, CompilerOptions, Literal, Node, Span, TypeRegistry};
//!
//! let mut compiler = Compiler::new(TypeRegistry::with_host_types(), CompilerOptions::default());
//! let form = compiler.resolve(Node::constant(Literal::Int(1), Span::default())).unwrap();
//! assert_eq!(compiler.registry().display_type(form.static_type().unwrap()), "long");
//! ```

pub use sable_ast as ast;
pub use sable_compiler as compiler;
pub use sable_core as core;
pub use sable_registry as registry;

pub use sable_ast::{Captures, Literal, LocalRole, Node, NodeKind, TypeName};
pub use sable_compiler::{CompilationOutput, Compiler, CompilerOptions, PassChain};
pub use sable_core::{CompilationError, DataType, RegistrationError, Span, TypeHash};
pub use sable_registry::TypeRegistry;
