//! Sable AST
//!
//! The untyped tree handed to the type-resolution pass by the reader, and the
//! slots that pass fills in: resolved local and parameter types, capture record
//! types, synthesized type descriptors, and member bindings.
//!
//! ## Modules
//!
//! - [`node`]: The closed set of node kinds and their payloads
//! - [`captures`]: Closure capture records

pub mod captures;
pub mod node;

pub use captures::{BindingOrigin, CaptureRecord, Captures};
pub use node::{
    BaseCall, CatchClause, DefTypeExpr, FieldDecl, FieldMutability, FnArity, FnExpr,
    GenInterfaceExpr, HostCall, HostTarget, IfExpr, InterfaceMethodDecl, InvokeExpr, LetBinding,
    LetExpr, Literal, LocalRef, LocalRole, MethodDef, Node, NodeKind, Param, ProxyExpr,
    ProxySuperCall, ReifyExpr, SynthesizedType, TryExpr, TypeName,
};
