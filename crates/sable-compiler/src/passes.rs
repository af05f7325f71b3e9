//! Collaborating micro-passes.
//!
//! The walker runs a fixed chain on every node once its structural handling is
//! done: host-interop resolution, then operator desugaring, then intrinsic
//! recognition. Each slot holds a node-to-node pass. Operator desugaring and
//! intrinsic recognition belong to other parts of the compiler and default to
//! the identity; host-interop resolution binds host member calls whose
//! receiver type is statically known.
//!
//! `let`/`loop` bindings are additionally handed to a [`BindingInference`]
//! once every binding is typed.

use sable_ast::{HostCall, HostTarget, LetBinding, Node, NodeKind};
use sable_core::{CompilationError, DataType, MethodSignature};
use sable_registry::TypeRegistry;
use tracing::trace;

use crate::overload;

/// A node-to-node rewrite run after the pass's structural handling.
pub trait MicroPass {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Rewrite one node. Children have already been processed.
    fn run(&self, node: Node, registry: &TypeRegistry) -> Result<Node, CompilationError>;
}

/// Refines a fully typed `let`/`loop` binding list.
pub trait BindingInference {
    /// Return the bindings with possibly refined types, in the same order.
    fn infer(&self, bindings: Vec<LetBinding>, registry: &TypeRegistry) -> Vec<LetBinding>;
}

/// Inference that keeps the types it is given.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityInference;

impl BindingInference for IdentityInference {
    fn infer(&self, bindings: Vec<LetBinding>, _registry: &TypeRegistry) -> Vec<LetBinding> {
        bindings
    }
}

/// A pass that returns its input unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Identity(pub &'static str);

impl MicroPass for Identity {
    fn name(&self) -> &'static str {
        self.0
    }

    fn run(&self, node: Node, _registry: &TypeRegistry) -> Result<Node, CompilationError> {
        Ok(node)
    }
}

/// Binds host calls to the unique member matching their argument types.
///
/// Calls whose receiver type is unknown, or that match no unique member, are
/// left unbound for reflective dispatch.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostInterop;

impl MicroPass for HostInterop {
    fn name(&self) -> &'static str {
        "host-interop"
    }

    fn run(&self, mut node: Node, registry: &TypeRegistry) -> Result<Node, CompilationError> {
        if let NodeKind::HostCall(call) = &mut node.kind
            && call.resolved.is_none()
        {
            call.resolved = bind_host_call(call, registry).cloned();
            trace!(
                member = %call.member,
                bound = call.resolved.is_some(),
                "host call"
            );
        }
        Ok(node)
    }
}

fn bind_host_call<'a>(call: &HostCall, registry: &'a TypeRegistry) -> Option<&'a MethodSignature> {
    let candidates: Vec<&MethodSignature> = match &call.target {
        HostTarget::Static(type_name) => {
            let class = registry.get_by_name(&type_name.name)?.as_class()?;
            class
                .methods
                .iter()
                .filter(|m| m.is_static() && m.name == call.member)
                .collect()
        }
        HostTarget::Instance(target) => {
            let receiver = target.static_type()?;
            registry
                .methods_of(receiver.type_hash)
                .into_iter()
                .filter(|m| m.name == call.member)
                .collect()
        }
    };
    let arg_types: Vec<DataType> = call
        .args
        .iter()
        .map(|a| a.static_type().unwrap_or_else(DataType::object))
        .collect();
    overload::select(&candidates, &arg_types, registry)
}

/// The fixed post-order chain of micro-passes.
pub struct PassChain {
    interop: Box<dyn MicroPass>,
    operators: Box<dyn MicroPass>,
    intrinsics: Box<dyn MicroPass>,
}

impl PassChain {
    /// Replace the host-interop resolution pass.
    pub fn with_interop(mut self, pass: impl MicroPass + 'static) -> Self {
        self.interop = Box::new(pass);
        self
    }

    /// Replace the operator desugaring pass.
    pub fn with_operators(mut self, pass: impl MicroPass + 'static) -> Self {
        self.operators = Box::new(pass);
        self
    }

    /// Replace the intrinsic recognition pass.
    pub fn with_intrinsics(mut self, pass: impl MicroPass + 'static) -> Self {
        self.intrinsics = Box::new(pass);
        self
    }

    /// Run the chain over a node.
    pub fn run(&self, node: Node, registry: &TypeRegistry) -> Result<Node, CompilationError> {
        let node = self.interop.run(node, registry)?;
        let node = self.operators.run(node, registry)?;
        self.intrinsics.run(node, registry)
    }

    /// Names of the passes, in run order.
    pub fn names(&self) -> [&'static str; 3] {
        [
            self.interop.name(),
            self.operators.name(),
            self.intrinsics.name(),
        ]
    }
}

impl Default for PassChain {
    fn default() -> Self {
        Self {
            interop: Box::new(HostInterop),
            operators: Box::new(Identity("operator-desugar")),
            intrinsics: Box::new(Identity("intrinsic-recognition")),
        }
    }
}

impl std::fmt::Debug for PassChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
