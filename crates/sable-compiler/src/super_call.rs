//! Binding of proxy super calls to base implementations.

use tracing::debug;

use sable_ast::{BaseCall, LocalRef, LocalRole, Node, NodeKind, ProxySuperCall};
use sable_core::{CompilationError, DataType, MethodSignature, Span};
use sable_registry::TypeRegistry;

use crate::env::TypeEnv;
use crate::overload;

/// Rewrite a proxy super call into a non-polymorphic call on the proxy base's
/// implementation. The call's arguments must already be resolved.
pub fn bind_super_call(
    registry: &TypeRegistry,
    env: &TypeEnv,
    call: ProxySuperCall,
    span: Span,
) -> Result<Node, CompilationError> {
    let proxy_type = env.require(&call.self_name, span)?.ty;
    let base = registry
        .class(proxy_type.type_hash)
        .and_then(|class| class.base_class)
        .ok_or_else(|| CompilationError::Internal {
            message: format!(
                "'{}' is bound to '{}', which has no base class",
                call.self_name,
                registry.display_type(proxy_type)
            ),
        })?;

    let arg_types: Vec<DataType> = call
        .args
        .iter()
        .map(|a| a.static_type().unwrap_or_else(DataType::object))
        .collect();
    let candidates: Vec<&MethodSignature> = registry
        .methods_of(base)
        .into_iter()
        .filter(|m| m.name == call.method)
        .collect();

    let Some(method) = overload::select(&candidates, &arg_types, registry) else {
        return Err(CompilationError::UnresolvedSuperCall {
            method: call.method,
            args: registry.display_types(&arg_types),
            span,
        });
    };
    debug!(
        method = %method.name,
        base = %registry.type_name(method.declaring_type),
        "super call bound"
    );

    let target = Node::new(
        NodeKind::Local(LocalRef {
            name: call.self_name,
            role: LocalRole::ObjectSelf,
            init: None,
            ty: Some(proxy_type),
        }),
        span,
    );
    Ok(Node::new(
        NodeKind::BaseCall(BaseCall {
            base: method.declaring_type,
            method: method.clone(),
            target: Box::new(target),
            args: call.args,
        }),
        span,
    ))
}
