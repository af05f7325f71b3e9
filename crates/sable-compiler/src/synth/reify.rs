//! Anonymous polymorphic objects.

use tracing::debug;

use sable_ast::{ReifyExpr, SynthesizedType};
use sable_core::{CompilationError, DataType, MethodAttrs, primitives};
use sable_registry::METADATA_INTERFACE;

use super::members::{CandidateSet, implement_methods};
use crate::captures::merge_captures;
use crate::context::CompilationContext;
use crate::type_resolver::resolve_interface;

/// Synthesize the type of an anonymous object.
///
/// The type derives from `object`, implements the requested interfaces plus
/// the metadata interface, and declares no fields. Supplied methods resolve
/// against `object`'s overridable methods and the requested interfaces.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn synthesize_reify(
    ctx: &mut CompilationContext<'_>,
    mut expr: ReifyExpr,
) -> Result<ReifyExpr, CompilationError> {
    let construct = "reify";
    let requested = {
        let registry = &mut *ctx.registry;
        expr.interfaces
            .iter()
            .map(|name| resolve_interface(registry, name, construct))
            .collect::<Result<Vec<_>, _>>()?
    };

    let metadata = ctx
        .registry
        .resolve_type(METADATA_INTERFACE)
        .ok_or_else(|| CompilationError::Internal {
            message: format!("host type system has no '{METADATA_INTERFACE}'"),
        })?
        .type_hash;
    let mut interfaces = requested.clone();
    if !interfaces.contains(&metadata) {
        interfaces.push(metadata);
    }

    let name = ctx.fresh_type_name("reify");
    let registry = &mut *ctx.registry;
    let mut builder = registry.begin(name.clone(), primitives::OBJECT, &interfaces)?;

    let candidates = CandidateSet::collect(registry, primitives::OBJECT, &requested);
    let methods = std::mem::take(&mut expr.methods);
    expr.methods = implement_methods(registry, &mut builder, &candidates, methods, construct)?;

    if !requested.contains(&metadata) {
        let bookkeeping: Vec<_> = registry.interface_methods(metadata).into_iter().cloned().collect();
        for method in bookkeeping {
            builder.declare_method(
                method.name,
                MethodAttrs::IMPLEMENTATION,
                method.return_type,
                method.params,
            );
        }
    }

    let type_hash = registry.finalize(builder)?;
    expr.captures = merge_captures(expr.methods.iter().map(|m| &m.captures), &expr.self_name);
    debug!(name = %name, methods = expr.methods.len(), "anonymous object synthesized");

    expr.descriptor = Some(SynthesizedType { type_hash, name });
    Ok(expr)
}
