//! Function-object wrappers.
//!
//! A function value must be invocable both by callers that know its parameter
//! types and by callers that do not. For every arity the function declares,
//! its wrapper implements two invoker instantiations: one over the natural
//! parameter and return types, one over `object` throughout. All of them are
//! implemented by a single generated class.

use tracing::debug;

use sable_ast::{FnExpr, SynthesizedType};
use sable_core::{CompilationError, DataType, MethodAttrs, TypeHash, primitives};

use crate::context::CompilationContext;
use crate::type_resolver::resolve_hint;
use sable_registry::INVOKE_METHOD;

/// Synthesize the wrapper type for a function literal.
///
/// Returns the function with each parameter annotated with its natural type
/// and the wrapper attached.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn synthesize_fn_wrapper(
    ctx: &mut CompilationContext<'_>,
    mut expr: FnExpr,
) -> Result<FnExpr, CompilationError> {
    let construct = match &expr.name {
        Some(name) => format!("fn {name}"),
        None => "fn".to_string(),
    };
    let max_arity = ctx.options.max_invoker_arity;
    let mut interfaces: Vec<TypeHash> = Vec::new();

    for arity in &mut expr.arities {
        let n = arity.params.len();
        if n > max_arity {
            return Err(CompilationError::Internal {
                message: format!(
                    "{construct} declares an arity of {n}; function wrappers support at most {max_arity}"
                ),
            });
        }

        let registry = &mut *ctx.registry;
        let mut natural = Vec::with_capacity(n + 1);
        for param in &mut arity.params {
            let ty = resolve_hint(registry, param.hint.as_ref(), &construct)?;
            param.ty = Some(ty);
            natural.push(ty);
        }
        natural.push(resolve_hint(registry, arity.return_hint.as_ref(), &construct)?);
        let boxed = vec![DataType::object(); n + 1];

        let template = registry.invoker_template(n)?;
        for args in [natural, boxed] {
            let instance = registry.instantiate_interface(template, &args)?;
            if !interfaces.contains(&instance) {
                interfaces.push(instance);
            }
        }
    }

    let stem = expr.name.as_deref().unwrap_or("fn");
    let name = ctx.fresh_type_name(stem);
    let registry = &mut *ctx.registry;
    let mut builder = registry.begin(name.clone(), primitives::OBJECT, &interfaces)?;
    for iface in &interfaces {
        let entry = registry.interface(*iface).ok_or_else(|| CompilationError::Internal {
            message: format!("invoker interface {iface:?} is not registered"),
        })?;
        for invoke in entry.methods.iter().filter(|m| m.name == INVOKE_METHOD) {
            builder.declare_method(
                format!("{}.{}", entry.name, invoke.name),
                MethodAttrs::IMPLEMENTATION,
                invoke.return_type,
                invoke.params.clone(),
            );
        }
    }

    let type_hash = registry.finalize(builder)?;
    debug!(name = %name, interfaces = interfaces.len(), "function wrapper synthesized");
    expr.wrapper = Some(SynthesizedType { type_hash, name });
    Ok(expr)
}
