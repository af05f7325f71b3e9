//! Generated interfaces.

use tracing::debug;

use sable_ast::{GenInterfaceExpr, SynthesizedType, TypeName};
use sable_core::{CompilationError, DataType};

use crate::context::CompilationContext;
use crate::type_resolver::{resolve_interface, resolve_type_name};

/// Synthesize a generated interface: one abstract method per declaration.
///
/// A parameter or return type naming the interface itself resolves to the
/// interface under construction.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn synthesize_interface(
    ctx: &mut CompilationContext<'_>,
    mut expr: GenInterfaceExpr,
) -> Result<GenInterfaceExpr, CompilationError> {
    let construct = format!("gen-interface {}", expr.name);
    let name = ctx.options.qualify(&expr.name);
    let registry = &mut *ctx.registry;

    let extends = expr
        .extends
        .iter()
        .map(|t| resolve_interface(registry, t, &construct))
        .collect::<Result<Vec<_>, _>>()?;
    let mut builder = registry.begin_interface(name.clone(), &extends)?;
    let self_type = DataType::simple(builder.type_hash());

    let mut resolve = |t: &TypeName| -> Result<DataType, CompilationError> {
        if t.name == expr.name || t.name == name {
            Ok(self_type)
        } else {
            resolve_type_name(registry, t, &construct)
        }
    };

    for method in &expr.methods {
        let params = method
            .params
            .iter()
            .map(&mut resolve)
            .collect::<Result<Vec<_>, _>>()?;
        let return_type = resolve(&method.return_type)?;
        builder.declare_method(method.name.clone(), return_type, params);
    }

    let type_hash = registry.finalize(builder)?;
    debug!(name = %name, methods = expr.methods.len(), "interface synthesized");
    expr.descriptor = Some(SynthesizedType { type_hash, name });
    Ok(expr)
}
