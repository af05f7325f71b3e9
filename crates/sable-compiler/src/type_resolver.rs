//! Resolution of type names written in source.

use sable_ast::TypeName;
use sable_core::{CompilationError, DataType, TypeHash};
use sable_registry::TypeRegistry;

/// Resolve a type name, failing with a missing-type error that names the
/// containing construct.
pub fn resolve_type_name(
    registry: &mut TypeRegistry,
    name: &TypeName,
    construct: &str,
) -> Result<DataType, CompilationError> {
    registry
        .resolve_type(&name.name)
        .ok_or_else(|| CompilationError::MissingType {
            expr: name.name.clone(),
            construct: construct.to_string(),
            span: name.span,
        })
}

/// Resolve an optional type hint. An absent hint is the root object type.
pub fn resolve_hint(
    registry: &mut TypeRegistry,
    hint: Option<&TypeName>,
    construct: &str,
) -> Result<DataType, CompilationError> {
    match hint {
        Some(name) => resolve_type_name(registry, name, construct),
        None => Ok(DataType::object()),
    }
}

/// Resolve a type name that must name an interface.
pub fn resolve_interface(
    registry: &mut TypeRegistry,
    name: &TypeName,
    construct: &str,
) -> Result<TypeHash, CompilationError> {
    let resolved = resolve_type_name(registry, name, construct)?;
    if resolved.is_by_ref() || !registry.is_interface(resolved.type_hash) {
        return Err(CompilationError::NotAnInterface {
            name: name.name.clone(),
            construct: construct.to_string(),
            span: name.span,
        });
    }
    Ok(resolved.type_hash)
}
