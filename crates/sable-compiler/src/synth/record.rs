//! Record-like type definitions.

use tracing::debug;

use sable_ast::{DefTypeExpr, FieldMutability, SynthesizedType};
use sable_core::{CompilationError, DataType, FieldAttrs, MethodAttrs, PrimitiveKind, TypeEntry, primitives};
use sable_registry::TypeRegistry;

use super::members::{CandidateSet, implement_methods};
use crate::context::CompilationContext;
use crate::type_resolver::{resolve_hint, resolve_interface};

/// Name of the parameterless static member every record carries, returning
/// its field basis.
pub const BASIS_METHOD: &str = "getBasis";

/// Whether a field of this type may be declared volatile.
///
/// Permitted: pointers, reference types, the primitives whose reads and writes
/// are atomic, and enums over an integer of at most 32 bits.
pub fn is_volatile_compatible(registry: &TypeRegistry, ty: DataType) -> bool {
    if ty.is_by_ref() {
        return false;
    }
    match registry.get(ty.type_hash) {
        Some(TypeEntry::Pointer(_)) => true,
        Some(TypeEntry::Class(_) | TypeEntry::Interface(_)) => true,
        Some(TypeEntry::Primitive(p)) => p.kind.is_volatile_safe(),
        Some(TypeEntry::Enum(e)) => matches!(
            e.underlying,
            PrimitiveKind::Byte
                | PrimitiveKind::SByte
                | PrimitiveKind::Int16
                | PrimitiveKind::UInt16
                | PrimitiveKind::Int32
                | PrimitiveKind::UInt32
        ),
        None => false,
    }
}

fn field_attrs(mutability: FieldMutability) -> FieldAttrs {
    match mutability {
        FieldMutability::WriteOnce => FieldAttrs::PUBLIC | FieldAttrs::INIT_ONLY,
        FieldMutability::Unsynchronized => FieldAttrs::PUBLIC,
        FieldMutability::Volatile => FieldAttrs::PUBLIC | FieldAttrs::VOLATILE,
    }
}

/// Synthesize the type for a record definition.
///
/// Returns the definition with its descriptor attached and its methods
/// annotated with the signatures they implement.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn synthesize_record(
    ctx: &mut CompilationContext<'_>,
    mut def: DefTypeExpr,
) -> Result<DefTypeExpr, CompilationError> {
    let construct = format!("deftype {}", def.name);
    let registry = &mut *ctx.registry;

    let interfaces = def
        .interfaces
        .iter()
        .map(|name| resolve_interface(registry, name, &construct))
        .collect::<Result<Vec<_>, _>>()?;

    let name = ctx.options.qualify(&def.name);
    let mut builder = registry.begin(name, primitives::OBJECT, &interfaces)?;

    for field in &def.fields {
        let ty = resolve_hint(registry, field.hint.as_ref(), &construct)?;
        if field.mutability == FieldMutability::Volatile && !is_volatile_compatible(registry, ty) {
            return Err(CompilationError::InvalidVolatileField {
                field: field.name.clone(),
                type_name: registry.display_type(ty),
                span: field.span,
            });
        }
        builder.declare_field(field.name.clone(), ty, field_attrs(field.mutability));
    }

    let candidates = CandidateSet::collect(registry, primitives::OBJECT, &interfaces);
    let methods = std::mem::take(&mut def.methods);
    def.methods = implement_methods(registry, &mut builder, &candidates, methods, &construct)?;

    builder.declare_method(
        BASIS_METHOD,
        MethodAttrs::PUBLIC | MethodAttrs::STATIC,
        DataType::object(),
        Vec::new(),
    );

    let name = builder.name().to_string();
    let type_hash = registry.finalize(builder)?;
    debug!(name = %name, fields = def.fields.len(), methods = def.methods.len(), "record synthesized");

    def.descriptor = Some(SynthesizedType { type_hash, name });
    Ok(def)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::{ClassEntry, EnumEntry};

    #[test]
    fn volatile_permitted_set() {
        let mut registry = TypeRegistry::with_host_types();
        let small = registry.register(EnumEntry::new("Small", PrimitiveKind::Byte)).unwrap();
        let wide = registry.register(EnumEntry::new("Wide", PrimitiveKind::Int64)).unwrap();
        let class = registry
            .register(ClassEntry::host("Node").with_base(primitives::OBJECT))
            .unwrap();
        let pointer = registry.pointer_to(primitives::INT64);

        for ok in [
            primitives::BOOL,
            primitives::INT32,
            primitives::CHAR,
            primitives::FLOAT,
            primitives::INTPTR,
            primitives::STRING,
            primitives::OBJECT,
            small,
            class,
            pointer,
        ] {
            assert!(is_volatile_compatible(&registry, DataType::simple(ok)), "{ok}");
        }
        for bad in [primitives::INT64, primitives::UINT64, primitives::DOUBLE, wide] {
            assert!(!is_volatile_compatible(&registry, DataType::simple(bad)), "{bad}");
        }
        assert!(!is_volatile_compatible(&registry, DataType::by_ref(primitives::INT32)));
    }

    #[test]
    fn field_attrs_follow_mutability() {
        assert!(field_attrs(FieldMutability::WriteOnce).contains(FieldAttrs::INIT_ONLY));
        assert!(!field_attrs(FieldMutability::Unsynchronized).contains(FieldAttrs::INIT_ONLY));
        assert!(field_attrs(FieldMutability::Volatile).contains(FieldAttrs::VOLATILE));
    }
}
