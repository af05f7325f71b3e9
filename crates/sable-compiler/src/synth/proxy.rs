//! Dynamic proxy subclasses.

use tracing::debug;

use sable_ast::{ProxyExpr, SynthesizedType, TypeName};
use sable_core::{CompilationError, TypeHash, primitives};
use sable_registry::TypeRegistry;

use super::members::{CandidateSet, implement_methods};
use crate::captures::merge_captures;
use crate::context::CompilationContext;
use crate::type_resolver::resolve_type_name;

/// Split requested supertypes into a base class and interfaces.
///
/// When the first requested type is an interface (or nothing is requested)
/// the base is `object` and every requested type must be an interface.
/// Otherwise the first is the base and the rest must be interfaces.
pub fn split_supers(
    registry: &TypeRegistry,
    supers: &[(TypeHash, &TypeName)],
    construct: &str,
) -> Result<(TypeHash, Vec<TypeHash>), CompilationError> {
    let (base, rest) = match supers.split_first() {
        Some(((first, _), rest)) if !registry.is_interface(*first) => (*first, rest),
        _ => (primitives::OBJECT, supers),
    };

    let interfaces = rest
        .iter()
        .map(|(hash, name)| {
            if registry.is_interface(*hash) {
                Ok(*hash)
            } else {
                Err(CompilationError::NotAnInterface {
                    name: name.name.clone(),
                    construct: construct.to_string(),
                    span: name.span,
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((base, interfaces))
}

/// Synthesize a proxy subclass.
///
/// Supplied methods resolve against the base's overridable methods and the
/// interfaces' transitive methods. The proxy's captures are the union of its
/// methods' captures without the self-reference.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn synthesize_proxy(
    ctx: &mut CompilationContext<'_>,
    mut expr: ProxyExpr,
) -> Result<ProxyExpr, CompilationError> {
    let construct = "proxy";
    let (base, interfaces) = {
        let registry = &mut *ctx.registry;
        let resolved = expr
            .supers
            .iter()
            .map(|name| -> Result<_, CompilationError> {
                Ok((resolve_type_name(registry, name, construct)?.type_hash, name))
            })
            .collect::<Result<Vec<_>, _>>()?;
        split_supers(registry, &resolved, construct)?
    };

    let name = ctx.fresh_type_name("proxy");
    let registry = &mut *ctx.registry;
    let mut builder = registry.begin(name.clone(), base, &interfaces)?;

    let candidates = CandidateSet::collect(registry, base, &interfaces);
    let methods = std::mem::take(&mut expr.methods);
    expr.methods = implement_methods(registry, &mut builder, &candidates, methods, construct)?;

    let type_hash = registry.finalize(builder)?;
    expr.captures = merge_captures(expr.methods.iter().map(|m| &m.captures), &expr.self_name);
    debug!(
        name = %name,
        base = %registry.type_name(base),
        interfaces = interfaces.len(),
        "proxy synthesized"
    );

    expr.descriptor = Some(SynthesizedType { type_hash, name });
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::{ClassEntry, InterfaceEntry, Span};

    #[test]
    fn first_interface_means_object_base() {
        let mut registry = TypeRegistry::with_host_types();
        let a = registry.register(InterfaceEntry::host("IA")).unwrap();
        let b = registry.register(InterfaceEntry::host("IB")).unwrap();
        let (na, nb) = (TypeName::new("IA", Span::default()), TypeName::new("IB", Span::default()));

        let (base, ifaces) = split_supers(&registry, &[(a, &na), (b, &nb)], "proxy").unwrap();
        assert_eq!(base, primitives::OBJECT);
        assert_eq!(ifaces, vec![a, b]);
    }

    #[test]
    fn first_class_is_base() {
        let mut registry = TypeRegistry::with_host_types();
        let base = registry
            .register(ClassEntry::host("Stream").with_base(primitives::OBJECT))
            .unwrap();
        let a = registry.register(InterfaceEntry::host("IA")).unwrap();
        let (nbase, na) = (TypeName::new("Stream", Span::default()), TypeName::new("IA", Span::default()));

        let (found, ifaces) = split_supers(&registry, &[(base, &nbase), (a, &na)], "proxy").unwrap();
        assert_eq!(found, base);
        assert_eq!(ifaces, vec![a]);
    }

    #[test]
    fn class_after_first_position_is_rejected() {
        let mut registry = TypeRegistry::with_host_types();
        let a = registry.register(InterfaceEntry::host("IA")).unwrap();
        let (na, ns) = (TypeName::new("IA", Span::default()), TypeName::new("string", Span::point(1, 9)));

        let err = split_supers(&registry, &[(a, &na), (primitives::STRING, &ns)], "proxy").unwrap_err();
        assert!(matches!(err, CompilationError::NotAnInterface { ref name, .. } if name == "string"));
    }

    #[test]
    fn no_supers_means_object_base() {
        let registry = TypeRegistry::with_host_types();
        assert_eq!(
            split_supers(&registry, &[], "proxy").unwrap(),
            (primitives::OBJECT, vec![])
        );
    }
}
