//! Overload selection.
//!
//! Selects the one member whose parameters best match a list of argument
//! types.
//!
//! ## Algorithm
//!
//! 1. Filter candidates by arity
//! 2. Check each argument converts to the corresponding parameter type
//! 3. Sum conversion costs for each viable candidate
//! 4. Select the unique best candidate
//! 5. Break a tie at the top by specificity: a candidate whose every parameter
//!    is the same as or a subtype of the others' wins. Ties involving an
//!    untyped argument are never broken.
//!
//! Zero viable candidates or an unbroken tie both mean no match.
//!
//! Callers pre-filter candidates by member name and owner qualifier.

mod ranking;

pub use ranking::{best_candidates, find_best_match};

use sable_core::{DataType, MethodSignature};
use sable_registry::TypeRegistry;
use tracing::{debug, trace};

use crate::conversion::{Conversion, ConversionKind, find_conversion};

/// A viable candidate with the conversions its arguments need.
#[derive(Debug, Clone)]
pub struct OverloadMatch<'a> {
    /// The candidate member.
    pub method: &'a MethodSignature,
    /// Conversion for each argument.
    pub conversions: Vec<Conversion>,
    /// Total conversion cost (lower is better).
    pub total_cost: u32,
}

/// Select the unique best-matching member, or `None` when no candidate
/// matches or the best candidates tie with none more specific than the rest.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn select<'a>(
    candidates: &[&'a MethodSignature],
    arg_types: &[DataType],
    registry: &TypeRegistry,
) -> Option<&'a MethodSignature> {
    let viable: Vec<_> = candidates
        .iter()
        .filter_map(|method| try_match_candidate(method, arg_types, registry))
        .collect();

    let selected = match best_candidates(&viable).as_slice() {
        [] => None,
        [winner] => Some(winner.method),
        tied => most_specific(tied, registry).map(|m| m.method),
    };
    debug!(
        candidates = candidates.len(),
        viable = viable.len(),
        selected = selected.map(|m| m.name.as_str()),
        "overload selection"
    );
    selected
}

/// The tied candidate more specific than every other, if there is one.
fn most_specific<'m, 'a>(
    tied: &[&'m OverloadMatch<'a>],
    registry: &TypeRegistry,
) -> Option<&'m OverloadMatch<'a>> {
    let untyped = tied
        .iter()
        .flat_map(|m| &m.conversions)
        .any(|c| c.kind == ConversionKind::Untyped);
    if untyped {
        return None;
    }

    let mut winners = tied.iter().enumerate().filter(|(i, a)| {
        tied.iter()
            .enumerate()
            .all(|(j, b)| *i == j || at_least_as_specific(a.method, b.method, registry))
    });
    let (_, winner) = winners.next()?;
    winners.next().is_none().then_some(*winner)
}

fn at_least_as_specific(a: &MethodSignature, b: &MethodSignature, registry: &TypeRegistry) -> bool {
    a.params.iter().zip(&b.params).all(|(pa, pb)| {
        pa == pb
            || (!pa.is_by_ref()
                && !pb.is_by_ref()
                && registry.is_subtype(pa.type_hash, pb.type_hash))
    })
}

/// Try to match arguments against a candidate.
fn try_match_candidate<'a>(
    method: &'a MethodSignature,
    arg_types: &[DataType],
    registry: &TypeRegistry,
) -> Option<OverloadMatch<'a>> {
    if method.arity() != arg_types.len() {
        return None;
    }

    let mut conversions = Vec::with_capacity(arg_types.len());
    let mut total_cost = 0u32;
    for (arg, param) in arg_types.iter().zip(&method.params) {
        let Some(conversion) = find_conversion(*arg, *param, registry) else {
            trace!(
                member = %method.name,
                arg = %registry.display_type(*arg),
                param = %registry.display_type(*param),
                "candidate rejected"
            );
            return None;
        };
        total_cost += conversion.cost;
        conversions.push(conversion);
    }

    Some(OverloadMatch {
        method,
        conversions,
        total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::{ClassEntry, InterfaceEntry, TypeHash, primitives};

    fn method(name: &str, params: Vec<DataType>) -> MethodSignature {
        MethodSignature::interface(name, TypeHash::from_name("Owner"), params, DataType::void())
    }

    #[test]
    fn selects_by_arity() {
        let registry = TypeRegistry::with_host_types();
        let one = method("run", vec![DataType::object()]);
        let two = method("run", vec![DataType::object(), DataType::object()]);
        let candidates = [&one, &two];

        let args = [DataType::object()];
        assert_eq!(select(&candidates, &args, &registry), Some(&one));
        let args = [DataType::object(); 3];
        assert_eq!(select(&candidates, &args, &registry), None);
    }

    #[test]
    fn prefers_exact_over_widening() {
        let registry = TypeRegistry::with_host_types();
        let int = method("put", vec![DataType::simple(primitives::INT32)]);
        let long = method("put", vec![DataType::simple(primitives::INT64)]);

        let args = [DataType::simple(primitives::INT32)];
        assert_eq!(select(&[&int, &long], &args, &registry), Some(&int));
        let args = [DataType::simple(primitives::INT64)];
        assert_eq!(select(&[&int, &long], &args, &registry), Some(&long));
    }

    #[test]
    fn untyped_argument_ties_across_same_arity() {
        let registry = TypeRegistry::with_host_types();
        let int = method("put", vec![DataType::simple(primitives::INT32)]);
        let string = method("put", vec![DataType::simple(primitives::STRING)]);
        let args = [DataType::object()];
        assert_eq!(select(&[&int, &string], &args, &registry), None);
        assert_eq!(select(&[&int], &args, &registry), Some(&int));
    }

    #[test]
    fn selection_ignores_candidate_order() {
        let mut registry = TypeRegistry::with_host_types();
        let base = registry
            .register(ClassEntry::host("Animal").with_base(primitives::OBJECT))
            .unwrap();
        let derived = registry
            .register(ClassEntry::host("Dog").with_base(base))
            .unwrap();
        let by_base = method("feed", vec![DataType::simple(base)]);
        let by_object = method("feed", vec![DataType::object()]);
        let args = [DataType::simple(derived)];

        let forward = select(&[&by_base, &by_object], &args, &registry);
        let backward = select(&[&by_object, &by_base], &args, &registry);
        assert_eq!(forward, Some(&by_base));
        assert_eq!(forward, backward);
    }

    #[test]
    fn nearest_base_wins_along_a_chain() {
        let mut registry = TypeRegistry::with_host_types();
        let animal = registry
            .register(ClassEntry::host("Animal").with_base(primitives::OBJECT))
            .unwrap();
        let mammal = registry
            .register(ClassEntry::host("Mammal").with_base(animal))
            .unwrap();
        let dog = registry
            .register(ClassEntry::host("Dog").with_base(mammal))
            .unwrap();
        let by_animal = method("feed", vec![DataType::simple(animal)]);
        let by_mammal = method("feed", vec![DataType::simple(mammal)]);

        let args = [DataType::simple(dog)];
        assert_eq!(select(&[&by_animal, &by_mammal], &args, &registry), Some(&by_mammal));
        assert_eq!(select(&[&by_mammal, &by_animal], &args, &registry), Some(&by_mammal));

        let args = [DataType::object()];
        assert_eq!(select(&[&by_animal, &by_mammal], &args, &registry), None);
    }

    #[test]
    fn unrelated_interfaces_stay_ambiguous() {
        let mut registry = TypeRegistry::with_host_types();
        let pet = registry.register(InterfaceEntry::host("IPet")).unwrap();
        let guard = registry.register(InterfaceEntry::host("IGuard")).unwrap();
        let dog = registry
            .register(
                ClassEntry::host("Dog")
                    .with_base(primitives::OBJECT)
                    .with_interface(pet)
                    .with_interface(guard),
            )
            .unwrap();
        let by_pet = method("greet", vec![DataType::simple(pet)]);
        let by_guard = method("greet", vec![DataType::simple(guard)]);

        let args = [DataType::simple(dog)];
        assert_eq!(select(&[&by_pet, &by_guard], &args, &registry), None);
    }

    #[test]
    fn by_ref_parameters_match_structurally() {
        let registry = TypeRegistry::with_host_types();
        let by_ref = method("swap", vec![DataType::by_ref(primitives::INT32)]);
        let by_value = method("swap", vec![DataType::simple(primitives::INT32)]);
        let args = [DataType::by_ref(primitives::INT32)];
        assert_eq!(select(&[&by_value, &by_ref], &args, &registry), Some(&by_ref));
        let args = [DataType::simple(primitives::INT32)];
        assert_eq!(select(&[&by_value, &by_ref], &args, &registry), Some(&by_value));
    }
}
