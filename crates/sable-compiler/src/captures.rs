//! Closure capture tracking.

use sable_ast::Captures;
use tracing::trace;

use crate::env::TypeEnv;

/// Union capture sets, dropping the constructing object's self-reference.
///
/// Only an `ObjectSelf` record named `self_name` is dropped. An enclosing
/// object's self-reference is a real capture of a nested object, and an outer
/// binding that merely shares the name keeps its own role. When the same name
/// appears in several sets, a resolved record is preferred.
pub fn merge_captures<'a>(
    sets: impl IntoIterator<Item = &'a Captures>,
    self_name: &str,
) -> Captures {
    let mut merged = Captures::new();
    for set in sets {
        for record in set.iter() {
            let keep_existing = merged
                .get(&record.name)
                .is_some_and(|existing| existing.is_resolved() || !record.is_resolved());
            if !keep_existing {
                merged.insert(record.clone());
            }
        }
    }
    merged.retain(|record| !(record.is_object_self() && record.name == self_name));
    merged
}

/// Attach inferred types and origins to every captured name bound in `env`.
///
/// Names not in `env` are left as they are: an enclosing scope resolves them
/// later, or they are free.
pub fn resolve_capture_types(mut captures: Captures, env: &TypeEnv) -> Captures {
    for record in captures.iter_mut() {
        if let Some(entry) = env.get(&record.name) {
            record.ty = Some(entry.ty);
            record.origin = Some(entry.origin);
            trace!(name = %record.name, "capture resolved");
        }
    }
    captures
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_ast::{CaptureRecord, LocalRole};
    use sable_core::{DataType, Span, primitives};

    #[test]
    fn merge_strips_self_reference_by_role() {
        let a = Captures::new()
            .with(CaptureRecord::new("this", LocalRole::ObjectSelf))
            .with(CaptureRecord::new("x", LocalRole::Let));
        let b = Captures::new()
            .with(CaptureRecord::new("this", LocalRole::ObjectSelf))
            .with(CaptureRecord::new("y", LocalRole::Parameter));

        let merged = merge_captures([&a, &b], "this");
        let names: Vec<_> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn merge_keeps_outer_binding_sharing_self_name() {
        let a = Captures::new().with(CaptureRecord::new("self", LocalRole::Let));
        let merged = merge_captures([&a], "self");
        assert!(merged.contains("self"));
    }

    #[test]
    fn merge_keeps_enclosing_object_self_reference() {
        let a = Captures::new()
            .with(CaptureRecord::new("outer", LocalRole::ObjectSelf))
            .with(CaptureRecord::new("inner", LocalRole::ObjectSelf));

        let merged = merge_captures([&a], "inner");
        assert!(merged.get("outer").is_some_and(|r| r.is_object_self()));
        assert!(!merged.contains("inner"));
    }

    #[test]
    fn merge_prefers_resolved_records() {
        let mut resolved = CaptureRecord::new("x", LocalRole::Let);
        resolved.ty = Some(DataType::simple(primitives::INT32));
        let a = Captures::new().with(resolved.clone());
        let b = Captures::new().with(CaptureRecord::new("x", LocalRole::Let));

        assert_eq!(merge_captures([&a, &b], "this").get("x"), Some(&resolved));
        assert_eq!(merge_captures([&b, &a], "this").get("x"), Some(&resolved));
    }

    #[test]
    fn resolve_fills_bound_names_only() {
        let mut env = TypeEnv::new();
        env.bind("x", DataType::simple(primitives::STRING), LocalRole::Let, Span::point(2, 3));
        let captures = Captures::new()
            .with(CaptureRecord::new("x", LocalRole::Let))
            .with(CaptureRecord::new("free", LocalRole::Let));

        let resolved = resolve_capture_types(captures, &env);
        let x = resolved.get("x").unwrap();
        assert_eq!(x.ty, Some(DataType::simple(primitives::STRING)));
        assert_eq!(x.origin.map(|o| o.span), Some(Span::point(2, 3)));
        assert!(!resolved.get("free").unwrap().is_resolved());
    }
}
