//! Properties of the pass that hold for any input of the given shape.

mod common;

use common::*;
use sable::ast::{
    CaptureRecord, CatchClause, FieldMutability, FnArity, FnExpr, GenInterfaceExpr,
    InterfaceMethodDecl, TryExpr,
};
use sable::compiler::select;
use sable::core::{ClassEntry, EnumEntry, MethodSignature, PrimitiveKind, primitives};
use sable::{
    Captures, CompilationError, DataType, Literal, LocalRole, Node, NodeKind, Span, TypeHash,
    TypeName, TypeRegistry,
};

fn int_type() -> DataType {
    DataType::simple(primitives::INT32)
}

fn long_type() -> DataType {
    DataType::simple(primitives::INT64)
}

fn nil() -> Node {
    Node::constant(Literal::Nil, Span::default())
}

// =============================================================================
// Records
// =============================================================================

#[test]
fn record_fields_match_declarations() {
    let mut compiler = compiler(TypeRegistry::with_host_types());
    let mutabilities = [
        FieldMutability::WriteOnce,
        FieldMutability::Unsynchronized,
        FieldMutability::Volatile,
        FieldMutability::WriteOnce,
    ];
    let fields = mutabilities
        .iter()
        .enumerate()
        .map(|(i, m)| field(&format!("f{i}"), "int", *m))
        .collect();

    let NodeKind::DefType(def) = compiler.resolve(deftype("Quad", fields, &[], vec![])).unwrap().kind
    else {
        panic!("expected deftype");
    };
    let class = compiler.registry().class(def.descriptor.unwrap().type_hash).unwrap();

    assert_eq!(class.fields.len(), mutabilities.len());
    for (field, mutability) in class.fields.iter().zip(mutabilities) {
        assert_eq!(field.data_type, int_type());
        assert_eq!(
            field.is_writable(),
            mutability != FieldMutability::WriteOnce,
            "{}",
            field.name
        );
    }
}

#[test]
fn volatile_fields_accept_exactly_the_atomic_types() {
    let mut registry = TypeRegistry::with_host_types();
    registry.register(EnumEntry::new("Color", PrimitiveKind::Int32)).unwrap();
    registry.register(EnumEntry::new("Wide", PrimitiveKind::UInt64)).unwrap();
    registry
        .register(ClassEntry::host("Node").with_base(primitives::OBJECT))
        .unwrap();
    let mut compiler = compiler(registry);

    let accepted = [
        "bool", "byte", "sbyte", "short", "ushort", "int", "uint", "char", "float", "nint",
        "nuint", "int*", "double*", "object", "string", "Node", "Color",
    ];
    for (i, hint) in accepted.iter().enumerate() {
        let form = deftype(
            &format!("Ok{i}"),
            vec![field("v", hint, FieldMutability::Volatile)],
            &[],
            vec![],
        );
        assert!(compiler.resolve(form).is_ok(), "{hint} should be accepted");
    }

    for (i, hint) in ["long", "ulong", "double", "Wide"].iter().enumerate() {
        let form = deftype(
            &format!("Bad{i}"),
            vec![field("v", hint, FieldMutability::Volatile)],
            &[],
            vec![],
        );
        assert!(
            matches!(
                compiler.resolve(form),
                Err(CompilationError::InvalidVolatileField { .. })
            ),
            "{hint} should be rejected"
        );
    }
}

#[test]
fn record_field_type_must_resolve() {
    let mut compiler = compiler(TypeRegistry::with_host_types());
    let form = deftype(
        "Broken",
        vec![field("v", "Missing", FieldMutability::WriteOnce)],
        &[],
        vec![],
    );
    let err = compiler.resolve(form).unwrap_err();
    assert!(matches!(
        err,
        CompilationError::MissingType { ref expr, ref construct, .. }
            if expr == "Missing" && construct == "deftype Broken"
    ));
}

// =============================================================================
// Member resolution
// =============================================================================

fn two_runnables() -> TypeRegistry {
    let mut registry = TypeRegistry::with_host_types();
    host_interface(&mut registry, "IRun", &[("run", vec![int_type()], DataType::void())]);
    host_interface(&mut registry, "IWalk", &[("run", vec![int_type()], DataType::void())]);
    registry
}

#[test]
fn unknown_owner_qualifier_never_falls_back() {
    let mut compiler = compiler(two_runnables());
    let form = reify(
        &["IRun"],
        vec![method("IWalk.run", vec![param("n")], nil(), Captures::new())],
    );
    let err = compiler.resolve(form).unwrap_err();
    assert!(matches!(
        err,
        CompilationError::UnresolvedMember { ref name, ref owner, .. }
            if name == "run" && owner.as_deref() == Some("IWalk")
    ));
}

#[test]
fn owner_qualifier_picks_among_identical_signatures() {
    let mut compiler = compiler(two_runnables());
    let form = reify(
        &["IRun", "IWalk"],
        vec![
            method("IRun.run", vec![param("n")], nil(), Captures::new()),
            method("IWalk.run", vec![param("n")], nil(), Captures::new()),
        ],
    );
    let NodeKind::Reify(expr) = compiler.resolve(form).unwrap().kind else {
        panic!("expected reify");
    };
    let registry = compiler.registry();
    let owners: Vec<_> = expr
        .methods
        .iter()
        .map(|m| registry.type_name(m.implements.as_ref().unwrap().declaring_type))
        .collect();
    assert_eq!(owners, ["IRun", "IWalk"]);

    let class = registry.class(expr.descriptor.unwrap().type_hash).unwrap();
    assert!(class.find_method("IRun.run").is_some());
    assert!(class.find_method("IWalk.run").is_some());
}

#[test]
fn select_ignores_candidate_order() {
    let mut registry = TypeRegistry::with_host_types();
    let animal = registry
        .register(ClassEntry::host("Animal").with_base(primitives::OBJECT))
        .unwrap();
    let dog = registry
        .register(ClassEntry::host("Dog").with_base(animal))
        .unwrap();

    let sig = |params: Vec<DataType>| {
        MethodSignature::interface("feed", TypeHash::EMPTY, params, DataType::void())
    };
    let candidates = [
        sig(vec![DataType::object(), int_type()]),
        sig(vec![DataType::simple(animal), long_type()]),
        sig(vec![DataType::simple(animal), int_type()]),
        sig(vec![DataType::simple(dog)]),
    ];
    let args = [DataType::simple(dog), int_type()];

    let mut order: Vec<&MethodSignature> = candidates.iter().collect();
    let mut results = Vec::new();
    for _ in 0..order.len() {
        results.push(select(&order, &args, &registry).cloned());
        order.rotate_left(1);
    }
    order.reverse();
    results.push(select(&order, &args, &registry).cloned());

    assert_eq!(results[0], Some(candidates[2].clone()));
    assert!(results.iter().all(|r| *r == results[0]));
}

// =============================================================================
// Scoping
// =============================================================================

#[test]
fn let_bindings_are_sequential() {
    let mut compiler = compiler(TypeRegistry::with_host_types());
    let form = let_form(
        vec![("a", int(1)), ("b", local("a", LocalRole::Let))],
        local("b", LocalRole::Let),
    );
    let NodeKind::Let(expr) = compiler.resolve(form).unwrap().kind else {
        panic!("expected let");
    };
    assert_eq!(expr.bindings[1].ty, Some(long_type()));
    assert_eq!(expr.body.static_type(), Some(long_type()));

    let form = let_form(
        vec![("a", local("b", LocalRole::Let)), ("b", int(1))],
        nil(),
    );
    assert!(matches!(
        compiler.resolve(form),
        Err(CompilationError::UnboundLocal { ref name, .. }) if name == "b"
    ));
}

#[test]
fn shadowing_restores_outer_binding() {
    let mut compiler = compiler(TypeRegistry::with_host_types());
    let form = let_form(
        vec![("x", int(1))],
        block(vec![
            let_form(vec![("x", string("s"))], local("x", LocalRole::Let)),
            local("x", LocalRole::Let),
        ]),
    );
    let NodeKind::Let(expr) = compiler.resolve(form).unwrap().kind else {
        panic!("expected let");
    };
    let NodeKind::Do(forms) = &expr.body.kind else {
        panic!("expected block");
    };
    assert_eq!(forms[0].static_type(), Some(DataType::simple(primitives::STRING)));
    assert_eq!(forms[1].static_type(), Some(long_type()));
}

#[test]
fn catch_local_is_visible_only_in_its_clause() {
    let try_form = |finally: Option<Node>| {
        Node::new(
            NodeKind::Try(TryExpr {
                body: Box::new(int(1)),
                catches: vec![CatchClause {
                    caught: TypeName::new("Exception", Span::default()),
                    local: "e".into(),
                    body: Box::new(local("e", LocalRole::Catch)),
                    caught_type: None,
                    span: Span::default(),
                }],
                finally: finally.map(Box::new),
                captures: None,
            }),
            Span::default(),
        )
    };
    let mut compiler = compiler(TypeRegistry::with_host_types());

    let NodeKind::Try(expr) = compiler.resolve(try_form(None)).unwrap().kind else {
        panic!("expected try");
    };
    let exception = compiler.registry().get_by_name("Exception").unwrap().type_hash();
    assert_eq!(expr.catches[0].caught_type, Some(DataType::simple(exception)));
    assert_eq!(
        expr.catches[0].body.static_type(),
        Some(DataType::simple(exception))
    );

    let leaked = try_form(Some(local("e", LocalRole::Catch)));
    assert!(matches!(
        compiler.resolve(leaked),
        Err(CompilationError::UnboundLocal { ref name, .. }) if name == "e"
    ));
}

// =============================================================================
// Captures
// =============================================================================

#[test]
fn object_captures_exclude_self_and_carry_types() {
    let mut registry = TypeRegistry::with_host_types();
    host_interface(
        &mut registry,
        "IPair",
        &[
            ("left", vec![], DataType::object()),
            ("right", vec![], DataType::object()),
        ],
    );
    let mut compiler = compiler(registry);

    let captures = || {
        Captures::new()
            .with(CaptureRecord::new("this", LocalRole::ObjectSelf))
            .with(CaptureRecord::new("n", LocalRole::Let))
    };
    let form = let_form(
        vec![("n", int(3))],
        reify(
            &["IPair"],
            vec![
                method("left", vec![], local("n", LocalRole::Let), captures()),
                method("right", vec![], local("this", LocalRole::ObjectSelf), captures()),
            ],
        ),
    );

    let NodeKind::Let(expr) = compiler.resolve(form).unwrap().kind else {
        panic!("expected let");
    };
    let NodeKind::Reify(object) = expr.body.kind else {
        panic!("expected reify");
    };
    assert_eq!(object.captures.len(), 1);
    assert!(!object.captures.contains("this"));
    let n = object.captures.get("n").unwrap();
    assert_eq!(n.ty, Some(long_type()));
    assert_eq!(n.origin.map(|o| o.role), Some(LocalRole::Let));
}

#[test]
fn nested_object_keeps_enclosing_self_reference() {
    let mut registry = TypeRegistry::with_host_types();
    host_interface(&mut registry, "IThunk", &[("run", vec![], DataType::object())]);
    let mut compiler = compiler(registry);

    let inner = reify_as(
        "inner",
        &["IThunk"],
        vec![method(
            "run",
            vec![],
            local("outer", LocalRole::ObjectSelf),
            Captures::new()
                .with(CaptureRecord::new("outer", LocalRole::ObjectSelf))
                .with(CaptureRecord::new("inner", LocalRole::ObjectSelf)),
        )],
    );
    let outer = reify_as(
        "outer",
        &["IThunk"],
        vec![method(
            "run",
            vec![],
            inner,
            Captures::new().with(CaptureRecord::new("outer", LocalRole::ObjectSelf)),
        )],
    );

    let NodeKind::Reify(outer) = compiler.resolve(outer).unwrap().kind else {
        panic!("expected reify");
    };
    let outer_type = outer.descriptor.as_ref().unwrap().data_type();
    assert!(outer.captures.is_empty());

    let NodeKind::Reify(inner) = &outer.methods[0].body.kind else {
        panic!("expected nested reify");
    };
    assert_ne!(inner.descriptor, outer.descriptor);
    assert_eq!(inner.captures.len(), 1);
    assert!(!inner.captures.contains("inner"));
    let captured = inner.captures.get("outer").unwrap();
    assert_eq!(captured.ty, Some(outer_type));
    assert_eq!(captured.origin.map(|o| o.role), Some(LocalRole::ObjectSelf));
    assert_eq!(inner.methods[0].body.static_type(), Some(outer_type));
}

#[test]
fn closure_in_record_method_captures_fields_and_self() {
    let mut registry = TypeRegistry::with_host_types();
    host_interface(&mut registry, "IThunk", &[("run", vec![], DataType::object())]);
    let mut compiler = compiler(registry);

    let closure = Node::new(
        NodeKind::Fn(FnExpr {
            name: None,
            arities: vec![FnArity {
                params: vec![],
                return_hint: None,
                body: Box::new(local("count", LocalRole::Field)),
            }],
            captures: Some(
                Captures::new()
                    .with(CaptureRecord::new("count", LocalRole::Field))
                    .with(CaptureRecord::new("this", LocalRole::Parameter)),
            ),
            wrapper: None,
        }),
        Span::default(),
    );
    let form = deftype(
        "Tally",
        vec![field("count", "int", FieldMutability::Unsynchronized)],
        &["IThunk"],
        vec![method("run", vec![], closure, Captures::new())],
    );

    let NodeKind::DefType(def) = compiler.resolve(form).unwrap().kind else {
        panic!("expected deftype");
    };
    let record_type = def.descriptor.as_ref().unwrap().data_type();
    let NodeKind::Fn(closure) = &def.methods[0].body.kind else {
        panic!("expected fn");
    };
    assert!(closure.wrapper.is_some());
    assert_eq!(closure.arities[0].body.static_type(), Some(int_type()));

    let captures = closure.captures.as_ref().unwrap();
    let count = captures.get("count").unwrap();
    assert_eq!(count.ty, Some(int_type()));
    assert_eq!(count.origin.map(|o| o.role), Some(LocalRole::Field));
    let this = captures.get("this").unwrap();
    assert_eq!(this.ty, Some(record_type));
    assert_eq!(this.origin.map(|o| o.role), Some(LocalRole::Parameter));
}

// =============================================================================
// Function wrappers and generated interfaces
// =============================================================================

#[test]
fn function_wrapper_implements_natural_and_boxed_invokers() {
    let mut compiler = compiler(TypeRegistry::with_host_types());
    let arity = |params: Vec<_>, body: Node| FnArity {
        params,
        return_hint: None,
        body: Box::new(body),
    };
    let form = Node::new(
        NodeKind::Fn(FnExpr {
            name: Some("step".into()),
            arities: vec![
                arity(vec![hinted("x", "int")], local("x", LocalRole::Parameter)),
                arity(vec![], local("step", LocalRole::FnSelf)),
            ],
            captures: None,
            wrapper: None,
        }),
        Span::default(),
    );

    let NodeKind::Fn(expr) = compiler.resolve(form).unwrap().kind else {
        panic!("expected fn");
    };
    let wrapper = expr.wrapper.clone().unwrap();
    assert!(wrapper.name.starts_with("sable.gen.step__"));

    // Invoker`1<int, object>, Invoker`1<object, object>, Invoker`0<object>
    let class = compiler.registry().class(wrapper.type_hash).unwrap();
    assert_eq!(class.interfaces.len(), 3);
    assert_eq!(class.methods.len(), 3);

    assert_eq!(expr.arities[0].params[0].ty, Some(int_type()));
    assert_eq!(expr.arities[0].body.static_type(), Some(int_type()));
    assert_eq!(expr.arities[1].body.static_type(), Some(wrapper.data_type()));
}

#[test]
fn generated_interface_may_name_itself() {
    let mut compiler = compiler(TypeRegistry::with_host_types());
    let form = Node::new(
        NodeKind::GenInterface(GenInterfaceExpr {
            name: "Chain".into(),
            extends: vec![],
            methods: vec![InterfaceMethodDecl {
                name: "append".into(),
                params: vec![TypeName::new("int", Span::default())],
                return_type: TypeName::new("Chain", Span::default()),
                span: Span::default(),
            }],
            descriptor: None,
        }),
        Span::default(),
    );

    let NodeKind::GenInterface(expr) = compiler.resolve(form).unwrap().kind else {
        panic!("expected gen-interface");
    };
    let descriptor = expr.descriptor.unwrap();
    let iface = compiler.registry().interface(descriptor.type_hash).unwrap();
    assert_eq!(iface.name, "sable.gen.Chain");
    assert_eq!(iface.methods[0].params, vec![int_type()]);
    assert_eq!(iface.methods[0].return_type, descriptor.data_type());
}

// =============================================================================
// Driver
// =============================================================================

#[test]
fn failing_form_is_isolated_from_later_forms() {
    let mut compiler = compiler(TypeRegistry::with_host_types());
    let forms = vec![
        deftype("Cell", vec![field("v", "int", FieldMutability::Unsynchronized)], &[], vec![]),
        deftype("Broken", vec![field("v", "double", FieldMutability::Volatile)], &[], vec![]),
        deftype(
            "Holder",
            vec![field("cell", "sable.gen.Cell", FieldMutability::Volatile)],
            &[],
            vec![],
        ),
    ];

    let output = compiler.resolve_forms(forms);
    assert_eq!(output.forms.len(), 2);
    assert!(matches!(
        output.errors.as_slice(),
        [CompilationError::InvalidVolatileField { field, .. }] if field == "v"
    ));

    let registry = compiler.registry();
    assert!(registry.contains_name("sable.gen.Cell"));
    assert!(registry.contains_name("sable.gen.Holder"));
    assert!(!registry.contains_name("sable.gen.Broken"));
}
