//! Tree and registry builders shared by the integration tests.

#![allow(dead_code)]

use sable::ast::{
    DefTypeExpr, FieldDecl, FieldMutability, LetBinding, LetExpr, MethodDef, Param, ProxyExpr,
    ReifyExpr,
};
use sable::core::{InterfaceEntry, MethodSignature};
use sable::{
    Captures, Compiler, CompilerOptions, DataType, Literal, LocalRole, Node, NodeKind, Span,
    TypeHash, TypeName, TypeRegistry,
};

pub fn at(line: u32) -> Span {
    Span::point(line, 1)
}

pub fn compiler(registry: TypeRegistry) -> Compiler {
    Compiler::new(registry, CompilerOptions::default())
}

/// Register a host interface with the given `(name, params, return)` methods.
pub fn host_interface(
    registry: &mut TypeRegistry,
    name: &str,
    methods: &[(&str, Vec<DataType>, DataType)],
) -> TypeHash {
    let entry = methods.iter().fold(InterfaceEntry::host(name), |entry, (m, params, ret)| {
        entry.with_method(MethodSignature::interface(*m, TypeHash::EMPTY, params.clone(), *ret))
    });
    registry.register(entry).unwrap()
}

pub fn int(value: i64) -> Node {
    Node::constant(Literal::Int(value), Span::default())
}

pub fn string(value: &str) -> Node {
    Node::constant(Literal::Str(value.into()), Span::default())
}

pub fn local(name: &str, role: LocalRole) -> Node {
    Node::local(name, role, Span::default())
}

pub fn block(forms: Vec<Node>) -> Node {
    Node::new(NodeKind::Do(forms), Span::default())
}

pub fn let_form(bindings: Vec<(&str, Node)>, body: Node) -> Node {
    Node::new(
        NodeKind::Let(LetExpr {
            bindings: bindings
                .into_iter()
                .map(|(name, init)| LetBinding {
                    name: name.into(),
                    init,
                    ty: None,
                    span: Span::default(),
                })
                .collect(),
            body: Box::new(body),
            is_loop: false,
        }),
        Span::default(),
    )
}

/// A method with an explicit leading `this` parameter.
pub fn method(name: &str, params: Vec<Param>, body: Node, captures: Captures) -> MethodDef {
    MethodDef {
        name: name.into(),
        self_param: Some(Param::new("this", Span::default())),
        params,
        body: Box::new(body),
        captures,
        implements: None,
        span: at(10),
    }
}

/// A proxy method: the self-reference is implicit.
pub fn proxy_method(name: &str, params: Vec<Param>, body: Node, captures: Captures) -> MethodDef {
    MethodDef {
        self_param: None,
        ..method(name, params, body, captures)
    }
}

pub fn param(name: &str) -> Param {
    Param::new(name, Span::default())
}

pub fn hinted(name: &str, hint: &str) -> Param {
    Param::hinted(name, hint, Span::default())
}

pub fn field(name: &str, hint: &str, mutability: FieldMutability) -> FieldDecl {
    FieldDecl {
        name: name.into(),
        hint: Some(TypeName::new(hint, Span::default())),
        mutability,
        span: at(2),
    }
}

fn type_names(names: &[&str]) -> Vec<TypeName> {
    names.iter().map(|n| TypeName::new(*n, Span::default())).collect()
}

pub fn deftype(name: &str, fields: Vec<FieldDecl>, interfaces: &[&str], methods: Vec<MethodDef>) -> Node {
    Node::new(
        NodeKind::DefType(DefTypeExpr {
            name: name.into(),
            fields,
            interfaces: type_names(interfaces),
            methods,
            self_name: "this".into(),
            descriptor: None,
        }),
        at(1),
    )
}

pub fn reify(interfaces: &[&str], methods: Vec<MethodDef>) -> Node {
    reify_as("this", interfaces, methods)
}

/// An anonymous object whose self-reference is bound as `self_name`.
pub fn reify_as(self_name: &str, interfaces: &[&str], methods: Vec<MethodDef>) -> Node {
    Node::new(
        NodeKind::Reify(ReifyExpr {
            interfaces: type_names(interfaces),
            methods,
            self_name: self_name.into(),
            captures: Captures::new(),
            descriptor: None,
        }),
        at(1),
    )
}

pub fn proxy(supers: &[&str], methods: Vec<MethodDef>) -> Node {
    Node::new(
        NodeKind::Proxy(ProxyExpr {
            supers: type_names(supers),
            methods,
            self_name: "this".into(),
            captures: Captures::new(),
            descriptor: None,
        }),
        at(1),
    )
}
