//! AST node definitions.
//!
//! Nodes form a closed tagged union: every form the reader can produce is a
//! [`NodeKind`] variant listing its own children. Passes rewrite a tree by
//! consuming nodes and producing new ones; nothing is mutated in place once a
//! pass has handed a node on.

use sable_core::{DataType, MethodSignature, Span, TypeHash, primitives};

use crate::Captures;

// ============================================================================
// Leaves and shared pieces
// ============================================================================

/// A type expression as written in a hint, before resolution.
///
/// A trailing `*` names a pointer type; a trailing `&` marks a by-reference
/// parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    /// The name as written.
    pub name: String,
    /// Where the name occurred.
    pub span: Span,
}

impl TypeName {
    /// Create a type name.
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// How a local binding was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalRole {
    /// A function or method parameter.
    Parameter,
    /// A `let` or `loop` binding.
    Let,
    /// The exception local of a `catch` clause.
    Catch,
    /// A named function's reference to itself.
    FnSelf,
    /// The implicit reference to the object being defined.
    ObjectSelf,
    /// A record field, closed over by the record's method bodies.
    Field,
}

/// A literal constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
}

impl Literal {
    /// The static type of the literal. `nil` has none.
    pub fn static_type(&self) -> Option<DataType> {
        let hash = match self {
            Literal::Nil => return None,
            Literal::Bool(_) => primitives::BOOL,
            Literal::Int(_) => primitives::INT64,
            Literal::Float(_) => primitives::DOUBLE,
            Literal::Char(_) => primitives::CHAR,
            Literal::Str(_) => primitives::STRING,
        };
        Some(DataType::simple(hash))
    }
}

/// A declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// The type hint, if any.
    pub hint: Option<TypeName>,
    /// The resolved type, once annotated.
    pub ty: Option<DataType>,
    /// Where the parameter was declared.
    pub span: Span,
}

impl Param {
    /// Create an untyped parameter.
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            hint: None,
            ty: None,
            span,
        }
    }

    /// Create a parameter with a type hint.
    pub fn hinted(name: impl Into<String>, hint: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            hint: Some(TypeName::new(hint, span)),
            ty: None,
            span,
        }
    }
}

/// A synthesized nominal type, attached to the form that defined it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SynthesizedType {
    /// The finalized type's hash.
    pub type_hash: TypeHash,
    /// The finalized type's name.
    pub name: String,
}

impl SynthesizedType {
    /// The type as a by-value type reference.
    pub fn data_type(&self) -> DataType {
        DataType::simple(self.type_hash)
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// An AST node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// The node's form.
    pub kind: NodeKind,
    /// Where the form occurred.
    pub span: Span,
}

/// The closed set of forms.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A literal constant.
    Const(Literal),
    /// A reference to a local binding.
    Local(LocalRef),
    /// Sequential evaluation; the value is the last form's.
    Do(Vec<Node>),
    /// Conditional.
    If(IfExpr),
    /// Invocation of a function value.
    Invoke(InvokeExpr),
    /// Host platform member access or call.
    HostCall(HostCall),
    /// Raise an exception.
    Throw(Box<Node>),
    /// `let` or `loop`.
    Let(LetExpr),
    /// Function literal.
    Fn(FnExpr),
    /// `try` with `catch` clauses and an optional `finally`.
    Try(TryExpr),
    /// Record-like type definition.
    DefType(DefTypeExpr),
    /// Anonymous polymorphic object.
    Reify(ReifyExpr),
    /// Dynamic proxy subclass.
    Proxy(ProxyExpr),
    /// Call to a proxy's base implementation, before resolution.
    ProxySuper(ProxySuperCall),
    /// Non-polymorphic call to a base implementation, after resolution.
    BaseCall(BaseCall),
    /// Generated interface definition.
    GenInterface(GenInterfaceExpr),
}

/// A reference to a local binding.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalRef {
    /// The binding's name.
    pub name: String,
    /// How the binding was introduced.
    pub role: LocalRole,
    /// The initializer associated with a parameter binding, if any.
    pub init: Option<Box<Node>>,
    /// The resolved type.
    pub ty: Option<DataType>,
}

/// Conditional.
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub test: Box<Node>,
    pub then: Box<Node>,
    pub otherwise: Option<Box<Node>>,
}

/// Invocation of a function value.
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeExpr {
    pub callee: Box<Node>,
    pub args: Vec<Node>,
}

/// The receiver of a host call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostTarget {
    /// A static member of a named type.
    Static(TypeName),
    /// An instance member of a value.
    Instance(Box<Node>),
}

/// Host platform member access or call.
#[derive(Debug, Clone, PartialEq)]
pub struct HostCall {
    pub target: HostTarget,
    pub member: String,
    pub args: Vec<Node>,
    /// The member the call binds to, once resolved by host-interop resolution.
    pub resolved: Option<MethodSignature>,
}

/// One `let`/`loop` binding.
#[derive(Debug, Clone, PartialEq)]
pub struct LetBinding {
    pub name: String,
    pub init: Node,
    /// The binding's type, once resolved.
    pub ty: Option<DataType>,
    pub span: Span,
}

/// `let` or `loop`.
#[derive(Debug, Clone, PartialEq)]
pub struct LetExpr {
    pub bindings: Vec<LetBinding>,
    pub body: Box<Node>,
    /// Whether this is a `loop` (a `recur` target).
    pub is_loop: bool,
}

/// One arity of a function literal.
#[derive(Debug, Clone, PartialEq)]
pub struct FnArity {
    pub params: Vec<Param>,
    pub return_hint: Option<TypeName>,
    pub body: Box<Node>,
}

/// Function literal.
#[derive(Debug, Clone, PartialEq)]
pub struct FnExpr {
    /// The function's self-reference name, for named functions.
    pub name: Option<String>,
    pub arities: Vec<FnArity>,
    /// Outer bindings the body references.
    pub captures: Option<Captures>,
    /// The generated wrapper type, once synthesized.
    pub wrapper: Option<SynthesizedType>,
}

/// A `catch` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    /// The exception type to catch.
    pub caught: TypeName,
    /// The local the exception is bound to.
    pub local: String,
    pub body: Box<Node>,
    /// The caught type, once resolved.
    pub caught_type: Option<DataType>,
    pub span: Span,
}

/// `try` form.
#[derive(Debug, Clone, PartialEq)]
pub struct TryExpr {
    pub body: Box<Node>,
    pub catches: Vec<CatchClause>,
    pub finally: Option<Box<Node>>,
    /// Outer bindings referenced, when the `try` is compiled as a closure.
    pub captures: Option<Captures>,
}

/// Mutability of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldMutability {
    /// Assigned once, during construction.
    #[default]
    WriteOnce,
    /// Assignable after construction, without synchronization.
    Unsynchronized,
    /// Assignable after construction, with volatile access.
    Volatile,
}

/// A record field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub hint: Option<TypeName>,
    pub mutability: FieldMutability,
    pub span: Span,
}

/// A method supplied by a record, anonymous object, or proxy.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    /// Member name, optionally owner-qualified as `Owner.member`.
    pub name: String,
    /// The explicit leading self parameter (records and anonymous objects).
    pub self_param: Option<Param>,
    pub params: Vec<Param>,
    pub body: Box<Node>,
    /// Outer bindings the body references.
    pub captures: Captures,
    /// The member this method implements, once resolved.
    pub implements: Option<MethodSignature>,
    pub span: Span,
}

/// Record-like type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct DefTypeExpr {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub interfaces: Vec<TypeName>,
    pub methods: Vec<MethodDef>,
    /// Name of the implicit self-reference binding.
    pub self_name: String,
    /// The finalized type, once synthesized.
    pub descriptor: Option<SynthesizedType>,
}

/// Anonymous polymorphic object.
#[derive(Debug, Clone, PartialEq)]
pub struct ReifyExpr {
    pub interfaces: Vec<TypeName>,
    pub methods: Vec<MethodDef>,
    pub self_name: String,
    /// Union of the methods' captures, minus the self-reference.
    pub captures: Captures,
    pub descriptor: Option<SynthesizedType>,
}

/// Dynamic proxy subclass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyExpr {
    /// A base class or interface first, then interfaces.
    pub supers: Vec<TypeName>,
    pub methods: Vec<MethodDef>,
    pub self_name: String,
    /// Union of the methods' captures, minus the self-reference.
    pub captures: Captures,
    pub descriptor: Option<SynthesizedType>,
}

/// A call to a proxy's base implementation of a method.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxySuperCall {
    pub method: String,
    pub args: Vec<Node>,
    /// The self-reference name of the enclosing proxy.
    pub self_name: String,
}

/// A non-polymorphic call to a specific base implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseCall {
    /// The base type whose implementation is invoked.
    pub base: TypeHash,
    pub method: MethodSignature,
    /// The receiver.
    pub target: Box<Node>,
    pub args: Vec<Node>,
}

/// An abstract method of a generated interface.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceMethodDecl {
    pub name: String,
    pub params: Vec<TypeName>,
    pub return_type: TypeName,
    pub span: Span,
}

/// Generated interface definition.
#[derive(Debug, Clone, PartialEq)]
pub struct GenInterfaceExpr {
    pub name: String,
    pub extends: Vec<TypeName>,
    pub methods: Vec<InterfaceMethodDecl>,
    pub descriptor: Option<SynthesizedType>,
}

// ============================================================================
// Node helpers
// ============================================================================

impl Node {
    /// Create a node.
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// A literal constant.
    pub fn constant(literal: Literal, span: Span) -> Self {
        Self::new(NodeKind::Const(literal), span)
    }

    /// A reference to a local binding.
    pub fn local(name: impl Into<String>, role: LocalRole, span: Span) -> Self {
        Self::new(
            NodeKind::Local(LocalRef {
                name: name.into(),
                role,
                init: None,
                ty: None,
            }),
            span,
        )
    }

    /// A sequence of forms.
    pub fn block(forms: Vec<Node>, span: Span) -> Self {
        Self::new(NodeKind::Do(forms), span)
    }

    /// The static type this node produces, when one is known.
    pub fn static_type(&self) -> Option<DataType> {
        match &self.kind {
            NodeKind::Const(lit) => lit.static_type(),
            NodeKind::Local(local) => local.ty,
            NodeKind::Do(forms) => forms.last().and_then(Node::static_type),
            NodeKind::If(expr) => {
                let then = expr.then.static_type()?;
                match &expr.otherwise {
                    Some(other) if other.static_type() == Some(then) => Some(then),
                    Some(_) => None,
                    None => None,
                }
            }
            NodeKind::Let(expr) => expr.body.static_type(),
            NodeKind::Try(expr) => expr.body.static_type(),
            NodeKind::Fn(expr) => expr.wrapper.as_ref().map(SynthesizedType::data_type),
            NodeKind::Reify(expr) => expr.descriptor.as_ref().map(SynthesizedType::data_type),
            NodeKind::Proxy(expr) => expr.descriptor.as_ref().map(SynthesizedType::data_type),
            NodeKind::HostCall(call) => call.resolved.as_ref().map(|m| m.return_type),
            NodeKind::BaseCall(call) => Some(call.method.return_type),
            NodeKind::Invoke(_)
            | NodeKind::Throw(_)
            | NodeKind::ProxySuper(_)
            | NodeKind::DefType(_)
            | NodeKind::GenInterface(_) => None,
        }
    }

    /// Get the local reference, if this is one.
    pub fn as_local(&self) -> Option<&LocalRef> {
        match &self.kind {
            NodeKind::Local(local) => Some(local),
            _ => None,
        }
    }
}
