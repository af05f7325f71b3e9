//! The tree walker.
//!
//! `Walker::resolve` rewrites one node: it dispatches on the node's kind,
//! installs the bindings the kind introduces, hands type-defining constructs
//! to the synthesizer, recurses into children, and finally runs the
//! post-order micro-pass chain on the result.
//!
//! Bindings a node introduces live in a scope pushed for exactly the subtree
//! that may see them, so siblings never observe each other's bindings.

use tracing::{debug, trace};

use sable_ast::{
    BaseCall, CatchClause, DefTypeExpr, FnArity, FnExpr, GenInterfaceExpr, HostCall, HostTarget,
    IfExpr, InvokeExpr, LetBinding, LetExpr, LocalRef, LocalRole, MethodDef, Node, NodeKind,
    ProxyExpr, ProxySuperCall, ReifyExpr, SynthesizedType, TryExpr,
};
use sable_core::{CompilationError, DataType, Span};

use crate::captures::{merge_captures, resolve_capture_types};
use crate::context::CompilationContext;
use crate::env::TypeEnv;
use crate::super_call::bind_super_call;
use crate::synth;
use crate::type_resolver::resolve_type_name;

/// Recursive driver of the pass over one top-level form.
pub struct Walker<'c, 'r> {
    ctx: &'c mut CompilationContext<'r>,
    env: TypeEnv,
}

impl<'c, 'r> Walker<'c, 'r> {
    /// Create a walker with an empty environment.
    pub fn new(ctx: &'c mut CompilationContext<'r>) -> Self {
        Self {
            ctx,
            env: TypeEnv::new(),
        }
    }

    /// The current environment.
    pub fn env(&self) -> &TypeEnv {
        &self.env
    }

    /// Resolve a node and everything beneath it.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve(&mut self, node: Node) -> Result<Node, CompilationError> {
        let Node { kind, span } = node;
        let kind = match kind {
            NodeKind::Const(literal) => NodeKind::Const(literal),
            NodeKind::Local(local) => NodeKind::Local(self.resolve_local(local, span)?),
            NodeKind::Do(forms) => NodeKind::Do(self.resolve_all(forms)?),
            NodeKind::If(expr) => NodeKind::If(IfExpr {
                test: self.resolve_boxed(expr.test)?,
                then: self.resolve_boxed(expr.then)?,
                otherwise: expr
                    .otherwise
                    .map(|n| self.resolve_boxed(n))
                    .transpose()?,
            }),
            NodeKind::Invoke(expr) => NodeKind::Invoke(InvokeExpr {
                callee: self.resolve_boxed(expr.callee)?,
                args: self.resolve_all(expr.args)?,
            }),
            NodeKind::HostCall(call) => NodeKind::HostCall(self.resolve_host_call(call)?),
            NodeKind::Throw(value) => NodeKind::Throw(self.resolve_boxed(value)?),
            NodeKind::Let(expr) => NodeKind::Let(self.resolve_let(expr)?),
            NodeKind::Fn(expr) => NodeKind::Fn(self.resolve_fn(expr, span)?),
            NodeKind::Try(expr) => NodeKind::Try(self.resolve_try(expr)?),
            NodeKind::DefType(def) => NodeKind::DefType(self.resolve_deftype(def)?),
            NodeKind::Reify(expr) => NodeKind::Reify(self.resolve_reify(expr)?),
            NodeKind::Proxy(expr) => NodeKind::Proxy(self.resolve_proxy(expr)?),
            NodeKind::ProxySuper(call) => {
                let call = ProxySuperCall {
                    args: self.resolve_all(call.args)?,
                    ..call
                };
                let bound = bind_super_call(self.ctx.registry, &self.env, call, span)?;
                return self.finish(bound);
            }
            NodeKind::BaseCall(call) => NodeKind::BaseCall(BaseCall {
                target: self.resolve_boxed(call.target)?,
                args: self.resolve_all(call.args)?,
                ..call
            }),
            NodeKind::GenInterface(expr) => NodeKind::GenInterface(self.resolve_gen_interface(expr)?),
        };
        self.finish(Node::new(kind, span))
    }

    /// Run the post-order micro-pass chain.
    fn finish(&mut self, node: Node) -> Result<Node, CompilationError> {
        self.ctx.passes.run(node, self.ctx.registry)
    }

    fn resolve_boxed(&mut self, node: Box<Node>) -> Result<Box<Node>, CompilationError> {
        self.resolve(*node).map(Box::new)
    }

    fn resolve_all(&mut self, nodes: Vec<Node>) -> Result<Vec<Node>, CompilationError> {
        nodes.into_iter().map(|n| self.resolve(n)).collect()
    }

    /// Run `f` in a fresh scope, popping it whether or not `f` succeeds.
    fn scoped<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, CompilationError>,
    ) -> Result<T, CompilationError> {
        self.env.push_scope();
        let result = f(self);
        self.env.pop_scope();
        result
    }

    // ==========================================================================
    // Locals and bindings
    // ==========================================================================

    fn resolve_local(&mut self, mut local: LocalRef, span: Span) -> Result<LocalRef, CompilationError> {
        match local.role {
            LocalRole::Parameter => {
                if let Some(init) = local.init.take() {
                    let init = self.resolve_boxed(init)?;
                    local.ty = init.static_type().or(local.ty);
                    local.init = Some(init);
                } else if let Some(entry) = self.env.get(&local.name) {
                    local.ty = Some(entry.ty);
                }
            }
            LocalRole::Let
            | LocalRole::Catch
            | LocalRole::FnSelf
            | LocalRole::ObjectSelf
            | LocalRole::Field => {
                local.ty = Some(self.env.require(&local.name, span)?.ty);
            }
        }
        Ok(local)
    }

    fn resolve_let(&mut self, expr: LetExpr) -> Result<LetExpr, CompilationError> {
        let LetExpr {
            bindings,
            body,
            is_loop,
        } = expr;

        self.scoped(|w| {
            let mut typed = Vec::with_capacity(bindings.len());
            for LetBinding { name, init, span, .. } in bindings {
                let init = w.resolve(init)?;
                let ty = init.static_type().unwrap_or_else(DataType::object);
                w.env.bind(name.clone(), ty, LocalRole::Let, span);
                typed.push(LetBinding {
                    name,
                    init,
                    ty: Some(ty),
                    span,
                });
            }

            let refined = w.ctx.inference.infer(typed, w.ctx.registry);
            for binding in &refined {
                if let Some(ty) = binding.ty
                    && w.env.type_of(&binding.name) != Some(ty)
                {
                    trace!(name = %binding.name, "binding type refined");
                    w.env.bind(binding.name.clone(), ty, LocalRole::Let, binding.span);
                }
            }

            Ok(LetExpr {
                bindings: refined,
                body: w.resolve_boxed(body)?,
                is_loop,
            })
        })
    }

    fn resolve_host_call(&mut self, call: HostCall) -> Result<HostCall, CompilationError> {
        let target = match call.target {
            HostTarget::Static(name) => HostTarget::Static(name),
            HostTarget::Instance(target) => HostTarget::Instance(self.resolve_boxed(target)?),
        };
        Ok(HostCall {
            target,
            member: call.member,
            args: self.resolve_all(call.args)?,
            resolved: call.resolved,
        })
    }

    // ==========================================================================
    // Closures
    // ==========================================================================

    fn resolve_fn(&mut self, mut expr: FnExpr, span: Span) -> Result<FnExpr, CompilationError> {
        if let Some(captures) = expr.captures.take() {
            expr.captures = Some(resolve_capture_types(captures, &self.env));
        }
        if expr.wrapper.is_none() {
            expr = synth::synthesize_fn_wrapper(self.ctx, expr)?;
        }

        let wrapper = expr.wrapper.as_ref().map(SynthesizedType::data_type);
        let mut arities = Vec::with_capacity(expr.arities.len());
        for arity in std::mem::take(&mut expr.arities) {
            let FnArity {
                params,
                return_hint,
                body,
            } = arity;
            let body = self.scoped(|w| {
                if let (Some(name), Some(ty)) = (&expr.name, wrapper) {
                    w.env.bind(name.clone(), ty, LocalRole::FnSelf, span);
                }
                for param in &params {
                    let ty = param.ty.unwrap_or_else(DataType::object);
                    w.env.bind(param.name.clone(), ty, LocalRole::Parameter, param.span);
                }
                w.resolve_boxed(body)
            })?;
            arities.push(FnArity {
                params,
                return_hint,
                body,
            });
        }
        expr.arities = arities;
        Ok(expr)
    }

    fn resolve_try(&mut self, expr: TryExpr) -> Result<TryExpr, CompilationError> {
        let captures = expr
            .captures
            .map(|captures| resolve_capture_types(captures, &self.env));
        let body = self.scoped(|w| w.resolve_boxed(expr.body))?;

        let mut catches = Vec::with_capacity(expr.catches.len());
        for clause in expr.catches {
            let caught = resolve_type_name(self.ctx.registry, &clause.caught, "catch")?;
            let local = clause.local;
            let clause_span = clause.span;
            let body = self.scoped(|w| {
                w.env.bind(local.clone(), caught, LocalRole::Catch, clause_span);
                w.resolve_boxed(clause.body)
            })?;
            catches.push(CatchClause {
                caught: clause.caught,
                local,
                body,
                caught_type: Some(caught),
                span: clause_span,
            });
        }

        let finally = expr
            .finally
            .map(|f| self.scoped(|w| w.resolve_boxed(f)))
            .transpose()?;

        Ok(TryExpr {
            body,
            catches,
            finally,
            captures,
        })
    }

    // ==========================================================================
    // Type-defining constructs
    // ==========================================================================

    fn resolve_method(&mut self, method: MethodDef) -> Result<MethodDef, CompilationError> {
        let MethodDef {
            name,
            self_param,
            params,
            body,
            captures,
            implements,
            span,
        } = method;
        let captures = resolve_capture_types(captures, &self.env);

        let body = self.scoped(|w| {
            for param in self_param.iter().chain(&params) {
                let ty = param.ty.unwrap_or_else(DataType::object);
                w.env.bind(param.name.clone(), ty, LocalRole::Parameter, param.span);
            }
            w.resolve_boxed(body)
        })?;

        Ok(MethodDef {
            name,
            self_param,
            params,
            body,
            captures,
            implements,
            span,
        })
    }

    fn resolve_methods(&mut self, methods: Vec<MethodDef>) -> Result<Vec<MethodDef>, CompilationError> {
        methods.into_iter().map(|m| self.resolve_method(m)).collect()
    }

    fn resolve_deftype(&mut self, def: DefTypeExpr) -> Result<DefTypeExpr, CompilationError> {
        let mut def = if def.descriptor.is_some() {
            def
        } else {
            synth::synthesize_record(self.ctx, def)?
        };
        let descriptor = synthesized(def.descriptor.as_ref(), "deftype")?;

        let fields: Vec<(String, DataType, Span)> = match self.ctx.registry.class(descriptor.type_hash) {
            Some(class) => def
                .fields
                .iter()
                .filter_map(|decl| {
                    class
                        .find_field(&decl.name)
                        .map(|f| (decl.name.clone(), f.data_type, decl.span))
                })
                .collect(),
            None => Vec::new(),
        };

        let self_name = def.self_name.clone();
        let methods = std::mem::take(&mut def.methods);
        def.methods = self.scoped(|w| {
            w.env
                .bind(self_name, descriptor.data_type(), LocalRole::ObjectSelf, Span::default());
            for (name, ty, span) in fields {
                w.env.bind(name, ty, LocalRole::Field, span);
            }
            w.resolve_methods(methods)
        })?;
        Ok(def)
    }

    fn resolve_reify(&mut self, expr: ReifyExpr) -> Result<ReifyExpr, CompilationError> {
        let mut expr = if expr.descriptor.is_some() {
            expr
        } else {
            synth::synthesize_reify(self.ctx, expr)?
        };
        let descriptor = synthesized(expr.descriptor.as_ref(), "reify")?;

        let self_name = expr.self_name.clone();
        let methods = std::mem::take(&mut expr.methods);
        expr.methods = self.scoped(|w| {
            w.env
                .bind(self_name, descriptor.data_type(), LocalRole::ObjectSelf, Span::default());
            w.resolve_methods(methods)
        })?;
        expr.captures = self.object_captures(&expr.methods, &expr.self_name);
        Ok(expr)
    }

    fn resolve_proxy(&mut self, expr: ProxyExpr) -> Result<ProxyExpr, CompilationError> {
        let mut expr = if expr.descriptor.is_some() {
            expr
        } else {
            synth::synthesize_proxy(self.ctx, expr)?
        };
        let descriptor = synthesized(expr.descriptor.as_ref(), "proxy")?;

        let self_name = expr.self_name.clone();
        let methods = std::mem::take(&mut expr.methods);
        expr.methods = self.scoped(|w| {
            w.env
                .bind(self_name, descriptor.data_type(), LocalRole::ObjectSelf, Span::default());
            w.resolve_methods(methods)
        })?;
        expr.captures = self.object_captures(&expr.methods, &expr.self_name);
        Ok(expr)
    }

    /// Captures of an object, re-merged over its resolved member bodies.
    fn object_captures(&self, methods: &[MethodDef], self_name: &str) -> sable_ast::Captures {
        let merged = merge_captures(methods.iter().map(|m| &m.captures), self_name);
        debug!(captures = merged.len(), "object captures merged");
        resolve_capture_types(merged, &self.env)
    }

    fn resolve_gen_interface(
        &mut self,
        expr: GenInterfaceExpr,
    ) -> Result<GenInterfaceExpr, CompilationError> {
        if expr.descriptor.is_some() {
            Ok(expr)
        } else {
            synth::synthesize_interface(self.ctx, expr)
        }
    }
}

fn synthesized(
    descriptor: Option<&SynthesizedType>,
    construct: &str,
) -> Result<SynthesizedType, CompilationError> {
    descriptor.cloned().ok_or_else(|| CompilationError::Internal {
        message: format!("{construct} has no synthesized type"),
    })
}
