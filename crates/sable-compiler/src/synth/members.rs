//! Member resolution shared by the object-defining constructs.
//!
//! Records, anonymous objects, and proxies all implement their supplied
//! methods the same way:
//!
//! 1. Collect the candidate set once: the base's overridable methods, then
//!    every requested interface's transitive methods
//! 2. For each supplied method, split an `Owner.member` name and keep the
//!    candidates with that name (and owner, when qualified)
//! 3. Select against the method's declared parameter types, self excluded
//! 4. Annotate the parameters with the selected signature's exact types and
//!    declare the implementation on the type under construction

use rustc_hash::FxHashSet;
use tracing::debug;

use sable_ast::MethodDef;
use sable_core::{CompilationError, DataType, MethodAttrs, MethodSignature, TypeHash};
use sable_registry::{ClassBuilder, TypeRegistry};

use crate::overload;
use crate::type_resolver::resolve_hint;

/// Split a member name on its last `.` into an owner qualifier and member.
pub fn split_member_name(name: &str) -> (Option<&str>, &str) {
    match name.rsplit_once('.') {
        Some((owner, member)) if !owner.is_empty() && !member.is_empty() => (Some(owner), member),
        _ => (None, name),
    }
}

/// The members a new type may implement, computed once per construct.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    methods: Vec<MethodSignature>,
}

impl CandidateSet {
    /// Collect the base's overridable methods and the interfaces' transitive
    /// methods, in that order.
    pub fn collect(registry: &TypeRegistry, base: TypeHash, interfaces: &[TypeHash]) -> Self {
        let mut methods: Vec<MethodSignature> = registry
            .overridable_methods_of(base)
            .into_iter()
            .cloned()
            .collect();
        for iface in interfaces {
            methods.extend(registry.interface_methods(*iface).into_iter().cloned());
        }
        Self { methods }
    }

    /// Candidates named `member`, declared by `owner` when given.
    ///
    /// A signature reachable through several owners appears once, from the
    /// first owner that reached it.
    pub fn matching(
        &self,
        registry: &TypeRegistry,
        owner: Option<&str>,
        member: &str,
    ) -> Vec<&MethodSignature> {
        let mut seen = FxHashSet::default();
        self.methods
            .iter()
            .filter(|m| m.name == member)
            .filter(|m| owner.is_none_or(|o| registry.type_name(m.declaring_type) == o))
            .filter(|m| seen.insert(m.signature_key()))
            .collect()
    }

    /// Number of collected signatures.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether nothing can be implemented.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// Select the signature a supplied method implements.
pub fn resolve_method(
    registry: &mut TypeRegistry,
    candidates: &CandidateSet,
    method: &MethodDef,
    construct: &str,
) -> Result<MethodSignature, CompilationError> {
    let (owner, member) = split_member_name(&method.name);
    let arg_types = method
        .params
        .iter()
        .map(|p| resolve_hint(registry, p.hint.as_ref(), construct))
        .collect::<Result<Vec<DataType>, _>>()?;

    let matching = candidates.matching(registry, owner, member);
    let selected = overload::select(&matching, &arg_types, registry);
    match selected {
        Some(sig) => Ok(sig.clone()),
        None => Err(CompilationError::UnresolvedMember {
            name: member.to_string(),
            owner: owner.map(str::to_string),
            args: registry.display_types(&arg_types),
            span: method.span,
        }),
    }
}

/// Resolve and declare every supplied method, returning them annotated.
pub fn implement_methods(
    registry: &mut TypeRegistry,
    builder: &mut ClassBuilder,
    candidates: &CandidateSet,
    methods: Vec<MethodDef>,
    construct: &str,
) -> Result<Vec<MethodDef>, CompilationError> {
    let self_type = DataType::simple(builder.type_hash());
    let mut implemented = Vec::with_capacity(methods.len());

    for mut method in methods {
        let sig = resolve_method(registry, candidates, &method, construct)?;
        let declared = match split_member_name(&method.name) {
            (Some(owner), member) => format!("{owner}.{member}"),
            (None, member) => member.to_string(),
        };
        debug!(
            construct,
            member = %declared,
            implements = %registry.type_name(sig.declaring_type),
            "member resolved"
        );
        builder.declare_method(
            declared,
            MethodAttrs::IMPLEMENTATION,
            sig.return_type,
            sig.params.clone(),
        );

        if let Some(this) = method.self_param.as_mut() {
            this.ty = Some(self_type);
        }
        for (param, ty) in method.params.iter_mut().zip(&sig.params) {
            param.ty = Some(*ty);
        }
        method.implements = Some(sig);
        implemented.push(method);
    }

    Ok(implemented)
}
