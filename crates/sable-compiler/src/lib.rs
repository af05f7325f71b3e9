//! Sable Compiler
//!
//! The type-resolution and object-synthesis pass of the sable front end.
//!
//! The pass walks an analyzed syntax tree, computes the static type of every
//! local binding, synthesizes host types for the type-defining forms, binds
//! each supplied method to the member it implements, and records what every
//! closure-like form captures.
//!
//! ## Modules
//!
//! - [`env`]: Scoped name-to-type environment
//! - [`walker`]: The recursive tree walker
//! - [`synth`]: Type synthesis for records, wrappers, anonymous objects, proxies, and interfaces
//! - [`overload`]: Unique-best member selection
//! - [`conversion`]: Argument-to-parameter conversion costs
//! - [`captures`]: Capture merging and typing
//! - [`super_call`]: Proxy super-call binding
//! - [`passes`]: Collaborating micro-passes and binding inference
//! - [`type_resolver`]: Type name resolution
//! - [`context`]: Per-run state
//! - [`options`]: Compiler configuration

pub mod captures;
pub mod context;
pub mod conversion;
pub mod env;
pub mod options;
pub mod overload;
pub mod passes;
pub mod super_call;
pub mod synth;
pub mod type_resolver;
pub mod walker;

pub use captures::{merge_captures, resolve_capture_types};
pub use context::CompilationContext;
pub use conversion::{Conversion, ConversionKind, find_conversion, find_primitive_conversion};
pub use env::{EnvEntry, TypeEnv};
pub use options::CompilerOptions;
pub use overload::{OverloadMatch, select};
pub use passes::{BindingInference, HostInterop, Identity, IdentityInference, MicroPass, PassChain};
pub use super_call::bind_super_call;
pub use walker::Walker;

pub use sable_core::CompilationError;

use sable_ast::Node;
use sable_registry::TypeRegistry;
use tracing::{info, warn};

/// Result of resolving a sequence of top-level forms.
#[derive(Debug, Default)]
pub struct CompilationOutput {
    /// The forms that resolved, in input order.
    pub forms: Vec<Node>,
    /// Errors of the forms that did not, in input order.
    pub errors: Vec<CompilationError>,
}

impl CompilationOutput {
    /// Check if every form resolved.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The compiler entry point.
///
/// Owns the host type system, which accumulates every type synthesized by
/// the forms it resolves.
pub struct Compiler {
    registry: TypeRegistry,
    options: CompilerOptions,
    passes: PassChain,
    inference: Box<dyn BindingInference>,
}

impl Compiler {
    /// Create a compiler over a host type system.
    pub fn new(registry: TypeRegistry, options: CompilerOptions) -> Self {
        Self {
            registry,
            options,
            passes: PassChain::default(),
            inference: Box::new(IdentityInference),
        }
    }

    /// Replace the micro-pass chain.
    pub fn with_passes(mut self, passes: PassChain) -> Self {
        self.passes = passes;
        self
    }

    /// Replace the binding inference.
    pub fn with_binding_inference(mut self, inference: impl BindingInference + 'static) -> Self {
        self.inference = Box::new(inference);
        self
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Consume the compiler, returning the host type system.
    pub fn into_registry(self) -> TypeRegistry {
        self.registry
    }

    /// Resolve one top-level form with an empty environment.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve(&mut self, form: Node) -> Result<Node, CompilationError> {
        let mut ctx = CompilationContext::new(
            &mut self.registry,
            &self.options,
            &self.passes,
            &*self.inference,
        );
        Walker::new(&mut ctx).resolve(form)
    }

    /// Resolve top-level forms in order.
    ///
    /// Each form starts from an empty environment and sees every type finalized
    /// by the forms before it. A failing form is reported and skipped; the
    /// remaining forms are still resolved.
    pub fn resolve_forms(&mut self, forms: impl IntoIterator<Item = Node>) -> CompilationOutput {
        let mut ctx = CompilationContext::new(
            &mut self.registry,
            &self.options,
            &self.passes,
            &*self.inference,
        );
        let mut output = CompilationOutput::default();

        for form in forms {
            match Walker::new(&mut ctx).resolve(form) {
                Ok(form) => output.forms.push(form),
                Err(err) => {
                    warn!(error = %err, "top-level form failed");
                    output.errors.push(err);
                }
            }
        }

        info!(
            resolved = output.forms.len(),
            failed = output.errors.len(),
            "forms resolved"
        );
        output
    }
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler")
            .field("registry", &self.registry)
            .field("options", &self.options)
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}
