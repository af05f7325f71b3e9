//! CompilationContext - state shared by one run of the pass.

use sable_registry::TypeRegistry;
use xxhash_rust::xxh64::xxh64;

use crate::options::CompilerOptions;
use crate::passes::{BindingInference, PassChain};

/// The registry, configuration, and collaborating passes a run of the pass
/// works against.
pub struct CompilationContext<'r> {
    /// The host type system. Synthesized types are finalized into it.
    pub registry: &'r mut TypeRegistry,
    /// Compiler configuration.
    pub options: &'r CompilerOptions,
    /// Micro-passes run after each node's structural handling.
    pub passes: &'r PassChain,
    /// Refines `let`/`loop` binding types once all are typed.
    pub inference: &'r dyn BindingInference,
    fresh_counter: u64,
}

impl<'r> CompilationContext<'r> {
    /// Create a context.
    pub fn new(
        registry: &'r mut TypeRegistry,
        options: &'r CompilerOptions,
        passes: &'r PassChain,
        inference: &'r dyn BindingInference,
    ) -> Self {
        Self {
            registry,
            options,
            passes,
            inference,
            fresh_counter: 0,
        }
    }

    /// Generate a namespace-qualified type name that no registered type has.
    ///
    /// The suffix is a hash of the stem and a per-context counter.
    pub fn fresh_type_name(&mut self, stem: &str) -> String {
        loop {
            self.fresh_counter += 1;
            let suffix = xxh64(stem.as_bytes(), self.fresh_counter);
            let name = self
                .options
                .qualify(&format!("{stem}__{:08x}", suffix as u32));
            if !self.registry.contains_name(&name) {
                return name;
            }
        }
    }
}
