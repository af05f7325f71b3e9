//! Type environment threaded through the pass.
//!
//! `TypeEnv` maps binding names to their inferred types. It is a stack of
//! scopes with an undo log: every binding made inside a scope records what it
//! replaced, and popping the scope restores exactly that. A subtree therefore
//! sees its own bindings layered over its parent's, and siblings never observe
//! each other's.

use rustc_hash::FxHashMap;

use sable_ast::{BindingOrigin, LocalRole};
use sable_core::{CompilationError, DataType, Span};

/// A binding visible in the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvEntry {
    /// The binding's inferred type.
    pub ty: DataType,
    /// Where and how the binding was introduced.
    pub origin: BindingOrigin,
}

/// Scoped mapping from binding name to type.
#[derive(Debug, Default)]
pub struct TypeEnv {
    /// Bindings currently visible.
    bindings: FxHashMap<String, EnvEntry>,
    /// Undo log: (scope depth, name, replaced entry).
    shadowed: Vec<(u32, String, Option<EnvEntry>)>,
    /// Current scope depth (0 = top level).
    depth: u32,
}

impl TypeEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Scope Management
    // ==========================================================================

    /// Enter a new scope.
    pub fn push_scope(&mut self) {
        self.depth += 1;
    }

    /// Exit the current scope, restoring every binding it replaced.
    pub fn pop_scope(&mut self) {
        while let Some((depth, _, _)) = self.shadowed.last() {
            if *depth != self.depth {
                break;
            }
            if let Some((_, name, previous)) = self.shadowed.pop() {
                match previous {
                    Some(entry) => {
                        self.bindings.insert(name, entry);
                    }
                    None => {
                        self.bindings.remove(&name);
                    }
                }
            }
        }
        self.depth = self.depth.saturating_sub(1);
    }

    /// Get current scope depth.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    // ==========================================================================
    // Bindings
    // ==========================================================================

    /// Bind a name in the current scope, shadowing any visible binding.
    pub fn bind(&mut self, name: impl Into<String>, ty: DataType, role: LocalRole, span: Span) {
        let name = name.into();
        let entry = EnvEntry {
            ty,
            origin: BindingOrigin { role, span },
        };
        let previous = self.bindings.insert(name.clone(), entry);
        self.shadowed.push((self.depth, name, previous));
    }

    /// Look up a binding.
    pub fn get(&self, name: &str) -> Option<&EnvEntry> {
        self.bindings.get(name)
    }

    /// Look up a binding's type.
    pub fn type_of(&self, name: &str) -> Option<DataType> {
        self.bindings.get(name).map(|entry| entry.ty)
    }

    /// Look up a binding that must be in scope.
    pub fn require(&self, name: &str, span: Span) -> Result<&EnvEntry, CompilationError> {
        self.get(name).ok_or_else(|| CompilationError::UnboundLocal {
            name: name.to_string(),
            span,
        })
    }

    /// Number of visible bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
