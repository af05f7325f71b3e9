//! Compiler configuration.

/// Options controlling type synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Namespace prefix for generated type names.
    pub namespace: String,
    /// Largest arity a function wrapper can be synthesized for.
    pub max_invoker_arity: usize,
}

impl CompilerOptions {
    /// Default namespace for generated types.
    pub const DEFAULT_NAMESPACE: &'static str = "sable.gen";
    /// Default largest wrapper arity.
    pub const DEFAULT_MAX_INVOKER_ARITY: usize = 20;

    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace for generated types.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the largest wrapper arity.
    pub fn with_max_invoker_arity(mut self, arity: usize) -> Self {
        self.max_invoker_arity = arity;
        self
    }

    /// Qualify a generated type name with the configured namespace.
    pub fn qualify(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.namespace, name)
        }
    }
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            namespace: Self::DEFAULT_NAMESPACE.to_string(),
            max_invoker_arity: Self::DEFAULT_MAX_INVOKER_ARITY,
        }
    }
}
