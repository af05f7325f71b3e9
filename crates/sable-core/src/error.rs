//! Error types for the host type system and the type-resolution pass.
//!
//! ```text
//! CompilationError   - raised while resolving/synthesizing a top-level form
//! └── RegistrationError - raised by the host type registry (wrapped via #[from])
//! ```
//!
//! Every error is deterministic and input-dependent: nothing is retried, and an
//! error aborts the top-level form being processed.

use thiserror::Error;

use crate::Span;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised by the host type registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A type with this name is already registered.
    #[error("type '{name}' is already registered")]
    DuplicateType {
        /// The type name.
        name: String,
    },

    /// A referenced type is not registered.
    #[error("type '{name}' is not registered")]
    UnknownType {
        /// The type name (or hash, when no name is known).
        name: String,
    },

    /// An interface was required.
    #[error("'{name}' is not an interface")]
    NotAnInterface {
        /// The type name.
        name: String,
    },

    /// A sealed class cannot be derived from.
    #[error("'{name}' is sealed and cannot be used as a base class")]
    SealedBase {
        /// The type name.
        name: String,
    },

    /// A generic definition was required.
    #[error("'{name}' is not a generic interface definition")]
    NotATemplate {
        /// The type name.
        name: String,
    },

    /// A generic instantiation supplied the wrong number of arguments.
    #[error("'{name}' expects {expected} type argument(s), got {got}")]
    TemplateArgCountMismatch {
        /// The generic definition name.
        name: String,
        /// Expected number of type arguments.
        expected: usize,
        /// Number supplied.
        got: usize,
    },
}

// ============================================================================
// Compilation Errors
// ============================================================================

/// Errors raised while resolving types and synthesizing type-defining forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilationError {
    /// A type name could not be resolved.
    #[error("at {span}: unable to resolve type '{expr}' in {construct}")]
    MissingType {
        /// The type expression as written.
        expr: String,
        /// The form the type expression appears in.
        construct: String,
        /// Where the type expression occurred.
        span: Span,
    },

    /// No unique member matches a supplied method definition.
    #[error(
        "at {span}: no unique member '{}{name}' matches parameter types ({args})",
        owner_prefix(.owner)
    )]
    UnresolvedMember {
        /// The member name without its owner qualifier.
        name: String,
        /// The owner qualifier, when the member name was dotted.
        owner: Option<String>,
        /// The parameter types as a string.
        args: String,
        /// Where the method definition occurred.
        span: Span,
    },

    /// A volatile field was declared with a type that cannot be read atomically.
    #[error(
        "at {span}: field '{field}' of type '{type_name}' cannot be volatile; \
         volatile fields must be pointers, reference types, bool, byte, sbyte, short, \
         ushort, int, uint, char, float, nint, nuint, or an enum over an integer of at most 32 bits"
    )]
    InvalidVolatileField {
        /// The field name.
        field: String,
        /// The field's type name.
        type_name: String,
        /// Where the field was declared.
        span: Span,
    },

    /// A local that must already be in scope was not.
    ///
    /// This signals an inconsistency between the pass and the tree it was given,
    /// not a user error.
    #[error("internal error at {span}: no binding in scope for local '{name}'")]
    UnboundLocal {
        /// The local's name.
        name: String,
        /// Where the reference occurred.
        span: Span,
    },

    /// A proxy super call matched no unique base method.
    #[error("at {span}: no unique base method '{method}' matches argument types ({args})")]
    UnresolvedSuperCall {
        /// The method name.
        method: String,
        /// The argument types as a string.
        args: String,
        /// Where the call occurred.
        span: Span,
    },

    /// A type listed where an interface is required is not an interface.
    #[error("at {span}: '{name}' is not an interface and cannot be implemented by {construct}")]
    NotAnInterface {
        /// The type name.
        name: String,
        /// The form listing it.
        construct: String,
        /// Where the type was listed.
        span: Span,
    },

    /// An error reported by the host type system.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Internal compiler error.
    #[error("internal error: {message}")]
    Internal {
        /// The error message.
        message: String,
    },
}

fn owner_prefix(owner: &Option<String>) -> String {
    owner.as_ref().map(|o| format!("{o}.")).unwrap_or_default()
}

impl CompilationError {
    /// Get the span where this error occurred, when it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            CompilationError::MissingType { span, .. }
            | CompilationError::UnresolvedMember { span, .. }
            | CompilationError::InvalidVolatileField { span, .. }
            | CompilationError::UnboundLocal { span, .. }
            | CompilationError::UnresolvedSuperCall { span, .. }
            | CompilationError::NotAnInterface { span, .. } => Some(*span),
            CompilationError::Registration(_) | CompilationError::Internal { .. } => None,
        }
    }

    /// Whether this reports an inconsistency in the compiler rather than in the
    /// program being compiled.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CompilationError::UnboundLocal { .. } | CompilationError::Internal { .. }
        )
    }
}
