//! Closure capture records.
//!
//! The reader records, on every closure-carrying form (functions, `try` forms
//! compiled as closures, and object method bodies), the outer bindings that form
//! references. The type-resolution pass fills in each record's type and origin
//! once the binding is found in scope.

use std::collections::BTreeMap;

use sable_core::{DataType, Span};

use crate::LocalRole;

/// Where a captured binding was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingOrigin {
    /// How the binding was introduced.
    pub role: LocalRole,
    /// Where it was introduced.
    pub span: Span,
}

/// One captured outer binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRecord {
    /// The binding's name.
    pub name: String,
    /// The binding's role as recorded by the reader.
    pub role: LocalRole,
    /// The defining site, once resolved.
    pub origin: Option<BindingOrigin>,
    /// The binding's inferred type, once resolved.
    pub ty: Option<DataType>,
}

impl CaptureRecord {
    /// Create an unresolved capture record.
    pub fn new(name: impl Into<String>, role: LocalRole) -> Self {
        Self {
            name: name.into(),
            role,
            origin: None,
            ty: None,
        }
    }

    /// Whether the record's type has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.ty.is_some()
    }

    /// Whether this records the implicit self-reference of an object being defined.
    pub fn is_object_self(&self) -> bool {
        self.role == LocalRole::ObjectSelf
    }
}

/// A set of captured bindings keyed by name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures(BTreeMap<String, CaptureRecord>);

impl Captures {
    /// Create an empty capture set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any record with the same name.
    pub fn insert(&mut self, record: CaptureRecord) {
        self.0.insert(record.name.clone(), record);
    }

    /// Builder form of [`Captures::insert`].
    pub fn with(mut self, record: CaptureRecord) -> Self {
        self.insert(record);
        self
    }

    /// Look a record up by name.
    pub fn get(&self, name: &str) -> Option<&CaptureRecord> {
        self.0.get(name)
    }

    /// Whether a name is captured.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Remove every record matching a predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(&CaptureRecord) -> bool) {
        self.0.retain(|_, record| keep(record));
    }

    /// Iterate over records in name order.
    pub fn iter(&self) -> impl Iterator<Item = &CaptureRecord> {
        self.0.values()
    }

    /// Iterate mutably over records in name order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CaptureRecord> {
        self.0.values_mut()
    }

    /// Number of captured bindings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CaptureRecord> for Captures {
    fn from_iter<I: IntoIterator<Item = CaptureRecord>>(iter: I) -> Self {
        let mut captures = Captures::new();
        for record in iter {
            captures.insert(record);
        }
        captures
    }
}
