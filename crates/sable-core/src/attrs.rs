//! Member attribute flags for declared fields and methods.

use bitflags::bitflags;

bitflags! {
    /// Attributes of a declared field.
    ///
    /// # Example
    ///
    /// ```
    /// use sable_core::FieldAttrs;
    ///
    /// let write_once = FieldAttrs::PUBLIC | FieldAttrs::INIT_ONLY;
    /// assert!(write_once.contains(FieldAttrs::INIT_ONLY));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldAttrs: u32 {
        /// Visible outside the declaring type.
        const PUBLIC = 1 << 0;
        /// Assignable only during construction.
        const INIT_ONLY = 1 << 1;
        /// Every access is a volatile read or write.
        const VOLATILE = 1 << 2;
        /// Belongs to the type rather than to instances.
        const STATIC = 1 << 3;
    }
}

bitflags! {
    /// Attributes of a declared method.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MethodAttrs: u32 {
        /// Visible outside the declaring type.
        const PUBLIC = 1 << 0;
        /// Dispatched through the type's method table.
        const VIRTUAL = 1 << 1;
        /// Declared without a body.
        const ABSTRACT = 1 << 2;
        /// Cannot be overridden further.
        const FINAL = 1 << 3;
        /// Belongs to the type rather than to instances.
        const STATIC = 1 << 4;
    }
}

impl MethodAttrs {
    /// Attributes for an interface method declaration.
    pub const INTERFACE: MethodAttrs = MethodAttrs::PUBLIC
        .union(MethodAttrs::VIRTUAL)
        .union(MethodAttrs::ABSTRACT);

    /// Attributes for a method a synthesized type implements.
    pub const IMPLEMENTATION: MethodAttrs = MethodAttrs::PUBLIC
        .union(MethodAttrs::VIRTUAL)
        .union(MethodAttrs::FINAL);

    /// Whether a subtype may supply its own implementation.
    pub fn is_overridable(self) -> bool {
        self.contains(MethodAttrs::VIRTUAL)
            && !self.intersects(MethodAttrs::FINAL | MethodAttrs::STATIC)
    }
}
