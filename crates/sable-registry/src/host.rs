//! The host platform's built-in types.

use sable_core::{
    ClassEntry, DataType, InterfaceEntry, MethodAttrs, MethodSignature, TypeEntry, TypeHash,
    primitives,
};

use crate::TypeRegistry;

/// The bookkeeping interface every anonymous object implements.
pub const METADATA_INTERFACE: &str = "sable.lang.IObj";

/// The root exception type.
pub const EXCEPTION: &str = "Exception";

fn method(name: &str, params: Vec<DataType>, ret: DataType, attrs: MethodAttrs) -> MethodSignature {
    MethodSignature::new(name, TypeHash::EMPTY, params, ret, attrs)
}

impl TypeRegistry {
    /// Create a registry holding the primitives, the root object type, `string`,
    /// the root exception type, and the metadata interface.
    pub fn with_host_types() -> Self {
        let mut registry = Self::with_primitives();
        registry.register_host_types();
        registry
    }

    fn register_host_types(&mut self) {
        let overridable = MethodAttrs::PUBLIC | MethodAttrs::VIRTUAL;
        let object = ClassEntry::host("object")
            .with_method(method("ToString", vec![], DataType::simple(primitives::STRING), overridable))
            .with_method(method("Equals", vec![DataType::object()], DataType::simple(primitives::BOOL), overridable))
            .with_method(method("GetHashCode", vec![], DataType::simple(primitives::INT32), overridable))
            .with_method(method("GetType", vec![], DataType::object(), MethodAttrs::PUBLIC));

        let string = ClassEntry::host("string")
            .with_base(primitives::OBJECT)
            .with_method(method(
                "ToString",
                vec![],
                DataType::simple(primitives::STRING),
                overridable | MethodAttrs::FINAL,
            ))
            .as_sealed();

        let exception = ClassEntry::host(EXCEPTION)
            .with_base(primitives::OBJECT)
            .with_method(method("get_Message", vec![], DataType::simple(primitives::STRING), overridable));

        let meta_hash = TypeHash::from_name(METADATA_INTERFACE);
        let metadata = InterfaceEntry::host(METADATA_INTERFACE)
            .with_method(MethodSignature::interface("meta", TypeHash::EMPTY, vec![], DataType::object()))
            .with_method(MethodSignature::interface(
                "withMeta",
                TypeHash::EMPTY,
                vec![DataType::object()],
                DataType::simple(meta_hash),
            ));

        for entry in [
            TypeEntry::from(object),
            string.into(),
            exception.into(),
            metadata.into(),
        ] {
            self.insert(entry);
        }
    }
}
