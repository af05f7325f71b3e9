//! Generic interface definitions and their instantiation.
//!
//! The host exposes one invoker definition per arity, `Invoker`N<T1..TN, R>`,
//! each with a single `invoke(T1..TN) -> R` method. Instances are produced by
//! substituting the definition's parameters and are cached by the hash of the
//! definition and its arguments.

use rustc_hash::FxHashMap;
use sable_core::{DataType, InterfaceEntry, MethodSignature, RegistrationError, TypeHash};
use tracing::trace;

use crate::TypeRegistry;

/// Namespace-qualified stem of the invoker definitions.
pub const INVOKER_TEMPLATE: &str = "sable.lang.Invoker";

/// The single method of every invoker interface.
pub const INVOKE_METHOD: &str = "invoke";

/// Map from generic parameter hash to concrete type.
pub type SubstitutionMap = FxHashMap<TypeHash, DataType>;

/// Name of the invoker definition taking `arity` arguments.
pub fn invoker_template_name(arity: usize) -> String {
    format!("{INVOKER_TEMPLATE}`{arity}")
}

/// Build a substitution map from generic parameters and type arguments.
pub fn build_substitution_map(
    name: &str,
    template_params: &[TypeHash],
    type_args: &[DataType],
) -> Result<SubstitutionMap, RegistrationError> {
    if template_params.len() != type_args.len() {
        return Err(RegistrationError::TemplateArgCountMismatch {
            name: name.to_string(),
            expected: template_params.len(),
            got: type_args.len(),
        });
    }

    Ok(template_params
        .iter()
        .copied()
        .zip(type_args.iter().copied())
        .collect())
}

/// Substitute generic parameters in a type, keeping its passing mode.
pub fn substitute_type(data_type: DataType, subst_map: &SubstitutionMap) -> DataType {
    match subst_map.get(&data_type.type_hash) {
        Some(replacement) => DataType {
            type_hash: replacement.type_hash,
            ref_modifier: data_type.ref_modifier,
        },
        None => data_type,
    }
}

impl TypeRegistry {
    /// Get the invoker definition for an arity, registering it on first use.
    pub fn invoker_template(&mut self, arity: usize) -> Result<TypeHash, RegistrationError> {
        let name = invoker_template_name(arity);
        if let Some(entry) = self.get_by_name(&name) {
            return Ok(entry.type_hash());
        }

        let mut params: Vec<TypeHash> = (1..=arity)
            .map(|i| TypeHash::from_name(&format!("{name}::T{i}")))
            .collect();
        let ret = TypeHash::from_name(&format!("{name}::R"));
        let invoke = MethodSignature::interface(
            INVOKE_METHOD,
            TypeHash::EMPTY,
            params.iter().copied().map(DataType::simple).collect(),
            DataType::simple(ret),
        );
        params.push(ret);

        let entry = InterfaceEntry::host(name)
            .with_template_params(params)
            .with_method(invoke);
        self.register(entry)
    }

    /// Instantiate a generic interface definition with concrete type arguments.
    ///
    /// Returns the cached instance when one already exists.
    pub fn instantiate_interface(
        &mut self,
        template: TypeHash,
        args: &[DataType],
    ) -> Result<TypeHash, RegistrationError> {
        let def = self
            .interface(template)
            .ok_or_else(|| RegistrationError::UnknownType {
                name: self.type_name(template),
            })?;
        if !def.is_template() {
            return Err(RegistrationError::NotATemplate {
                name: def.name.clone(),
            });
        }
        let subst = build_substitution_map(&def.name, &def.template_params, args)?;

        let arg_hashes: Vec<TypeHash> = args.iter().map(|a| a.type_hash).collect();
        let hash = TypeHash::from_template_instance(template, &arg_hashes);
        if self.contains(hash) {
            trace!(instance = %self.type_name(hash), "template instance cache hit");
            return Ok(hash);
        }

        let name = format!("{}<{}>", def.name, self.display_types(args));
        let methods = def
            .methods
            .iter()
            .map(|m| MethodSignature {
                declaring_type: hash,
                params: m.params.iter().map(|p| substitute_type(*p, &subst)).collect(),
                return_type: substitute_type(m.return_type, &subst),
                ..m.clone()
            })
            .collect();
        let instance = InterfaceEntry {
            name,
            type_hash: hash,
            source: def.source,
            methods,
            base_interfaces: def.base_interfaces.clone(),
            template_params: Vec::new(),
            template: Some(template),
            type_args: args.to_vec(),
        };

        trace!(instance = %instance.name, "instantiated generic interface");
        self.register(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::primitives;

    #[test]
    fn invoker_template_is_registered_once() {
        let mut registry = TypeRegistry::with_host_types();
        let first = registry.invoker_template(2).unwrap();
        let second = registry.invoker_template(2).unwrap();
        assert_eq!(first, second);

        let def = registry.interface(first).unwrap();
        assert_eq!(def.name, "sable.lang.Invoker`2");
        assert_eq!(def.template_params.len(), 3);
        assert_eq!(def.methods[0].arity(), 2);
    }

    #[test]
    fn instantiation_substitutes_and_caches() {
        let mut registry = TypeRegistry::with_host_types();
        let def = registry.invoker_template(1).unwrap();
        let args = [DataType::simple(primitives::INT32), DataType::simple(primitives::STRING)];

        let instance = registry.instantiate_interface(def, &args).unwrap();
        let count = registry.type_count();
        assert_eq!(registry.instantiate_interface(def, &args).unwrap(), instance);
        assert_eq!(registry.type_count(), count);

        let iface = registry.interface(instance).unwrap();
        assert_eq!(iface.name, "sable.lang.Invoker`1<int, string>");
        assert_eq!(iface.template, Some(def));
        let invoke = &iface.methods[0];
        assert_eq!(invoke.declaring_type, instance);
        assert_eq!(invoke.params, vec![DataType::simple(primitives::INT32)]);
        assert_eq!(invoke.return_type, DataType::simple(primitives::STRING));
    }

    #[test]
    fn instantiation_checks_argument_count() {
        let mut registry = TypeRegistry::with_host_types();
        let def = registry.invoker_template(1).unwrap();
        let result = registry.instantiate_interface(def, &[DataType::object()]);
        assert!(matches!(
            result,
            Err(RegistrationError::TemplateArgCountMismatch {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn non_generic_interface_cannot_be_instantiated() {
        let mut registry = TypeRegistry::with_host_types();
        let iobj = registry.get_by_name(crate::METADATA_INTERFACE).unwrap().type_hash();
        assert!(matches!(
            registry.instantiate_interface(iobj, &[]),
            Err(RegistrationError::NotATemplate { .. })
        ));
    }

    #[test]
    fn substitution_keeps_passing_mode() {
        let t = TypeHash::from_name("T");
        let map = build_substitution_map("X", &[t], &[DataType::simple(primitives::INT32)]).unwrap();
        assert_eq!(
            substitute_type(DataType::by_ref(t), &map),
            DataType::by_ref(primitives::INT32)
        );
        assert_eq!(substitute_type(DataType::object(), &map), DataType::object());
    }
}
