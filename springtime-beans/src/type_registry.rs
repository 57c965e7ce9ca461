//! Functionality related to resolving bean types by name. The [container](crate::container) asks a
//! [BeanTypeResolver] for a factory whenever it encounters a type name in a
//! [BeanDefinition](crate::definition::BeanDefinition). Types can be registered automatically,
//! with `#[derive(Bean)]`, or manually.

use crate::bean::{Bean, BeanObjectPtr};
use crate::error::BeanTypeRegistryError;
use crate::instance::ErrorPtr;
use crate::type_registry::internal::{create_bean_object, BeanTypeRegisterer};
use derivative::Derivative;
use fxhash::FxHashMap;
use itertools::Itertools;
#[cfg(test)]
use mockall::automock;
use std::any::{type_name, TypeId};
use tracing::debug;

/// Constructor of a new, unwired bean.
pub type BeanFactory = fn() -> Result<BeanObjectPtr, ErrorPtr>;

/// Definition of a type which can back beans.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct BeanTypeDefinition {
    /// Names under which the type can be referenced from configuration. Derive-based beans use
    /// `module::path::Type` unless the names are given explicitly.
    pub names: Vec<String>,

    /// Name of the concrete Rust type, for diagnostics.
    pub rust_type_name: &'static str,

    pub type_id: TypeId,

    #[derivative(Debug = "ignore")]
    pub factory: BeanFactory,
}

/// Resolves type names used in bean definitions.
#[cfg_attr(test, automock)]
pub trait BeanTypeResolver {
    /// Returns the definition registered under given name, if any.
    fn resolve(&self, type_name: &str) -> Option<BeanTypeDefinition>;
}

/// Registry of bean types initialized from statically registered types, which can be extended
/// manually.
#[derive(Clone, Debug, Default)]
pub struct StaticBeanTypeRegistry {
    definitions: FxHashMap<String, BeanTypeDefinition>,
    allow_type_overriding: bool,
}

impl StaticBeanTypeRegistry {
    /// Creates a registry with all types registered via `#[derive(Bean)]`.
    pub fn new(allow_type_overriding: bool) -> Result<Self, BeanTypeRegistryError> {
        let static_definitions = inventory::iter::<BeanTypeRegisterer>
            .into_iter()
            .map(|registerer| (registerer.register)())
            .collect_vec();

        let mut registry = Self::empty(allow_type_overriding);
        for definition in static_definitions {
            registry.try_register(definition)?;
        }

        debug!(
            "Registered {} statically declared bean type names",
            registry.definitions.len()
        );

        Ok(registry)
    }

    /// Creates a registry without any types.
    pub fn empty(allow_type_overriding: bool) -> Self {
        Self {
            definitions: Default::default(),
            allow_type_overriding,
        }
    }

    /// Registers type `T` under given names.
    pub fn register<T: Bean, N: ToString>(
        &mut self,
        names: &[N],
    ) -> Result<(), BeanTypeRegistryError> {
        self.try_register(BeanTypeDefinition {
            names: names.iter().map(ToString::to_string).collect(),
            rust_type_name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
            factory: create_bean_object::<T>,
        })
    }

    /// Registers a custom factory. Useful when types need to be constructed in a way which is not
    /// expressible via [Bean::create].
    pub fn register_factory(
        &mut self,
        definition: BeanTypeDefinition,
    ) -> Result<(), BeanTypeRegistryError> {
        self.try_register(definition)
    }

    /// Returns all registered type names.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    fn try_register(&mut self, definition: BeanTypeDefinition) -> Result<(), BeanTypeRegistryError> {
        if !self.allow_type_overriding {
            if let Some(name) = definition
                .names
                .iter()
                .find(|name| self.definitions.contains_key(name.as_str()))
            {
                return Err(BeanTypeRegistryError::DuplicateTypeName(name.clone()));
            }
        }

        for name in &definition.names {
            self.definitions.insert(name.clone(), definition.clone());
        }

        Ok(())
    }
}

impl BeanTypeResolver for StaticBeanTypeRegistry {
    #[inline]
    fn resolve(&self, type_name: &str) -> Option<BeanTypeDefinition> {
        self.definitions.get(type_name).cloned()
    }
}

#[doc(hidden)]
pub mod internal {
    use crate::bean::{Bean, BeanObjectPtr};
    use crate::instance::ErrorPtr;
    use crate::type_registry::BeanTypeDefinition;
    use inventory::collect;
    pub use inventory::submit;

    pub struct BeanTypeRegisterer {
        pub register: fn() -> BeanTypeDefinition,
    }

    collect!(BeanTypeRegisterer);

    /// Factory for types implementing [Bean].
    pub fn create_bean_object<T: Bean>() -> Result<BeanObjectPtr, ErrorPtr> {
        T::create().map(|bean| Box::new(bean) as BeanObjectPtr)
    }
}

#[cfg(test)]
mod tests {
    use crate::bean::{Bean, BeanObjectPtr, PropertySetter};
    use crate::error::BeanTypeRegistryError;
    use crate::instance::{BeanInstancePtr, ErrorPtr};
    use crate::type_registry::{BeanTypeDefinition, BeanTypeResolver, StaticBeanTypeRegistry};
    use std::any::TypeId;

    #[derive(Default, Debug)]
    struct Engine;

    impl Bean for Engine {
        fn create() -> Result<Self, ErrorPtr> {
            Ok(Engine)
        }

        fn property_setters() -> &'static [PropertySetter<Self>] {
            &[]
        }
    }

    fn failing_factory() -> Result<BeanObjectPtr, ErrorPtr> {
        Err(BeanInstancePtr::new(std::fmt::Error) as ErrorPtr)
    }

    #[test]
    fn should_register_type_under_all_names() {
        let mut registry = StaticBeanTypeRegistry::empty(false);
        registry.register::<Engine, _>(&["Engine", "motor"]).unwrap();

        assert_eq!(
            registry.resolve("Engine").unwrap().type_id,
            TypeId::of::<Engine>()
        );
        assert!(registry.type_names().any(|name| name == "motor"));
        assert!(registry.resolve("Wheel").is_none());
        assert!((registry.resolve("motor").unwrap().factory)().is_ok());
    }

    #[test]
    fn should_not_register_duplicate_name() {
        let mut registry = StaticBeanTypeRegistry::empty(false);
        registry.register::<Engine, _>(&["Engine"]).unwrap();

        assert_eq!(
            registry.register::<Engine, _>(&["Engine"]).unwrap_err(),
            BeanTypeRegistryError::DuplicateTypeName("Engine".to_string())
        );
    }

    #[test]
    fn should_override_duplicate_name() {
        let mut registry = StaticBeanTypeRegistry::empty(true);
        registry.register::<Engine, _>(&["Engine"]).unwrap();
        registry
            .register_factory(BeanTypeDefinition {
                names: vec!["Engine".to_string()],
                rust_type_name: "failing",
                type_id: TypeId::of::<u8>(),
                factory: failing_factory,
            })
            .unwrap();

        assert_eq!(registry.resolve("Engine").unwrap().rust_type_name, "failing");
    }
}
