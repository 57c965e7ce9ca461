//! Core functionality for creating and wiring [Bean](crate::bean::Bean) instances.
//!
//! A [BeanContainer] is built from a sequence of [BeanDefinitions](BeanDefinition), processed
//! strictly in order. For each definition, the backing type is resolved by name, a new instance is
//! created and every property gets assigned, either with a literal or with a bean registered
//! earlier. Only then is the bean registered under its id. References are never deferred, so a
//! bean must be declared before any bean referring to it.
//!
//! Any error aborts the whole construction; no partially wired container is ever returned.

use crate::bean::{BeanObject, PropertyValue};
use crate::config::{ContainerConfig, CONFIG_FILE};
use crate::definition::{BeanDefinition, PropertyBinding, PropertySource};
use crate::error::{BeanTypeRegistryError, ContainerError, DefinitionError};
use crate::instance::{BeanInstanceAnyPtr, BeanInstancePtr};
use crate::loader::load_definitions;
use crate::type_registry::{BeanTypeResolver, StaticBeanTypeRegistry};
use fxhash::FxHashMap;
use std::any::type_name;
use std::path::Path;
use tracing::{debug, info};

#[cfg(not(feature = "threadsafe"))]
pub type BeanTypeResolverPtr = Box<dyn BeanTypeResolver>;
#[cfg(feature = "threadsafe")]
pub type BeanTypeResolverPtr = Box<dyn BeanTypeResolver + Send + Sync>;

/// Builder for [BeanContainer] with sensible defaults, for easy construction.
pub struct BeanContainerBuilder {
    type_resolver: BeanTypeResolverPtr,
    allow_bean_overriding: bool,
}

impl BeanContainerBuilder {
    /// Creates a new builder using all statically registered bean types.
    pub fn new() -> Result<Self, BeanTypeRegistryError> {
        Ok(Self {
            type_resolver: Box::new(StaticBeanTypeRegistry::new(false)?),
            allow_bean_overriding: false,
        })
    }

    /// Sets new [BeanTypeResolver].
    pub fn with_type_resolver(mut self, type_resolver: BeanTypeResolverPtr) -> Self {
        self.type_resolver = type_resolver;
        self
    }

    /// Lets later definitions replace earlier ones with the same id.
    pub fn with_bean_overriding(mut self, allow_bean_overriding: bool) -> Self {
        self.allow_bean_overriding = allow_bean_overriding;
        self
    }

    /// Applies relevant settings from a [ContainerConfig].
    pub fn with_config(self, config: &ContainerConfig) -> Self {
        self.with_bean_overriding(config.allow_bean_overriding)
    }

    /// Builds the container from given definitions.
    pub fn build(&self, definitions: &[BeanDefinition]) -> Result<BeanContainer, ContainerError> {
        BeanContainer::new(
            self.type_resolver.as_ref(),
            definitions,
            self.allow_bean_overriding,
        )
    }

    /// Loads definitions from given location and builds the container.
    pub fn build_from_location<P: AsRef<Path>>(
        &self,
        location: P,
    ) -> Result<BeanContainer, ContainerError> {
        let definitions = load_definitions(location)?;
        self.build(&definitions)
    }
}

/// Registry of fully wired beans, available by id.
#[derive(Clone, Debug)]
pub struct BeanContainer {
    beans: FxHashMap<String, BeanInstanceAnyPtr>,
}

impl BeanContainer {
    /// Creates and wires all beans from given definitions, in order.
    pub fn new(
        type_resolver: &dyn BeanTypeResolver,
        definitions: &[BeanDefinition],
        allow_bean_overriding: bool,
    ) -> Result<Self, ContainerError> {
        let mut beans = FxHashMap::default();

        for definition in definitions {
            if !allow_bean_overriding && beans.contains_key(&definition.id) {
                return Err(DefinitionError::DuplicateBeanId(definition.id.clone()).into());
            }

            let instance = Self::create_bean(type_resolver, &beans, definition)?;
            beans.insert(definition.id.clone(), instance);

            debug!("Registered bean '{}'", definition.id);
        }

        info!("Initialized {} beans", beans.len());

        Ok(Self { beans })
    }

    /// Creates the container from a definition document, using all statically registered bean
    /// types.
    pub fn from_location<P: AsRef<Path>>(location: P) -> Result<Self, ContainerError> {
        BeanContainerBuilder::new()?.build_from_location(location)
    }

    /// Creates the container based on [ContainerConfig] read from the environment.
    pub fn from_environment() -> Result<Self, ContainerError> {
        let config = ContainerConfig::init_from_environment()
            .map_err(|error| ContainerError::Configuration {
                location: CONFIG_FILE.to_string(),
                message: error.to_string(),
            })?;

        BeanContainerBuilder::new()?
            .with_config(&config)
            .build_from_location(&config.location)
    }

    /// Returns the bean registered under given id.
    pub fn get_bean(&self, id: &str) -> Result<BeanInstanceAnyPtr, ContainerError> {
        self.beans
            .get(id)
            .cloned()
            .ok_or_else(|| ContainerError::NoSuchBean(id.to_string()))
    }

    /// Typesafe version of [BeanContainer::get_bean].
    #[cfg(feature = "threadsafe")]
    pub fn get_bean_typed<T: Send + Sync + 'static>(
        &self,
        id: &str,
    ) -> Result<BeanInstancePtr<T>, ContainerError> {
        self.get_bean(id)?
            .downcast::<T>()
            .map_err(|_| ContainerError::IncompatibleBean {
                bean_id: id.to_string(),
                target_type: type_name::<T>(),
            })
    }

    /// Typesafe version of [BeanContainer::get_bean].
    #[cfg(not(feature = "threadsafe"))]
    pub fn get_bean_typed<T: 'static>(&self, id: &str) -> Result<BeanInstancePtr<T>, ContainerError> {
        self.get_bean(id)?
            .downcast::<T>()
            .map_err(|_| ContainerError::IncompatibleBean {
                bean_id: id.to_string(),
                target_type: type_name::<T>(),
            })
    }

    /// Checks if there's a bean with given id.
    #[inline]
    pub fn contains_bean(&self, id: &str) -> bool {
        self.beans.contains_key(id)
    }

    /// Returns the ids of all registered beans, in no particular order.
    pub fn bean_ids(&self) -> impl Iterator<Item = &str> {
        self.beans.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }

    fn create_bean(
        type_resolver: &dyn BeanTypeResolver,
        beans: &FxHashMap<String, BeanInstanceAnyPtr>,
        definition: &BeanDefinition,
    ) -> Result<BeanInstanceAnyPtr, ContainerError> {
        let type_definition = type_resolver
            .resolve(&definition.type_name)
            .ok_or_else(|| ContainerError::UnknownType {
                bean_id: definition.id.clone(),
                type_name: definition.type_name.clone(),
            })?;

        let mut bean =
            (type_definition.factory)().map_err(|error| ContainerError::Instantiation {
                bean_id: definition.id.clone(),
                type_name: definition.type_name.clone(),
                message: error.to_string(),
            })?;

        debug!(
            "Created bean '{}' of type {}",
            definition.id,
            bean.type_name()
        );

        for property in &definition.properties {
            Self::wire_property(beans, definition, bean.as_mut(), property)?;
        }

        Ok(bean.into_instance())
    }

    fn wire_property(
        beans: &FxHashMap<String, BeanInstanceAnyPtr>,
        definition: &BeanDefinition,
        bean: &mut dyn BeanObject,
        property: &PropertyBinding,
    ) -> Result<(), ContainerError> {
        let field_name = &property.field_name;
        if !bean.has_property(field_name) {
            return Err(ContainerError::UnknownField {
                bean_id: definition.id.clone(),
                type_name: definition.type_name.clone(),
                field_name: field_name.clone(),
            });
        }

        let (value, reference) = match property.source(&definition.id)? {
            PropertySource::Literal(literal) => (PropertyValue::Literal(literal), None),
            PropertySource::Reference(reference) => {
                let instance = beans.get(reference).cloned().ok_or_else(|| {
                    ContainerError::UnresolvedReference {
                        bean_id: definition.id.clone(),
                        field_name: field_name.clone(),
                        reference: reference.to_string(),
                    }
                })?;

                (PropertyValue::Reference(instance), Some(reference))
            }
        };

        bean.set_property(field_name, value).map_err(|error| {
            ContainerError::from_property_error(&definition.id, field_name, reference, error)
        })?;

        debug!("Wired property '{}' of bean '{}'", field_name, definition.id);

        Ok(())
    }
}
