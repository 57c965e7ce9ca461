use thiserror::Error;

/// Errors related to reading bean definitions from a configuration source.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum DefinitionError {
    #[error("Cannot parse bean configuration '{location}': {message}")]
    Parse { location: String, message: String },
    #[error("Bean entry #{index} is missing the required '{attribute}' attribute")]
    MissingBeanAttribute {
        index: usize,
        attribute: &'static str,
    },
    #[error("Property entry #{index} of bean '{bean_id}' is missing the required 'name' attribute")]
    MissingPropertyName { bean_id: String, index: usize },
    #[error("Property '{field_name}' of bean '{bean_id}' has neither a 'value' nor a 'ref' set")]
    EmptyProperty { bean_id: String, field_name: String },
    #[error("Property '{field_name}' of bean '{bean_id}' has both 'value' and 'ref' set")]
    AmbiguousProperty { bean_id: String, field_name: String },
    #[error("Attribute '{attribute}' of property '{field_name}' of bean '{bean_id}' is not a string: {value} (quote it to keep the exact text)")]
    NonTextualProperty {
        bean_id: String,
        field_name: String,
        attribute: &'static str,
        value: String,
    },
    #[error("Attempted to declare a duplicated bean with id: {0}")]
    DuplicateBeanId(String),
}

/// Error related to type registries.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum BeanTypeRegistryError {
    #[error("Attempted to register a duplicated bean type with name: {0}")]
    DuplicateTypeName(String),
}

/// Low-level failure of a single field assignment. The container attaches bean context and
/// converts it into a [ContainerError].
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum PropertyError {
    #[error("Cannot convert literal '{value}' to {target_type}")]
    InvalidLiteral {
        value: String,
        target_type: &'static str,
    },
    #[error("Field expects a {expected}, but was given a {actual}")]
    IncompatibleProperty {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("Referenced instance is not of type {0}")]
    IncompatibleReference(&'static str),
}

/// Errors related to building the bean container and looking up beans.
#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum ContainerError {
    #[error("{0}")]
    Definition(#[from] DefinitionError),
    #[error("{0}")]
    TypeRegistry(#[from] BeanTypeRegistryError),
    #[error("Cannot read container configuration from '{location}' and the environment: {message}")]
    Configuration { location: String, message: String },
    #[error("Cannot resolve type '{type_name}' of bean '{bean_id}'")]
    UnknownType { bean_id: String, type_name: String },
    #[error("Cannot instantiate bean '{bean_id}' of type '{type_name}': {message}")]
    Instantiation {
        bean_id: String,
        type_name: String,
        message: String,
    },
    #[error("Type '{type_name}' of bean '{bean_id}' has no field named '{field_name}'")]
    UnknownField {
        bean_id: String,
        type_name: String,
        field_name: String,
    },
    #[error("Invalid literal for field '{field_name}' of bean '{bean_id}': {source}")]
    InvalidLiteral {
        bean_id: String,
        field_name: String,
        source: PropertyError,
    },
    #[error("Cannot assign field '{field_name}' of bean '{bean_id}': {source}")]
    IncompatibleProperty {
        bean_id: String,
        field_name: String,
        source: PropertyError,
    },
    #[error("Bean '{bean_id}' references '{reference}' in field '{field_name}', which is not registered yet")]
    UnresolvedReference {
        bean_id: String,
        field_name: String,
        reference: String,
    },
    #[error("Bean '{bean_id}' references '{reference}' in field '{field_name}': {source}")]
    IncompatibleReference {
        bean_id: String,
        field_name: String,
        reference: String,
        source: PropertyError,
    },
    #[error("There is no bean with id: {0}")]
    NoSuchBean(String),
    #[error("Tried to downcast bean '{bean_id}' to incompatible type: {target_type}")]
    IncompatibleBean {
        bean_id: String,
        target_type: &'static str,
    },
}

impl ContainerError {
    pub(crate) fn from_property_error(
        bean_id: &str,
        field_name: &str,
        reference: Option<&str>,
        error: PropertyError,
    ) -> Self {
        match (&error, reference) {
            (PropertyError::InvalidLiteral { .. }, _) => Self::InvalidLiteral {
                bean_id: bean_id.to_string(),
                field_name: field_name.to_string(),
                source: error,
            },
            (PropertyError::IncompatibleReference(..), Some(reference)) => {
                Self::IncompatibleReference {
                    bean_id: bean_id.to_string(),
                    field_name: field_name.to_string(),
                    reference: reference.to_string(),
                    source: error,
                }
            }
            _ => Self::IncompatibleProperty {
                bean_id: bean_id.to_string(),
                field_name: field_name.to_string(),
                source: error,
            },
        }
    }
}
