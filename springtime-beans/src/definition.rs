//! Declarative bean descriptions produced by the [loader](crate::loader) and consumed by the
//! [container](crate::container).

use crate::error::DefinitionError;

/// Description of a single bean: its id, the name of the backing type and the values of its
/// fields.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct BeanDefinition {
    /// Unique, non-empty id used for lookups and references.
    pub id: String,

    /// Name of the backing type, as registered in a
    /// [BeanTypeResolver](crate::type_registry::BeanTypeResolver).
    pub type_name: String,

    /// Field assignments, applied in declaration order.
    pub properties: Vec<PropertyBinding>,
}

impl BeanDefinition {
    pub fn new<I: ToString, T: ToString>(id: I, type_name: T) -> Self {
        Self {
            id: id.to_string(),
            type_name: type_name.to_string(),
            properties: Vec::new(),
        }
    }

    /// Adds a literal field assignment.
    pub fn with_literal<F: ToString, V: ToString>(mut self, field_name: F, value: V) -> Self {
        self.properties.push(PropertyBinding {
            field_name: field_name.to_string(),
            literal: Some(value.to_string()),
            reference: None,
        });
        self
    }

    /// Adds a field assignment referencing another bean by id.
    pub fn with_reference<F: ToString, R: ToString>(mut self, field_name: F, reference: R) -> Self {
        self.properties.push(PropertyBinding {
            field_name: field_name.to_string(),
            literal: None,
            reference: Some(reference.to_string()),
        });
        self
    }
}

/// A single field assignment. Exactly one of `literal` and `reference` is expected to be set to a
/// non-empty value; the [loader](crate::loader) rejects anything else.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PropertyBinding {
    pub field_name: String,
    pub literal: Option<String>,
    pub reference: Option<String>,
}

/// Where the value for a [PropertyBinding] comes from.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum PropertySource<'a> {
    Literal(&'a str),
    Reference(&'a str),
}

impl PropertyBinding {
    /// Returns the value source, enforcing that exactly one of `literal` and `reference` is set.
    /// Empty strings count as not set.
    pub fn source(&self, bean_id: &str) -> Result<PropertySource<'_>, DefinitionError> {
        match (non_empty(&self.literal), non_empty(&self.reference)) {
            (Some(literal), None) => Ok(PropertySource::Literal(literal)),
            (None, Some(reference)) => Ok(PropertySource::Reference(reference)),
            (Some(_), Some(_)) => Err(DefinitionError::AmbiguousProperty {
                bean_id: bean_id.to_string(),
                field_name: self.field_name.clone(),
            }),
            (None, None) => Err(DefinitionError::EmptyProperty {
                bean_id: bean_id.to_string(),
                field_name: self.field_name.clone(),
            }),
        }
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
