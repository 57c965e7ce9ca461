//! Reading [BeanDefinitions](BeanDefinition) from configuration documents.
//!
//! Any format supported by the [config] crate can be used. Bean entries are listed under the
//! top-level `beans` key, in the order in which they should be created:
//!
//! ```json
//! {
//!   "beans": [
//!     {
//!       "id": "frontWheel",
//!       "class": "Wheel",
//!       "properties": [
//!         { "name": "brand", "value": "Michelin" },
//!         { "name": "specification", "value": "225/45R17" }
//!       ]
//!     },
//!     {
//!       "id": "car",
//!       "class": "Car",
//!       "properties": [{ "name": "wheel", "ref": "frontWheel" }]
//!     }
//!   ]
//! }
//! ```
//!
//! Each bean requires an `id` and a `class` (or `type`). Each property requires a `name` and
//! exactly one of `value` (literal) or `ref` (id of a bean declared earlier). Empty strings are
//! treated as missing attributes. Both must be strings; formats with untyped scalars (YAML, TOML)
//! need `007` or `1.50` quoted, otherwise the exact text would be lost.

use crate::definition::{non_empty, BeanDefinition, PropertyBinding};
use crate::error::DefinitionError;
use config::{Config, File, Value, ValueKind};
pub use config::FileFormat;
use itertools::Itertools;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Loads definitions from a file. The format is derived from the file extension.
pub fn load_definitions<P: AsRef<Path>>(location: P) -> Result<Vec<BeanDefinition>, DefinitionError> {
    let location = location.as_ref();
    let document = Config::builder()
        .add_source(File::from(location).required(true))
        .build()
        .and_then(|config| config.try_deserialize::<RawBeanDocument>())
        .map_err(|error| DefinitionError::Parse {
            location: location.display().to_string(),
            message: error.to_string(),
        })?;

    let definitions = document.into_definitions()?;
    info!(
        "Loaded {} bean definitions from {}",
        definitions.len(),
        location.display()
    );

    Ok(definitions)
}

/// Loads definitions from an in-memory document in the given format.
pub fn load_definitions_str(
    contents: &str,
    format: FileFormat,
) -> Result<Vec<BeanDefinition>, DefinitionError> {
    let document = Config::builder()
        .add_source(File::from_str(contents, format))
        .build()
        .and_then(|config| config.try_deserialize::<RawBeanDocument>())
        .map_err(|error| DefinitionError::Parse {
            location: format!("<{format:?} string>"),
            message: error.to_string(),
        })?;

    document.into_definitions()
}

#[derive(Deserialize)]
struct RawBeanDocument {
    beans: Option<Vec<RawBean>>,
}

#[derive(Deserialize)]
struct RawBean {
    id: Option<String>,
    #[serde(alias = "type")]
    class: Option<String>,
    properties: Option<Vec<RawProperty>>,
}

#[derive(Deserialize)]
struct RawProperty {
    name: Option<String>,
    value: Option<Value>,
    #[serde(rename = "ref")]
    reference: Option<Value>,
}

impl RawBeanDocument {
    fn into_definitions(self) -> Result<Vec<BeanDefinition>, DefinitionError> {
        self.beans
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, bean)| bean.into_definition(index))
            .try_collect()
    }
}

impl RawBean {
    fn into_definition(self, index: usize) -> Result<BeanDefinition, DefinitionError> {
        let id = non_empty(&self.id)
            .ok_or(DefinitionError::MissingBeanAttribute {
                index,
                attribute: "id",
            })?
            .to_string();
        let type_name = non_empty(&self.class)
            .ok_or(DefinitionError::MissingBeanAttribute {
                index,
                attribute: "class",
            })?
            .to_string();

        let properties: Vec<PropertyBinding> = self
            .properties
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, property)| property.into_binding(&id, index))
            .try_collect()?;

        debug!(
            "Read bean '{}' of type '{}' with {} properties",
            id,
            type_name,
            properties.len()
        );

        Ok(BeanDefinition {
            id,
            type_name,
            properties,
        })
    }
}

impl RawProperty {
    fn into_binding(self, bean_id: &str, index: usize) -> Result<PropertyBinding, DefinitionError> {
        let field_name = non_empty(&self.name)
            .ok_or_else(|| DefinitionError::MissingPropertyName {
                bean_id: bean_id.to_string(),
                index,
            })?
            .to_string();

        let literal = textual_attribute(self.value, bean_id, &field_name, "value")?;
        let reference = textual_attribute(self.reference, bean_id, &field_name, "ref")?;

        let binding = PropertyBinding {
            field_name,
            literal: non_empty(&literal).map(str::to_string),
            reference: non_empty(&reference).map(str::to_string),
        };
        binding.source(bean_id)?;

        Ok(binding)
    }
}

fn textual_attribute(
    value: Option<Value>,
    bean_id: &str,
    field_name: &str,
    attribute: &'static str,
) -> Result<Option<String>, DefinitionError> {
    let Some(value) = value else {
        return Ok(None);
    };

    match value.kind {
        ValueKind::Nil => Ok(None),
        ValueKind::String(text) => Ok(Some(text)),
        kind => Err(DefinitionError::NonTextualProperty {
            bean_id: bean_id.to_string(),
            field_name: field_name.to_string(),
            attribute,
            value: kind.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::definition::PropertySource;
    use crate::error::DefinitionError;
    use crate::loader::{load_definitions, load_definitions_str, FileFormat};

    const CAR_JSON: &str = r#"
        {
          "beans": [
            {
              "id": "frontWheel",
              "class": "Wheel",
              "properties": [
                { "name": "brand", "value": "Michelin" },
                { "name": "specification", "value": "225/45R17" }
              ]
            },
            {
              "id": "car",
              "class": "Car",
              "properties": [{ "name": "wheel", "ref": "frontWheel" }]
            }
          ]
        }
    "#;

    #[test]
    fn should_load_definitions_in_document_order() {
        let definitions = load_definitions_str(CAR_JSON, FileFormat::Json).unwrap();

        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].id, "frontWheel");
        assert_eq!(definitions[0].type_name, "Wheel");
        assert_eq!(
            definitions[0]
                .properties
                .iter()
                .map(|property| property.source("frontWheel").unwrap())
                .collect::<Vec<_>>(),
            vec![
                PropertySource::Literal("Michelin"),
                PropertySource::Literal("225/45R17")
            ]
        );
        assert_eq!(definitions[1].id, "car");
        assert_eq!(
            definitions[1].properties[0].source("car").unwrap(),
            PropertySource::Reference("frontWheel")
        );
    }

    #[test]
    fn should_load_toml_with_type_alias() {
        let definitions = load_definitions_str(
            r#"
            [[beans]]
            id = "engine"
            type = "Engine"

            [[beans]]
            id = "car"
            class = "Car"
            properties = [{ name = "engine", ref = "engine" }]
            "#,
            FileFormat::Toml,
        )
        .unwrap();

        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].type_name, "Engine");
        assert!(definitions[0].properties.is_empty());
        assert_eq!(definitions[1].properties[0].field_name, "engine");
    }

    #[test]
    fn should_accept_document_without_beans() {
        assert!(load_definitions_str("{}", FileFormat::Json)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn should_reject_malformed_document() {
        assert!(matches!(
            load_definitions_str("{ \"beans\": [", FileFormat::Json).unwrap_err(),
            DefinitionError::Parse { .. }
        ));
    }

    #[test]
    fn should_reject_missing_file() {
        assert!(matches!(
            load_definitions("this/file/does/not/exist.json").unwrap_err(),
            DefinitionError::Parse { .. }
        ));
    }

    #[test]
    fn should_reject_bean_without_id() {
        assert_eq!(
            load_definitions_str(
                r#"{ "beans": [{ "class": "Wheel" }] }"#,
                FileFormat::Json
            )
            .unwrap_err(),
            DefinitionError::MissingBeanAttribute {
                index: 0,
                attribute: "id"
            }
        );
    }

    #[test]
    fn should_reject_bean_without_class() {
        assert_eq!(
            load_definitions_str(
                r#"{ "beans": [{ "id": "a", "class": "A" }, { "id": "wheel", "class": "" }] }"#,
                FileFormat::Json
            )
            .unwrap_err(),
            DefinitionError::MissingBeanAttribute {
                index: 1,
                attribute: "class"
            }
        );
    }

    #[test]
    fn should_reject_property_without_name() {
        assert_eq!(
            load_definitions_str(
                r#"{ "beans": [{ "id": "wheel", "class": "Wheel", "properties": [{ "value": "x" }] }] }"#,
                FileFormat::Json
            )
            .unwrap_err(),
            DefinitionError::MissingPropertyName {
                bean_id: "wheel".to_string(),
                index: 0
            }
        );
    }

    #[test]
    fn should_reject_property_with_value_and_ref() {
        assert_eq!(
            load_definitions_str(
                r#"{ "beans": [{ "id": "car", "class": "Car", "properties": [{ "name": "wheel", "value": "x", "ref": "frontWheel" }] }] }"#,
                FileFormat::Json
            )
            .unwrap_err(),
            DefinitionError::AmbiguousProperty {
                bean_id: "car".to_string(),
                field_name: "wheel".to_string()
            }
        );
    }

    #[test]
    fn should_reject_property_without_value_or_ref() {
        assert_eq!(
            load_definitions_str(
                r#"{ "beans": [{ "id": "car", "class": "Car", "properties": [{ "name": "wheel", "value": "" }] }] }"#,
                FileFormat::Json
            )
            .unwrap_err(),
            DefinitionError::EmptyProperty {
                bean_id: "car".to_string(),
                field_name: "wheel".to_string()
            }
        );
    }

    #[test]
    fn should_keep_quoted_literals_verbatim() {
        let definitions = load_definitions_str(
            r#"{ beans: [{ id: engine, class: Engine, properties: [{ name: serial, value: "007" }, { name: ratio, value: "1.50" }] }] }"#,
            FileFormat::Yaml,
        )
        .unwrap();

        assert_eq!(
            definitions[0].properties[0].literal.as_deref(),
            Some("007")
        );
        assert_eq!(
            definitions[0].properties[1].literal.as_deref(),
            Some("1.50")
        );
    }

    #[test]
    fn should_reject_untyped_scalar_literal() {
        assert!(matches!(
            load_definitions_str(
                r#"{ beans: [{ id: engine, class: Engine, properties: [{ name: serial, value: 007 }] }] }"#,
                FileFormat::Yaml,
            )
            .unwrap_err(),
            DefinitionError::NonTextualProperty {
                attribute: "value",
                ..
            }
        ));
    }

    #[test]
    fn should_reject_numeric_reference() {
        assert!(matches!(
            load_definitions_str(
                r#"
                [[beans]]
                id = "car"
                class = "Car"
                properties = [{ name = "wheel", ref = 1 }]
                "#,
                FileFormat::Toml,
            )
            .unwrap_err(),
            DefinitionError::NonTextualProperty {
                attribute: "ref",
                ..
            }
        ));
    }

    #[test]
    fn should_leave_duplicate_ids_to_container() {
        let definitions = load_definitions_str(
            r#"{ "beans": [{ "id": "wheel", "class": "Wheel" }, { "id": "wheel", "class": "Wheel" }] }"#,
            FileFormat::Json,
        )
        .unwrap();

        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].id, definitions[1].id);
    }
}
