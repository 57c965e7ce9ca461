//! Container settings. By default, the settings are created with opinionated default values, which
//! can then be overwritten by environment variables prefixed with `SPRINGTIME_BEANS_` or the
//! `springtime-beans.json` file.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

const CONFIG_ENV_PREFIX: &str = "SPRINGTIME_BEANS";

/// Name of the default settings file.
pub const CONFIG_FILE: &str = "springtime-beans.json";

/// Default location of the bean definition document.
pub const DEFAULT_LOCATION: &str = "beans.json";

/// Settings used when building a [BeanContainer](crate::container::BeanContainer) from the
/// environment.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContainerConfig {
    /// Path to the bean definition document.
    pub location: String,

    /// Let later definitions replace earlier ones with the same id, instead of failing.
    pub allow_bean_overriding: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            allow_bean_overriding: false,
        }
    }
}

impl From<OptionalContainerConfig> for ContainerConfig {
    fn from(value: OptionalContainerConfig) -> Self {
        let default = Self::default();
        Self {
            location: value.location.unwrap_or(default.location),
            allow_bean_overriding: value
                .allow_bean_overriding
                .unwrap_or(default.allow_bean_overriding),
        }
    }
}

impl ContainerConfig {
    /// Sets the definition document location.
    pub fn with_location<T: ToString>(mut self, location: T) -> Self {
        self.location = location.to_string();
        self
    }

    /// Sets bean overriding.
    pub fn with_bean_overriding(mut self, allow_bean_overriding: bool) -> Self {
        self.allow_bean_overriding = allow_bean_overriding;
        self
    }

    /// Reads the settings from the optional settings file and the environment.
    pub fn init_from_environment() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()
            .and_then(|config| config.try_deserialize::<OptionalContainerConfig>())
            .map(|config| config.into())
    }

    /// Reads the settings from an in-memory document.
    pub fn init_from_str(contents: &str, format: FileFormat) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(contents, format))
            .build()
            .and_then(|config| config.try_deserialize::<OptionalContainerConfig>())
            .map(|config| config.into())
    }
}

#[derive(Deserialize)]
struct OptionalContainerConfig {
    location: Option<String>,
    allow_bean_overriding: Option<bool>,
}

#[cfg(test)]
mod tests {
    use crate::config::{ContainerConfig, DEFAULT_LOCATION};
    use config::FileFormat;

    #[test]
    fn should_fill_missing_values_with_defaults() {
        let config = ContainerConfig::init_from_str("{}", FileFormat::Json).unwrap();
        assert_eq!(config, ContainerConfig::default());
        assert_eq!(config.location, DEFAULT_LOCATION);
    }

    #[test]
    fn should_read_values() {
        let config = ContainerConfig::init_from_str(
            r#"{ "location": "conf/beans.toml", "allow_bean_overriding": true }"#,
            FileFormat::Json,
        )
        .unwrap();

        assert_eq!(
            config,
            ContainerConfig::default()
                .with_location("conf/beans.toml")
                .with_bean_overriding(true)
        );
    }

    #[test]
    fn should_read_values_from_environment() {
        std::env::set_var("SPRINGTIME_BEANS_LOCATION", "conf/beans.yaml");
        std::env::set_var("SPRINGTIME_BEANS_ALLOW_BEAN_OVERRIDING", "true");

        let config = ContainerConfig::init_from_environment();

        std::env::remove_var("SPRINGTIME_BEANS_LOCATION");
        std::env::remove_var("SPRINGTIME_BEANS_ALLOW_BEAN_OVERRIDING");

        assert_eq!(
            config.unwrap(),
            ContainerConfig::default()
                .with_location("conf/beans.yaml")
                .with_bean_overriding(true)
        );
    }
}
