//! Bootstrap configuration for the [Container](autowire_di::container::Container).
//!
//! [ContainerConfig] starts from opinionated default values, which can then be overwritten by an
//! `autowire.json` file and by environment variables prefixed with `AUTOWIRE_`. Nested keys use
//! `__` as the separator, so `AUTOWIRE_PARAMETERS__TIMEOUT=30` sets the `timeout` parameter.
//! `AUTOWIRE_SCAN_DIRECTORIES` accepts a comma-separated list.
//!
//! Key names are case-insensitive and get lowercased when loaded.

use autowire_di::value::Value;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const CONFIG_ENV_PREFIX: &str = "AUTOWIRE";
const CONFIG_ENV_SEPARATOR: &str = "__";
const SCAN_DIRECTORIES_KEY: &str = "scan_directories";

/// Name of the default config file.
pub const CONFIG_FILE: &str = "autowire.json";

/// Configuration consumed by the [Application](crate::application::Application).
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerConfig {
    /// Should a default tracing logger be installed when building the container.
    pub install_tracing_logger: bool,
    /// Directories (or single files) scanned for autowired types, in order.
    pub scan_directories: Vec<String>,
    /// Scalar parameters bound by name before scanning.
    pub parameters: HashMap<String, Value>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            install_tracing_logger: true,
            scan_directories: vec![],
            parameters: HashMap::new(),
        }
    }
}

impl From<OptionalContainerConfig> for ContainerConfig {
    fn from(value: OptionalContainerConfig) -> Self {
        let default = Self::default();
        Self {
            install_tracing_logger: value
                .install_tracing_logger
                .unwrap_or(default.install_tracing_logger),
            scan_directories: value
                .scan_directories
                .unwrap_or(default.scan_directories),
            parameters: value.parameters.unwrap_or(default.parameters),
        }
    }
}

impl ContainerConfig {
    /// Loads the config from [CONFIG_FILE] in the current directory, if present, and the
    /// environment.
    pub fn init_from_environment() -> Result<Self, ConfigError> {
        Self::init_from_file(CONFIG_FILE)
    }

    /// Loads the config from given file, if present, and the environment. Environment variables
    /// take precedence over the file.
    pub fn init_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(CONFIG_ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key(SCAN_DIRECTORIES_KEY),
            )
            .build()
            .and_then(|config| config.try_deserialize::<OptionalContainerConfig>())
            .map(|config| config.into())
    }
}

#[derive(Deserialize)]
struct OptionalContainerConfig {
    install_tracing_logger: Option<bool>,
    scan_directories: Option<Vec<String>>,
    parameters: Option<HashMap<String, Value>>,
}
