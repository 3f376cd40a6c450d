//! Core bootstrapping functionality.

use crate::config::ContainerConfig;
use autowire_di::container::Container;
use config::ConfigError;
use derive_more::Constructor;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Error loading configuration: {0}")]
    ConfigError(#[from] ConfigError),
}

/// Main entrypoint for the application. Builds a [Container] populated with configured
/// parameters and all autowired types found in configured directories.
#[derive(Constructor, Clone, Debug)]
pub struct Application {
    config: ContainerConfig,
}

impl Application {
    /// Creates an application from an explicit config.
    #[inline]
    pub fn from_config(config: ContainerConfig) -> Self {
        Self::new(config)
    }

    /// Creates an application with config loaded from the default file and the environment.
    pub fn from_environment() -> Result<Self, ApplicationError> {
        Ok(Self::new(ContainerConfig::init_from_environment()?))
    }

    #[inline]
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Builds a new container. Parameters are registered before scanning, so they take
    /// precedence over autowired bindings with the same key.
    pub fn build(&self) -> Result<Container, ApplicationError> {
        if self.config.install_tracing_logger {
            install_tracing_logger();
        }

        let mut container = Container::new();
        container.add_parameters(self.config.parameters.clone());

        for directory in &self.config.scan_directories {
            info!(directory = %directory, "Autowiring directory...");
            container.autowire_directory(directory);
        }

        info!(bindings = container.len(), "Container ready.");
        Ok(container)
    }
}

fn install_tracing_logger() {
    // a global subscriber might already be set by the host application
    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        debug!(%error, "Tracing logger not installed.");
    }
}

#[cfg(test)]
mod tests {
    use crate::application::Application;
    use crate::config::ContainerConfig;
    use autowire_di::value::Value;
    use std::collections::HashMap;

    fn config(
        parameters: HashMap<String, Value>,
        scan_directories: Vec<String>,
    ) -> ContainerConfig {
        let mut config = ContainerConfig::default();
        config.install_tracing_logger = false;
        config.parameters = parameters;
        config.scan_directories = scan_directories;
        config
    }

    #[test]
    fn should_register_parameters() {
        let application = Application::from_config(config(
            HashMap::from([
                ("name".to_string(), Value::from("svc")),
                ("retries".to_string(), Value::from(3)),
            ]),
            vec![],
        ));

        let mut container = application.build().unwrap();
        assert_eq!(container.keys(), vec!["name", "retries"]);
        assert_eq!(*container.parameter("retries").unwrap(), Value::Integer(3));
    }

    #[test]
    fn should_skip_missing_directories() {
        let directory = tempfile::tempdir().unwrap();
        let missing = directory.path().join("missing");

        let application = Application::from_config(config(
            HashMap::new(),
            vec![
                directory.path().to_string_lossy().into_owned(),
                missing.to_string_lossy().into_owned(),
            ],
        ));

        assert!(application.build().unwrap().is_empty());
    }

    #[test]
    fn should_build_independent_containers() {
        let application = Application::from_config(config(
            HashMap::from([("name".to_string(), Value::from("svc"))]),
            vec![],
        ));

        let mut first = application.build().unwrap();
        let second = application.build().unwrap();

        first.get("name").unwrap();
        assert!(first.is_instantiated("name"));
        assert!(!second.is_instantiated("name"));
    }
}
