//! Bootstrapping of an [autowire_di] container from configuration.
//!
//! Wiring a container by hand means registering parameters and scanning source directories in
//! `main()`. This crate provides an [Application](application::Application) which does that from a
//! [ContainerConfig](config::ContainerConfig) loaded from a file and the environment, and also
//! configures supporting infrastructure, e.g. logging.
//!
//! ```
//! use autowire::application::Application;
//! use autowire::config::ContainerConfig;
//!
//! let mut config = ContainerConfig::default();
//! config.install_tracing_logger = false;
//!
//! let container = Application::from_config(config).build().unwrap();
//! assert!(container.is_empty());
//! ```

pub mod application;
pub mod config;
