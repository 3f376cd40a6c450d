//! A string-keyed dependency container with automatic registration of annotated types.
//!
//! The [Container](container::Container) maps keys to factories and lazily constructs a single
//! instance per key. Types deriving [Injectable] and marked with `#[autowire]` can be registered
//! automatically by scanning the source directory declaring them - constructor parameters of
//! primitive types are then resolved by name from bound [parameters](value::Value), while other
//! parameters are resolved by the name of their type.
//!
//! ```
//! use autowire_di::container::Container;
//! use autowire_di::metadata::{AttributeMetadataReader, Injectable};
//! use autowire_di::scanner::Autowirer;
//! use autowire_di::value::Value;
//! use std::any::type_name;
//!
//! #[derive(autowire_di::Injectable)]
//! #[autowire]
//! struct Client {
//!     name: String,
//!     retries: i32,
//! }
//!
//! let mut container = Container::new();
//! container.add_parameters([("name", Value::from("svc")), ("retries", Value::from(3))]);
//! Autowirer::new(AttributeMetadataReader).autowire_type(&mut container, &Client::reflect());
//!
//! let client = container.get_typed::<Client>(type_name::<Client>()).unwrap();
//! assert_eq!(client.name, "svc");
//! assert_eq!(client.retries, 3);
//! ```
//!
//! ### Features
//!
//! * `derive` - automatically derive reflection with `#[derive(Injectable)]` (default)

pub mod classifier;
pub mod container;
mod error;
pub mod instance;
pub mod metadata;
pub mod scanner;
pub mod value;

pub use error::ContainerError;

#[cfg(feature = "derive")]
pub use autowire_di_derive::Injectable;
