//! Type metadata consumed by the [scanner](crate::scanner).
//!
//! Rust has no runtime reflection, so each type taking part in autowiring describes itself with a
//! [ReflectedType]: its fully-qualified name, the source file declaring it, its constructor
//! parameters and the optional autowire marker. The description is generated by
//! `#[derive(Injectable)]` and registered in a static table, which the scanner queries by source
//! file when walking a directory tree.
//!
//! ```
//! use autowire_di::Injectable;
//! use std::sync::Arc;
//!
//! #[derive(Injectable)]
//! #[autowire]
//! struct Repo;
//!
//! #[derive(Injectable)]
//! #[autowire]
//! struct Service {
//!     // dependency - resolved by the type name of `Repo`
//!     repo: Arc<Repo>,
//!     // scalar - resolved by the parameter name `retries`
//!     retries: u32,
//! }
//!
//! #[derive(Injectable)]
//! #[autowire(key = "main-widget", args = [42, "x"])]
//! #[injectable(constructor = "Widget::new")]
//! struct Widget {
//!     size: i64,
//!     label: String,
//! }
//!
//! impl Widget {
//!     fn new(size: i64, label: String) -> Self {
//!         Self { size, label }
//!     }
//! }
//! ```
//!
//! ### Supported `#[autowire]` arguments
//!
//! * `key = "key"` - register the type under given key, instead of its fully-qualified type name
//! * `args = [...]` - construct the type with given literal arguments (integers, floats, strings,
//! booleans and nested arrays), passed positionally, instead of resolving its parameters
//!
//! A type deriving `Injectable` without the `#[autowire]` marker is reflected, but skipped by the
//! scanner.
//!
//! ### Supported `#[injectable]` arguments
//!
//! * `constructor = "path"` - call `path(fields...)` to construct the type, instead of using a
//! struct literal; parameters must be in the same order as fields in the struct. Types without
//! fields are never constructed this way.

use crate::error::ContainerError;
use crate::instance::InstancePtr;
use crate::value::Value;
use derivative::Derivative;
use itertools::Itertools;
#[cfg(test)]
use mockall::automock;
use std::any::Any;
use std::fs;
use std::path::{Path, PathBuf};

/// Autowire intent reported by a [MetadataReader].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AutowireDescriptor {
    /// Binding key to use instead of the fully-qualified type name.
    pub explicit_key: Option<String>,

    /// Literal constructor arguments. An empty list is treated the same as no list.
    pub literal_arguments: Option<Vec<Value>>,
}

/// A single constructor parameter, as declared.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConstructorParameter {
    pub name: &'static str,
    pub type_name: &'static str,
}

/// Constructs an instance from positional arguments.
pub type ConstructorFunction =
    fn(arguments: Vec<InstancePtr>) -> Result<InstancePtr, ContainerError>;

/// Creates an instance without running any constructor logic.
pub type InstantiateFunction = fn() -> InstancePtr;

/// Static description of an injectable type.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct ReflectedType {
    /// Fully-qualified type name; the default binding key.
    pub type_name: &'static str,

    pub module_path: &'static str,

    /// Source file declaring the type, as seen by the compiler. Usually relative to the
    /// workspace or package root.
    pub source_file: &'static str,

    /// Manifest directory of the crate declaring the type.
    pub manifest_dir: &'static str,

    /// Constructor parameters in declaration order.
    pub parameters: Vec<ConstructorParameter>,

    /// Autowire marker, if present on the type.
    pub autowire: Option<AutowireDescriptor>,

    #[derivative(Debug = "ignore")]
    pub constructor: ConstructorFunction,

    /// Present only for types without constructor parameters.
    #[derivative(Debug = "ignore")]
    pub instantiate: Option<InstantiateFunction>,
}

impl ReflectedType {
    /// Resolves [ReflectedType::source_file] to a canonical absolute path. The manifest directory
    /// and then each of its ancestors is tried as the root, until the declaring file is found.
    pub fn source_path(&self) -> Option<PathBuf> {
        Path::new(self.manifest_dir)
            .ancestors()
            .map(|root| root.join(self.source_file))
            .find(|path| path.is_file())
            .and_then(|path| fs::canonicalize(path).ok())
    }
}

/// Types which can describe themselves for autowiring. Typically derived with
/// `#[derive(Injectable)]`.
pub trait Injectable: Any + Send + Sync + Sized {
    fn reflect() -> ReflectedType;
}

/// Reader of autowire markers.
#[cfg_attr(test, automock)]
pub trait MetadataReader {
    /// Returns the autowire intent for given type, or `None` if the type is not marked.
    fn read(&self, reflected_type: &ReflectedType) -> Option<AutowireDescriptor>;
}

/// [MetadataReader] returning the marker captured from the `#[autowire]` attribute.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttributeMetadataReader;

impl MetadataReader for AttributeMetadataReader {
    #[inline]
    fn read(&self, reflected_type: &ReflectedType) -> Option<AutowireDescriptor> {
        reflected_type.autowire.clone()
    }
}

/// Returns all statically registered types, ordered by type name.
pub fn reflected_types() -> Vec<ReflectedType> {
    inventory::iter::<internal::ReflectedTypeRegisterer>
        .into_iter()
        .map(|registerer| (registerer.register)())
        .sorted_by(|lhs, rhs| lhs.type_name.cmp(rhs.type_name))
        .collect_vec()
}

#[doc(hidden)]
pub mod internal {
    use crate::error::ContainerError;
    use crate::instance::InstancePtr;
    use crate::metadata::ReflectedType;
    use inventory::collect;
    pub use inventory::submit;
    use std::vec::IntoIter;

    pub struct ReflectedTypeRegisterer {
        pub register: fn() -> ReflectedType,
    }

    collect!(ReflectedTypeRegisterer);

    /// Positional arguments handed to a generated constructor.
    pub struct Arguments {
        type_name: &'static str,
        expected: usize,
        arguments: IntoIter<InstancePtr>,
    }

    impl Arguments {
        pub fn new(
            type_name: &'static str,
            expected: usize,
            arguments: Vec<InstancePtr>,
        ) -> Result<Self, ContainerError> {
            if arguments.len() != expected {
                return Err(ContainerError::ArgumentCountMismatch {
                    type_name: type_name.to_string(),
                    expected,
                    actual: arguments.len(),
                });
            }

            Ok(Self {
                type_name,
                expected,
                arguments: arguments.into_iter(),
            })
        }

        pub fn take(&mut self) -> Result<InstancePtr, ContainerError> {
            self.arguments
                .next()
                .ok_or_else(|| ContainerError::ArgumentCountMismatch {
                    type_name: self.type_name.to_string(),
                    expected: self.expected + 1,
                    actual: self.expected,
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ContainerError;
    use crate::instance::{instance, InstancePtr};
    use crate::metadata::internal::Arguments;
    use crate::metadata::{
        AttributeMetadataReader, AutowireDescriptor, MetadataReader, ReflectedType,
    };
    use crate::value::Value;
    use std::path::Path;

    fn constructor(_arguments: Vec<InstancePtr>) -> Result<InstancePtr, ContainerError> {
        Ok(instance(()))
    }

    fn create_type(autowire: Option<AutowireDescriptor>) -> ReflectedType {
        ReflectedType {
            type_name: "app::Widget",
            module_path: "app",
            source_file: "src/widget.rs",
            manifest_dir: "/nonexistent/app",
            parameters: vec![],
            autowire,
            constructor,
            instantiate: None,
        }
    }

    #[test]
    fn should_read_attribute_marker() {
        let descriptor = AutowireDescriptor {
            explicit_key: Some("main-widget".to_string()),
            literal_arguments: Some(vec![Value::from(42), Value::from("x")]),
        };

        assert_eq!(
            AttributeMetadataReader.read(&create_type(Some(descriptor.clone()))),
            Some(descriptor)
        );
        assert_eq!(AttributeMetadataReader.read(&create_type(None)), None);
    }

    #[test]
    fn should_resolve_source_path_from_manifest_ancestors() {
        let reflected_type = ReflectedType {
            source_file: file!(),
            manifest_dir: env!("CARGO_MANIFEST_DIR"),
            ..create_type(None)
        };

        let expected = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("src")
            .join("metadata.rs")
            .canonicalize()
            .unwrap();
        assert_eq!(reflected_type.source_path(), Some(expected));
    }

    #[test]
    fn should_not_resolve_missing_source_file() {
        assert_eq!(create_type(None).source_path(), None);
    }

    #[test]
    fn should_check_argument_count() {
        assert_eq!(
            Arguments::new("app::Widget", 2, vec![instance(1_u8)])
                .err()
                .unwrap(),
            ContainerError::ArgumentCountMismatch {
                type_name: "app::Widget".to_string(),
                expected: 2,
                actual: 1,
            }
        );

        let mut arguments = Arguments::new("app::Widget", 1, vec![instance(1_u8)]).unwrap();
        assert!(arguments.take().is_ok());
        assert!(arguments.take().is_err());
    }
}
