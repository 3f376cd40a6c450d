use thiserror::Error;

/// Errors related to resolving bindings and constructing instances.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum ContainerError {
    #[error("Target binding [{0}] does not exist.")]
    NotFound(String),
    #[error("Dependency cycle detected while constructing binding: {0}")]
    DependencyCycle(String),
    #[error("Instance bound to '{key}' is not of the requested type: {expected}")]
    IncompatibleInstance { key: String, expected: String },
    #[error("Cannot convert {found} argument for parameter '{parameter}' to: {expected}")]
    IncompatibleArgument {
        parameter: String,
        expected: String,
        found: String,
    },
    #[error("Constructor of {type_name} expects {expected} arguments, but {actual} were given")]
    ArgumentCountMismatch {
        type_name: String,
        expected: usize,
        actual: usize,
    },
}
