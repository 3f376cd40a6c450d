//! Classification of constructor parameters.
//!
//! Each constructor parameter is either a *scalar*, resolved by its parameter name against the
//! container (see [Container::add_parameters](crate::container::Container::add_parameters)), or a
//! *dependency*, resolved by the fully-qualified name of its declared type. Classification looks
//! only at the type name: the last path segment, with generic arguments and references stripped,
//! is compared against a fixed set of primitive kinds.
//!
//! A [ConstructorPlan] captures the outcome for a whole constructor. It is derived once, when a
//! type gets autowired, and then reused by the installed factory.

use crate::container::Container;
use crate::error::ContainerError;
use crate::instance::InstancePtr;
use crate::metadata::ConstructorParameter;
use itertools::Itertools;

const INSTANCE_POINTER_PREFIX: &str = "alloc::sync::Arc<";

/// Primitive kinds resolved by parameter name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScalarKind {
    Text,
    Integer,
    Boolean,
    Float,
    List,
}

/// How a single constructor parameter gets resolved.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParameterKind {
    Scalar(ScalarKind),
    Dependency,
}

/// A classified parameter along with the binding key it resolves to.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PlannedParameter {
    pub name: String,
    pub kind: ParameterKind,
    pub resolution_key: String,
}

fn base_name(type_name: &str) -> &str {
    let type_name = type_name.trim_start_matches('&').trim();
    let type_name = type_name.strip_prefix("mut ").unwrap_or(type_name);
    let type_name = type_name
        .split_once('<')
        .map(|(head, _)| head)
        .unwrap_or(type_name);

    type_name
        .rsplit_once("::")
        .map(|(_, tail)| tail)
        .unwrap_or(type_name)
}

/// Returns the scalar kind for given type name, or `None` if the type denotes a dependency.
pub fn classify(type_name: &str) -> Option<ScalarKind> {
    match base_name(type_name) {
        "String" | "str" => Some(ScalarKind::Text),
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64" | "u128"
        | "usize" => Some(ScalarKind::Integer),
        "bool" => Some(ScalarKind::Boolean),
        "f32" | "f64" => Some(ScalarKind::Float),
        "Vec" => Some(ScalarKind::List),
        _ => None,
    }
}

/// Returns the binding key of a dependency declared with given type name. Dependencies are
/// declared as `Arc<T>`, so the pointer itself is unwrapped.
pub fn dependency_key(type_name: &str) -> &str {
    type_name
        .strip_prefix(INSTANCE_POINTER_PREFIX)
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(type_name)
}

/// Classifies a single parameter.
pub fn plan_parameter(parameter: &ConstructorParameter) -> PlannedParameter {
    match classify(parameter.type_name) {
        Some(kind) => PlannedParameter {
            name: parameter.name.to_string(),
            kind: ParameterKind::Scalar(kind),
            resolution_key: parameter.name.to_string(),
        },
        None => PlannedParameter {
            name: parameter.name.to_string(),
            kind: ParameterKind::Dependency,
            resolution_key: dependency_key(parameter.type_name).to_string(),
        },
    }
}

/// Ordered resolution plan for a constructor.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ConstructorPlan {
    parameters: Vec<PlannedParameter>,
}

impl ConstructorPlan {
    /// Classifies all given parameters, preserving order.
    pub fn derive(parameters: &[ConstructorParameter]) -> Self {
        Self {
            parameters: parameters.iter().map(plan_parameter).collect(),
        }
    }

    #[inline]
    pub fn parameters(&self) -> &[PlannedParameter] {
        &self.parameters
    }

    /// Resolves every planned parameter from the container, in parameter order.
    pub fn resolve(&self, container: &mut Container) -> Result<Vec<InstancePtr>, ContainerError> {
        self.parameters
            .iter()
            .map(|parameter| container.get(&parameter.resolution_key))
            .try_collect()
    }
}
