//! Type-erased instances and their conversion back into constructor arguments.
//!
//! Every binding produces an [InstancePtr]. Constructors generated by
//! `#[derive(Injectable)]` convert resolved instances into concrete field types with
//! [FromInstance]: scalar fields are read from a bound [Value], while dependency fields are
//! `Arc<T>` pointers downcast from the dependency's instance.

use crate::error::ContainerError;
use crate::value::Value;
use std::any::{type_name, Any};
use std::sync::Arc;

/// Shared, type-erased instance produced by a binding factory.
pub type InstancePtr = Arc<dyn Any + Send + Sync + 'static>;

/// Wraps given value as an [InstancePtr].
#[inline]
pub fn instance<T: Any + Send + Sync>(value: T) -> InstancePtr {
    Arc::new(value) as InstancePtr
}

/// Conversion of a resolved instance into a constructor argument.
pub trait FromInstance: Sized {
    /// Converts `instance` into `Self`. `parameter` names the receiving parameter for diagnostics.
    fn from_instance(instance: InstancePtr, parameter: &str) -> Result<Self, ContainerError>;
}

/// Conversion of a scalar [Value] into a concrete Rust type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

// non-scalar arguments are reported with this kind
const INSTANCE_KIND: &str = "instance";

fn incompatible<T>(parameter: &str, found: &str) -> ContainerError {
    ContainerError::IncompatibleArgument {
        parameter: parameter.to_string(),
        expected: type_name::<T>().to_string(),
        found: found.to_string(),
    }
}

fn scalar_from_instance<T: FromValue>(
    instance: InstancePtr,
    parameter: &str,
) -> Result<T, ContainerError> {
    let value = instance
        .downcast::<Value>()
        .map_err(|_| incompatible::<T>(parameter, INSTANCE_KIND))?;

    T::from_value(&value).ok_or_else(|| incompatible::<T>(parameter, value.kind_name()))
}

impl<T: Any + Send + Sync> FromInstance for Arc<T> {
    fn from_instance(instance: InstancePtr, parameter: &str) -> Result<Self, ContainerError> {
        instance.downcast::<T>().map_err(|instance| {
            let found = instance
                .downcast::<Value>()
                .map_or(INSTANCE_KIND, |value| value.kind_name());
            incompatible::<T>(parameter, found)
        })
    }
}

impl<T: FromValue> FromInstance for Vec<T> {
    fn from_instance(instance: InstancePtr, parameter: &str) -> Result<Self, ContainerError> {
        scalar_from_instance(instance, parameter)
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(value) => Some(*value),
            Value::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        f64::from_value(value).map(|value| value as f32)
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(values) => values.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

macro_rules! integer_from_value {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Integer(value) => <$ty>::try_from(*value).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

integer_from_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! scalar_instance {
    ($($ty:ty),*) => {
        $(
            impl FromInstance for $ty {
                #[inline]
                fn from_instance(
                    instance: InstancePtr,
                    parameter: &str,
                ) -> Result<Self, ContainerError> {
                    scalar_from_instance(instance, parameter)
                }
            }
        )*
    };
}

scalar_instance!(
    String, bool, f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);
