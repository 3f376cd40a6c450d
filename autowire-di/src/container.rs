//! The binding registry. A [Container] maps string keys to factories and caches the instance each
//! factory produces, so every binding behaves like a singleton: its factory runs at most once for
//! the lifetime of the container.
//!
//! Factories receive the container itself, which lets them resolve their own dependencies:
//!
//! ```
//! use autowire_di::container::Container;
//! use autowire_di::instance::instance;
//! use autowire_di::value::Value;
//!
//! struct Client {
//!     name: String,
//! }
//!
//! let mut container = Container::new();
//! container.add_parameters([("name", Value::from("svc"))]);
//! container.add("client", |container| {
//!     let name = container.parameter("name")?;
//!     Ok(instance(Client {
//!         name: match &*name {
//!             Value::Text(name) => name.clone(),
//!             _ => String::new(),
//!         },
//!     }))
//! });
//!
//! let client = container.get_typed::<Client>("client").unwrap();
//! assert_eq!(client.name, "svc");
//! ```
//!
//! Registration is first-wins: adding a factory under an already bound key is silently ignored.
//!
//! Resolution requires `&mut Container`, so the "check cache, else build and cache" sequence is
//! always exclusive. Sharing a container between threads means putting it behind a lock, e.g.
//! `Arc<Mutex<Container>>`, which keeps the singleton guarantee intact.

use crate::error::ContainerError;
use crate::instance::{instance, InstancePtr};
use crate::metadata::AttributeMetadataReader;
use crate::scanner::Autowirer;
use crate::value::Value;
use derivative::Derivative;
use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use std::any::{type_name, Any};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Factory producing an instance for a binding.
pub type FactoryPtr =
    Arc<dyn Fn(&mut Container) -> Result<InstancePtr, ContainerError> + Send + Sync>;

/// Registry of bindings and their singleton instances.
#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct Container {
    #[derivative(Debug = "ignore")]
    bindings: FxHashMap<String, FactoryPtr>,
    instances: FxHashMap<String, InstancePtr>,
    keys_under_construction: FxHashSet<String>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `key`, unless the key is already bound.
    pub fn add<K, F>(&mut self, key: K, factory: F)
    where
        K: Into<String>,
        F: Fn(&mut Container) -> Result<InstancePtr, ContainerError> + Send + Sync + 'static,
    {
        let key = key.into();
        if self.bindings.contains_key(&key) {
            debug!(key = %key, "Ignoring duplicate binding.");
            return;
        }

        debug!(key = %key, "Registering binding.");
        self.bindings.insert(key, Arc::new(factory) as FactoryPtr);
    }

    /// Registers a binding always producing a clone of `value`.
    pub fn add_instance<K, T>(&mut self, key: K, value: T)
    where
        K: Into<String>,
        T: Any + Send + Sync + Clone,
    {
        self.add(key, move |_| Ok(instance(value.clone())));
    }

    /// Registers each `(name, value)` pair as a trivial binding returning the value. Such bindings
    /// satisfy scalar constructor parameters with matching names.
    pub fn add_parameters<I, K>(&mut self, parameters: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (key, value) in parameters {
            self.add_instance(key, value);
        }
    }

    /// Checks if a factory is bound to `key`, regardless of whether it has been invoked.
    #[inline]
    pub fn has(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    /// Checks if the instance for `key` has already been constructed.
    #[inline]
    pub fn is_instantiated(&self, key: &str) -> bool {
        self.instances.contains_key(key)
    }

    /// Returns the instance bound to `key`, constructing and caching it on first use.
    pub fn get(&mut self, key: &str) -> Result<InstancePtr, ContainerError> {
        let factory = self
            .bindings
            .get(key)
            .cloned()
            .ok_or_else(|| ContainerError::NotFound(key.to_string()))?;

        if let Some(instance) = self.instances.get(key) {
            return Ok(instance.clone());
        }

        if !self.keys_under_construction.insert(key.to_string()) {
            return Err(ContainerError::DependencyCycle(key.to_string()));
        }

        debug!(key, "Constructing instance.");

        let instance = factory(self);
        self.keys_under_construction.remove(key);

        let instance = instance?;
        self.instances.insert(key.to_string(), instance.clone());

        Ok(instance)
    }

    /// Typesafe version of [Container::get].
    pub fn get_typed<T: Any + Send + Sync>(&mut self, key: &str) -> Result<Arc<T>, ContainerError> {
        self.get(key)?
            .downcast::<T>()
            .map_err(|_| ContainerError::IncompatibleInstance {
                key: key.to_string(),
                expected: type_name::<T>().to_string(),
            })
    }

    /// Returns the scalar value bound to `name`.
    #[inline]
    pub fn parameter(&mut self, name: &str) -> Result<Arc<Value>, ContainerError> {
        self.get_typed::<Value>(name)
    }

    /// Returns all bound keys in lexicographical order.
    pub fn keys(&self) -> Vec<&str> {
        self.bindings.keys().map(String::as_str).sorted().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Autowires all types declared in source files under `path`, using attribute metadata.
    /// See [crate::scanner] for details.
    pub fn autowire_directory<P: AsRef<Path>>(&mut self, path: P) {
        Autowirer::new(AttributeMetadataReader).autowire_directory(self, path);
    }
}

#[cfg(test)]
mod tests {
    use crate::container::Container;
    use crate::error::ContainerError;
    use crate::instance::instance;
    use crate::value::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[test]
    fn should_not_find_unbound_key() {
        let mut container = Container::new();

        assert!(!container.has("missing"));
        assert_eq!(
            container.get("missing").unwrap_err(),
            ContainerError::NotFound("missing".to_string())
        );
    }

    #[test]
    fn should_return_bound_instance() {
        let mut container = Container::new();
        container.add("answer", |_| Ok(instance(42_u32)));

        assert!(container.has("answer"));
        assert_eq!(*container.get_typed::<u32>("answer").unwrap(), 42);
    }

    #[test]
    fn should_keep_first_registration() {
        let mut container = Container::new();
        container.add("answer", |_| Ok(instance(1_u32)));
        container.add("answer", |_| Ok(instance(2_u32)));

        assert_eq!(container.len(), 1);
        assert_eq!(*container.get_typed::<u32>("answer").unwrap(), 1);
    }

    #[test]
    fn should_invoke_factory_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let factory_calls = calls.clone();

        let mut container = Container::new();
        container.add("counter", move |_| {
            factory_calls.fetch_add(1, Ordering::SeqCst);
            Ok(instance(()))
        });

        assert!(!container.is_instantiated("counter"));

        let first = container.get("counter").unwrap();
        for _ in 0..10 {
            container.get("counter").unwrap();
        }
        let last = container.get("counter").unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(container.is_instantiated("counter"));
        assert!(Arc::ptr_eq(&first, &last));
    }

    #[test]
    fn should_resolve_dependencies_recursively() {
        let mut container = Container::new();
        container.add("base", |_| Ok(instance(2_u32)));
        container.add("doubled", |container| {
            let base = container.get_typed::<u32>("base")?;
            Ok(instance(*base * 2))
        });

        assert_eq!(*container.get_typed::<u32>("doubled").unwrap(), 4);
        assert!(container.is_instantiated("base"));
    }

    #[test]
    fn should_detect_dependency_cycles() {
        let mut container = Container::new();
        container.add("a", |container| container.get("b"));
        container.add("b", |container| container.get("a"));

        assert_eq!(
            container.get("a").unwrap_err(),
            ContainerError::DependencyCycle("a".to_string())
        );
        assert!(!container.is_instantiated("a"));
        assert!(!container.is_instantiated("b"));
    }

    #[test]
    fn should_not_cache_failed_construction() {
        let calls = Arc::new(AtomicUsize::new(0));
        let factory_calls = calls.clone();

        let mut container = Container::new();
        container.add("broken", move |container| {
            factory_calls.fetch_add(1, Ordering::SeqCst);
            container.get("missing")
        });

        assert!(container.get("broken").is_err());
        assert!(container.get("broken").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!container.is_instantiated("broken"));
    }

    #[test]
    fn should_reject_incompatible_type() {
        let mut container = Container::new();
        container.add("answer", |_| Ok(instance(42_u32)));

        assert!(matches!(
            container.get_typed::<String>("answer").unwrap_err(),
            ContainerError::IncompatibleInstance { .. }
        ));
    }

    #[test]
    fn should_register_parameters() {
        let mut container = Container::new();
        container.add_parameters([("name", Value::from("svc")), ("retries", Value::from(3))]);
        container.add_parameters([("retries", Value::from(5))]);

        assert_eq!(container.keys(), vec!["name", "retries"]);
        assert_eq!(
            *container.parameter("name").unwrap(),
            Value::Text("svc".to_string())
        );
        assert_eq!(*container.parameter("retries").unwrap(), Value::Integer(3));
    }

    #[test]
    fn should_construct_once_when_shared_between_threads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let factory_calls = calls.clone();

        let mut container = Container::new();
        container.add("shared", move |_| {
            factory_calls.fetch_add(1, Ordering::SeqCst);
            Ok(instance(String::from("shared")))
        });

        let container = Arc::new(Mutex::new(container));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let container = container.clone();
                thread::spawn(move || {
                    container
                        .lock()
                        .unwrap()
                        .get_typed::<String>("shared")
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(*handle.join().unwrap(), "shared");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
