//! Automatic registration of marked types.
//!
//! For every reflected type carrying an autowire marker, the [Autowirer] installs a factory into
//! the [Container]. The binding key is the marker's explicit key or the fully-qualified type name,
//! and the factory is chosen by the shape of the constructor, in order:
//!
//! 1. no constructor parameters - the instance is created without running any constructor logic;
//! 2. non-empty literal arguments - the constructor receives exactly those values, positionally;
//! 3. otherwise - a [ConstructorPlan] is derived up front and the factory resolves each parameter
//!    from the container when first invoked.
//!
//! The scanner never fails. Problems, like a missing dependency, surface when the binding is
//! requested from the container.

use crate::classifier::ConstructorPlan;
use crate::container::Container;
use crate::instance::{instance, InstancePtr};
use crate::metadata::{reflected_types, AttributeMetadataReader, MetadataReader, ReflectedType};
use itertools::Itertools;
use std::fs;
use std::path::Path;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Registers reflected types in a [Container], based on metadata reported by a
/// [MetadataReader].
#[derive(Default, Debug, Clone)]
pub struct Autowirer<R: MetadataReader = AttributeMetadataReader> {
    reader: R,
}

impl<R: MetadataReader> Autowirer<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Autowires a single type. Unmarked types are skipped.
    pub fn autowire_type(&self, container: &mut Container, reflected_type: &ReflectedType) {
        let Some(descriptor) = self.reader.read(reflected_type) else {
            trace!(type_name = reflected_type.type_name, "Skipping unmarked type.");
            return;
        };

        let key = descriptor
            .explicit_key
            .unwrap_or_else(|| reflected_type.type_name.to_string());

        debug!(
            key = %key,
            type_name = reflected_type.type_name,
            module_path = reflected_type.module_path,
            "Autowiring type."
        );

        if reflected_type.parameters.is_empty() {
            if let Some(instantiate) = reflected_type.instantiate {
                container.add(key, move |_| Ok(instantiate()));
                return;
            }
        }

        let constructor = reflected_type.constructor;

        match descriptor.literal_arguments {
            Some(arguments) if !arguments.is_empty() => {
                container.add(key, move |_| {
                    constructor(
                        arguments
                            .iter()
                            .cloned()
                            .map(instance)
                            .collect::<Vec<InstancePtr>>(),
                    )
                });
            }
            _ => {
                let plan = ConstructorPlan::derive(&reflected_type.parameters);
                container.add(key, move |container| constructor(plan.resolve(container)?));
            }
        }
    }

    /// Autowires given types in order.
    pub fn autowire_types<'a, I>(&self, container: &mut Container, types: I)
    where
        I: IntoIterator<Item = &'a ReflectedType>,
    {
        for reflected_type in types {
            self.autowire_type(container, reflected_type);
        }
    }

    /// Walks `path` recursively and autowires every registered type declared in the visited
    /// source files. Declaring files are compared by canonical path, so only types whose source
    /// lives under `path` are considered. Entries which cannot be read are skipped.
    pub fn autowire_directory<P: AsRef<Path>>(&self, container: &mut Container, path: P) {
        let path = path.as_ref();
        debug!(path = %path.display(), "Scanning directory for autowired types.");

        let types = reflected_types()
            .into_iter()
            .filter_map(|reflected_type| match reflected_type.source_path() {
                Some(source_path) => Some((source_path, reflected_type)),
                None => {
                    trace!(
                        type_name = reflected_type.type_name,
                        source_file = reflected_type.source_file,
                        "Source file of type not found."
                    );
                    None
                }
            })
            .collect_vec();

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    warn!(%error, "Skipping unreadable entry.");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let file = match fs::canonicalize(entry.path()) {
                Ok(file) => file,
                Err(error) => {
                    warn!(path = %entry.path().display(), %error, "Skipping unresolvable file.");
                    continue;
                }
            };
            trace!(file = %file.display(), "Inspecting file.");

            self.autowire_types(
                container,
                types
                    .iter()
                    .filter(|(source_path, _)| *source_path == file)
                    .map(|(_, reflected_type)| reflected_type),
            );
        }
    }
}
