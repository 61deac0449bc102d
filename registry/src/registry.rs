//! The Registry - immutable type lookup and construction.

use crate::error::{LookupError, LookupResult};
use crate::{TypeDef, NAMESPACE_SEPARATOR};
use optin_core::{Instance, TypeId};
use std::any::Any;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::{debug, error};

/// The Registry provides runtime lookup of bindable types.
/// It is immutable after construction and can be shared across threads.
#[derive(Debug, Default)]
pub struct Registry {
    /// Type definitions by ID.
    types: HashMap<TypeId, TypeDef>,
    /// Type ID lookup by qualified name.
    type_names: HashMap<String, TypeId>,
    /// Type ID lookup by Rust type.
    rust_types: HashMap<std::any::TypeId, TypeId>,
}

impl Registry {
    /// Create a registry (use RegistryBuilder for construction).
    pub(crate) fn new(
        types: HashMap<TypeId, TypeDef>,
        type_names: HashMap<String, TypeId>,
        rust_types: HashMap<std::any::TypeId, TypeId>,
    ) -> Self {
        Self {
            types,
            type_names,
            rust_types,
        }
    }

    // ==================== Type Lookups ====================

    /// Get a type definition by qualified name.
    pub fn get_type_by_name(&self, name: &str) -> Option<&TypeDef> {
        self.type_names.get(name).and_then(|id| self.types.get(id))
    }

    /// Get a type definition by ID.
    pub fn get_type(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(&id)
    }

    /// Get a type ID by qualified name.
    pub fn get_type_id(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    /// Get the type definition registered for the Rust type `T`.
    pub fn get_type_for<T: Any>(&self) -> Option<&TypeDef> {
        self.get_type_by_rust_type(std::any::TypeId::of::<T>())
    }

    /// Get the type definition registered for a Rust type identity.
    pub fn get_type_by_rust_type(&self, rust_type: std::any::TypeId) -> Option<&TypeDef> {
        self.rust_types
            .get(&rust_type)
            .and_then(|id| self.types.get(id))
    }

    /// Get all type definitions.
    pub fn all_types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    /// Get the number of types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // ==================== Resolution ====================

    /// Resolve a type name requested by external input.
    ///
    /// A name without a namespace separator is qualified with `default_namespace`.
    /// Without a namespace the bare name is looked up as given. The resolved type
    /// must be approved for construction by name.
    pub fn resolve(&self, name: &str, default_namespace: Option<&str>) -> LookupResult<&TypeDef> {
        let qualified: Cow<'_, str> = if name.contains(NAMESPACE_SEPARATOR) {
            Cow::Borrowed(name)
        } else {
            match default_namespace {
                Some(namespace) => {
                    Cow::Owned(format!("{}{}{}", namespace, NAMESPACE_SEPARATOR, name))
                }
                None => {
                    error!(
                        type_name = %name,
                        "type name is not qualified and no default namespace was supplied"
                    );
                    Cow::Borrowed(name)
                }
            }
        };

        let type_def = self
            .get_type_by_name(&qualified)
            .ok_or_else(|| LookupError::type_not_found(&*qualified))?;

        if !type_def.approved {
            return Err(LookupError::type_not_approved(&type_def.name));
        }

        debug!(type_name = %type_def.name, "resolved type");
        Ok(type_def)
    }

    // ==================== Construction ====================

    /// Build a new instance with the type's zero-argument constructor.
    pub fn construct(&self, type_def: &TypeDef) -> LookupResult<Instance> {
        let constructor = type_def.constructor.as_ref().ok_or_else(|| {
            LookupError::construction_failed(&type_def.name, "no zero-argument constructor")
        })?;
        constructor().map_err(|message| LookupError::construction_failed(&type_def.name, message))
    }
}
