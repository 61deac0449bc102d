//! RegistryBuilder for constructing an immutable Registry.

use crate::error::{ApplyError, ApplyResult};
use crate::types::{ApplyFn, ConstructFn, SETTER_PREFIX};
use crate::{AccessorDef, Approval, FieldDef, MemberIndex, Registry, TypeDef};
use optin_core::{FromValue, Instance, TypeId, Value, ValueType};
use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during registry construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),

    #[error("Rust type of {0} is already registered under another name")]
    DuplicateRustType(String),

    #[error("Duplicate field {field} on type {type_name}")]
    DuplicateField { type_name: String, field: String },

    #[error("Duplicate accessor {accessor}({param_type}) on type {type_name}")]
    DuplicateAccessor {
        type_name: String,
        accessor: String,
        param_type: String,
    },

    #[error("Accessor {accessor} on type {type_name} must be named set<Name>")]
    InvalidAccessorName { type_name: String, accessor: String },

    #[error("Type {0} was started but never finished with done()")]
    UnfinishedType(String),
}

/// Builder for constructing an immutable Registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Next type ID to allocate.
    next_type_id: u32,

    /// Types being built.
    types: HashMap<TypeId, TypeDef>,
    /// Type name to ID mapping.
    type_names: HashMap<String, TypeId>,
    /// Rust type to ID mapping.
    rust_types: HashMap<std::any::TypeId, TypeId>,
    /// Types whose builder was dropped before `done()`.
    unfinished: Vec<String>,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type definition for instances of `T`.
    pub fn register<T: Any + Send>(&mut self, name: impl Into<String>) -> TypeBuilder<'_, T> {
        let name = name.into();
        let id = TypeId::new(self.next_type_id);
        self.next_type_id += 1;

        TypeBuilder {
            builder: self,
            id,
            name,
            approved: false,
            fields: HashMap::new(),
            accessors: Vec::new(),
            constructor: None,
            error: None,
            finished: false,
            _marker: PhantomData,
        }
    }

    /// Get a type ID by name.
    pub fn get_type_id(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    /// Build the immutable Registry.
    ///
    /// Fails if any type builder was dropped without calling `done()`.
    pub fn build(mut self) -> Result<Registry, RegistryError> {
        if !self.unfinished.is_empty() {
            return Err(RegistryError::UnfinishedType(self.unfinished.swap_remove(0)));
        }
        Ok(Registry::new(self.types, self.type_names, self.rust_types))
    }
}

/// Builder for a type definition.
///
/// Member declarations are checked as they are added; the first problem found
/// is reported by [`TypeBuilder::done`].
#[must_use = "call `done()` to register the type"]
pub struct TypeBuilder<'a, T> {
    builder: &'a mut RegistryBuilder,
    id: TypeId,
    name: String,
    approved: bool,
    fields: HashMap<String, FieldDef>,
    accessors: Vec<AccessorDef>,
    constructor: Option<ConstructFn>,
    error: Option<RegistryError>,
    finished: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: Any + Send> TypeBuilder<'a, T> {
    /// Mark the type as approved for construction by name.
    pub fn approved(mut self) -> Self {
        self.approved = true;
        self
    }

    /// Register the zero-argument constructor.
    pub fn constructor<F>(self, construct: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.try_constructor(move || Ok(construct()))
    }

    /// Register a zero-argument constructor that can fail.
    pub fn try_constructor<F>(mut self, construct: F) -> Self
    where
        F: Fn() -> Result<T, String> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(move || {
            construct().map(|instance| Box::new(instance) as Instance)
        }));
        self
    }

    /// Use `T::default()` as the zero-argument constructor.
    pub fn default_constructor(self) -> Self
    where
        T: Default,
    {
        self.constructor(T::default)
    }

    /// Add a field. Its declared type is taken from `V`.
    pub fn field<V, F>(self, name: impl Into<String>, approval: Approval, setter: F) -> Self
    where
        V: FromValue + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let apply = typed_apply::<T, V, _>(self.name.clone(), move |target, value| {
            setter(target, value);
            Ok(())
        });
        self.push_field(FieldDef::new(name, V::value_type(), approval, apply))
    }

    /// Add a field with an explicitly declared type that receives the raw coerced value.
    pub fn raw_field<F>(
        self,
        name: impl Into<String>,
        approval: Approval,
        value_type: ValueType,
        setter: F,
    ) -> Self
    where
        F: Fn(&mut T, Value) -> Result<(), String> + Send + Sync + 'static,
    {
        let type_name = self.name.clone();
        let apply: ApplyFn = Arc::new(move |target: &mut dyn Any, value: Value| -> ApplyResult {
            let target = target
                .downcast_mut::<T>()
                .ok_or_else(|| ApplyError::wrong_instance(&type_name))?;
            setter(target, value).map_err(ApplyError::Rejected)
        });
        self.push_field(FieldDef::new(name, value_type, approval, apply))
    }

    /// Add a `set<Name>` accessor. Its parameter type is taken from `V`.
    pub fn accessor<V, F>(self, name: impl Into<String>, approval: Approval, setter: F) -> Self
    where
        V: FromValue + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.try_accessor(name, approval, move |target: &mut T, value: V| {
            setter(target, value);
            Ok(())
        })
    }

    /// Add a `set<Name>` accessor whose invocation can fail.
    pub fn try_accessor<V, F>(self, name: impl Into<String>, approval: Approval, setter: F) -> Self
    where
        V: FromValue + 'static,
        F: Fn(&mut T, V) -> Result<(), String> + Send + Sync + 'static,
    {
        let invoke = typed_apply::<T, V, _>(self.name.clone(), setter);
        self.push_accessor(AccessorDef::new(name, V::value_type(), None, approval, invoke))
    }

    /// Add a text-taking `set<Name>` accessor whose input is coerced as `validate_as` first.
    ///
    /// The accessor receives the textual form of the coerced value, so input is
    /// rejected early when it does not parse as `validate_as`.
    pub fn text_accessor<F>(
        self,
        name: impl Into<String>,
        approval: Approval,
        validate_as: ValueType,
        setter: F,
    ) -> Self
    where
        F: Fn(&mut T, String) + Send + Sync + 'static,
    {
        let invoke = typed_apply::<T, String, _>(self.name.clone(), move |target, value| {
            setter(target, value);
            Ok(())
        });
        self.push_accessor(AccessorDef::new(
            name,
            ValueType::Text,
            Some(validate_as),
            approval,
            invoke,
        ))
    }

    fn push_field(mut self, field: FieldDef) -> Self {
        if self.fields.contains_key(&field.name) {
            self.fail(RegistryError::DuplicateField {
                type_name: self.name.clone(),
                field: field.name,
            });
        } else {
            self.fields.insert(field.name.clone(), field);
        }
        self
    }

    fn push_accessor(mut self, accessor: AccessorDef) -> Self {
        let setter_key = accessor.setter_key();
        if setter_key.len() <= SETTER_PREFIX.len() || !setter_key.starts_with(SETTER_PREFIX) {
            self.fail(RegistryError::InvalidAccessorName {
                type_name: self.name.clone(),
                accessor: accessor.name,
            });
            return self;
        }

        // Same name (ignoring case) and same parameter type is never resolvable
        let duplicate = self
            .accessors
            .iter()
            .any(|a| a.setter_key() == setter_key && a.param_type == accessor.param_type);
        if duplicate {
            self.fail(RegistryError::DuplicateAccessor {
                type_name: self.name.clone(),
                accessor: accessor.name,
                param_type: accessor.param_type.to_string(),
            });
        } else {
            self.accessors.push(accessor);
        }
        self
    }

    fn fail(&mut self, error: RegistryError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Finish building this type.
    pub fn done(mut self) -> Result<TypeId, RegistryError> {
        self.finished = true;
        if let Some(error) = self.error.take() {
            return Err(error);
        }

        let name = std::mem::take(&mut self.name);

        // Check for duplicate name
        if self.builder.type_names.contains_key(&name) {
            return Err(RegistryError::DuplicateTypeName(name));
        }

        let rust_type = std::any::TypeId::of::<T>();
        if self.builder.rust_types.contains_key(&rust_type) {
            return Err(RegistryError::DuplicateRustType(name));
        }

        let accessors = std::mem::take(&mut self.accessors);
        let index = MemberIndex::build(&accessors);
        let type_def = TypeDef {
            id: self.id,
            name: name.clone(),
            rust_type,
            approved: self.approved,
            fields: std::mem::take(&mut self.fields),
            accessors,
            constructor: self.constructor.take(),
            index,
        };

        self.builder.type_names.insert(name, self.id);
        self.builder.rust_types.insert(rust_type, self.id);
        self.builder.types.insert(self.id, type_def);

        Ok(self.id)
    }
}

impl<T> Drop for TypeBuilder<'_, T> {
    fn drop(&mut self) {
        if !self.finished {
            self.builder.unfinished.push(std::mem::take(&mut self.name));
        }
    }
}

/// Wrap a typed setter so it can be applied to an erased instance.
fn typed_apply<T, V, F>(type_name: String, setter: F) -> ApplyFn
where
    T: Any,
    V: FromValue + 'static,
    F: Fn(&mut T, V) -> Result<(), String> + Send + Sync + 'static,
{
    Arc::new(move |target: &mut dyn Any, value: Value| -> ApplyResult {
        let target = target
            .downcast_mut::<T>()
            .ok_or_else(|| ApplyError::wrong_instance(&type_name))?;
        let value = V::from_value(value)?;
        setter(target, value).map_err(ApplyError::Rejected)
    })
}
