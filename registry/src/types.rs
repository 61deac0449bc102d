//! Type and member definition types.

use optin_core::{Instance, MemberKind, TypeId, Value, ValueType};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ApplyResult;

/// Writes a coerced value into an instance.
pub(crate) type ApplyFn = Arc<dyn Fn(&mut dyn Any, Value) -> ApplyResult + Send + Sync>;

/// Builds a fresh instance with no arguments.
pub(crate) type ConstructFn = Arc<dyn Fn() -> Result<Instance, String> + Send + Sync>;

/// Separator between namespace segments in a qualified type name.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Prefix every accessor name starts with.
pub const SETTER_PREFIX: &str = "set";

/// Whether a type or member may be targeted by external binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Approval {
    /// Opted in.
    Approved,
    /// Not opted in (default).
    #[default]
    Unapproved,
}

impl Approval {
    pub fn is_approved(&self) -> bool {
        matches!(self, Approval::Approved)
    }
}

impl From<bool> for Approval {
    fn from(approved: bool) -> Self {
        if approved {
            Approval::Approved
        } else {
            Approval::Unapproved
        }
    }
}

/// A field that can be written directly.
#[derive(Clone)]
pub struct FieldDef {
    /// Field name, matched case-sensitively against request keys.
    pub name: String,
    /// Declared value type.
    pub value_type: ValueType,
    /// Whether the field is opted in.
    pub approved: bool,
    apply: ApplyFn,
}

impl FieldDef {
    pub(crate) fn new(
        name: impl Into<String>,
        value_type: ValueType,
        approval: Approval,
        apply: ApplyFn,
    ) -> Self {
        Self {
            name: name.into(),
            value_type,
            approved: approval.is_approved(),
            apply,
        }
    }

    pub fn kind(&self) -> MemberKind {
        MemberKind::Field
    }

    /// Write a coerced value into the field of `target`.
    pub fn set(&self, target: &mut dyn Any, value: Value) -> ApplyResult {
        (self.apply)(target, value)
    }
}

impl fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("approved", &self.approved)
            .finish_non_exhaustive()
    }
}

/// A single-parameter `set<Name>` accessor.
#[derive(Clone)]
pub struct AccessorDef {
    /// Accessor name, e.g. `setThird`.
    pub name: String,
    /// Type of the single parameter.
    pub param_type: ValueType,
    /// Type input is coerced as before invocation, when it differs from the parameter.
    pub validate_as: Option<ValueType>,
    /// Whether the accessor is opted in on its own.
    pub approved: bool,
    invoke: ApplyFn,
}

impl AccessorDef {
    pub(crate) fn new(
        name: impl Into<String>,
        param_type: ValueType,
        validate_as: Option<ValueType>,
        approval: Approval,
        invoke: ApplyFn,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            validate_as,
            approved: approval.is_approved(),
            invoke,
        }
    }

    pub fn kind(&self) -> MemberKind {
        MemberKind::Accessor
    }

    /// The type raw input is coerced to for this accessor.
    pub fn declared_type(&self) -> ValueType {
        self.validate_as.unwrap_or(self.param_type)
    }

    /// Returns true if the coerced value must be rendered back to text before invocation.
    pub fn takes_text_of_other_type(&self) -> bool {
        self.param_type.is_text() && !self.declared_type().is_text()
    }

    /// Lower-cased accessor name used for key matching.
    pub fn setter_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Invoke the accessor on `target` with a coerced value.
    pub fn invoke(&self, target: &mut dyn Any, value: Value) -> ApplyResult {
        (self.invoke)(target, value)
    }
}

impl fmt::Debug for AccessorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorDef")
            .field("name", &self.name)
            .field("param_type", &self.param_type)
            .field("validate_as", &self.validate_as)
            .field("approved", &self.approved)
            .finish_non_exhaustive()
    }
}

/// Precomputed accessor lookup for one type.
///
/// Maps `set<key>` (lower-cased) to the positions of every accessor with that
/// name, so resolving a key never scans the whole accessor list.
#[derive(Debug, Default, Clone)]
pub struct MemberIndex {
    setters: HashMap<String, Vec<usize>>,
}

impl MemberIndex {
    /// Build the index from accessor definitions.
    pub fn build(accessors: &[AccessorDef]) -> Self {
        let mut index = Self::default();
        for (i, accessor) in accessors.iter().enumerate() {
            index
                .setters
                .entry(accessor.setter_key())
                .or_default()
                .push(i);
        }
        index
    }

    /// Positions of the accessors that would bind `key`.
    pub fn setters_for(&self, key: &str) -> &[usize] {
        let setter_key = format!("{}{}", SETTER_PREFIX, key).to_lowercase();
        self.setters
            .get(&setter_key)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// A registered type.
#[derive(Clone)]
pub struct TypeDef {
    /// Unique identifier.
    pub id: TypeId,
    /// Qualified type name.
    pub name: String,
    /// Rust type of the instances this type constructs.
    pub rust_type: std::any::TypeId,
    /// Whether the type itself is opted in to construction by name.
    pub approved: bool,
    /// Field definitions by name.
    pub fields: HashMap<String, FieldDef>,
    /// Accessor definitions in registration order.
    pub accessors: Vec<AccessorDef>,
    pub(crate) constructor: Option<ConstructFn>,
    pub(crate) index: MemberIndex,
}

impl TypeDef {
    /// Get a field definition by exact name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    /// Check if this type has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get all field names.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|s| s.as_str())
    }

    /// Accessors named `set<key>`, compared case-insensitively.
    pub fn setters_for<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a AccessorDef> + 'a {
        self.index
            .setters_for(key)
            .iter()
            .filter_map(move |&i| self.accessors.get(i))
    }

    /// Whether a zero-argument constructor was registered.
    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// The name without its namespace.
    pub fn simple_name(&self) -> &str {
        self.name
            .rsplit_once(NAMESPACE_SEPARATOR)
            .map(|(_, simple)| simple)
            .unwrap_or(&self.name)
    }

    /// The namespace part of the name, if qualified.
    pub fn namespace(&self) -> Option<&str> {
        self.name
            .rsplit_once(NAMESPACE_SEPARATOR)
            .map(|(namespace, _)| namespace)
    }

    /// Check whether `instance` was built by this type.
    pub fn is_instance_of(&self, instance: &dyn Any) -> bool {
        instance.type_id() == self.rust_type
    }
}

impl fmt::Debug for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDef")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("approved", &self.approved)
            .field("fields", &self.fields)
            .field("accessors", &self.accessors)
            .field("has_constructor", &self.has_constructor())
            .finish()
    }
}
