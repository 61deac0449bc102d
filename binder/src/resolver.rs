//! MemberResolver - decides which member, if any, a request key binds to.
//!
//! Precedence:
//! 1. A field named exactly `key`. A same-named accessor taking the field's type
//!    wins over the direct write when either of them is approved.
//! 2. Otherwise the accessors named `set<key>` (any case). Exactly one of them
//!    must be approved.
//! 3. Otherwise the key is ignored if it is on the ignore list.

use std::any::Any;
use std::collections::HashSet;

use optin_core::{MemberKind, Value, ValueType};
use optin_registry::{AccessorDef, ApplyResult, FieldDef, TypeDef};

use crate::error::BindError;

/// A member a key resolved to.
#[derive(Debug, Clone, Copy)]
pub enum Target<'t> {
    Field(&'t FieldDef),
    Accessor(&'t AccessorDef),
}

impl<'t> Target<'t> {
    pub fn kind(&self) -> MemberKind {
        match self {
            Target::Field(field) => field.kind(),
            Target::Accessor(accessor) => accessor.kind(),
        }
    }

    pub fn name(&self) -> &'t str {
        match self {
            Target::Field(field) => &field.name,
            Target::Accessor(accessor) => &accessor.name,
        }
    }

    /// The type raw input is coerced to before it is applied.
    pub fn declared_type(&self) -> ValueType {
        match self {
            Target::Field(field) => field.value_type,
            Target::Accessor(accessor) => accessor.declared_type(),
        }
    }

    /// Write or invoke with an already coerced value.
    pub fn apply(&self, instance: &mut dyn Any, value: Value) -> ApplyResult {
        match self {
            Target::Field(field) => field.set(instance, value),
            Target::Accessor(accessor) => {
                let value = if accessor.takes_text_of_other_type() {
                    Value::Text(value.to_text())
                } else {
                    value
                };
                accessor.invoke(instance, value)
            }
        }
    }
}

/// Result of resolving one key.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'t> {
    Bind(Target<'t>),
    Ignored,
}

/// Resolves request keys against a type's members.
#[derive(Debug, Clone)]
pub struct MemberResolver {
    ignored_keys: HashSet<String>,
}

impl MemberResolver {
    pub fn new<I, S>(ignored_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignored_keys: ignored_keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_ignored(&self, key: &str) -> bool {
        self.ignored_keys.contains(key)
    }

    /// Resolve `key` to the unique approved member of `type_def` that should receive it.
    pub fn resolve<'t>(&self, type_def: &'t TypeDef, key: &str) -> Result<Resolution<'t>, BindError> {
        if let Some(field) = type_def.get_field(key) {
            return resolve_field(type_def, field, key).map(Resolution::Bind);
        }

        let candidates: Vec<&AccessorDef> = type_def.setters_for(key).collect();
        let approved: Vec<&AccessorDef> = candidates.iter().copied().filter(|a| a.approved).collect();

        match approved.as_slice() {
            [accessor] => Ok(Resolution::Bind(Target::Accessor(*accessor))),
            [] if !candidates.is_empty() => Err(BindError::permission_denied(&type_def.name, key)),
            [] if self.is_ignored(key) => Ok(Resolution::Ignored),
            [] => Err(BindError::member_not_found(&type_def.name, key)),
            _ => Err(BindError::ambiguous(
                &type_def.name,
                key,
                approved
                    .iter()
                    .map(|a| format!("{}({})", a.name, a.param_type))
                    .collect(),
            )),
        }
    }
}

impl Default for MemberResolver {
    fn default() -> Self {
        Self::new(["body"])
    }
}

fn resolve_field<'t>(
    type_def: &'t TypeDef,
    field: &'t FieldDef,
    key: &str,
) -> Result<Target<'t>, BindError> {
    let accessor = type_def
        .setters_for(key)
        .find(|a| a.param_type == field.value_type && (field.approved || a.approved));

    match accessor {
        Some(accessor) => Ok(Target::Accessor(accessor)),
        None if field.approved => Ok(Target::Field(field)),
        None => Err(BindError::permission_denied(&type_def.name, key)),
    }
}
