//! Lookup and member application errors.

use optin_core::ValueError;
use thiserror::Error;

/// Errors resolving or constructing a registered type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("Type not found: {name}")]
    TypeNotFound { name: String },

    #[error("Type {name} is not approved for construction by name")]
    TypeNotApproved { name: String },

    #[error("Could not construct {type_name}: {message}")]
    ConstructionFailed { type_name: String, message: String },
}

impl LookupError {
    pub fn type_not_found(name: impl Into<String>) -> Self {
        Self::TypeNotFound { name: name.into() }
    }

    pub fn type_not_approved(name: impl Into<String>) -> Self {
        Self::TypeNotApproved { name: name.into() }
    }

    pub fn construction_failed(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConstructionFailed {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// Result type for registry lookups.
pub type LookupResult<T> = Result<T, LookupError>;

/// Errors applying a coerced value through a field or accessor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApplyError {
    #[error("Instance is not a {expected}")]
    WrongInstance { expected: String },

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("{0}")]
    Rejected(String),
}

impl ApplyError {
    pub fn wrong_instance(expected: impl Into<String>) -> Self {
        Self::WrongInstance {
            expected: expected.into(),
        }
    }
}

/// Result type for field writes and accessor invocations.
pub type ApplyResult = Result<(), ApplyError>;
