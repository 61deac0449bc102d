//! Binder error types.

use optin_coerce::CoerceError;
use optin_registry::LookupError;
use thiserror::Error;

/// Result type for instantiation.
pub type InstantiateResult<T> = Result<T, InstantiateError>;

/// Errors that abort a whole request. No partial object is handed back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstantiateError {
    #[error("Type not found: {name}")]
    TypeNotFound { name: String },

    #[error("Type {name} is not approved for construction by name")]
    TypeNotApproved { name: String },

    #[error("Could not construct {type_name}: {message}")]
    Construction { type_name: String, message: String },

    #[error("Request names no type and no fallback type was supplied")]
    MissingType,

    #[error("Instance is not a {type_name}")]
    WrongInstance { type_name: String },
}

impl InstantiateError {
    pub fn type_not_found(name: impl Into<String>) -> Self {
        Self::TypeNotFound { name: name.into() }
    }

    pub fn type_not_approved(name: impl Into<String>) -> Self {
        Self::TypeNotApproved { name: name.into() }
    }

    pub fn construction(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Construction {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    pub fn wrong_instance(type_name: impl Into<String>) -> Self {
        Self::WrongInstance {
            type_name: type_name.into(),
        }
    }
}

impl From<LookupError> for InstantiateError {
    fn from(error: LookupError) -> Self {
        match error {
            LookupError::TypeNotFound { name } => Self::TypeNotFound { name },
            LookupError::TypeNotApproved { name } => Self::TypeNotApproved { name },
            LookupError::ConstructionFailed { type_name, message } => {
                Self::Construction { type_name, message }
            }
        }
    }
}

/// Errors binding a single key. Other keys of the request are unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    #[error("No field or accessor for {key} on type {type_name}")]
    MemberNotFound { type_name: String, key: String },

    #[error("Ambiguous accessors for {key} on type {type_name}: {}", .candidates.join(", "))]
    AmbiguousMember {
        type_name: String,
        key: String,
        candidates: Vec<String>,
    },

    #[error("Member for {key} on type {type_name} is not approved")]
    PermissionDenied { type_name: String, key: String },

    #[error("Invalid value for {key}: {source}")]
    Coercion { key: String, source: CoerceError },

    #[error("{member} rejected value for {key}: {message}")]
    Invocation {
        key: String,
        member: String,
        message: String,
    },
}

impl BindError {
    pub fn member_not_found(type_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MemberNotFound {
            type_name: type_name.into(),
            key: key.into(),
        }
    }

    pub fn ambiguous(
        type_name: impl Into<String>,
        key: impl Into<String>,
        candidates: Vec<String>,
    ) -> Self {
        Self::AmbiguousMember {
            type_name: type_name.into(),
            key: key.into(),
            candidates,
        }
    }

    pub fn permission_denied(type_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::PermissionDenied {
            type_name: type_name.into(),
            key: key.into(),
        }
    }

    pub fn coercion(key: impl Into<String>, source: CoerceError) -> Self {
        Self::Coercion {
            key: key.into(),
            source,
        }
    }

    pub fn invocation(
        key: impl Into<String>,
        member: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Invocation {
            key: key.into(),
            member: member.into(),
            message: message.into(),
        }
    }

    /// The request key this error belongs to.
    pub fn key(&self) -> &str {
        match self {
            Self::MemberNotFound { key, .. }
            | Self::AmbiguousMember { key, .. }
            | Self::PermissionDenied { key, .. }
            | Self::Coercion { key, .. }
            | Self::Invocation { key, .. } => key,
        }
    }
}

/// Errors loading binder options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Invalid binder options: {0}")]
    Parse(#[from] serde_json::Error),
}
