//! Common error types for value conversion.

use thiserror::Error;

/// Errors that can occur converting a coerced value into a member's Rust type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// The value is not of the type the member declared.
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// The enum value names a constant the Rust enum does not have.
    #[error("Unknown constant {constant} for enum {enum_name}")]
    UnknownConstant { enum_name: String, constant: String },
}

impl ValueError {
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn unknown_constant(enum_name: impl Into<String>, constant: impl Into<String>) -> Self {
        Self::UnknownConstant {
            enum_name: enum_name.into(),
            constant: constant.into(),
        }
    }
}

/// Result type for value conversion.
pub type ValueResult<T> = Result<T, ValueError>;
