//! Coercion error types.

use thiserror::Error;

/// Result type for coercion.
pub type CoerceResult<T> = Result<T, CoerceError>;

/// Errors that can occur converting raw text into a declared type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    #[error("Invalid {bits}-bit integer: {text:?}")]
    InvalidInteger { text: String, bits: u8 },

    #[error("Invalid float: {text:?}")]
    InvalidFloat { text: String },

    #[error("No constant {constant} in enum {enum_name}")]
    UnknownConstant { enum_name: String, constant: String },

    #[error("Invalid date {text:?}: expected YYYY-MM-DD")]
    InvalidDate { text: String },

    #[error("Cannot coerce text to unsupported type {type_name}")]
    Unsupported { type_name: String },
}

impl CoerceError {
    pub fn invalid_integer(text: impl Into<String>, bits: u8) -> Self {
        Self::InvalidInteger {
            text: text.into(),
            bits,
        }
    }

    pub fn invalid_float(text: impl Into<String>) -> Self {
        Self::InvalidFloat { text: text.into() }
    }

    pub fn unknown_constant(enum_name: impl Into<String>, constant: impl Into<String>) -> Self {
        Self::UnknownConstant {
            enum_name: enum_name.into(),
            constant: constant.into(),
        }
    }

    pub fn invalid_date(text: impl Into<String>) -> Self {
        Self::InvalidDate { text: text.into() }
    }

    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self::Unsupported {
            type_name: type_name.into(),
        }
    }
}
