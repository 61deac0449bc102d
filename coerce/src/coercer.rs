//! Coercer - per-type parse rules for raw text.

use std::sync::Arc;

use chrono::NaiveDate;
use optin_core::{EnumDef, Value, ValueType, DATE_FORMAT};

use crate::error::{CoerceError, CoerceResult};
use crate::fuzzy::{BoolParser, FuzzyBool};

/// Converts raw text into the value a member declared.
#[derive(Clone)]
pub struct Coercer {
    bool_parser: Arc<dyn BoolParser>,
}

impl Coercer {
    /// Create a coercer using [`FuzzyBool`] for booleans.
    pub fn new() -> Self {
        Self::with_bool_parser(FuzzyBool::new())
    }

    /// Create a coercer with a custom boolean parser.
    pub fn with_bool_parser(parser: impl BoolParser + 'static) -> Self {
        Self {
            bool_parser: Arc::new(parser),
        }
    }

    /// Coerce `text` into a value of `declared`.
    pub fn coerce(&self, text: &str, declared: &ValueType) -> CoerceResult<Value> {
        match declared {
            ValueType::Int32 => text
                .parse::<i32>()
                .map(Value::Int32)
                .map_err(|_| CoerceError::invalid_integer(text, 32)),
            ValueType::Int64 => text
                .parse::<i64>()
                .map(Value::Int64)
                .map_err(|_| CoerceError::invalid_integer(text, 64)),
            ValueType::Bool => Ok(Value::Bool(
                self.bool_parser.parse(text, Some(false)).unwrap_or(false),
            )),
            ValueType::NullableBool => Ok(self.bool_parser.parse(text, None).into()),
            ValueType::Float32 => coerce_float(text),
            ValueType::Text => Ok(Value::Text(text.to_string())),
            ValueType::Enum(def) => coerce_enum(text, def),
            ValueType::Date => coerce_date(text),
            ValueType::Opaque(name) => Err(CoerceError::unsupported(*name)),
        }
    }
}

impl Default for Coercer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Coercer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coercer").finish_non_exhaustive()
    }
}

/// Finite decimals only. `inf`, `NaN` and out-of-range exponents are rejected.
fn coerce_float(text: &str) -> CoerceResult<Value> {
    match text.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(Value::Float32(value)),
        _ => Err(CoerceError::invalid_float(text)),
    }
}

fn coerce_enum(text: &str, def: &EnumDef) -> CoerceResult<Value> {
    let constant = text.to_uppercase();
    def.constant(&constant)
        .map(|c| Value::Enum(c.to_string()))
        .ok_or_else(|| CoerceError::unknown_constant(def.name, constant))
}

fn coerce_date(text: &str) -> CoerceResult<Value> {
    if !has_date_shape(text) {
        return Err(CoerceError::invalid_date(text));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(Value::Date)
        .map_err(|_| CoerceError::invalid_date(text))
}

/// Exactly `DDDD-DD-DD`; chrono alone would also take single-digit months and days.
fn has_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
