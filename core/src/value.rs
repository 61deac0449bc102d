//! Value types for bindable members.
//!
//! A `ValueType` is what a field or accessor declares it accepts. A `Value` is
//! what coercion produces from raw text. The supported scalar types are
//! Int32, Int64, Bool, NullableBool, Float32, Text, enumerations and Date;
//! anything else is declared as `Opaque` and cannot be coerced.

use chrono::NaiveDate;
use std::fmt;

/// Fixed pattern for calendar dates, both for parsing and re-formatting.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Declared constants of an enumerated type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumDef {
    /// Enumeration name.
    pub name: &'static str,
    /// Constant names, matched exactly against upper-cased input.
    pub constants: &'static [&'static str],
}

impl EnumDef {
    pub const fn new(name: &'static str, constants: &'static [&'static str]) -> Self {
        Self { name, constants }
    }

    /// Find the declared constant with exactly this name.
    pub fn constant(&self, name: &str) -> Option<&'static str> {
        self.constants.iter().copied().find(|c| *c == name)
    }
}

/// The declared value type of a field or accessor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Primitive boolean; ambiguous input becomes `false`.
    Bool,
    /// Nullable boolean; ambiguous input becomes `Value::Null`.
    NullableBool,
    /// 32-bit floating point.
    Float32,
    /// UTF-8 text, passed through unchanged.
    Text,
    /// Enumerated value with declared constant names.
    Enum(EnumDef),
    /// Calendar date in `YYYY-MM-DD` form.
    Date,
    /// A type the coercer has no rule for.
    Opaque(&'static str),
}

impl ValueType {
    /// Returns the name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Int32 => "Int32",
            ValueType::Int64 => "Int64",
            ValueType::Bool => "Bool",
            ValueType::NullableBool => "NullableBool",
            ValueType::Float32 => "Float32",
            ValueType::Text => "Text",
            ValueType::Enum(def) => def.name,
            ValueType::Date => "Date",
            ValueType::Opaque(name) => name,
        }
    }

    /// Returns true if this is the text type.
    pub fn is_text(&self) -> bool {
        matches!(self, ValueType::Text)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A coerced value, ready to be handed to a field or accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unset sentinel (nullable boolean with ambiguous input).
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// 32-bit floating point.
    Float32(f32),
    /// UTF-8 text.
    Text(String),
    /// Name of a declared enum constant.
    Enum(String),
    /// Calendar date.
    Date(NaiveDate),
}

impl Value {
    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as boolean if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i32 if this is an Int32 value.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int64 value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f32 if this is a Float32 value.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float32(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the constant name if this is an Enum value.
    pub fn as_constant(&self) -> Option<&str> {
        match self {
            Value::Enum(name) => Some(name),
            _ => None,
        }
    }

    /// Get as date if this is a Date value.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::Float32(_) => "Float32",
            Value::Text(_) => "Text",
            Value::Enum(_) => "Enum",
            Value::Date(_) => "Date",
        }
    }

    /// Render the value back to text.
    ///
    /// Floats always carry a fractional part (`2.0`, not `2`) and dates use
    /// [`DATE_FORMAT`], so text produced here coerces back to the same value.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int32(i) => i.to_string(),
            Value::Int64(i) => i.to_string(),
            Value::Float32(f) => {
                let text = f.to_string();
                if f.is_finite() && !text.contains('.') {
                    format!("{}.0", text)
                } else {
                    text
                }
            }
            Value::Text(s) => s.clone(),
            Value::Enum(name) => name.clone(),
            Value::Date(d) => d.format(DATE_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "\"{}\"", s),
            other => write!(f, "{}", other.to_text()),
        }
    }
}

// Convenient From implementations
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Option<bool>> for Value {
    fn from(b: Option<bool>) -> Self {
        b.map(Value::Bool).unwrap_or(Value::Null)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int32(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float32(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}
