//! Conversion from coerced values into concrete Rust member types.
//!
//! Every typed field or accessor registration goes through `FromValue`: the
//! implementation both declares the member's `ValueType` and unpacks the
//! coerced `Value` into the Rust type the setter closure expects.

use chrono::NaiveDate;

use crate::{Value, ValueError, ValueResult, ValueType};

/// A Rust type that can receive a coerced value.
pub trait FromValue: Sized {
    /// The declared value type used to coerce input for this Rust type.
    fn value_type() -> ValueType;

    /// Unpack a coerced value.
    fn from_value(value: Value) -> ValueResult<Self>;
}

impl FromValue for i32 {
    fn value_type() -> ValueType {
        ValueType::Int32
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        value
            .as_i32()
            .ok_or_else(|| ValueError::type_mismatch("Int32", value.type_name()))
    }
}

impl FromValue for i64 {
    fn value_type() -> ValueType {
        ValueType::Int64
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        value
            .as_i64()
            .ok_or_else(|| ValueError::type_mismatch("Int64", value.type_name()))
    }
}

impl FromValue for bool {
    fn value_type() -> ValueType {
        ValueType::Bool
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        value
            .as_bool()
            .ok_or_else(|| ValueError::type_mismatch("Bool", value.type_name()))
    }
}

impl FromValue for Option<bool> {
    fn value_type() -> ValueType {
        ValueType::NullableBool
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(b)),
            other => Err(ValueError::type_mismatch(
                "NullableBool",
                other.type_name(),
            )),
        }
    }
}

impl FromValue for f32 {
    fn value_type() -> ValueType {
        ValueType::Float32
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        value
            .as_f32()
            .ok_or_else(|| ValueError::type_mismatch("Float32", value.type_name()))
    }
}

impl FromValue for String {
    fn value_type() -> ValueType {
        ValueType::Text
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(ValueError::type_mismatch("Text", other.type_name())),
        }
    }
}

impl FromValue for NaiveDate {
    fn value_type() -> ValueType {
        ValueType::Date
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        value
            .as_date()
            .ok_or_else(|| ValueError::type_mismatch("Date", value.type_name()))
    }
}

/// Declare the constant names of a Rust enum and implement [`FromValue`] for it.
///
/// ```
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Priority { Low, High }
///
/// optin_core::settable_enum!(Priority { "LOW" => Low, "HIGH" => High });
///
/// assert_eq!(Priority::ENUM_DEF.constants, &["LOW", "HIGH"]);
/// ```
#[macro_export]
macro_rules! settable_enum {
    ($ty:ident { $($constant:literal => $variant:ident),+ $(,)? }) => {
        impl $ty {
            /// Declared constants of this enum.
            pub const ENUM_DEF: $crate::EnumDef =
                $crate::EnumDef::new(stringify!($ty), &[$($constant),+]);
        }

        impl $crate::FromValue for $ty {
            fn value_type() -> $crate::ValueType {
                $crate::ValueType::Enum(Self::ENUM_DEF)
            }

            fn from_value(value: $crate::Value) -> $crate::ValueResult<Self> {
                match value.as_constant() {
                    $(Some($constant) => Ok($ty::$variant),)+
                    Some(name) => Err($crate::ValueError::unknown_constant(stringify!($ty), name)),
                    None => Err($crate::ValueError::type_mismatch(
                        stringify!($ty),
                        value.type_name(),
                    )),
                }
            }
        }
    };
}
