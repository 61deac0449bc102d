//! Optin Core Types
//!
//! This crate provides the foundational types used throughout the binding engine:
//! - Identity types (TypeId, MemberKind)
//! - Value types (the Value enum produced by coercion, ValueType declared by members)
//! - Typed conversion out of a Value (FromValue, settable_enum!)
//! - The owned Instance handed back to callers
//! - Common error types

mod convert;
mod error;
mod id;
mod instance;
mod value;

pub use convert::*;
pub use error::*;
pub use id::*;
pub use instance::*;
pub use value::*;
