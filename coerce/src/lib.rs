//! Optin Coerce
//!
//! Convert one raw text value into one declared value type.
//!
//! # Module Structure
//!
//! - `coercer` - The Coercer and its per-type parse rules
//! - `fuzzy` - Free-form boolean parsing (BoolParser, FuzzyBool)
//! - `error` - Error types for coercion failures

mod coercer;
mod error;
mod fuzzy;

pub use coercer::Coercer;
pub use error::{CoerceError, CoerceResult};
pub use fuzzy::{BoolParser, FuzzyBool};
