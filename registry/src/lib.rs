//! Optin Registry
//!
//! Runtime type lookup. Single source of truth for which types may be constructed
//! by name and which of their members may be bound from external input.
//! The registry is immutable after construction via RegistryBuilder.

mod builder;
mod error;
mod registry;
mod types;

pub use builder::{RegistryBuilder, RegistryError, TypeBuilder};
pub use error::{ApplyError, ApplyResult, LookupError, LookupResult};
pub use registry::Registry;
pub use types::*;
