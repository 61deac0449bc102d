//! Owned instances produced by registered constructors.

use std::any::Any;

/// A constructed object whose concrete type is known only to the registry.
///
/// Ownership passes to the caller once binding returns.
pub type Instance = Box<dyn Any + Send>;
