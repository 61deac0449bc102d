//! Identity types for registered types and their members.
//!
//! Identifiers are allocated by the registry builder and are:
//! - Unique within one registry
//! - Immutable once assigned
//! - Opaque to external users

use std::fmt;

/// Identifier for a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Create a new TypeId from a raw value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// How a member receives a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Direct write to a field.
    Field,
    /// Invocation of a single-parameter `set<Name>` accessor.
    Accessor,
}

impl MemberKind {
    /// Returns true if this is a field.
    pub fn is_field(&self) -> bool {
        matches!(self, MemberKind::Field)
    }

    /// Returns true if this is an accessor.
    pub fn is_accessor(&self) -> bool {
        matches!(self, MemberKind::Accessor)
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Field => write!(f, "field"),
            MemberKind::Accessor => write!(f, "accessor"),
        }
    }
}
