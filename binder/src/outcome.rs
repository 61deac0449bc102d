//! Per-key outcomes and the Binding handed back to callers.

use std::any::Any;
use std::fmt;

use optin_core::{Instance, MemberKind};

use crate::error::{BindError, InstantiateError, InstantiateResult};

/// The member a key was applied through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedVia {
    pub kind: MemberKind,
    pub member: String,
}

impl AppliedVia {
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::Field,
            member: name.into(),
        }
    }

    pub fn accessor(name: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::Accessor,
            member: name.into(),
        }
    }
}

impl fmt::Display for AppliedVia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.member)
    }
}

/// Why a key was left alone without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The key is on the ignore list and no member claims it.
    Ignored,
}

/// What happened to one request key.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied(AppliedVia),
    Skipped(SkipReason),
    Failed(BindError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn error(&self) -> Option<&BindError> {
        match self {
            Outcome::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// The outcome recorded for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyOutcome {
    pub key: String,
    pub outcome: Outcome,
}

impl KeyOutcome {
    pub fn new(key: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            key: key.into(),
            outcome,
        }
    }
}

/// A constructed instance together with what happened to every key.
#[derive(Debug)]
pub struct Binding {
    /// Qualified name of the type that was constructed.
    pub type_name: String,
    /// The constructed instance. Owned by the caller.
    pub instance: Instance,
    /// One entry per request key, in request order. The type-selector key is not reported.
    pub outcomes: Vec<KeyOutcome>,
    /// Whether the fallback type was built instead of a type named by the request.
    pub from_fallback: bool,
    /// Set when the request named a type that could not be used.
    pub fallback_reason: Option<InstantiateError>,
}

impl Binding {
    /// Take the instance as its concrete type.
    pub fn downcast<T: Any>(self) -> Option<Box<T>> {
        self.instance.downcast::<T>().ok()
    }

    /// Borrow the instance as its concrete type.
    pub fn instance_ref<T: Any>(&self) -> Option<&T> {
        self.instance.downcast_ref::<T>()
    }

    /// The outcome recorded for `key`.
    pub fn outcome(&self, key: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|o| o.key == key)
            .map(|o| &o.outcome)
    }

    /// Keys that were written into the instance.
    pub fn applied_keys(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.outcome.is_applied())
            .map(|o| o.key.as_str())
    }

    /// Per-key errors, in request order.
    pub fn failures(&self) -> impl Iterator<Item = &BindError> {
        self.outcomes.iter().filter_map(|o| o.outcome.error())
    }

    /// Whether the fallback type was built, for a missing or for an unusable type name.
    pub fn used_fallback(&self) -> bool {
        self.from_fallback
    }
}

/// Result of instantiating a type from a request.
pub type BindingResult = InstantiateResult<Binding>;
