//! Optin Binder
//!
//! Build typed objects from untrusted string maps, binding only opted-in members.
//!
//! Responsibilities:
//! - Resolve the requested type and construct it
//! - Resolve each key to a unique approved field or accessor
//! - Coerce raw text to the member's declared type and apply it
//! - Record one outcome per key without aborting on per-key failures
//!
//! # Module Structure
//!
//! - `binder` - Main Binder that coordinates one request
//! - `resolver` - MemberResolver, the field-then-accessor precedence rules
//! - `request` - BindingRequest, the ordered raw key/value input
//! - `options` - BinderOptions (reserved keys, default namespace)
//! - `outcome` - Per-key outcomes and the Binding returned to callers
//! - `error` - Error types for fatal and per-key failures

mod binder;
mod error;
mod options;
mod outcome;
mod request;
mod resolver;

pub use binder::Binder;
pub use error::{BindError, InstantiateError, InstantiateResult, OptionsError};
pub use options::BinderOptions;
pub use outcome::{AppliedVia, Binding, BindingResult, KeyOutcome, Outcome, SkipReason};
pub use request::BindingRequest;
pub use resolver::{MemberResolver, Resolution, Target};
