//! Optin Integration Test Framework
//!
//! Provides shared fixtures and a fluent API for writing integration tests
//! against the binder.
//!
//! # Example
//!
//! ```ignore
//! use optin_tests::prelude::*;
//!
//! #[test]
//! fn test_approved_field() {
//!     let registry = shop_registry().unwrap();
//!     Scenario::new("approved_field")
//!         .request(request! { "class" => "shop.Widget", "f2" => "2.0" })
//!         .expect(|e| e.field("f2"))
//!         .run(&registry)
//!         .unwrap();
//! }
//! ```

mod expect;

use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{TestError, TestResult};
pub use expect::{Expect, Expected};
pub use fixtures::{shop_registry, Abstract, Broken, Gadget, Size, Stranger, Widget, SHOP};
pub use scenario::Scenario;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{TestError, TestResult};
    pub use crate::expect::{Expect, Expected};
    pub use crate::fixtures::*;
    pub use crate::init_tracing;
    pub use crate::scenario::Scenario;
    pub use optin_binder::{
        request, AppliedVia, BindError, Binder, BinderOptions, Binding, BindingRequest,
        InstantiateError, KeyOutcome, Outcome, SkipReason,
    };
    pub use optin_core::{MemberKind, Value, ValueType};
    pub use optin_registry::{Approval, Registry, RegistryBuilder};
}

static TRACING: Once = Once::new();

/// Install a test subscriber once per process. Filtered by `RUST_LOG`, default `warn`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}
