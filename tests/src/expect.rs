//! Per-key expectations for verifying binding outcomes.

use optin_binder::{BindError, KeyOutcome, Outcome, SkipReason};
use optin_core::MemberKind;

use crate::error::{TestError, TestResult};

/// What a single key is expected to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// Written directly into the named field.
    Field(String),
    /// Passed to the named accessor.
    Accessor(String),
    Ignored,
    NotFound,
    Ambiguous,
    Denied,
    Coercion,
    Invocation,
}

impl Expected {
    fn matches(&self, outcome: &Outcome) -> bool {
        match (self, outcome) {
            (Expected::Field(name), Outcome::Applied(via)) => {
                via.kind == MemberKind::Field && via.member == *name
            }
            (Expected::Accessor(name), Outcome::Applied(via)) => {
                via.kind == MemberKind::Accessor && via.member == *name
            }
            (Expected::Ignored, Outcome::Skipped(SkipReason::Ignored)) => true,
            (Expected::NotFound, Outcome::Failed(BindError::MemberNotFound { .. })) => true,
            (Expected::Ambiguous, Outcome::Failed(BindError::AmbiguousMember { .. })) => true,
            (Expected::Denied, Outcome::Failed(BindError::PermissionDenied { .. })) => true,
            (Expected::Coercion, Outcome::Failed(BindError::Coercion { .. })) => true,
            (Expected::Invocation, Outcome::Failed(BindError::Invocation { .. })) => true,
            _ => false,
        }
    }
}

/// Expected outcomes of a request, checked key by key.
#[derive(Debug, Clone, Default)]
pub struct Expect {
    keys: Vec<(String, Expected)>,
    exhaustive: bool,
}

impl Expect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(self, key: &str) -> Self {
        self.key(key, Expected::Field(key.to_string()))
    }

    pub fn accessor(self, key: &str, accessor: &str) -> Self {
        self.key(key, Expected::Accessor(accessor.to_string()))
    }

    pub fn ignored(self, key: &str) -> Self {
        self.key(key, Expected::Ignored)
    }

    pub fn not_found(self, key: &str) -> Self {
        self.key(key, Expected::NotFound)
    }

    pub fn ambiguous(self, key: &str) -> Self {
        self.key(key, Expected::Ambiguous)
    }

    pub fn denied(self, key: &str) -> Self {
        self.key(key, Expected::Denied)
    }

    pub fn coercion_failed(self, key: &str) -> Self {
        self.key(key, Expected::Coercion)
    }

    pub fn invocation_failed(self, key: &str) -> Self {
        self.key(key, Expected::Invocation)
    }

    /// Also require that no other key produced an outcome.
    pub fn only(mut self) -> Self {
        self.exhaustive = true;
        self
    }

    pub fn key(mut self, key: &str, expected: Expected) -> Self {
        self.keys.push((key.to_string(), expected));
        self
    }

    /// Verify the expectation against the outcomes of a binding.
    pub fn verify(&self, scenario: &str, outcomes: &[KeyOutcome]) -> TestResult<()> {
        for (key, expected) in &self.keys {
            let outcome = outcomes
                .iter()
                .find(|o| o.key == *key)
                .map(|o| &o.outcome)
                .ok_or_else(|| {
                    TestError::expectation_failed(scenario, format!("no outcome for key '{}'", key))
                })?;

            if !expected.matches(outcome) {
                return Err(TestError::expectation_failed(
                    scenario,
                    format!("key '{}': expected {:?}, got {:?}", key, expected, outcome),
                ));
            }
        }

        if self.exhaustive && outcomes.len() != self.keys.len() {
            let unexpected: Vec<&str> = outcomes
                .iter()
                .map(|o| o.key.as_str())
                .filter(|k| !self.keys.iter().any(|(key, _)| key.as_str() == *k))
                .collect();
            return Err(TestError::expectation_failed(
                scenario,
                format!("unexpected outcomes for keys {:?}", unexpected),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optin_binder::AppliedVia;

    fn outcomes() -> Vec<KeyOutcome> {
        vec![
            KeyOutcome::new("f2", Outcome::Applied(AppliedVia::field("f2"))),
            KeyOutcome::new("body", Outcome::Skipped(SkipReason::Ignored)),
        ]
    }

    #[test]
    fn test_verify_matching_outcomes() {
        let expect = Expect::new().field("f2").ignored("body").only();
        assert!(expect.verify("ok", &outcomes()).is_ok());
    }

    #[test]
    fn test_verify_reports_mismatch() {
        let expect = Expect::new().denied("f2");
        let err = expect.verify("mismatch", &outcomes()).unwrap_err();
        assert!(err.to_string().contains("key 'f2'"));
    }

    #[test]
    fn test_verify_reports_missing_and_extra_keys() {
        assert!(Expect::new().field("f9").verify("missing", &outcomes()).is_err());
        assert!(Expect::new().field("f2").only().verify("extra", &outcomes()).is_err());
    }
}
