//! Binder configuration.

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// Reserved keys and naming defaults for a Binder.
///
/// Missing fields take their defaults when loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderOptions {
    /// Key whose value names the type to construct. Never bound as a member.
    pub class_key: String,
    /// Keys skipped silently when no member claims them.
    pub ignored_keys: Vec<String>,
    /// Namespace used to qualify bare type names.
    pub default_namespace: Option<String>,
}

impl Default for BinderOptions {
    fn default() -> Self {
        Self {
            class_key: "class".to_string(),
            ignored_keys: vec!["body".to_string()],
            default_namespace: None,
        }
    }
}

impl BinderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_class_key(mut self, key: impl Into<String>) -> Self {
        self.class_key = key.into();
        self
    }

    pub fn with_ignored_key(mut self, key: impl Into<String>) -> Self {
        self.ignored_keys.push(key.into());
        self
    }

    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = Some(namespace.into());
        self
    }
}
