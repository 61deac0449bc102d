//! BindingRequest - the raw key/value input of one binding call.

use std::collections::{BTreeMap, HashMap};

/// Untrusted string keys and values, e.g. decoded form parameters.
///
/// Keys are unique and keep insertion order, so outcomes are reported in the
/// order the caller supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingRequest {
    entries: Vec<(String, String)>,
}

impl BindingRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` to `value`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BindingRequest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut request = Self::new();
        for (key, value) in iter {
            request.insert(key, value);
        }
        request
    }
}

impl From<HashMap<String, String>> for BindingRequest {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for BindingRequest {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

/// Create a BindingRequest from key/value pairs.
#[macro_export]
macro_rules! request {
    () => {
        $crate::BindingRequest::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut request = $crate::BindingRequest::new();
            $(
                request.insert($key.to_string(), $value.to_string());
            )+
            request
        }
    };
}
