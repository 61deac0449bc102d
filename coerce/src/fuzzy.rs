//! Free-form boolean parsing.

/// Converts free-form text into a boolean.
///
/// Input that is neither recognisably true nor false yields
/// `default_if_ambiguous`, which may itself be `None` (unset).
pub trait BoolParser: Send + Sync {
    fn parse(&self, text: &str, default_if_ambiguous: Option<bool>) -> Option<bool>;
}

const TRUTHY: &[&str] = &["true", "t", "yes", "y", "on", "1"];
const FALSY: &[&str] = &["false", "f", "no", "n", "off", "0"];

/// Word-list boolean parser.
///
/// Matching ignores case and surrounding whitespace. Other integers count as
/// true when non-zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyBool;

impl FuzzyBool {
    pub fn new() -> Self {
        Self
    }
}

impl BoolParser for FuzzyBool {
    fn parse(&self, text: &str, default_if_ambiguous: Option<bool>) -> Option<bool> {
        let word = text.trim().to_lowercase();
        if TRUTHY.contains(&word.as_str()) {
            return Some(true);
        }
        if FALSY.contains(&word.as_str()) {
            return Some(false);
        }
        match word.parse::<i64>() {
            Ok(n) => Some(n != 0),
            Err(_) => default_if_ambiguous,
        }
    }
}
