//! Locale identifier.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier selecting which dictionary to use (e.g. `"en"`, `"zh"`).
///
/// No normalization is applied: `"EN"` and `"en"` are different locales.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Locale used when the requested one has no dictionary.
    pub const FALLBACK: &'static str = "en";

    /// Locale the front-end starts in.
    pub const STARTUP: &'static str = "zh";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new(Self::STARTUP)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Locale {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Locale {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Locale {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Locale {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_string() {
        let locale = Locale::from("zh");
        assert_eq!(serde_json::to_string(&locale).unwrap(), "\"zh\"");

        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::FALLBACK);
    }

    #[test]
    fn test_default_is_startup_locale() {
        assert_eq!(Locale::default(), "zh");
    }
}
