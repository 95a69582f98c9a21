//! Configuration module for the GoStream i18n console.
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::i18n::Locale;

/// Where dictionaries come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DictionarySource {
    /// `en.json` / `zh.json` compiled into the binary
    #[default]
    Bundled,
    /// Every `*.json` file of a directory
    Directory(PathBuf),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Locale the store starts in.
    pub default_locale: Locale,

    pub dictionaries: DictionarySource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            dictionaries: DictionarySource::Bundled,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env`).
    ///
    /// - `DEFAULT_LOCALE` - initial locale, defaults to `zh`
    /// - `LOCALES_DIR` - dictionary directory, bundled dictionaries if unset
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let default_locale = get("DEFAULT_LOCALE")
            .map(Locale::from)
            .unwrap_or_default();

        let dictionaries = get("LOCALES_DIR")
            .map(|dir| DictionarySource::Directory(PathBuf::from(dir)))
            .unwrap_or_default();

        Self {
            default_locale,
            dictionaries,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, Config::default());
        assert_eq!(config.default_locale, "zh");
        assert_eq!(config.dictionaries, DictionarySource::Bundled);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[("DEFAULT_LOCALE", " en "), ("LOCALES_DIR", "/opt/locales")]);
        assert_eq!(config.default_locale, "en");
        assert_eq!(
            config.dictionaries,
            DictionarySource::Directory(PathBuf::from("/opt/locales"))
        );
    }

    #[test]
    fn test_blank_values_ignored() {
        let config = config_from(&[("DEFAULT_LOCALE", "  "), ("LOCALES_DIR", "")]);
        assert_eq!(config, Config::default());
    }
}
