//! The set of loaded dictionaries, keyed by locale.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::{debug, error, info};

use super::dictionary::{Dictionary, DictionaryError};
use super::locale::Locale;

static BUNDLED: Lazy<Arc<Catalog>> = Lazy::new(|| {
    let mut catalog = Catalog::new();
    for (locale, json) in [("en", include_str!("en.json")), ("zh", include_str!("zh.json"))] {
        match Dictionary::from_json(json) {
            Ok(dict) => catalog.insert(locale, dict),
            // Validated by test_bundled_dictionaries_parse
            Err(e) => error!("Bundled dictionary '{}' is invalid: {}", locale, e),
        }
    }
    Arc::new(catalog)
});

/// Immutable collection of dictionaries.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    dictionaries: HashMap<Locale, Dictionary>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionaries compiled into the crate (`en`, `zh`).
    pub fn bundled() -> Arc<Catalog> {
        Arc::clone(&BUNDLED)
    }

    /// Parse one dictionary per `(locale, json)` pair.
    pub fn from_json_sources<'a, I>(sources: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut catalog = Self::new();
        for (locale, json) in sources {
            catalog.insert(locale, Dictionary::from_json(json)?);
        }
        Ok(catalog)
    }

    /// Load every `*.json` file in `dir`; the file stem names the locale.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let dir = dir.as_ref();
        let io_err = |source| DictionaryError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut catalog = Self::new();
        for dir_entry in fs::read_dir(dir).map_err(io_err)? {
            let path = dir_entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(locale) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let json = fs::read_to_string(&path).map_err(|source| DictionaryError::Io {
                path: path.clone(),
                source,
            })?;
            let dict = Dictionary::from_json(&json).map_err(|e| DictionaryError::InFile {
                path: path.clone(),
                source: Box::new(e),
            })?;

            debug!("Loaded {} keys for locale '{}' from {}", dict.len(), locale, path.display());
            catalog.insert(locale, dict);
        }

        info!("Loaded {} dictionaries from {}", catalog.len(), dir.display());
        Ok(catalog)
    }

    /// Register (or replace) the dictionary for `locale`.
    pub fn insert(&mut self, locale: impl Into<Locale>, dictionary: Dictionary) {
        self.dictionaries.insert(locale.into(), dictionary);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, locale: impl Into<Locale>, dictionary: Dictionary) -> Self {
        self.insert(locale, dictionary);
        self
    }

    /// Dictionary registered under exactly `locale`.
    pub fn get(&self, locale: &str) -> Option<&Dictionary> {
        self.dictionaries.get(locale)
    }

    /// Dictionary for `locale`, or the fallback (`en`) dictionary when
    /// `locale` is not registered. `None` when neither exists.
    pub fn dictionary_for(&self, locale: &str) -> Option<&Dictionary> {
        self.get(locale).or_else(|| self.get(Locale::FALLBACK))
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.get(locale).is_some()
    }

    /// Registered locales, sorted.
    pub fn locales(&self) -> Vec<&Locale> {
        let mut locales: Vec<&Locale> = self.dictionaries.keys().collect();
        locales.sort_unstable();
        locales
    }

    pub fn len(&self) -> usize {
        self.dictionaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionaries.is_empty()
    }

    /// Keys of the fallback dictionary that `locale`'s own dictionary lacks.
    ///
    /// An unregistered locale is missing every fallback key.
    pub fn missing_keys(&self, locale: &str) -> Vec<String> {
        let Some(reference) = self.get(Locale::FALLBACK) else {
            return Vec::new();
        };
        let own = self.get(locale);

        let mut missing: Vec<String> = reference
            .keys()
            .filter(|key| !own.is_some_and(|dict| dict.contains_key(key)))
            .map(String::from)
            .collect();
        missing.sort_unstable();
        missing
    }
}
