//! Per-locale dictionaries.
//!
//! A dictionary maps a translation key either to plain text or to a set of
//! service variants (`"livego"`, `"frpc"`, ...) carrying a mandatory
//! `"default"` entry. The shape is checked once at load time so lookups
//! never have to inspect raw JSON.

use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::{Map, Value};
use thiserror::Error;

/// Key every service-variant mapping must carry.
pub const DEFAULT_VARIANT: &str = "default";

/// Errors raised while loading dictionaries.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("invalid dictionary JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dictionary root must be a JSON object")]
    NotAnObject,

    #[error("entry '{key}' must be a string or an object of strings")]
    InvalidEntry { key: String },

    #[error("service variant '{service}' of entry '{key}' must be a string")]
    InvalidVariant { key: String, service: String },

    #[error("entry '{key}' has service variants but no \"default\"")]
    MissingDefault { key: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<DictionaryError>,
    },
}

/// Text offered per service, with a required fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceVariants {
    variants: HashMap<String, String>,
}

impl ServiceVariants {
    /// Build a mapping from its default text and the per-service variants.
    ///
    /// A `"default"` pair in `variants` overrides `default`.
    pub fn new<I, K, V>(default: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map: HashMap<String, String> = HashMap::new();
        map.insert(DEFAULT_VARIANT.to_string(), default.into());
        for (service, text) in variants {
            map.insert(service.into(), text.into());
        }
        Self { variants: map }
    }

    /// Text for an exact service key (keys are stored as written in the source).
    pub fn get(&self, service: &str) -> Option<&str> {
        self.variants.get(service).map(String::as_str)
    }

    /// The `"default"` text.
    pub fn default_text(&self) -> &str {
        self.get(DEFAULT_VARIANT).unwrap_or_default()
    }

    /// Service keys, `"default"` included.
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    fn from_json(key: &str, object: Map<String, Value>) -> Result<Self, DictionaryError> {
        let mut variants = HashMap::with_capacity(object.len());
        for (service, value) in object {
            match value {
                Value::String(text) => {
                    variants.insert(service, text);
                }
                _ => {
                    return Err(DictionaryError::InvalidVariant {
                        key: key.to_string(),
                        service,
                    });
                }
            }
        }

        if !variants.contains_key(DEFAULT_VARIANT) {
            return Err(DictionaryError::MissingDefault {
                key: key.to_string(),
            });
        }

        Ok(Self { variants })
    }
}

/// A dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryEntry {
    PlainText(String),
    ServiceVariants(ServiceVariants),
}

impl From<&str> for DictionaryEntry {
    fn from(text: &str) -> Self {
        Self::PlainText(text.to_string())
    }
}

impl From<String> for DictionaryEntry {
    fn from(text: String) -> Self {
        Self::PlainText(text)
    }
}

impl From<ServiceVariants> for DictionaryEntry {
    fn from(variants: ServiceVariants) -> Self {
        Self::ServiceVariants(variants)
    }
}

/// Key -> entry table for a single locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<String, DictionaryEntry>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dictionary from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build a dictionary from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, DictionaryError> {
        let Value::Object(root) = value else {
            return Err(DictionaryError::NotAnObject);
        };

        let mut entries = HashMap::with_capacity(root.len());
        for (key, value) in root {
            let entry = match value {
                Value::String(text) => DictionaryEntry::PlainText(text),
                Value::Object(object) => {
                    DictionaryEntry::ServiceVariants(ServiceVariants::from_json(&key, object)?)
                }
                _ => return Err(DictionaryError::InvalidEntry { key }),
            };
            entries.insert(key, entry);
        }

        Ok(Self { entries })
    }

    /// Add or replace an entry. Only used while assembling a dictionary.
    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<DictionaryEntry>) {
        self.entries.insert(key.into(), entry.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, entry: impl Into<DictionaryEntry>) -> Self {
        self.insert(key, entry);
        self
    }

    pub fn get(&self, key: &str) -> Option<&DictionaryEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
