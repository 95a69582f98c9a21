//! Key resolution and placeholder substitution.
//!
//! Lookup never fails. Each miss degrades to a weaker fallback and the last
//! one is the key itself:
//!
//! | Miss                                   | Result                    |
//! |----------------------------------------|---------------------------|
//! | Locale not loaded                      | `en` dictionary           |
//! | `en` not loaded either                 | the key                   |
//! | Key absent (or empty text)             | the key                   |
//! | Service variant absent                 | the `"default"` variant   |
//! | Variant mapping without `serviceName`  | the key                   |

use std::sync::Arc;

use tracing::debug;

use super::catalog::Catalog;
use super::dictionary::{Dictionary, DictionaryEntry};
use super::variables::Variables;

/// Resolves keys against an immutable [`Catalog`].
#[derive(Debug, Clone)]
pub struct Translator {
    catalog: Arc<Catalog>,
}

impl Translator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn bundled() -> Self {
        Self::new(Catalog::bundled())
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Resolve `key` for `locale` and substitute `vars` into the result.
    pub fn resolve(&self, locale: &str, key: &str, vars: &Variables) -> String {
        let text = match self.catalog.dictionary_for(locale) {
            Some(dict) => select_text(dict, key, vars),
            None => {
                debug!("No dictionary for '{}' and no fallback loaded", locale);
                key
            }
        };

        if vars.is_empty() {
            text.to_string()
        } else {
            substitute(text, vars)
        }
    }

    /// Same translator, same catalog.
    pub fn ptr_eq(&self, other: &Translator) -> bool {
        Arc::ptr_eq(&self.catalog, &other.catalog)
    }
}

fn select_text<'a>(dict: &'a Dictionary, key: &'a str, vars: &Variables) -> &'a str {
    match dict.get(key) {
        None => {
            debug!("Missing translation key '{}'", key);
            key
        }
        Some(DictionaryEntry::PlainText(text)) => non_empty(text).unwrap_or(key),
        Some(DictionaryEntry::ServiceVariants(variants)) => match vars.service_name() {
            Some(service) => variants
                .get(&service.to_lowercase())
                .and_then(non_empty)
                .or_else(|| non_empty(variants.default_text()))
                .unwrap_or(key),
            None => {
                debug!("Key '{}' needs a serviceName to resolve", key);
                key
            }
        },
    }
}

fn non_empty(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

/// Replace every literal `{name}` with its value, one variable at a time in
/// insertion order. Values are inserted verbatim.
pub fn substitute(text: &str, vars: &Variables) -> String {
    let mut result = text.to_string();
    for (name, value) in vars.iter() {
        let token = format!("{{{name}}}");
        if result.contains(&token) {
            result = result.replace(&token, value);
        }
    }
    result
}
