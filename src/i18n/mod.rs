//! Internationalization (i18n) module.
//!
//! Holds the per-locale dictionaries, resolves keys against them and keeps
//! the current locale in an observable store.
//!
//! - `dictionary` - Entry model and JSON parsing
//! - `catalog` - Dictionaries keyed by locale, with the `en` fallback
//! - `translator` - Key lookup, service variants and `{name}` substitution
//! - `store` - `I18n`: current locale plus the derived lookup
//!
//! The bundled `en.json` and `zh.json` are embedded with `include_str!`, so
//! there is no file I/O at runtime unless a dictionary directory is
//! configured.

mod catalog;
mod dictionary;
mod locale;
mod store;
mod translator;
mod variables;

pub use catalog::Catalog;
pub use dictionary::{DEFAULT_VARIANT, Dictionary, DictionaryEntry, DictionaryError, ServiceVariants};
pub use locale::Locale;
pub use store::{I18n, Lookup};
pub use translator::{Translator, substitute};
pub use variables::{SERVICE_NAME, Variables};
