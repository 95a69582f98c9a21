//! GoStream i18n - Reactive locale store and translation lookup
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `i18n` - Dictionaries, translator and the `I18n` locale store
//! - `store` - Observable `Writable` / `Derived` values
//! - `console` - Line commands for inspecting dictionaries

pub mod config;
pub mod console;
pub mod i18n;
pub mod store;

pub use i18n::{Catalog, I18n, Locale, Lookup, Translator, Variables};
