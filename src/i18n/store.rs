//! Locale store and the derived lookup bound to it.

use std::sync::Arc;

use tracing::{info, warn};

use super::catalog::Catalog;
use super::locale::Locale;
use super::translator::Translator;
use super::variables::Variables;
use crate::store::{Derived, Readable, Writable};

/// A translator bound to one locale snapshot.
#[derive(Debug, Clone)]
pub struct Lookup {
    locale: Locale,
    translator: Translator,
}

impl Lookup {
    pub fn new(locale: Locale, translator: Translator) -> Self {
        Self { locale, translator }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Resolve `key` without variables.
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &Variables::new())
    }

    /// Resolve `key` and substitute `vars`.
    pub fn t_with(&self, key: &str, vars: &Variables) -> String {
        self.translator.resolve(self.locale.as_str(), key, vars)
    }
}

impl PartialEq for Lookup {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale && self.translator.ptr_eq(&other.translator)
    }
}

/// Current locale plus the lookup derived from it.
///
/// ```rust
/// use gostream_i18n::{I18n, Variables};
/// use gostream_i18n::store::Readable;
///
/// let i18n = I18n::bundled("zh");
/// assert_eq!(i18n.t().get().t("backend.start"), "启动");
///
/// i18n.set_locale("en");
/// assert_eq!(i18n.t().get().t("backend.start"), "Start");
///
/// let vars = Variables::from([("serviceName", "frpc")]);
/// assert_eq!(i18n.translate("service.status.running", &vars), "Tunnel is up");
/// ```
#[derive(Debug, Clone)]
pub struct I18n {
    locale: Writable<Locale>,
    translator: Translator,
    lookup: Derived<Lookup>,
}

impl I18n {
    pub fn new(catalog: Arc<Catalog>, initial: impl Into<Locale>) -> Self {
        let translator = Translator::new(catalog);
        let locale = Writable::new(initial.into());

        let bound = translator.clone();
        let lookup = Derived::new(&locale, move |locale: &Locale| {
            Lookup::new(locale.clone(), bound.clone())
        });

        Self {
            locale,
            translator,
            lookup,
        }
    }

    /// Store over the bundled dictionaries.
    pub fn bundled(initial: impl Into<Locale>) -> Self {
        Self::new(Catalog::bundled(), initial)
    }

    /// The locale store itself, for subscribing or watching.
    pub fn locale(&self) -> &Writable<Locale> {
        &self.locale
    }

    pub fn current_locale(&self) -> Locale {
        self.locale.get()
    }

    /// Replace the current locale.
    ///
    /// Unsupported locales are accepted; lookups then use the `en` dictionary.
    pub fn set_locale(&self, locale: impl Into<Locale>) {
        let locale = locale.into();
        if !self.translator.catalog().contains(locale.as_str()) {
            warn!(
                "Locale '{}' has no dictionary, falling back to '{}'",
                locale,
                Locale::FALLBACK
            );
        }

        let name = locale.to_string();
        if self.locale.set(locale) {
            info!("Locale set to '{}'", name);
        }
    }

    /// Derived lookup; always bound to the current locale.
    pub fn t(&self) -> &Derived<Lookup> {
        &self.lookup
    }

    /// Resolve `key` for the locale current at call time.
    pub fn translate(&self, key: &str, vars: &Variables) -> String {
        self.translator
            .resolve(self.current_locale().as_str(), key, vars)
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.translator.catalog()
    }
}
