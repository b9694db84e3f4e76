//! Locale type: validated site locale.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A locale that has been validated against the registry.
///
/// Only supported, enabled locales can be constructed, so holding a `Locale`
/// means content can be requested for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    code: &'static str,
}

impl Locale {
    pub const ENGLISH: Locale = Locale { code: "en" };
    pub const SPANISH: Locale = Locale { code: "es" };

    /// Create a Locale from a code string.
    ///
    /// # Example
    /// ```
    /// use site_content::i18n::Locale;
    ///
    /// let spanish = Locale::from_code("es").unwrap();
    /// assert_eq!(spanish.code(), "es");
    /// ```
    pub fn from_code(code: &str) -> Result<Locale> {
        let registry = LocaleRegistry::get();

        match registry.get_by_code(code) {
            None => bail!("Unknown locale code: '{}'", code),
            Some(_) if !registry.is_enabled(code) => bail!("Locale '{}' is not enabled", code),
            Some(config) => Ok(Locale { code: config.code }),
        }
    }

    /// The locale every failed lookup falls back to.
    pub fn default_locale() -> Locale {
        Locale {
            code: LocaleRegistry::get().default_locale().code,
        }
    }

    /// All enabled locales, default first.
    pub fn all_enabled() -> Vec<Locale> {
        LocaleRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Locale { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full configuration from the registry, if the code is still registered.
    pub fn config(&self) -> Option<&'static LocaleConfig> {
        LocaleRegistry::get().get_by_code(self.code)
    }

    /// Whether failed lookups for this locale have nowhere else to go.
    pub fn is_default(&self) -> bool {
        self.config().map(|config| config.is_default).unwrap_or(false)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Locale::from_code(s)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
