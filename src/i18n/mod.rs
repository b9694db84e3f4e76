//! Internationalization (i18n) for site content.
//!
//! - `registry`: Single source of truth for all supported locales
//! - `locale`: Validated `Locale` handle used by every content lookup
//!
//! # Example
//!
//! ```rust
//! use site_content::i18n::{Locale, LocaleRegistry};
//!
//! let fallback = Locale::default_locale();
//! assert_eq!(fallback.code(), "en");
//! assert!(LocaleRegistry::get().is_enabled("es"));
//! ```

mod locale;
mod registry;

pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry};
