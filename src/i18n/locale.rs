//! Locale type: a supported locale that has already been resolved.
//!
//! A `Locale` can only be produced by the [`LocaleRegistry`], so any value of
//! this type is known to be a member of the enabled locale set.

use crate::i18n::LocaleConfig;
use serde::{Serialize, Serializer};
use std::fmt;

/// A resolved, enabled locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    config: &'static LocaleConfig,
}

impl Locale {
    pub(crate) const fn new(config: &'static LocaleConfig) -> Self {
        Self { config }
    }

    /// Get the language tag.
    ///
    /// # Returns
    /// The tag as a static string (e.g., "en", "fr").
    pub fn code(&self) -> &'static str {
        self.config.code
    }

    /// Get the static metadata for this locale.
    pub fn config(&self) -> &'static LocaleConfig {
        self.config
    }

    /// Native name of the locale (e.g., "Español").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Serialized as the bare language tag.
impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
