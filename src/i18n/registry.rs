//! Locale registry: the process-wide set of supported locales.
//!
//! The built-in locale list is closed. Configuration selects which of them are
//! enabled and which one is the default; the registry is built once at startup
//! and never mutated afterwards.

use crate::i18n::{Locale, LocaleSetupError};
use tracing::debug;

/// Static metadata for a built-in locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleConfig {
    /// BCP 47 language tag (e.g., "en", "es", "fr")
    pub code: &'static str,

    /// English name of the locale (e.g., "English", "Spanish")
    pub name: &'static str,

    /// Native name of the locale (e.g., "English", "Español")
    pub native_name: &'static str,
}

/// Every locale the frontend ships message documents for.
const BUILTIN_LOCALES: &[LocaleConfig] = &[
    LocaleConfig {
        code: "en",
        name: "English",
        native_name: "English",
    },
    LocaleConfig {
        code: "es",
        name: "Spanish",
        native_name: "Español",
    },
    LocaleConfig {
        code: "fr",
        name: "French",
        native_name: "Français",
    },
];

/// The enabled locales and the default one.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    enabled: Vec<Locale>,
    default: Locale,
}

impl LocaleRegistry {
    /// Registry with every built-in locale enabled and English as default.
    pub fn builtin() -> Self {
        Self {
            enabled: BUILTIN_LOCALES
                .iter()
                .map(Locale::new)
                .collect(),
            default: Locale::new(&BUILTIN_LOCALES[0]),
        }
    }

    /// Build a registry from configured locale tags.
    ///
    /// # Arguments
    /// * `enabled` - Tags to enable; each must be a built-in locale
    /// * `default` - Default tag; must be one of `enabled`
    ///
    /// # Returns
    /// * `Ok(LocaleRegistry)` when every tag is known and the default is enabled
    /// * `Err(LocaleSetupError)` otherwise
    pub fn from_settings<S: AsRef<str>>(
        enabled: &[S],
        default: &str,
    ) -> Result<Self, LocaleSetupError> {
        if enabled.is_empty() {
            return Err(LocaleSetupError::NoLocalesEnabled);
        }

        let mut locales = Vec::with_capacity(enabled.len());
        for tag in enabled {
            let config = Self::lookup_builtin(tag.as_ref())
                .ok_or_else(|| LocaleSetupError::UnknownLocale(tag.as_ref().to_string()))?;
            let locale = Locale::new(config);
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }

        let default = locales
            .iter()
            .copied()
            .find(|locale| locale.code() == default)
            .ok_or_else(|| LocaleSetupError::DefaultNotEnabled(default.to_string()))?;

        Ok(Self {
            enabled: locales,
            default,
        })
    }

    /// Map a request's locale hint to an enabled locale.
    ///
    /// The membership test is exact and case-sensitive. An absent or
    /// unsupported hint resolves to the default locale; it is never an error.
    pub fn resolve(&self, hint: Option<&str>) -> Locale {
        match hint.and_then(|hint| self.get(hint)) {
            Some(locale) => locale,
            None => {
                if let Some(hint) = hint {
                    debug!(
                        "Locale hint '{}' is not supported, using '{}'",
                        hint, self.default
                    );
                }
                self.default
            }
        }
    }

    /// Get an enabled locale by its exact tag.
    pub fn get(&self, code: &str) -> Option<Locale> {
        self.enabled.iter().copied().find(|locale| locale.code() == code)
    }

    /// Check if a tag names an enabled locale.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// The default locale, whose documents define the message key schema.
    pub fn default_locale(&self) -> Locale {
        self.default
    }

    /// All enabled locales, in configuration order.
    pub fn enabled(&self) -> &[Locale] {
        &self.enabled
    }

    /// Enabled locales other than the default.
    pub fn translations(&self) -> impl Iterator<Item = Locale> + '_ {
        self.enabled
            .iter()
            .copied()
            .filter(move |locale| *locale != self.default)
    }

    fn lookup_builtin(code: &str) -> Option<&'static LocaleConfig> {
        BUILTIN_LOCALES.iter().find(|config| config.code == code)
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
