use crate::i18n::{AssetTable, LocaleRegistry, LocaleService, LocaleSetupError};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Locales
    pub default_locale: String,
    pub enabled_locales: Vec<String>,

    // Message documents
    pub messages_dir: Option<PathBuf>,
    pub bundle_cache: bool,

    // Sign-up email check
    pub email_check_url: String,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Locales
            default_locale: std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string()),
            enabled_locales: std::env::var("ENABLED_LOCALES")
                .map(|v| parse_list(&v))
                .unwrap_or_else(|_| vec!["en".to_string(), "es".to_string(), "fr".to_string()]),

            // Message documents
            messages_dir: std::env::var("MESSAGES_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            bundle_cache: match std::env::var("BUNDLE_CACHE") {
                Ok(v) => parse_bool(&v).context("BUNDLE_CACHE must be true or false")?,
                Err(_) => true,
            },

            // Sign-up email check
            email_check_url: std::env::var("EMAIL_CHECK_URL")
                .unwrap_or_else(|_| "http://localhost:3001/api/auth/check-email".to_string()),

            // Server
            port: match std::env::var("PORT") {
                Ok(v) => v.parse().context("PORT must be a valid port number")?,
                Err(_) => 8080,
            },
        })
    }

    /// Build the locale service described by this configuration.
    ///
    /// Message documents come from `messages_dir` when set, otherwise from the
    /// compiled-in copies.
    pub fn locale_service(&self) -> Result<LocaleService, LocaleSetupError> {
        let registry = LocaleRegistry::from_settings(self.enabled_locales.as_slice(), &self.default_locale)?;
        let assets = match &self.messages_dir {
            Some(dir) => AssetTable::directory(dir, &registry),
            None => AssetTable::embedded(&registry),
        };
        Ok(LocaleService::new(registry, assets, self.bundle_cache))
    }
}

/// Split a comma-separated list, dropping blanks.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
