//! Locale resolution service.
//!
//! Resolves request locale hints and loads the message bundle of the resolved
//! locale. Bundles are immutable; with caching enabled each locale is loaded at
//! most once successfully and shared for the process lifetime.

use crate::i18n::bundle::parse_namespace;
use crate::i18n::{
    AssetTable, BundleLoadError, BundleMetrics, Locale, LocaleRegistry, LocaleSetupError,
    MessageBundle, Namespace, NamespaceMessages, SchemaValidator, ValidationReport,
};
use futures::future::try_join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

/// Validation outcome for one locale, produced by [`LocaleService::verify`].
#[derive(Debug, Clone)]
pub struct LocaleReport {
    pub locale: Locale,
    pub report: ValidationReport,
}

pub struct LocaleService {
    registry: LocaleRegistry,
    assets: AssetTable,
    /// One write-once cell per enabled locale; `None` when caching is off.
    cache: Option<HashMap<Locale, OnceCell<Arc<MessageBundle>>>>,
    metrics: BundleMetrics,
}

impl LocaleService {
    /// Create a service over an explicit asset table.
    ///
    /// # Arguments
    /// * `registry` - Enabled locales and the default
    /// * `assets` - (locale, namespace) → document table
    /// * `cache` - Keep loaded bundles for the process lifetime
    pub fn new(registry: LocaleRegistry, assets: AssetTable, cache: bool) -> Self {
        let cache = cache.then(|| {
            registry
                .enabled()
                .iter()
                .map(|&locale| (locale, OnceCell::new()))
                .collect()
        });

        Self {
            registry,
            assets,
            cache,
            metrics: BundleMetrics::new(),
        }
    }

    /// Service over the compiled-in documents, with caching.
    pub fn embedded(registry: LocaleRegistry) -> Self {
        let assets = AssetTable::embedded(&registry);
        Self::new(registry, assets, true)
    }

    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &BundleMetrics {
        &self.metrics
    }

    /// Map a request's locale hint to an enabled locale.
    ///
    /// Exact, case-sensitive membership; anything else resolves to the
    /// default locale.
    pub fn resolve_locale(&self, hint: Option<&str>) -> Locale {
        self.registry.resolve(hint)
    }

    /// Load every namespace of a resolved locale.
    ///
    /// Namespace documents are read and parsed concurrently. The caller gets
    /// the complete bundle or the first error; a missing namespace is never
    /// replaced with the default locale's document.
    pub async fn load_messages(&self, locale: Locale) -> Result<Arc<MessageBundle>, BundleLoadError> {
        let Some(cell) = self.cache.as_ref().and_then(|cache| cache.get(&locale)) else {
            return self.read_bundle(locale).await.map(Arc::new);
        };

        if let Some(bundle) = cell.get() {
            self.metrics.record_cache_hit();
            debug!("Serving cached messages for '{}'", locale);
            return Ok(Arc::clone(bundle));
        }

        self.metrics.record_cache_miss();
        let bundle = cell
            .get_or_try_init(|| async { self.read_bundle(locale).await.map(Arc::new) })
            .await?;
        Ok(Arc::clone(bundle))
    }

    /// Resolve a hint and load the resulting locale's bundle.
    pub async fn messages_for(
        &self,
        hint: Option<&str>,
    ) -> Result<(Locale, Arc<MessageBundle>), BundleLoadError> {
        let locale = self.resolve_locale(hint);
        let bundle = self.load_messages(locale).await?;
        Ok((locale, bundle))
    }

    /// Load every enabled locale and check it against the key schema.
    ///
    /// The default locale is checked against the typed key constants, every
    /// other locale against the default locale's key sets. Warnings are
    /// logged and returned; any error fails verification.
    pub async fn verify(&self) -> Result<Vec<LocaleReport>, LocaleSetupError> {
        let default_locale = self.registry.default_locale();
        let default = self.load_messages(default_locale).await?;

        let mut reports = vec![LocaleReport {
            locale: default_locale,
            report: SchemaValidator::validate_schema(&default),
        }];

        for locale in self.registry.translations() {
            let bundle = self.load_messages(locale).await?;
            reports.push(LocaleReport {
                locale,
                report: SchemaValidator::validate_translation(&default, &bundle),
            });
        }

        for LocaleReport { locale, report } in &reports {
            for warning in &report.warnings {
                warn!("{}", warning);
            }
            if report.has_errors() {
                return Err(LocaleSetupError::SchemaMismatch {
                    locale: locale.code(),
                    errors: report.errors.clone(),
                });
            }
            info!(
                "Messages for '{}' verified ({} warnings)",
                locale,
                report.warnings.len()
            );
        }

        Ok(reports)
    }

    async fn read_bundle(&self, locale: Locale) -> Result<MessageBundle, BundleLoadError> {
        self.metrics.record_load();

        let loads = Namespace::ALL
            .into_iter()
            .map(|namespace| self.read_namespace(locale, namespace));

        match try_join_all(loads).await {
            Ok(namespaces) => {
                let bundle = MessageBundle::new(locale, namespaces);
                debug!("Loaded {} messages for '{}'", bundle.len(), locale);
                Ok(bundle)
            }
            Err(e) => {
                self.metrics.record_load_failure();
                error!("Failed to load messages for '{}': {}", locale, e);
                Err(e)
            }
        }
    }

    async fn read_namespace(
        &self,
        locale: Locale,
        namespace: Namespace,
    ) -> Result<(Namespace, NamespaceMessages), BundleLoadError> {
        let handle = self.assets.handle(locale, namespace)?;
        let raw = handle.read(locale, namespace).await?;
        let messages = parse_namespace(locale, namespace, &raw)?;
        Ok((namespace, messages))
    }
}
