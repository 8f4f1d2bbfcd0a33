//! Message document lookup table.
//!
//! Every (locale, namespace) pair the service may load is registered up front.
//! Loading a pair that is not in the table fails immediately; document paths
//! are never derived from request data.

use crate::i18n::{BundleLoadError, Locale, LocaleRegistry, Namespace};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

macro_rules! embedded_documents {
    ($( $locale:literal => { $( $ns:ident : $file:literal ),* $(,)? } ),* $(,)?) => {
        &[$($(
            (
                $locale,
                Namespace::$ns,
                include_str!(concat!(
                    env!("CARGO_MANIFEST_DIR"),
                    "/messages/",
                    $locale,
                    "/",
                    $file,
                    ".json"
                )),
            ),
        )*)*]
    };
}

/// Where one namespace document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetHandle {
    /// Document compiled into the binary
    Embedded(&'static str),

    /// Document read from disk on each load
    File(PathBuf),
}

impl AssetHandle {
    /// Read the raw document.
    pub(crate) async fn read(
        &self,
        locale: Locale,
        namespace: Namespace,
    ) -> Result<Cow<'static, str>, BundleLoadError> {
        match self {
            AssetHandle::Embedded(raw) => Ok(Cow::Borrowed(*raw)),
            AssetHandle::File(path) => tokio::fs::read_to_string(path)
                .await
                .map(Cow::Owned)
                .map_err(|source| BundleLoadError::Read {
                    locale: locale.code(),
                    namespace,
                    path: path.clone(),
                    source,
                }),
        }
    }
}

/// Explicit (locale, namespace) → document table, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct AssetTable {
    entries: HashMap<(Locale, Namespace), AssetHandle>,
}

impl AssetTable {
    /// Empty table; populate with [`AssetTable::with_asset`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Table of compiled-in documents for every enabled locale.
    pub fn embedded(registry: &LocaleRegistry) -> Self {
        let mut table = Self::new();
        for &(code, namespace, raw) in EMBEDDED_DOCUMENTS {
            if let Some(locale) = registry.get(code) {
                table.insert(locale, namespace, AssetHandle::Embedded(raw));
            }
        }
        debug!("Registered {} embedded message documents", table.len());
        table
    }

    /// Table of `<root>/<locale>/<namespace>.json` files for every enabled
    /// locale and namespace.
    ///
    /// Files are not touched here; a missing file surfaces as a
    /// [`BundleLoadError::Read`] when the locale is loaded.
    pub fn directory(root: impl AsRef<Path>, registry: &LocaleRegistry) -> Self {
        let root = root.as_ref();
        let mut table = Self::new();
        for &locale in registry.enabled() {
            for namespace in Namespace::ALL {
                let path = root
                    .join(locale.code())
                    .join(format!("{}.json", namespace.as_str()));
                table.insert(locale, namespace, AssetHandle::File(path));
            }
        }
        debug!(
            "Registered {} message documents under {}",
            table.len(),
            root.display()
        );
        table
    }

    /// Register or replace one document.
    pub fn with_asset(mut self, locale: Locale, namespace: Namespace, handle: AssetHandle) -> Self {
        self.insert(locale, namespace, handle);
        self
    }

    /// Remove one document.
    pub fn without_asset(mut self, locale: Locale, namespace: Namespace) -> Self {
        self.entries.remove(&(locale, namespace));
        self
    }

    /// Look up the document for a pair.
    pub fn handle(
        &self,
        locale: Locale,
        namespace: Namespace,
    ) -> Result<&AssetHandle, BundleLoadError> {
        self.entries
            .get(&(locale, namespace))
            .ok_or(BundleLoadError::MissingAsset {
                locale: locale.code(),
                namespace,
            })
    }

    /// Number of registered documents.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn insert(&mut self, locale: Locale, namespace: Namespace, handle: AssetHandle) {
        self.entries.insert((locale, namespace), handle);
    }
}

/// Documents compiled into the binary, keyed by (locale tag, namespace).
const EMBEDDED_DOCUMENTS: &[(&str, Namespace, &str)] = embedded_documents! {
    "en" => { Common: "common", Home: "home", Catalog: "catalog", Favorites: "favorites", Auth: "auth" },
    "es" => { Common: "common", Home: "home", Catalog: "catalog", Favorites: "favorites", Auth: "auth" },
    "fr" => { Common: "common", Home: "home", Catalog: "catalog", Favorites: "favorites", Auth: "auth" },
};
