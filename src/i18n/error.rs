use crate::i18n::Namespace;
use std::path::PathBuf;
use thiserror::Error;

/// A namespace document for a resolved locale could not be produced.
///
/// Fatal for the request that triggered the load: there is no partial bundle
/// and no per-namespace fallback to the default locale.
#[derive(Debug, Error)]
pub enum BundleLoadError {
    #[error("no message document registered for {locale}/{namespace}")]
    MissingAsset {
        locale: &'static str,
        namespace: Namespace,
    },

    #[error("failed to read {locale}/{namespace} messages from {}", path.display())]
    Read {
        locale: &'static str,
        namespace: Namespace,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {locale}/{namespace} messages")]
    Parse {
        locale: &'static str,
        namespace: Namespace,
        #[source]
        source: serde_json::Error,
    },

    #[error("{locale}/{namespace} message '{key}' must be a string or an object")]
    InvalidValue {
        locale: &'static str,
        namespace: Namespace,
        key: String,
    },

    #[error("{locale}/{namespace} message '{key}' is defined more than once")]
    DuplicateKey {
        locale: &'static str,
        namespace: Namespace,
        key: String,
    },
}

/// Locale configuration is unusable; raised at startup.
#[derive(Debug, Error)]
pub enum LocaleSetupError {
    #[error("unknown locale '{0}'")]
    UnknownLocale(String),

    #[error("default locale '{0}' is not enabled")]
    DefaultNotEnabled(String),

    #[error("no locales enabled")]
    NoLocalesEnabled,

    #[error(transparent)]
    Bundle(#[from] BundleLoadError),

    #[error("messages for '{locale}' do not match the schema: {}", errors.join("; "))]
    SchemaMismatch {
        locale: &'static str,
        errors: Vec<String>,
    },
}
