//! Internationalization (i18n) module: locale resolution and message bundles.
//!
//! # Architecture
//!
//! - `registry`: The enabled locale set and the default locale
//! - `locale`: `Locale`, a tag proven to be in the enabled set
//! - `namespace`: The closed set of message namespaces
//! - `assets`: Explicit (locale, namespace) → document table
//! - `bundle`: Loaded, flattened messages for one locale
//! - `keys`: Typed message key schema mirroring the default locale
//! - `validator`: Schema checks run at startup
//! - `metrics`: Bundle cache and load counters
//! - `service`: `LocaleService`, tying resolution, loading and caching together
//!
//! # Example
//!
//! ```rust,ignore
//! use music_catalog::i18n::{keys, LocaleRegistry, LocaleService};
//!
//! let service = LocaleService::embedded(LocaleRegistry::builtin());
//! let locale = service.resolve_locale(Some("es"));
//! let messages = service.load_messages(locale).await?;
//! let title = messages.text(keys::favorites::TITLE);
//! ```

mod assets;
mod bundle;
mod error;
pub mod keys;
mod locale;
mod metrics;
mod namespace;
mod registry;
mod service;
mod validator;

pub use assets::{AssetHandle, AssetTable};
pub use bundle::{MessageBundle, NamespaceMessages};
pub use error::{BundleLoadError, LocaleSetupError};
pub use keys::MessageKey;
pub use locale::Locale;
pub use metrics::{BundleMetrics, MetricsReport};
pub use namespace::Namespace;
pub use registry::{LocaleConfig, LocaleRegistry};
pub use service::{LocaleReport, LocaleService};
pub use validator::{SchemaValidator, ValidationReport};
