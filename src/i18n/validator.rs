//! Message schema validation.
//!
//! The default locale's documents are the authoritative key schema. This
//! module checks the typed key constants against the default bundle and every
//! translation bundle against the default one.

use crate::i18n::{keys, MessageBundle, Namespace};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Schema violations; a bundle with errors must not be served
    pub errors: Vec<String>,

    /// Gaps that degrade output but keep the schema intact
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    /// Append another report's findings.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for message bundles.
pub struct SchemaValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl SchemaValidator {
    /// Check the typed key schema against the default locale's bundle.
    ///
    /// - error: a typed key missing from the default bundle
    /// - warning: a default key with no typed constant
    pub fn validate_schema(default: &MessageBundle) -> ValidationReport {
        let mut report = ValidationReport::new();

        for key in keys::all() {
            if default.get(key).is_none() {
                report.errors.push(format!(
                    "Schema key '{}.{}' is missing from '{}'",
                    key.namespace(),
                    key.key(),
                    default.locale()
                ));
            }
        }

        let declared: BTreeSet<(Namespace, &str)> =
            keys::all().map(|key| (key.namespace(), key.key())).collect();
        for namespace in Namespace::ALL {
            for key in default.keys(namespace) {
                if !declared.contains(&(namespace, key)) {
                    report.warnings.push(format!(
                        "Key '{}.{}' in '{}' has no schema constant",
                        namespace,
                        key,
                        default.locale()
                    ));
                }
            }
        }

        report
    }

    /// Check that a translation conforms to the default locale's key set.
    ///
    /// - error: a key the default locale does not define
    /// - warning: a default key the translation leaves out
    /// - warning: differing `{placeholder}` names for the same key
    pub fn validate_translation(
        default: &MessageBundle,
        translation: &MessageBundle,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();
        let locale = translation.locale();

        for namespace in Namespace::ALL {
            let default_keys = default.keys(namespace);
            let translated_keys = translation.keys(namespace);

            for key in translated_keys.difference(&default_keys) {
                report.errors.push(format!(
                    "Key '{}.{}' in '{}' is not defined by '{}'",
                    namespace,
                    key,
                    locale,
                    default.locale()
                ));
            }

            for key in default_keys.difference(&translated_keys) {
                report.warnings.push(format!(
                    "Key '{}.{}' is not translated in '{}'",
                    namespace, key, locale
                ));
            }

            for key in default_keys.intersection(&translated_keys) {
                let (Some(original), Some(translated)) = (
                    default.lookup(namespace, key),
                    translation.lookup(namespace, key),
                ) else {
                    continue;
                };

                let orig_placeholders = Self::extract_placeholders(original);
                let trans_placeholders = Self::extract_placeholders(translated);
                if orig_placeholders != trans_placeholders {
                    report.warnings.push(format!(
                        "Placeholder mismatch in '{}.{}' for '{}': default has {:?}, translation has {:?}",
                        namespace, key, locale, orig_placeholders, trans_placeholders
                    ));
                }
            }
        }

        report
    }

    /// Extract the distinct `{name}` placeholders of a template
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{\s*([A-Za-z_][A-Za-z0-9_]*)").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Locale, LocaleRegistry, NamespaceMessages};

    fn locale(code: &str) -> Locale {
        LocaleRegistry::builtin().get(code).unwrap()
    }

    fn bundle(code: &str, namespaces: &[(Namespace, &[(&str, &str)])]) -> MessageBundle {
        MessageBundle::new(
            locale(code),
            namespaces.iter().map(|(ns, pairs)| {
                let messages: NamespaceMessages = pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                (*ns, messages)
            }),
        )
    }

    /// Default bundle containing exactly the typed schema.
    fn schema_bundle() -> MessageBundle {
        let mut namespaces: std::collections::BTreeMap<Namespace, NamespaceMessages> =
            Default::default();
        for key in keys::all() {
            namespaces
                .entry(key.namespace())
                .or_default()
                .insert(key.key().to_string(), format!("text for {}", key.key()));
        }
        MessageBundle::new(locale("en"), namespaces)
    }

    // ==================== Placeholder Extraction Tests ====================

    #[test]
    fn test_extract_placeholders_simple() {
        let placeholders = SchemaValidator::extract_placeholders("{count} saved items");
        assert_eq!(placeholders.into_iter().collect::<Vec<_>>(), vec!["count"]);
    }

    #[test]
    fn test_extract_placeholders_icu_style() {
        let placeholders =
            SchemaValidator::extract_placeholders("{count, plural, one {# item} other {# items}}");
        assert_eq!(placeholders.into_iter().collect::<Vec<_>>(), vec!["count"]);
    }

    #[test]
    fn test_extract_placeholders_none() {
        assert!(SchemaValidator::extract_placeholders("Log in").is_empty());
    }

    #[test]
    fn test_extract_placeholders_deduplicates() {
        let placeholders = SchemaValidator::extract_placeholders("{a} and {b} and {a}");
        assert_eq!(placeholders.len(), 2);
    }

    // ==================== Schema Tests ====================

    #[test]
    fn test_schema_clean_when_bundle_matches() {
        let report = SchemaValidator::validate_schema(&schema_bundle());
        assert!(report.is_clean(), "{report:?}");
    }

    #[test]
    fn test_schema_missing_key_is_error() {
        let report = SchemaValidator::validate_schema(&bundle("en", &[]));
        assert!(report.has_errors());
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("auth.emailCheck.taken")));
    }

    #[test]
    fn test_schema_undeclared_key_is_warning() {
        let base = schema_bundle();
        let default = MessageBundle::new(
            base.locale(),
            base.namespaces().clone().into_iter().map(|(ns, mut messages)| {
                if ns == Namespace::Home {
                    messages.insert("hero.badge".to_string(), "New".to_string());
                }
                (ns, messages)
            }),
        );

        let report = SchemaValidator::validate_schema(&default);
        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("home.hero.badge"));
    }

    // ==================== Translation Tests ====================

    #[test]
    fn test_translation_identical_keys_clean() {
        let default = bundle("en", &[(Namespace::Favorites, &[("title", "Favorites")])]);
        let spanish = bundle("es", &[(Namespace::Favorites, &[("title", "Favoritos")])]);

        let report = SchemaValidator::validate_translation(&default, &spanish);
        assert!(report.is_clean());
    }

    #[test]
    fn test_translation_extra_key_is_error() {
        let default = bundle("en", &[(Namespace::Favorites, &[("title", "Favorites")])]);
        let spanish = bundle(
            "es",
            &[(Namespace::Favorites, &[("title", "Favoritos"), ("subtitle", "Extra")])],
        );

        let report = SchemaValidator::validate_translation(&default, &spanish);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("favorites.subtitle"));
    }

    #[test]
    fn test_translation_missing_key_is_warning() {
        let default = bundle(
            "en",
            &[(Namespace::Auth, &[("login.title", "Welcome"), ("login.submit", "Log in")])],
        );
        let french = bundle("fr", &[(Namespace::Auth, &[("login.title", "Bon retour")])]);

        let report = SchemaValidator::validate_translation(&default, &french);
        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("auth.login.submit"));
    }

    #[test]
    fn test_translation_placeholder_mismatch_is_warning() {
        let default = bundle("en", &[(Namespace::Favorites, &[("count", "{count} saved")])]);
        let spanish = bundle("es", &[(Namespace::Favorites, &[("count", "{total} guardados")])]);

        let report = SchemaValidator::validate_translation(&default, &spanish);
        assert!(!report.has_errors());
        assert!(report.warnings[0].contains("Placeholder mismatch"));
    }

    #[test]
    fn test_translation_key_in_other_namespace_is_error() {
        let default = bundle("en", &[(Namespace::Home, &[("title", "Home")])]);
        let spanish = bundle("es", &[(Namespace::Catalog, &[("title", "Catálogo")])]);

        let report = SchemaValidator::validate_translation(&default, &spanish);
        assert!(report.errors[0].contains("catalog.title"));
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_merge() {
        let mut report = ValidationReport::new();
        report.merge(ValidationReport {
            errors: vec!["e".to_string()],
            warnings: vec!["w".to_string()],
        });
        assert!(report.has_errors());
        assert!(report.has_warnings());
        assert!(!report.is_clean());
    }
}
