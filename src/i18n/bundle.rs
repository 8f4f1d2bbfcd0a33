//! Loaded message bundles.
//!
//! A bundle holds every namespace of one locale. Namespace documents are JSON
//! objects whose nested objects are flattened into dotted keys, so
//! `{"hero": {"title": "..."}}` is looked up as `hero.title`.

use crate::i18n::{BundleLoadError, Locale, MessageKey, Namespace};
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

static ARGUMENT_REGEX: OnceLock<Regex> = OnceLock::new();

/// Message key → string template for one namespace.
pub type NamespaceMessages = BTreeMap<String, String>;

/// Every namespace of one locale, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageBundle {
    locale: Locale,
    namespaces: BTreeMap<Namespace, NamespaceMessages>,
}

impl MessageBundle {
    pub(crate) fn new(
        locale: Locale,
        namespaces: impl IntoIterator<Item = (Namespace, NamespaceMessages)>,
    ) -> Self {
        Self {
            locale,
            namespaces: namespaces.into_iter().collect(),
        }
    }

    /// Locale this bundle was loaded for.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Get a message by its typed key.
    ///
    /// `None` means the locale does not translate this key; typed keys are
    /// always present in the default locale.
    pub fn get(&self, key: MessageKey) -> Option<&str> {
        self.lookup(key.namespace(), key.key())
    }

    /// Get a message, falling back to its dotted key when untranslated.
    pub fn text(&self, key: MessageKey) -> &str {
        self.get(key).unwrap_or(key.key())
    }

    /// Substitute `{name}` placeholders in a message.
    ///
    /// The template is scanned once, so argument values are inserted
    /// verbatim even when they contain `{...}` themselves. Placeholders
    /// without a matching argument are left as-is.
    pub fn format(&self, key: MessageKey, args: &[(&str, &str)]) -> String {
        let regex = ARGUMENT_REGEX
            .get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

        regex
            .replace_all(self.text(key), |caps: &Captures| {
                let name = &caps[1];
                args.iter()
                    .find(|(arg, _)| *arg == name)
                    .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
            })
            .into_owned()
    }

    /// Untyped lookup by namespace and dotted key.
    pub fn lookup(&self, namespace: Namespace, key: &str) -> Option<&str> {
        self.namespaces
            .get(&namespace)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }

    /// All messages of one namespace.
    pub fn namespace(&self, namespace: Namespace) -> Option<&NamespaceMessages> {
        self.namespaces.get(&namespace)
    }

    /// All namespaces.
    pub fn namespaces(&self) -> &BTreeMap<Namespace, NamespaceMessages> {
        &self.namespaces
    }

    /// Key set of one namespace (empty if the namespace is absent).
    pub fn keys(&self, namespace: Namespace) -> BTreeSet<&str> {
        self.namespaces
            .get(&namespace)
            .map(|messages| messages.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Total number of messages across namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse one namespace document into flattened messages.
pub(crate) fn parse_namespace(
    locale: Locale,
    namespace: Namespace,
    raw: &str,
) -> Result<NamespaceMessages, BundleLoadError> {
    let document: Map<String, Value> =
        serde_json::from_str(raw).map_err(|source| BundleLoadError::Parse {
            locale: locale.code(),
            namespace,
            source,
        })?;

    let mut messages = NamespaceMessages::new();
    flatten(&document, "", &mut messages).map_err(|e| match e {
        FlattenError::NotText(key) => BundleLoadError::InvalidValue {
            locale: locale.code(),
            namespace,
            key,
        },
        FlattenError::Duplicate(key) => BundleLoadError::DuplicateKey {
            locale: locale.code(),
            namespace,
            key,
        },
    })?;
    Ok(messages)
}

/// Dotted key of the value that could not be flattened.
enum FlattenError {
    NotText(String),
    /// `{"a": {"b": ..}}` and `{"a.b": ..}` in one document
    Duplicate(String),
}

fn flatten(
    object: &Map<String, Value>,
    prefix: &str,
    out: &mut NamespaceMessages,
) -> Result<(), FlattenError> {
    for (key, value) in object {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::String(text) => match out.entry(path) {
                Entry::Vacant(slot) => {
                    slot.insert(text.clone());
                }
                Entry::Occupied(slot) => return Err(FlattenError::Duplicate(slot.key().clone())),
            },
            Value::Object(nested) => flatten(nested, &path, out)?,
            _ => return Err(FlattenError::NotText(path)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::keys;
    use crate::i18n::LocaleRegistry;

    fn en() -> Locale {
        LocaleRegistry::builtin().default_locale()
    }

    fn bundle_with(namespace: Namespace, pairs: &[(&str, &str)]) -> MessageBundle {
        let messages = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MessageBundle::new(en(), [(namespace, messages)])
    }

    // ==================== Parsing Tests ====================

    #[test]
    fn test_parse_flat_document() {
        let messages = parse_namespace(en(), Namespace::Favorites, r#"{"title": "Favorites"}"#)
            .expect("Should parse");
        assert_eq!(messages.get("title").map(String::as_str), Some("Favorites"));
    }

    #[test]
    fn test_parse_flattens_nested_objects() {
        let raw = r#"{"hero": {"title": "Hi", "cta": {"label": "Go"}}, "top": "Top"}"#;
        let messages = parse_namespace(en(), Namespace::Home, raw).expect("Should parse");

        let keys: Vec<_> = messages.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["hero.cta.label", "hero.title", "top"]);
    }

    #[test]
    fn test_parse_empty_document() {
        let messages = parse_namespace(en(), Namespace::Home, "{}").expect("Should parse");
        assert!(messages.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_namespace(en(), Namespace::Auth, r#"{"title": "#).unwrap_err();
        assert!(matches!(err, BundleLoadError::Parse { locale: "en", namespace: Namespace::Auth, .. }));
    }

    #[test]
    fn test_parse_rejects_non_object_document() {
        let err = parse_namespace(en(), Namespace::Auth, r#"["a", "b"]"#).unwrap_err();
        assert!(matches!(err, BundleLoadError::Parse { .. }));
    }

    #[test]
    fn test_parse_rejects_non_string_leaf() {
        let err = parse_namespace(en(), Namespace::Catalog, r#"{"album": {"count": 3}}"#).unwrap_err();
        match err {
            BundleLoadError::InvalidValue { key, .. } => assert_eq!(key, "album.count"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_colliding_dotted_keys() {
        let raw = r#"{"title": {"x": "nested"}, "title.x": "flat"}"#;
        let err = parse_namespace(en(), Namespace::Favorites, raw).unwrap_err();
        match err {
            BundleLoadError::DuplicateKey { locale, namespace, key } => {
                assert_eq!(locale, "en");
                assert_eq!(namespace, Namespace::Favorites);
                assert_eq!(key, "title.x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_collision_in_either_order() {
        let raw = r#"{"hero.cta": "flat", "hero": {"cta": "nested"}}"#;
        let err = parse_namespace(en(), Namespace::Home, raw).unwrap_err();
        assert!(matches!(err, BundleLoadError::DuplicateKey { .. }));
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_get_typed_key() {
        let bundle = bundle_with(Namespace::Favorites, &[("title", "Your favorites")]);
        assert_eq!(bundle.get(keys::favorites::TITLE), Some("Your favorites"));
    }

    #[test]
    fn test_text_falls_back_to_key() {
        let bundle = bundle_with(Namespace::Favorites, &[]);
        assert_eq!(bundle.get(keys::favorites::EMPTY), None);
        assert_eq!(bundle.text(keys::favorites::EMPTY), "empty");
    }

    #[test]
    fn test_lookup_wrong_namespace() {
        let bundle = bundle_with(Namespace::Favorites, &[("title", "Your favorites")]);
        assert_eq!(bundle.lookup(Namespace::Catalog, "title"), None);
    }

    #[test]
    fn test_format_substitutes_placeholders() {
        let bundle = bundle_with(
            Namespace::Auth,
            &[("emailCheck.taken", "An account with {email} already exists.")],
        );
        let message = bundle.format(keys::auth::EMAIL_TAKEN, &[("email", "taken@example.com")]);
        assert_eq!(message, "An account with taken@example.com already exists.");
    }

    #[test]
    fn test_format_does_not_expand_argument_values() {
        let bundle = bundle_with(
            Namespace::Auth,
            &[("emailCheck.taken", "An account with {email} already exists.")],
        );
        let message = bundle.format(
            keys::auth::EMAIL_TAKEN,
            &[("email", "{year}@x.com"), ("year", "2026")],
        );
        assert_eq!(message, "An account with {year}@x.com already exists.");
    }

    #[test]
    fn test_format_repeated_placeholder() {
        let bundle = bundle_with(Namespace::Favorites, &[("count", "{count} of {count}")]);
        let message = bundle.format(keys::favorites::COUNT, &[("count", "3")]);
        assert_eq!(message, "3 of 3");
    }

    #[test]
    fn test_format_leaves_unknown_placeholders() {
        let bundle = bundle_with(Namespace::Favorites, &[("count", "{count} saved items")]);
        let message = bundle.format(keys::favorites::COUNT, &[("other", "1")]);
        assert_eq!(message, "{count} saved items");
    }

    #[test]
    fn test_len_and_keys() {
        let bundle = bundle_with(Namespace::Favorites, &[("title", "a"), ("remove", "b")]);
        assert_eq!(bundle.len(), 2);
        assert!(!bundle.is_empty());
        assert_eq!(
            bundle.keys(Namespace::Favorites).into_iter().collect::<Vec<_>>(),
            vec!["remove", "title"]
        );
        assert!(bundle.keys(Namespace::Home).is_empty());
    }

    #[test]
    fn test_serializes_namespaces_by_name() {
        let bundle = bundle_with(Namespace::Favorites, &[("title", "a")]);
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["namespaces"]["favorites"]["title"], "a");
    }
}
