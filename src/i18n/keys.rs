//! Typed message key schema.
//!
//! Mirrors the default locale's namespace documents. Presentation code names
//! messages only through these constants, so a key that is not part of the
//! schema does not compile. [`crate::i18n::SchemaValidator`] checks at startup
//! that every constant exists in the default locale.

use crate::i18n::Namespace;

/// A (namespace, dotted key) pair from the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKey {
    namespace: Namespace,
    key: &'static str,
}

impl MessageKey {
    pub const fn new(namespace: Namespace, key: &'static str) -> Self {
        Self { namespace, key }
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn key(&self) -> &'static str {
        self.key
    }
}

macro_rules! message_keys {
    ($( $module:ident ($ns:ident) { $( $name:ident = $key:literal, )* } )*) => {
        $(
            pub mod $module {
                use super::{MessageKey, Namespace};

                $( pub const $name: MessageKey = MessageKey::new(Namespace::$ns, $key); )*

                /// Every key of this namespace.
                pub const ALL: &[MessageKey] = &[$( $name ),*];
            }
        )*

        /// Every key of the schema, all namespaces.
        pub fn all() -> impl Iterator<Item = MessageKey> {
            [$( $module::ALL ),*].into_iter().flatten().copied()
        }
    };
}

message_keys! {
    common (Common) {
        NAV_HOME = "nav.home",
        NAV_CATALOG = "nav.catalog",
        NAV_FAVORITES = "nav.favorites",
        NAV_LOGIN = "nav.login",
        NAV_SIGNUP = "nav.signup",
        NAV_LOGOUT = "nav.logout",
        FOOTER_COPYRIGHT = "footer.copyright",
        LANGUAGE_LABEL = "language.label",
        ERROR_GENERIC = "error.generic",
    }

    home (Home) {
        HERO_TITLE = "hero.title",
        HERO_SUBTITLE = "hero.subtitle",
        HERO_CTA = "hero.cta",
        FEATURES_TITLE = "features.title",
        FEATURES_CATALOG = "features.catalog",
        FEATURES_FAVORITES = "features.favorites",
    }

    catalog (Catalog) {
        TITLE = "title",
        SEARCH_PLACEHOLDER = "search.placeholder",
        SEARCH_EMPTY = "search.empty",
        FILTER_GENRE = "filters.genre",
        FILTER_YEAR = "filters.year",
        ALBUM_TRACKS = "album.tracks",
        ALBUM_DURATION = "album.duration",
        ADD_TO_FAVORITES = "addToFavorites",
    }

    favorites (Favorites) {
        TITLE = "title",
        EMPTY = "empty",
        REMOVE = "remove",
        COUNT = "count",
    }

    auth (Auth) {
        LOGIN_TITLE = "login.title",
        LOGIN_SUBMIT = "login.submit",
        SIGNUP_TITLE = "signup.title",
        SIGNUP_SUBMIT = "signup.submit",
        FIELD_EMAIL = "fields.email",
        FIELD_PASSWORD = "fields.password",
        EMAIL_CHECKING = "emailCheck.checking",
        EMAIL_TAKEN = "emailCheck.taken",
        EMAIL_AVAILABLE = "emailCheck.available",
        EMAIL_CHECK_FAILED = "emailCheck.failed",
    }
}
