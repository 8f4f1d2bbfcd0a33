use serde::Serialize;
use std::fmt;

/// A named group of related message keys, one per feature area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Navigation, footer and shared labels
    Common,
    /// Landing page
    Home,
    /// Catalog browsing and search
    Catalog,
    /// Saved tracks and albums
    Favorites,
    /// Login and sign-up
    Auth,
}

impl Namespace {
    /// Every namespace, in document order.
    pub const ALL: [Namespace; 5] = [
        Namespace::Common,
        Namespace::Home,
        Namespace::Catalog,
        Namespace::Favorites,
        Namespace::Auth,
    ];

    /// Document name of the namespace (e.g., "catalog").
    pub const fn as_str(self) -> &'static str {
        match self {
            Namespace::Common => "common",
            Namespace::Home => "home",
            Namespace::Catalog => "catalog",
            Namespace::Favorites => "favorites",
            Namespace::Auth => "auth",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
