//! Navigable views and their URL paths.

/// Path of the catalog view.
pub const CATALOG_PATH: &str = "/promocionales";

const PRODUCT_SEGMENT: &str = "product";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Catalog,
    /// Detail view for the product with this parent SKU.
    Product(String),
}

impl Route {
    /// Matches `path` against the known views.
    ///
    /// Returns `None` for anything else; callers redirect those to the
    /// catalog (see [`Route::resolve`]). A trailing slash and a query string
    /// are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let rest = path.trim_end_matches('/').strip_prefix(CATALOG_PATH)?;

        if rest.is_empty() {
            return Some(Self::Catalog);
        }

        let mut segments = rest.strip_prefix('/')?.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(PRODUCT_SEGMENT), Some(id), None) if !id.is_empty() => {
                Some(Self::Product(id.to_string()))
            }
            _ => None,
        }
    }

    /// Like [`Route::parse`] but unknown paths land on the catalog.
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        Self::parse(path).unwrap_or(Self::Catalog)
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Catalog => CATALOG_PATH.to_string(),
            Self::Product(id) => format!("{CATALOG_PATH}/{PRODUCT_SEGMENT}/{id}"),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}
