//! Product catalog collaborators, where product queries are answered.
//!
//! All catalogs implement the [`ProductSearch`] trait and are consumed as
//! `Box<dyn ProductSearch>`. Currently supported:
//!
//! - **Static**: an in-memory product list ([`StaticCatalog`])
//! - **HTTP**: a makeup-api compatible JSON endpoint ([`HttpCatalog`])
//! - **Fallback**: a primary catalog backed up by a second one
//!   ([`FallbackCatalog`])
//!
//! ```text
//! ┌─────────┐     ┌───────────────┐
//! │ Advisor │────▶│ ProductSearch │  (trait)
//! └─────────┘     └───────┬───────┘
//!          ┌──────────────┼──────────────┐
//!          ▼              ▼              ▼
//!   ┌────────────┐ ┌────────────┐ ┌──────────────┐
//!   │   Static   │ │    HTTP    │ │   Fallback   │
//!   └────────────┘ └────────────┘ └──────────────┘
//! ```

pub mod fallback;
pub mod http;
pub mod local;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use glowtech_config::{CatalogBackend, CatalogConfig, ProductEntryConfig};

use crate::BoxFuture;

pub use fallback::FallbackCatalog;
pub use http::HttpCatalog;
pub use local::StaticCatalog;

/// Errors from catalog lookups.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("catalog returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("response parse error: {0}")]
    Parse(String),

    #[error("timeout")]
    Timeout,

    #[error("catalog client setup failed: {0}")]
    Setup(String),
}

/// A product returned by a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub brand: String,
    pub name: String,
    /// Display price, already formatted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Where to buy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Key ingredients, lowercase.
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Product {
    /// Create a product with only brand and name set.
    pub fn new(brand: impl Into<String>, name: impl Into<String>) -> Self {
        let brand = brand.into();
        let name = name.into();
        Self {
            id: slug(&format!("{brand} {name}")),
            brand,
            name,
            price: None,
            url: None,
            product_type: None,
            description: String::new(),
            ingredients: Vec::new(),
        }
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_ingredients(mut self, ingredients: &[&str]) -> Self {
        self.ingredients = ingredients.iter().map(|i| i.to_lowercase()).collect();
        self
    }
}

impl From<&ProductEntryConfig> for Product {
    fn from(entry: &ProductEntryConfig) -> Self {
        let mut product = Product::new(entry.brand.trim(), entry.name.trim());
        if !entry.id.is_empty() {
            product.id = entry.id.clone();
        }
        product.price = entry.price.clone();
        product.url = entry.url.clone();
        product.product_type = entry.product_type.clone();
        product.description = entry.description.clone();
        product.ingredients = entry
            .ingredients
            .iter()
            .map(|i| i.trim().to_lowercase())
            .collect();
        product
    }
}

/// Lowercase, hyphen-separated identifier.
fn slug(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Which lookup a product query performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Ingredient,
    Brand,
}

/// Core trait for product catalogs.
///
/// Implementations must be `Send + Sync` so an [`Advisor`](crate::Advisor)
/// can be shared across tasks. Uses `BoxFuture` for object safety.
pub trait ProductSearch: Send + Sync {
    /// Catalog display name (e.g. "static", "http").
    fn name(&self) -> &str;

    /// Products containing the given ingredient.
    fn search_by_ingredient<'a>(
        &'a self,
        ingredient: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Product>, SearchError>>;

    /// Products from the given brand.
    fn search_by_brand<'a>(&'a self, brand: &'a str)
    -> BoxFuture<'a, Result<Vec<Product>, SearchError>>;

    /// Dispatch on [`SearchField`].
    fn search<'a>(
        &'a self,
        field: SearchField,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Product>, SearchError>> {
        match field {
            SearchField::Ingredient => self.search_by_ingredient(query),
            SearchField::Brand => self.search_by_brand(query),
        }
    }
}

/// Create a product catalog from config.
///
/// `max_results` caps how many products the HTTP backend keeps per lookup.
pub fn create_search(
    config: &CatalogConfig,
    max_results: usize,
) -> Result<Box<dyn ProductSearch>, SearchError> {
    let http = || {
        HttpCatalog::new(&config.base_url)
            .with_max_results(max_results)
            .with_timeout(Duration::from_secs(config.timeout_secs))
    };

    let search: Box<dyn ProductSearch> = match config.backend {
        CatalogBackend::Static => Box::new(StaticCatalog::from_config(config)),
        CatalogBackend::Http => Box::new(http()?),
        CatalogBackend::HttpWithStaticFallback => Box::new(
            FallbackCatalog::new(
                Box::new(http()?),
                Box::new(StaticCatalog::from_config(config)),
            )
            .with_min_results(config.min_results),
        ),
    };
    Ok(search)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_static_catalog() {
        let search = create_search(&CatalogConfig::default(), 12).unwrap();
        assert_eq!(search.name(), "static");
    }

    #[test]
    fn test_create_http_catalog() {
        let config = CatalogConfig {
            backend: CatalogBackend::Http,
            ..CatalogConfig::default()
        };
        let search = create_search(&config, 12).unwrap();
        assert_eq!(search.name(), "http");
    }

    #[test]
    fn test_create_fallback_catalog() {
        let config = CatalogConfig {
            backend: CatalogBackend::HttpWithStaticFallback,
            ..CatalogConfig::default()
        };
        let search = create_search(&config, 12).unwrap();
        assert_eq!(search.name(), "fallback");
    }

    #[test]
    fn test_product_from_config_entry() {
        let entry = ProductEntryConfig {
            id: String::new(),
            brand: "Skintific".to_string(),
            name: "5X Ceramide Barrier Moisturize Gel".to_string(),
            price: Some("Rp 139.000".to_string()),
            url: None,
            product_type: Some("moisturizer".to_string()),
            description: String::new(),
            ingredients: vec!["Ceramides ".to_string()],
        };
        let product = Product::from(&entry);
        assert_eq!(product.id, "skintific-5x-ceramide-barrier-moisturize-gel");
        assert_eq!(product.ingredients, vec!["ceramides"]);
        assert_eq!(product.price.as_deref(), Some("Rp 139.000"));
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("The Ordinary Niacinamide 10% + Zinc 1%"), "the-ordinary-niacinamide-10-zinc-1");
    }
}
