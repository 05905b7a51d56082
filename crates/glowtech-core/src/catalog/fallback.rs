//! Primary catalog with a backup.

use tracing::{debug, warn};

use crate::BoxFuture;

use super::{Product, ProductSearch, SearchError, SearchField};

/// Uses `fallback` when `primary` fails or returns fewer than
/// `min_results` products.
pub struct FallbackCatalog {
    primary: Box<dyn ProductSearch>,
    fallback: Box<dyn ProductSearch>,
    min_results: usize,
}

impl FallbackCatalog {
    pub fn new(primary: Box<dyn ProductSearch>, fallback: Box<dyn ProductSearch>) -> Self {
        Self {
            primary,
            fallback,
            min_results: 1,
        }
    }

    pub fn with_min_results(mut self, min_results: usize) -> Self {
        self.min_results = min_results;
        self
    }

    async fn lookup(&self, field: SearchField, query: &str) -> Result<Vec<Product>, SearchError> {
        match self.primary.search(field, query).await {
            Ok(products) if products.len() >= self.min_results => return Ok(products),
            Ok(products) => debug!(
                catalog = self.primary.name(),
                found = products.len(),
                min = self.min_results,
                "Too few results, using fallback catalog"
            ),
            Err(e) => warn!(
                catalog = self.primary.name(),
                error = %e,
                "Catalog lookup failed, using fallback catalog"
            ),
        }
        self.fallback.search(field, query).await
    }
}

impl ProductSearch for FallbackCatalog {
    fn name(&self) -> &str {
        "fallback"
    }

    fn search_by_ingredient<'a>(
        &'a self,
        ingredient: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Product>, SearchError>> {
        Box::pin(self.lookup(SearchField::Ingredient, ingredient))
    }

    fn search_by_brand<'a>(
        &'a self,
        brand: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Product>, SearchError>> {
        Box::pin(self.lookup(SearchField::Brand, brand))
    }
}
