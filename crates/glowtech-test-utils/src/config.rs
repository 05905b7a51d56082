//! Configuration builders for tests.
//!
//! Use [`TestConfigBuilder`] to create customised [`AppConfig`] values without
//! repeating boilerplate across crate boundaries.

use std::path::Path;

use glowtech_config::{AppConfig, CatalogBackend, ProductEntryConfig, UnknownCombinationPolicy};

/// Fluent builder for [`AppConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .add_brand("skintific")
///     .unknown_combination(UnknownCombinationPolicy::Acknowledge)
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    /// Append an ingredient after the defaults.
    pub fn add_ingredient(mut self, ingredient: &str) -> Self {
        self.config.vocabulary.ingredients.push(ingredient.to_string());
        self
    }

    /// Append a brand after the defaults.
    pub fn add_brand(mut self, brand: &str) -> Self {
        self.config.vocabulary.brands.push(brand.to_string());
        self
    }

    /// Replace the trigger phrases.
    pub fn triggers(mut self, triggers: &[&str]) -> Self {
        self.config.vocabulary.triggers = triggers.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn knowledge_path(mut self, path: &Path) -> Self {
        self.config.knowledge.path = Some(path.to_path_buf());
        self
    }

    pub fn unknown_combination(mut self, policy: UnknownCombinationPolicy) -> Self {
        self.config.resolver.unknown_combination = policy;
        self
    }

    pub fn max_results(mut self, n: usize) -> Self {
        self.config.resolver.max_results = n;
        self
    }

    pub fn catalog_backend(mut self, backend: CatalogBackend) -> Self {
        self.config.catalog.backend = backend;
        self
    }

    /// Add an in-memory catalog product.
    pub fn product(mut self, brand: &str, name: &str, ingredients: &[&str]) -> Self {
        self.config.catalog.products.push(ProductEntryConfig {
            id: String::new(),
            brand: brand.to_string(),
            name: name.to_string(),
            price: None,
            url: None,
            product_type: None,
            description: String::new(),
            ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
        });
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
