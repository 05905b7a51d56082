//! In-memory product catalog.

use glowtech_config::CatalogConfig;

use crate::BoxFuture;

use super::{Product, ProductSearch, SearchError};

/// Catalog backed by a fixed product list, searched in declaration order.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in sample catalog.
    pub fn builtin() -> Self {
        Self::new(sample_products())
    }

    /// Built-in products followed by any `[[catalog.products]]` entries.
    pub fn from_config(config: &CatalogConfig) -> Self {
        let mut catalog = Self::builtin();
        catalog
            .products
            .extend(config.products.iter().map(Product::from));
        catalog
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    fn matching(&self, pred: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.products.iter().filter(|p| pred(p)).cloned().collect()
    }

    /// Products listing the ingredient, or naming it in name or description.
    pub fn find_by_ingredient(&self, ingredient: &str) -> Vec<Product> {
        let needle = ingredient.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.matching(|p| {
            p.ingredients.iter().any(|i| i.contains(&needle))
                || p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
    }

    /// Products whose brand contains the query.
    pub fn find_by_brand(&self, brand: &str) -> Vec<Product> {
        let needle = brand.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.matching(|p| p.brand.to_lowercase().contains(&needle))
    }
}

impl ProductSearch for StaticCatalog {
    fn name(&self) -> &str {
        "static"
    }

    fn search_by_ingredient<'a>(
        &'a self,
        ingredient: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Product>, SearchError>> {
        Box::pin(async move { Ok(self.find_by_ingredient(ingredient)) })
    }

    fn search_by_brand<'a>(
        &'a self,
        brand: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Product>, SearchError>> {
        Box::pin(async move { Ok(self.find_by_brand(brand)) })
    }
}

fn sample_products() -> Vec<Product> {
    vec![
        Product::new("CeraVe", "Foaming Facial Cleanser")
            .with_type("cleanser")
            .with_price("Rp 192.000")
            .with_description("Gel cleanser for normal to oily skin")
            .with_ingredients(&["ceramides", "niacinamide", "hyaluronic acid"]),
        Product::new("CeraVe", "PM Facial Moisturizing Lotion")
            .with_type("moisturizer")
            .with_price("Rp 256.000")
            .with_description("Lightweight night moisturizer")
            .with_ingredients(&["niacinamide", "ceramides", "hyaluronic acid"]),
        Product::new("CeraVe", "Resurfacing Retinol Serum")
            .with_type("serum")
            .with_price("Rp 320.000")
            .with_description("Encapsulated retinol for post-acne marks")
            .with_ingredients(&["retinol", "niacinamide", "ceramides"]),
        Product::new("The Ordinary", "Niacinamide 10% + Zinc 1%")
            .with_type("serum")
            .with_price("Rp 112.000")
            .with_description("High-strength vitamin and mineral blemish formula")
            .with_ingredients(&["niacinamide", "zinc pca"]),
        Product::new("The Ordinary", "Retinol 0.5% in Squalane")
            .with_type("serum")
            .with_price("Rp 128.000")
            .with_description("Water-free retinol solution")
            .with_ingredients(&["retinol", "squalane"]),
        Product::new("The Ordinary", "Ascorbic Acid 8% + Alpha Arbutin 2%")
            .with_type("serum")
            .with_price("Rp 160.000")
            .with_description("Vitamin C brightening serum")
            .with_ingredients(&["vitamin c", "alpha arbutin"]),
        Product::new("Somethinc", "Niacinamide + Moisture Beet Serum")
            .with_type("serum")
            .with_price("Rp 115.000")
            .with_description("Brightening serum with 10% niacinamide")
            .with_ingredients(&["niacinamide", "beet extract"]),
        Product::new("Somethinc", "Level 1% Retinol")
            .with_type("serum")
            .with_price("Rp 149.000")
            .with_description("Retinol serum for beginners")
            .with_ingredients(&["retinol", "squalane"]),
        Product::new("Somethinc", "Supple Power Hyaluronic9 + Onsen Essence")
            .with_type("essence")
            .with_price("Rp 109.000")
            .with_description("Hydrating essence")
            .with_ingredients(&["hyaluronic acid"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowtech_config::ProductEntryConfig;

    use crate::catalog::SearchField;

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_find_by_brand_substring() {
        let catalog = StaticCatalog::builtin();
        let found = catalog.find_by_brand("ordinary");
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|p| p.brand == "The Ordinary"));
    }

    #[test]
    fn test_find_by_ingredient_keeps_order() {
        let catalog = StaticCatalog::builtin();
        let found = catalog.find_by_ingredient("retinol");
        assert_eq!(
            names(&found),
            vec![
                "Resurfacing Retinol Serum",
                "Retinol 0.5% in Squalane",
                "Level 1% Retinol"
            ]
        );
    }

    #[test]
    fn test_find_by_ingredient_uses_ingredient_list() {
        let catalog = StaticCatalog::builtin();
        let found = catalog.find_by_ingredient("Vitamin C");
        assert_eq!(names(&found), vec!["Ascorbic Acid 8% + Alpha Arbutin 2%"]);
    }

    #[test]
    fn test_no_match() {
        let catalog = StaticCatalog::builtin();
        assert!(catalog.find_by_brand("glossier").is_empty());
        assert!(catalog.find_by_ingredient("").is_empty());
    }

    #[test]
    fn test_from_config_appends_products() {
        let config = CatalogConfig {
            products: vec![ProductEntryConfig {
                id: "sk-1".to_string(),
                brand: "Skintific".to_string(),
                name: "5X Ceramide Barrier Moisturize Gel".to_string(),
                price: None,
                url: None,
                product_type: None,
                description: String::new(),
                ingredients: vec!["ceramides".to_string()],
            }],
            ..CatalogConfig::default()
        };
        let catalog = StaticCatalog::from_config(&config);
        assert_eq!(catalog.products().len(), StaticCatalog::builtin().products().len() + 1);
        let found = catalog.find_by_brand("skintific");
        assert_eq!(found[0].id, "sk-1");
    }

    #[tokio::test]
    async fn test_trait_dispatch() {
        let catalog = StaticCatalog::builtin();
        let by_brand = catalog.search_by_brand("somethinc").await.unwrap();
        assert_eq!(by_brand.len(), 3);
        let by_ingredient = catalog
            .search(SearchField::Ingredient, "hyaluronic acid")
            .await
            .unwrap();
        assert_eq!(by_ingredient.len(), 3);
    }
}
