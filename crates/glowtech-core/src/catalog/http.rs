//! Remote product catalog.
//!
//! Implements [`ProductSearch`] against a makeup-api compatible endpoint: a
//! single JSON array of products, filtered locally to skincare types.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::BoxFuture;

use super::{Product, ProductSearch, SearchError, SearchField};

/// Product types kept from the remote catalog (substring match).
const SKINCARE_TYPES: &[&str] = &[
    "cleanser",
    "serum",
    "moisturizer",
    "treatment",
    "mask",
    "toner",
    "essence",
];

/// USD → IDR rate used for display prices.
const IDR_PER_USD: f64 = 16_000.0;

const SHOPEE_SEARCH_URL: &str = "https://shopee.co.id/search";

/// HTTP-backed catalog.
pub struct HttpCatalog {
    client: Client,
    base_url: String,
    max_results: usize,
}

impl HttpCatalog {
    /// Create a catalog for the given endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            max_results: 12,
        }
    }

    /// Cap the number of products returned per lookup.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Apply a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, SearchError> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::Setup(e.to_string()))?;
        Ok(self)
    }

    async fn fetch(&self) -> Result<Vec<RemoteProduct>, SearchError> {
        debug!(url = %self.base_url, "Catalog request");

        let resp = self
            .client
            .get(&self.base_url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, message });
        }

        let body = resp.text().await.map_err(map_transport_error)?;
        parse_products(&body)
    }

    async fn lookup(&self, field: SearchField, query: &str) -> Result<Vec<Product>, SearchError> {
        let remote = self.fetch().await?;
        let products = select(remote, field, query, self.max_results);
        debug!(query, found = products.len(), "Catalog lookup complete");
        Ok(products)
    }
}

impl ProductSearch for HttpCatalog {
    fn name(&self) -> &str {
        "http"
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

fn map_transport_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::Network(e.to_string())
    }
}

// ── Wire format ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RemoteProduct {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    price: Value,
    #[serde(default)]
    product_type: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

fn parse_products(body: &str) -> Result<Vec<RemoteProduct>, SearchError> {
    serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))
}

fn is_skincare(product: &RemoteProduct) -> bool {
    product.product_type.as_deref().is_some_and(|t| {
        let t = t.to_lowercase();
        SKINCARE_TYPES.iter().any(|s| t.contains(s))
    })
}

fn matches(product: &RemoteProduct, field: SearchField, needle: &str) -> bool {
    let contains = |s: &Option<String>| {
        s.as_deref()
            .is_some_and(|s| s.to_lowercase().contains(needle))
    };
    contains(&product.brand)
        || contains(&product.name)
        || (field == SearchField::Ingredient && contains(&product.description))
}

/// Filter, cap, and convert remote products, preserving their order.
fn select(
    remote: Vec<RemoteProduct>,
    field: SearchField,
    query: &str,
    max_results: usize,
) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    remote
        .into_iter()
        .filter(|p| is_skincare(p) && matches(p, field, &needle))
        .take(max_results)
        .map(into_product)
        .collect()
}

fn into_product(remote: RemoteProduct) -> Product {
    let brand = remote.brand.unwrap_or_default().trim().to_string();
    let name = remote.name.unwrap_or_default().trim().to_string();
    let description = remote.description.unwrap_or_else(|| {
        format!(
            "{brand} {}",
            remote.product_type.as_deref().unwrap_or_default()
        )
    });
    let price_text = match &remote.price {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };

    Product {
        id: match remote.id {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        },
        price: Some(format_price(price_text.as_deref())),
        url: shopee_url(&brand, &name),
        product_type: remote.product_type,
        description: description.trim().to_string(),
        ingredients: Vec::new(),
        brand,
        name,
    }
}

/// Format a USD price string as Indonesian Rupiah, e.g. `"10.0"` → `"Rp 160.000"`.
pub fn format_price(usd: Option<&str>) -> String {
    let parsed = usd.and_then(|s| s.trim().parse::<f64>().ok());
    match parsed {
        Some(value) if value.is_finite() => {
            let rupiah = (value * IDR_PER_USD).round() as i64;
            let sign = if rupiah < 0 { "-" } else { "" };
            format!("Rp {sign}{}", group_thousands(rupiah.unsigned_abs()))
        }
        _ => "Rp - ".to_string(),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Shopee search link for a product.
pub fn shopee_url(brand: &str, name: &str) -> Option<String> {
    let keyword = format!("{brand} {name} skincare")
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    Url::parse_with_params(SHOPEE_SEARCH_URL, &[("keyword", keyword)])
        .ok()
        .map(String::from)
}
