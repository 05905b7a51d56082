//! Scripted product catalog.
//!
//! [`ScriptedSearch`] answers every lookup with the same canned products (or
//! the same error) and records what it was asked, so tests can assert which
//! lookup the advisor performed.

use std::sync::{Arc, Mutex};

use glowtech_core::{BoxFuture, Product, ProductSearch, SearchError};

/// A lookup received by [`ScriptedSearch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCall {
    Ingredient(String),
    Brand(String),
}

/// Test double for [`ProductSearch`].
///
/// Clones share the call log, so keep a clone after boxing one into an
/// advisor.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSearch {
    products: Arc<Vec<Product>>,
    failing: bool,
    calls: Arc<Mutex<Vec<SearchCall>>>,
}

impl ScriptedSearch {
    /// Answer every lookup with `products`, in this order.
    pub fn returning(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(products),
            ..Self::default()
        }
    }

    /// Answer every lookup with no products.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fail every lookup.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Lookups received so far.
    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn answer(&self, call: SearchCall) -> Result<Vec<Product>, SearchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if self.failing {
            Err(SearchError::Network("scripted failure".to_string()))
        } else {
            Ok(self.products.as_ref().clone())
        }
    }
}

impl ProductSearch for ScriptedSearch {
    fn name(&self) -> &str {
        "scripted"
    }

    fn search_by_ingredient<'a>(
        &'a self,
        ingredient: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Product>, SearchError>> {
        let result = self.answer(SearchCall::Ingredient(ingredient.to_string()));
        Box::pin(async move { result })
    }

    fn search_by_brand<'a>(
        &'a self,
        brand: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Product>, SearchError>> {
        let result = self.answer(SearchCall::Brand(brand.to_string()));
        Box::pin(async move { result })
    }
}
