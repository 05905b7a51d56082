//! Advisor: answers one message at a time.
//!
//! The advisor holds no per-message state: every call to
//! [`Advisor::handle_message`] classifies the text, reads the knowledge base
//! or awaits exactly one catalog lookup, and renders a reply. Catalog
//! failures are logged and answered as "no results"; nothing here fails.

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{debug, info, warn};

use glowtech_config::{AppConfig, UnknownCombinationPolicy};

use crate::catalog::{self, Product, ProductSearch, SearchError, SearchField};
use crate::classifier::{QueryClassification, QueryClassifier, Vocabulary};
use crate::knowledge::{Combination, CombinationKey, KnowledgeBase, KnowledgeError};

/// Reply for messages the advisor cannot interpret.
pub const UNCLASSIFIED_REPLY: &str = "Sorry, I couldn't understand your query.";

/// Reply for product queries with no results.
pub const NO_PRODUCTS_REPLY: &str = "No matching products found.";

/// Errors from building an advisor.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("catalog error: {0}")]
    Search(#[from] SearchError),
}

/// Classifies messages and renders replies.
pub struct Advisor {
    classifier: QueryClassifier,
    knowledge: Arc<KnowledgeBase>,
    search: Box<dyn ProductSearch>,
    unknown_combination: UnknownCombinationPolicy,
    max_results: usize,
}

impl Advisor {
    /// Create an advisor with the default reply policy.
    pub fn new(
        classifier: QueryClassifier,
        knowledge: Arc<KnowledgeBase>,
        search: Box<dyn ProductSearch>,
    ) -> Self {
        Self {
            classifier,
            knowledge,
            search,
            unknown_combination: UnknownCombinationPolicy::default(),
            max_results: usize::MAX,
        }
    }

    /// Build an advisor from config: vocabulary, knowledge source, catalog
    /// backend, and reply policy.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AdvisorError> {
        let knowledge = KnowledgeBase::from_config(&config.knowledge).await?;
        let search = catalog::create_search(&config.catalog, config.resolver.max_results)?;
        let classifier = QueryClassifier::new(Vocabulary::from_config(&config.vocabulary));

        info!(
            catalog = search.name(),
            ingredients = classifier.vocabulary().ingredients().len(),
            brands = classifier.vocabulary().brands().len(),
            "Advisor ready"
        );

        Ok(Self::new(classifier, knowledge, search)
            .with_unknown_combination(config.resolver.unknown_combination)
            .with_max_results(config.resolver.max_results))
    }

    /// Set the reply for compatibility questions with no known combination.
    pub fn with_unknown_combination(mut self, policy: UnknownCombinationPolicy) -> Self {
        self.unknown_combination = policy;
        self
    }

    /// Cap the number of products listed in one reply.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn classifier(&self) -> &QueryClassifier {
        &self.classifier
    }

    /// Classify a message without answering it.
    pub fn classify(&self, message: &str) -> QueryClassification {
        self.classifier.classify(message)
    }

    /// Answer a raw user message.
    pub async fn handle_message(&self, message: &str) -> String {
        let classification = self.classifier.classify(message);
        self.respond(&classification).await
    }

    /// Render the reply for an already classified message.
    pub async fn respond(&self, classification: &QueryClassification) -> String {
        match classification {
            QueryClassification::Compatibility { key, .. } => self.verdict(key),
            QueryClassification::Product { ingredient, brand } => {
                self.products(ingredient.as_deref(), brand.as_deref()).await
            }
            QueryClassification::Unclassified => UNCLASSIFIED_REPLY.to_string(),
        }
    }

    fn verdict(&self, key: &CombinationKey) -> String {
        if let Some(combination) = self.knowledge.combination(key.as_str()) {
            return render_verdict(key, combination);
        }
        warn!(combination = %key, "No knowledge for combination");
        match self.unknown_combination {
            UnknownCombinationPolicy::Unclassified => UNCLASSIFIED_REPLY.to_string(),
            UnknownCombinationPolicy::Acknowledge => format!(
                "I don't have compatibility information for {} yet.",
                key.as_str().to_uppercase()
            ),
        }
    }

    async fn products(&self, ingredient: Option<&str>, brand: Option<&str>) -> String {
        // Ingredient wins when both are present.
        let (field, query) = match (ingredient, brand) {
            (Some(ingredient), _) => (SearchField::Ingredient, ingredient),
            (None, Some(brand)) => (SearchField::Brand, brand),
            (None, None) => return UNCLASSIFIED_REPLY.to_string(),
        };

        let products = match self.search.search(field, query).await {
            Ok(products) => products,
            Err(e) => {
                warn!(catalog = self.search.name(), query, error = %e, "Product search failed");
                Vec::new()
            }
        };
        debug!(query, found = products.len(), "Product search complete");
        render_products(&products, self.max_results)
    }
}

/// Verdict block for a known combination.
pub fn render_verdict(key: &CombinationKey, combination: &Combination) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🧪 Compatibility: {}\n", key.as_str().to_uppercase());
    let verdict = if combination.compatible {
        "✅ Compatible"
    } else {
        "❌ Not Recommended"
    };
    let _ = writeln!(out, "{verdict}\n");
    let _ = writeln!(out, "📖 Explanation: {}", combination.explanation);
    if !combination.how_to_use.is_empty() {
        let _ = writeln!(out, "💡 How to use: {}", combination.how_to_use);
    }
    out
}

/// Numbered `"<brand> - <name>"` lines in catalog order.
pub fn render_products(products: &[Product], max_results: usize) -> String {
    if products.is_empty() {
        return NO_PRODUCTS_REPLY.to_string();
    }
    products
        .iter()
        .take(max_results)
        .enumerate()
        .map(|(i, p)| format!("{}. {} - {}", i + 1, p.brand, p.name))
        .collect::<Vec<_>>()
        .join("\n")
}
