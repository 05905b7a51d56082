//! Query classifier: decides what a message is asking for.
//!
//! Classification is deterministic, case-insensitive substring matching over
//! three fixed vocabularies (ingredients, brands, compatibility triggers).
//! There is no scoring: the first rule that applies wins.
//!
//! 1. A message mentioning a trigger phrase and two or more known
//!    ingredients is a [`QueryClassification::Compatibility`] question.
//! 2. Otherwise, a message mentioning a known ingredient or brand is a
//!    [`QueryClassification::Product`] query. The first match in vocabulary
//!    order wins for each.
//! 3. Anything else is [`QueryClassification::Unclassified`].

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use glowtech_config::VocabularyConfig;

use crate::knowledge::CombinationKey;

/// Keyword vocabularies injected into the classifier.
///
/// Entries are stored lowercased and de-duplicated, in declaration order.
/// Ingredient and brand names are also trimmed; trigger phrases keep their
/// surrounding spaces, so `" mix "` does not match "remix".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    ingredients: Vec<String>,
    brands: Vec<String>,
    triggers: Vec<String>,
}

fn normalize(entries: impl IntoIterator<Item = impl AsRef<str>>, trim: bool) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.as_ref();
        let entry = if trim { entry.trim() } else { entry }.to_lowercase();
        if !entry.trim().is_empty() && !out.contains(&entry) {
            out.push(entry);
        }
    }
    out
}

impl Vocabulary {
    /// Build a vocabulary from ingredient, brand, and trigger lists.
    pub fn new<S: AsRef<str>>(ingredients: &[S], brands: &[S], triggers: &[S]) -> Self {
        Self {
            ingredients: normalize(ingredients, true),
            brands: normalize(brands, true),
            triggers: normalize(triggers, false),
        }
    }

    /// Build a vocabulary from the `[vocabulary]` config section.
    pub fn from_config(config: &VocabularyConfig) -> Self {
        Self::new(
            config.ingredients.as_slice(),
            config.brands.as_slice(),
            config.triggers.as_slice(),
        )
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::from_config(&VocabularyConfig::default())
    }
}

/// The interpreted intent of one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum QueryClassification {
    /// "Can I use X with Y?": two or more known ingredients plus a trigger.
    Compatibility {
        ingredients: BTreeSet<String>,
        key: CombinationKey,
    },
    /// A question about products for an ingredient and/or a brand.
    /// At least one of the two is always present.
    Product {
        ingredient: Option<String>,
        brand: Option<String>,
    },
    /// Nothing recognisable.
    Unclassified,
}

impl QueryClassification {
    /// Short label for logs.
    pub fn intent(&self) -> &'static str {
        match self {
            Self::Compatibility { .. } => "compatibility",
            Self::Product { .. } => "product",
            Self::Unclassified => "unclassified",
        }
    }
}

/// Classifies raw messages against a [`Vocabulary`].
#[derive(Debug, Clone, Default)]
pub struct QueryClassifier {
    vocabulary: Vocabulary,
}

impl QueryClassifier {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Classify a raw message.
    pub fn classify(&self, message: &str) -> QueryClassification {
        let text = message.to_lowercase();

        let classification = self
            .compatibility(&text)
            .or_else(|| self.product(&text))
            .unwrap_or(QueryClassification::Unclassified);

        debug!(intent = classification.intent(), "Classified message");
        classification
    }

    /// Whether the lowercased text contains a compatibility trigger phrase.
    pub fn has_compatibility_trigger(&self, text: &str) -> bool {
        self.vocabulary.triggers.iter().any(|t| text.contains(t.as_str()))
    }

    fn compatibility(&self, text: &str) -> Option<QueryClassification> {
        if !self.has_compatibility_trigger(text) {
            return None;
        }
        let found: BTreeSet<String> = self
            .vocabulary
            .ingredients
            .iter()
            .filter(|i| text.contains(i.as_str()))
            .cloned()
            .collect();
        if found.len() < 2 {
            return None;
        }
        let key = CombinationKey::from_names(&found);
        Some(QueryClassification::Compatibility {
            ingredients: found,
            key,
        })
    }

    fn product(&self, text: &str) -> Option<QueryClassification> {
        let first = |vocab: &[String]| vocab.iter().find(|v| text.contains(v.as_str())).cloned();
        let ingredient = first(&self.vocabulary.ingredients);
        let brand = first(&self.vocabulary.brands);
        if ingredient.is_none() && brand.is_none() {
            return None;
        }
        Some(QueryClassification::Product { ingredient, brand })
    }
}
