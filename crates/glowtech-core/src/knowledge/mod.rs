//! Skincare knowledge base: ingredient profiles and known combinations.
//!
//! The knowledge base is read-only once built. The built-in data is shared
//! process-wide through [`KnowledgeBase::builtin`]; operators can author a
//! replacement as TOML and load it with [`KnowledgeBase::load`].
//!
//! ## TOML Example
//!
//! ```toml
//! [ingredients.niacinamide]
//! benefits = ["Controls oil production"]
//! suitable_for = "All skin types"
//! concentration = "5-10%"
//! when_to_use = "Morning or evening"
//!
//! [ingredients.niacinamide.compatibility]
//! good_with = ["retinol"]
//! avoid_with = []
//! notes = ""
//!
//! [combinations."niacinamide + retinol"]
//! compatible = true
//! explanation = "Niacinamide can help reduce retinol irritation."
//! how_to_use = "Use retinol at night."
//! benefits = "Anti-aging with less irritation"
//! ```

mod builtin;
mod key;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use tracing::info;

use glowtech_config::KnowledgeConfig;

pub use key::CombinationKey;

/// Errors from loading or validating knowledge data.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("failed to read knowledge file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse knowledge TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("ingredient name {0:?} must be lowercase, trimmed, and non-empty")]
    NonCanonicalIngredient(String),

    #[error("ingredient {ingredient:?} lists {other:?} in both good_with and avoid_with")]
    ConflictingProfile { ingredient: String, other: String },

    #[error("combination key {found:?} is not canonical, expected {expected:?}")]
    NonCanonicalKey { found: String, expected: String },

    #[error("combination {0:?} must name at least two ingredients")]
    TooFewMembers(String),

    #[error("combination {key:?} names unknown ingredient {ingredient:?}")]
    UnknownMember { key: String, ingredient: String },
}

/// Profile of a single skincare ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// What the ingredient does for the skin.
    pub benefits: Vec<String>,
    /// Skin types it suits.
    pub suitable_for: String,
    /// Effective concentration range.
    pub concentration: String,
    /// Working pH range, when it matters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph_range: Option<String>,
    /// Recommended time of use.
    pub when_to_use: String,
    /// Which other ingredients it pairs with.
    pub compatibility: CompatibilityProfile,
}

/// Pairing guidance for an ingredient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityProfile {
    #[serde(default)]
    pub good_with: BTreeSet<String>,
    #[serde(default)]
    pub avoid_with: BTreeSet<String>,
    #[serde(default)]
    pub notes: String,
}

/// Compatibility verdict for a set of ingredients used together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub compatible: bool,
    pub explanation: String,
    pub how_to_use: String,
    pub benefits: String,
}

/// On-disk authoring format.
#[derive(Debug, Default, Deserialize)]
struct KnowledgeDocument {
    #[serde(default)]
    ingredients: BTreeMap<String, Ingredient>,
    #[serde(default)]
    combinations: BTreeMap<String, Combination>,
}

/// Read-only store of ingredients and combinations.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    ingredients: BTreeMap<String, Ingredient>,
    combinations: BTreeMap<CombinationKey, Combination>,
}

impl KnowledgeBase {
    /// Build a knowledge base and check every invariant.
    ///
    /// Combination keys must already be in canonical form.
    pub fn new<I, C>(ingredients: I, combinations: C) -> Result<Self, KnowledgeError>
    where
        I: IntoIterator<Item = (String, Ingredient)>,
        C: IntoIterator<Item = (String, Combination)>,
    {
        let combinations = combinations
            .into_iter()
            .map(|(raw, combination)| {
                let key = CombinationKey::parse(&raw);
                if key.as_str() != raw {
                    return Err(KnowledgeError::NonCanonicalKey {
                        found: raw,
                        expected: key.to_string(),
                    });
                }
                Ok((key, combination))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        let kb = Self {
            ingredients: ingredients.into_iter().collect(),
            combinations,
        };
        kb.validate()?;
        Ok(kb)
    }

    /// The built-in reference data, initialised on first use.
    pub fn builtin() -> Arc<KnowledgeBase> {
        static BUILTIN: OnceLock<Arc<KnowledgeBase>> = OnceLock::new();
        Arc::clone(BUILTIN.get_or_init(|| Arc::new(builtin::reference_data())))
    }

    /// Parse knowledge data from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, KnowledgeError> {
        let doc: KnowledgeDocument = toml::from_str(s)?;
        Self::new(doc.ingredients, doc.combinations)
    }

    /// Load knowledge data from a TOML file using async I/O.
    pub async fn load(path: &Path) -> Result<Self, KnowledgeError> {
        let content = tokio::fs::read_to_string(path).await?;
        let kb = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            ingredients = kb.ingredients.len(),
            combinations = kb.combinations.len(),
            "Loaded knowledge base"
        );
        Ok(kb)
    }

    /// The configured knowledge file, or the built-in data when none is set.
    pub async fn from_config(config: &KnowledgeConfig) -> Result<Arc<Self>, KnowledgeError> {
        match &config.path {
            Some(path) => Ok(Arc::new(Self::load(path).await?)),
            None => Ok(Self::builtin()),
        }
    }

    /// Check the data invariants.
    pub fn validate(&self) -> Result<(), KnowledgeError> {
        for (name, ingredient) in &self.ingredients {
            if !is_canonical(name) {
                return Err(KnowledgeError::NonCanonicalIngredient(name.clone()));
            }
            let profile = &ingredient.compatibility;
            if let Some(other) = profile
                .good_with
                .iter()
                .chain(&profile.avoid_with)
                .find(|other| !is_canonical(other))
            {
                return Err(KnowledgeError::NonCanonicalIngredient(other.clone()));
            }
            if let Some(other) = profile.good_with.intersection(&profile.avoid_with).next() {
                return Err(KnowledgeError::ConflictingProfile {
                    ingredient: name.clone(),
                    other: other.clone(),
                });
            }
        }

        for key in self.combinations.keys() {
            if key.len() < 2 {
                return Err(KnowledgeError::TooFewMembers(key.to_string()));
            }
            if let Some(missing) = key.members().find(|m| !self.ingredients.contains_key(*m)) {
                return Err(KnowledgeError::UnknownMember {
                    key: key.to_string(),
                    ingredient: missing.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Look up an ingredient by its canonical lowercase name.
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.get(name)
    }

    /// Look up a combination by its canonical key string.
    pub fn combination(&self, key: &str) -> Option<&Combination> {
        self.combinations.get(key)
    }

    /// Canonicalize the given names and look up their combination.
    pub fn combination_for<I, S>(&self, names: I) -> Option<&Combination>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = CombinationKey::from_names(names);
        self.combinations.get(&key)
    }

    /// Ingredients sorted by name.
    pub fn ingredients(&self) -> impl Iterator<Item = (&str, &Ingredient)> {
        self.ingredients.iter().map(|(name, i)| (name.as_str(), i))
    }

    /// Combinations sorted by key.
    pub fn combinations(&self) -> impl Iterator<Item = (&CombinationKey, &Combination)> {
        self.combinations.iter()
    }

    /// Whether the knowledge base holds no data.
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.combinations.is_empty()
    }
}

fn is_canonical(name: &str) -> bool {
    !name.is_empty() && name == name.trim().to_lowercase()
}
