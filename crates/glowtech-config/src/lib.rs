#![deny(unsafe_code)]

//! Configuration loading and validation for the GlowTech advisor.
//!
//! Loads TOML configuration files and validates them. [`AppConfig`] is the
//! central configuration structure; every section is optional and falls back
//! to the built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Keyword vocabularies used by the query classifier.
    #[serde(default)]
    pub vocabulary: VocabularyConfig,

    /// Knowledge base source.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Response rendering policy.
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Product catalog backend.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Keyword vocabularies for intent detection.
///
/// Order matters: when several entries match, the one declared first wins
/// for product queries.
///
/// ## TOML Example
///
/// ```toml
/// [vocabulary]
/// ingredients = ["niacinamide", "vitamin c", "retinol", "salicylic acid"]
/// brands = ["cerave", "ordinary", "somethinc", "skintific"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Ingredient names recognised in messages.
    #[serde(default = "default_ingredients")]
    pub ingredients: Vec<String>,

    /// Brand names recognised in messages.
    #[serde(default = "default_brands")]
    pub brands: Vec<String>,

    /// Phrases that signal a compatibility question. Surrounding spaces are
    /// kept, so `" mix "` only matches the whole word.
    #[serde(default = "default_triggers")]
    pub triggers: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            ingredients: default_ingredients(),
            brands: default_brands(),
            triggers: default_triggers(),
        }
    }
}

/// Default ingredient vocabulary.
pub fn default_ingredients() -> Vec<String> {
    ["niacinamide", "vitamin c", "retinol"]
        .map(String::from)
        .to_vec()
}

/// Default brand vocabulary.
pub fn default_brands() -> Vec<String> {
    ["cerave", "ordinary", "somethinc"].map(String::from).to_vec()
}

/// Default compatibility trigger phrases.
pub fn default_triggers() -> Vec<String> {
    [
        "can i use",
        "together",
        "with",
        "combine",
        "mix",
        "same time",
        "compatible",
    ]
    .map(String::from)
    .to_vec()
}

/// Knowledge base source.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Optional TOML file with ingredient and combination data.
    /// The built-in data is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// What to answer when a compatibility question names a pair the
/// knowledge base has no entry for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCombinationPolicy {
    /// Answer as if the message was not understood.
    #[default]
    Unclassified,
    /// Say that the pair is not covered yet.
    Acknowledge,
}

/// Response rendering policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Behaviour for compatibility questions with no known combination.
    #[serde(default)]
    pub unknown_combination: UnknownCombinationPolicy,

    /// Maximum number of products listed in one answer.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            unknown_combination: UnknownCombinationPolicy::default(),
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    12
}

/// Which product catalog answers product queries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogBackend {
    /// In-memory catalog (built-in sample products plus configured entries).
    #[default]
    #[serde(rename = "static")]
    Static,
    /// Remote makeup-api compatible JSON endpoint.
    #[serde(rename = "http")]
    Http,
    /// Remote endpoint, falling back to the in-memory catalog on failure
    /// or thin results.
    #[serde(rename = "http+static")]
    HttpWithStaticFallback,
}

/// Product catalog configuration.
///
/// ## TOML Example
///
/// ```toml
/// [catalog]
/// backend = "http+static"
/// timeout_secs = 5
///
/// [[catalog.products]]
/// brand = "Skintific"
/// name = "5X Ceramide Barrier Moisturize Gel"
/// ingredients = ["ceramides", "hyaluronic acid"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog backend.
    #[serde(default)]
    pub backend: CatalogBackend,

    /// Endpoint for the HTTP backend.
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,

    /// Request timeout for the HTTP backend, in seconds.
    #[serde(default = "default_catalog_timeout_secs")]
    pub timeout_secs: u64,

    /// With `http+static`, fall back when the remote returns fewer results.
    #[serde(default = "default_catalog_min_results")]
    pub min_results: usize,

    /// Additional products for the in-memory catalog.
    #[serde(default)]
    pub products: Vec<ProductEntryConfig>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: CatalogBackend::default(),
            base_url: default_catalog_base_url(),
            timeout_secs: default_catalog_timeout_secs(),
            min_results: default_catalog_min_results(),
            products: Vec::new(),
        }
    }
}

fn default_catalog_base_url() -> String {
    "https://makeup-api.herokuapp.com/api/v1/products.json".to_string()
}

fn default_catalog_timeout_secs() -> u64 {
    10
}

fn default_catalog_min_results() -> usize {
    3
}

/// A product entry for the in-memory catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEntryConfig {
    /// Identifier; generated from brand and name when empty.
    #[serde(default)]
    pub id: String,
    pub brand: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Key ingredients, matched by ingredient searches.
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let vocabularies = [
            ("ingredients", &self.vocabulary.ingredients),
            ("brands", &self.vocabulary.brands),
            ("triggers", &self.vocabulary.triggers),
        ];
        for (name, entries) in vocabularies {
            if let Some(i) = entries.iter().position(|e| e.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "vocabulary.{name}[{i}] must not be empty"
                )));
            }
        }
        if self.vocabulary.triggers.is_empty() {
            return Err(ConfigError::Validation(
                "vocabulary.triggers must contain at least one phrase".to_string(),
            ));
        }

        if self.resolver.max_results == 0 {
            return Err(ConfigError::Validation(
                "resolver.max_results must be at least 1".to_string(),
            ));
        }

        if self.catalog.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "catalog.timeout_secs must be non-zero".to_string(),
            ));
        }
        if self.catalog.backend != CatalogBackend::Static {
            let url = &self.catalog.base_url;
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "catalog.base_url must be an http(s) URL, got {url:?}"
                )));
            }
        }
        for (i, product) in self.catalog.products.iter().enumerate() {
            if product.brand.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "catalog.products[{i}].brand must not be empty"
                )));
            }
            if product.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "catalog.products[{i}].name must not be empty"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(
            config.vocabulary.ingredients,
            vec!["niacinamide", "vitamin c", "retinol"]
        );
        assert_eq!(config.vocabulary.brands, vec!["cerave", "ordinary", "somethinc"]);
        assert_eq!(config.vocabulary.triggers.len(), 7);
        assert_eq!(
            config.resolver.unknown_combination,
            UnknownCombinationPolicy::Unclassified
        );
        assert_eq!(config.resolver.max_results, 12);
        assert_eq!(config.catalog.backend, CatalogBackend::Static);
        assert!(config.knowledge.path.is_none());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.catalog.timeout_secs, 10);
        assert_eq!(config.catalog.min_results, 3);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
            [logging]
            level = "debug"

            [vocabulary]
            ingredients = ["niacinamide", "vitamin c", "retinol", "salicylic acid"]
            brands = ["cerave", "skintific"]

            [knowledge]
            path = "/etc/glowtech/knowledge.toml"

            [resolver]
            unknown_combination = "acknowledge"
            max_results = 5

            [catalog]
            backend = "http+static"
            base_url = "http://localhost:8080/products.json"
            timeout_secs = 3

            [[catalog.products]]
            brand = "Skintific"
            name = "5X Ceramide Barrier Moisturize Gel"
            ingredients = ["ceramides"]
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.vocabulary.ingredients.len(), 4);
        assert_eq!(config.vocabulary.brands, vec!["cerave", "skintific"]);
        // Unset vocabularies keep their defaults.
        assert_eq!(config.vocabulary.triggers, default_triggers());
        assert_eq!(
            config.knowledge.path.as_deref(),
            Some(Path::new("/etc/glowtech/knowledge.toml"))
        );
        assert_eq!(
            config.resolver.unknown_combination,
            UnknownCombinationPolicy::Acknowledge
        );
        assert_eq!(config.resolver.max_results, 5);
        assert_eq!(config.catalog.backend, CatalogBackend::HttpWithStaticFallback);
        assert_eq!(config.catalog.timeout_secs, 3);
        assert_eq!(config.catalog.products.len(), 1);
        assert_eq!(config.catalog.products[0].ingredients, vec!["ceramides"]);
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let toml = r#"
            [resolver]
            unknown_combination = "guess"
        "#;
        assert!(matches!(AppConfig::parse(toml), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_unknown_backend() {
        let toml = r#"
            [catalog]
            backend = "postgres"
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_empty_vocabulary_entry() {
        let toml = r#"
            [vocabulary]
            brands = ["cerave", "  "]
        "#;
        let err = AppConfig::parse(toml).unwrap_err();
        assert!(err.to_string().contains("vocabulary.brands[1]"));
    }

    #[test]
    fn test_validation_rejects_no_triggers() {
        let toml = r#"
            [vocabulary]
            triggers = []
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_zero_max_results() {
        let toml = r#"
            [resolver]
            max_results = 0
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let toml = r#"
            [catalog]
            timeout_secs = 0
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_base_url_for_http() {
        let toml = r#"
            [catalog]
            backend = "http"
            base_url = "ftp://example.com/products"
        "#;
        assert!(AppConfig::parse(toml).is_err());

        // The URL is irrelevant for the static backend.
        let toml = r#"
            [catalog]
            base_url = "ftp://example.com/products"
        "#;
        assert!(AppConfig::parse(toml).is_ok());
    }

    #[test]
    fn test_validation_rejects_nameless_product() {
        let toml = r#"
            [[catalog.products]]
            brand = "CeraVe"
            name = ""
        "#;
        let err = AppConfig::parse(toml).unwrap_err();
        assert!(err.to_string().contains("catalog.products[0].name"));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = AppConfig::parse(&text).unwrap();
        assert_eq!(parsed.vocabulary.ingredients, config.vocabulary.ingredients);
        assert_eq!(parsed.catalog.backend, config.catalog.backend);
    }

    // ── Async file-based loading ──────────────────────────────────────

    #[tokio::test]
    async fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("glowtech.toml");
        tokio::fs::write(&path, b"[resolver]\nmax_results = 4\n")
            .await
            .unwrap();

        let config = AppConfig::load(&path).await.unwrap();
        assert_eq!(config.resolver.max_results, 4);
    }

    #[tokio::test]
    async fn test_load_nonexistent_file() {
        let result = AppConfig::load(Path::new("/nonexistent/file.toml")).await;
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[tokio::test]
    async fn test_load_invalid_toml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        tokio::fs::write(&path, b"not valid toml [[[").await.unwrap();

        let result = AppConfig::load(&path).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("bad value".to_string());
        assert_eq!(err.to_string(), "validation error: bad value");
    }
}
