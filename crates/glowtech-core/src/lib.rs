#![deny(unsafe_code)]

//! GlowTech advisor core.
//!
//! Turns a free-text skincare question into an answer. A message is
//! classified by the [`QueryClassifier`] into a compatibility question, a
//! product query, or neither; the [`Advisor`] then answers compatibility
//! questions from the [`KnowledgeBase`] and delegates product queries to a
//! [`ProductSearch`] catalog.
//!
//! ```text
//! message ──▶ QueryClassifier ──▶ QueryClassification ──▶ Advisor ──▶ reply
//!                                                          │    │
//!                                              KnowledgeBase    ProductSearch
//! ```

use std::future::Future;
use std::pin::Pin;

/// A type-erased, `Send`-safe, boxed future. The return type for async
/// trait methods that require dynamic dispatch (`dyn Trait`).
///
/// Native `async fn` in traits produces opaque return types that are **not**
/// object-safe, so traits consumed via `Box<dyn Trait>` return this instead.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Message handling: classification, lookup, and reply rendering.
pub mod advisor;
/// Product catalog collaborators.
pub mod catalog;
/// Intent detection over fixed keyword vocabularies.
pub mod classifier;
/// Ingredient profiles and known combinations.
pub mod knowledge;

pub use advisor::{Advisor, AdvisorError};
pub use catalog::{Product, ProductSearch, SearchError};
pub use classifier::{QueryClassification, QueryClassifier, Vocabulary};
pub use knowledge::{Combination, CombinationKey, Ingredient, KnowledgeBase, KnowledgeError};
