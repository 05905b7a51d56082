#![deny(unsafe_code)]

//! Shared test utilities for the GlowTech workspace.
//!
//! Provides config builders, a scripted product catalog, temporary knowledge
//! files, and tracing helpers so that individual crate tests stay concise.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! glowtech-test-utils = { workspace = true }
//! ```

pub mod catalog;
pub mod config;
pub mod knowledge;
pub mod tracing_setup;

pub use catalog::{ScriptedSearch, SearchCall};
pub use config::TestConfigBuilder;
pub use knowledge::TestKnowledgeFile;
