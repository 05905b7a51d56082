//! Knowledge file helpers.

use std::path::PathBuf;

use tempfile::TempDir;

/// A knowledge TOML file in a test-scoped temp directory.
///
/// The directory is deleted when this value is dropped, even on panic.
pub struct TestKnowledgeFile {
    pub path: PathBuf,
    _temp_dir: TempDir,
}

impl TestKnowledgeFile {
    /// Write `toml_content` to a fresh `knowledge.toml`.
    pub async fn with_toml(toml_content: &str) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("knowledge.toml");
        tokio::fs::write(&path, toml_content)
            .await
            .expect("failed to write knowledge file");

        Self {
            path,
            _temp_dir: temp_dir,
        }
    }
}
