//! File-backed tree repository.
//!
//! Persists the whole diagnosis tree as one JSON document. Every save is a
//! full-document overwrite; concurrent editors race as last-write-wins.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use shindan_core::tree::{TreeModel, TreeRepository};
use shindan_core::{Result, ShindanError};

use crate::dto::{document_to_model, model_to_document};
use crate::paths::ShindanPaths;

/// JSON-file implementation of [`TreeRepository`].
pub struct FileTreeRepository {
    path: PathBuf,
}

impl FileTreeRepository {
    /// Creates a repository at the default document location
    /// (`~/.config/shindan/diagnosis_data.json`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: ShindanPaths::tree_document_file()?,
        })
    }

    /// Creates a repository backed by a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl TreeRepository for FileTreeRepository {
    async fn load(&self) -> Result<TreeModel> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no tree document yet, starting empty");
            return Ok(TreeModel::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ShindanError::io(format!("failed to read tree document: {e}")))?;
        if content.trim().is_empty() {
            return Ok(TreeModel::new());
        }

        let value: Value = serde_json::from_str(&content)?;
        let document = value.as_object().ok_or_else(|| {
            ShindanError::serialization("JSON", "tree document root must be an object")
        })?;

        Ok(document_to_model(document))
    }

    async fn save(&self, tree: &TreeModel) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ShindanError::io(format!("failed to create document directory: {e}")))?;
        }

        let document = model_to_document(tree);
        let serialized = serde_json::to_string_pretty(&Value::Object(document))?;

        fs::write(&self.path, serialized)
            .await
            .map_err(|e| ShindanError::io(format!("failed to write tree document: {e}")))?;

        tracing::info!(path = %self.path.display(), nodes = tree.len(), "tree document saved");
        Ok(())
    }
}
