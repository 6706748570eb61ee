//! Tree repository trait.

use async_trait::async_trait;

use super::model::TreeModel;
use crate::error::Result;

/// Repository trait for persisting the node collection as one opaque
/// document. Every save rewrites the full document; there is no diffing or
/// merging, so the last writer wins.
#[async_trait]
pub trait TreeRepository: Send + Sync {
    /// Loads the whole tree. A missing backing document is an empty tree,
    /// not an error.
    async fn load(&self) -> Result<TreeModel>;

    /// Persists the whole tree, replacing any previous document.
    async fn save(&self, tree: &TreeModel) -> Result<()>;
}
