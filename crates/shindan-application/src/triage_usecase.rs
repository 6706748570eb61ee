//! Triage use case: drives user sessions over the shared tree.

use std::sync::Arc;

use tokio::sync::RwLock;

use shindan_core::Result;
use shindan_core::session::Session;
use shindan_core::traversal::{DisplayPayload, TraversalEngine};
use shindan_core::tree::{NodeOption, TreeModel, TreeRepository};
use shindan_infrastructure::FileTreeRepository;

/// Use case for running diagnosis sessions.
///
/// Holds the one in-memory [`TreeModel`] every concurrent session reads.
/// The model is shared mutable state: the editor use case writes through the
/// same handle, so a live session can observe mid-run edits (a dangling
/// current step is surfaced by `enter`, never a crash). Callers own one
/// [`Session`] per user and pass it into every operation.
pub struct TriageUseCase {
    tree: Arc<RwLock<TreeModel>>,
    repository: Arc<dyn TreeRepository>,
    engine: TraversalEngine,
}

impl TriageUseCase {
    /// Loads the tree from the repository and wraps it for shared access.
    pub async fn new(repository: Arc<dyn TreeRepository>) -> Result<Self> {
        let tree = repository.load().await?;
        tracing::info!(nodes = tree.len(), "diagnosis tree loaded");
        Ok(Self {
            tree: Arc::new(RwLock::new(tree)),
            repository,
            engine: TraversalEngine::new(),
        })
    }

    /// Convenience constructor using the default file-backed store.
    pub async fn from_default_store() -> Result<Self> {
        Self::new(Arc::new(FileTreeRepository::new()?)).await
    }

    /// Shared handle to the tree, for the editor use case.
    pub fn tree(&self) -> Arc<RwLock<TreeModel>> {
        self.tree.clone()
    }

    /// The repository backing this tree, for the editor use case.
    pub fn repository(&self) -> Arc<dyn TreeRepository> {
        self.repository.clone()
    }

    /// Resolves what to render for the session's current step.
    pub async fn enter(&self, session: &mut Session) -> DisplayPayload {
        let tree = self.tree.read().await;
        self.engine.enter(&tree, session)
    }

    /// Applies the user's choice of a displayed option.
    pub async fn choose(&self, session: &mut Session, option: &NodeOption) {
        let tree = self.tree.read().await;
        self.engine.choose(&tree, session, option);
    }

    /// Returns the session to the start of the tree.
    pub fn reset(&self, session: &mut Session) {
        self.engine.reset(session);
    }

    /// Replaces the in-memory tree with a fresh load from the repository.
    pub async fn reload(&self) -> Result<()> {
        let fresh = self.repository.load().await?;
        let mut tree = self.tree.write().await;
        *tree = fresh;
        tracing::info!(nodes = tree.len(), "diagnosis tree reloaded");
        Ok(())
    }
}
