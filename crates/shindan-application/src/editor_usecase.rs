//! Editor use case: authoring operations on the diagnosis tree.

use std::sync::Arc;

use tokio::sync::RwLock;

use shindan_core::tree::{MAX_OPTIONS, OptionInput, TreeModel, TreeRepository};
use shindan_core::{Result, ShindanError};

/// Reserved identifiers offered as transition targets. `completed` is
/// reachable only through the booking flow and is deliberately not
/// authorable; `start` is a node, not a target.
const RESERVED_TARGETS: [&str; 2] = ["booking", "solved"];

/// A node flattened into the fixed-size form the authoring UI edits:
/// exactly [`MAX_OPTIONS`] option slots, empty ones included.
#[derive(Debug, Clone, PartialEq)]
pub struct EditableNode {
    /// Empty for a node being newly created.
    pub id: String,
    pub message: String,
    pub slots: [OptionInput; MAX_OPTIONS],
}

impl EditableNode {
    fn empty() -> Self {
        Self {
            id: String::new(),
            message: String::new(),
            slots: Default::default(),
        }
    }
}

/// Use case for creating and updating tree nodes.
///
/// Shares the in-memory tree with [`TriageUseCase`](crate::TriageUseCase);
/// every save writes through to the repository as a whole-document
/// overwrite. At most one authoring session is assumed at a time — two
/// concurrent saves race as last-write-wins.
pub struct EditorUseCase {
    tree: Arc<RwLock<TreeModel>>,
    repository: Arc<dyn TreeRepository>,
}

impl EditorUseCase {
    pub fn new(tree: Arc<RwLock<TreeModel>>, repository: Arc<dyn TreeRepository>) -> Self {
        Self { tree, repository }
    }

    /// Loads a node into the fixed-size editing form, or an empty template
    /// when `id` is `None` (new node).
    ///
    /// # Errors
    ///
    /// Returns [`ShindanError::StepNotFound`] when the requested id does not
    /// exist.
    pub async fn load_for_edit(&self, id: Option<&str>) -> Result<EditableNode> {
        let Some(id) = id else {
            return Ok(EditableNode::empty());
        };

        let tree = self.tree.read().await;
        let node = tree
            .get(id)
            .ok_or_else(|| ShindanError::step_not_found(id))?;

        let mut slots: [OptionInput; MAX_OPTIONS] = Default::default();
        for (slot, option) in slots.iter_mut().zip(node.options.iter()) {
            *slot = OptionInput::new(option.label.clone(), option.next_step.as_str());
        }

        Ok(EditableNode {
            id: node.id.clone(),
            message: node.message.clone(),
            slots,
        })
    }

    /// Transition targets offered to the author: the reserved steps plus
    /// every current node id. A snapshot — nodes created after this call do
    /// not appear until the form is reopened.
    pub async fn edit_targets(&self) -> Vec<String> {
        let tree = self.tree.read().await;
        RESERVED_TARGETS
            .iter()
            .map(|s| s.to_string())
            .chain(tree.list_ids())
            .collect()
    }

    /// Saves a node and persists the whole tree.
    ///
    /// Incomplete option slots are dropped, matching the form semantics
    /// where a half-filled row means "not entered".
    pub async fn save(&self, id: &str, message: &str, slots: &[OptionInput]) -> Result<()> {
        let mut tree = self.tree.write().await;
        tree.upsert(id, message, slots)?;
        self.repository.save(&tree).await?;
        tracing::info!(node_id = %id, "node saved");
        Ok(())
    }
}
