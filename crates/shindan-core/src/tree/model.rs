//! Diagnosis tree domain models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShindanError};
use crate::step::StepRef;

/// Maximum number of options a node may carry. The authoring UI renders a
/// fixed grid of this many slots.
pub const MAX_OPTIONS: usize = 4;

/// A labeled edge from one node to another node or a reserved step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeOption {
    /// Display text for the choice.
    pub label: String,
    /// Target step. May dangle; traversal degrades gracefully on a miss.
    pub next_step: StepRef,
}

impl NodeOption {
    pub fn new(label: impl Into<String>, next_step: StepRef) -> Self {
        Self {
            label: label.into(),
            next_step,
        }
    }
}

/// One step of the diagnosis tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id within the tree.
    pub id: String,
    /// Display text shown when the node is entered.
    pub message: String,
    /// Ordered choices; order determines on-screen layout.
    pub options: Vec<NodeOption>,
}

/// Raw authoring input for a single option slot. An incomplete slot (either
/// field empty) is dropped on save rather than stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionInput {
    pub label: String,
    pub target: String,
}

impl OptionInput {
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }

    /// A slot is complete only when both fields are filled in.
    pub fn is_complete(&self) -> bool {
        !self.label.trim().is_empty() && !self.target.trim().is_empty()
    }
}

/// The in-memory node collection. Authoritative, shared read-only by the
/// traversal engine; authoring mutates it through [`TreeModel::upsert`].
///
/// Insertion order of ids is preserved for the authoring UI; traversal does
/// not depend on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeModel {
    order: Vec<String>,
    nodes: HashMap<String, Node>,
}

impl TreeModel {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from already-validated nodes, keeping their order.
    /// A duplicate id replaces the earlier node but keeps its position.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let mut model = Self::new();
        for node in nodes {
            if !model.nodes.contains_key(&node.id) {
                model.order.push(node.id.clone());
            }
            model.nodes.insert(node.id.clone(), node);
        }
        model
    }

    /// Reads a node by id.
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// True if a node with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All node ids in insertion order.
    pub fn list_ids(&self) -> Vec<String> {
        self.order.clone()
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts or fully replaces a node's message and options.
    ///
    /// Option slots missing either a label or a target are silently dropped
    /// (authoring convenience; a half-filled slot is treated as not entered).
    /// Referenced targets are not required to exist yet — authoring may point
    /// at a node that will be created afterwards, and traversal tolerates the
    /// dangling reference in the meantime.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the id is empty, the id is reserved
    /// for fixed engine behavior, or more than [`MAX_OPTIONS`] complete
    /// options were provided.
    pub fn upsert(&mut self, id: &str, message: &str, options: &[OptionInput]) -> Result<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ShindanError::validation("node id must not be empty"));
        }
        if StepRef::is_reserved_id(id) {
            return Err(ShindanError::validation(format!(
                "'{id}' is a reserved step id and cannot be authored"
            )));
        }

        let filtered: Vec<NodeOption> = options
            .iter()
            .filter(|slot| slot.is_complete())
            .map(|slot| NodeOption::new(slot.label.trim(), StepRef::parse(slot.target.trim())))
            .collect();

        if filtered.len() > MAX_OPTIONS {
            return Err(ShindanError::validation(format!(
                "a node may have at most {MAX_OPTIONS} options, got {}",
                filtered.len()
            )));
        }

        let node = Node {
            id: id.to_string(),
            message: message.to_string(),
            options: filtered,
        };

        if !self.nodes.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.nodes.insert(id.to_string(), node);
        Ok(())
    }
}
