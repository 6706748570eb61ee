//! Data Transfer Objects (DTOs) for the persisted tree document.
//!
//! The stored document is a JSON object mapping node ids to node bodies:
//!
//! ```json
//! {
//!   "start": {
//!     "message": "...",
//!     "options": [{ "label": "...", "next_step": "..." }]
//!   }
//! }
//! ```
//!
//! The document carries no schema version and may have been written by older
//! tooling or edited by hand, so parsing is deliberately tolerant: missing
//! `message` or `options` default to empty, malformed entries are skipped
//! with a warning, and incomplete option pairs are dropped at the boundary
//! with the same policy as [`TreeModel::upsert`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use shindan_core::step::StepRef;
use shindan_core::tree::{MAX_OPTIONS, Node, NodeOption, TreeModel};

/// Stored shape of one option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionDto {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub next_step: String,
}

/// Stored shape of one node body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDto {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub options: Vec<OptionDto>,
}

/// Converts a parsed document object into the domain model.
///
/// Entries that cannot be trusted are dropped, never propagated:
/// - keys using a reserved step id (those steps are engine behavior, not
///   data),
/// - bodies that are not objects of the expected shape,
/// - options missing a label or target,
/// - options beyond the per-node maximum.
pub fn document_to_model(document: &Map<String, Value>) -> TreeModel {
    let mut nodes = Vec::with_capacity(document.len());

    for (id, body) in document {
        if StepRef::is_reserved_id(id) {
            tracing::warn!(node_id = %id, "skipping node authored under a reserved step id");
            continue;
        }
        if id.trim().is_empty() {
            tracing::warn!("skipping node with an empty id");
            continue;
        }

        let dto: NodeDto = match serde_json::from_value(body.clone()) {
            Ok(dto) => dto,
            Err(e) => {
                tracing::warn!(node_id = %id, error = %e, "skipping malformed node entry");
                continue;
            }
        };

        let mut options: Vec<NodeOption> = dto
            .options
            .iter()
            .filter(|o| !o.label.trim().is_empty() && !o.next_step.trim().is_empty())
            .map(|o| NodeOption::new(o.label.trim(), StepRef::parse(o.next_step.trim())))
            .collect();
        if options.len() > MAX_OPTIONS {
            tracing::warn!(
                node_id = %id,
                count = options.len(),
                "node carries more than {MAX_OPTIONS} options; truncating"
            );
            options.truncate(MAX_OPTIONS);
        }

        nodes.push(Node {
            id: id.clone(),
            message: dto.message,
            options,
        });
    }

    TreeModel::from_nodes(nodes)
}

/// Converts the domain model back into the stored document shape,
/// preserving node order.
pub fn model_to_document(tree: &TreeModel) -> Map<String, Value> {
    let mut document = Map::new();
    for node in tree.nodes() {
        let dto = NodeDto {
            message: node.message.clone(),
            options: node
                .options
                .iter()
                .map(|o| OptionDto {
                    label: o.label.clone(),
                    next_step: o.next_step.as_str().to_string(),
                })
                .collect(),
        };
        // NodeDto serialization cannot fail; it is a plain struct of strings.
        let value = serde_json::to_value(&dto).unwrap_or(Value::Null);
        document.insert(node.id.clone(), value);
    }
    document
}
