//! Diagnosis tree domain models and repository trait.
//!
//! The tree is a flat collection of named nodes; each node carries a display
//! message and up to four labeled options pointing at other nodes or at
//! reserved steps.

mod model;
mod repository;

pub use model::{MAX_OPTIONS, Node, NodeOption, OptionInput, TreeModel};
pub use repository::TreeRepository;
