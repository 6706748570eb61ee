//! Step references.
//!
//! A step reference is either a named, user-authored tree node or one of the
//! reserved identifiers handled by fixed engine logic. Representing the
//! reserved steps as enum variants keeps the state machine's terminal states
//! distinguishable from authorable nodes at the type level instead of relying
//! on string comparison at every call site.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The node id every session starts at. Stored in the tree like any other
/// named node, but never offered as a transition target.
pub const START_STEP_ID: &str = "start";

/// Reserved identifiers that are handled by fixed engine behavior and must
/// never be authored as node ids.
pub const RESERVED_STEP_IDS: [&str; 3] = ["booking", "solved", "completed"];

/// Where a session currently is, or where an option leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepRef {
    /// A user-authored node id, resolved against the tree at traversal time.
    Named(String),
    /// The booking form state.
    Booking,
    /// The problem was resolved; terminal until the user resets.
    Solved,
    /// A booking was submitted; terminal until the user resets.
    Completed,
}

impl StepRef {
    /// The initial step of every session.
    pub fn start() -> Self {
        StepRef::Named(START_STEP_ID.to_string())
    }

    /// Parses a stored identifier. Anything that is not a reserved
    /// identifier is treated as a named node id.
    pub fn parse(id: &str) -> Self {
        match id {
            "booking" => StepRef::Booking,
            "solved" => StepRef::Solved,
            "completed" => StepRef::Completed,
            other => StepRef::Named(other.to_string()),
        }
    }

    /// Returns the identifier as stored in documents.
    pub fn as_str(&self) -> &str {
        match self {
            StepRef::Named(id) => id,
            StepRef::Booking => "booking",
            StepRef::Solved => "solved",
            StepRef::Completed => "completed",
        }
    }

    /// Terminal states require an explicit user-initiated reset to leave.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepRef::Solved | StepRef::Completed)
    }

    /// True if `id` is reserved for fixed engine behavior and therefore not
    /// valid as an authored node id.
    pub fn is_reserved_id(id: &str) -> bool {
        RESERVED_STEP_IDS.contains(&id)
    }
}

impl fmt::Display for StepRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Serialized as the plain identifier string so documents and payloads keep
// the original wire shape.
impl Serialize for StepRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StepRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StepRefVisitor;

        impl Visitor<'_> for StepRefVisitor {
            type Value = StepRef;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a step identifier string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<StepRef, E> {
                Ok(StepRef::parse(value))
            }
        }

        deserializer.deserialize_str(StepRefVisitor)
    }
}
