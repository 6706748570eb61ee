//! Session domain model.
//!
//! A session is one user's live run through the diagnosis tree: the current
//! position plus the conversation transcript. It is owned by the caller
//! serving that user, never shared across users, and has no persistence
//! beyond its own lifetime.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::booking::BookingDraft;
use crate::step::StepRef;

/// Who produced a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Assistant,
    User,
}

/// One transcript line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }
}

/// One user's traversal state.
///
/// The transcript is strictly append-only between resets; recorded turns are
/// never reordered or rewritten, even if the underlying tree changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The active step; starts at the `start` node.
    pub current_step: StepRef,
    /// Conversation transcript, oldest first.
    pub history: Vec<Turn>,
    /// Contact/problem fields collected while in the booking state. Kept
    /// across failed submits so the user never re-enters data.
    pub booking_draft: BookingDraft,
    /// Human-readable acknowledgment set when a booking was accepted.
    pub booking_ack: Option<String>,
    /// Timestamp when the session was created (RFC 3339).
    pub created_at: String,
    /// Timestamp of the last recorded activity (RFC 3339).
    pub updated_at: String,
}

impl Session {
    /// Creates a fresh session positioned at the start node.
    pub fn new() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            current_step: StepRef::start(),
            history: Vec::new(),
            booking_draft: BookingDraft::default(),
            booking_ack: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Appends one transcript line.
    pub fn push_turn(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.history.push(Turn::new(speaker, text));
        self.updated_at = Utc::now().to_rfc3339();
    }

    /// Returns to the initial state: transcript cleared, position back at
    /// `start`, any in-progress booking discarded.
    pub fn reset(&mut self) {
        self.current_step = StepRef::start();
        self.history.clear();
        self.booking_draft = BookingDraft::default();
        self.booking_ack = None;
        self.updated_at = Utc::now().to_rfc3339();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_start() {
        let session = Session::new();
        assert_eq!(session.current_step, StepRef::start());
        assert!(session.history.is_empty());
        assert!(session.booking_ack.is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session::new();
        session.push_turn(Speaker::User, "Slow PC");
        session.current_step = StepRef::Booking;
        session.booking_draft.name = "Tanaka".to_string();
        session.booking_ack = Some("Tanaka様".to_string());

        session.reset();

        assert_eq!(session.current_step, StepRef::start());
        assert!(session.history.is_empty());
        assert!(session.booking_draft.name.is_empty());
        assert!(session.booking_ack.is_none());
    }
}
