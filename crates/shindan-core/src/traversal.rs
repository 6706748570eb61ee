//! Session-scoped traversal state machine.
//!
//! The engine is stateless; the shared [`TreeModel`] and the per-user
//! [`Session`] are passed into every operation so callers own all state
//! explicitly.
//!
//! Transcript building is split across two operations on purpose:
//! [`TraversalEngine::choose`] appends the turns, and
//! [`TraversalEngine::enter`] only resolves what to render. That keeps
//! `enter` safe to call repeatedly for the same state without duplicating
//! history, the way a chat UI re-renders its transcript on every frame.

use serde::{Deserialize, Serialize};

use crate::session::{Session, Speaker};
use crate::step::StepRef;
use crate::tree::{NodeOption, TreeModel};

/// Fixed template shown when entering the booking state.
const BOOKING_LINES: [&str; 2] = [
    "承知いたしました。出張修理・診断の予約を受け付けます。",
    "以下のフォームに必要事項を入力して「送信」を押してください。",
];

/// Fixed template shown when the problem was resolved.
const SOLVED_LINES: [&str; 2] = [
    "解決してよかったです！また何かあればいつでもご相談ください。",
    "大崎市出張PCサポート",
];

/// Fixed template shown after a booking was accepted. The first line is
/// followed by a personalized acknowledgment built in `enter`.
const COMPLETED_HEAD: &str = "予約を受け付けました";
const COMPLETED_TAIL: [&str; 2] = [
    "ご入力いただいた電話番号またはメールアドレスへ、担当者より折り返しご連絡いたします。",
    "※確認メールは送信されませんので、折り返しをお待ちください。",
];

/// Fallback addressee when no booking acknowledgment was recorded.
const DEFAULT_ACK: &str = "お客様";

/// What the presentation layer should render for the current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayPayload {
    /// A named tree node: its message and its choices, in authored order.
    Step {
        step_id: String,
        message: String,
        options: Vec<NodeOption>,
    },
    /// The booking form state.
    Booking { lines: Vec<String> },
    /// Terminal: the problem was resolved.
    Solved { lines: Vec<String> },
    /// Terminal: a booking was submitted.
    Completed { lines: Vec<String> },
    /// Recoverable: the current named step no longer exists in the tree.
    /// Trees are user-editable, so a live session can be stranded by a
    /// concurrent edit; the only affordance is a reset.
    StepMissing { step_id: String },
}

/// The state machine driving conversation progression.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraversalEngine;

impl TraversalEngine {
    pub fn new() -> Self {
        Self
    }

    /// Resolves the session's current step into a renderable payload.
    ///
    /// Reserved steps resolve against fixed templates; named steps resolve
    /// against the tree. A named step missing from the tree yields a
    /// [`DisplayPayload::StepMissing`] payload rather than an error.
    ///
    /// On the very first call of a run (empty transcript) the opening
    /// assistant line is seeded into history; after that, repeated calls for
    /// the same state append nothing.
    pub fn enter(&self, tree: &TreeModel, session: &mut Session) -> DisplayPayload {
        match session.current_step.clone() {
            StepRef::Booking => DisplayPayload::Booking {
                lines: BOOKING_LINES.iter().map(|s| s.to_string()).collect(),
            },
            StepRef::Solved => DisplayPayload::Solved {
                lines: SOLVED_LINES.iter().map(|s| s.to_string()).collect(),
            },
            StepRef::Completed => {
                let ack = session.booking_ack.as_deref().unwrap_or(DEFAULT_ACK);
                let mut lines = vec![
                    COMPLETED_HEAD.to_string(),
                    format!("{ack}、お問い合わせありがとうございます。"),
                ];
                lines.extend(COMPLETED_TAIL.iter().map(|s| s.to_string()));
                DisplayPayload::Completed { lines }
            }
            StepRef::Named(step_id) => match tree.get(&step_id) {
                Some(node) => {
                    if session.history.is_empty() {
                        session.push_turn(Speaker::Assistant, node.message.clone());
                    }
                    DisplayPayload::Step {
                        step_id,
                        message: node.message.clone(),
                        options: node.options.clone(),
                    }
                }
                None => {
                    tracing::warn!(step_id = %step_id, "session points at a missing step");
                    DisplayPayload::StepMissing { step_id }
                }
            },
        }
    }

    /// Applies a user's choice of a previously displayed option.
    ///
    /// Records `(user, label)`, moves the session to the option's target,
    /// and — only when the target is a named node that exists — records the
    /// next assistant line. A dangling target still advances the state; the
    /// next [`TraversalEngine::enter`] surfaces the missing step.
    pub fn choose(&self, tree: &TreeModel, session: &mut Session, option: &NodeOption) {
        session.push_turn(Speaker::User, option.label.clone());
        session.current_step = option.next_step.clone();

        if let StepRef::Named(id) = &option.next_step {
            if let Some(node) = tree.get(id) {
                session.push_turn(Speaker::Assistant, node.message.clone());
            }
        }
    }

    /// Returns the session to the start of the tree.
    pub fn reset(&self, session: &mut Session) {
        session.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::OptionInput;

    /// The two-node scenario tree used across these tests.
    fn scenario_tree() -> TreeModel {
        let mut tree = TreeModel::new();
        tree.upsert("start", "Hi", &[OptionInput::new("Slow PC", "slow")])
            .unwrap();
        tree.upsert(
            "slow",
            "Try restart",
            &[
                OptionInput::new("Fixed", "solved"),
                OptionInput::new("Still broken", "booking"),
            ],
        )
        .unwrap();
        tree
    }

    fn option_of(payload: &DisplayPayload, label: &str) -> NodeOption {
        match payload {
            DisplayPayload::Step { options, .. } => options
                .iter()
                .find(|o| o.label == label)
                .cloned()
                .expect("option present"),
            other => panic!("expected a step payload, got {other:?}"),
        }
    }

    #[test]
    fn test_enter_seeds_opening_line_once() {
        let tree = scenario_tree();
        let engine = TraversalEngine::new();
        let mut session = Session::new();

        let first = engine.enter(&tree, &mut session);
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.history[0].speaker, Speaker::Assistant);
        assert_eq!(session.history[0].text, "Hi");

        // Idempotent from here on.
        let second = engine.enter(&tree, &mut session);
        assert_eq!(first, second);
        assert_eq!(session.history.len(), 1);
    }

    #[test]
    fn test_choose_advances_and_appends_both_turns() {
        let tree = scenario_tree();
        let engine = TraversalEngine::new();
        let mut session = Session::new();

        let payload = engine.enter(&tree, &mut session);
        engine.choose(&tree, &mut session, &option_of(&payload, "Slow PC"));

        assert_eq!(session.current_step, StepRef::Named("slow".to_string()));
        let tail: Vec<(Speaker, &str)> = session
            .history
            .iter()
            .skip(1)
            .map(|t| (t.speaker, t.text.as_str()))
            .collect();
        assert_eq!(
            tail,
            vec![(Speaker::User, "Slow PC"), (Speaker::Assistant, "Try restart")]
        );
    }

    #[test]
    fn test_choose_into_booking_appends_no_assistant_line() {
        let tree = scenario_tree();
        let engine = TraversalEngine::new();
        let mut session = Session::new();

        let payload = engine.enter(&tree, &mut session);
        engine.choose(&tree, &mut session, &option_of(&payload, "Slow PC"));
        let payload = engine.enter(&tree, &mut session);
        let before = session.history.len();
        engine.choose(&tree, &mut session, &option_of(&payload, "Still broken"));

        assert_eq!(session.current_step, StepRef::Booking);
        // Only the user turn was recorded; booking renders from a fixed
        // template on the next enter.
        assert_eq!(session.history.len(), before + 1);
        assert_eq!(session.history.last().unwrap().speaker, Speaker::User);

        assert!(matches!(
            engine.enter(&tree, &mut session),
            DisplayPayload::Booking { .. }
        ));
    }

    #[test]
    fn test_dangling_reference_advances_without_assistant_line() {
        let mut tree = TreeModel::new();
        tree.upsert("start", "Hi", &[OptionInput::new("go", "gone")])
            .unwrap();
        let engine = TraversalEngine::new();
        let mut session = Session::new();

        let payload = engine.enter(&tree, &mut session);
        engine.choose(&tree, &mut session, &option_of(&payload, "go"));

        assert_eq!(session.current_step, StepRef::Named("gone".to_string()));
        assert_eq!(session.history.last().unwrap().speaker, Speaker::User);

        match engine.enter(&tree, &mut session) {
            DisplayPayload::StepMissing { step_id } => assert_eq!(step_id, "gone"),
            other => panic!("expected StepMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_history_grows_monotonically_until_reset() {
        let tree = scenario_tree();
        let engine = TraversalEngine::new();
        let mut session = Session::new();

        let mut last_len = 0;
        let payload = engine.enter(&tree, &mut session);
        assert!(session.history.len() >= last_len);
        last_len = session.history.len();

        engine.choose(&tree, &mut session, &option_of(&payload, "Slow PC"));
        assert!(session.history.len() >= last_len);

        engine.reset(&mut session);
        assert!(session.history.is_empty());
        assert_eq!(session.current_step, StepRef::start());
    }

    #[test]
    fn test_completed_payload_uses_recorded_ack() {
        let tree = TreeModel::new();
        let engine = TraversalEngine::new();
        let mut session = Session::new();
        session.current_step = StepRef::Completed;
        session.booking_ack = Some("Tanaka様".to_string());

        match engine.enter(&tree, &mut session) {
            DisplayPayload::Completed { lines } => {
                assert_eq!(lines[0], "予約を受け付けました");
                assert!(lines[1].starts_with("Tanaka様"));
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_start_node_is_recoverable() {
        let tree = TreeModel::new();
        let engine = TraversalEngine::new();
        let mut session = Session::new();

        match engine.enter(&tree, &mut session) {
            DisplayPayload::StepMissing { step_id } => assert_eq!(step_id, "start"),
            other => panic!("expected StepMissing, got {other:?}"),
        }
        assert!(session.history.is_empty());
    }
}
