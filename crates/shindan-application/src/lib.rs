//! Use cases orchestrating the Shindan engine.
//!
//! The presentation layer (chat UI, authoring UI) talks to these use cases
//! only; domain types come from `shindan-core` and concrete persistence from
//! `shindan-infrastructure`.

pub mod booking_usecase;
pub mod editor_usecase;
pub mod triage_usecase;

pub use booking_usecase::BookingUseCase;
pub use editor_usecase::{EditableNode, EditorUseCase};
pub use triage_usecase::TriageUseCase;
