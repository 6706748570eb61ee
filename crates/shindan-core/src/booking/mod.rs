//! Booking domain models, validation, and collaborator traits.
//!
//! A booking is the hand-off at the end of an unresolved triage run: the
//! user's contact details are validated, packaged, and pushed through an
//! injected notification channel.

mod collector;
mod model;
mod notifier;

pub use collector::BookingCollector;
pub use model::{BookingDraft, BookingPolicy, BookingRecord};
pub use notifier::{Notifier, NotifyOutcome, PostalLookup};
