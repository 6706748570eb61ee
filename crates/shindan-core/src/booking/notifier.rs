//! Collaborator traits for booking submission.

use async_trait::async_trait;

use super::model::BookingRecord;
use crate::error::Result;

/// Result of a notification attempt that did not hard-fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The operator was notified.
    Delivered,
    /// No channel is configured. The booking still goes through; blocking
    /// the user on missing operator configuration is worse than a silent
    /// gap in notifications.
    Skipped,
}

/// Notification channel for accepted bookings. The engine treats delivery as
/// a black box; a hard failure keeps the session in the booking state with
/// the draft intact for retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, record: &BookingRecord) -> Result<NotifyOutcome>;
}

/// Best-effort address lookup by postal code, used only to prefill a default
/// field value. Failures are swallowed by the caller and never block
/// submission.
#[async_trait]
pub trait PostalLookup: Send + Sync {
    /// Returns the resolved address, or `None` when the code is unknown.
    async fn lookup(&self, postal_code: &str) -> Result<Option<String>>;
}
