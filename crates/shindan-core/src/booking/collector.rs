//! Booking validation and submission.

use std::time::Duration;

use tokio::time::timeout;
use uuid::Uuid;

use super::model::{BookingDraft, BookingPolicy, BookingRecord};
use super::notifier::{Notifier, NotifyOutcome, PostalLookup};
use crate::error::{Result, ShindanError};
use crate::session::Session;
use crate::step::StepRef;

/// Default upper bound on a single notification attempt.
const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(30);

/// Validates booking drafts and drives submission through the injected
/// notification channel.
#[derive(Debug, Clone)]
pub struct BookingCollector {
    policy: BookingPolicy,
    notify_timeout: Duration,
}

impl BookingCollector {
    pub fn new(policy: BookingPolicy) -> Self {
        Self {
            policy,
            notify_timeout: DEFAULT_NOTIFY_TIMEOUT,
        }
    }

    /// Overrides the notification timeout.
    pub fn with_notify_timeout(mut self, notify_timeout: Duration) -> Self {
        self.notify_timeout = notify_timeout;
        self
    }

    pub fn policy(&self) -> BookingPolicy {
        self.policy
    }

    /// Checks required fields and packages the draft.
    ///
    /// Name and phone are always required; address only under a strict
    /// policy. Email and the symptom detail are always optional.
    ///
    /// # Errors
    ///
    /// Returns [`ShindanError::MissingFields`] naming every empty required
    /// field.
    pub fn validate(&self, draft: &BookingDraft) -> Result<BookingRecord> {
        let mut missing = Vec::new();
        if draft.name.trim().is_empty() {
            missing.push("name".to_string());
        }
        if draft.phone.trim().is_empty() {
            missing.push("phone".to_string());
        }
        if self.policy.require_address && draft.address.trim().is_empty() {
            missing.push("address".to_string());
        }
        if !missing.is_empty() {
            return Err(ShindanError::missing_fields(missing));
        }

        Ok(BookingRecord {
            name: draft.name.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            email: draft.email.trim().to_string(),
            address: draft.address.trim().to_string(),
            detail: draft.detail.trim().to_string(),
        })
    }

    /// Submits a validated booking through the notification channel.
    ///
    /// On success the session moves to the completed state, the draft is
    /// cleared, and a human-readable acknowledgment is stored; the returned
    /// string is a reference id for the booking. On failure or timeout the
    /// session is left untouched — still in the booking state, draft intact —
    /// so the user can retry without re-entering anything.
    pub async fn submit(
        &self,
        session: &mut Session,
        record: &BookingRecord,
        notifier: &dyn Notifier,
    ) -> Result<String> {
        let outcome = timeout(self.notify_timeout, notifier.notify(record))
            .await
            .map_err(|_| {
                ShindanError::notification(format!(
                    "notification attempt timed out after {:?}",
                    self.notify_timeout
                ))
            })??;

        if outcome == NotifyOutcome::Skipped {
            tracing::warn!(
                name = %record.name,
                "booking accepted without operator notification (channel unconfigured)"
            );
        }

        let reference = Uuid::new_v4().to_string();
        session.current_step = StepRef::Completed;
        session.booking_ack = Some(format!("{}様", record.name));
        session.booking_draft = BookingDraft::default();
        tracing::info!(%reference, "booking accepted");
        Ok(reference)
    }

    /// Best-effort address prefill from the draft's postal code.
    ///
    /// Only fills an empty address field. Lookup misses and service errors
    /// are logged and swallowed; they never surface to the user.
    pub async fn prefill_address(&self, draft: &mut BookingDraft, lookup: &dyn PostalLookup) {
        let code = draft.postal_code.trim();
        if code.is_empty() || !draft.address.trim().is_empty() {
            return;
        }
        match lookup.lookup(code).await {
            Ok(Some(address)) => draft.address = address,
            Ok(None) => tracing::debug!(postal_code = %code, "postal code not found"),
            Err(e) => tracing::debug!(postal_code = %code, error = %e, "address lookup failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubNotifier {
        outcome: Result<NotifyOutcome>,
        calls: AtomicUsize,
    }

    impl StubNotifier {
        fn new(outcome: Result<NotifyOutcome>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Notifier for StubNotifier {
        async fn notify(&self, _record: &BookingRecord) -> Result<NotifyOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    struct StubLookup(Result<Option<String>>);

    #[async_trait]
    impl PostalLookup for StubLookup {
        async fn lookup(&self, _postal_code: &str) -> Result<Option<String>> {
            self.0.clone()
        }
    }

    fn draft(name: &str, phone: &str, address: &str) -> BookingDraft {
        BookingDraft {
            name: name.to_string(),
            phone: phone.to_string(),
            address: address.to_string(),
            ..BookingDraft::default()
        }
    }

    #[test]
    fn test_validate_names_missing_fields() {
        let collector = BookingCollector::new(BookingPolicy::lenient());
        let err = collector.validate(&draft("", "555", "")).unwrap_err();
        match err {
            ShindanError::MissingFields { fields } => assert_eq!(fields, vec!["name"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_strict_policy_requires_address() {
        let collector = BookingCollector::new(BookingPolicy::strict());
        let err = collector.validate(&draft("", "555", "")).unwrap_err();
        match err {
            ShindanError::MissingFields { fields } => {
                assert_eq!(fields, vec!["name", "address"])
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_accepts_complete_draft() {
        let collector = BookingCollector::new(BookingPolicy::strict());
        let record = collector
            .validate(&draft("Tanaka", "090-1111-2222", "Osaki"))
            .unwrap();
        assert_eq!(record.name, "Tanaka");
        assert_eq!(record.phone, "090-1111-2222");
        assert_eq!(record.address, "Osaki");
    }

    #[tokio::test]
    async fn test_submit_success_completes_session() {
        let collector = BookingCollector::new(BookingPolicy::lenient());
        let notifier = StubNotifier::new(Ok(NotifyOutcome::Delivered));
        let mut session = Session::new();
        session.current_step = StepRef::Booking;
        session.booking_draft = draft("Tanaka", "090-1111-2222", "");

        let record = collector.validate(&session.booking_draft).unwrap();
        let reference = collector
            .submit(&mut session, &record, &notifier)
            .await
            .unwrap();

        assert!(!reference.is_empty());
        assert_eq!(session.current_step, StepRef::Completed);
        assert_eq!(session.booking_ack.as_deref(), Some("Tanaka様"));
        assert!(session.booking_draft.name.is_empty());
    }

    #[tokio::test]
    async fn test_submit_skipped_channel_still_completes() {
        let collector = BookingCollector::new(BookingPolicy::lenient());
        let notifier = StubNotifier::new(Ok(NotifyOutcome::Skipped));
        let mut session = Session::new();
        session.current_step = StepRef::Booking;

        let record = collector
            .validate(&draft("Tanaka", "090-1111-2222", ""))
            .unwrap();
        collector
            .submit(&mut session, &record, &notifier)
            .await
            .unwrap();
        assert_eq!(session.current_step, StepRef::Completed);
    }

    #[tokio::test]
    async fn test_submit_failure_preserves_draft_and_state() {
        let collector = BookingCollector::new(BookingPolicy::lenient());
        let notifier = StubNotifier::new(Err(ShindanError::notification("smtp down")));
        let mut session = Session::new();
        session.current_step = StepRef::Booking;
        session.booking_draft = draft("Tanaka", "090-1111-2222", "");

        let record = collector.validate(&session.booking_draft).unwrap();
        let err = collector
            .submit(&mut session, &record, &notifier)
            .await
            .unwrap_err();

        assert!(err.is_notification());
        assert_eq!(session.current_step, StepRef::Booking);
        assert_eq!(session.booking_draft.name, "Tanaka");
        assert!(session.booking_ack.is_none());
    }

    #[tokio::test]
    async fn test_prefill_address_fills_empty_field_only() {
        let collector = BookingCollector::new(BookingPolicy::lenient());
        let lookup = StubLookup(Ok(Some("宮城県大崎市古川".to_string())));

        let mut empty = BookingDraft {
            postal_code: "989-6100".to_string(),
            ..BookingDraft::default()
        };
        collector.prefill_address(&mut empty, &lookup).await;
        assert_eq!(empty.address, "宮城県大崎市古川");

        let mut filled = BookingDraft {
            postal_code: "989-6100".to_string(),
            address: "entered by hand".to_string(),
            ..BookingDraft::default()
        };
        collector.prefill_address(&mut filled, &lookup).await;
        assert_eq!(filled.address, "entered by hand");
    }

    #[tokio::test]
    async fn test_prefill_address_swallows_lookup_errors() {
        let collector = BookingCollector::new(BookingPolicy::lenient());
        let lookup = StubLookup(Err(ShindanError::lookup("service unavailable")));
        let mut draft = BookingDraft {
            postal_code: "989-6100".to_string(),
            ..BookingDraft::default()
        };
        collector.prefill_address(&mut draft, &lookup).await;
        assert!(draft.address.is_empty());
    }
}
