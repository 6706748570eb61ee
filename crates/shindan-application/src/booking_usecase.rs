//! Booking use case: prefill, validation, and submission.

use std::sync::Arc;

use shindan_core::Result;
use shindan_core::booking::{BookingCollector, BookingPolicy, Notifier, PostalLookup};
use shindan_core::session::Session;
use shindan_infrastructure::{WebhookNotifier, ZipcloudPostalLookup};

/// Use case for the booking flow at the end of an unresolved triage run.
pub struct BookingUseCase {
    collector: BookingCollector,
    notifier: Arc<dyn Notifier>,
    postal_lookup: Option<Arc<dyn PostalLookup>>,
}

impl BookingUseCase {
    pub fn new(policy: BookingPolicy, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            collector: BookingCollector::new(policy),
            notifier,
            postal_lookup: None,
        }
    }

    /// Wires the default webhook notifier (from `notify.toml`) and the
    /// zipcloud address lookup.
    pub fn from_default_config(policy: BookingPolicy) -> Result<Self> {
        Ok(
            Self::new(policy, Arc::new(WebhookNotifier::from_default_config()?))
                .with_postal_lookup(Arc::new(ZipcloudPostalLookup::new())),
        )
    }

    /// Enables best-effort address prefill.
    pub fn with_postal_lookup(mut self, lookup: Arc<dyn PostalLookup>) -> Self {
        self.postal_lookup = Some(lookup);
        self
    }

    /// Fills the draft's empty address from its postal code, best effort.
    /// Does nothing when no lookup service is wired; never fails.
    pub async fn prefill_address(&self, session: &mut Session) {
        if let Some(lookup) = &self.postal_lookup {
            self.collector
                .prefill_address(&mut session.booking_draft, lookup.as_ref())
                .await;
        }
    }

    /// Validates the session's draft and submits it through the notifier.
    ///
    /// On success the session moves to the completed state and the booking
    /// reference is returned. On validation or delivery failure the session
    /// stays in the booking state with the draft intact, so the caller can
    /// surface the error and let the user retry.
    pub async fn submit(&self, session: &mut Session) -> Result<String> {
        let record = self.collector.validate(&session.booking_draft)?;
        self.collector
            .submit(session, &record, self.notifier.as_ref())
            .await
    }
}
