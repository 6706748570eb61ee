//! Booking domain models.

use serde::{Deserialize, Serialize};

/// Contact/problem fields as entered by the user, before validation.
///
/// All fields are plain strings so a failed submit can hand the exact input
/// back to the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Free-text symptom description.
    pub detail: String,
    /// Used only for the best-effort address prefill.
    pub postal_code: String,
}

/// Which fields a booking must carry before submission.
///
/// Name and phone are always required; whether the address is required too
/// depends on deployment policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPolicy {
    pub require_address: bool,
}

impl BookingPolicy {
    /// Name and phone only.
    pub fn lenient() -> Self {
        Self {
            require_address: false,
        }
    }

    /// Name, phone, and address.
    pub fn strict() -> Self {
        Self {
            require_address: true,
        }
    }
}

/// A validated booking, ready for the notification channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub detail: String,
}
