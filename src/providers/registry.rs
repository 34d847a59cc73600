//! Event registry capability.

use crate::error::Result;
use crate::types::{DonationEvent, DonationPeriod, EventId, UserId};
use chrono::NaiveDate;

/// Access to the external registry of donation periods and scheduled events.
///
/// The registry owns the `current_donors <= max_donors` invariant; the
/// capacity gate re-checks it defensively before a registration command is
/// issued.
pub trait EventRegistry: Send + Sync {
    /// Scheduled events whose day falls within `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::RegistryUnavailable`](crate::error::WorkflowError::RegistryUnavailable)
    /// if the registry cannot be reached.
    fn list_events(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<DonationEvent>>> + Send;

    /// The full donation period catalog.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::RegistryUnavailable`](crate::error::WorkflowError::RegistryUnavailable)
    /// if the registry cannot be reached.
    fn list_periods(&self) -> impl std::future::Future<Output = Result<Vec<DonationPeriod>>> + Send;

    /// Register a user for an event.
    ///
    /// Only called after the capacity gate allowed the registration.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::RegistryUnavailable`](crate::error::WorkflowError::RegistryUnavailable)
    /// if the registry cannot be reached or rejects the registration.
    fn register_for_event(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
