//! Mock event registry for testing.

use crate::error::{Result, WorkflowError};
use crate::mocks::lock;
use crate::providers::EventRegistry;
use crate::types::{DonationEvent, DonationPeriod, EventId, UserId};
use chrono::NaiveDate;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock event registry.
///
/// Serves an in-memory period/event catalog, records registrations (bumping
/// the event's donor count like the real registry would) and can be switched
/// into a failure mode.
#[derive(Debug, Clone, Default)]
pub struct MockEventRegistry {
    periods: Arc<Mutex<Vec<DonationPeriod>>>,
    events: Arc<Mutex<Vec<DonationEvent>>>,
    registrations: Arc<Mutex<Vec<(EventId, UserId)>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockEventRegistry {
    /// Create an empty mock registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a period to the catalog.
    pub fn add_period(&self, period: DonationPeriod) {
        lock(&self.periods).push(period);
    }

    /// Add an event to the catalog.
    pub fn add_event(&self, event: DonationEvent) {
        lock(&self.events).push(event);
    }

    /// Make every subsequent call fail with `reason`.
    pub fn fail_with(&self, reason: &str) {
        *lock(&self.failure) = Some(reason.to_string());
    }

    /// Every recorded (event, user) registration, in order.
    #[must_use]
    pub fn registrations(&self) -> Vec<(EventId, UserId)> {
        lock(&self.registrations).clone()
    }

    /// Number of registrations recorded so far.
    #[must_use]
    pub fn registration_count(&self) -> usize {
        lock(&self.registrations).len()
    }

    fn check_failure(&self) -> Result<()> {
        match lock(&self.failure).clone() {
            Some(reason) => Err(WorkflowError::RegistryUnavailable { reason }),
            None => Ok(()),
        }
    }
}

impl EventRegistry for MockEventRegistry {
    fn list_events(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Future<Output = Result<Vec<DonationEvent>>> + Send {
        let this = self.clone();

        async move {
            this.check_failure()?;
            Ok(lock(&this.events)
                .iter()
                .filter(|event| event.start_date >= from && event.start_date <= to)
                .cloned()
                .collect())
        }
    }

    fn list_periods(&self) -> impl Future<Output = Result<Vec<DonationPeriod>>> + Send {
        let this = self.clone();

        async move {
            this.check_failure()?;
            Ok(lock(&this.periods).clone())
        }
    }

    fn register_for_event(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();

        async move {
            this.check_failure()?;

            let mut events = lock(&this.events);
            let Some(event) = events.iter_mut().find(|event| event.id == event_id) else {
                return Err(WorkflowError::RegistryUnavailable {
                    reason: format!("unknown event {event_id}"),
                });
            };
            event.current_donors += 1;
            drop(events);

            lock(&this.registrations).push((event_id, user_id));
            Ok(())
        }
    }
}
