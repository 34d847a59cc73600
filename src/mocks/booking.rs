//! Mock booking service for testing.

use crate::error::{Result, WorkflowError};
use crate::mocks::lock;
use crate::providers::BookingCommand;
use crate::types::BloodRequest;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock booking service.
///
/// Records every booking command and can be switched into a failure mode.
#[derive(Debug, Clone, Default)]
pub struct MockBookingService {
    bookings: Arc<Mutex<Vec<BloodRequest>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockBookingService {
    /// Create a new mock booking service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent command fail with `reason`.
    pub fn fail_with(&self, reason: &str) {
        *lock(&self.failure) = Some(reason.to_string());
    }

    /// Number of booking commands issued so far.
    #[must_use]
    pub fn booking_count(&self) -> usize {
        lock(&self.bookings).len()
    }

    /// Every booked request, in order.
    #[must_use]
    pub fn bookings(&self) -> Vec<BloodRequest> {
        lock(&self.bookings).clone()
    }
}

impl BookingCommand for MockBookingService {
    fn create_booking(&self, request: &BloodRequest) -> impl Future<Output = Result<()>> + Send {
        let bookings = Arc::clone(&self.bookings);
        let failure = Arc::clone(&self.failure);
        let request = request.clone();

        async move {
            if let Some(reason) = lock(&failure).clone() {
                return Err(WorkflowError::BookingFailed { reason });
            }
            lock(&bookings).push(request);
            Ok(())
        }
    }
}
