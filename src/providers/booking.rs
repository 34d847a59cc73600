//! Booking command capability.

use crate::error::Result;
use crate::types::BloodRequest;

/// Write access to the external booking service.
pub trait BookingCommand: Send + Sync {
    /// Issue a booking for a request whose volume inventory covers.
    ///
    /// The external inventory service serializes its own writes; a request
    /// that raced another consumer past the snapshot read is rejected here,
    /// not reconciled by the workflow.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::BookingFailed`](crate::error::WorkflowError::BookingFailed)
    /// if the booking service cannot be reached or rejects the command.
    fn create_booking(
        &self,
        request: &BloodRequest,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
