//! Donor mobilization command capability.

use crate::error::Result;
use crate::types::{BloodType, VolumeMl};

/// Write access to the external donor-mobilization service.
///
/// Mobilization is fire-and-forget from the workflow's perspective: the
/// command recruits donors for a shortfall, and whether donors respond is
/// tracked by a separate external system, never polled here.
pub trait MobilizationCommand: Send + Sync {
    /// Request that donors be mobilized for the given blood group and volume.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::MobilizationFailed`](crate::error::WorkflowError::MobilizationFailed)
    /// if the mobilization service cannot be reached or rejects the command.
    fn request_mobilization(
        &self,
        blood_type: BloodType,
        volume_ml: VolumeMl,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
