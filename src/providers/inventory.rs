//! Inventory query capability.

use crate::error::Result;
use crate::types::{BloodComponent, BloodType};

/// Read access to the external blood inventory.
///
/// Inventory changes continuously; results are valid at query time only and
/// must never be cached across workflow runs.
pub trait InventoryQuery: Send + Sync {
    /// Available volume in millilitres for a (blood type, component) pair.
    ///
    /// Must return promptly or fail with a transient-error signal; no
    /// partial results.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InventoryUnavailable`](crate::error::WorkflowError::InventoryUnavailable)
    /// if the inventory service cannot be reached or rejects the query.
    fn available_volume(
        &self,
        blood_type: BloodType,
        component: BloodComponent,
    ) -> impl std::future::Future<Output = Result<f64>> + Send;
}
