//! Mock donor-mobilization service for testing.

use crate::error::{Result, WorkflowError};
use crate::mocks::lock;
use crate::providers::MobilizationCommand;
use crate::types::{BloodType, VolumeMl};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock mobilization service.
///
/// Records every mobilization command and can be switched into a failure
/// mode.
#[derive(Debug, Clone, Default)]
pub struct MockMobilizationService {
    requests: Arc<Mutex<Vec<(BloodType, VolumeMl)>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockMobilizationService {
    /// Create a new mock mobilization service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent command fail with `reason`.
    pub fn fail_with(&self, reason: &str) {
        *lock(&self.failure) = Some(reason.to_string());
    }

    /// Number of mobilization commands issued so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Every mobilized (blood type, volume) pair, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<(BloodType, VolumeMl)> {
        lock(&self.requests).clone()
    }
}

impl MobilizationCommand for MockMobilizationService {
    fn request_mobilization(
        &self,
        blood_type: BloodType,
        volume_ml: VolumeMl,
    ) -> impl Future<Output = Result<()>> + Send {
        let requests = Arc::clone(&self.requests);
        let failure = Arc::clone(&self.failure);

        async move {
            if let Some(reason) = lock(&failure).clone() {
                return Err(WorkflowError::MobilizationFailed { reason });
            }
            lock(&requests).push((blood_type, volume_ml));
            Ok(())
        }
    }
}
