//! Mock inventory service for testing.

use crate::error::{Result, WorkflowError};
use crate::mocks::lock;
use crate::providers::InventoryQuery;
use crate::types::{BloodComponent, BloodType};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock inventory service.
///
/// Holds per-(blood type, component) volumes in memory, records every query
/// and can be switched into a failure mode to simulate a transient outage.
/// Pairs with no configured volume report zero millilitres available.
#[derive(Debug, Clone, Default)]
pub struct MockInventory {
    volumes: Arc<Mutex<HashMap<(BloodType, BloodComponent), f64>>>,
    queries: Arc<Mutex<Vec<(BloodType, BloodComponent)>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockInventory {
    /// Create an empty mock inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the available volume for a pair.
    pub fn set_available(&self, blood_type: BloodType, component: BloodComponent, ml: f64) {
        lock(&self.volumes).insert((blood_type, component), ml);
    }

    /// Make every subsequent query fail with `reason`.
    pub fn fail_with(&self, reason: &str) {
        *lock(&self.failure) = Some(reason.to_string());
    }

    /// Leave failure mode.
    pub fn recover(&self) {
        *lock(&self.failure) = None;
    }

    /// Number of queries issued so far.
    #[must_use]
    pub fn query_count(&self) -> usize {
        lock(&self.queries).len()
    }

    /// Every (blood type, component) pair queried, in order.
    #[must_use]
    pub fn queries(&self) -> Vec<(BloodType, BloodComponent)> {
        lock(&self.queries).clone()
    }
}

impl InventoryQuery for MockInventory {
    fn available_volume(
        &self,
        blood_type: BloodType,
        component: BloodComponent,
    ) -> impl Future<Output = Result<f64>> + Send {
        let volumes = Arc::clone(&self.volumes);
        let queries = Arc::clone(&self.queries);
        let failure = Arc::clone(&self.failure);

        async move {
            lock(&queries).push((blood_type, component));

            if let Some(reason) = lock(&failure).clone() {
                return Err(WorkflowError::InventoryUnavailable { reason });
            }

            Ok(lock(&volumes)
                .get(&(blood_type, component))
                .copied()
                .unwrap_or(0.0))
        }
    }
}
