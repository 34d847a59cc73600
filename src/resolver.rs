//! Inventory resolution.
//!
//! Issues exactly one inventory query per call and stamps the result into an
//! [`InventorySnapshot`]. A query failure is surfaced to the caller, never
//! retried here; the snapshot reflects inventory at query time only.

use crate::clock::Clock;
use crate::error::Result;
use crate::providers::InventoryQuery;
use crate::types::{BloodComponent, BloodType, InventorySnapshot};

/// Query available volume for a (blood type, component) pair.
///
/// Sufficiency against a requested volume is decided by
/// [`InventorySnapshot::covers`], always as a numeric comparison.
///
/// # Errors
///
/// Propagates [`WorkflowError::InventoryUnavailable`](crate::error::WorkflowError::InventoryUnavailable)
/// from the inventory capability unchanged.
pub async fn resolve<I: InventoryQuery>(
    inventory: &I,
    clock: &dyn Clock,
    blood_type: BloodType,
    component: BloodComponent,
) -> Result<InventorySnapshot> {
    let available = inventory.available_volume(blood_type, component).await?;
    Ok(InventorySnapshot {
        blood_type,
        component,
        // The inventory service reports a non-negative figure; clamp in case
        // an upstream correction briefly reports a negative balance.
        available_volume_ml: available.max(0.0),
        queried_at: clock.now(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::error::WorkflowError;
    use crate::mocks::MockInventory;
    use crate::testing::test_clock;
    use crate::types::VolumeMl;
    use proptest::prelude::*;

    #[tokio::test]
    async fn issues_exactly_one_query_per_call() {
        let inventory = MockInventory::new();
        inventory.set_available(BloodType::APos, BloodComponent::WholeBlood, 300.0);

        let snapshot = resolve(
            &inventory,
            &test_clock(),
            BloodType::APos,
            BloodComponent::WholeBlood,
        )
        .await
        .unwrap();

        assert_eq!(snapshot.available_volume_ml, 300.0);
        assert_eq!(inventory.query_count(), 1);
    }

    #[tokio::test]
    async fn failure_is_surfaced_without_retry() {
        let inventory = MockInventory::new();
        inventory.fail_with("connection refused");

        let err = resolve(
            &inventory,
            &test_clock(),
            BloodType::ONeg,
            BloodComponent::Plasma,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, WorkflowError::InventoryUnavailable { .. }));
        assert!(err.is_transient());
        assert_eq!(inventory.query_count(), 1);
    }

    #[tokio::test]
    async fn unknown_pair_resolves_to_zero_available() {
        let inventory = MockInventory::new();
        let snapshot = resolve(
            &inventory,
            &test_clock(),
            BloodType::BNeg,
            BloodComponent::Platelet,
        )
        .await
        .unwrap();
        assert_eq!(snapshot.available_volume_ml, 0.0);
    }

    proptest! {
        /// Sufficiency is `available >= requested` under numeric comparison.
        #[test]
        fn sufficiency_matches_numeric_comparison(
            available in 0.0f64..100_000.0,
            requested in 0.1f64..100_000.0,
        ) {
            let snapshot = InventorySnapshot {
                blood_type: BloodType::APos,
                component: BloodComponent::WholeBlood,
                available_volume_ml: available,
                queried_at: chrono::Utc::now(),
            };
            let volume = VolumeMl::new(requested).unwrap();
            prop_assert_eq!(snapshot.covers(volume), available >= requested);
        }
    }
}
