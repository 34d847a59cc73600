//! Store for the booking workflow.

use crate::booking::environment::BookingEnvironment;
use crate::booking::{
    BookingAction, BookingOutcome, BookingPhase, BookingReducer, BookingState, BookingWorkflow,
};
use crate::effect::Effect;
use crate::providers::{BookingCommand, InventoryQuery, MobilizationCommand};
use crate::reducer::Reducer;
use crate::types::RequestId;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Store driving booking workflows.
///
/// Owns the state behind an `RwLock`, runs the reducer and executes the
/// returned effects, feeding any resulting action back into the reducer.
/// Effects are awaited before [`dispatch`](BookingStore::dispatch) returns,
/// so a submitted request has settled into `Sufficient`-and-booked,
/// `MobilizationOffered` or `Failed` by the time the call completes.
///
/// The store performs no retries and keeps no dead-letter queue: a failed
/// capability call is a terminal `Failed` run by design.
pub struct BookingStore<I, B, M>
where
    I: InventoryQuery + Clone + Send + Sync + 'static,
    B: BookingCommand + Clone + Send + Sync + 'static,
    M: MobilizationCommand + Clone + Send + Sync + 'static,
{
    state: Arc<RwLock<BookingState>>,
    reducer: BookingReducer<I, B, M>,
    env: BookingEnvironment<I, B, M>,
}

impl<I, B, M> BookingStore<I, B, M>
where
    I: InventoryQuery + Clone + Send + Sync + 'static,
    B: BookingCommand + Clone + Send + Sync + 'static,
    M: MobilizationCommand + Clone + Send + Sync + 'static,
{
    /// Create a new booking store.
    #[must_use]
    pub fn new(environment: BookingEnvironment<I, B, M>) -> Self {
        Self {
            state: Arc::new(RwLock::new(BookingState::new())),
            reducer: BookingReducer::new(),
            env: environment,
        }
    }

    /// Dispatch an action and execute the resulting effects to quiescence.
    ///
    /// The write lock is held only while the reducer runs, never across a
    /// capability call, so concurrent runs make progress independently.
    pub async fn dispatch(&self, action: BookingAction) {
        let mut queue = VecDeque::new();
        queue.push_back(action);

        while let Some(action) = queue.pop_front() {
            let effects = {
                let mut state = self.state.write().await;
                self.reducer.reduce(&mut state, action, &self.env)
            };

            for effect in effects {
                match effect {
                    Effect::None => {}
                    Effect::Future(future) => {
                        if let Some(next) = future.await {
                            queue.push_back(next);
                        }
                    }
                }
            }
        }
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> BookingState {
        self.state.read().await.clone()
    }

    /// A specific run by request id.
    pub async fn get(&self, request_id: &RequestId) -> Option<BookingWorkflow> {
        self.state.read().await.get(request_id).cloned()
    }

    /// Current phase of a run.
    pub async fn phase(&self, request_id: &RequestId) -> Option<BookingPhase> {
        self.state
            .read()
            .await
            .get(request_id)
            .map(|workflow| workflow.phase)
    }

    /// Outcome of a run, once one is known.
    pub async fn outcome(&self, request_id: &RequestId) -> Option<BookingOutcome> {
        self.state
            .read()
            .await
            .get(request_id)
            .and_then(|workflow| workflow.outcome.clone())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::mocks::{MockBookingService, MockInventory, MockMobilizationService};
    use crate::testing::test_clock;
    use crate::types::{BloodComponent, BloodRequest, BloodType, VolumeMl};
    use chrono::NaiveDate;

    fn test_store() -> BookingStore<MockInventory, MockBookingService, MockMobilizationService> {
        let env = BookingEnvironment::new(
            MockInventory::new(),
            MockBookingService::new(),
            MockMobilizationService::new(),
            Arc::new(test_clock()),
        );
        BookingStore::new(env)
    }

    fn test_request() -> BloodRequest {
        BloodRequest::new(
            BloodType::APos,
            BloodComponent::WholeBlood,
            VolumeMl::new(200.0).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            None,
        )
    }

    #[tokio::test]
    async fn store_starts_empty() {
        let store = test_store();
        assert!(store.state().await.is_empty());
    }

    #[tokio::test]
    async fn dispatch_tracks_a_run_to_quiescence() {
        let store = test_store();
        let request_id = RequestId::new();

        store
            .dispatch(BookingAction::SubmitRequest {
                request_id,
                request: test_request(),
            })
            .await;

        let state = store.state().await;
        assert_eq!(state.len(), 1);
        // Zero configured inventory: the run settled on the offer.
        assert_eq!(
            store.phase(&request_id).await,
            Some(BookingPhase::MobilizationOffered)
        );
    }
}
