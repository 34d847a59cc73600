//! Reducer for the booking workflow.

use crate::booking::environment::BookingEnvironment;
use crate::booking::{BookingAction, BookingOutcome, BookingPhase, BookingState, BookingWorkflow};
use crate::effect::Effect;
use crate::providers::{BookingCommand, InventoryQuery, MobilizationCommand};
use crate::reducer::Reducer;
use crate::resolver;
use crate::types::MobilizationRequest;
use chrono::{DateTime, Utc};
use smallvec::{SmallVec, smallvec};

/// Reducer driving blood requests from submission to a terminal outcome.
///
/// Every transition is precondition-guarded: actions arriving for an unknown
/// run, or in a phase that does not expect them, are logged and ignored
/// rather than corrupting the run. `MobilizationRequested` is therefore
/// unreachable without an observed shortfall, and `Failed` is terminal.
#[derive(Debug, Clone)]
pub struct BookingReducer<I, B, M> {
    /// Phantom data to hold the environment's provider types.
    _phantom: std::marker::PhantomData<(I, B, M)>,
}

impl<I, B, M> BookingReducer<I, B, M> {
    /// Create a new booking reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<I, B, M> Default for BookingReducer<I, B, M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mark a run failed with the originating reason preserved for display.
fn fail(workflow: &mut BookingWorkflow, reason: String, now: DateTime<Utc>) {
    tracing::warn!(request_id = %workflow.request_id, %reason, "workflow failed");
    workflow.phase = BookingPhase::Failed;
    workflow.outcome = Some(BookingOutcome::Failed {
        reason: reason.clone(),
    });
    workflow.error = Some(reason);
    workflow.completed_at = Some(now);
}

impl<I, B, M> Reducer for BookingReducer<I, B, M>
where
    I: InventoryQuery + Clone + Send + Sync + 'static,
    B: BookingCommand + Clone + Send + Sync + 'static,
    M: MobilizationCommand + Clone + Send + Sync + 'static,
{
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment<I, B, M>;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // SubmitRequest: Idle → Searching, one fresh inventory query
            // ═══════════════════════════════════════════════════════════════
            BookingAction::SubmitRequest {
                request_id,
                request,
            } => {
                if state.get(&request_id).is_some() {
                    tracing::warn!(%request_id, "duplicate submission ignored");
                    return smallvec![Effect::None];
                }

                let mut workflow = BookingWorkflow::new(request_id, request.clone(), env.clock().now());
                workflow.phase = BookingPhase::Searching;
                state.insert(request_id, workflow);

                tracing::info!(
                    %request_id,
                    blood_type = %request.blood_type,
                    component = %request.component,
                    volume = %request.volume_ml,
                    "searching inventory"
                );

                let inventory = env.inventory.clone();
                let clock = env.clock_handle();
                let blood_type = request.blood_type;
                let component = request.component;

                smallvec![Effect::Future(Box::pin(async move {
                    match resolver::resolve(&inventory, clock.as_ref(), blood_type, component).await
                    {
                        Ok(snapshot) => Some(BookingAction::InventoryResolved {
                            request_id,
                            snapshot,
                        }),
                        Err(err) => Some(BookingAction::InventoryFailed {
                            request_id,
                            reason: err.to_string(),
                        }),
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // InventoryResolved: Searching → Sufficient (book immediately)
            //                               → MobilizationOffered (surface only)
            // ═══════════════════════════════════════════════════════════════
            BookingAction::InventoryResolved {
                request_id,
                snapshot,
            } => {
                let Some(workflow) = state.get_mut(&request_id) else {
                    tracing::warn!(%request_id, "inventory result for unknown run");
                    return smallvec![Effect::None];
                };
                if workflow.phase != BookingPhase::Searching {
                    tracing::warn!(%request_id, phase = ?workflow.phase, "stale inventory result ignored");
                    return smallvec![Effect::None];
                }

                workflow.snapshot = Some(snapshot);

                if snapshot.covers(workflow.request.volume_ml) {
                    workflow.phase = BookingPhase::Sufficient;
                    tracing::info!(
                        %request_id,
                        available = snapshot.available_volume_ml,
                        "inventory sufficient, issuing booking"
                    );

                    let booking = env.booking.clone();
                    let request = workflow.request.clone();

                    smallvec![Effect::Future(Box::pin(async move {
                        match booking.create_booking(&request).await {
                            Ok(()) => Some(BookingAction::BookingConfirmed { request_id }),
                            Err(err) => Some(BookingAction::BookingRejected {
                                request_id,
                                reason: err.to_string(),
                            }),
                        }
                    }))]
                } else {
                    // The shortfall is surfaced; mobilization is offered but
                    // never triggered without explicit caller action.
                    workflow.phase = BookingPhase::MobilizationOffered;
                    workflow.outcome = Some(BookingOutcome::MobilizationOffered);
                    tracing::info!(
                        %request_id,
                        available = snapshot.available_volume_ml,
                        shortfall = snapshot.shortfall_ml(workflow.request.volume_ml),
                        "inventory insufficient, mobilization offered"
                    );
                    smallvec![Effect::None]
                }
            }

            // ═══════════════════════════════════════════════════════════════
            // InventoryFailed: Searching → Failed
            // ═══════════════════════════════════════════════════════════════
            BookingAction::InventoryFailed { request_id, reason } => {
                let Some(workflow) = state.get_mut(&request_id) else {
                    tracing::warn!(%request_id, "inventory failure for unknown run");
                    return smallvec![Effect::None];
                };
                if workflow.phase != BookingPhase::Searching {
                    tracing::warn!(%request_id, phase = ?workflow.phase, "stale inventory failure ignored");
                    return smallvec![Effect::None];
                }
                fail(workflow, reason, env.clock().now());
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // BookingConfirmed / BookingRejected: Sufficient → Booked | Failed
            // ═══════════════════════════════════════════════════════════════
            BookingAction::BookingConfirmed { request_id } => {
                let Some(workflow) = state.get_mut(&request_id) else {
                    tracing::warn!(%request_id, "booking confirmation for unknown run");
                    return smallvec![Effect::None];
                };
                if workflow.phase != BookingPhase::Sufficient {
                    tracing::warn!(%request_id, phase = ?workflow.phase, "unexpected booking confirmation ignored");
                    return smallvec![Effect::None];
                }
                workflow.phase = BookingPhase::Booked;
                workflow.outcome = Some(BookingOutcome::Booked);
                workflow.completed_at = Some(env.clock().now());
                tracing::info!(%request_id, "booked");
                smallvec![Effect::None]
            }

            BookingAction::BookingRejected { request_id, reason } => {
                let Some(workflow) = state.get_mut(&request_id) else {
                    tracing::warn!(%request_id, "booking rejection for unknown run");
                    return smallvec![Effect::None];
                };
                if workflow.phase != BookingPhase::Sufficient {
                    tracing::warn!(%request_id, phase = ?workflow.phase, "unexpected booking rejection ignored");
                    return smallvec![Effect::None];
                }
                fail(workflow, reason, env.clock().now());
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // RequestMobilization: MobilizationOffered + explicit caller action
            // ═══════════════════════════════════════════════════════════════
            BookingAction::RequestMobilization { request_id } => {
                let Some(workflow) = state.get_mut(&request_id) else {
                    tracing::warn!(%request_id, "mobilization request for unknown run");
                    return smallvec![Effect::None];
                };
                if workflow.phase != BookingPhase::MobilizationOffered {
                    // Unreachable without an observed shortfall.
                    tracing::warn!(%request_id, phase = ?workflow.phase, "mobilization not offered, request ignored");
                    return smallvec![Effect::None];
                }

                let record = MobilizationRequest {
                    blood_type: workflow.request.blood_type,
                    volume_ml: workflow.request.volume_ml,
                    created_at: env.clock().now(),
                };
                tracing::info!(
                    %request_id,
                    blood_type = %record.blood_type,
                    volume = %record.volume_ml,
                    "issuing mobilization command"
                );

                let mobilization = env.mobilization.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match mobilization
                        .request_mobilization(record.blood_type, record.volume_ml)
                        .await
                    {
                        Ok(()) => Some(BookingAction::MobilizationAccepted {
                            request_id,
                            mobilization: record,
                        }),
                        Err(err) => Some(BookingAction::MobilizationRejected {
                            request_id,
                            reason: err.to_string(),
                        }),
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // MobilizationAccepted / MobilizationRejected
            // ═══════════════════════════════════════════════════════════════
            BookingAction::MobilizationAccepted {
                request_id,
                mobilization,
            } => {
                let Some(workflow) = state.get_mut(&request_id) else {
                    tracing::warn!(%request_id, "mobilization acceptance for unknown run");
                    return smallvec![Effect::None];
                };
                if workflow.phase != BookingPhase::MobilizationOffered {
                    tracing::warn!(%request_id, phase = ?workflow.phase, "unexpected mobilization acceptance ignored");
                    return smallvec![Effect::None];
                }
                workflow.phase = BookingPhase::MobilizationRequested;
                workflow.mobilization = Some(mobilization);
                workflow.outcome = Some(BookingOutcome::MobilizationRequested);
                workflow.completed_at = Some(env.clock().now());
                tracing::info!(%request_id, "mobilization requested");
                smallvec![Effect::None]
            }

            BookingAction::MobilizationRejected { request_id, reason } => {
                let Some(workflow) = state.get_mut(&request_id) else {
                    tracing::warn!(%request_id, "mobilization rejection for unknown run");
                    return smallvec![Effect::None];
                };
                if workflow.phase != BookingPhase::MobilizationOffered {
                    tracing::warn!(%request_id, phase = ?workflow.phase, "unexpected mobilization rejection ignored");
                    return smallvec![Effect::None];
                }
                fail(workflow, reason, env.clock().now());
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // AbandonRequest: any non-terminal phase, no side effects
            // ═══════════════════════════════════════════════════════════════
            BookingAction::AbandonRequest { request_id } => {
                let Some(workflow) = state.get_mut(&request_id) else {
                    tracing::warn!(%request_id, "abandon for unknown run");
                    return smallvec![Effect::None];
                };
                if workflow.is_terminal() {
                    tracing::warn!(%request_id, phase = ?workflow.phase, "abandon after terminal phase ignored");
                    return smallvec![Effect::None];
                }
                workflow.phase = BookingPhase::Abandoned;
                workflow.completed_at = Some(env.clock().now());
                tracing::info!(%request_id, "abandoned");
                smallvec![Effect::None]
            }
        }
    }
}
