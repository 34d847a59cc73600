//! State types for the booking workflow.

use crate::types::{BloodRequest, InventorySnapshot, MobilizationRequest, RequestId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Phase of one booking workflow run.
///
/// An insufficient resolution surfaces directly as [`MobilizationOffered`]:
/// nothing is in flight at that point and the shortfall is waiting on an
/// explicit caller decision.
///
/// [`MobilizationOffered`]: BookingPhase::MobilizationOffered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingPhase {
    /// Request constructed, not yet submitted
    Idle,

    /// Inventory query in flight
    Searching,

    /// Inventory covered the request; booking command in flight
    Sufficient,

    /// Shortfall surfaced to the caller; no command issued
    MobilizationOffered,

    /// Booking command succeeded (terminal)
    Booked,

    /// Mobilization command accepted (terminal)
    MobilizationRequested,

    /// A capability call failed (terminal, never auto-retried)
    Failed,

    /// Caller walked away before a terminal state (terminal)
    Abandoned,
}

impl BookingPhase {
    /// `true` once the run can no longer change.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Booked | Self::MobilizationRequested | Self::Failed | Self::Abandoned
        )
    }
}

/// Final outcome of a booking workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingOutcome {
    /// Inventory covered the request and the booking was placed
    Booked,

    /// Inventory fell short; mobilization was offered but not requested
    MobilizationOffered,

    /// The caller accepted the offer and donors are being mobilized
    MobilizationRequested,

    /// A capability call failed
    Failed {
        /// Originating failure reason, preserved for display
        reason: String,
    },
}

/// One booking workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingWorkflow {
    /// Identifier correlating all steps of this run
    pub request_id: RequestId,

    /// The submitted request (immutable for the whole run)
    pub request: BloodRequest,

    /// Current phase
    pub phase: BookingPhase,

    /// Inventory at query time, once resolved. Never cached across runs.
    pub snapshot: Option<InventorySnapshot>,

    /// The one-shot mobilization record, once accepted
    pub mobilization: Option<MobilizationRequest>,

    /// Outcome, once one is known
    pub outcome: Option<BookingOutcome>,

    /// When the request was submitted
    pub submitted_at: DateTime<Utc>,

    /// When the run reached a terminal phase
    pub completed_at: Option<DateTime<Utc>>,

    /// Failure reason, if the run failed
    pub error: Option<String>,
}

impl BookingWorkflow {
    /// Create a run for a freshly submitted request.
    #[must_use]
    pub const fn new(
        request_id: RequestId,
        request: BloodRequest,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            request_id,
            request,
            phase: BookingPhase::Idle,
            snapshot: None,
            mobilization: None,
            outcome: None,
            submitted_at,
            completed_at: None,
            error: None,
        }
    }

    /// `true` once the run can no longer change.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Millilitres missing against the resolved snapshot, if any.
    ///
    /// `None` until inventory has been resolved; `Some(0.0)` when the
    /// snapshot covered the request.
    #[must_use]
    pub fn shortfall_ml(&self) -> Option<f64> {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.shortfall_ml(self.request.volume_ml))
    }
}

/// State for the booking reducer: all runs indexed by request id.
///
/// Runs are independent; the map exists so concurrent requests can progress
/// without observing each other.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingState {
    workflows: HashMap<RequestId, BookingWorkflow>,
}

impl BookingState {
    /// Create a new empty state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            workflows: HashMap::new(),
        }
    }

    /// Insert a new run.
    pub fn insert(&mut self, request_id: RequestId, workflow: BookingWorkflow) {
        self.workflows.insert(request_id, workflow);
    }

    /// Get a run by request id.
    #[must_use]
    pub fn get(&self, request_id: &RequestId) -> Option<&BookingWorkflow> {
        self.workflows.get(request_id)
    }

    /// Get a mutable reference to a run.
    pub fn get_mut(&mut self, request_id: &RequestId) -> Option<&mut BookingWorkflow> {
        self.workflows.get_mut(request_id)
    }

    /// Remove a run (for cleanup).
    pub fn remove(&mut self, request_id: &RequestId) -> Option<BookingWorkflow> {
        self.workflows.remove(request_id)
    }

    /// All runs.
    #[must_use]
    pub const fn all(&self) -> &HashMap<RequestId, BookingWorkflow> {
        &self.workflows
    }

    /// Number of tracked runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    /// Check if state is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }
}
