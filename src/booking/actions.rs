//! Actions for the booking workflow.

use crate::types::{BloodRequest, InventorySnapshot, MobilizationRequest, RequestId};
use serde::{Deserialize, Serialize};

/// Actions processed by the [`BookingReducer`](crate::booking::BookingReducer).
///
/// Commands come from the caller; the remaining variants are feedback events
/// produced by effect execution (capability call results).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BookingAction {
    // ═══════════════════════════════════════════════════════════
    // Commands (caller-initiated)
    // ═══════════════════════════════════════════════════════════
    /// Submit a blood request, starting a fresh workflow run.
    SubmitRequest {
        /// Identifier for the new run
        request_id: RequestId,
        /// The validated request
        request: BloodRequest,
    },

    /// Explicitly accept the mobilization offer after a shortfall.
    ///
    /// Never issued automatically: insufficiency only surfaces the offer.
    RequestMobilization {
        /// Run to mobilize donors for
        request_id: RequestId,
    },

    /// Abandon a run at any non-terminal state. No side effects; an already
    /// issued mobilization request cannot be rescinded.
    AbandonRequest {
        /// Run to abandon
        request_id: RequestId,
    },

    // ═══════════════════════════════════════════════════════════
    // Events (effect feedback)
    // ═══════════════════════════════════════════════════════════
    /// The inventory query returned a snapshot.
    InventoryResolved {
        /// Run the snapshot belongs to
        request_id: RequestId,
        /// Inventory at query time
        snapshot: InventorySnapshot,
    },

    /// The inventory query failed.
    InventoryFailed {
        /// Run the failure belongs to
        request_id: RequestId,
        /// Originating failure reason
        reason: String,
    },

    /// The booking command succeeded.
    BookingConfirmed {
        /// Run the booking belongs to
        request_id: RequestId,
    },

    /// The booking command failed.
    BookingRejected {
        /// Run the failure belongs to
        request_id: RequestId,
        /// Originating failure reason
        reason: String,
    },

    /// The mobilization command was accepted.
    MobilizationAccepted {
        /// Run the mobilization belongs to
        request_id: RequestId,
        /// The recorded one-shot request
        mobilization: MobilizationRequest,
    },

    /// The mobilization command failed.
    MobilizationRejected {
        /// Run the failure belongs to
        request_id: RequestId,
        /// Originating failure reason
        reason: String,
    },
}

impl BookingAction {
    /// The run this action targets.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        match self {
            Self::SubmitRequest { request_id, .. }
            | Self::RequestMobilization { request_id }
            | Self::AbandonRequest { request_id }
            | Self::InventoryResolved { request_id, .. }
            | Self::InventoryFailed { request_id, .. }
            | Self::BookingConfirmed { request_id }
            | Self::BookingRejected { request_id, .. }
            | Self::MobilizationAccepted { request_id, .. }
            | Self::MobilizationRejected { request_id, .. } => *request_id,
        }
    }
}
