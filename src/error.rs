//! Error types for the supply resolution and mobilization workflow.
//!
//! Capacity-exceeded and unauthenticated-caller situations are deliberately
//! NOT errors: they are normal outcomes of the capacity gate
//! ([`RegistrationAccess`](crate::capacity::RegistrationAccess)) routed by the
//! caller, not failures of this core.

use thiserror::Error;

/// Result type alias for workflow operations.
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Error taxonomy for the workflow core.
///
/// Validation errors are raised before any external call is made; transient
/// service errors surface a capability failure to the caller with the
/// originating reason preserved. The core never retries silently.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WorkflowError {
    // ═══════════════════════════════════════════════════════════
    // Validation Errors (rejected before any external call)
    // ═══════════════════════════════════════════════════════════

    /// Requested volume could not be parsed as a number.
    #[error("requested volume is not a number: {input:?}")]
    UnparsableVolume {
        /// The raw input that failed to parse
        input: String,
    },

    /// Requested volume must be strictly positive.
    #[error("requested volume must be positive, got {volume_ml}")]
    NonPositiveVolume {
        /// The rejected value in millilitres
        volume_ml: f64,
    },

    /// Blood type is not one of the eight supported groups.
    #[error("unknown blood type: {input:?}")]
    UnknownBloodType {
        /// The raw input that failed to parse
        input: String,
    },

    /// Component is not one of the four supported fractions.
    #[error("unknown blood component: {input:?}")]
    UnknownComponent {
        /// The raw input that failed to parse
        input: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Transient Service Errors (capability call failed)
    // ═══════════════════════════════════════════════════════════

    /// Inventory query failed.
    #[error("inventory query failed: {reason}")]
    InventoryUnavailable {
        /// Failure reason reported by the inventory capability
        reason: String,
    },

    /// Booking command was rejected or failed.
    #[error("booking command failed: {reason}")]
    BookingFailed {
        /// Failure reason reported by the booking capability
        reason: String,
    },

    /// Mobilization command was rejected or failed.
    #[error("mobilization command failed: {reason}")]
    MobilizationFailed {
        /// Failure reason reported by the mobilization capability
        reason: String,
    },

    /// Event registry call failed.
    #[error("event registry call failed: {reason}")]
    RegistryUnavailable {
        /// Failure reason reported by the registry capability
        reason: String,
    },
}

impl WorkflowError {
    /// Returns `true` if this error is due to a malformed request.
    ///
    /// Validation errors are raised before any external call.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hemoflow::WorkflowError;
    /// assert!(WorkflowError::NonPositiveVolume { volume_ml: -1.0 }.is_validation());
    /// assert!(!WorkflowError::InventoryUnavailable { reason: "timeout".into() }.is_validation());
    /// ```
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnparsableVolume { .. }
                | Self::NonPositiveVolume { .. }
                | Self::UnknownBloodType { .. }
                | Self::UnknownComponent { .. }
        )
    }

    /// Returns `true` if this error reflects a capability failure.
    ///
    /// Transient errors map to a terminal `Failed` workflow state; retry
    /// policy, if any, belongs to the capability clients.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::InventoryUnavailable { .. }
                | Self::BookingFailed { .. }
                | Self::MobilizationFailed { .. }
                | Self::RegistryUnavailable { .. }
        )
    }
}
