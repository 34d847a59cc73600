//! # Hemoflow
//!
//! Domain core for a blood-donation coordination platform: blood supply
//! resolution with a donor-mobilization fallback, plus the lifecycle
//! classifier and capacity gate the period/event catalog views depend on.
//!
//! ## Architecture
//!
//! The booking workflow is implemented as a reducer with explicit effects:
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! All external capabilities (inventory, booking, mobilization, the event
//! registry and the session) are traits in [`providers`], injected through a
//! [`booking::BookingEnvironment`]. The core never reaches for ambient global
//! state and owns no persistence: every workflow run is an independent
//! request/response sequence over a fresh inventory snapshot.
//!
//! ## Example: sufficient inventory
//!
//! ```rust,ignore
//! use hemoflow::booking::{BookingAction, BookingStore};
//!
//! // 1. Submit a blood request
//! store.dispatch(BookingAction::SubmitRequest { request_id, request }).await;
//!
//! // 2. Inventory covered it: one booking command was issued
//! assert_eq!(store.outcome(&request_id).await, Some(BookingOutcome::Booked));
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod booking;
pub mod capacity;
pub mod catalog;
pub mod classifier;
pub mod clock;
pub mod effect;
pub mod error;
pub mod mocks;
pub mod providers;
pub mod reducer;
pub mod registration;
pub mod resolver;
pub mod testing;
pub mod types;

// Re-export main types for convenience
pub use capacity::{RegistrationAccess, can_register};
pub use classifier::{BucketFilter, LifecycleBucket, classify};
pub use clock::{Clock, SystemClock};
pub use error::{Result, WorkflowError};
pub use types::{
    BloodComponent, BloodRequest, BloodType, Caller, DonationEvent, DonationPeriod,
    InventorySnapshot, MobilizationRequest, PeriodStatus, RequestId, VolumeMl,
};
