//! Mock provider implementations for testing.
//!
//! Simple, in-memory implementations of all capability traits with recorded
//! calls and failure injection, for unit tests, integration tests and the
//! demo binary.

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod booking;
pub mod inventory;
pub mod mobilization;
pub mod registry;
pub mod session;

pub use booking::MockBookingService;
pub use inventory::MockInventory;
pub use mobilization::MockMobilizationService;
pub use registry::MockEventRegistry;
pub use session::MockSession;

/// Lock a mock's interior state, recovering from poisoning.
///
/// A panicking test thread must not wedge every other test that shares the
/// mock, so poisoned locks hand back the inner data as-is.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
