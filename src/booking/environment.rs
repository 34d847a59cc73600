//! Booking workflow environment.
//!
//! All external dependencies of the booking reducer, injected as traits.

use crate::clock::Clock;
use crate::providers::{BookingCommand, InventoryQuery, MobilizationCommand};
use std::sync::Arc;

/// Environment for the booking reducer.
///
/// # Type Parameters
///
/// - `I`: inventory query capability
/// - `B`: booking command capability
/// - `M`: mobilization command capability
#[derive(Clone)]
pub struct BookingEnvironment<I, B, M>
where
    I: InventoryQuery + Clone,
    B: BookingCommand + Clone,
    M: MobilizationCommand + Clone,
{
    /// Inventory query client.
    pub inventory: I,

    /// Booking command client.
    pub booking: B,

    /// Mobilization command client.
    pub mobilization: M,

    clock: Arc<dyn Clock>,
}

impl<I, B, M> BookingEnvironment<I, B, M>
where
    I: InventoryQuery + Clone,
    B: BookingCommand + Clone,
    M: MobilizationCommand + Clone,
{
    /// Create a new booking environment.
    #[must_use]
    pub fn new(inventory: I, booking: B, mobilization: M, clock: Arc<dyn Clock>) -> Self {
        Self {
            inventory,
            booking,
            mobilization,
            clock,
        }
    }

    /// Clock for timestamping transitions.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Shared clock handle for effects that outlive the reduce call.
    #[must_use]
    pub fn clock_handle(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}
