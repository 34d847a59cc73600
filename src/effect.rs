//! Side effect descriptions.
//!
//! Effects are NOT executed when a reducer returns them. They are values
//! describing what should happen, executed by the store which feeds any
//! resulting action back into the reducer.

use std::future::Future;
use std::pin::Pin;

/// A side effect produced by a reducer.
///
/// # Type Parameters
///
/// - `Action`: the action type an effect can produce (feedback loop)
pub enum Effect<Action> {
    /// No-op effect.
    None,

    /// Arbitrary async computation, typically a capability call.
    ///
    /// Returns `Option<Action>` - if `Some`, the action is fed back into the
    /// reducer by the store.
    Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
}

// Manual Debug implementation since Future doesn't implement Debug
impl<Action> std::fmt::Debug for Effect<Action>
where
    Action: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "Effect::None"),
            Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
        }
    }
}

impl<Action> Effect<Action> {
    /// `true` if this effect performs no work.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }
}
