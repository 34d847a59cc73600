//! The core trait for business logic.
//!
//! Reducers are pure functions `(State, Action, Environment) → (State, Effects)`.
//! They contain all decision logic, are deterministic given their inputs, and
//! never perform I/O themselves; capability calls are returned as
//! [`Effect`](crate::effect::Effect) descriptions.

use crate::effect::Effect;
use smallvec::SmallVec;

/// The Reducer trait - core abstraction for business logic.
///
/// # Type Parameters
///
/// - `State`: the domain state this reducer operates on
/// - `Action`: the action type this reducer processes
/// - `Environment`: the injected dependencies this reducer needs
pub trait Reducer {
    /// The state type this reducer operates on.
    type State;

    /// The action type this reducer processes.
    type Action;

    /// The environment type with injected dependencies.
    type Environment;

    /// Reduce an action into state changes and effects.
    ///
    /// This:
    /// 1. Validates the action against the current state
    /// 2. Updates state in place
    /// 3. Returns effect descriptions to be executed by the store
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]>;
}
