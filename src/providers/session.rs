//! Session capability.

use crate::types::Caller;

/// Read access to the caller's session.
///
/// Session state is always injected through this trait at call time; the
/// core never reaches for ambient global session state.
pub trait SessionProvider: Send + Sync {
    /// `true` if the caller holds a valid session.
    fn is_authenticated(&self) -> impl std::future::Future<Output = bool> + Send;

    /// The authenticated caller, or `None` without a valid session.
    fn current_user(&self) -> impl std::future::Future<Output = Option<Caller>> + Send;
}
