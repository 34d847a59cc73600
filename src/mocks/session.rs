//! Mock session provider for testing.

use crate::mocks::lock;
use crate::providers::SessionProvider;
use crate::types::Caller;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock session provider.
///
/// Holds at most one signed-in caller.
#[derive(Debug, Clone, Default)]
pub struct MockSession {
    caller: Arc<Mutex<Option<Caller>>>,
}

impl MockSession {
    /// Create a session with nobody signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Create a session with `caller` signed in.
    #[must_use]
    pub fn authenticated(caller: Caller) -> Self {
        Self {
            caller: Arc::new(Mutex::new(Some(caller))),
        }
    }

    /// Sign a caller in.
    pub fn sign_in(&self, caller: Caller) {
        *lock(&self.caller) = Some(caller);
    }

    /// Sign the current caller out.
    pub fn sign_out(&self) {
        *lock(&self.caller) = None;
    }
}

impl SessionProvider for MockSession {
    fn is_authenticated(&self) -> impl Future<Output = bool> + Send {
        let caller = lock(&self.caller).is_some();
        async move { caller }
    }

    fn current_user(&self) -> impl Future<Output = Option<Caller>> + Send {
        let caller = *lock(&self.caller);
        async move { caller }
    }
}
