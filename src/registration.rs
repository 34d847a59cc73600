//! Event registration flow.
//!
//! The concrete "caller's next step" after the capacity gate: check the
//! session, run the gate, and only then issue the registration command.
//! Denials are normal outcomes the view routes on; only a registry failure
//! is an error.

use crate::capacity::{RegistrationAccess, can_register};
use crate::error::Result;
use crate::providers::{EventRegistry, SessionProvider};
use crate::types::DonationEvent;
use serde::{Deserialize, Serialize};

/// Outcome of an attempted event registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationOutcome {
    /// The registration command was issued and accepted.
    Registered,
    /// The donor cap is reached; no command was issued.
    EventFull,
    /// No valid session; the caller must redirect to authentication.
    AuthenticationRequired,
}

/// Try to register the current session's user for `event`.
///
/// Session state is injected, never read from globals. The gate decides
/// eligibility without side effects; the registry command is only issued on
/// `Allowed`.
///
/// # Errors
///
/// Propagates [`WorkflowError::RegistryUnavailable`](crate::error::WorkflowError::RegistryUnavailable)
/// if the registry rejects or cannot receive the command.
pub async fn register_for_event<R, S>(
    registry: &R,
    sessions: &S,
    event: &DonationEvent,
) -> Result<RegistrationOutcome>
where
    R: EventRegistry,
    S: SessionProvider,
{
    let Some(caller) = sessions.current_user().await else {
        tracing::info!(event_id = %event.id, "registration attempt without session");
        return Ok(RegistrationOutcome::AuthenticationRequired);
    };

    match can_register(event, Some(&caller)) {
        RegistrationAccess::DeniedUnauthenticated => {
            Ok(RegistrationOutcome::AuthenticationRequired)
        }
        RegistrationAccess::DeniedFull => {
            tracing::info!(event_id = %event.id, "registration denied, event full");
            Ok(RegistrationOutcome::EventFull)
        }
        RegistrationAccess::Allowed => {
            registry.register_for_event(event.id, caller.id).await?;
            tracing::info!(event_id = %event.id, user_id = %caller.id, "registered");
            Ok(RegistrationOutcome::Registered)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::error::WorkflowError;
    use crate::mocks::{MockEventRegistry, MockSession};
    use crate::types::{BloodType, Caller, EventId, Role, UserId};
    use chrono::{NaiveDate, NaiveTime};
    use std::collections::HashSet;

    fn event(current: u32, max: u32) -> DonationEvent {
        DonationEvent {
            id: EventId::new(),
            title: "Campus Drive".to_string(),
            location: "Student Union".to_string(),
            address: "5 College Ave".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 21).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            blood_types_needed: HashSet::from([BloodType::APos]),
            current_donors: current,
            max_donors: max,
        }
    }

    fn donor() -> Caller {
        Caller {
            id: UserId::new(),
            role: Role::Donor,
        }
    }

    #[tokio::test]
    async fn authenticated_caller_registers_once() {
        let registry = MockEventRegistry::new();
        let open_event = event(5, 40);
        registry.add_event(open_event.clone());
        let sessions = MockSession::authenticated(donor());

        let outcome = register_for_event(&registry, &sessions, &open_event)
            .await
            .unwrap();

        assert_eq!(outcome, RegistrationOutcome::Registered);
        assert_eq!(registry.registration_count(), 1);
    }

    #[tokio::test]
    async fn anonymous_caller_is_redirected_without_a_command() {
        let registry = MockEventRegistry::new();
        let open_event = event(5, 40);
        registry.add_event(open_event.clone());
        let sessions = MockSession::anonymous();

        let outcome = register_for_event(&registry, &sessions, &open_event)
            .await
            .unwrap();

        assert_eq!(outcome, RegistrationOutcome::AuthenticationRequired);
        assert_eq!(registry.registration_count(), 0);
    }

    #[tokio::test]
    async fn full_event_denies_without_a_command() {
        let registry = MockEventRegistry::new();
        let full_event = event(40, 40);
        registry.add_event(full_event.clone());
        let sessions = MockSession::authenticated(donor());

        let outcome = register_for_event(&registry, &sessions, &full_event)
            .await
            .unwrap();

        assert_eq!(outcome, RegistrationOutcome::EventFull);
        assert_eq!(registry.registration_count(), 0);
    }

    #[tokio::test]
    async fn registry_failure_is_surfaced_as_transient_error() {
        let registry = MockEventRegistry::new();
        let open_event = event(5, 40);
        registry.add_event(open_event.clone());
        registry.fail_with("gateway timeout");
        let sessions = MockSession::authenticated(donor());

        let err = register_for_event(&registry, &sessions, &open_event)
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::RegistryUnavailable { .. }));
        assert!(err.is_transient());
    }
}
