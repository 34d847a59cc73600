//! Registration capacity gate.
//!
//! A pure eligibility check: it decides whether a registration may proceed
//! and performs no side effect. Issuing the registration command afterwards
//! is the caller's next step (see [`crate::registration`]).

use crate::types::{Caller, DonationEvent};
use serde::{Deserialize, Serialize};

/// Outcome of the capacity gate.
///
/// Denials are normal outcomes, not errors: a full event and a missing
/// session are both expected situations the caller routes on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationAccess {
    /// Registration may proceed.
    Allowed,
    /// The donor cap is reached.
    DeniedFull,
    /// No valid session; the caller must redirect to authentication.
    DeniedUnauthenticated,
}

/// Decide whether `caller` may register for `event`.
///
/// The registry enforces `current_donors <= max_donors`; the `>=` check here
/// is a re-check of that invariant, so a record that arrives already over
/// the cap still denies.
///
/// # Examples
///
/// ```
/// use hemoflow::{RegistrationAccess, can_register};
/// # use std::collections::HashSet;
/// # use chrono::{NaiveDate, NaiveTime};
/// # use hemoflow::types::{Caller, DonationEvent, EventId, Role, UserId};
/// # let mut event = DonationEvent {
/// #     id: EventId::new(),
/// #     title: String::new(),
/// #     location: String::new(),
/// #     address: String::new(),
/// #     start_date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
/// #     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
/// #     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
/// #     blood_types_needed: HashSet::new(),
/// #     current_donors: 10,
/// #     max_donors: 40,
/// # };
/// let caller = Caller { id: UserId::new(), role: Role::Donor };
///
/// assert_eq!(can_register(&event, Some(&caller)), RegistrationAccess::Allowed);
/// assert_eq!(can_register(&event, None), RegistrationAccess::DeniedUnauthenticated);
///
/// event.current_donors = event.max_donors;
/// assert_eq!(can_register(&event, Some(&caller)), RegistrationAccess::DeniedFull);
/// ```
#[must_use]
pub const fn can_register(event: &DonationEvent, caller: Option<&Caller>) -> RegistrationAccess {
    if caller.is_none() {
        return RegistrationAccess::DeniedUnauthenticated;
    }
    if event.is_full() {
        return RegistrationAccess::DeniedFull;
    }
    RegistrationAccess::Allowed
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::types::{BloodType, EventId, Role, UserId};
    use chrono::{NaiveDate, NaiveTime};
    use std::collections::HashSet;

    fn event(current: u32, max: u32) -> DonationEvent {
        DonationEvent {
            id: EventId::new(),
            title: "Community Drive".to_string(),
            location: "Town Hall".to_string(),
            address: "2 Square".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            blood_types_needed: HashSet::from([BloodType::OPos, BloodType::ONeg]),
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

    #[test]
    fn authenticated_caller_with_open_slots_is_allowed() {
        assert_eq!(
            can_register(&event(39, 40), Some(&donor())),
            RegistrationAccess::Allowed
        );
    }

    #[test]
    fn cap_reached_denies_even_when_authenticated() {
        assert_eq!(
            can_register(&event(40, 40), Some(&donor())),
            RegistrationAccess::DeniedFull
        );
    }

    #[test]
    fn over_cap_record_still_denies() {
        // Defensive re-check of the registry's invariant.
        assert_eq!(
            can_register(&event(41, 40), Some(&donor())),
            RegistrationAccess::DeniedFull
        );
    }

    #[test]
    fn missing_session_denies_before_capacity_is_considered() {
        assert_eq!(
            can_register(&event(40, 40), None),
            RegistrationAccess::DeniedUnauthenticated
        );
        assert_eq!(
            can_register(&event(0, 40), None),
            RegistrationAccess::DeniedUnauthenticated
        );
    }
}
