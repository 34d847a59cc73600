//! Catalog, classifier and registration integration tests.
//!
//! Runs the registry-backed list views and the capacity-gated registration
//! flow against the in-memory registry mock with a fixed clock.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use hemoflow::catalog::{self, CatalogQuery};
use hemoflow::classifier::{BucketFilter, LifecycleBucket, classify};
use hemoflow::mocks::{MockEventRegistry, MockSession};
use hemoflow::registration::{self, RegistrationOutcome};
use hemoflow::testing::FixedClock;
use hemoflow::types::{
    BloodType, Caller, DonationEvent, DonationPeriod, EventId, PeriodId, PeriodStatus, Role,
    UserId,
};
use std::collections::HashSet;

fn instant(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn period(name: &str, location: &str, from: (u32, u32), to: (u32, u32), status: PeriodStatus) -> DonationPeriod {
    DonationPeriod {
        id: PeriodId::new(),
        name: name.to_string(),
        location: location.to_string(),
        date_from: instant(2025, from.0, from.1),
        date_to: instant(2025, to.0, to.1),
        status,
    }
}

fn drive(title: &str, day: u32, current: u32, max: u32) -> DonationEvent {
    DonationEvent {
        id: EventId::new(),
        title: title.to_string(),
        location: "Central Clinic".to_string(),
        address: "1 Main St".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        blood_types_needed: HashSet::from([BloodType::OPos]),
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

// ============================================================================
// Classifier scenarios
// ============================================================================

#[test]
fn active_period_classifies_by_current_instant() {
    let from = instant(2025, 6, 10);
    let to = instant(2025, 6, 20);

    assert_eq!(
        classify(instant(2025, 6, 15), from, to, PeriodStatus::Active),
        Some(LifecycleBucket::Ongoing)
    );
    assert_eq!(
        classify(instant(2025, 6, 1), from, to, PeriodStatus::Active),
        Some(LifecycleBucket::Upcoming)
    );
    for now in [instant(2025, 6, 1), instant(2025, 6, 15), instant(2025, 8, 1)] {
        assert_eq!(
            classify(now, from, to, PeriodStatus::Completed),
            Some(LifecycleBucket::Completed)
        );
    }
}

#[tokio::test]
async fn catalog_counts_and_filters_compose() {
    let registry = MockEventRegistry::new();
    registry.add_period(period(
        "Summer Drive",
        "Central Clinic",
        (6, 10),
        (6, 20),
        PeriodStatus::Active,
    ));
    registry.add_period(period(
        "Autumn Drive",
        "North Hospital",
        (9, 1),
        (9, 10),
        PeriodStatus::Active,
    ));
    registry.add_period(period(
        "Spring Drive",
        "Central Clinic",
        (3, 1),
        (3, 10),
        PeriodStatus::Completed,
    ));
    // Stale record: Active but already over.
    registry.add_period(period(
        "May Drive",
        "Central Clinic",
        (5, 1),
        (5, 10),
        PeriodStatus::Active,
    ));

    let clock = FixedClock::new(instant(2025, 6, 15));

    let counts = catalog::period_counts(&registry, &clock).await.unwrap();
    assert_eq!(counts.all, 4);
    assert_eq!(counts.ongoing, 1);
    assert_eq!(counts.upcoming, 1);
    assert_eq!(counts.completed, 1);
    // The stale May record is in no time bucket, only in the universal view.

    let ongoing = catalog::browse_periods(
        &registry,
        &clock,
        &CatalogQuery::all().with_bucket(BucketFilter::Ongoing),
    )
    .await
    .unwrap();
    assert_eq!(ongoing.len(), 1);
    assert_eq!(ongoing[0].name, "Summer Drive");

    // Text filter ANDs with the bucket filter.
    let central_upcoming = catalog::browse_periods(
        &registry,
        &clock,
        &CatalogQuery::all()
            .with_bucket(BucketFilter::Upcoming)
            .with_text("central"),
    )
    .await
    .unwrap();
    assert!(central_upcoming.is_empty());

    let central_all = catalog::browse_periods(
        &registry,
        &clock,
        &CatalogQuery::all().with_text("central clinic"),
    )
    .await
    .unwrap();
    assert_eq!(central_all.len(), 3);
}

#[tokio::test]
async fn event_listing_honors_the_date_window() {
    let registry = MockEventRegistry::new();
    registry.add_event(drive("Early Drive", 5, 0, 40));
    registry.add_event(drive("Mid Drive", 15, 0, 40));
    registry.add_event(drive("Late Drive", 25, 0, 40));

    let clock = FixedClock::new(instant(2025, 6, 1));
    let events = catalog::browse_events(
        &registry,
        &clock,
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
        &CatalogQuery::all(),
    )
    .await
    .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Mid Drive");

    let counts = catalog::event_counts(
        &registry,
        &clock,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(counts.all, 3);
    assert_eq!(counts.upcoming, 3);
    assert_eq!(counts.ongoing, 0);
}

// ============================================================================
// Registration against the registry
// ============================================================================

#[tokio::test]
async fn registration_fills_an_event_up_to_its_cap() {
    let registry = MockEventRegistry::new();
    let event = drive("Tiny Drive", 20, 38, 40);
    registry.add_event(event.clone());
    let sessions = MockSession::authenticated(donor());

    // Two slots left: two registrations succeed.
    for _ in 0..2 {
        let outcome = registration::register_for_event(&registry, &sessions, &event)
            .await
            .unwrap();
        assert_eq!(outcome, RegistrationOutcome::Registered);
    }
    assert_eq!(registry.registration_count(), 2);

    // The registry's copy is now full; re-fetch and hit the gate.
    let refreshed = catalog::browse_events(
        &registry,
        &FixedClock::new(instant(2025, 6, 1)),
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        &CatalogQuery::all(),
    )
    .await
    .unwrap()
    .remove(0);
    assert!(refreshed.is_full());

    let outcome = registration::register_for_event(&registry, &sessions, &refreshed)
        .await
        .unwrap();
    assert_eq!(outcome, RegistrationOutcome::EventFull);
    assert_eq!(registry.registration_count(), 2);
}

#[tokio::test]
async fn signed_out_caller_is_routed_to_authentication() {
    let registry = MockEventRegistry::new();
    let event = drive("Open Drive", 20, 0, 40);
    registry.add_event(event.clone());

    let sessions = MockSession::authenticated(donor());
    sessions.sign_out();

    let outcome = registration::register_for_event(&registry, &sessions, &event)
        .await
        .unwrap();
    assert_eq!(outcome, RegistrationOutcome::AuthenticationRequired);
    assert_eq!(registry.registration_count(), 0);
}
