//! Blood Supply Workflow Demo
//!
//! Narrated demonstration of the supply resolution workflow showing:
//! - Sufficient inventory → immediate booking
//! - Insufficient inventory → mobilization offer → explicit mobilization
//! - Period catalog classification and filtering
//! - Capacity-gated event registration
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin demo
//! ```

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use hemoflow::booking::{BookingAction, BookingEnvironment, BookingStore};
use hemoflow::catalog::{self, CatalogQuery};
use hemoflow::classifier::BucketFilter;
use hemoflow::clock::SystemClock;
use hemoflow::mocks::{
    MockBookingService, MockEventRegistry, MockInventory, MockMobilizationService, MockSession,
};
use hemoflow::registration::{self, RegistrationOutcome};
use hemoflow::types::{
    BloodComponent, BloodRequest, BloodType, Caller, DonationEvent, DonationPeriod, EventId,
    PeriodId, PeriodStatus, RequestId, Role, UserId, VolumeMl,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hemoflow=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n🩸 ============================================");
    println!("   Blood Supply Workflow - Live Demo");
    println!("============================================\n");

    // Wire the workflow against in-memory capability mocks.
    let inventory = MockInventory::new();
    let booking = MockBookingService::new();
    let mobilization = MockMobilizationService::new();
    let store = BookingStore::new(BookingEnvironment::new(
        inventory.clone(),
        booking.clone(),
        mobilization.clone(),
        Arc::new(SystemClock::new()),
    ));

    inventory.set_available(BloodType::APos, BloodComponent::WholeBlood, 300.0);
    inventory.set_available(BloodType::ONeg, BloodComponent::RedCell, 100.0);

    let desired_date = NaiveDate::from_ymd_opt(2025, 6, 20).ok_or("bad date")?;

    // ========== Scenario 1: sufficient inventory ==========

    println!("1️⃣  Requesting 200 ml of A+ whole blood (300 ml on hand)...");

    let request_id = RequestId::new();
    store
        .dispatch(BookingAction::SubmitRequest {
            request_id,
            request: BloodRequest::new(
                BloodType::APos,
                BloodComponent::WholeBlood,
                VolumeMl::parse("200")?,
                desired_date,
                Some("scheduled transfusion".to_string()),
            ),
        })
        .await;

    let outcome = store.outcome(&request_id).await;
    println!("   ✓ Outcome: {outcome:?}");
    println!("   ✓ Booking commands issued: {}\n", booking.booking_count());

    // ========== Scenario 2: shortfall and mobilization ==========

    println!("2️⃣  Requesting 450 ml of O- red cells (100 ml on hand)...");

    let short_id = RequestId::new();
    store
        .dispatch(BookingAction::SubmitRequest {
            request_id: short_id,
            request: BloodRequest::new(
                BloodType::ONeg,
                BloodComponent::RedCell,
                VolumeMl::parse("450")?,
                desired_date,
                None,
            ),
        })
        .await;

    let shortfall = store
        .get(&short_id)
        .await
        .and_then(|workflow| workflow.shortfall_ml())
        .unwrap_or_default();
    println!("   ✓ Inventory fell short by {shortfall} ml, mobilization offered");
    println!("   ✓ No command issued yet (mobilization needs explicit action)\n");

    println!("3️⃣  Caller accepts the mobilization offer...");

    store
        .dispatch(BookingAction::RequestMobilization {
            request_id: short_id,
        })
        .await;

    println!("   ✓ Outcome: {:?}", store.outcome(&short_id).await);
    println!(
        "   ✓ Mobilization commands issued: {} (fire-and-forget)\n",
        mobilization.request_count()
    );

    // ========== Scenario 3: catalog and capacity gate ==========

    println!("4️⃣  Browsing the donation period catalog...");

    let registry = MockEventRegistry::new();
    let now = Utc::now();
    registry.add_period(DonationPeriod {
        id: PeriodId::new(),
        name: "Summer Drive".to_string(),
        location: "Central Clinic".to_string(),
        date_from: now - Duration::days(2),
        date_to: now + Duration::days(5),
        status: PeriodStatus::Active,
    });
    registry.add_period(DonationPeriod {
        id: PeriodId::new(),
        name: "Autumn Drive".to_string(),
        location: "North Hospital".to_string(),
        date_from: now + Duration::days(30),
        date_to: now + Duration::days(40),
        status: PeriodStatus::Active,
    });
    registry.add_period(DonationPeriod {
        id: PeriodId::new(),
        name: "Spring Drive".to_string(),
        location: "Central Clinic".to_string(),
        date_from: now - Duration::days(90),
        date_to: now - Duration::days(80),
        status: PeriodStatus::Completed,
    });

    let clock = SystemClock::new();
    let counts = catalog::period_counts(&registry, &clock).await?;
    println!(
        "   📊 Periods: {} total, {} ongoing, {} upcoming, {} completed",
        counts.all, counts.ongoing, counts.upcoming, counts.completed
    );

    let ongoing = catalog::browse_periods(
        &registry,
        &clock,
        &CatalogQuery::all()
            .with_bucket(BucketFilter::Ongoing)
            .with_text("central"),
    )
    .await?;
    println!("   🔎 Ongoing at 'central': {:?}\n", ongoing.iter().map(|p| &p.name).collect::<Vec<_>>());

    println!("5️⃣  Registering for a drive (capacity-gated)...");

    let today = now.date_naive();
    let drive = DonationEvent {
        id: EventId::new(),
        title: "City Hall Drive".to_string(),
        location: "City Hall".to_string(),
        address: "1 Main St".to_string(),
        start_date: today + Duration::days(3),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).ok_or("bad time")?,
        end_time: NaiveTime::from_hms_opt(17, 0, 0).ok_or("bad time")?,
        blood_types_needed: HashSet::from([BloodType::ONeg, BloodType::OPos]),
        current_donors: 39,
        max_donors: 40,
    };
    registry.add_event(drive.clone());

    let anonymous = MockSession::anonymous();
    let outcome = registration::register_for_event(&registry, &anonymous, &drive).await?;
    println!("   🚫 Anonymous caller: {outcome:?} (redirect to login)");

    let donor = MockSession::authenticated(Caller {
        id: UserId::new(),
        role: Role::Donor,
    });
    let outcome = registration::register_for_event(&registry, &donor, &drive).await?;
    println!("   ✓ Signed-in donor: {outcome:?}");

    // The drive is now at capacity; the gate denies the next donor.
    let full_drive = DonationEvent {
        current_donors: 40,
        ..drive
    };
    let outcome = registration::register_for_event(&registry, &donor, &full_drive).await?;
    if outcome == RegistrationOutcome::EventFull {
        println!("   🚫 Next donor: {outcome:?}\n");
    }

    println!("✨ Demo completed");
    println!("\n📝 What happened:");
    println!("   1. 200 ml A+ request: inventory sufficient → booked (one command)");
    println!("   2. 450 ml O- request: shortfall surfaced, nothing auto-issued");
    println!("   3. Explicit acceptance → one fire-and-forget mobilization command");
    println!("   4. Periods classified by status + dates, filters compose");
    println!("   5. Registration gated by session and donor cap");

    Ok(())
}
