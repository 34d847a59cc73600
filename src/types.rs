//! Domain types for the blood supply workflow.
//!
//! This module contains the value objects and entities shared by the booking
//! workflow, the lifecycle classifier and the capacity gate. All of them are
//! transient values constructed per request/response cycle; the source of
//! truth for inventory levels and donor counts lives in the external services
//! behind the [`providers`](crate::providers) traits.

use crate::error::{Result, WorkflowError};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier correlating all steps of one booking workflow run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new random `RequestId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `RequestId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a scheduled donation event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random `EventId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an `EventId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a donation period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodId(Uuid);

impl PeriodId {
    /// Creates a new random `PeriodId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `PeriodId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PeriodId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an authenticated user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random `UserId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `UserId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Blood Typing
// ============================================================================

/// The eight ABO/Rh blood groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    /// O negative
    #[serde(rename = "O-")]
    ONeg,
    /// O positive
    #[serde(rename = "O+")]
    OPos,
    /// A negative
    #[serde(rename = "A-")]
    ANeg,
    /// A positive
    #[serde(rename = "A+")]
    APos,
    /// B negative
    #[serde(rename = "B-")]
    BNeg,
    /// B positive
    #[serde(rename = "B+")]
    BPos,
    /// AB negative
    #[serde(rename = "AB-")]
    ABNeg,
    /// AB positive
    #[serde(rename = "AB+")]
    ABPos,
}

impl BloodType {
    /// All eight groups, in display order.
    pub const ALL: [Self; 8] = [
        Self::ONeg,
        Self::OPos,
        Self::ANeg,
        Self::APos,
        Self::BNeg,
        Self::BPos,
        Self::ABNeg,
        Self::ABPos,
    ];

    /// The display label, e.g. `"A+"`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ONeg => "O-",
            Self::OPos => "O+",
            Self::ANeg => "A-",
            Self::APos => "A+",
            Self::BNeg => "B-",
            Self::BPos => "B+",
            Self::ABNeg => "AB-",
            Self::ABPos => "AB+",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for BloodType {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "O-" => Ok(Self::ONeg),
            "O+" => Ok(Self::OPos),
            "A-" => Ok(Self::ANeg),
            "A+" => Ok(Self::APos),
            "B-" => Ok(Self::BNeg),
            "B+" => Ok(Self::BPos),
            "AB-" => Ok(Self::ABNeg),
            "AB+" => Ok(Self::ABPos),
            other => Err(WorkflowError::UnknownBloodType {
                input: other.to_string(),
            }),
        }
    }
}

/// The blood fraction requested for transfusion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BloodComponent {
    /// Whole blood
    WholeBlood,
    /// Packed red cells
    RedCell,
    /// Plasma
    Plasma,
    /// Platelets
    Platelet,
}

impl BloodComponent {
    /// The display label, e.g. `"whole-blood"`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::WholeBlood => "whole-blood",
            Self::RedCell => "red-cell",
            Self::Plasma => "plasma",
            Self::Platelet => "platelet",
        }
    }
}

impl fmt::Display for BloodComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for BloodComponent {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "whole-blood" => Ok(Self::WholeBlood),
            "red-cell" => Ok(Self::RedCell),
            "plasma" => Ok(Self::Plasma),
            "platelet" => Ok(Self::Platelet),
            other => Err(WorkflowError::UnknownComponent {
                input: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// Volume
// ============================================================================

/// A validated blood volume in millilitres, strictly positive.
///
/// Requested volumes arrive from the presentation layer as free-form text;
/// [`VolumeMl::parse`] is the only path from text to a volume, so every
/// comparison against inventory figures is numeric, never textual.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolumeMl(f64);

impl VolumeMl {
    /// Creates a volume from a number of millilitres.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NonPositiveVolume`] if `ml` is not a finite,
    /// strictly positive number.
    pub fn new(ml: f64) -> Result<Self> {
        if ml.is_finite() && ml > 0.0 {
            Ok(Self(ml))
        } else {
            Err(WorkflowError::NonPositiveVolume { volume_ml: ml })
        }
    }

    /// Parses a volume from free-form text.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::UnparsableVolume`] if the input is not a
    /// number, or [`WorkflowError::NonPositiveVolume`] if it is not strictly
    /// positive. Unparsable input is rejected, never coerced.
    ///
    /// # Examples
    ///
    /// ```
    /// use hemoflow::VolumeMl;
    ///
    /// assert_eq!(VolumeMl::parse("450").unwrap().value(), 450.0);
    /// assert!(VolumeMl::parse("a lot").is_err());
    /// assert!(VolumeMl::parse("-10").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let ml: f64 = trimmed
            .parse()
            .map_err(|_| WorkflowError::UnparsableVolume {
                input: trimmed.to_string(),
            })?;
        Self::new(ml)
    }

    /// The volume in millilitres.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for VolumeMl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ml", self.0)
    }
}

// ============================================================================
// Booking Records
// ============================================================================

/// A submitted blood request. Immutable once submitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloodRequest {
    /// Requested blood group
    pub blood_type: BloodType,
    /// Requested blood fraction
    pub component: BloodComponent,
    /// Requested volume
    pub volume_ml: VolumeMl,
    /// Date the blood is needed
    pub desired_date: NaiveDate,
    /// Optional free-form notes for the booking service
    pub notes: Option<String>,
}

impl BloodRequest {
    /// Creates a new blood request.
    #[must_use]
    pub const fn new(
        blood_type: BloodType,
        component: BloodComponent,
        volume_ml: VolumeMl,
        desired_date: NaiveDate,
        notes: Option<String>,
    ) -> Self {
        Self {
            blood_type,
            component,
            volume_ml,
            desired_date,
            notes,
        }
    }
}

/// Available inventory for a (blood type, component) pair at query time.
///
/// Snapshots are queried fresh per workflow run and never cached across
/// requests; callers must not assume one stays valid once subsequent
/// mutating calls are delayed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Blood group the snapshot covers
    pub blood_type: BloodType,
    /// Blood fraction the snapshot covers
    pub component: BloodComponent,
    /// Available volume in millilitres, non-negative
    pub available_volume_ml: f64,
    /// Instant the inventory service was queried
    pub queried_at: DateTime<Utc>,
}

impl InventorySnapshot {
    /// `true` if the snapshot covers the requested volume.
    ///
    /// Numeric comparison: `available >= requested`.
    #[must_use]
    pub fn covers(&self, requested: VolumeMl) -> bool {
        self.available_volume_ml >= requested.value()
    }

    /// Millilitres missing to cover `requested`, zero when sufficient.
    #[must_use]
    pub fn shortfall_ml(&self, requested: VolumeMl) -> f64 {
        (requested.value() - self.available_volume_ml).max(0.0)
    }
}

/// A recorded donor-mobilization request.
///
/// Mobilization is fire-and-forget: one record per insufficient-inventory
/// event, no completion tracking in this core.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MobilizationRequest {
    /// Blood group to mobilize donors for
    pub blood_type: BloodType,
    /// Volume the originating request asked for
    pub volume_ml: VolumeMl,
    /// Instant the mobilization command was issued
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Periods and Events
// ============================================================================

/// Upstream-owned status of a donation period.
///
/// The lifecycle bucket is derived from this status plus the period's dates;
/// it is never stored. Status stays authoritative: a period marked Active past
/// its end date is not recomputed as Completed here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodStatus {
    /// Period is being configured upstream
    Draft,
    /// Period is open
    Active,
    /// Period has completed
    Completed,
    /// Period was cancelled
    Cancelled,
}

/// A time-bounded donation period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DonationPeriod {
    /// Period identifier
    pub id: PeriodId,
    /// Display name
    pub name: String,
    /// Collection location
    pub location: String,
    /// Start instant
    pub date_from: DateTime<Utc>,
    /// End instant
    pub date_to: DateTime<Utc>,
    /// Upstream-owned status
    pub status: PeriodStatus,
}

/// A scheduled donation event with a fixed donor cap.
///
/// The `current_donors <= max_donors` invariant is enforced by the external
/// registry; the capacity gate re-checks it defensively.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DonationEvent {
    /// Event identifier
    pub id: EventId,
    /// Display title
    pub title: String,
    /// Collection location
    pub location: String,
    /// Street address
    pub address: String,
    /// Calendar day the event takes place
    pub start_date: NaiveDate,
    /// Opening time
    pub start_time: NaiveTime,
    /// Closing time
    pub end_time: NaiveTime,
    /// Blood groups the drive is collecting
    pub blood_types_needed: HashSet<BloodType>,
    /// Donors registered so far
    pub current_donors: u32,
    /// Donor cap
    pub max_donors: u32,
}

impl DonationEvent {
    /// Opening instant, in UTC.
    #[must_use]
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.start_date.and_time(self.start_time).and_utc()
    }

    /// Closing instant, in UTC.
    #[must_use]
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.start_date.and_time(self.end_time).and_utc()
    }

    /// `true` once the donor cap is reached.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.current_donors >= self.max_donors
    }

    /// Registration slots still open.
    #[must_use]
    pub const fn remaining_capacity(&self) -> u32 {
        self.max_donors.saturating_sub(self.current_donors)
    }
}

// ============================================================================
// Session Identity
// ============================================================================

/// Role carried by an authenticated session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// A registered donor
    Donor,
    /// Drive coordination staff
    Coordinator,
    /// Platform administrator
    Admin,
}

/// The authenticated caller, as reported by the session capability.
///
/// Always passed in explicitly; the core never reads session state from
/// ambient globals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// User identifier
    pub id: UserId,
    /// Session role
    pub role: Role,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;

    #[test]
    fn blood_type_round_trips_through_labels() {
        for blood_type in BloodType::ALL {
            assert_eq!(blood_type.label().parse::<BloodType>().unwrap(), blood_type);
        }
    }

    #[test]
    fn unknown_blood_type_is_a_validation_error() {
        let err = "C+".parse::<BloodType>().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn component_parses_kebab_labels() {
        assert_eq!(
            "whole-blood".parse::<BloodComponent>().unwrap(),
            BloodComponent::WholeBlood
        );
        assert!("erythrocyte".parse::<BloodComponent>().is_err());
    }

    #[test]
    fn volume_parses_numeric_text() {
        assert_eq!(VolumeMl::parse("450").unwrap().value(), 450.0);
        assert_eq!(VolumeMl::parse(" 450.5 ").unwrap().value(), 450.5);
    }

    #[test]
    fn volume_rejects_garbage_and_non_positive() {
        assert!(matches!(
            VolumeMl::parse("450ml"),
            Err(WorkflowError::UnparsableVolume { .. })
        ));
        assert!(matches!(
            VolumeMl::parse("0"),
            Err(WorkflowError::NonPositiveVolume { .. })
        ));
        assert!(matches!(
            VolumeMl::parse("NaN"),
            Err(WorkflowError::NonPositiveVolume { .. })
        ));
        assert!(VolumeMl::new(f64::INFINITY).is_err());
    }

    #[test]
    fn snapshot_covers_is_numeric() {
        let snapshot = InventorySnapshot {
            blood_type: BloodType::APos,
            component: BloodComponent::WholeBlood,
            available_volume_ml: 500.0,
            queried_at: Utc::now(),
        };
        assert!(snapshot.covers(VolumeMl::parse("450").unwrap()));
        assert!(snapshot.covers(VolumeMl::parse("500").unwrap()));
        assert!(!snapshot.covers(VolumeMl::parse("500.1").unwrap()));
        assert_eq!(snapshot.shortfall_ml(VolumeMl::new(650.0).unwrap()), 150.0);
    }

    #[test]
    fn event_instants_combine_date_and_times() {
        let event = DonationEvent {
            id: EventId::new(),
            title: "City Hall Drive".to_string(),
            location: "City Hall".to_string(),
            address: "1 Main St".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            blood_types_needed: HashSet::from([BloodType::ONeg]),
            current_donors: 3,
            max_donors: 40,
        };
        assert!(event.starts_at() < event.ends_at());
        assert_eq!(event.remaining_capacity(), 37);
        assert!(!event.is_full());
    }
}
