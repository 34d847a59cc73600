//! Period/event lifecycle classification.
//!
//! A pure, total mapping from a time-bounded period (or scheduled event) plus
//! the current instant to a lifecycle bucket. Buckets are derived on every
//! call and never stored.
//!
//! A period whose status is Active but whose end has already passed is a
//! stale upstream record: it classifies as neither Ongoing nor Upcoming and
//! stays excluded from both buckets until its status is corrected upstream.
//! Status authority is passed through, not recomputed.

use crate::types::{DonationEvent, DonationPeriod, PeriodStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle bucket derived from time and status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleBucket {
    /// Active and currently running
    Ongoing,
    /// Active and not yet started
    Upcoming,
    /// Marked completed upstream, regardless of dates
    Completed,
}

/// Classify a time span into a lifecycle bucket.
///
/// Total and deterministic: the same inputs always produce the same result.
/// Returns `None` for spans that belong to no bucket (draft, cancelled, or
/// stale-Active records).
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use hemoflow::classifier::{LifecycleBucket, classify};
/// use hemoflow::types::PeriodStatus;
///
/// let from = Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap();
/// let to = Utc.with_ymd_and_hms(2025, 6, 20, 0, 0, 0).unwrap();
///
/// let now = Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap();
/// assert_eq!(classify(now, from, to, PeriodStatus::Active), Some(LifecycleBucket::Ongoing));
///
/// let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
/// assert_eq!(classify(now, from, to, PeriodStatus::Active), Some(LifecycleBucket::Upcoming));
/// ```
#[must_use]
pub fn classify(
    now: DateTime<Utc>,
    date_from: DateTime<Utc>,
    date_to: DateTime<Utc>,
    status: PeriodStatus,
) -> Option<LifecycleBucket> {
    match status {
        PeriodStatus::Completed => Some(LifecycleBucket::Completed),
        PeriodStatus::Active => {
            if now < date_from {
                Some(LifecycleBucket::Upcoming)
            } else if now <= date_to {
                Some(LifecycleBucket::Ongoing)
            } else {
                // Stale Active record past its end date: excluded from both
                // time buckets until the upstream status is updated.
                None
            }
        }
        PeriodStatus::Draft | PeriodStatus::Cancelled => None,
    }
}

/// Classify a donation period.
#[must_use]
pub fn classify_period(now: DateTime<Utc>, period: &DonationPeriod) -> Option<LifecycleBucket> {
    classify(now, period.date_from, period.date_to, period.status)
}

/// Classify a scheduled event.
///
/// Events carry no upstream status; a listed event is implicitly active
/// between its opening and closing instants.
#[must_use]
pub fn classify_event(now: DateTime<Utc>, event: &DonationEvent) -> Option<LifecycleBucket> {
    classify(now, event.starts_at(), event.ends_at(), PeriodStatus::Active)
}

/// Bucket filter for list views.
///
/// `All` is the universal filter, not a disjoint bucket: it matches every
/// record and backs the count-all and unfiltered displays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BucketFilter {
    /// Match everything
    #[default]
    All,
    /// Only ongoing records
    Ongoing,
    /// Only upcoming records
    Upcoming,
    /// Only completed records
    Completed,
}

impl BucketFilter {
    /// `true` if a record classified into `bucket` passes this filter.
    #[must_use]
    pub fn matches(self, bucket: Option<LifecycleBucket>) -> bool {
        match self {
            Self::All => true,
            Self::Ongoing => bucket == Some(LifecycleBucket::Ongoing),
            Self::Upcoming => bucket == Some(LifecycleBucket::Upcoming),
            Self::Completed => bucket == Some(LifecycleBucket::Completed),
        }
    }
}

/// Case-insensitive substring match over any of the given fields.
fn matches_text(fields: &[&str], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// `true` if `period` passes both the bucket filter and the text filter.
///
/// Text filtering (name/location substring, case-insensitive) composes with
/// bucket filtering via logical AND.
#[must_use]
pub fn period_matches(
    now: DateTime<Utc>,
    period: &DonationPeriod,
    filter: BucketFilter,
    text: Option<&str>,
) -> bool {
    filter.matches(classify_period(now, period))
        && text.is_none_or(|needle| matches_text(&[&period.name, &period.location], needle))
}

/// `true` if `event` passes both the bucket filter and the text filter.
#[must_use]
pub fn event_matches(
    now: DateTime<Utc>,
    event: &DonationEvent,
    filter: BucketFilter,
    text: Option<&str>,
) -> bool {
    filter.matches(classify_event(now, event))
        && text.is_none_or(|needle| matches_text(&[&event.title, &event.location], needle))
}

/// Per-bucket record counts for a catalog view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    /// Every record, regardless of bucket
    pub all: usize,
    /// Records classified Ongoing
    pub ongoing: usize,
    /// Records classified Upcoming
    pub upcoming: usize,
    /// Records classified Completed
    pub completed: usize,
}

impl BucketCounts {
    /// Tally bucket assignments.
    pub fn tally(buckets: impl IntoIterator<Item = Option<LifecycleBucket>>) -> Self {
        let mut counts = Self::default();
        for bucket in buckets {
            counts.all += 1;
            match bucket {
                Some(LifecycleBucket::Ongoing) => counts.ongoing += 1,
                Some(LifecycleBucket::Upcoming) => counts.upcoming += 1,
                Some(LifecycleBucket::Completed) => counts.completed += 1,
                None => {}
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::types::PeriodId;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn instant(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn period(status: PeriodStatus) -> DonationPeriod {
        DonationPeriod {
            id: PeriodId::new(),
            name: "Summer Drive".to_string(),
            location: "Central Clinic".to_string(),
            date_from: instant(2025, 6, 10),
            date_to: instant(2025, 6, 20),
            status,
        }
    }

    #[test]
    fn active_period_inside_window_is_ongoing() {
        assert_eq!(
            classify_period(instant(2025, 6, 15), &period(PeriodStatus::Active)),
            Some(LifecycleBucket::Ongoing)
        );
    }

    #[test]
    fn active_period_before_window_is_upcoming() {
        assert_eq!(
            classify_period(instant(2025, 6, 1), &period(PeriodStatus::Active)),
            Some(LifecycleBucket::Upcoming)
        );
    }

    #[test]
    fn completed_status_wins_regardless_of_dates() {
        for now in [instant(2025, 6, 1), instant(2025, 6, 15), instant(2025, 7, 1)] {
            assert_eq!(
                classify_period(now, &period(PeriodStatus::Completed)),
                Some(LifecycleBucket::Completed)
            );
        }
    }

    #[test]
    fn stale_active_period_lands_in_no_bucket() {
        let bucket = classify_period(instant(2025, 7, 1), &period(PeriodStatus::Active));
        assert_eq!(bucket, None);
        assert!(!BucketFilter::Ongoing.matches(bucket));
        assert!(!BucketFilter::Upcoming.matches(bucket));
        // Still part of the universal view.
        assert!(BucketFilter::All.matches(bucket));
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        let p = period(PeriodStatus::Active);
        assert_eq!(
            classify_period(p.date_from, &p),
            Some(LifecycleBucket::Ongoing)
        );
        assert_eq!(classify_period(p.date_to, &p), Some(LifecycleBucket::Ongoing));
    }

    #[test]
    fn draft_and_cancelled_are_unbucketed() {
        assert_eq!(
            classify_period(instant(2025, 6, 15), &period(PeriodStatus::Draft)),
            None
        );
        assert_eq!(
            classify_period(instant(2025, 6, 15), &period(PeriodStatus::Cancelled)),
            None
        );
    }

    #[test]
    fn text_filter_composes_with_bucket_filter() {
        let now = instant(2025, 6, 15);
        let p = period(PeriodStatus::Active);

        assert!(period_matches(now, &p, BucketFilter::Ongoing, Some("summer")));
        assert!(period_matches(now, &p, BucketFilter::Ongoing, Some("CENTRAL")));
        // Text matches but bucket does not.
        assert!(!period_matches(now, &p, BucketFilter::Upcoming, Some("summer")));
        // Bucket matches but text does not.
        assert!(!period_matches(now, &p, BucketFilter::Ongoing, Some("winter")));
        assert!(period_matches(now, &p, BucketFilter::All, None));
    }

    #[test]
    fn counts_tally_every_record_under_all() {
        let now = instant(2025, 6, 15);
        let periods = vec![
            period(PeriodStatus::Active),                      // ongoing
            period(PeriodStatus::Completed),                   // completed
            period(PeriodStatus::Draft),                       // no bucket
            DonationPeriod {
                date_from: instant(2025, 7, 1),
                date_to: instant(2025, 7, 10),
                ..period(PeriodStatus::Active)
            },                                                 // upcoming
        ];
        let counts = BucketCounts::tally(periods.iter().map(|p| classify_period(now, p)));
        assert_eq!(counts.all, 4);
        assert_eq!(counts.ongoing, 1);
        assert_eq!(counts.upcoming, 1);
        assert_eq!(counts.completed, 1);
    }

    proptest! {
        /// classify is total and idempotent: any instant triple produces
        /// exactly one result, stable across repeated calls.
        #[test]
        fn classify_is_total_and_deterministic(
            now_secs in 0i64..4_000_000_000,
            from_secs in 0i64..4_000_000_000,
            len_secs in 0i64..100_000_000,
        ) {
            let now = Utc.timestamp_opt(now_secs, 0).unwrap();
            let from = Utc.timestamp_opt(from_secs, 0).unwrap();
            let to = Utc.timestamp_opt(from_secs + len_secs, 0).unwrap();
            for status in [
                PeriodStatus::Draft,
                PeriodStatus::Active,
                PeriodStatus::Completed,
                PeriodStatus::Cancelled,
            ] {
                let first = classify(now, from, to, status);
                let second = classify(now, from, to, status);
                prop_assert_eq!(first, second);
                if status == PeriodStatus::Active && first.is_some() {
                    // An Active record is never classified Completed here.
                    prop_assert_ne!(first, Some(LifecycleBucket::Completed));
                }
            }
        }
    }
}
