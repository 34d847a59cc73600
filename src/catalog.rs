//! Catalog browsing over the event registry.
//!
//! Thin query layer the period and scheduled-event list views sit on:
//! fetches from the external registry, then applies the pure classifier
//! filters. Nothing here is cached; every browse reflects the registry at
//! call time.

use crate::classifier::{
    BucketCounts, BucketFilter, classify_event, classify_period, event_matches, period_matches,
};
use crate::clock::Clock;
use crate::error::Result;
use crate::providers::EventRegistry;
use crate::types::{DonationEvent, DonationPeriod};
use chrono::NaiveDate;

/// Composed filter for catalog views.
///
/// The bucket filter and the free-text filter compose via logical AND.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Lifecycle bucket to show
    pub bucket: BucketFilter,
    /// Case-insensitive name/location substring
    pub text: Option<String>,
}

impl CatalogQuery {
    /// Query matching everything.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            bucket: BucketFilter::All,
            text: None,
        }
    }

    /// Restrict to a lifecycle bucket.
    #[must_use]
    pub const fn with_bucket(mut self, bucket: BucketFilter) -> Self {
        self.bucket = bucket;
        self
    }

    /// Restrict to records whose name or location contains `text`.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Donation periods passing `query`, classified at the current instant.
///
/// # Errors
///
/// Propagates [`WorkflowError::RegistryUnavailable`](crate::error::WorkflowError::RegistryUnavailable)
/// from the registry.
pub async fn browse_periods<R: EventRegistry>(
    registry: &R,
    clock: &dyn Clock,
    query: &CatalogQuery,
) -> Result<Vec<DonationPeriod>> {
    let now = clock.now();
    let periods = registry.list_periods().await?;
    Ok(periods
        .into_iter()
        .filter(|period| period_matches(now, period, query.bucket, query.text.as_deref()))
        .collect())
}

/// Per-bucket counts over the whole period catalog.
///
/// # Errors
///
/// Propagates [`WorkflowError::RegistryUnavailable`](crate::error::WorkflowError::RegistryUnavailable)
/// from the registry.
pub async fn period_counts<R: EventRegistry>(
    registry: &R,
    clock: &dyn Clock,
) -> Result<BucketCounts> {
    let now = clock.now();
    let periods = registry.list_periods().await?;
    Ok(BucketCounts::tally(
        periods.iter().map(|period| classify_period(now, period)),
    ))
}

/// Scheduled events in `[from, to]` passing `query`.
///
/// # Errors
///
/// Propagates [`WorkflowError::RegistryUnavailable`](crate::error::WorkflowError::RegistryUnavailable)
/// from the registry.
pub async fn browse_events<R: EventRegistry>(
    registry: &R,
    clock: &dyn Clock,
    from: NaiveDate,
    to: NaiveDate,
    query: &CatalogQuery,
) -> Result<Vec<DonationEvent>> {
    let now = clock.now();
    let events = registry.list_events(from, to).await?;
    Ok(events
        .into_iter()
        .filter(|event| event_matches(now, event, query.bucket, query.text.as_deref()))
        .collect())
}

/// Per-bucket counts over the scheduled events in `[from, to]`.
///
/// # Errors
///
/// Propagates [`WorkflowError::RegistryUnavailable`](crate::error::WorkflowError::RegistryUnavailable)
/// from the registry.
pub async fn event_counts<R: EventRegistry>(
    registry: &R,
    clock: &dyn Clock,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<BucketCounts> {
    let now = clock.now();
    let events = registry.list_events(from, to).await?;
    Ok(BucketCounts::tally(
        events.iter().map(|event| classify_event(now, event)),
    ))
}
