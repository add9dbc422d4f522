//! ContextAggregator -- concurrent gathering of the per-turn context.
//!
//! All four source queries are issued together and joined before any
//! summary is built, so turn latency is bounded by the slowest source
//! rather than their sum. A failed or empty source silences only its own
//! summary field; aggregation itself never fails.

use tracing::{debug, warn};

use hydrowatt_types::context::ContextSummary;
use hydrowatt_types::error::RepositoryError;

use super::source::UsageSource;
use super::summary::{
    combine_usage, summarize_bill, summarize_devices, summarize_room_distribution,
    summarize_weekly_usage,
};

/// Builds a fresh [`ContextSummary`] from a [`UsageSource`] on every call.
pub struct ContextAggregator<S: UsageSource> {
    source: S,
}

impl<S: UsageSource> ContextAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Access the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Query every source concurrently and reduce each result to a digest.
    pub async fn build_context_summaries(&self) -> ContextSummary {
        let (weekly, rooms, bill, devices) = tokio::join!(
            self.source.fetch_weekly_usage(),
            self.source.fetch_room_distribution(),
            self.source.fetch_current_bill(),
            self.source.fetch_devices(),
        );

        let weekly = reduce("weekly_usage", weekly, |days| summarize_weekly_usage(&days));
        let rooms = reduce("room_distribution", rooms, |rooms| {
            summarize_room_distribution(&rooms)
        });
        let billing_summary = reduce("current_bill", bill, |bill| summarize_bill(bill.as_ref()));
        let device_summary = reduce("devices", devices, |devices| summarize_devices(&devices));

        let summary = ContextSummary {
            usage_summary: combine_usage(weekly, rooms),
            billing_summary,
            device_summary,
        };

        debug!(
            usage = !summary.usage_summary.is_empty(),
            billing = !summary.billing_summary.is_empty(),
            devices = !summary.device_summary.is_empty(),
            "Context summaries built"
        );

        summary
    }
}

/// Reduce one source result, mapping failure to the empty summary.
fn reduce<T>(
    source: &'static str,
    result: Result<T, RepositoryError>,
    summarize: impl FnOnce(T) -> String,
) -> String {
    match result {
        Ok(value) => summarize(value),
        Err(e) => {
            warn!(source, error = %e, "Context source unavailable, skipping for this turn");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::NaiveDate;
    use hydrowatt_types::usage::{Bill, DailyUsage, Device, RoomUsage};

    #[derive(Default)]
    struct FakeSource {
        fail_weekly: bool,
        fail_rooms: bool,
        fail_bill: bool,
        fail_devices: bool,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        async fn pause(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
        }
    }

    fn unavailable() -> RepositoryError {
        RepositoryError::Unavailable("backend offline".to_string())
    }

    impl UsageSource for FakeSource {
        async fn fetch_weekly_usage(&self) -> Result<Vec<DailyUsage>, RepositoryError> {
            self.pause().await;
            if self.fail_weekly {
                return Err(unavailable());
            }
            Ok(vec![DailyUsage {
                label: "Mon".to_string(),
                water: 45.0,
                electricity: 12.0,
            }])
        }

        async fn fetch_room_distribution(&self) -> Result<Vec<RoomUsage>, RepositoryError> {
            self.pause().await;
            if self.fail_rooms {
                return Err(unavailable());
            }
            Ok(vec![RoomUsage {
                room: "Kitchen".to_string(),
                total_water: 120.0,
                total_electricity: 30.0,
            }])
        }

        async fn fetch_current_bill(&self) -> Result<Option<Bill>, RepositoryError> {
            self.pause().await;
            if self.fail_bill {
                return Err(unavailable());
            }
            Ok(Some(Bill {
                total_amount: 99.0,
                water_cost: 33.0,
                electricity_cost: 66.0,
                period_start: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                period_end: NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(),
            }))
        }

        async fn fetch_devices(&self) -> Result<Vec<Device>, RepositoryError> {
            self.pause().await;
            if self.fail_devices {
                return Err(unavailable());
            }
            Ok(vec![Device {
                id: "d1".to_string(),
                name: "Heater".to_string(),
                room: None,
                is_active: true,
            }])
        }
    }

    #[tokio::test]
    async fn test_all_sources_present() {
        let aggregator = ContextAggregator::new(FakeSource::default());
        let summary = aggregator.build_context_summaries().await;

        assert_eq!(
            summary.usage_summary,
            "Weekly usage -> Mon: water 45 / elec 12\nRoom distribution -> Kitchen: water 120 / elec 30"
        );
        assert!(summary.billing_summary.starts_with("Current bill (2026-09-01"));
        assert_eq!(summary.device_summary, "Devices -> 1 total, 1 active, 0 inactive");
        assert_eq!(aggregator.source().calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_failed_source_only_empties_its_field() {
        let aggregator = ContextAggregator::new(FakeSource {
            fail_bill: true,
            ..Default::default()
        });
        let summary = aggregator.build_context_summaries().await;

        assert_eq!(summary.billing_summary, "");
        assert!(!summary.usage_summary.is_empty());
        assert!(!summary.device_summary.is_empty());
    }

    #[tokio::test]
    async fn test_partial_usage_failure_keeps_other_half() {
        let aggregator = ContextAggregator::new(FakeSource {
            fail_weekly: true,
            ..Default::default()
        });
        let summary = aggregator.build_context_summaries().await;
        assert_eq!(
            summary.usage_summary,
            "Room distribution -> Kitchen: water 120 / elec 30"
        );
    }

    #[tokio::test]
    async fn test_all_sources_failing_yields_empty_summary() {
        let aggregator = ContextAggregator::new(FakeSource {
            fail_weekly: true,
            fail_rooms: true,
            fail_bill: true,
            fail_devices: true,
            ..Default::default()
        });
        let summary = aggregator.build_context_summaries().await;
        assert!(summary.is_empty());
    }

    #[tokio::test]
    async fn test_idempotent_for_identical_data() {
        let aggregator = ContextAggregator::new(FakeSource::default());
        let first = aggregator.build_context_summaries().await;
        let second = aggregator.build_context_summaries().await;
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sources_are_queried_concurrently() {
        let aggregator = ContextAggregator::new(FakeSource {
            delay: Some(Duration::from_millis(100)),
            ..Default::default()
        });
        let start = tokio::time::Instant::now();
        aggregator.build_context_summaries().await;
        // Sequential would take 400ms of virtual time.
        assert!(start.elapsed() < Duration::from_millis(200));
    }
}
