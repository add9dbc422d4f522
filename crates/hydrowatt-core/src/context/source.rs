//! Usage source trait definition.

use hydrowatt_types::error::RepositoryError;
use hydrowatt_types::usage::{Bill, DailyUsage, Device, RoomUsage};

/// Read-only queries backing the assistant's context.
///
/// Implementations live in hydrowatt-infra (e.g., `SqliteUsageSource`).
/// Every method may fail or return an empty result; callers never assume
/// success. Uses native async fn in traits (Rust 2024 edition, no
/// async_trait macro).
pub trait UsageSource: Send + Sync {
    /// Per-day consumption for the trailing week, oldest first.
    fn fetch_weekly_usage(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<DailyUsage>, RepositoryError>> + Send;

    /// Consumption totals grouped by room.
    fn fetch_room_distribution(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<RoomUsage>, RepositoryError>> + Send;

    /// The current (most recent) bill, if any.
    fn fetch_current_bill(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<Bill>, RepositoryError>> + Send;

    /// All registered devices.
    fn fetch_devices(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Device>, RepositoryError>> + Send;
}
