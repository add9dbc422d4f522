//! SQLite usage source implementation.
//!
//! Implements `UsageSource` from `hydrowatt-core` over the `usage_readings`,
//! `bills` and `devices` tables, and provides the inserts used by the
//! `record` commands.

use chrono::{Duration, Local, NaiveDate};
use sqlx::Row;
use uuid::Uuid;

use hydrowatt_core::context::source::UsageSource;
use hydrowatt_types::error::RepositoryError;
use hydrowatt_types::usage::{Bill, DailyUsage, Device, RoomUsage, UsageReading};

use super::pool::DatabasePool;

/// Days covered by the weekly trend, today included.
const WEEK_DAYS: i64 = 7;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed implementation of `UsageSource`.
#[derive(Clone)]
pub struct SqliteUsageSource {
    pool: DatabasePool,
}

impl SqliteUsageSource {
    /// Create a new source backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Daily totals for the seven days ending on `today`, oldest first.
    /// Days without readings are omitted.
    pub async fn weekly_usage_as_of(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<DailyUsage>, RepositoryError> {
        let start = today - Duration::days(WEEK_DAYS - 1);

        let rows = sqlx::query(
            "SELECT recorded_on, SUM(water) AS water, SUM(electricity) AS electricity
             FROM usage_readings
             WHERE recorded_on BETWEEN ? AND ?
             GROUP BY recorded_on
             ORDER BY recorded_on ASC",
        )
        .bind(format_date(start))
        .bind(format_date(today))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows.iter()
            .map(|row| -> Result<DailyUsage, RepositoryError> {
                let day = parse_date(&row.try_get::<String, _>("recorded_on").map_err(query_error)?)?;
                Ok(DailyUsage {
                    label: day.format("%a").to_string(),
                    water: row.try_get("water").map_err(query_error)?,
                    electricity: row.try_get("electricity").map_err(query_error)?,
                })
            })
            .collect()
    }

    /// Insert one reading.
    pub async fn record_reading(&self, reading: &UsageReading) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO usage_readings (id, room, water, electricity, recorded_on)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(Uuid::now_v7().to_string())
        .bind(&reading.room)
        .bind(reading.water)
        .bind(reading.electricity)
        .bind(format_date(reading.recorded_on))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;
        Ok(())
    }

    /// Insert one billing period.
    pub async fn record_bill(&self, bill: &Bill) -> Result<(), RepositoryError> {
        if bill.period_end < bill.period_start {
            return Err(RepositoryError::InvalidInput(format!(
                "bill period ends ({}) before it starts ({})",
                bill.period_end, bill.period_start
            )));
        }

        sqlx::query(
            "INSERT INTO bills (id, total_amount, water_cost, electricity_cost, period_start, period_end)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::now_v7().to_string())
        .bind(bill.total_amount)
        .bind(bill.water_cost)
        .bind(bill.electricity_cost)
        .bind(format_date(bill.period_start))
        .bind(format_date(bill.period_end))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;
        Ok(())
    }

    /// Insert a device, or update it when the id already exists.
    pub async fn upsert_device(&self, device: &Device) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO devices (id, name, room, is_active) VALUES (?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, room = excluded.room, is_active = excluded.is_active",
        )
        .bind(&device.id)
        .bind(&device.name)
        .bind(&device.room)
        .bind(device.is_active)
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;
        Ok(())
    }
}

impl UsageSource for SqliteUsageSource {
    async fn fetch_weekly_usage(&self) -> Result<Vec<DailyUsage>, RepositoryError> {
        self.weekly_usage_as_of(Local::now().date_naive()).await
    }

    async fn fetch_room_distribution(&self) -> Result<Vec<RoomUsage>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT room, SUM(water) AS total_water, SUM(electricity) AS total_electricity
             FROM usage_readings
             GROUP BY room
             ORDER BY total_water DESC, room ASC",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows.iter()
            .map(|row| -> Result<RoomUsage, RepositoryError> {
                Ok(RoomUsage {
                    room: row.try_get("room").map_err(query_error)?,
                    total_water: row.try_get("total_water").map_err(query_error)?,
                    total_electricity: row.try_get("total_electricity").map_err(query_error)?,
                })
            })
            .collect()
    }

    async fn fetch_current_bill(&self) -> Result<Option<Bill>, RepositoryError> {
        let row = sqlx::query(
            "SELECT total_amount, water_cost, electricity_cost, period_start, period_end
             FROM bills
             ORDER BY period_end DESC
             LIMIT 1",
        )
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let period_start: String = row.try_get("period_start").map_err(query_error)?;
        let period_end: String = row.try_get("period_end").map_err(query_error)?;
        Ok(Some(Bill {
            total_amount: row.try_get("total_amount").map_err(query_error)?,
            water_cost: row.try_get("water_cost").map_err(query_error)?,
            electricity_cost: row.try_get("electricity_cost").map_err(query_error)?,
            period_start: parse_date(&period_start)?,
            period_end: parse_date(&period_end)?,
        }))
    }

    async fn fetch_devices(&self) -> Result<Vec<Device>, RepositoryError> {
        let rows = sqlx::query("SELECT id, name, room, is_active FROM devices ORDER BY name ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter()
            .map(|row| -> Result<Device, RepositoryError> {
                Ok(Device {
                    id: row.try_get("id").map_err(query_error)?,
                    name: row.try_get("name").map_err(query_error)?,
                    room: row.try_get("room").map_err(query_error)?,
                    is_active: row.try_get("is_active").map_err(query_error)?,
                })
            })
            .collect()
    }
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, RepositoryError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| RepositoryError::Query(format!("invalid date '{s}': {e}")))
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_source() -> SqliteUsageSource {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        SqliteUsageSource::new(DatabasePool::new(&url).await.unwrap())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reading(room: &str, water: f64, electricity: f64, on: NaiveDate) -> UsageReading {
        UsageReading {
            room: room.to_string(),
            water,
            electricity,
            recorded_on: on,
        }
    }

    #[tokio::test]
    async fn test_empty_database() {
        let source = test_source().await;
        assert!(source.fetch_weekly_usage().await.unwrap().is_empty());
        assert!(source.fetch_room_distribution().await.unwrap().is_empty());
        assert!(source.fetch_current_bill().await.unwrap().is_none());
        assert!(source.fetch_devices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_weekly_usage_groups_days_in_order() {
        let source = test_source().await;
        // 2026-10-19 is a Monday.
        let today = date(2026, 10, 19);
        for r in [
            reading("Kitchen", 20.0, 5.0, date(2026, 10, 19)),
            reading("Bathroom", 25.0, 7.0, date(2026, 10, 19)),
            reading("Kitchen", 30.0, 4.0, date(2026, 10, 13)),
            // Outside the window on both sides.
            reading("Kitchen", 99.0, 99.0, date(2026, 10, 12)),
            reading("Kitchen", 99.0, 99.0, date(2026, 10, 20)),
        ] {
            source.record_reading(&r).await.unwrap();
        }

        let week = source.weekly_usage_as_of(today).await.unwrap();
        assert_eq!(
            week,
            vec![
                DailyUsage {
                    label: "Tue".to_string(),
                    water: 30.0,
                    electricity: 4.0,
                },
                DailyUsage {
                    label: "Mon".to_string(),
                    water: 45.0,
                    electricity: 12.0,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_room_distribution_highest_water_first() {
        let source = test_source().await;
        let day = date(2026, 10, 1);
        for r in [
            reading("Kitchen", 10.0, 2.0, day),
            reading("Bathroom", 50.0, 1.0, day),
            reading("Kitchen", 15.0, 3.0, day),
        ] {
            source.record_reading(&r).await.unwrap();
        }

        let rooms = source.fetch_room_distribution().await.unwrap();
        let names: Vec<&str> = rooms.iter().map(|r| r.room.as_str()).collect();
        assert_eq!(names, vec!["Bathroom", "Kitchen"]);
        assert_eq!(rooms[1].total_water, 25.0);
        assert_eq!(rooms[1].total_electricity, 5.0);
    }

    #[tokio::test]
    async fn test_current_bill_is_latest_period() {
        let source = test_source().await;
        for (start, end, total) in [
            (date(2026, 8, 1), date(2026, 8, 31), 80.0),
            (date(2026, 9, 1), date(2026, 9, 30), 120.5),
        ] {
            source
                .record_bill(&Bill {
                    total_amount: total,
                    water_cost: 40.0,
                    electricity_cost: total - 40.0,
                    period_start: start,
                    period_end: end,
                })
                .await
                .unwrap();
        }

        let bill = source.fetch_current_bill().await.unwrap().unwrap();
        assert_eq!(bill.total_amount, 120.5);
        assert_eq!(bill.period_end, date(2026, 9, 30));
    }

    #[tokio::test]
    async fn test_bill_with_inverted_period_rejected() {
        let source = test_source().await;
        let result = source
            .record_bill(&Bill {
                total_amount: 1.0,
                water_cost: 0.5,
                electricity_cost: 0.5,
                period_start: date(2026, 9, 30),
                period_end: date(2026, 9, 1),
            })
            .await;
        assert!(matches!(result, Err(RepositoryError::InvalidInput(_))));
        assert!(source.fetch_current_bill().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_devices_ordered_by_name_and_upserted() {
        let source = test_source().await;
        for (id, name, active) in [("d1", "Water heater", true), ("d2", "Dishwasher", false)] {
            source
                .upsert_device(&Device {
                    id: id.to_string(),
                    name: name.to_string(),
                    room: Some("Kitchen".to_string()),
                    is_active: active,
                })
                .await
                .unwrap();
        }
        source
            .upsert_device(&Device {
                id: "d2".to_string(),
                name: "Dishwasher".to_string(),
                room: None,
                is_active: true,
            })
            .await
            .unwrap();

        let devices = source.fetch_devices().await.unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name, "Dishwasher");
        assert!(devices[0].is_active);
        assert_eq!(devices[0].room, None);
        assert_eq!(devices[1].name, "Water heater");
    }

    #[tokio::test]
    async fn test_feeds_context_aggregator() {
        use hydrowatt_core::context::aggregator::ContextAggregator;

        let source = test_source().await;
        source
            .record_reading(&reading("Kitchen", 45.0, 12.0, Local::now().date_naive()))
            .await
            .unwrap();

        let summary = ContextAggregator::new(source).build_context_summaries().await;
        assert!(summary.usage_summary.starts_with("Weekly usage -> "));
        assert!(summary.usage_summary.contains("Room distribution -> Kitchen: water 45 / elec 12"));
        assert_eq!(summary.billing_summary, "");
        assert_eq!(summary.device_summary, "");
    }
}
