//! `hwatt record`: write readings, bills and devices into the local database.

use anyhow::{Result, bail};
use chrono::Local;
use console::style;
use tracing::info;
use uuid::Uuid;

use hydrowatt_types::usage::{Bill, Device, UsageReading};

use super::RecordResource;
use crate::state::AppState;

pub async fn record(state: &AppState, resource: RecordResource, json: bool) -> Result<()> {
    let source = state.usage_source();

    let (kind, value) = match resource {
        RecordResource::Reading { room, water, electricity, date } => {
            let reading = UsageReading {
                room: non_empty("room", room)?,
                water: non_negative("water", water)?,
                electricity: non_negative("electricity", electricity)?,
                recorded_on: date.unwrap_or_else(|| Local::now().date_naive()),
            };
            source.record_reading(&reading).await?;
            info!(room = %reading.room, date = %reading.recorded_on, "Recorded usage reading");
            ("reading", serde_json::to_value(&reading)?)
        }
        RecordResource::Bill { total, water, electricity, from, to } => {
            let bill = Bill {
                total_amount: non_negative("total", total)?,
                water_cost: non_negative("water", water)?,
                electricity_cost: non_negative("electricity", electricity)?,
                period_start: from,
                period_end: to,
            };
            source.record_bill(&bill).await?;
            info!(period_end = %bill.period_end, "Recorded bill");
            ("bill", serde_json::to_value(&bill)?)
        }
        RecordResource::Device { name, room, id, inactive } => {
            let device = Device {
                id: id.unwrap_or_else(|| Uuid::now_v7().to_string()),
                name: non_empty("name", name)?,
                room: room.filter(|r| !r.trim().is_empty()),
                is_active: !inactive,
            };
            source.upsert_device(&device).await?;
            info!(id = %device.id, "Saved device");
            ("device", serde_json::to_value(&device)?)
        }
    };

    if json {
        let output = serde_json::json!({ "recorded": kind, "value": value });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!();
        println!("  {} Recorded {kind}.", style("✓").green().bold());
        println!();
    }
    Ok(())
}

fn non_empty(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        bail!("{field} must not be empty");
    }
    Ok(trimmed.to_string())
}

fn non_negative(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        bail!("{field} must be a non-negative number, got {value}");
    }
    Ok(value)
}
