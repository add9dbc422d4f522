//! Records returned by the dashboard's read-only data sources.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Water and electricity consumed on one day of the weekly trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyUsage {
    /// Short day label, e.g. "Mon".
    pub label: String,
    /// Litres.
    pub water: f64,
    /// Kilowatt-hours.
    pub electricity: f64,
}

/// One metered reading for a room on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageReading {
    pub room: String,
    pub water: f64,
    pub electricity: f64,
    pub recorded_on: NaiveDate,
}

/// Consumption totals for one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomUsage {
    pub room: String,
    pub total_water: f64,
    pub total_electricity: f64,
}

/// The most recent billing period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub total_amount: f64,
    pub water_cost: f64,
    pub electricity_cost: f64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// A metered device registered on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub room: Option<String>,
    pub is_active: bool,
}
