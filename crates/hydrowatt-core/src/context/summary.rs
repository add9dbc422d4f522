//! Reducers from raw source records to one-line context digests.
//!
//! Every reducer returns the empty string for an empty input, which the
//! rest of the assistant reads as "source unavailable".

use hydrowatt_types::usage::{Bill, DailyUsage, Device, RoomUsage};

/// `Weekly usage -> Mon: water 45 / elec 12; Tue: water 38.5 / elec 9`
pub fn summarize_weekly_usage(days: &[DailyUsage]) -> String {
    if days.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = days
        .iter()
        .map(|d| {
            format!(
                "{}: water {} / elec {}",
                d.label,
                format_quantity(d.water),
                format_quantity(d.electricity)
            )
        })
        .collect();
    format!("Weekly usage -> {}", parts.join("; "))
}

/// `Room distribution -> Kitchen: water 120 / elec 30; Bathroom: ...`
pub fn summarize_room_distribution(rooms: &[RoomUsage]) -> String {
    if rooms.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = rooms
        .iter()
        .map(|r| {
            format!(
                "{}: water {} / elec {}",
                r.room,
                format_quantity(r.total_water),
                format_quantity(r.total_electricity)
            )
        })
        .collect();
    format!("Room distribution -> {}", parts.join("; "))
}

/// `Current bill (2026-09-01 to 2026-09-30) -> total 120.50 (water 40.00 / elec 80.50)`
pub fn summarize_bill(bill: Option<&Bill>) -> String {
    match bill {
        Some(b) => format!(
            "Current bill ({} to {}) -> total {:.2} (water {:.2} / elec {:.2})",
            b.period_start, b.period_end, b.total_amount, b.water_cost, b.electricity_cost
        ),
        None => String::new(),
    }
}

/// `Devices -> 5 total, 3 active, 2 inactive`
pub fn summarize_devices(devices: &[Device]) -> String {
    if devices.is_empty() {
        return String::new();
    }
    let active = devices.iter().filter(|d| d.is_active).count();
    format!(
        "Devices -> {} total, {} active, {} inactive",
        devices.len(),
        active,
        devices.len() - active
    )
}

/// Join the weekly and room digests into the single usage summary field.
pub fn combine_usage(weekly: String, rooms: String) -> String {
    [weekly, rooms]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// One decimal place, dropped entirely for whole numbers.
fn format_quantity(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}
