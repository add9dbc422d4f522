//! `hwatt context`: the summaries the assistant would answer from.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use hydrowatt_types::context::ContextSummary;

use crate::state::AppState;

pub async fn show_context(state: &AppState, json: bool) -> Result<()> {
    let summary = state.engine.aggregator().build_context_summaries().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("Assistant context").bold());
    println!();
    println!("{}", context_table(&summary));
    if summary.is_empty() {
        println!();
        println!(
            "  {}",
            style("No data yet. Add some with `hwatt record reading|bill|device`.").dim()
        );
    }
    println!();
    Ok(())
}

fn context_table(summary: &ContextSummary) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Section").fg(Color::White),
        Cell::new("Summary").fg(Color::White),
    ]);

    for (section, text) in [
        ("Usage", &summary.usage_summary),
        ("Billing", &summary.billing_summary),
        ("Devices", &summary.device_summary),
    ] {
        let cell = if text.is_empty() {
            Cell::new("unavailable").fg(Color::DarkGrey)
        } else {
            Cell::new(text)
        };
        table.add_row(vec![Cell::new(section).fg(Color::Cyan), cell]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_marks_missing_sections() {
        let summary = ContextSummary {
            usage_summary: String::new(),
            billing_summary: "Current bill: $120.50 (water $40.00, electricity $80.50) for 2026-09-01 to 2026-09-30.".to_string(),
            device_summary: String::new(),
        };
        let rendered = context_table(&summary).to_string();
        assert!(rendered.contains("Billing"));
        assert!(rendered.contains("120.50"));
        assert_eq!(rendered.matches("unavailable").count(), 2);
    }
}
