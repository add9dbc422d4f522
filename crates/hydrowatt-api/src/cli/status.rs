//! `hwatt status`: configuration and provider overview.

use anyhow::Result;
use console::style;

use hydrowatt_infra::config::database_url;
use hydrowatt_infra::llm::requires_base_url;

use crate::state::AppState;

pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let assistant = &state.config.assistant;
    let provider = state.engine.provider_name();
    let database = database_url(&state.config, &state.data_dir);
    let summary = state.engine.aggregator().build_context_summaries().await;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "database_url": database,
            "assistant": {
                "configured_provider": assistant.provider.to_string(),
                "active_provider": provider,
                "model": assistant.model,
                "temperature": assistant.temperature,
                "history_limit": assistant.history_limit,
                "api_key_env": assistant.api_key_env,
            },
            "context": {
                "usage": !summary.usage_summary.is_empty(),
                "billing": !summary.billing_summary.is_empty(),
                "devices": !summary.device_summary.is_empty(),
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let check_mark = |ok: bool| {
        if ok {
            format!("{}", style("✓").green())
        } else {
            format!("{}", style("✗").red())
        }
    };

    println!();
    println!("  {} v{}", style("Hydrowatt").cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!();
    println!("  {}", style("── Assistant ──").dim());
    match provider {
        Some(name) => println!("  Provider: {} ({})", style(name).bold(), assistant.model),
        None if requires_base_url(assistant.provider) && assistant.base_url.is_none() => println!(
            "  Provider: {} (set assistant.base_url for '{}')",
            style("offline").yellow(),
            assistant.provider
        ),
        None => println!(
            "  Provider: {} (set {} to enable '{}')",
            style("offline").yellow(),
            assistant.api_key_env,
            assistant.provider
        ),
    }
    println!("  History:  last {} messages", assistant.history_limit);
    println!();
    println!("  {}", style("── Data ──").dim());
    println!("  Directory: {}", state.data_dir.display());
    println!("  Database:  {database}");
    println!("  {} usage", check_mark(!summary.usage_summary.is_empty()));
    println!("  {} billing", check_mark(!summary.billing_summary.is_empty()));
    println!("  {} devices", check_mark(!summary.device_summary.is_empty()));
    println!();
    Ok(())
}
