//! One-shot question: `hwatt ask <text>`.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use super::chat::renderer::{ReplyPrinter, reply_source, thinking_spinner};
use crate::state::AppState;

/// Run a single turn with no history and print the reply as it streams.
///
/// With `json`, nothing is printed until the turn ends; the reply is then
/// written as one JSON object. Ctrl+C stops the turn and keeps what arrived.
pub async fn ask(state: &AppState, text: &str, json: bool) -> Result<()> {
    let mut handle = Arc::clone(&state.engine).spawn_reply(Vec::new(), text.to_string());

    let spinner = (!json).then(thinking_spinner);
    let mut printer = ReplyPrinter::new(None);
    let mut stdout = std::io::stdout();
    let mut reply = String::new();
    let mut interrupted = false;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            chunk = handle.next_chunk() => {
                let Some(chunk) = chunk else { break };
                if let Some(fragment) = chunk.content.as_deref() {
                    if let Some(spinner) = &spinner {
                        spinner.finish_and_clear();
                    }
                    if !json {
                        printer.fragment(&mut stdout, fragment)?;
                    }
                    reply.push_str(fragment);
                }
                if chunk.done {
                    break;
                }
            }
            _ = &mut ctrl_c, if !interrupted => {
                debug!("Stopping reply on Ctrl+C");
                interrupted = true;
                handle.abort();
            }
        }
    }

    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    let settings = state.engine.settings();
    let provider = state.engine.provider_name();

    if json {
        let output = serde_json::json!({
            "reply": reply,
            "provider": provider,
            "model": provider.map(|_| settings.model.as_str()),
            "interrupted": interrupted,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if printer.printed_any() {
        writeln!(stdout)?;
    }
    if interrupted {
        eprintln!("{}", console::style("(stopped)").yellow());
    }
    debug!(source = %reply_source(provider, &settings.model), "Reply complete");
    Ok(())
}
