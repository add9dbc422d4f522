//! The interactive chat loop.
//!
//! Keeps an in-memory transcript, streams each reply through the engine's
//! spawned turn and keeps reading the terminal while it streams so Ctrl+C
//! can stop the turn.

use std::io::Write;
use std::sync::Arc;

use console::style;
use rustyline_async::SharedWriter;
use tracing::{debug, warn};

use hydrowatt_core::assistant::transcript::Transcript;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{ReplyPrinter, reply_source};
use crate::state::AppState;

/// How a streamed turn ended, from the loop's point of view.
#[derive(Debug, PartialEq)]
enum TurnEnd {
    Continue,
    /// Ctrl+D during the turn: stop it and leave the session.
    Exit,
}

/// Run the chat session until `/exit` or Ctrl+D.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let prompt = format!("{} ", style("you >").green().bold());
    let (mut input, mut out) = ChatInput::new(prompt)?;

    let settings = state.engine.settings();
    let provider = state.engine.provider_name();
    print_welcome_banner(&mut out, provider, &settings.model)?;
    let source = reply_source(provider, &settings.model);

    let mut transcript = Transcript::new();

    loop {
        let text = match input.read_line().await {
            InputEvent::Message(text) => text,
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                writeln!(out, "  {}", style("Nothing to stop. Ctrl+D or /exit to quit.").dim())?;
                continue;
            }
        };

        if text.is_empty() {
            continue;
        }

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(&mut out)?,
                ChatCommand::Clear => input.clear(),
                ChatCommand::Exit => break,
                ChatCommand::New => {
                    transcript.clear();
                    writeln!(out, "\n  {}\n", style("Started a new conversation.").dim())?;
                }
                ChatCommand::History => commands::print_history(&mut out, &transcript)?,
            }
            continue;
        }

        let end = run_turn(state, &mut input, &mut out, &mut transcript, text, &source).await?;
        if end == TurnEnd::Exit {
            break;
        }
    }

    writeln!(out, "\n  {}", style("Session ended.").dim())?;
    input.flush();
    Ok(())
}

/// Stream one reply into the transcript and the terminal.
async fn run_turn(
    state: &AppState,
    input: &mut ChatInput,
    out: &mut SharedWriter,
    transcript: &mut Transcript,
    text: String,
    source: &str,
) -> anyhow::Result<TurnEnd> {
    let history = transcript.begin_turn(&text);
    let mut handle = Arc::clone(&state.engine).spawn_reply(history, text);
    let mut printer = ReplyPrinter::new(Some("Assistant"));
    let mut interrupted = false;
    let mut end = TurnEnd::Continue;

    loop {
        tokio::select! {
            chunk = handle.next_chunk() => {
                let Some(chunk) = chunk else {
                    warn!("Reply turn ended without a terminal chunk");
                    break;
                };
                if let Some(fragment) = chunk.content.as_deref() {
                    printer.fragment(out, fragment)?;
                }
                if transcript.apply(&chunk) {
                    break;
                }
            }
            event = input.read_line(), if !interrupted => match event {
                InputEvent::Interrupted => {
                    debug!("Stopping reply on Ctrl+C");
                    interrupted = true;
                    handle.abort();
                }
                InputEvent::Eof => {
                    interrupted = true;
                    end = TurnEnd::Exit;
                    handle.abort();
                }
                InputEvent::Message(_) => {
                    writeln!(out, "  {}", style("Still replying, Ctrl+C to stop.").dim())?;
                }
            },
        }
    }

    printer.finish(out, source, interrupted)?;
    Ok(end)
}
