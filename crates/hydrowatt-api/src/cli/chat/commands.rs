//! Slash commands handled by the chat loop itself.
//!
//! Only session controls live here. Everything else, including unknown
//! slash input, is sent to the assistant, which answers `/usage`,
//! `/devices`, `/billing` and `/help` from the current context.

use std::io::Write;

use console::style;

use hydrowatt_core::assistant::command::HELP_TEXT;
use hydrowatt_core::assistant::transcript::Transcript;
use hydrowatt_types::chat::MessageRole;

/// Longest message preview shown by `/history`, in characters.
const HISTORY_PREVIEW: usize = 100;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show local and assistant commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Forget the conversation so far.
    New,
    /// Show the conversation so far.
    History,
}

/// Parse user input as a local chat command.
///
/// Returns `None` for anything the assistant should answer.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/new" | "/reset" => Some(ChatCommand::New),
        "/history" => Some(ChatCommand::History),
        _ => None,
    }
}

pub fn print_help(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out)?;
    for line in HELP_TEXT.lines() {
        writeln!(out, "  {line}")?;
    }
    writeln!(out)?;
    writeln!(out, "  {}", style("Session commands:").bold())?;
    writeln!(out, "  {}    {}", style("/clear").cyan(), "Clear the screen")?;
    writeln!(out, "  {}      {}", style("/new").cyan(), "Forget the conversation so far")?;
    writeln!(out, "  {}  {}", style("/history").cyan(), "Show the conversation so far")?;
    writeln!(out, "  {}     {}", style("/exit").cyan(), "End the chat session")?;
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        style("Ctrl+C stops the current reply, Ctrl+D exits").dim()
    )?;
    writeln!(out)
}

pub fn print_history(out: &mut impl Write, transcript: &Transcript) -> std::io::Result<()> {
    writeln!(out)?;
    if transcript.is_empty() {
        writeln!(out, "  {}", style("No messages yet.").dim())?;
    }
    for message in transcript.messages() {
        let label = match message.role {
            MessageRole::User => style("You").green().bold(),
            MessageRole::Assistant => style("Assistant").cyan().bold(),
            MessageRole::System => style("System").dim(),
        };
        writeln!(out, "  {label} {}", preview(&message.content))?;
    }
    writeln!(out)
}

fn preview(content: &str) -> String {
    let single_line = content.replace('\n', " ");
    if single_line.chars().count() > HISTORY_PREVIEW {
        let cut: String = single_line.chars().take(HISTORY_PREVIEW - 3).collect();
        format!("{cut}...")
    } else {
        single_line
    }
}
