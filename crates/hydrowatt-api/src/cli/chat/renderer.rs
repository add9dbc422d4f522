//! Streaming reply output shared by `chat` and `ask`.

use std::io::Write;
use std::time::{Duration, Instant};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Writes fragments as they arrive and a footer once the turn ends.
pub struct ReplyPrinter {
    label: Option<String>,
    started_at: Instant,
    printed_any: bool,
}

impl ReplyPrinter {
    /// `label` is printed once before the first fragment (e.g. "Assistant").
    pub fn new(label: Option<&str>) -> Self {
        Self {
            label: label.map(str::to_string),
            started_at: Instant::now(),
            printed_any: false,
        }
    }

    pub fn printed_any(&self) -> bool {
        self.printed_any
    }

    pub fn fragment(&mut self, out: &mut impl Write, text: &str) -> std::io::Result<()> {
        if !self.printed_any {
            self.printed_any = true;
            if let Some(label) = &self.label {
                write!(out, "\n  {} ", style(label).cyan().bold())?;
            }
        }
        write!(out, "{text}")?;
        out.flush()
    }

    /// End the reply line and print `| 1.4s · source`, noting an interrupted turn.
    pub fn finish(
        &mut self,
        out: &mut impl Write,
        source: &str,
        interrupted: bool,
    ) -> std::io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", footer(self.started_at.elapsed(), source, interrupted))?;
        writeln!(out)
    }
}

fn footer(elapsed: Duration, source: &str, interrupted: bool) -> String {
    let mut footer = format!(
        "  {} {} {} {}",
        style("|").dim(),
        style(format!("{:.1}s", elapsed.as_secs_f64())).dim(),
        style("\u{00b7}").dim(),
        style(source).dim(),
    );
    if interrupted {
        footer.push_str(&format!(" {} {}", style("\u{00b7}").dim(), style("stopped").yellow()));
    }
    footer
}

/// Spinner shown until the first fragment arrives.
///
/// Only for non-interactive output; the chat loop's raw-mode terminal
/// does not mix with indicatif.
pub fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Label for where replies come from: the provider and model, or "offline".
pub fn reply_source(provider: Option<&str>, model: &str) -> String {
    match provider {
        Some(provider) => format!("{provider}/{model}"),
        None => "offline".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_printed_once() {
        let mut printer = ReplyPrinter::new(Some("Assistant"));
        let mut out = Vec::new();
        assert!(!printer.printed_any());
        printer.fragment(&mut out, "Hello").unwrap();
        printer.fragment(&mut out, " there").unwrap();
        assert!(printer.printed_any());

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Assistant").count(), 1);
        assert!(text.ends_with("Hello there"));
    }

    #[test]
    fn test_unlabelled_output_is_raw() {
        let mut printer = ReplyPrinter::new(None);
        let mut out = Vec::new();
        printer.fragment(&mut out, "42 L").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "42 L");
    }

    #[test]
    fn test_footer_marks_interruption() {
        let done = footer(Duration::from_millis(1500), "openai/gpt-4o-mini", false);
        assert!(done.contains("1.5"));
        assert!(done.contains("openai/gpt-4o-mini"));
        assert!(!done.contains("stopped"));
        assert!(footer(Duration::ZERO, "offline", true).contains("stopped"));
    }

    #[test]
    fn test_reply_source() {
        assert_eq!(reply_source(Some("gemini"), "gemini-2.0-flash"), "gemini/gemini-2.0-flash");
        assert_eq!(reply_source(None, "gpt-4o-mini"), "offline");
    }
}
