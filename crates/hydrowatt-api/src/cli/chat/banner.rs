//! Welcome banner for chat sessions.

use std::io::Write;

use console::style;

/// Print the banner: which provider answers (or that replies are offline)
/// and a hint about commands.
pub fn print_welcome_banner(
    out: &mut impl Write,
    provider: Option<&str>,
    model: &str,
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {}", style("Hydrowatt assistant").cyan().bold())?;
    writeln!(
        out,
        "  {}",
        style("Questions about your water and electricity usage, bills and devices").dim()
    )?;
    writeln!(out)?;
    match provider {
        Some(provider) => {
            writeln!(out, "  {}  {}", style("Provider:").bold(), style(provider).dim())?;
            writeln!(out, "  {}     {}", style("Model:").bold(), style(model).dim())?;
        }
        None => {
            writeln!(
                out,
                "  {}  {}",
                style("Provider:").bold(),
                style("none (offline replies; set an API key to enable)").yellow()
            )?;
        }
    }
    writeln!(out)?;
    writeln!(out, "  {}", style("Type /help for commands, Ctrl+D to exit").dim())?;
    writeln!(out, "  {}", style("---").dim())?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_names_provider_and_model() {
        let mut out = Vec::new();
        print_welcome_banner(&mut out, Some("mistral"), "mistral-small-latest").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("mistral"));
        assert!(text.contains("mistral-small-latest"));
    }

    #[test]
    fn test_banner_offline() {
        let mut out = Vec::new();
        print_welcome_banner(&mut out, None, "gpt-4o-mini").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("offline"));
        assert!(!text.contains("gpt-4o-mini"));
    }
}
