// Terminal components. Each renders to a String so the session can write it
// wherever it likes.
pub mod banner;
pub mod cost_summary;
pub mod results_table;

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
    Heading,
    Muted,
}

/// Applies `tone` when color output is enabled.
pub fn paint(text: &str, tone: Tone, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match tone {
        Tone::Success => text.green().bold().to_string(),
        Tone::Warning => text.yellow().bold().to_string(),
        Tone::Error => text.red().bold().to_string(),
        Tone::Heading => text.cyan().bold().to_string(),
        Tone::Muted => text.dimmed().to_string(),
    }
}
