//! Terminal output formatting.

use colored::Colorize;

/// Print markdown with light terminal highlighting.
///
/// Headings are bold, fenced blocks are green, list markers are dimmed.
/// Everything else prints as-is.
pub fn print_markdown(text: &str) {
    for line in styled_lines(text) {
        println!("{}", line);
    }
}

fn styled_lines(text: &str) -> Vec<String> {
    let mut in_fence = false;
    let mut lines = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            lines.push(trimmed.dimmed().to_string());
        } else if in_fence {
            lines.push(format!("  {}", line.green()));
        } else if trimmed.starts_with('#') {
            lines.push(trimmed.trim_start_matches('#').trim().cyan().bold().to_string());
        } else if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
            lines.push(format!("  {} {}", "•".dimmed(), item));
        } else {
            lines.push(line.to_string());
        }
    }

    lines
}
