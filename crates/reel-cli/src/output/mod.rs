//! Terminal output formatting and utilities.
//!
//! Provides consistent output formatting across all commands, including
//! colors, aligned tables and error messages.

pub mod errors;

use std::env;
use std::io::{self, IsTerminal};

const RED: &str = "31";
const GREEN: &str = "32";
const YELLOW: &str = "33";
const DIM: &str = "2";

/// Applies ANSI color codes when both stdio streams are terminals and
/// NO_COLOR is unset, and passes text through untouched otherwise.
#[derive(Clone, Copy)]
pub(crate) struct Palette {
    color: bool,
}

impl Palette {
    pub(crate) fn detect() -> Self {
        let color = env::var_os("NO_COLOR").is_none()
            && io::stdout().is_terminal()
            && io::stderr().is_terminal();
        Self { color }
    }

    #[cfg(test)]
    pub(crate) fn plain() -> Self {
        Self { color: false }
    }

    pub(crate) fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }
}

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    palette: Palette,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new() -> Self {
        Self {
            palette: Palette::detect(),
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!("{}", self.palette.paint(DIM, message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", self.palette.paint(GREEN, "✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        println!("{} {}", self.palette.paint(YELLOW, "⚠"), message);
    }

    /// Print a step message with emoji
    pub fn step(&self, emoji: &str, message: &str) {
        println!("{} {}", emoji, message);
    }

    /// Print an aligned table with a header row
    pub fn table(&self, headers: &[&str], rows: &[Vec<String>]) {
        print!("{}", render_table(headers, rows));
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Render rows into a column-aligned table string
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.iter().map(|h| h.to_string()), &widths);
    push_row(
        &mut out,
        widths.iter().map(|w| "-".repeat(*w)),
        &widths,
    );
    for row in rows {
        push_row(&mut out, row.iter().cloned(), &widths);
    }
    out
}

fn push_row(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_disabled_passes_text_through() {
        let palette = Palette::plain();
        assert_eq!(palette.paint(GREEN, "done"), "done");
    }

    #[test]
    fn test_paint_wraps_text_in_escape_codes() {
        let palette = Palette { color: true };
        assert_eq!(palette.paint(RED, "failed"), "\x1b[31mfailed\x1b[0m");
    }

    #[test]
    fn test_table_alignment() {
        let rows = vec![
            vec!["550".to_string(), "Fight Club".to_string()],
            vec!["101".to_string(), "The Matrix".to_string()],
        ];
        let table = render_table(&["ID", "Title"], &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "ID   Title");
        assert_eq!(lines[1], "---  ----------");
        assert_eq!(lines[2], "550  Fight Club");
        assert_eq!(lines[3], "101  The Matrix");
    }

    #[test]
    fn test_table_with_no_rows() {
        let table = render_table(&["ID", "Title"], &[]);
        assert_eq!(table.lines().count(), 2);
    }
}
