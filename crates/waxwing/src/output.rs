//! Terminal output for the `wax` CLI.
//!
//! Each command builds its own rows or detail text; this module owns
//! the `--output` dispatch, the rounded table style, and quiet-mode
//! suppression. Plain mode prints one identifier per line so output
//! can feed shell pipelines.

use std::io::{self, IsTerminal, Write};

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::{ColorMode, OutputFormat};

/// Whether colored output should be produced for `mode`.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Write `text` to stdout with a trailing newline, unless quiet mode
/// suppresses it.
pub fn emit(text: &str, quiet: bool) {
    if quiet || text.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{text}");
}

/// Render list data: `rows` feed the table view, `ids` feed plain mode,
/// JSON serializes the underlying `data`.
pub fn list<T, R>(format: &OutputFormat, data: &[T], rows: Vec<R>, ids: Vec<String>) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => rounded_table(&rows),
        OutputFormat::Json => json(data, false),
        OutputFormat::JsonCompact => json(data, true),
        OutputFormat::Plain => ids.join("\n"),
    }
}

/// Render a single item: `detail` is the human-readable view, `id` the
/// plain-mode one.
pub fn single<T: serde::Serialize>(
    format: &OutputFormat,
    data: &T,
    detail: String,
    id: String,
) -> String {
    match format {
        OutputFormat::Table => detail,
        OutputFormat::Json => json(data, false),
        OutputFormat::JsonCompact => json(data, true),
        OutputFormat::Plain => id,
    }
}

pub fn rounded_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    result.unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {e}\"}}"))
}
