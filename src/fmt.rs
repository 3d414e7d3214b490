//! Human-readable chart file format
//!
//! Writes chart records with each pattern row, color-tag row, and palette
//! color on its own line, so saved charts diff cleanly under version
//! control. The layout is purely cosmetic: any JSON parser reads the files
//! back, and loading additionally accepts JSON5 comments and trailing
//! commas for hand-edited charts.

use std::fs;
use std::path::Path;

use crate::chart::{Chart, ChartError, ChartRecord};

/// Format a chart record in the canonical pretty form.
pub fn format_record(record: &ChartRecord) -> String {
    let mut s = String::from("{\n");

    s.push_str("  \"pattern\": [\n");
    push_string_grid(&mut s, &record.pattern, "    ");
    s.push_str("  ],\n");

    s.push_str("  \"color_tags\": [\n");
    push_string_grid(&mut s, &record.color_tags, "    ");
    s.push_str("  ],\n");

    s.push_str("  \"palette\": {\n");
    s.push_str("    \"colors\": [\n");
    for (i, color) in record.palette.colors.iter().enumerate() {
        let comma = if i + 1 < record.palette.colors.len() { "," } else { "" };
        s.push_str(&format!(
            "      [{}, {}, {}]{}\n",
            color.0, color.1, color.2, comma
        ));
    }
    s.push_str("    ],\n");
    s.push_str(&format!(
        "    \"full_names\": {},\n",
        format_string_list(&record.palette.full_names)
    ));
    s.push_str(&format!(
        "    \"short_tags\": {}\n",
        format_string_list(&record.palette.short_tags)
    ));
    s.push_str("  }\n}\n");

    s
}

/// Write a grid of strings one row per line, each row a single-line JSON
/// array.
fn push_string_grid(s: &mut String, grid: &[Vec<String>], indent: &str) {
    for (i, row) in grid.iter().enumerate() {
        s.push_str(indent);
        s.push_str(&format_string_list(row));
        if i + 1 < grid.len() {
            s.push(',');
        }
        s.push('\n');
    }
}

/// Format a list of strings as a single-line JSON array.
fn format_string_list(items: &[String]) -> String {
    let mut s = String::from("[");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            s.push_str(", ");
        }
        s.push('"');
        s.push_str(&escape_json_string(item));
        s.push('"');
    }
    s.push(']');
    s
}

/// Escape a string for JSON output.
fn escape_json_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str(r#"\""#),
            '\\' => result.push_str(r"\\"),
            '\n' => result.push_str(r"\n"),
            '\r' => result.push_str(r"\r"),
            '\t' => result.push_str(r"\t"),
            c if c.is_control() => {
                result.push_str(&format!(r"\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result
}

/// Save a chart to `path` in the pretty format, creating parent directories
/// as needed.
pub fn save_chart(path: &Path, chart: &Chart) -> Result<(), ChartError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, format_record(&chart.to_record()))?;
    Ok(())
}

/// Load a chart from a file written by [`save_chart`] (or hand-edited).
pub fn load_chart(path: &Path) -> Result<Chart, ChartError> {
    let content = fs::read_to_string(path)?;
    Chart::from_json_str(&content)
}
