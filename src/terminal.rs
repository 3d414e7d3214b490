//! Terminal rendering utilities for colored chart display
//!
//! Provides ANSI escape sequence generation for displaying charts with
//! true-color cell backgrounds in terminal emulators that support 24-bit
//! color. Stitch symbols are drawn black on light cells and white on dark
//! ones so they stay readable on any yarn color.

use crate::chart::Chart;
use crate::color::Rgb;
use crate::palette::ColorPalette;

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Convert a color to an ANSI 24-bit background escape sequence.
///
/// # Examples
///
/// ```
/// use knitchart::color::Rgb;
/// use knitchart::terminal::color_to_ansi_bg;
///
/// let red = color_to_ansi_bg(Rgb(255, 0, 0));
/// assert_eq!(red, "\x1b[48;2;255;0;0m");
/// ```
pub fn color_to_ansi_bg(color: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m", color.0, color.1, color.2)
}

/// Convert a color to an ANSI 24-bit foreground escape sequence.
pub fn color_to_ansi_fg(color: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", color.0, color.1, color.2)
}

/// Render a chart as colored cells with stitch symbols.
///
/// Each cell is a 3-character field with the cell color as background.
/// Symbol text is black on cells with luminance above 128 and white
/// otherwise.
pub fn render_chart(chart: &Chart) -> String {
    let symbols = chart.symbolic_pattern(None, None);
    let colors = chart.rgb_colors(None, None);

    let mut output = String::new();
    for (symbol_row, color_row) in symbols.iter().zip(&colors) {
        for (symbol, &rgb) in symbol_row.iter().zip(color_row) {
            let text = if rgb.luminance() > 128.0 {
                Rgb(0, 0, 0)
            } else {
                Rgb(255, 255, 255)
            };
            output.push_str(&color_to_ansi_bg(rgb));
            output.push_str(&color_to_ansi_fg(text));
            output.push(' ');
            output.push_str(symbol);
            output.push(' ');
            output.push_str(ANSI_RESET);
        }
        output.push('\n');
    }
    output
}

/// Render the palette legend: a color swatch and `tag = name (#RRGGBB)` per
/// entry.
pub fn render_legend(palette: &ColorPalette) -> String {
    let mut legend = String::from("\nLegend:\n");
    for index in 0..palette.len() {
        let Some(color) = palette.color_of(index) else {
            continue;
        };
        let name = palette.name_of(index).unwrap_or("?");
        let tag = palette.tag_of(index).unwrap_or("?");

        legend.push_str("  ");
        legend.push_str(&color_to_ansi_bg(color));
        legend.push_str("  ");
        legend.push_str(ANSI_RESET);
        legend.push_str(&format!(" {:<3} = {:<8} ({})\n", tag, name, color.to_hex()));
    }
    legend
}
