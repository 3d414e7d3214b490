//! Command-line interface implementation

use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::chart::Chart;
use crate::stitch;
use crate::terminal::{render_chart, render_legend};

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Knitchart - view and edit knitting chart files
#[derive(Parser)]
#[command(name = "knit")]
#[command(about = "Knitchart - view and edit knitting chart files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a chart with colored cells and a palette legend
    Show {
        /// Chart file to display
        input: PathBuf,

        /// Print the color-tag grid instead of stitch symbols
        #[arg(long)]
        tags: bool,

        /// Disable ANSI colors (also automatic when stdout is not a tty)
        #[arg(long)]
        no_color: bool,
    },
    /// Print chart dimensions, stitch counts, and the palette
    Info {
        /// Chart file to inspect
        input: PathBuf,
    },
    /// Rewrite a chart file in canonical pretty form
    Fmt {
        /// Chart file to format
        input: PathBuf,

        /// Output file (defaults to rewriting the input in place)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract a rectangular sub-chart into a new file
    Slice {
        /// Chart file to slice
        input: PathBuf,

        /// Row range, e.g. 0..4
        rows: String,

        /// Column range, e.g. 2..6
        cols: String,

        /// Where to write the sub-chart
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            input,
            tags,
            no_color,
        } => run_show(&input, tags, no_color),
        Commands::Info { input } => run_info(&input),
        Commands::Fmt { input, output } => run_fmt(&input, output.as_deref()),
        Commands::Slice {
            input,
            rows,
            cols,
            output,
        } => run_slice(&input, &rows, &cols, &output),
    }
}

/// Load a chart, printing the failure in CLI form.
fn load_chart(input: &Path) -> Result<Chart, ExitCode> {
    match Chart::load(input) {
        Ok(chart) => Ok(chart),
        Err(e) => {
            eprintln!("Error: cannot load '{}': {}", input.display(), e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Execute the show command
fn run_show(input: &Path, tags: bool, no_color: bool) -> ExitCode {
    let chart = match load_chart(input) {
        Ok(chart) => chart,
        Err(code) => return code,
    };

    if tags {
        for row in chart.color_tags(None, None) {
            println!("{}", row.join(" "));
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    let use_color = !no_color && atty::is(atty::Stream::Stdout);
    if use_color {
        print!("{}", render_chart(&chart));
        print!("{}", render_legend(chart.palette()));
    } else {
        println!("{}", chart);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the info command
fn run_info(input: &Path) -> ExitCode {
    let chart = match load_chart(input) {
        Ok(chart) => chart,
        Err(code) => return code,
    };

    println!("{}: {} rows x {} cols", input.display(), chart.rows(), chart.cols());
    println!("palette: {} colors", chart.palette().len());

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for &index in chart.pattern() {
        *counts.entry(stitch::name_for_index(index)).or_insert(0) += 1;
    }
    for (name, count) in counts {
        println!("  {:<8} {}", name, count);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the fmt command
fn run_fmt(input: &Path, output: Option<&Path>) -> ExitCode {
    let chart = match load_chart(input) {
        Ok(chart) => chart,
        Err(code) => return code,
    };

    let target = output.unwrap_or(input);
    match chart.save(target) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: cannot write '{}': {}", target.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the slice command
fn run_slice(input: &Path, rows: &str, cols: &str, output: &Path) -> ExitCode {
    let (Some(row_range), Some(col_range)) = (parse_range(rows), parse_range(cols)) else {
        eprintln!("Error: ranges must look like 0..4");
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    let chart = match load_chart(input) {
        Ok(chart) => chart,
        Err(code) => return code,
    };

    let sub = match chart.slice(row_range, col_range) {
        Ok(sub) => sub,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match sub.save(output) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: cannot write '{}': {}", output.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Parse a `start..end` range argument.
fn parse_range(s: &str) -> Option<Range<usize>> {
    let (start, end) = s.split_once("..")?;
    Some(start.trim().parse().ok()?..end.trim().parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("0..4"), Some(0..4));
        assert_eq!(parse_range("2..6"), Some(2..6));
        assert_eq!(parse_range(" 1 .. 3 "), Some(1..3));
    }

    #[test]
    fn test_parse_range_invalid() {
        assert_eq!(parse_range("4"), None);
        assert_eq!(parse_range("a..b"), None);
        assert_eq!(parse_range("1-3"), None);
        assert_eq!(parse_range(""), None);
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["knit", "show", "chart.json", "--tags"]).unwrap();
        assert!(matches!(cli.command, Commands::Show { tags: true, .. }));

        let cli = Cli::try_parse_from([
            "knit", "slice", "chart.json", "0..2", "1..3", "-o", "out.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Slice { rows, cols, .. } => {
                assert_eq!(rows, "0..2");
                assert_eq!(cols, "1..3");
            }
            _ => panic!("expected slice"),
        }
    }
}
