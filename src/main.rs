//! Knitchart - Command-line tool for viewing and editing knitting chart files

use std::process::ExitCode;

use knitchart::cli;

fn main() -> ExitCode {
    cli::run()
}
