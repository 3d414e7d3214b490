//! Knitchart - Library for building and viewing knitting charts
//!
//! This library provides functionality to:
//! - Model a knitting chart as a stitch grid bound to a deduplicated,
//!   named color palette
//! - Edit charts cell-by-cell or by rectangular regions while keeping
//!   palette indices consistent
//! - Round-trip charts through a human-readable JSON format
//! - Preview charts in true-color terminals

pub mod chart;
pub mod cli;
pub mod color;
pub mod double;
pub mod fmt;
pub mod palette;
pub mod stitch;
pub mod terminal;
