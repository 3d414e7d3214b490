//! The knitting chart: a stitch pattern grid bound to a color palette
//! through a per-cell color-index grid.
//!
//! A chart keeps three pieces of state consistent at all times:
//! - `pattern`: rows x cols stitch indices (values outside the vocabulary
//!   are tolerated and render as "?" / "Unknown")
//! - `color_indices`: rows x cols indices into the palette; every value is
//!   a valid palette index between operations
//! - `palette`: the exclusively owned [`ColorPalette`]
//!
//! Edits go through [`Chart::set_stitch`] and [`Chart::splice`], which grow
//! the palette when they meet a new color and compact it when the last use
//! of an old color disappears.

use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;
use crate::palette::{ColorPalette, PaletteData, PaletteError};
use crate::stitch::{self, Stitch};

/// Error type for chart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Input or sub-grid dimensions do not match the expected shape
    #[error("shape mismatch: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },
    /// Stitch name not present in the vocabulary
    #[error("unknown stitch type: {0}")]
    UnknownStitch(String),
    /// Cell or range outside the grid
    #[error("position ({row}, {col}) is out of bounds for chart of size {rows}x{cols}")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// Required key missing from a serialized chart record
    #[error("missing required key '{0}' in chart record")]
    MissingKey(&'static str),
    /// Malformed palette data in a serialized chart record
    #[error(transparent)]
    Palette(#[from] PaletteError),
    /// Record could not be parsed
    #[error("parse error: {0}")]
    Parse(String),
    /// IO failure while reading or writing a chart file
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ChartError {
    fn from(e: std::io::Error) -> Self {
        ChartError::Io(e.to_string())
    }
}

/// Color input accepted by [`Chart::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChartColors {
    /// Every cell gets the default gray
    #[default]
    Default,
    /// Every cell gets the same color
    Uniform(Rgb),
    /// One color per cell; must match the pattern shape exactly
    Grid(Vec<Vec<Rgb>>),
}

/// Serialized chart form (the stable wire shape).
///
/// `pattern` holds stitch names, `color_tags` holds palette short tags, and
/// `palette` the three parallel palette lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRecord {
    pub pattern: Vec<Vec<String>>,
    pub color_tags: Vec<Vec<String>>,
    pub palette: PaletteData,
}

/// A knitting chart: stitch pattern, per-cell color indices, and the owned
/// palette the indices point into.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    rows: usize,
    cols: usize,
    pattern: Vec<i32>,
    color_indices: Vec<usize>,
    palette: ColorPalette,
}

impl Chart {
    /// Build a chart from a pattern grid and a color specification.
    ///
    /// The supplied colors are deduplicated (in lexicographic RGB order)
    /// into a fresh palette and every cell is mapped to its palette index.
    /// Fails with [`ChartError::ShapeMismatch`] when the pattern is ragged
    /// or a color grid does not match the pattern shape exactly.
    pub fn new(pattern: Vec<Vec<i32>>, colors: ChartColors) -> Result<Chart, ChartError> {
        let rows = pattern.len();
        let cols = pattern.first().map_or(0, Vec::len);
        for row in &pattern {
            if row.len() != cols {
                return Err(ChartError::ShapeMismatch {
                    expected_rows: rows,
                    expected_cols: cols,
                    rows,
                    cols: row.len(),
                });
            }
        }

        let cell_colors: Vec<Rgb> = match colors {
            ChartColors::Default => vec![Rgb::DEFAULT; rows * cols],
            ChartColors::Uniform(color) => vec![color; rows * cols],
            ChartColors::Grid(grid) => {
                if grid.len() != rows {
                    return Err(ChartError::ShapeMismatch {
                        expected_rows: rows,
                        expected_cols: cols,
                        rows: grid.len(),
                        cols: grid.first().map_or(0, Vec::len),
                    });
                }
                for row in &grid {
                    if row.len() != cols {
                        return Err(ChartError::ShapeMismatch {
                            expected_rows: rows,
                            expected_cols: cols,
                            rows: grid.len(),
                            cols: row.len(),
                        });
                    }
                }
                grid.into_iter().flatten().collect()
            }
        };

        let flat_pattern = pattern.into_iter().flatten().collect();
        Ok(Chart::from_cells(rows, cols, flat_pattern, &cell_colors))
    }

    /// Rebuild palette and index grid from per-cell colors. Shared by
    /// construction, slicing, and rectangular assignment.
    fn from_cells(rows: usize, cols: usize, pattern: Vec<i32>, cell_colors: &[Rgb]) -> Chart {
        let mut distinct = cell_colors.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        let palette = ColorPalette::new(&distinct);
        let color_indices = cell_colors
            .iter()
            .map(|&color| palette.index_of(color).unwrap_or(0))
            .collect();
        Chart {
            rows,
            cols,
            pattern,
            color_indices,
            palette,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The chart's palette, for legend rendering.
    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Row-major stitch indices.
    pub fn pattern(&self) -> &[i32] {
        &self.pattern
    }

    /// Row-major palette indices, shape-congruent with [`Chart::pattern`].
    pub fn color_indices(&self) -> &[usize] {
        &self.color_indices
    }

    fn cell(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), ChartError> {
        if row >= self.rows || col >= self.cols {
            return Err(ChartError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    fn check_range(
        &self,
        row_range: &Range<usize>,
        col_range: &Range<usize>,
    ) -> Result<(), ChartError> {
        if row_range.is_empty()
            || col_range.is_empty()
            || row_range.end > self.rows
            || col_range.end > self.cols
        {
            return Err(ChartError::OutOfBounds {
                row: row_range.end,
                col: col_range.end,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Apply `f` to every cell in the requested sub-rectangle.
    ///
    /// # Panics
    ///
    /// Panics if a range extends past the grid; in-bounds ranges are the
    /// caller's responsibility, as with slice indexing.
    fn map_cells<T>(
        &self,
        row_range: Option<Range<usize>>,
        col_range: Option<Range<usize>>,
        f: impl Fn(&Chart, usize, usize) -> T,
    ) -> Vec<Vec<T>> {
        let row_range = row_range.unwrap_or(0..self.rows);
        let col_range = col_range.unwrap_or(0..self.cols);
        assert!(
            row_range.end <= self.rows && col_range.end <= self.cols,
            "query range out of bounds for chart of size {}x{}",
            self.rows,
            self.cols
        );
        row_range
            .map(|r| col_range.clone().map(|c| f(self, r, c)).collect())
            .collect()
    }

    /// Stitch display glyphs over the requested sub-rectangle (full grid by
    /// default). Indices outside the vocabulary render as `"?"`.
    pub fn symbolic_pattern(
        &self,
        row_range: Option<Range<usize>>,
        col_range: Option<Range<usize>>,
    ) -> Vec<Vec<String>> {
        self.map_cells(row_range, col_range, |chart, r, c| {
            stitch::symbol_for_index(chart.pattern[chart.cell(r, c)]).to_string()
        })
    }

    /// Stitch names over the requested sub-rectangle. Indices outside the
    /// vocabulary render as `"Unknown"`.
    pub fn text_pattern(
        &self,
        row_range: Option<Range<usize>>,
        col_range: Option<Range<usize>>,
    ) -> Vec<Vec<String>> {
        self.map_cells(row_range, col_range, |chart, r, c| {
            stitch::name_for_index(chart.pattern[chart.cell(r, c)]).to_string()
        })
    }

    /// Per-cell RGB colors over the requested sub-rectangle, resolved
    /// through the palette.
    pub fn rgb_colors(
        &self,
        row_range: Option<Range<usize>>,
        col_range: Option<Range<usize>>,
    ) -> Vec<Vec<Rgb>> {
        self.map_cells(row_range, col_range, |chart, r, c| {
            chart
                .palette
                .color_of(chart.color_indices[chart.cell(r, c)])
                .unwrap_or(Rgb::DEFAULT)
        })
    }

    /// Per-cell palette short tags over the requested sub-rectangle.
    pub fn color_tags(
        &self,
        row_range: Option<Range<usize>>,
        col_range: Option<Range<usize>>,
    ) -> Vec<Vec<String>> {
        self.map_cells(row_range, col_range, |chart, r, c| {
            chart
                .palette
                .tag_of(chart.color_indices[chart.cell(r, c)])
                .unwrap_or("?")
                .to_string()
        })
    }

    /// Stitch name and color at a single cell.
    pub fn stitch_at(&self, row: usize, col: usize) -> Result<(String, Rgb), ChartError> {
        self.check_bounds(row, col)?;
        let index = self.cell(row, col);
        let name = stitch::name_for_index(self.pattern[index]).to_string();
        let color = self
            .palette
            .color_of(self.color_indices[index])
            .unwrap_or(Rgb::DEFAULT);
        Ok((name, color))
    }

    /// Set the stitch type and/or color of a single cell.
    ///
    /// An unrecognized stitch name fails with [`ChartError::UnknownStitch`]
    /// before anything is modified. A new color grows the palette; when the
    /// cell's previous color loses its last reference, the palette is
    /// compacted.
    pub fn set_stitch(
        &mut self,
        row: usize,
        col: usize,
        stitch_type: Option<&str>,
        color: Option<Rgb>,
    ) -> Result<(), ChartError> {
        self.check_bounds(row, col)?;
        let cell = self.cell(row, col);

        if let Some(name) = stitch_type {
            match Stitch::from_name(name) {
                Some(stitch) => self.pattern[cell] = stitch.index(),
                None => return Err(ChartError::UnknownStitch(name.to_string())),
            }
        }

        if let Some(rgb) = color {
            let previous = self.color_indices[cell];
            let index = self.palette.push(rgb);
            self.color_indices[cell] = index;
            if previous != index && !self.color_indices.contains(&previous) {
                self.optimize_palette();
            }
        }

        Ok(())
    }

    /// Drop palette entries no cell references any more.
    ///
    /// Surviving colors keep their relative order but are renamed by fresh
    /// construction, and every cell index is remapped. Returns whether
    /// anything changed; calling again immediately is always a no-op.
    pub fn optimize_palette(&mut self) -> bool {
        let mut used = self.color_indices.clone();
        used.sort_unstable();
        used.dedup();
        if used.len() == self.palette.len() {
            return false;
        }

        let survivors: Vec<Rgb> = used
            .iter()
            .map(|&index| self.palette.color_of(index).unwrap_or(Rgb::DEFAULT))
            .collect();
        for index in &mut self.color_indices {
            if let Ok(new_index) = used.binary_search(index) {
                *index = new_index;
            }
        }
        self.palette = ColorPalette::new(&survivors);
        true
    }

    /// Extract a rectangular sub-chart as a new, independent chart.
    ///
    /// The sub-chart gets its own freshly deduplicated palette derived from
    /// the RGB colors of the region, never a view into this chart's.
    pub fn slice(
        &self,
        row_range: Range<usize>,
        col_range: Range<usize>,
    ) -> Result<Chart, ChartError> {
        self.check_range(&row_range, &col_range)?;
        let pattern = row_range
            .clone()
            .map(|r| col_range.clone().map(|c| self.pattern[self.cell(r, c)]).collect())
            .collect();
        let colors = self.rgb_colors(Some(row_range), Some(col_range));
        Chart::new(pattern, ChartColors::Grid(colors))
    }

    /// Overwrite a rectangular region with the contents of `src`.
    ///
    /// `src` must match the region shape exactly; on any error the chart is
    /// left untouched. On success the whole grid is rebuilt from the
    /// composite RGB image, so the palette is renumbered (and may shrink or
    /// grow) - callers rely on that renumbering after a paste.
    pub fn splice(
        &mut self,
        row_range: Range<usize>,
        col_range: Range<usize>,
        src: &Chart,
    ) -> Result<(), ChartError> {
        self.check_range(&row_range, &col_range)?;
        let height = row_range.end - row_range.start;
        let width = col_range.end - col_range.start;
        if src.rows != height || src.cols != width {
            return Err(ChartError::ShapeMismatch {
                expected_rows: height,
                expected_cols: width,
                rows: src.rows,
                cols: src.cols,
            });
        }

        for (i, r) in row_range.clone().enumerate() {
            for (j, c) in col_range.clone().enumerate() {
                let dst = r * self.cols + c;
                self.pattern[dst] = src.pattern[src.cell(i, j)];
            }
        }

        let mut composite: Vec<Rgb> = self
            .rgb_colors(None, None)
            .into_iter()
            .flatten()
            .collect();
        let src_colors = src.rgb_colors(None, None);
        for (i, r) in row_range.enumerate() {
            for (j, c) in col_range.clone().enumerate() {
                composite[r * self.cols + c] = src_colors[i][j];
            }
        }

        let pattern = std::mem::take(&mut self.pattern);
        *self = Chart::from_cells(self.rows, self.cols, pattern, &composite);
        Ok(())
    }

    /// Convert to the serialized record form: stitch names, color tags, and
    /// the palette lists.
    pub fn to_record(&self) -> ChartRecord {
        ChartRecord {
            pattern: self.text_pattern(None, None),
            color_tags: self.color_tags(None, None),
            palette: self.palette.to_data(),
        }
    }

    /// Rebuild a chart from a serialized record.
    ///
    /// Unrecognized stitch names become index -1 (displayed as "Unknown")
    /// and unresolvable color tags fall back to the default gray - loading
    /// degrades rather than failing, so hand-edited charts stay inspectable.
    pub fn from_record(record: &ChartRecord) -> Result<Chart, ChartError> {
        let pattern: Vec<Vec<i32>> = record
            .pattern
            .iter()
            .map(|row| row.iter().map(|name| stitch::index_for_name(name)).collect())
            .collect();

        let palette = ColorPalette::from_data(record.palette.clone())?;
        let colors: Vec<Vec<Rgb>> = record
            .color_tags
            .iter()
            .map(|row| {
                row.iter()
                    .map(|tag| palette.color_of_tag(tag).unwrap_or(Rgb::DEFAULT))
                    .collect()
            })
            .collect();

        Chart::new(pattern, ChartColors::Grid(colors))
    }

    /// Parse a chart from JSON text (JSON5 comments and trailing commas are
    /// accepted).
    ///
    /// Fails with [`ChartError::MissingKey`] when one of the required
    /// top-level keys (`pattern`, `color_tags`, `palette`) is absent; there
    /// is no partial reconstruction.
    pub fn from_json_str(input: &str) -> Result<Chart, ChartError> {
        let value: serde_json::Value =
            json5::from_str(input).map_err(|e| ChartError::Parse(e.to_string()))?;
        for key in ["pattern", "color_tags", "palette"] {
            if value.get(key).is_none() {
                return Err(ChartError::MissingKey(key));
            }
        }
        let record: ChartRecord =
            serde_json::from_value(value).map_err(|e| ChartError::Parse(e.to_string()))?;
        Chart::from_record(&record)
    }

    /// Save to a file in the pretty row-per-line format.
    pub fn save(&self, path: &Path) -> Result<(), ChartError> {
        crate::fmt::save_chart(path, self)
    }

    /// Load a chart from a file written by [`Chart::save`] (or hand-edited).
    pub fn load(path: &Path) -> Result<Chart, ChartError> {
        crate::fmt::load_chart(path)
    }
}

impl std::fmt::Display for Chart {
    /// Plain-text rendering: symbol grid, color-tag grid, then the palette.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Knitting Chart:")?;
        for row in self.symbolic_pattern(None, None) {
            writeln!(f, "{}", row.join(" "))?;
        }

        writeln!(f)?;
        writeln!(f, "Color Chart:")?;
        for row in self.color_tags(None, None) {
            writeln!(f, "{}", row.join(" "))?;
        }

        writeln!(f)?;
        writeln!(f, "Color Palette:")?;
        for index in 0..self.palette.len() {
            let tag = self.palette.tag_of(index).unwrap_or("?");
            let color = self.palette.color_of(index).unwrap_or(Rgb::DEFAULT);
            writeln!(f, "  {}: {}", tag, color)?;
        }
        Ok(())
    }
}
