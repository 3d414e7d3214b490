//! Double-knitting canvas: a paired front/back pattern that compiles to
//! knitting charts.
//!
//! Double knitting works two interlocked fabric layers at once from two
//! yarns; the back face carries the negative of the front image. The canvas
//! holds both faces as boolean grids (`true` = front-yarn stitch) and
//! produces regular [`Chart`]s: one per face, plus the interleaved chart a
//! knitter actually follows, with front and back stitches alternating
//! across each row.

use crate::chart::{Chart, ChartColors, ChartError};
use crate::color::Rgb;

/// Default front yarn color (white).
pub const DEFAULT_FRONT: Rgb = Rgb(255, 255, 255);
/// Default back yarn color (black).
pub const DEFAULT_BACK: Rgb = Rgb(0, 0, 0);

/// A two-layer double-knitting pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleKnitting {
    rows: usize,
    cols: usize,
    front: Vec<bool>,
    back: Vec<bool>,
    front_color: Rgb,
    back_color: Rgb,
}

impl DoubleKnitting {
    /// Build a canvas from a front pattern; the back face defaults to its
    /// negation. Fails on a ragged grid.
    pub fn new(front: Vec<Vec<bool>>) -> Result<DoubleKnitting, ChartError> {
        let (rows, cols, front) = flatten_grid(front)?;
        let back = front.iter().map(|&cell| !cell).collect();
        Ok(DoubleKnitting {
            rows,
            cols,
            front,
            back,
            front_color: DEFAULT_FRONT,
            back_color: DEFAULT_BACK,
        })
    }

    /// Build a canvas with an explicit back pattern. The two grids must
    /// have the same shape.
    pub fn with_back(
        front: Vec<Vec<bool>>,
        back: Vec<Vec<bool>>,
    ) -> Result<DoubleKnitting, ChartError> {
        let (rows, cols, front) = flatten_grid(front)?;
        let (back_rows, back_cols, back) = flatten_grid(back)?;
        if (back_rows, back_cols) != (rows, cols) {
            return Err(ChartError::ShapeMismatch {
                expected_rows: rows,
                expected_cols: cols,
                rows: back_rows,
                cols: back_cols,
            });
        }
        Ok(DoubleKnitting {
            rows,
            cols,
            front,
            back,
            front_color: DEFAULT_FRONT,
            back_color: DEFAULT_BACK,
        })
    }

    /// Build a canvas from a front pattern, optionally resampled to a
    /// target shape with nearest-neighbor interpolation.
    pub fn from_pattern(
        front: Vec<Vec<bool>>,
        target_size: Option<(usize, usize)>,
    ) -> Result<DoubleKnitting, ChartError> {
        let (rows, cols, flat) = flatten_grid(front)?;
        let resized = match target_size {
            Some((target_rows, target_cols)) if (target_rows, target_cols) != (rows, cols) => {
                if rows == 0 || cols == 0 {
                    return Err(ChartError::ShapeMismatch {
                        expected_rows: target_rows,
                        expected_cols: target_cols,
                        rows,
                        cols,
                    });
                }
                let mut grid = Vec::with_capacity(target_rows);
                for r in 0..target_rows {
                    let src_r = r * rows / target_rows;
                    let mut row = Vec::with_capacity(target_cols);
                    for c in 0..target_cols {
                        let src_c = c * cols / target_cols;
                        row.push(flat[src_r * cols + src_c]);
                    }
                    grid.push(row);
                }
                grid
            }
            _ => {
                let mut grid = Vec::with_capacity(rows);
                for r in 0..rows {
                    grid.push(flat[r * cols..(r + 1) * cols].to_vec());
                }
                grid
            }
        };
        DoubleKnitting::new(resized)
    }

    /// Replace the yarn colors (front, back).
    pub fn set_colors(&mut self, front_color: Rgb, back_color: Rgb) {
        self.front_color = front_color;
        self.back_color = back_color;
    }

    /// Number of rows per face.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns per face.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The front pattern, row by row.
    pub fn front(&self) -> &[bool] {
        &self.front
    }

    /// The back pattern, row by row.
    pub fn back(&self) -> &[bool] {
        &self.back
    }

    pub fn front_color(&self) -> Rgb {
        self.front_color
    }

    pub fn back_color(&self) -> Rgb {
        self.back_color
    }

    /// The front face as an all-knit chart; `true` cells take the front
    /// yarn color.
    pub fn front_chart(&self) -> Result<Chart, ChartError> {
        self.face_chart(&self.front)
    }

    /// The back face as an all-knit chart; `true` cells take the front
    /// yarn color (the back face is typically the negated image, so it
    /// comes out color-swapped).
    pub fn back_chart(&self) -> Result<Chart, ChartError> {
        self.face_chart(&self.back)
    }

    fn face_chart(&self, face: &[bool]) -> Result<Chart, ChartError> {
        let pattern = vec![vec![0; self.cols]; self.rows];
        let colors = (0..self.rows)
            .map(|r| {
                (0..self.cols)
                    .map(|c| {
                        if face[r * self.cols + c] {
                            self.front_color
                        } else {
                            self.back_color
                        }
                    })
                    .collect()
            })
            .collect();
        Chart::new(pattern, ChartColors::Grid(colors))
    }

    /// The chart a knitter follows when working both layers flat: width is
    /// doubled and every front stitch is followed by its back partner.
    pub fn interleaved_chart(&self) -> Result<Chart, ChartError> {
        let front = self.front_chart()?;
        let back = self.back_chart()?;
        let front_colors = front.rgb_colors(None, None);
        let back_colors = back.rgb_colors(None, None);

        let mut pattern = Vec::with_capacity(self.rows);
        let mut colors = Vec::with_capacity(self.rows);
        for r in 0..self.rows {
            let mut pattern_row = Vec::with_capacity(self.cols * 2);
            let mut color_row = Vec::with_capacity(self.cols * 2);
            for c in 0..self.cols {
                pattern_row.push(front.pattern()[r * self.cols + c]);
                pattern_row.push(back.pattern()[r * self.cols + c]);
                color_row.push(front_colors[r][c]);
                color_row.push(back_colors[r][c]);
            }
            pattern.push(pattern_row);
            colors.push(color_row);
        }
        Chart::new(pattern, ChartColors::Grid(colors))
    }
}

/// Flatten a boolean grid, rejecting ragged rows.
fn flatten_grid(grid: Vec<Vec<bool>>) -> Result<(usize, usize, Vec<bool>), ChartError> {
    let rows = grid.len();
    let cols = grid.first().map_or(0, Vec::len);
    for row in &grid {
        if row.len() != cols {
            return Err(ChartError::ShapeMismatch {
                expected_rows: rows,
                expected_cols: cols,
                rows,
                cols: row.len(),
            });
        }
    }
    Ok((rows, cols, grid.into_iter().flatten().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross_pattern() -> Vec<Vec<bool>> {
        vec![
            vec![true, false, true],
            vec![false, true, false],
            vec![true, false, true],
        ]
    }

    #[test]
    fn test_new_defaults() {
        let canvas = DoubleKnitting::new(cross_pattern()).unwrap();
        assert_eq!((canvas.rows(), canvas.cols()), (3, 3));
        assert_eq!(canvas.front_color(), Rgb(255, 255, 255));
        assert_eq!(canvas.back_color(), Rgb(0, 0, 0));
        // Back defaults to the negated front
        for (f, b) in canvas.front().iter().zip(canvas.back()) {
            assert_eq!(*b, !*f);
        }
    }

    #[test]
    fn test_with_back_custom_pattern() {
        let back = vec![
            vec![false, true, false],
            vec![true, false, true],
            vec![false, true, false],
        ];
        let canvas = DoubleKnitting::with_back(cross_pattern(), back.clone()).unwrap();
        let flat_back: Vec<bool> = back.into_iter().flatten().collect();
        assert_eq!(canvas.back(), flat_back.as_slice());
    }

    #[test]
    fn test_with_back_shape_mismatch() {
        let back = vec![vec![false, true]];
        assert!(matches!(
            DoubleKnitting::with_back(cross_pattern(), back),
            Err(ChartError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_ragged_front_rejected() {
        let front = vec![vec![true, false], vec![true]];
        assert!(matches!(
            DoubleKnitting::new(front),
            Err(ChartError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_set_colors() {
        let mut canvas = DoubleKnitting::new(cross_pattern()).unwrap();
        canvas.set_colors(Rgb(255, 0, 0), Rgb(0, 0, 255));
        assert_eq!(canvas.front_color(), Rgb(255, 0, 0));
        assert_eq!(canvas.back_color(), Rgb(0, 0, 255));
    }

    #[test]
    fn test_from_pattern_no_resize() {
        let canvas = DoubleKnitting::from_pattern(cross_pattern(), None).unwrap();
        assert_eq!((canvas.rows(), canvas.cols()), (3, 3));
        let expected: Vec<bool> = cross_pattern().into_iter().flatten().collect();
        assert_eq!(canvas.front(), expected.as_slice());
    }

    #[test]
    fn test_from_pattern_with_resize() {
        let canvas = DoubleKnitting::from_pattern(cross_pattern(), Some((6, 6))).unwrap();
        assert_eq!((canvas.rows(), canvas.cols()), (6, 6));
        // The center cell survives nearest-neighbor doubling
        assert!(canvas.front()[3 * 6 + 3]);
        // So do the corners
        assert!(canvas.front()[0]);
        assert!(canvas.front()[5 * 6 + 5]);
    }

    #[test]
    fn test_face_charts_are_all_knit() {
        let canvas = DoubleKnitting::new(cross_pattern()).unwrap();
        let front = canvas.front_chart().unwrap();
        assert_eq!((front.rows(), front.cols()), (3, 3));
        assert!(front.pattern().iter().all(|&s| s == 0));

        let colors = front.rgb_colors(None, None);
        assert_eq!(colors[0][0], Rgb(255, 255, 255));
        assert_eq!(colors[0][1], Rgb(0, 0, 0));
    }

    #[test]
    fn test_back_chart_is_color_swapped() {
        let canvas = DoubleKnitting::new(cross_pattern()).unwrap();
        let front_colors = canvas.front_chart().unwrap().rgb_colors(None, None);
        let back_colors = canvas.back_chart().unwrap().rgb_colors(None, None);
        for r in 0..3 {
            for c in 0..3 {
                assert_ne!(front_colors[r][c], back_colors[r][c]);
            }
        }
    }

    #[test]
    fn test_interleaved_chart() {
        let canvas = DoubleKnitting::new(cross_pattern()).unwrap();
        let chart = canvas.interleaved_chart().unwrap();
        assert_eq!((chart.rows(), chart.cols()), (3, 6));

        let front = canvas.front_chart().unwrap();
        let back = canvas.back_chart().unwrap();
        let colors = chart.rgb_colors(None, None);
        let front_colors = front.rgb_colors(None, None);
        let back_colors = back.rgb_colors(None, None);
        for r in 0..3 {
            for c in 0..6 {
                let source = c / 2;
                assert_eq!(chart.pattern()[r * 6 + c], front.pattern()[r * 3 + source]);
                if c % 2 == 0 {
                    assert_eq!(colors[r][c], front_colors[r][source]);
                } else {
                    assert_eq!(colors[r][c], back_colors[r][source]);
                }
            }
        }
    }
}
