//! The chart color palette: an ordered list of RGB colors with stable
//! integer indices and human-readable names.
//!
//! Names come from the nearest reference color: the first white-ish entry is
//! "White"/"W", the next "White2"/"W2", and so on. Indices are stable once
//! assigned; removal only ever happens by rebuilding a fresh palette (see
//! `Chart::optimize_palette`).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{nearest_reference, Rgb};

/// Error when reconstructing a palette from serialized data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PaletteError {
    /// The colors/full_names/short_tags lists differ in length
    #[error(
        "palette lists differ in length: {colors} colors, {full_names} names, {short_tags} tags"
    )]
    LengthMismatch {
        colors: usize,
        full_names: usize,
        short_tags: usize,
    },
}

/// Serialized palette form: three parallel lists.
///
/// `colors` drives the numeric storage; `full_names` and `short_tags` are
/// restored verbatim, never recomputed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteData {
    pub colors: Vec<Rgb>,
    pub full_names: Vec<String>,
    pub short_tags: Vec<String>,
}

/// A color palette with per-entry full names ("White2") and short tags
/// ("W2").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorPalette {
    colors: Vec<Rgb>,
    full_names: Vec<String>,
    short_tags: Vec<String>,
}

impl ColorPalette {
    /// Build a palette, assigning a name to each color in input order.
    ///
    /// Callers are responsible for deduplicating `colors` first; duplicate
    /// entries would each receive their own index and name.
    pub fn new(colors: &[Rgb]) -> ColorPalette {
        let mut palette = ColorPalette::default();
        for &color in colors {
            palette.append_named(color);
        }
        palette
    }

    /// Append `color` with a freshly assigned name.
    ///
    /// The naming rule, applied identically during construction and growth:
    /// take the nearest reference color, count existing entries whose full
    /// name starts with its base name, and suffix `count + 1` when the base
    /// is already taken (third white-ish color becomes "White3"/"W3").
    fn append_named(&mut self, color: Rgb) {
        let reference = nearest_reference(color);
        let count = self
            .full_names
            .iter()
            .filter(|name| name.starts_with(reference.name))
            .count();
        let (full_name, short_tag) = if count == 0 {
            (reference.name.to_string(), reference.tag.to_string())
        } else {
            (
                format!("{}{}", reference.name, count + 1),
                format!("{}{}", reference.tag, count + 1),
            )
        };
        self.colors.push(color);
        self.full_names.push(full_name);
        self.short_tags.push(short_tag);
    }

    /// Number of colors in the palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Index of an exact RGB match, if present.
    pub fn index_of(&self, color: Rgb) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }

    /// Color at `index`; `None` when out of range.
    pub fn color_of(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Full name at `index`; `None` when out of range.
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.full_names.get(index).map(String::as_str)
    }

    /// Short tag at `index`; `None` when out of range.
    pub fn tag_of(&self, index: usize) -> Option<&str> {
        self.short_tags.get(index).map(String::as_str)
    }

    /// Color for a full name (e.g. "White2"). First match wins.
    pub fn color_of_name(&self, name: &str) -> Option<Rgb> {
        let index = self.full_names.iter().position(|n| n == name)?;
        self.color_of(index)
    }

    /// Color for a short tag (e.g. "W2"). First match wins.
    pub fn color_of_tag(&self, tag: &str) -> Option<Rgb> {
        let index = self.short_tags.iter().position(|t| t == tag)?;
        self.color_of(index)
    }

    /// Add a color, returning its index.
    ///
    /// An exact existing match returns its index without mutating the
    /// palette; a new color is named and appended.
    pub fn push(&mut self, color: Rgb) -> usize {
        if let Some(index) = self.index_of(color) {
            return index;
        }
        self.append_named(color);
        self.colors.len() - 1
    }

    /// Convert to the serialized parallel-list form.
    pub fn to_data(&self) -> PaletteData {
        PaletteData {
            colors: self.colors.clone(),
            full_names: self.full_names.clone(),
            short_tags: self.short_tags.clone(),
        }
    }

    /// Reconstruct a palette from serialized data.
    ///
    /// Names and tags are taken verbatim from the record. Fails when the
    /// three lists differ in length.
    pub fn from_data(data: PaletteData) -> Result<ColorPalette, PaletteError> {
        if data.full_names.len() != data.colors.len()
            || data.short_tags.len() != data.colors.len()
        {
            return Err(PaletteError::LengthMismatch {
                colors: data.colors.len(),
                full_names: data.full_names.len(),
                short_tags: data.short_tags.len(),
            });
        }
        Ok(ColorPalette {
            colors: data.colors,
            full_names: data.full_names,
            short_tags: data.short_tags,
        })
    }
}

impl fmt::Display for ColorPalette {
    /// One entry per line: `White2   -> W2  -> (255, 255, 254)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in 0..self.len() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{:<8} -> {:<3} -> {}",
                self.full_names[index], self.short_tags[index], self.colors[index]
            )?;
        }
        Ok(())
    }
}
