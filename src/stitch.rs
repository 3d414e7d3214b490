//! The stitch vocabulary: a fixed table of stitch kinds.
//!
//! Pattern grids store stitch *indices* rather than enum values, so a grid
//! loaded from a hand-edited or partially corrupted file can hold values
//! outside the table. Lookups here never fail; out-of-range indices render
//! as `"?"` / `"Unknown"` and unrecognized names map to `-1`.

/// A knitting stitch kind.
///
/// The declaration order is the canonical identity: pattern grids and the
/// serialized format refer to stitches by this index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stitch {
    /// Knit
    K,
    /// Purl
    P,
    /// Yarn over
    Yo,
    /// Knit two together (right-leaning decrease)
    K2tog,
    /// Slip slip knit (left-leaning decrease)
    Ssk,
    /// Cable four front
    C4f,
    /// Cable four back
    C4b,
    /// Bind off
    Bo,
    /// Cast on
    Co,
}

/// All stitch kinds in canonical order.
pub const ALL: [Stitch; 9] = [
    Stitch::K,
    Stitch::P,
    Stitch::Yo,
    Stitch::K2tog,
    Stitch::Ssk,
    Stitch::C4f,
    Stitch::C4b,
    Stitch::Bo,
    Stitch::Co,
];

/// Number of stitch kinds in the vocabulary.
pub const COUNT: i32 = ALL.len() as i32;

impl Stitch {
    /// Canonical name as used in serialized charts (e.g. `"K2tog"`).
    pub fn name(self) -> &'static str {
        match self {
            Stitch::K => "K",
            Stitch::P => "P",
            Stitch::Yo => "YO",
            Stitch::K2tog => "K2tog",
            Stitch::Ssk => "SSK",
            Stitch::C4f => "C4F",
            Stitch::C4b => "C4B",
            Stitch::Bo => "BO",
            Stitch::Co => "CO",
        }
    }

    /// One-character display glyph. Both cable stitches draw as `X`.
    pub fn symbol(self) -> &'static str {
        match self {
            Stitch::K => "V",
            Stitch::P => "●",
            Stitch::Yo => "O",
            Stitch::K2tog => "/",
            Stitch::Ssk => "\\",
            Stitch::C4f => "X",
            Stitch::C4b => "X",
            Stitch::Bo => "-",
            Stitch::Co => "_",
        }
    }

    /// Canonical index of this stitch kind.
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Look up a stitch kind by canonical index.
    pub fn from_index(index: i32) -> Option<Stitch> {
        if (0..COUNT).contains(&index) {
            Some(ALL[index as usize])
        } else {
            None
        }
    }

    /// Look up a stitch kind by canonical name (case-sensitive).
    pub fn from_name(name: &str) -> Option<Stitch> {
        ALL.iter().copied().find(|s| s.name() == name)
    }
}

/// Display glyph for a stitch index; `"?"` for indices outside the table.
pub fn symbol_for_index(index: i32) -> &'static str {
    Stitch::from_index(index).map_or("?", Stitch::symbol)
}

/// Canonical name for a stitch index; `"Unknown"` for indices outside the
/// table.
pub fn name_for_index(index: i32) -> &'static str {
    Stitch::from_index(index).map_or("Unknown", Stitch::name)
}

/// Canonical index for a stitch name; `-1` for unrecognized names.
pub fn index_for_name(name: &str) -> i32 {
    Stitch::from_name(name).map_or(-1, Stitch::index)
}

/// Batch form of [`index_for_name`]: one index per input name, in order.
pub fn indices_for_names<'a, I>(names: I) -> Vec<i32>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().map(index_for_name).collect()
}
