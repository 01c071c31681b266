//! Producer-side glyph shapes fed to the packer.
use alloc::{collections::BTreeMap, vec::Vec};

/// Marker used by textual glyph rows to mean "ink". Any other character is
/// background.
pub const INK_MARKER: char = 'X';

/// The ink pattern of one glyph, stored as a sparse map of rows.
///
/// Rows that were never set are blank, and a row shorter than the cell
/// width is treated as padded on the right with background.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphMatrix {
    rows: BTreeMap<u32, Vec<bool>>,
}

impl GlyphMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a matrix from consecutive textual rows starting at row 0.
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_rows_with_marker(rows, INK_MARKER)
    }

    pub fn from_rows_with_marker<I, S>(rows: I, marker: char) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matrix = Self::new();
        for (y, row) in rows.into_iter().enumerate() {
            matrix.set_row_with_marker(y as u32, row.as_ref(), marker);
        }
        matrix
    }

    /// Replaces row `y` with the ink pattern in `row`.
    pub fn set_row(&mut self, y: u32, row: &str) {
        self.set_row_with_marker(y, row, INK_MARKER)
    }

    pub fn set_row_with_marker(&mut self, y: u32, row: &str, marker: char) {
        let flags = row.chars().map(|c| c == marker).collect();
        self.rows.insert(y, flags);
    }

    pub fn set_ink(&mut self, x: u32, y: u32) {
        let row = self.rows.entry(y).or_default();
        let x = x as usize;
        if row.len() <= x {
            row.resize(x + 1, false);
        }
        row[x] = true;
    }

    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.rows
            .get(&y)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(false)
    }

    /// Iterates `(x, y)` for every ink cell, row by row.
    pub fn ink(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.rows.iter().flat_map(|(&y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, ink)| **ink)
                .map(move |(x, _)| (x as u32, y))
        })
    }

    /// Returns the same pattern with everything outside `width` x `height`
    /// dropped. Two glyphs compare equal after clipping exactly when they
    /// pack to the same bits.
    pub fn clipped(&self, width: u32, height: u32) -> Self {
        let mut clipped = Self::new();
        for (x, y) in self.ink() {
            if x < width && y < height {
                clipped.set_ink(x, y);
            }
        }
        clipped
    }
}

/// Glyph shapes keyed by character, always iterated in ascending code order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphSet {
    glyphs: BTreeMap<char, GlyphMatrix>,
}

impl GlyphSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, character: char, matrix: GlyphMatrix) -> Option<GlyphMatrix> {
        self.glyphs.insert(character, matrix)
    }

    pub fn get(&self, character: char) -> Option<&GlyphMatrix> {
        self.glyphs.get(&character)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &GlyphMatrix)> + '_ {
        self.glyphs.iter().map(|(&c, m)| (c, m))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl FromIterator<(char, GlyphMatrix)> for GlyphSet {
    fn from_iter<T: IntoIterator<Item = (char, GlyphMatrix)>>(iter: T) -> Self {
        Self {
            glyphs: iter.into_iter().collect(),
        }
    }
}

impl Extend<(char, GlyphMatrix)> for GlyphSet {
    fn extend<T: IntoIterator<Item = (char, GlyphMatrix)>>(&mut self, iter: T) {
        self.glyphs.extend(iter)
    }
}
