use crate::{
    pack::{decode_offset, PackedGlyphs},
    CellSize, GlyphMatrix, GlyphSet, InvalidDimension, PackError,
};
use alloc::{collections::BTreeMap, vec::Vec};
use core::fmt;
use embedded_graphics::geometry::Point;

/// Pixels left between consecutive glyphs when drawing a string.
pub const DEFAULT_SPACING: u32 = 1;
/// Smallest advance given to characters missing from a variable width font.
pub const MIN_FALLBACK_ADVANCE: u32 = 3;

/// A packed 1-bit pixel font.
///
/// The glyph words and character map are fixed once the font is built. Only
/// the render options (variable width, spacing and the advance used for
/// missing characters) can be changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixFont {
    cell: CellSize,
    charmap: BTreeMap<char, u16>,
    data: Vec<u32>,
    variable_width: bool,
    spacing: u32,
    fallback_advance: u32,
}

impl PixFont {
    /// Builds a font from already packed words, checking that every charmap
    /// offset addresses a glyph that lies entirely inside `data`.
    pub fn new(
        cell_width: u32,
        cell_height: u32,
        charmap: BTreeMap<char, u16>,
        data: Vec<u32>,
    ) -> Result<Self, CorruptFont> {
        let cell = CellSize::new(cell_width, cell_height).map_err(CorruptFont::InvalidDimension)?;
        validate(cell, &charmap, &data)?;
        Ok(Self::from_parts(cell, charmap, data))
    }

    pub fn from_packed(cell: CellSize, packed: PackedGlyphs) -> Result<Self, CorruptFont> {
        validate(cell, &packed.charmap, &packed.data)?;
        Ok(Self::from_parts(cell, packed.charmap, packed.data))
    }

    /// Packs `glyphs` and wraps the result in a font.
    pub fn from_glyphs(cell: CellSize, glyphs: &GlyphSet) -> Result<Self, PackError> {
        let packed = crate::pack(cell, glyphs)?;
        debug_assert!(validate(cell, &packed.charmap, &packed.data).is_ok());
        Ok(Self::from_parts(cell, packed.charmap, packed.data))
    }

    fn from_parts(cell: CellSize, charmap: BTreeMap<char, u16>, data: Vec<u32>) -> Self {
        Self {
            cell,
            charmap,
            data,
            variable_width: false,
            spacing: DEFAULT_SPACING,
            fallback_advance: cell.width(),
        }
    }

    pub fn cell(&self) -> CellSize {
        self.cell
    }

    pub fn cell_width(&self) -> u32 {
        self.cell.width()
    }

    pub fn cell_height(&self) -> u32 {
        self.cell.height()
    }

    pub fn charmap(&self) -> &BTreeMap<char, u16> {
        &self.charmap
    }

    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Characters with a glyph, in ascending order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.charmap.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.charmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charmap.is_empty()
    }

    pub fn contains(&self, character: char) -> bool {
        self.charmap.contains_key(&character)
    }

    pub fn is_variable_width(&self) -> bool {
        self.variable_width
    }

    /// Switches between reporting each glyph's ink width plus spacing
    /// (variable) and the cell width (fixed). Also resets the advance for missing characters:
    /// `max(3, cell_width / 3)` when variable, the cell width when fixed.
    pub fn set_variable_width(&mut self, enabled: bool) {
        self.variable_width = enabled;
        self.fallback_advance = if enabled {
            (self.cell_width() / 3).max(MIN_FALLBACK_ADVANCE)
        } else {
            self.cell_width()
        };
    }

    pub fn with_variable_width(mut self, enabled: bool) -> Self {
        self.set_variable_width(enabled);
        self
    }

    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: u32) {
        self.spacing = spacing;
    }

    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.set_spacing(spacing);
        self
    }

    /// Advance reported for characters that have no glyph.
    pub fn fallback_advance(&self) -> u32 {
        if self.variable_width {
            self.fallback_advance
        } else {
            self.cell_width()
        }
    }

    /// Overrides the advance of missing characters in variable width mode.
    /// Fixed width fonts always advance by the cell width, and the next
    /// [`set_variable_width`](Self::set_variable_width) puts the default back.
    pub fn set_fallback_advance(&mut self, advance: u32) {
        self.fallback_advance = advance;
    }

    pub fn glyph(&self, character: char) -> Option<Glyph<'_>> {
        let offset = *self.charmap.get(&character)?;
        let (block_index, bit_base) = decode_offset(offset);
        let rows = self
            .data
            .get(block_index..block_index + self.cell_height() as usize)?;
        Some(Glyph {
            rows,
            bit_base,
            width: self.cell_width(),
        })
    }
}

fn validate(
    cell: CellSize,
    charmap: &BTreeMap<char, u16>,
    data: &[u32],
) -> Result<(), CorruptFont> {
    let height = cell.height() as usize;
    if data.len() % height != 0 {
        return Err(CorruptFont::DataLength {
            len: data.len(),
            cell_height: cell.height(),
        });
    }

    for (&character, &offset) in charmap {
        let (block_index, bit_base) = decode_offset(offset);
        if block_index + height > data.len() {
            return Err(CorruptFont::OffsetOutOfRange { character, offset });
        }
        if bit_base + cell.width() > u32::BITS {
            return Err(CorruptFont::LaneOverflow { character, offset });
        }
    }

    Ok(())
}

/// One glyph's rows, decoded from its charmap offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph<'a> {
    rows: &'a [u32],
    bit_base: u32,
    width: u32,
}

impl<'a> Glyph<'a> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    /// The row's bits shifted down to bit 0. Bits of the lane past the cell
    /// width are masked off.
    pub fn row_bits(&self, y: usize) -> u32 {
        let Some(row) = self.rows.get(y) else {
            return 0;
        };
        let bits = row >> self.bit_base;
        if self.width >= u32::BITS {
            bits
        } else {
            bits & ((1 << self.width) - 1)
        }
    }

    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        x < self.width && self.row_bits(y as usize) & (1 << x) != 0
    }

    /// One past the rightmost ink column across all rows, zero for a blank
    /// glyph.
    pub fn ink_width(&self) -> u32 {
        (0..self.rows.len())
            .map(|y| bit_span(self.row_bits(y)))
            .max()
            .unwrap_or(0)
    }

    /// Iterates the position of every ink pixel relative to the glyph's top
    /// left corner.
    pub fn pixels(&self) -> GlyphPixels<'a> {
        GlyphPixels {
            glyph: *self,
            next_row: 0,
            y: 0,
            bits: 0,
            ink_width: 0,
        }
    }

    pub fn to_matrix(&self) -> GlyphMatrix {
        let mut matrix = GlyphMatrix::new();
        for point in self.pixels() {
            matrix.set_ink(point.x as u32, point.y as u32);
        }
        matrix
    }
}

fn bit_span(bits: u32) -> u32 {
    u32::BITS - bits.leading_zeros()
}

/// Iterator over a glyph's ink pixels that keeps track of the ink width it
/// has seen, so drawing and measuring can share one pass over the rows.
#[derive(Debug, Clone)]
pub struct GlyphPixels<'a> {
    glyph: Glyph<'a>,
    next_row: usize,
    y: usize,
    bits: u32,
    ink_width: u32,
}

impl GlyphPixels<'_> {
    /// Consumes the rest of the glyph and returns its ink width.
    pub fn finish(mut self) -> u32 {
        let mut ink_width = self.ink_width.max(bit_span(self.bits));
        while self.next_row < self.glyph.rows.len() {
            ink_width = ink_width.max(bit_span(self.glyph.row_bits(self.next_row)));
            self.next_row += 1;
        }
        ink_width
    }
}

impl Iterator for GlyphPixels<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.bits != 0 {
                let x = self.bits.trailing_zeros();
                // clear lowest set bit
                self.bits &= self.bits - 1;
                self.ink_width = self.ink_width.max(x + 1);
                return Some(Point::new(x as i32, self.y as i32));
            }
            if self.next_row >= self.glyph.rows.len() {
                return None;
            }
            self.y = self.next_row;
            self.bits = self.glyph.row_bits(self.next_row);
            self.next_row += 1;
        }
    }
}

/// A persisted font whose words and charmap don't agree with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptFont {
    InvalidDimension(InvalidDimension),
    /// The word count isn't a whole number of glyph blocks.
    DataLength { len: usize, cell_height: u32 },
    /// The glyph's rows would run past the end of the words.
    OffsetOutOfRange { character: char, offset: u16 },
    /// The glyph's lane starts too high in the word to hold a full row.
    LaneOverflow { character: char, offset: u16 },
}

impl fmt::Display for CorruptFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorruptFont::InvalidDimension(e) => write!(f, "corrupt font: {e}"),
            CorruptFont::DataLength { len, cell_height } => write!(
                f,
                "corrupt font: {len} data words is not a multiple of the cell height {cell_height}"
            ),
            CorruptFont::OffsetOutOfRange { character, offset } => write!(
                f,
                "corrupt font: glyph {character:?} at offset {offset:#06x} runs past the end of the data"
            ),
            CorruptFont::LaneOverflow { character, offset } => write!(
                f,
                "corrupt font: glyph {character:?} at offset {offset:#06x} doesn't fit in its lane"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CorruptFont {}
