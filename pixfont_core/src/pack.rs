//! Packs glyph shapes into 32-bit row words and a character map.
//!
//! Glyphs are stored side by side in 8-bit aligned lanes, leftmost pixel in
//! the least significant bit of the lane. Each glyph row is a word in a block
//! of `cell_height` consecutive words. For a 5x5 font with glyphs A to E:
//!
//! ```text
//!         24      16       8       0
//!          |       |       |       |
//! 0     DDDD    CCC     BBBB     A   == 0x0f0e0f04
//! 1    D   D   C   C   B   B    A A  == 0x1111110a
//! 2    D   D       C    BBBB   A   A == 0x11010f11
//! 3    D   D   C   C   B   B   AAAAA == 0x1111111f
//! 4     DDDD    CCC     BBBB   A   A == 0x0f0e0f11
//! 5                            EEEEE == 0x0000001f
//! 6                                E == 0x00000001
//! 7                             EEEE == 0x0000000f
//! 8                                E == 0x00000001
//! 9                            EEEEE == 0x0000001f
//! ```
use crate::{CellSize, GlyphSet, InvalidDimension};
use alloc::{collections::BTreeMap, vec::Vec};
use core::fmt;

/// Largest word-block index a `u16` charmap offset can address.
pub const MAX_BLOCK_INDEX: usize = (u16::MAX >> 2) as usize;

/// The packer's output: row words plus the offset of each glyph within them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedGlyphs {
    pub data: Vec<u32>,
    pub charmap: BTreeMap<char, u16>,
}

/// Encodes a charmap offset from the index of a glyph's first row word and
/// its lane within that word.
pub fn encode_offset(block_index: usize, lane: u32) -> u16 {
    ((block_index << 2) as u16) | (lane & 0b11) as u16
}

/// Splits a charmap offset into the index of the glyph's first row word and
/// the bit position its lane starts at.
pub fn decode_offset(offset: u16) -> (usize, u32) {
    ((offset >> 2) as usize, (offset & 0b11) as u32 * 8)
}

/// Packs every glyph in `glyphs` in ascending character order.
///
/// The result only depends on the contents of `glyphs`, never on the order
/// they were inserted in, so the same set always packs to identical words.
pub fn pack(cell: CellSize, glyphs: &GlyphSet) -> Result<PackedGlyphs, PackError> {
    let width = cell.width();
    let height = cell.height() as usize;
    let layout = cell.layout();

    let blocks = layout.blocks_needed(glyphs.len());
    // the last glyph's first row word must still be addressable
    let last_block_index = blocks.saturating_sub(1) * height;
    if last_block_index > MAX_BLOCK_INDEX {
        return Err(PackError::TooManyGlyphs {
            glyphs: glyphs.len(),
            max: (MAX_BLOCK_INDEX / height + 1) * layout.glyphs_per_word as usize,
        });
    }

    let mut data = vec![0u32; blocks * height];
    let mut charmap = BTreeMap::new();

    // counts 8-bit lanes consumed across the whole font
    let mut lanes = 0u32;
    for (character, matrix) in glyphs.iter() {
        let block_index = (lanes / 4) as usize * height;
        let lane = lanes % 4;
        charmap.insert(character, encode_offset(block_index, lane));

        let start_bit = lane * 8;
        for (x, y) in matrix.ink() {
            if x >= width || y as usize >= height {
                continue;
            }
            let bit = start_bit + x;
            if bit >= u32::BITS {
                return Err(PackError::BitOverflow { character, bit });
            }
            data[block_index + y as usize] |= 1 << bit;
        }

        lanes += layout.lane_stride;
    }

    #[cfg(feature = "tracing")]
    tracing::event!(
        tracing::Level::DEBUG,
        glyphs = glyphs.len(),
        width,
        height,
        glyphs_per_word = layout.glyphs_per_word,
        words = data.len(),
        "packed glyphs"
    );

    Ok(PackedGlyphs { data, charmap })
}

/// Validates the cell dimensions and packs `glyphs`.
pub fn pack_with_dimensions(
    width: u32,
    height: u32,
    glyphs: &GlyphSet,
) -> Result<PackedGlyphs, PackError> {
    let cell = CellSize::new(width, height)?;
    pack(cell, glyphs)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackError {
    InvalidDimension(InvalidDimension),
    /// A glyph bit would land outside its 32-bit word. The lane layout rules
    /// this out so seeing it means the layout is wrong.
    BitOverflow { character: char, bit: u32 },
    /// The charmap's 16-bit offsets can't address this many glyphs.
    TooManyGlyphs { glyphs: usize, max: usize },
}

impl From<InvalidDimension> for PackError {
    fn from(e: InvalidDimension) -> Self {
        PackError::InvalidDimension(e)
    }
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackError::InvalidDimension(e) => write!(f, "{e}"),
            PackError::BitOverflow { character, bit } => write!(
                f,
                "glyph {character:?} would set bit {bit} which is outside its 32-bit word"
            ),
            PackError::TooManyGlyphs { glyphs, max } => write!(
                f,
                "{glyphs} glyphs don't fit in 16-bit charmap offsets (at most {max} for this cell size)"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PackError {}
