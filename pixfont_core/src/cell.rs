use core::fmt;

/// Widest glyph a lane layout can hold: one glyph per 32-bit word.
pub const MAX_CELL_WIDTH: u32 = 32;
/// Tallest glyph; heights are persisted as a `u8`.
pub const MAX_CELL_HEIGHT: u32 = u8::MAX as u32;

/// The fixed bounding box shared by every glyph in a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellSize {
    width: u8,
    height: u8,
}

impl CellSize {
    pub fn new(width: u32, height: u32) -> Result<Self, InvalidDimension> {
        if !(1..=MAX_CELL_WIDTH).contains(&width) || !(1..=MAX_CELL_HEIGHT).contains(&height) {
            return Err(InvalidDimension { width, height });
        }
        Ok(Self {
            width: width as u8,
            height: height as u8,
        })
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn layout(&self) -> LaneLayout {
        LaneLayout::for_width(self.width())
    }
}

/// How glyphs of a given width share each 32-bit row word.
///
/// Every glyph starts on an 8-bit boundary. A glyph takes
/// `bytes_per_glyph` lanes, so at most `glyphs_per_word` fit side by side and
/// consecutive glyph starts are `lane_stride` lanes apart.
///
/// ```text
/// width 1..=8   -> 4 glyphs per word, stride 1
/// width 9..=16  -> 2 glyphs per word, stride 2
/// width 17..=32 -> 1 glyph per word,  stride 4
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneLayout {
    pub bytes_per_glyph: u32,
    pub glyphs_per_word: u32,
    pub lane_stride: u32,
}

impl LaneLayout {
    /// `width` must already be within `1..=32`.
    pub fn for_width(width: u32) -> Self {
        let bytes_per_glyph = width.div_ceil(8);
        let glyphs_per_word = 4 / bytes_per_glyph;
        // a 3 byte glyph can't share, so it still strides a whole word
        let lane_stride = 4 / glyphs_per_word;
        Self {
            bytes_per_glyph,
            glyphs_per_word,
            lane_stride,
        }
    }

    /// Number of consecutive row-word blocks needed for `glyph_count` glyphs.
    pub fn blocks_needed(&self, glyph_count: usize) -> usize {
        glyph_count.div_ceil(self.glyphs_per_word as usize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDimension {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for InvalidDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let InvalidDimension { width, height } = self;
        write!(
            f,
            "invalid glyph cell {width}x{height}: width must be 1..={MAX_CELL_WIDTH} and height 1..={MAX_CELL_HEIGHT}"
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidDimension {}
