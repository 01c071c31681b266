//! Drawing and measuring text with a [`PixFont`].
//!
//! Only ink pixels are drawn; the background is left as it was, so callers
//! clear their target first if they need to.
use crate::{Glyph, PixFont};
use embedded_graphics::{draw_target::DrawTarget, geometry::Point, Pixel};

/// Advance reported for one character. String drawing adds the font's
/// spacing on top of `width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphAdvance {
    /// Whether the font has a glyph for the character.
    pub found: bool,
    pub width: u32,
}

impl GlyphAdvance {
    /// Horizontal cursor step for this character followed by `spacing`,
    /// saturating at `i32::MAX`.
    pub fn cursor_step(self, spacing: u32) -> i32 {
        i32::try_from(self.width.saturating_add(spacing)).unwrap_or(i32::MAX)
    }
}

impl PixFont {
    /// In variable width mode a present glyph reports its ink width plus the
    /// spacing, so a blank glyph still measures `spacing`.
    pub fn measure_glyph(&self, character: char) -> GlyphAdvance {
        self.advance_for(self.glyph(character).as_ref())
    }

    /// Advance for a glyph already looked up with [`glyph`](Self::glyph), or
    /// the missing character advance for `None`.
    pub fn advance_for(&self, glyph: Option<&Glyph<'_>>) -> GlyphAdvance {
        match glyph {
            Some(glyph) if self.is_variable_width() => self.found_advance(glyph.ink_width()),
            Some(_) => self.found_advance(0),
            None => self.missing_glyph(),
        }
    }

    /// Draws one character with its top left corner at `position`.
    ///
    /// Returns the same advance [`measure_glyph`](Self::measure_glyph) would,
    /// worked out while drawing.
    pub fn draw_glyph<D>(
        &self,
        target: &mut D,
        position: Point,
        character: char,
        color: D::Color,
    ) -> Result<GlyphAdvance, D::Error>
    where
        D: DrawTarget,
    {
        let Some(glyph) = self.glyph(character) else {
            return Ok(self.missing_glyph());
        };

        let mut pixels = glyph.pixels();
        target.draw_iter(
            pixels
                .by_ref()
                .map(|point| Pixel(position + point, color)),
        )?;
        Ok(self.found_advance(pixels.finish()))
    }

    /// Draws `text` left to right starting at `position` and returns where
    /// the next character would go.
    ///
    /// Characters without a glyph are skipped but still move the cursor. The
    /// cursor stops at `i32::MAX` rather than wrapping.
    pub fn draw_string<D>(
        &self,
        target: &mut D,
        position: Point,
        text: &str,
        color: D::Color,
    ) -> Result<Point, D::Error>
    where
        D: DrawTarget,
    {
        let mut x = position.x;
        for character in text.chars() {
            let advance = self.draw_glyph(target, Point::new(x, position.y), character, color)?;
            x = x.saturating_add(advance.cursor_step(self.spacing()));
        }
        Ok(Point::new(x, position.y))
    }

    /// Width [`draw_string`](Self::draw_string) would move the cursor by,
    /// including the spacing after the last character. Saturates at
    /// `u32::MAX`.
    pub fn measure_string(&self, text: &str) -> u32 {
        text.chars().fold(0u32, |total, character| {
            total
                .saturating_add(self.measure_glyph(character).width)
                .saturating_add(self.spacing())
        })
    }

    fn found_advance(&self, ink_width: u32) -> GlyphAdvance {
        GlyphAdvance {
            found: true,
            width: if self.is_variable_width() {
                ink_width.saturating_add(self.spacing())
            } else {
                self.cell_width()
            },
        }
    }

    fn missing_glyph(&self) -> GlyphAdvance {
        GlyphAdvance {
            found: false,
            width: self.fallback_advance(),
        }
    }
}
