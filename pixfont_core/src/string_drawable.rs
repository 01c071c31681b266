use crate::{PixFont, INK_MARKER};
use alloc::{string::String, vec::Vec};
use core::{convert::Infallible, fmt};
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    Pixel,
};

/// A DrawTarget that renders into lines of text, one character per pixel.
///
/// Lines grow as pixels are drawn so nothing needs sizing up front. Pixels at
/// negative coordinates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringDrawable {
    lines: Vec<Vec<bool>>,
}

impl StringDrawable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `text` at the origin in `font`.
    pub fn from_text(font: &PixFont, text: &str) -> Self {
        let mut drawable = Self::new();
        font.draw_string(&mut drawable, Point::zero(), text, BinaryColor::On)
            .unwrap_or_else(|e| match e {});
        drawable
    }

    pub fn set_pixel(&mut self, point: Point, color: BinaryColor) {
        let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
            return;
        };
        if self.lines.len() <= y {
            self.lines.resize_with(y + 1, Vec::new);
        }
        let line = &mut self.lines[y];
        if line.len() <= x {
            line.resize(x + 1, false);
        }
        line[x] = color.is_on();
    }

    pub fn is_set(&self, point: Point) -> bool {
        let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
            return false;
        };
        self.lines
            .get(y)
            .and_then(|line| line.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// The drawing with `prefix` in front of every line, e.g. `"// "` to
    /// paste it into a source comment.
    pub fn prefix_string(&self, prefix: &str) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(prefix);
            out.extend(line.iter().map(|&ink| if ink { INK_MARKER } else { ' ' }));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for StringDrawable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix_string(""))
    }
}

impl DrawTarget for StringDrawable {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }
}

impl OriginDimensions for StringDrawable {
    fn size(&self) -> Size {
        let width = self.lines.iter().map(Vec::len).max().unwrap_or(0);
        Size::new(width as u32, self.lines.len() as u32)
    }
}
