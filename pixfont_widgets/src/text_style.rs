//! PixTextStyle - draws [`PixFont`] text through the embedded_graphics text API
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    pixelcolor::PixelColor,
    primitives::{Line, Primitive, PrimitiveStyle, Rectangle},
    text::{
        renderer::{CharacterStyle, TextMetrics, TextRenderer},
        Baseline, DecorationColor,
    },
    Drawable, Pixel,
};
use pixfont_core::PixFont;

/// Character style for pixel fonts.
///
/// Glyph ink is drawn in the text color. With a background color set, every
/// character cell (including the spacing after it) is filled first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixTextStyle<'a, C> {
    pub font: &'a PixFont,
    text_color: Option<C>,
    background_color: Option<C>,
    underline_color: DecorationColor<C>,
    strikethrough_color: DecorationColor<C>,
}

impl<'a, C: PixelColor> PixTextStyle<'a, C> {
    pub fn new(font: &'a PixFont, text_color: C) -> Self {
        Self {
            font,
            text_color: Some(text_color),
            background_color: None,
            underline_color: DecorationColor::None,
            strikethrough_color: DecorationColor::None,
        }
    }

    pub fn with_background(mut self, background_color: C) -> Self {
        self.background_color = Some(background_color);
        self
    }

    pub fn with_underline_color(mut self, underline_color: DecorationColor<C>) -> Self {
        self.underline_color = underline_color;
        self
    }

    pub fn with_strikethrough_color(mut self, strikethrough_color: DecorationColor<C>) -> Self {
        self.strikethrough_color = strikethrough_color;
        self
    }

    /// Offset from the requested y position to the top of the glyph cells.
    /// The fonts carry no baseline metric so alphabetic sits on the bottom row.
    fn baseline_offset(&self, baseline: Baseline) -> i32 {
        let bottom = i32::try_from(self.font.cell_height()).unwrap_or(i32::MAX) - 1;
        match baseline {
            Baseline::Top => 0,
            Baseline::Bottom | Baseline::Alphabetic => -bottom,
            Baseline::Middle => -(bottom / 2),
        }
    }

    fn decoration_color(&self, decoration: DecorationColor<C>) -> Option<C> {
        match decoration {
            DecorationColor::None => None,
            DecorationColor::TextColor => self.text_color,
            DecorationColor::Custom(color) => Some(color),
        }
    }

    fn draw_decorations<D>(
        &self,
        start_x: i32,
        end_x: i32,
        top: i32,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        if end_x <= start_x {
            return Ok(());
        }

        let height = i32::try_from(self.font.cell_height()).unwrap_or(i32::MAX);
        // underline sits in the gap below the cell, strikethrough through its middle
        let decorations = [
            (self.underline_color, top.saturating_add(height)),
            (self.strikethrough_color, top.saturating_add(height / 2)),
        ];
        for (decoration, y) in decorations {
            if let Some(color) = self.decoration_color(decoration) {
                Line::new(Point::new(start_x, y), Point::new(end_x - 1, y))
                    .into_styled(PrimitiveStyle::with_stroke(color, 1))
                    .draw(target)?;
            }
        }
        Ok(())
    }

    fn fill_background<D>(
        &self,
        x: i32,
        top: i32,
        width: u32,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        match self.background_color {
            Some(color) if width > 0 => target.fill_solid(
                &Rectangle::new(Point::new(x, top), Size::new(width, self.line_height())),
                color,
            ),
            _ => Ok(()),
        }
    }
}

impl<C: PixelColor> TextRenderer for PixTextStyle<'_, C> {
    type Color = C;

    fn draw_string<D>(
        &self,
        text: &str,
        position: Point,
        baseline: Baseline,
        target: &mut D,
    ) -> Result<Point, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let top = position.y.saturating_add(self.baseline_offset(baseline));
        let spacing = self.font.spacing();
        let mut x = position.x;

        for character in text.chars() {
            let glyph_origin = Point::new(x, top);
            let advance = if self.background_color.is_some() {
                // fill the cell, then draw the same glyph's pixels over it
                let glyph = self.font.glyph(character);
                let advance = self.font.advance_for(glyph.as_ref());
                self.fill_background(x, top, advance.width.saturating_add(spacing), target)?;
                if let (Some(glyph), Some(color)) = (glyph, self.text_color) {
                    target.draw_iter(
                        glyph
                            .pixels()
                            .map(|point| Pixel(glyph_origin + point, color)),
                    )?;
                }
                advance
            } else if let Some(color) = self.text_color {
                self.font.draw_glyph(target, glyph_origin, character, color)?
            } else {
                self.font.measure_glyph(character)
            };
            x = x.saturating_add(advance.cursor_step(spacing));
        }

        self.draw_decorations(position.x, x, top, target)?;

        Ok(Point::new(x, position.y))
    }

    fn draw_whitespace<D>(
        &self,
        width: u32,
        position: Point,
        baseline: Baseline,
        target: &mut D,
    ) -> Result<Point, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let top = position.y.saturating_add(self.baseline_offset(baseline));
        let end_x = position
            .x
            .saturating_add(i32::try_from(width).unwrap_or(i32::MAX));
        self.fill_background(position.x, top, width, target)?;
        self.draw_decorations(position.x, end_x, top, target)?;
        Ok(Point::new(end_x, position.y))
    }

    fn measure_string(&self, text: &str, position: Point, baseline: Baseline) -> TextMetrics {
        let width = self.font.measure_string(text);
        let top = position.y.saturating_add(self.baseline_offset(baseline));

        TextMetrics {
            bounding_box: Rectangle::new(
                Point::new(position.x, top),
                Size::new(width, self.font.cell_height()),
            ),
            next_position: Point::new(
                position
                    .x
                    .saturating_add(i32::try_from(width).unwrap_or(i32::MAX)),
                position.y,
            ),
        }
    }

    fn line_height(&self) -> u32 {
        self.font.cell_height().saturating_add(self.font.spacing())
    }
}

impl<C: PixelColor> CharacterStyle for PixTextStyle<'_, C> {
    type Color = C;

    fn set_text_color(&mut self, text_color: Option<Self::Color>) {
        self.text_color = text_color;
    }

    fn set_background_color(&mut self, background_color: Option<Self::Color>) {
        self.background_color = background_color;
    }

    fn set_underline_color(&mut self, underline_color: DecorationColor<Self::Color>) {
        self.underline_color = underline_color;
    }

    fn set_strikethrough_color(&mut self, strikethrough_color: DecorationColor<Self::Color>) {
        self.strikethrough_color = strikethrough_color;
    }
}
