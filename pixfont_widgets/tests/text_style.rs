//! Tests for PixTextStyle

use embedded_graphics::{
    geometry::{Point, Size},
    mock_display::MockDisplay,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::Rectangle,
    text::{
        renderer::{CharacterStyle, TextRenderer},
        Baseline, DecorationColor, Text,
    },
};
use pixfont_core::{CellSize, GlyphMatrix, GlyphSet, PixFont};
use pixfont_widgets::PixTextStyle;

fn font() -> PixFont {
    let glyphs: GlyphSet = [
        ('H', GlyphMatrix::from_rows(["X X", "XXX", "X X"])),
        ('I', GlyphMatrix::from_rows(["XXX", " X ", "XXX"])),
        ('l', GlyphMatrix::from_rows(["X", "X", "X"])),
    ]
    .into_iter()
    .collect();
    PixFont::from_glyphs(CellSize::new(3, 3).unwrap(), &glyphs).unwrap()
}

#[test]
fn test_draws_text_from_top() {
    let font = font();
    let style = PixTextStyle::new(&font, BinaryColor::On);
    let mut display = MockDisplay::new();
    Text::with_baseline("HI", Point::zero(), style, Baseline::Top)
        .draw(&mut display)
        .unwrap();
    display.assert_pattern(&[
        "# # ###", //
        "###  # ",
        "# # ###",
    ]);
}

#[test]
fn test_alphabetic_baseline_sits_on_bottom_row() {
    let font = font();
    let style = PixTextStyle::new(&font, BinaryColor::On);
    let mut display = MockDisplay::new();
    Text::new("HI", Point::new(0, 2), style)
        .draw(&mut display)
        .unwrap();
    display.assert_pattern(&[
        "# # ###", //
        "###  # ",
        "# # ###",
    ]);
}

#[test]
fn test_variable_width_font() {
    let font = font().with_variable_width(true);
    let style = PixTextStyle::new(&font, BinaryColor::On);
    let mut display = MockDisplay::new();
    let next = style
        .draw_string("lIl", Point::zero(), Baseline::Top, &mut display)
        .unwrap();
    // ink width plus spacing, then the gap between characters
    assert_eq!(next, Point::new(3 + 5 + 3, 0));
    display.assert_pattern(&[
        "#  ###  #", //
        "#   #   #",
        "#  ###  #",
    ]);
}

#[test]
fn test_underline() {
    let font = font();
    let style =
        PixTextStyle::new(&font, BinaryColor::On).with_underline_color(DecorationColor::TextColor);
    let mut display = MockDisplay::new();
    let next = style
        .draw_string("HI", Point::zero(), Baseline::Top, &mut display)
        .unwrap();
    assert_eq!(next, Point::new(8, 0));
    display.assert_pattern(&[
        "# # ###", //
        "###  # ",
        "# # ###",
        "########",
    ]);
}

#[test]
fn test_background_fills_cells() {
    let font = font();
    let style = PixTextStyle::new(&font, BinaryColor::On).with_background(BinaryColor::Off);
    let mut display = MockDisplay::new();
    display.set_allow_overdraw(true);
    style
        .draw_string("I", Point::zero(), Baseline::Top, &mut display)
        .unwrap();
    display.assert_pattern(&[
        "###.", //
        ".#..",
        "###.",
        "....",
    ]);
}

#[test]
fn test_background_with_variable_width() {
    let font = font().with_variable_width(true);
    let style = PixTextStyle::new(&font, BinaryColor::On).with_background(BinaryColor::Off);
    let mut display = MockDisplay::new();
    display.set_allow_overdraw(true);
    let next = style
        .draw_string("lI", Point::zero(), Baseline::Top, &mut display)
        .unwrap();
    assert_eq!(next, Point::new(3 + 5, 0));
    display.assert_pattern(&[
        "#..###..", //
        "#...#...",
        "#..###..",
        "........",
    ]);
}

#[test]
fn test_cursor_saturates_at_the_right_edge() {
    let font = font();
    let style = PixTextStyle::new(&font, BinaryColor::On);
    let mut display = MockDisplay::<BinaryColor>::new();
    let start = Point::new(i32::MAX - 2, 0);
    let next = style
        .draw_string("??", start, Baseline::Top, &mut display)
        .unwrap();
    assert_eq!(next, Point::new(i32::MAX, 0));
    let metrics = style.measure_string("??", start, Baseline::Top);
    assert_eq!(metrics.next_position, Point::new(i32::MAX, 0));
}

#[test]
fn test_measure_string() {
    let font = font();
    let style = PixTextStyle::new(&font, BinaryColor::On);
    let metrics = style.measure_string("HI?", Point::new(1, 5), Baseline::Bottom);
    assert_eq!(
        metrics.bounding_box,
        Rectangle::new(Point::new(1, 3), Size::new(12, 3))
    );
    assert_eq!(metrics.next_position, Point::new(13, 5));
    assert_eq!(style.line_height(), 4);
}

#[test]
fn test_no_text_color_only_advances() {
    let font = font();
    let mut style = PixTextStyle::new(&font, BinaryColor::On);
    style.set_text_color(None);
    let mut display = MockDisplay::<BinaryColor>::new();
    let next = style
        .draw_string("HI", Point::new(2, 2), Baseline::Top, &mut display)
        .unwrap();
    assert_eq!(next, Point::new(10, 2));
    assert_eq!(display, MockDisplay::new());
}
