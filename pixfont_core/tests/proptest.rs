use std::collections::BTreeMap;

use pixfont_core::{
    embedded_graphics::{geometry::Point, pixelcolor::BinaryColor},
    pack, CellSize, GlyphMatrix, GlyphSet, LaneLayout, PixFont, StringDrawable,
};
use proptest::{collection, prelude::*};

type Rows = Vec<Vec<bool>>;

fn matrix(rows: &Rows) -> GlyphMatrix {
    let mut matrix = GlyphMatrix::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, &ink) in row.iter().enumerate() {
            if ink {
                matrix.set_ink(x as u32, y as u32);
            }
        }
    }
    matrix
}

/// A cell size and glyph rows that may run past the cell on either axis.
fn font_input() -> impl Strategy<Value = (u32, u32, BTreeMap<char, Rows>)> {
    (1u32..=32, 1u32..=10).prop_flat_map(|(width, height)| {
        let rows = collection::vec(
            collection::vec(any::<bool>(), 0..=width as usize + 2),
            0..=height as usize + 1,
        );
        (
            Just(width),
            Just(height),
            collection::btree_map(any::<char>(), rows, 0..40),
        )
    })
}

fn glyph_set<'a>(glyphs: impl IntoIterator<Item = (&'a char, &'a Rows)>) -> GlyphSet {
    glyphs.into_iter().map(|(&c, rows)| (c, matrix(rows))).collect()
}

proptest! {
    #[test]
    fn packing_ignores_insertion_order((width, height, glyphs) in font_input()) {
        let cell = CellSize::new(width, height).unwrap();
        let mut forwards = GlyphSet::new();
        for (&c, rows) in glyphs.iter() {
            forwards.insert(c, matrix(rows));
        }
        let mut backwards = GlyphSet::new();
        for (&c, rows) in glyphs.iter().rev() {
            backwards.insert(c, matrix(rows));
        }
        prop_assert_eq!(pack(cell, &forwards).unwrap(), pack(cell, &backwards).unwrap());
    }

    #[test]
    fn word_count_follows_width((width, height, glyphs) in font_input()) {
        let cell = CellSize::new(width, height).unwrap();
        let packed = pack(cell, &glyph_set(&glyphs)).unwrap();
        let per_word = match width {
            1..=8 => 4,
            9..=16 => 2,
            _ => 1,
        };
        prop_assert_eq!(LaneLayout::for_width(width).glyphs_per_word, per_word);
        prop_assert_eq!(
            packed.data.len(),
            glyphs.len().div_ceil(per_word as usize) * height as usize
        );
        prop_assert_eq!(packed.data.len() % height as usize, 0);
    }

    #[test]
    fn every_glyph_decodes_to_its_input((width, height, glyphs) in font_input()) {
        let cell = CellSize::new(width, height).unwrap();
        let set = glyph_set(&glyphs);
        let font = PixFont::from_glyphs(cell, &set).unwrap();
        for (c, input) in set.iter() {
            let glyph = font.glyph(c).unwrap();
            prop_assert_eq!(glyph.to_matrix(), input.clipped(width, height));
        }
    }

    #[test]
    fn glyph_bits_never_overlap((width, height, glyphs) in font_input()) {
        let cell = CellSize::new(width, height).unwrap();
        let set = glyph_set(&glyphs);
        let packed = pack(cell, &set).unwrap();
        let ink_cells: usize = set
            .iter()
            .map(|(_, m)| m.clipped(width, height).ink().count())
            .sum();
        let set_bits: u32 = packed.data.iter().map(|word| word.count_ones()).sum();
        prop_assert_eq!(ink_cells, set_bits as usize);
    }

    #[test]
    fn inking_one_glyph_leaves_the_rest_alone(
        (width, height, glyphs) in font_input(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!glyphs.is_empty());
        let cell = CellSize::new(width, height).unwrap();
        let set = glyph_set(&glyphs);
        let chars: Vec<char> = glyphs.keys().copied().collect();
        let chosen = *pick.get(&chars);

        let mut full = GlyphMatrix::new();
        for y in 0..height {
            for x in 0..width {
                full.set_ink(x, y);
            }
        }
        let mut inked = set.clone();
        inked.insert(chosen, full.clone());

        let before = PixFont::from_glyphs(cell, &set).unwrap();
        let after = PixFont::from_glyphs(cell, &inked).unwrap();
        for (c, _) in set.iter() {
            let expected = if c == chosen {
                full.clone()
            } else {
                before.glyph(c).unwrap().to_matrix()
            };
            prop_assert_eq!(after.glyph(c).unwrap().to_matrix(), expected);
        }
    }

    #[test]
    fn drawing_and_measuring_agree(
        (width, height, glyphs) in font_input(),
        text in ".{0,20}",
        variable_width in any::<bool>(),
    ) {
        let cell = CellSize::new(width, height).unwrap();
        let font = PixFont::from_glyphs(cell, &glyph_set(&glyphs))
            .unwrap()
            .with_variable_width(variable_width);

        let mut target = StringDrawable::new();
        for c in text.chars().chain(glyphs.keys().copied()) {
            let drawn = font.draw_glyph(&mut target, Point::zero(), c, BinaryColor::On).unwrap();
            prop_assert_eq!(drawn, font.measure_glyph(c));
            prop_assert_eq!(drawn.found, glyphs.contains_key(&c));
            if !drawn.found {
                let expected = if variable_width { (width / 3).max(3) } else { width };
                prop_assert_eq!(drawn.width, expected);
            }
        }

        let start = Point::new(3, 2);
        let end = font
            .draw_string(&mut StringDrawable::new(), start, &text, BinaryColor::On)
            .unwrap();
        prop_assert_eq!((end.x - start.x) as u32, font.measure_string(&text));
        prop_assert_eq!(end.y, start.y);
    }

    #[test]
    fn drawing_twice_gives_the_same_pixels(
        (width, height, glyphs) in font_input(),
        text in ".{0,20}",
    ) {
        let cell = CellSize::new(width, height).unwrap();
        let font = PixFont::from_glyphs(cell, &glyph_set(&glyphs)).unwrap();
        let first = StringDrawable::from_text(&font, &text);
        let second = StringDrawable::from_text(&font, &text);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn persisted_fonts_load_back(
        (width, height, glyphs) in font_input(),
        variable_width in any::<bool>(),
    ) {
        let cell = CellSize::new(width, height).unwrap();
        let font = PixFont::from_glyphs(cell, &glyph_set(&glyphs))
            .unwrap()
            .with_variable_width(variable_width);
        let bytes = font.to_bytes().unwrap();
        prop_assert_eq!(PixFont::from_bytes(&bytes).unwrap(), font);
    }
}
