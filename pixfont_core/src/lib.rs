#![no_std]
//! Small monochrome pixel fonts.
//!
//! Glyph shapes are packed with [`pack`] into 32-bit row words, up to four
//! glyphs side by side per word, plus a charmap from character to a 16-bit
//! offset. A [`PixFont`] wraps the packed form and draws or measures text on
//! any embedded-graphics [`DrawTarget`](embedded_graphics::draw_target::DrawTarget).
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
extern crate alloc;

mod cell;
pub use cell::*;
mod glyph;
pub use glyph::*;
pub mod pack;
pub use pack::{pack, PackError, PackedGlyphs};
mod font;
pub use font::*;
mod render;
pub use render::*;
pub mod persist;
pub use persist::{LoadError, RawFont};
mod string_drawable;
pub use string_drawable::*;

pub use embedded_graphics;
