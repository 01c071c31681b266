#![no_std]
//! embedded-graphics text rendering for [`pixfont_core`] fonts.

pub mod text_style;
pub use text_style::PixTextStyle;
