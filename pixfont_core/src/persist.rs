//! The persisted form of a font: cell size, charmap and packed words.
//!
//! Loading always goes back through [`PixFont::new`] so a damaged file is
//! rejected up front instead of indexing out of bounds while drawing.
use crate::{CorruptFont, PixFont};
use alloc::{collections::BTreeMap, vec::Vec};
use core::fmt;

pub const BINCODE_CONFIG: bincode::config::Configuration<
    bincode::config::LittleEndian,
    bincode::config::Fixint,
    bincode::config::NoLimit,
> = bincode::config::standard().with_fixed_int_encoding();

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    bincode::Encode,
    bincode::Decode,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct RawFont {
    pub cell_width: u8,
    pub cell_height: u8,
    pub charmap: BTreeMap<char, u16>,
    pub data: Vec<u32>,
    #[serde(default)]
    pub variable_width: bool,
}

impl PixFont {
    pub fn to_raw(&self) -> RawFont {
        RawFont {
            cell_width: self.cell_width() as u8,
            cell_height: self.cell_height() as u8,
            charmap: self.charmap().clone(),
            data: self.data().to_vec(),
            variable_width: self.is_variable_width(),
        }
    }

    pub fn from_raw(raw: RawFont) -> Result<Self, CorruptFont> {
        let RawFont {
            cell_width,
            cell_height,
            charmap,
            data,
            variable_width,
        } = raw;
        let font = PixFont::new(cell_width.into(), cell_height.into(), charmap, data)
            .inspect_err(|_e| {
                #[cfg(feature = "tracing")]
                tracing::event!(tracing::Level::WARN, error = %_e, "rejected persisted font");
            })?;

        #[cfg(feature = "tracing")]
        tracing::event!(
            tracing::Level::DEBUG,
            glyphs = font.len(),
            width = cell_width,
            height = cell_height,
            variable_width,
            "loaded font"
        );

        Ok(font.with_variable_width(variable_width))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        bincode::encode_to_vec(self.to_raw(), BINCODE_CONFIG)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let (raw, read) = bincode::decode_from_slice::<RawFont, _>(bytes, BINCODE_CONFIG)
            .map_err(LoadError::Decode)?;
        if read != bytes.len() {
            return Err(LoadError::TrailingBytes {
                extra: bytes.len() - read,
            });
        }
        Ok(Self::from_raw(raw)?)
    }

    #[cfg(feature = "serde_json")]
    pub fn to_json(&self) -> Result<alloc::string::String, serde_json::Error> {
        serde_json::to_string(&self.to_raw())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let raw = serde_json::from_str::<RawFont>(json).map_err(LoadError::Json)?;
        Ok(Self::from_raw(raw)?)
    }
}

#[derive(Debug)]
pub enum LoadError {
    Decode(bincode::error::DecodeError),
    #[cfg(feature = "serde_json")]
    Json(serde_json::Error),
    TrailingBytes {
        extra: usize,
    },
    Corrupt(CorruptFont),
}

impl From<CorruptFont> for LoadError {
    fn from(e: CorruptFont) -> Self {
        LoadError::Corrupt(e)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Decode(e) => write!(f, "couldn't decode font: {e}"),
            #[cfg(feature = "serde_json")]
            LoadError::Json(e) => write!(f, "couldn't parse font json: {e}"),
            LoadError::TrailingBytes { extra } => {
                write!(f, "font is followed by {extra} unexpected bytes")
            }
            LoadError::Corrupt(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LoadError {}
