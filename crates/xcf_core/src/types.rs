//! Base types for the structure of an XCF file.

use binrw::BinRead;
use derive_more::derive::Display;
use tracing::warn;
use winnow::{
    ascii::{digit1, multispace0},
    combinator::{alt, opt, preceded},
    prelude::*,
    PResult,
};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    cursor::{ByteCursor, FixedRecord},
    error::{Error, Result},
};

/// Number of bytes in the version field, not counting its trailing NUL
pub const VERSION_FIELD_SIZE: usize = 13;

/// Text every version field starts with
pub const VERSION_PREFIX: &str = "gimp xcf ";

/// Last version whose header has no precision field
const LAST_VERSION_WITHOUT_PRECISION: f32 = 3.0;

/// The version field at the start of an XCF file.
///
/// Either `gimp xcf file` (version 0) or `gimp xcf v` followed by the version
/// number, e.g. `gimp xcf v011`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct XcfVersion {
    /// The field exactly as stored in the file
    pub text: String,

    /// Numeric version, `0` for `file`
    pub number: f32,
}

impl XcfVersion {
    /// Read the version field and derive its number.
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let text = cursor.read_fixed_string(VERSION_FIELD_SIZE)?;
        Self::parse(text)
    }

    /// Derive the version number from a version field.
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if !text.starts_with(VERSION_PREFIX) {
            warn!(version = %text, "version field does not start with {VERSION_PREFIX:?}");
        }

        let number = text
            .get(VERSION_PREFIX.len()..)
            .and_then(|mut suffix| version_number.parse_next(&mut suffix).ok())
            .ok_or_else(|| Error::InvalidVersion(text.clone()))?;

        Ok(Self { text, number })
    }

    /// The part after the `gimp xcf ` prefix, e.g. `v011` or `file`.
    pub fn suffix(&self) -> &str {
        self.text.get(VERSION_PREFIX.len()..).unwrap_or_default()
    }

    /// Whether the header stores a precision after the base type.
    pub fn has_precision(&self) -> bool {
        self.number > LAST_VERSION_WITHOUT_PRECISION
    }
}

/// `file`, or `v` followed by a number. Whitespace before the number and
/// anything after it are ignored.
fn version_number(input: &mut &str) -> PResult<f32> {
    alt((
        "file".value(0.0f32),
        preceded(
            ('v', multispace0),
            (digit1, opt(preceded('.', digit1))).try_map(|(whole, fraction)| {
                format!("{whole}.{}", fraction.unwrap_or("0")).parse::<f32>()
            }),
        ),
    ))
    .parse_next(input)
}

/// Color model of the whole image
#[derive(Debug, Display, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum BaseType {
    #[default]
    #[display("RGB")]
    Rgb,
    #[display("grayscale")]
    Grayscale,
    #[display("indexed")]
    Indexed,
    #[display("unknown ({_0})")]
    Unknown(u32),
}

impl From<u32> for BaseType {
    fn from(value: u32) -> Self {
        match value {
            0 => BaseType::Rgb,
            1 => BaseType::Grayscale,
            2 => BaseType::Indexed,
            other => BaseType::Unknown(other),
        }
    }
}

/// Bit depth and tone response of the pixel data
///
/// Files older than version 4 have no precision field and are always
/// [`Precision::U8Gamma`].
#[derive(Debug, Display, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Precision {
    #[display("8-bit linear integer")]
    U8Linear,
    #[default]
    #[display("8-bit gamma integer")]
    U8Gamma,
    #[display("16-bit linear integer")]
    U16Linear,
    #[display("16-bit gamma integer")]
    U16Gamma,
    #[display("32-bit linear integer")]
    U32Linear,
    #[display("32-bit gamma integer")]
    U32Gamma,
    #[display("16-bit linear floating point")]
    F16Linear,
    #[display("16-bit gamma floating point")]
    F16Gamma,
    #[display("32-bit linear floating point")]
    F32Linear,
    #[display("32-bit gamma floating point")]
    F32Gamma,
    #[display("64-bit linear floating point")]
    F64Linear,
    #[display("64-bit gamma floating point")]
    F64Gamma,
    #[display("unknown ({_0})")]
    Unknown(u32),
}

impl Precision {
    /// Interpret a stored precision value for the given file version.
    ///
    /// Versions 4 to 6 were development formats with their own numbering.
    pub fn from_raw(value: u32, version: f32) -> Self {
        use Precision::*;

        if version < 5.0 {
            return match value {
                0 => U8Gamma,
                1 => U16Gamma,
                2 => U32Linear,
                3 => F16Linear,
                4 => F32Linear,
                other => Unknown(other),
            };
        }

        match (value, version < 7.0) {
            (100, _) => U8Linear,
            (150, _) => U8Gamma,
            (200, _) => U16Linear,
            (250, _) => U16Gamma,
            (300, _) => U32Linear,
            (350, _) => U32Gamma,
            (400, true) => F16Linear,
            (450, true) => F16Gamma,
            (500, true) => F32Linear,
            (550, true) => F32Gamma,
            (500, false) => F16Linear,
            (550, false) => F16Gamma,
            (600, false) => F32Linear,
            (650, false) => F32Gamma,
            (700, false) => F64Linear,
            (750, false) => F64Gamma,
            (other, _) => Unknown(other),
        }
    }
}

/// Pixel layout of a layer
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ImageType {
    #[display("RGB color")]
    Rgb,
    #[display("RGB color with alpha")]
    RgbAlpha,
    #[display("grayscale")]
    Grayscale,
    #[display("grayscale with alpha")]
    GrayscaleAlpha,
    #[display("indexed")]
    Indexed,
    #[display("indexed with alpha")]
    IndexedAlpha,
    #[display("unknown ({_0})")]
    Unknown(u32),
}

impl ImageType {
    /// Whether the layer carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(
            self,
            ImageType::RgbAlpha | ImageType::GrayscaleAlpha | ImageType::IndexedAlpha
        )
    }
}

impl From<u32> for ImageType {
    fn from(value: u32) -> Self {
        match value {
            0 => ImageType::Rgb,
            1 => ImageType::RgbAlpha,
            2 => ImageType::Grayscale,
            3 => ImageType::GrayscaleAlpha,
            4 => ImageType::Indexed,
            5 => ImageType::IndexedAlpha,
            other => ImageType::Unknown(other),
        }
    }
}

/// Organisational color label of a layer, channel or path
#[derive(Debug, Display, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ColorTag {
    #[default]
    None,
    Blue,
    Green,
    Yellow,
    Orange,
    Brown,
    Red,
    Violet,
    Gray,
    #[display("unknown ({_0})")]
    Unknown(u32),
}

impl From<u32> for ColorTag {
    fn from(value: u32) -> Self {
        match value {
            0 => ColorTag::None,
            1 => ColorTag::Blue,
            2 => ColorTag::Green,
            3 => ColorTag::Yellow,
            4 => ColorTag::Orange,
            5 => ColorTag::Brown,
            6 => ColorTag::Red,
            7 => ColorTag::Violet,
            8 => ColorTag::Gray,
            other => ColorTag::Unknown(other),
        }
    }
}

/// Encoding of the tile data blocks in the file
#[derive(Debug, Display, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum CompressionType {
    None,
    #[default]
    #[display("RLE")]
    Rle,
    #[display("zlib")]
    Zlib,
    #[display("fractal")]
    Fractal,
    #[display("unknown ({_0})")]
    Unknown(u8),
}

impl From<u8> for CompressionType {
    fn from(value: u8) -> Self {
        match value {
            0 => CompressionType::None,
            1 => CompressionType::Rle,
            2 => CompressionType::Zlib,
            3 => CompressionType::Fractal,
            other => CompressionType::Unknown(other),
        }
    }
}

/// Direction of a guide line
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Orientation {
    #[display("horizontal")]
    Horizontal,
    #[display("vertical")]
    Vertical,
    #[display("unknown ({_0})")]
    Unknown(u8),
}

impl From<u8> for Orientation {
    fn from(value: u8) -> Self {
        match value {
            1 => Orientation::Horizontal,
            2 => Orientation::Vertical,
            other => Orientation::Unknown(other),
        }
    }
}

/// A guide line stored in a GUIDES property
#[derive(BinRead, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[br(big)]
pub struct Guide {
    /// Y for horizontal guides, X for vertical ones
    pub position: i32,

    #[br(map = |raw: u8| Orientation::from(raw))]
    pub orientation: Orientation,
}

impl FixedRecord for Guide {
    const SIZE: usize = 5;
}

/// One color map entry
#[derive(BinRead, Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[br(big)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FixedRecord for Rgb {
    const SIZE: usize = 3;
}

/// Canvas dimensions and color model following the version field
#[derive(BinRead, Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[br(big)]
pub struct CanvasHeader {
    /// Width of the canvas in pixels
    pub width: u32,

    /// Height of the canvas in pixels
    pub height: u32,

    /// Color model of the image
    #[br(map = |raw: u32| BaseType::from(raw))]
    pub base_type: BaseType,
}

impl FixedRecord for CanvasHeader {
    const SIZE: usize = 12;
}

/// Dimensions and pixel layout at the start of a layer record
#[derive(BinRead, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[br(big)]
pub struct LayerHeader {
    pub width: u32,
    pub height: u32,

    #[br(map = |raw: u32| ImageType::from(raw))]
    pub image_type: ImageType,
}

impl FixedRecord for LayerHeader {
    const SIZE: usize = 12;
}
