//! Types for reading XCF documents
//!

use std::io::Read;

use tracing::{debug, instrument};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    cursor::ByteCursor,
    error::Result,
    parasite::{Parasite, COMMENT_PARASITE},
    pointer::{read_pointer, read_pointer_table, PointerWidth},
    property::PropertyList,
    types::{BaseType, CanvasHeader, ImageType, LayerHeader, Precision, XcfVersion},
};

/// A layer record reached through the layer pointer table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Layer {
    /// Offset of the record in the file
    pub offset: u64,
    pub width: u32,
    pub height: u32,
    pub image_type: ImageType,
    pub name: String,
    pub properties: PropertyList,

    /// Offset of the pixel hierarchy. Not followed.
    pub hierarchy_pointer: u64,

    /// Offset of the layer mask channel, if the layer has one
    pub mask_pointer: Option<u64>,
}

impl Layer {
    /// Read the layer record starting at `pointer`.
    ///
    /// The cursor is left after the mask pointer.
    #[instrument(skip(cursor), err)]
    pub fn read_at(cursor: &mut ByteCursor<'_>, pointer: u64, version: f32) -> Result<Self> {
        cursor.seek(usize::try_from(pointer).unwrap_or(usize::MAX))?;

        let LayerHeader {
            width,
            height,
            image_type,
        } = cursor.read_record()?;
        let name = cursor.read_string()?;
        let properties = PropertyList::read(cursor)?;
        let hierarchy_pointer = read_pointer(cursor, version)?;
        let mask_pointer = read_pointer(cursor, version)?;

        debug!(name = %name, width, height, %image_type, "read layer");

        Ok(Layer {
            offset: pointer,
            width,
            height,
            image_type,
            name,
            properties,
            hierarchy_pointer,
            mask_pointer: (mask_pointer != 0).then_some(mask_pointer),
        })
    }
}

/// A decoded XCF document
///
/// Pixel data is not decoded; layers only carry the pointers to it.
///
/// ```no_run
/// use xcf_core::XcfDocument;
///
/// fn list_layers(path: &str) -> xcf_core::error::Result<()> {
///     let document = XcfDocument::from_reader(std::fs::File::open(path)?)?;
///
///     for layer in &document.layers {
///         println!("{}: {}x{}", layer.name, layer.width, layer.height);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct XcfDocument {
    pub version: XcfVersion,

    /// Width of the canvas in pixels
    pub width: u32,

    /// Height of the canvas in pixels
    pub height: u32,
    pub base_type: BaseType,
    pub precision: Precision,

    /// Properties of the image itself
    pub properties: PropertyList,

    /// Layers in the order of the layer pointer table, topmost first
    pub layers: Vec<Layer>,
    pub layer_pointers: Vec<u64>,

    /// Channel records are not decoded, only located
    pub channel_pointers: Vec<u64>,
}

impl XcfDocument {
    /// Decode a complete XCF file held in memory.
    ///
    /// Any read past the end of `data` fails the whole decode.
    #[instrument(skip(data), fields(length = data.len()), err)]
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);

        let version = XcfVersion::read(&mut cursor)?;
        let number = version.number;

        let CanvasHeader {
            width,
            height,
            base_type,
        } = cursor.read_record()?;
        let precision = if version.has_precision() {
            Precision::from_raw(cursor.read_u32()?, number)
        } else {
            Precision::U8Gamma
        };
        debug!(version = %version.text, width, height, %base_type, %precision, "read header");

        let properties = PropertyList::read(&mut cursor)?;
        log_gimp_parasites(&properties);

        let layer_pointers = read_pointer_table(&mut cursor, number)?;
        let channel_pointers = read_pointer_table(&mut cursor, number)?;
        debug!(
            layers = layer_pointers.len(),
            channels = channel_pointers.len(),
            width = ?PointerWidth::for_version(number),
            "read pointer tables"
        );

        let layers = {
            let mut scope = cursor.save_offset();
            layer_pointers
                .iter()
                .map(|&pointer| Layer::read_at(&mut scope, pointer, number))
                .collect::<Result<Vec<_>>>()?
        };

        Ok(XcfDocument {
            version,
            width,
            height,
            base_type,
            precision,
            properties,
            layers,
            layer_pointers,
            channel_pointers,
        })
    }

    /// Read a whole stream into memory and decode it.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::parse(&data)
    }

    /// Text of the `gimp-comment` parasite, if the image has one.
    pub fn comment(&self) -> Option<String> {
        self.properties
            .parasites()
            .find(|parasite| parasite.name == COMMENT_PARASITE)
            .map(Parasite::text)
    }

    /// Every parasite of the image followed by those of each layer.
    pub fn parasites(&self) -> impl Iterator<Item = &Parasite> {
        self.properties.parasites().chain(
            self.layers
                .iter()
                .flat_map(|layer| layer.properties.parasites()),
        )
    }
}

fn log_gimp_parasites(properties: &PropertyList) {
    for parasite in properties.parasites().filter(|parasite| parasite.is_gimp()) {
        debug!(
            name = %parasite.name,
            flags = parasite.flags,
            length = parasite.length,
            text = %parasite.text(),
            "found GIMP parasite"
        );
    }
}
