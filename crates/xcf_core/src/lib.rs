//! This library decodes the structure of **XCF** files, the native image format of *GIMP*.
//!
//! # XCF Format Documentation
//!
//! An XCF file is a tree of records linked by file offsets ("pointers"). This crate walks the
//! tree down to the layer records: the image header, the image properties, the layer and channel
//! pointer tables and every layer. Pixel data is located but never decompressed.
//!
//! ## File Structure
//!
//! All multi-byte integers are big-endian.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Version                | 13 bytes: `gimp xcf file` or `gimp xcf v` and a number     |
//! | 0x000D         | Terminator             | 1 byte: NUL                                                |
//! | 0x000E         | Width                  | 4 bytes: Canvas width in pixels                            |
//! | 0x0012         | Height                 | 4 bytes: Canvas height in pixels                           |
//! | 0x0016         | Base Type              | 4 bytes: Color model of the image                          |
//! | 0x001A         | Precision              | 4 bytes: Bit depth, only present from version 4            |
//!
//! ### Header
//!
//! - **Version**: `gimp xcf file` is version 0. Later versions use `gimp xcf v` followed by the
//!   version number, e.g. `gimp xcf v011`.
//! - **Base Type**: Possible values are:
//!   - `0`: RGB
//!   - `1`: Grayscale
//!   - `2`: Indexed
//! - **Precision**: Absent up to version 3, where pixels are always 8-bit gamma integers.
//!
//! ### Property Lists
//!
//! The header is followed by the image property list. Layers and channels carry a list of their
//! own with the same layout. Each record is:
//!
//! | Field   | Size     | Description                                    |
//! |---------|----------|------------------------------------------------|
//! | Tag     | 4 bytes  | Property type, `0` ends the list               |
//! | Length  | 4 bytes  | Number of payload bytes                        |
//! | Payload | length   | Property specific data                         |
//!
//! The end record has no payload. See [`property::PropertyType`] for the known tags; records with
//! unknown tags are kept with their raw payload.
//!
//! ### Pointer Tables
//!
//! Two tables follow the image properties: one pointer per layer, then one per channel. Each table
//! ends with a zero pointer. Pointers are 4 bytes wide up to version 10 and 8 bytes wide from
//! version 11 on.
//!
//! ### Layers
//!
//! | Field             | Size      | Description                                   |
//! |-------------------|-----------|-----------------------------------------------|
//! | Width             | 4 bytes   | Layer width in pixels                         |
//! | Height            | 4 bytes   | Layer height in pixels                        |
//! | Type              | 4 bytes   | Color model and whether there is an alpha     |
//! | Name              | string    | Length-prefixed, NUL-terminated UTF-8         |
//! | Properties        | list      | Property list of the layer                    |
//! | Hierarchy Pointer | pointer   | Pixel data of the layer                       |
//! | Mask Pointer      | pointer   | Layer mask channel, `0` if there is none      |
//!
//! Strings store a 4-byte length that counts the NUL terminator; a length of `0` is an empty
//! string with no bytes after it.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.xcf`
//! - **Endianness**: Big-endian for all multi-byte integers
//! - **Parasites**: Named blobs of auxiliary data, stored inside PARASITES properties. See
//!   [`parasite`].
//!

pub mod cursor;
pub mod error;
pub mod parasite;
pub mod pointer;
pub mod property;
pub mod read;
pub mod types;

pub use cursor::ByteCursor;
pub use parasite::Parasite;
pub use property::{Property, PropertyList, PropertyType, PropertyValue};
pub use read::{Layer, XcfDocument};
