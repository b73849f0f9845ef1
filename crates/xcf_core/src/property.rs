//! Property records and property lists.
//!
//! Images, layers and channels each carry a list of properties. Every record is
//! a tag, a payload length and the payload itself; a record with tag `0` ends
//! the list. The payload is always consumed in full, so records this library
//! does not understand are kept as raw bytes and never throw the cursor off.

use std::fmt;

use derive_more::derive::{Deref, IntoIterator};
use tracing::{instrument, warn};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    cursor::{ByteCursor, FixedRecord},
    error::Result,
    parasite::{decode_parasites, Parasite},
    types::{ColorTag, CompressionType, Guide, Rgb},
};

macro_rules! property_types {
    ($($variant:ident = $id:literal => $name:literal,)*) => {
        /// Identifier of a property record
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize))]
        pub enum PropertyType {
            $($variant,)*
            /// An id this library has no name for
            Unknown(u32),
        }

        impl PropertyType {
            /// Numeric tag stored in the file.
            pub const fn id(self) -> u32 {
                match self {
                    $(PropertyType::$variant => $id,)*
                    PropertyType::Unknown(id) => id,
                }
            }

            /// Name used by the format documentation, e.g. `PROP_OPACITY`.
            pub const fn name(self) -> Option<&'static str> {
                match self {
                    $(PropertyType::$variant => Some($name),)*
                    PropertyType::Unknown(_) => None,
                }
            }
        }

        impl From<u32> for PropertyType {
            fn from(value: u32) -> Self {
                match value {
                    $($id => PropertyType::$variant,)*
                    other => PropertyType::Unknown(other),
                }
            }
        }
    };
}

property_types! {
    End = 0 => "PROP_END",
    Colormap = 1 => "PROP_COLORMAP",
    ActiveLayer = 2 => "PROP_ACTIVE_LAYER",
    ActiveChannel = 3 => "PROP_ACTIVE_CHANNEL",
    Selection = 4 => "PROP_SELECTION",
    FloatingSelection = 5 => "PROP_FLOATING_SELECTION",
    Opacity = 6 => "PROP_OPACITY",
    Mode = 7 => "PROP_MODE",
    Visible = 8 => "PROP_VISIBLE",
    Linked = 9 => "PROP_LINKED",
    LockAlpha = 10 => "PROP_LOCK_ALPHA",
    ApplyMask = 11 => "PROP_APPLY_MASK",
    EditMask = 12 => "PROP_EDIT_MASK",
    ShowMask = 13 => "PROP_SHOW_MASK",
    ShowMasked = 14 => "PROP_SHOW_MASKED",
    Offsets = 15 => "PROP_OFFSETS",
    Color = 16 => "PROP_COLOR",
    Compression = 17 => "PROP_COMPRESSION",
    Guides = 18 => "PROP_GUIDES",
    Resolution = 19 => "PROP_RESOLUTION",
    Tattoo = 20 => "PROP_TATTOO",
    Parasites = 21 => "PROP_PARASITES",
    Unit = 22 => "PROP_UNIT",
    Paths = 23 => "PROP_PATHS",
    UserUnit = 24 => "PROP_USER_UNIT",
    Vectors = 25 => "PROP_VECTORS",
    TextLayerFlags = 26 => "PROP_TEXT_LAYER_FLAGS",
    OldSamplePoints = 27 => "PROP_OLD_SAMPLE_POINTS",
    LockContent = 28 => "PROP_LOCK_CONTENT",
    GroupItem = 29 => "PROP_GROUP_ITEM",
    ItemPath = 30 => "PROP_ITEM_PATH",
    GroupItemFlags = 31 => "PROP_GROUP_ITEM_FLAGS",
    LockPosition = 32 => "PROP_LOCK_POSITION",
    FloatOpacity = 33 => "PROP_FLOAT_OPACITY",
    ColorTag = 34 => "PROP_COLOR_TAG",
    CompositeMode = 35 => "PROP_COMPOSITE_MODE",
    CompositeSpace = 36 => "PROP_COMPOSITE_SPACE",
    BlendSpace = 37 => "PROP_BLEND_SPACE",
    FloatColor = 38 => "PROP_FLOAT_COLOR",
    SamplePoints = 39 => "PROP_SAMPLE_POINTS",
    ItemSet = 40 => "PROP_ITEM_SET",
    ItemSetItem = 41 => "PROP_ITEM_SET_ITEM",
    LockVisibility = 42 => "PROP_LOCK_VISIBILITY",
    SelectedPath = 43 => "PROP_SELECTED_PATH",
    FilterRegion = 44 => "PROP_FILTER_REGION",
    FilterArgument = 45 => "PROP_FILTER_ARGUMENT",
    FilterClip = 46 => "PROP_FILTER_CLIP",
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "PROP_UNKNOWN({})", self.id()),
        }
    }
}

/// Typed reading of a property payload
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum PropertyValue {
    ColorTag(ColorTag),
    FloatOpacity(f32),
    Linked(bool),
    LockContent(bool),
    LockPosition(bool),
    LockVisibility(bool),
    /// Opacity on a 0-255 scale, stored in 32 bits
    Opacity(u32),
    Parasites(Vec<Parasite>),
    /// Non-zero unique identifier
    Tattoo(u32),
    Visible(bool),
    /// Index of the item set this item belongs to
    ItemSetItem(u32),
    /// No typed reading; only the raw payload is available
    Raw,
}

type PayloadDecoder = fn(&[u8]) -> Result<PropertyValue>;

/// Properties whose payload is interpreted while decoding.
///
/// Everything else keeps its raw payload. Supporting a new property only needs
/// a new entry here.
const PAYLOAD_DECODERS: &[(PropertyType, PayloadDecoder)] = &[
    (PropertyType::ColorTag, color_tag),
    (PropertyType::FloatOpacity, float_opacity),
    (PropertyType::Linked, linked),
    (PropertyType::LockContent, lock_content),
    (PropertyType::LockPosition, lock_position),
    (PropertyType::LockVisibility, lock_visibility),
    (PropertyType::Opacity, opacity),
    (PropertyType::Parasites, parasites),
    (PropertyType::Tattoo, tattoo),
    (PropertyType::Visible, visible),
    (PropertyType::ItemSetItem, item_set_item),
];

fn first_u32(payload: &[u8]) -> Result<u32> {
    ByteCursor::new(payload).read_u32()
}

fn flag(payload: &[u8]) -> Result<bool> {
    first_u32(payload).map(|value| value == 1)
}

fn color_tag(payload: &[u8]) -> Result<PropertyValue> {
    first_u32(payload).map(|value| PropertyValue::ColorTag(value.into()))
}

fn float_opacity(payload: &[u8]) -> Result<PropertyValue> {
    ByteCursor::new(payload)
        .read_f32()
        .map(PropertyValue::FloatOpacity)
}

fn linked(payload: &[u8]) -> Result<PropertyValue> {
    flag(payload).map(PropertyValue::Linked)
}

fn lock_content(payload: &[u8]) -> Result<PropertyValue> {
    flag(payload).map(PropertyValue::LockContent)
}

fn lock_position(payload: &[u8]) -> Result<PropertyValue> {
    flag(payload).map(PropertyValue::LockPosition)
}

fn lock_visibility(payload: &[u8]) -> Result<PropertyValue> {
    flag(payload).map(PropertyValue::LockVisibility)
}

fn opacity(payload: &[u8]) -> Result<PropertyValue> {
    first_u32(payload).map(PropertyValue::Opacity)
}

fn parasites(payload: &[u8]) -> Result<PropertyValue> {
    Ok(PropertyValue::Parasites(decode_parasites(payload)))
}

fn tattoo(payload: &[u8]) -> Result<PropertyValue> {
    first_u32(payload).map(PropertyValue::Tattoo)
}

fn visible(payload: &[u8]) -> Result<PropertyValue> {
    flag(payload).map(PropertyValue::Visible)
}

fn item_set_item(payload: &[u8]) -> Result<PropertyValue> {
    first_u32(payload).map(PropertyValue::ItemSetItem)
}

fn decode_value(kind: PropertyType, payload: &[u8]) -> PropertyValue {
    let Some((_, decode)) = PAYLOAD_DECODERS.iter().find(|(tag, _)| *tag == kind) else {
        return PropertyValue::Raw;
    };

    decode(payload).unwrap_or_else(|err| {
        warn!(property = %kind, error = %err, "unable to interpret payload, keeping raw bytes");
        PropertyValue::Raw
    })
}

/// A single property record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Property {
    /// What the property describes
    pub kind: PropertyType,

    /// Payload length as declared in the record
    pub length: u32,

    /// The payload exactly as stored
    pub payload: Vec<u8>,

    /// Typed reading of the payload, [`PropertyValue::Raw`] if there is none
    pub value: PropertyValue,
}

impl Property {
    /// Read one record, or `None` when the record ends the list.
    ///
    /// The end record carries no payload; nothing beyond its tag and length is read.
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Option<Property>> {
        let tag = cursor.read_u32()?;
        let length = cursor.read_u32()?;

        let kind = PropertyType::from(tag);
        if kind == PropertyType::End {
            if length != 0 {
                warn!(length, "end of property list declares a payload");
            }
            return Ok(None);
        }

        let size = payload_length(cursor, kind, length);
        let payload = cursor.read_bytes(size)?;
        let value = decode_value(kind, payload);

        Ok(Some(Property {
            kind,
            length,
            payload: payload.to_vec(),
            value,
        }))
    }

    /// Pixel encoding of a COMPRESSION property.
    pub fn compression(&self) -> Option<CompressionType> {
        if self.kind != PropertyType::Compression {
            return None;
        }
        self.payload.first().map(|&value| value.into())
    }

    /// Guides of a GUIDES property.
    ///
    /// Trailing bytes that do not make up a whole guide are ignored.
    pub fn guides(&self) -> Option<Vec<Guide>> {
        if self.kind != PropertyType::Guides {
            return None;
        }
        read_records(&mut ByteCursor::new(&self.payload), usize::MAX)
    }

    /// Entries of a COLORMAP property.
    ///
    /// The count stored in the payload is capped by what the payload holds.
    pub fn colormap(&self) -> Option<Vec<Rgb>> {
        if self.kind != PropertyType::Colormap {
            return None;
        }

        let mut cursor = ByteCursor::new(&self.payload);
        let count = cursor.read_u32().ok()? as usize;
        let available = cursor.remaining() / Rgb::SIZE;
        if count > available {
            warn!(count, available, "colormap is shorter than its color count");
        }
        read_records(&mut cursor, count)
    }
}

/// Number of payload bytes that follow a record header.
///
/// Some releases wrote `n + 4` instead of `3n + 4` as the length of a COLORMAP
/// with `n` colors. The size is taken from the color count instead, as long as
/// the buffer holds that many bytes.
fn payload_length(cursor: &ByteCursor<'_>, kind: PropertyType, length: u32) -> usize {
    let declared = length as usize;
    if kind != PropertyType::Colormap || declared < 4 {
        return declared;
    }

    let Ok(count) = cursor.clone().read_u32() else {
        return declared;
    };
    let needed = (count as usize)
        .saturating_mul(Rgb::SIZE)
        .saturating_add(4);
    if needed <= declared {
        return declared;
    }
    if needed > cursor.remaining() {
        warn!(count, declared, "colormap count runs past the end of the file");
        return declared;
    }

    warn!(count, declared, actual = needed, "colormap length is smaller than its colors");
    needed
}

fn read_records<T>(cursor: &mut ByteCursor<'_>, limit: usize) -> Option<Vec<T>>
where
    T: FixedRecord + for<'b> binrw::BinRead<Args<'b> = ()>,
{
    let count = limit.min(cursor.remaining() / T::SIZE);
    (0..count).map(|_| cursor.read_record::<T>().ok()).collect()
}

/// Ordered properties of an image, layer or channel
#[derive(Debug, Clone, Default, PartialEq, Deref, IntoIterator)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[into_iterator(owned, ref)]
pub struct PropertyList(Vec<Property>);

impl PropertyList {
    /// Read records until the end of the list.
    #[instrument(skip(cursor), fields(start = cursor.offset()), err)]
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<PropertyList> {
        let mut properties = Vec::new();
        while let Some(property) = Property::read(cursor)? {
            properties.push(property);
        }
        Ok(PropertyList(properties))
    }

    /// First property of the given type.
    pub fn find(&self, kind: PropertyType) -> Option<&Property> {
        self.iter().find(|property| property.kind == kind)
    }

    /// Opacity between 0 and 1.
    ///
    /// FLOAT_OPACITY takes precedence over the 8-bit OPACITY it was written next to.
    pub fn opacity(&self) -> Option<f32> {
        let float = self.iter().find_map(|property| match property.value {
            PropertyValue::FloatOpacity(opacity) => Some(opacity),
            _ => None,
        });

        float.or_else(|| {
            self.iter().find_map(|property| match property.value {
                PropertyValue::Opacity(opacity) => Some(opacity as f32 / 255.0),
                _ => None,
            })
        })
    }

    pub fn is_visible(&self) -> Option<bool> {
        self.iter().find_map(|property| match property.value {
            PropertyValue::Visible(visible) => Some(visible),
            _ => None,
        })
    }

    pub fn color_tag(&self) -> Option<ColorTag> {
        self.iter().find_map(|property| match property.value {
            PropertyValue::ColorTag(tag) => Some(tag),
            _ => None,
        })
    }

    /// Every parasite across all PARASITES properties, in file order.
    pub fn parasites(&self) -> impl Iterator<Item = &Parasite> {
        self.iter()
            .flat_map(|property| -> &[Parasite] {
                match &property.value {
                    PropertyValue::Parasites(parasites) => parasites,
                    _ => &[],
                }
            })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::cursor::ByteCursor;
    use crate::error::Result;
    use crate::parasite::Parasite;
    use crate::property::{Property, PropertyList, PropertyType, PropertyValue};
    use crate::types::{ColorTag, CompressionType, Guide, Orientation, Rgb};

    fn raw(kind: PropertyType, payload: &[u8]) -> Property {
        Property {
            kind,
            length: payload.len() as u32,
            payload: payload.to_vec(),
            value: PropertyValue::Raw,
        }
    }

    #[test]
    fn read_empty_list() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0xDE, 0xAD,
        ];

        let mut cursor = ByteCursor::new(&input);
        let list = PropertyList::read(&mut cursor)?;

        assert!(list.is_empty());
        assert_eq!(cursor.offset(), 8);

        Ok(())
    }

    #[test]
    fn read_opacity() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x00, 0x00, 0x00, 0x06,
            0x00, 0x00, 0x00, 0x04,
            0x00, 0x00, 0x00, 0xC8,
        ];

        let mut cursor = ByteCursor::new(&input);
        let property = Property::read(&mut cursor)?.unwrap();

        assert_eq!(property.kind, PropertyType::Opacity);
        assert_eq!(property.length, 4);
        assert_eq!(property.value, PropertyValue::Opacity(200));
        assert!(cursor.is_empty());

        Ok(())
    }

    #[test]
    fn read_float_opacity() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x00, 0x00, 0x00, 0x21,
            0x00, 0x00, 0x00, 0x04,
            0x3F, 0x00, 0x00, 0x00,
        ];

        let mut cursor = ByteCursor::new(&input);
        let property = Property::read(&mut cursor)?.unwrap();

        assert_eq!(property.value, PropertyValue::FloatOpacity(0.5));

        Ok(())
    }

    #[test]
    fn read_flags_and_ids() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x01, // visible
            0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x02, // linked, not 1
            0x00, 0x00, 0x00, 0x1C, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x01, // lock content
            0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, // lock position
            0x00, 0x00, 0x00, 0x2A, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x01, // lock visibility
            0x00, 0x00, 0x00, 0x14, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x2A, // tattoo
            0x00, 0x00, 0x00, 0x22, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x06, // color tag
            0x00, 0x00, 0x00, 0x29, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x03, // item set item
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        let mut cursor = ByteCursor::new(&input);
        let values = PropertyList::read(&mut cursor)?
            .into_iter()
            .map(|property| property.value)
            .collect::<Vec<_>>();

        assert_eq!(
            values,
            vec![
                PropertyValue::Visible(true),
                PropertyValue::Linked(false),
                PropertyValue::LockContent(true),
                PropertyValue::LockPosition(false),
                PropertyValue::LockVisibility(true),
                PropertyValue::Tattoo(42),
                PropertyValue::ColorTag(ColorTag::Red),
                PropertyValue::ItemSetItem(3),
            ]
        );
        assert!(cursor.is_empty());

        Ok(())
    }

    #[test]
    fn unknown_tag_keeps_raw_payload() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x00, 0x00, 0x01, 0x00,
            0x00, 0x00, 0x00, 0x03,
            0x01, 0x02, 0x03,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ];

        let mut cursor = ByteCursor::new(&input);
        let list = PropertyList::read(&mut cursor)?;

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].kind, PropertyType::Unknown(0x100));
        assert_eq!(list[0].payload, vec![1, 2, 3]);
        assert_eq!(list[0].value, PropertyValue::Raw);
        assert!(cursor.is_empty());

        Ok(())
    }

    #[traced_test]
    #[test]
    fn short_payload_falls_back_to_raw() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x00, 0x00, 0x00, 0x06,
            0x00, 0x00, 0x00, 0x02,
            0x00, 0xFF,
        ];

        let mut cursor = ByteCursor::new(&input);
        let property = Property::read(&mut cursor)?.unwrap();

        assert_eq!(property.value, PropertyValue::Raw);
        assert!(cursor.is_empty());
        assert!(logs_contain("unable to interpret payload"));

        Ok(())
    }

    #[test]
    fn payload_past_end_is_fatal() {
        #[rustfmt::skip]
        let input = [
            0x00, 0x00, 0x00, 0x06,
            0x00, 0x00, 0x00, 0x08,
            0x00, 0x00, 0x00, 0x01,
        ];

        let mut cursor = ByteCursor::new(&input);
        let err = PropertyList::read(&mut cursor).unwrap_err();

        assert!(err.is_out_of_bounds());
    }

    #[test]
    fn read_parasites_property() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x00, 0x00, 0x00, 0x15,
            0x00, 0x00, 0x00, 0x1E,
            0x00, 0x00, 0x00, 0x04, b'a', b'b', b'c', 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x02,
            0x01, 0x02,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x07,
            0x00, 0x00, 0x00, 0x00,
        ];

        let mut cursor = ByteCursor::new(&input);
        let property = Property::read(&mut cursor)?.unwrap();

        let PropertyValue::Parasites(parasites) = &property.value else {
            panic!("expected parasites, got {:?}", property.value);
        };
        assert_eq!(parasites.len(), 2);
        assert_eq!(parasites[0].name, "abc");
        assert_eq!(parasites[1].flags, 7);
        assert!(cursor.is_empty());

        Ok(())
    }

    #[traced_test]
    #[test]
    fn truncated_parasites_do_not_end_the_list() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x00, 0x00, 0x00, 0x15,
            0x00, 0x00, 0x00, 0x0E,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x40,
            0x01, 0x02,
            0x00, 0x00, 0x00, 0x08,
            0x00, 0x00, 0x00, 0x04,
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ];

        let mut cursor = ByteCursor::new(&input);
        let list = PropertyList::read(&mut cursor)?;

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].value, PropertyValue::Parasites(Vec::new()));
        assert_eq!(list.is_visible(), Some(true));
        assert!(cursor.is_empty());
        assert!(logs_contain("ignoring rest of parasite block"));

        Ok(())
    }

    #[test]
    fn list_accessors() {
        let comment = Parasite {
            name: "gimp-comment".into(),
            flags: 1,
            length: 3,
            payload: b"hi\0".to_vec(),
        };
        let list = PropertyList(vec![
            Property {
                value: PropertyValue::Opacity(255),
                ..raw(PropertyType::Opacity, &[0, 0, 0, 255])
            },
            Property {
                value: PropertyValue::FloatOpacity(0.25),
                ..raw(PropertyType::FloatOpacity, &[0x3E, 0x80, 0, 0])
            },
            Property {
                value: PropertyValue::Parasites(vec![comment.clone()]),
                ..raw(PropertyType::Parasites, &[])
            },
        ]);

        assert_eq!(list.opacity(), Some(0.25));
        assert_eq!(list.is_visible(), None);
        assert_eq!(list.color_tag(), None);
        assert_eq!(list.parasites().collect::<Vec<_>>(), vec![&comment]);
        assert!(list.find(PropertyType::Opacity).is_some());
        assert!(list.find(PropertyType::Tattoo).is_none());

        let integer_only = PropertyList(list[..1].to_vec());
        assert_eq!(integer_only.opacity(), Some(1.0));
    }

    #[test]
    fn compression_and_guides() {
        let compression = raw(PropertyType::Compression, &[2]);
        assert_eq!(compression.compression(), Some(CompressionType::Zlib));

        #[rustfmt::skip]
        let guides = raw(PropertyType::Guides, &[
            0x00, 0x00, 0x00, 0x10, 0x01,
            0x00, 0x00, 0x00, 0x20, 0x02,
            0x00, 0x00,
        ]);
        assert_eq!(
            guides.guides(),
            Some(vec![
                Guide {
                    position: 16,
                    orientation: Orientation::Horizontal
                },
                Guide {
                    position: 32,
                    orientation: Orientation::Vertical
                },
            ])
        );
        assert_eq!(compression.guides(), None);
    }

    #[traced_test]
    #[test]
    fn colormap_count_is_capped_by_payload() {
        #[rustfmt::skip]
        let colormap = raw(PropertyType::Colormap, &[
            0x00, 0x00, 0x00, 0x03,
            0xFF, 0x00, 0x00,
            0x00, 0xFF, 0x00,
        ]);

        assert_eq!(
            colormap.colormap(),
            Some(vec![Rgb { r: 255, g: 0, b: 0 }, Rgb { r: 0, g: 255, b: 0 }])
        );
        assert!(logs_contain("colormap is shorter than its color count"));
    }

    #[traced_test]
    #[test]
    fn colormap_with_short_length_keeps_list_aligned() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            // COLORMAP declaring n + 4 bytes for 4 colors
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x08,
            0x00, 0x00, 0x00, 0x04,
            0x11, 0x11, 0x11,
            0x22, 0x22, 0x22,
            0x33, 0x33, 0x33,
            0x44, 0x44, 0x44,
            0x00, 0x00, 0x00, 0x14, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x07,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        let mut cursor = ByteCursor::new(&input);
        let list = PropertyList::read(&mut cursor)?;

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].length, 8);
        assert_eq!(list[0].payload.len(), 16);
        assert_eq!(
            list[0].colormap(),
            Some(vec![
                Rgb { r: 0x11, g: 0x11, b: 0x11 },
                Rgb { r: 0x22, g: 0x22, b: 0x22 },
                Rgb { r: 0x33, g: 0x33, b: 0x33 },
                Rgb { r: 0x44, g: 0x44, b: 0x44 },
            ])
        );
        assert_eq!(list[1].value, PropertyValue::Tattoo(7));
        assert!(cursor.is_empty());
        assert!(logs_contain("colormap length is smaller than its colors"));

        Ok(())
    }

    #[test]
    fn colormap_count_past_end_uses_declared_length() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x07,
            0x00, 0x00, 0x00, 0xFF,
            0x11, 0x11, 0x11,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        let mut cursor = ByteCursor::new(&input);
        let list = PropertyList::read(&mut cursor)?;

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].payload.len(), 7);
        assert_eq!(list[0].colormap().map(|colors| colors.len()), Some(1));
        assert!(cursor.is_empty());

        Ok(())
    }

    #[test]
    fn property_type_names() {
        assert_eq!(PropertyType::from(21), PropertyType::Parasites);
        assert_eq!(PropertyType::Parasites.id(), 21);
        assert_eq!(PropertyType::LockVisibility.to_string(), "PROP_LOCK_VISIBILITY");
        assert_eq!(PropertyType::from(999).to_string(), "PROP_UNKNOWN(999)");
    }
}
