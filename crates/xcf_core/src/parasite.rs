//! Parasites packed inside a PARASITES property.
//!
//! A PARASITES payload is a run of records with no count in front of it:
//!
//! | Field          | Size                | Description                                    |
//! |----------------|---------------------|------------------------------------------------|
//! | Name length    | 4 bytes             | Length of the name including its NUL           |
//! | Name           | name length bytes   | UTF-8 name and NUL, absent when length is 0/1 |
//! | Flags          | 4 bytes             | Persistence and undo flags                     |
//! | Payload length | 4 bytes             | Number of payload bytes                        |
//! | Payload        | payload length      | Opaque data                                    |
//!
//! Some encoders wrote lengths that disagree with the property length, so a
//! record that runs past the payload ends the list instead of failing the file.

use tracing::{instrument, warn};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    cursor::ByteCursor,
    error::{Error, Result},
};

/// Name of the parasite holding the image comment
pub const COMMENT_PARASITE: &str = "gimp-comment";

/// A named blob of auxiliary data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Parasite {
    /// Name of the parasite, may be empty
    pub name: String,

    /// Persistence and undo flags
    pub flags: u32,

    /// Payload length as declared in the record
    pub length: u32,

    /// Parasite specific data
    pub payload: Vec<u8>,
}

impl Parasite {
    /// Payload as text, for parasites such as `gimp-comment` that store a string.
    ///
    /// A trailing NUL is dropped.
    pub fn text(&self) -> String {
        let payload = self.payload.strip_suffix(&[0u8]).unwrap_or(&self.payload);
        String::from_utf8_lossy(payload).into_owned()
    }

    /// Whether this parasite belongs to GIMP itself (`gimp-comment`, `gimp-image-grid`, ...).
    pub fn is_gimp(&self) -> bool {
        self.name
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("gimp"))
    }

    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let name_length = cursor.read_u32()? as usize;
        let name = if name_length > 1 {
            let name = String::from_utf8_lossy(cursor.read_bytes(name_length - 1)?).into_owned();
            cursor.skip(1)?;
            name
        } else {
            String::new()
        };

        let flags = cursor.read_u32()?;
        let length = cursor.read_u32()?;
        let payload = cursor.read_bytes(length as usize)?.to_vec();

        Ok(Parasite {
            name,
            flags,
            length,
            payload,
        })
    }
}

/// Decode every complete parasite in a PARASITES payload.
///
/// Stops at the first record that does not fit and returns what was read so far.
#[instrument(skip(payload), fields(length = payload.len()))]
pub fn decode_parasites(payload: &[u8]) -> Vec<Parasite> {
    let mut parasites = Vec::new();
    if let Err(err) = read_parasites(&mut ByteCursor::new(payload), &mut parasites) {
        warn!(error = %err, parsed = parasites.len(), "ignoring rest of parasite block");
    }
    parasites
}

fn read_parasites(cursor: &mut ByteCursor<'_>, parasites: &mut Vec<Parasite>) -> Result<()> {
    while !cursor.is_empty() {
        let parasite = Parasite::read(cursor).map_err(|err| Error::MalformedParasiteBlock {
            parsed: parasites.len(),
            source: Box::new(err),
        })?;
        parasites.push(parasite);
    }
    Ok(())
}
