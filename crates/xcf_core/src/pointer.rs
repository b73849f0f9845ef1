//! File offsets whose width depends on the file version.
//!
//! Up to version 10 every pointer is a `u32`. Version 11 widened them to `u64`
//! so that files can grow past 4 GiB. The width is decided once from the
//! version number and the same number is handed to every pointer read.

use tracing::{instrument, warn};

use crate::{cursor::ByteCursor, error::Result};

/// First version that stores 64-bit pointers
pub const FIRST_64_BIT_VERSION: f32 = 11.0;

/// Storage width of a pointer
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerWidth {
    U32,
    U64,
}

impl PointerWidth {
    /// Width used by files of the given version.
    pub fn for_version(version: f32) -> Self {
        if version < FIRST_64_BIT_VERSION {
            PointerWidth::U32
        } else {
            PointerWidth::U64
        }
    }

    /// Number of bytes a pointer occupies.
    pub const fn size(self) -> usize {
        match self {
            PointerWidth::U32 => 4,
            PointerWidth::U64 => 8,
        }
    }
}

/// Read a single pointer, widened to `u64`.
pub fn read_pointer(cursor: &mut ByteCursor<'_>, version: f32) -> Result<u64> {
    match PointerWidth::for_version(version) {
        PointerWidth::U32 => cursor.read_u32().map(u64::from),
        PointerWidth::U64 => cursor.read_u64(),
    }
}

/// Read pointers until a zero pointer, returning the non-zero ones in order.
#[instrument(skip(cursor), fields(start = cursor.offset()), err)]
pub fn read_pointer_table(cursor: &mut ByteCursor<'_>, version: f32) -> Result<Vec<u64>> {
    let mut pointers = Vec::new();
    loop {
        let pointer = read_pointer(cursor, version)?;
        if pointer == 0 {
            break;
        }
        if pointer > cursor.len() as u64 {
            warn!(pointer, length = cursor.len(), "pointer past the end of the file");
        }
        pointers.push(pointer);
    }
    Ok(pointers)
}
