//! Bounds-checked big-endian cursor over an in-memory XCF buffer.
//!

use std::{
    io::Cursor,
    ops::{Deref, DerefMut},
};

use binrw::{BinRead, Endian};
use byteorder::{BigEndian, ByteOrder};
use tracing::trace;

use crate::error::{Error, Result};

/// A fixed-size group of fields that can be read in one go with [`ByteCursor::read_record`].
pub trait FixedRecord: BinRead {
    /// Number of bytes the record occupies in the file
    const SIZE: usize;
}

/// A read position over a borrowed byte buffer.
///
/// Every read checks the remaining length first and fails with
/// [`Error::OutOfBounds`] instead of reading past the end, so the offset always
/// stays within `0..=len`.
///
/// ```
/// use xcf_core::cursor::ByteCursor;
///
/// let data = [0x00, 0x00, 0x00, 0x0A, 0xFF];
/// let mut cursor = ByteCursor::new(&data);
///
/// assert_eq!(cursor.read_u32().unwrap(), 10);
/// assert_eq!(cursor.offset(), 4);
/// assert!(cursor.read_u32().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current read position.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Number of bytes left to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Whether every byte has been consumed.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Move to an absolute position.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(Error::OutOfBounds {
                offset,
                needed: 0,
                length: self.data.len(),
            });
        }
        self.offset = offset;
        Ok(())
    }

    /// Remember the current position until the returned guard is dropped.
    ///
    /// The guard dereferences to the cursor, so reads and seeks go through it.
    /// When it goes out of scope, including through `?`, the cursor is put
    /// back where it was.
    pub fn save_offset(&mut self) -> SavedOffset<'_, 'a> {
        let offset = self.offset;
        SavedOffset {
            cursor: self,
            offset,
        }
    }

    /// Read the next `count` bytes without copying them.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(Error::OutOfBounds {
                offset: self.offset,
                needed: count,
                length: self.data.len(),
            });
        }
        let bytes = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(bytes)
    }

    /// Advance past `count` bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_bytes(4).map(BigEndian::read_u32)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_bytes(4).map(BigEndian::read_i32)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_bytes(4).map(BigEndian::read_f32)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_bytes(8).map(BigEndian::read_u64)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_bytes(8).map(BigEndian::read_i64)
    }

    /// Read `count` bytes of text followed by a NUL that is not part of `count`.
    ///
    /// Only the version field at the start of a file is stored this way.
    pub fn read_fixed_string(&mut self, count: usize) -> Result<String> {
        let text = String::from_utf8_lossy(self.read_bytes(count)?).into_owned();
        self.skip(1)?;
        Ok(text)
    }

    /// Read a length-prefixed string.
    ///
    /// The `u32` length counts the trailing NUL, so `0` is an empty string
    /// with no bytes following it.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_u32()? as usize;
        if length == 0 {
            return Ok(String::new());
        }

        let text = String::from_utf8_lossy(self.read_bytes(length - 1)?).into_owned();
        self.skip(1)?;
        Ok(text)
    }

    /// Read a fixed-size record described with `binrw`.
    pub fn read_record<T>(&mut self) -> Result<T>
    where
        T: FixedRecord + for<'b> BinRead<Args<'b> = ()>,
    {
        let bytes = self.read_bytes(T::SIZE)?;
        Ok(T::read_options(&mut Cursor::new(bytes), Endian::Big, ())?)
    }
}

/// Guard returned by [`ByteCursor::save_offset`].
#[derive(Debug)]
pub struct SavedOffset<'c, 'a> {
    cursor: &'c mut ByteCursor<'a>,
    offset: usize,
}

impl SavedOffset<'_, '_> {
    /// The position that will be restored.
    pub fn saved(&self) -> usize {
        self.offset
    }
}

impl<'a> Deref for SavedOffset<'_, 'a> {
    type Target = ByteCursor<'a>;

    fn deref(&self) -> &Self::Target {
        self.cursor
    }
}

impl DerefMut for SavedOffset<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cursor
    }
}

impl Drop for SavedOffset<'_, '_> {
    fn drop(&mut self) {
        trace!(from = self.cursor.offset, to = self.saved(), "restoring offset");
        self.cursor.offset = self.offset;
    }
}
