//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// A read would run past the end of the buffer
    #[error("reading {needed} bytes at offset {offset:#x} exceeds buffer of {length} bytes")]
    OutOfBounds {
        /// Offset the read started at
        offset: usize,
        /// Number of bytes the read asked for
        needed: usize,
        /// Length of the buffer being read
        length: usize,
    },

    /// A parasite record inside a PARASITES property could not be read
    #[error("malformed parasite block after {parsed} parasites")]
    MalformedParasiteBlock {
        /// Number of parasites read before the failure
        parsed: usize,
        /// The read that failed
        #[source]
        source: Box<Error>,
    },

    /// The version field is neither `file` nor `v` followed by a number
    #[error("unrecognized file version {0:?}")]
    InvalidVersion(String),
}

impl Error {
    /// Whether this error was raised by a read past the end of the buffer.
    pub fn is_out_of_bounds(&self) -> bool {
        match self {
            Error::OutOfBounds { .. } => true,
            Error::MalformedParasiteBlock { source, .. } => source.is_out_of_bounds(),
            _ => false,
        }
    }
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
