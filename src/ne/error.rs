use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Read,
    Io,
}

#[derive(Error, Debug)]
pub enum NeError {
    // ==================== Format Errors ====================
    #[error("not an NE file: expected {expected:?} signature in {what}, got {found:?}")]
    BadSignature {
        what: &'static str,
        expected: &'static str,
        found: [u8; 2],
    },

    #[error("unexpected overflow of resource area: {consumed} of {max_bytes} bytes used without a terminating type block")]
    ResourceAreaOverflow { consumed: u64, max_bytes: u64 },

    #[error("resident name table (0x{resident_names:04X}) precedes resource table (0x{resource_table:04X})")]
    TableBounds {
        resource_table: u64,
        resident_names: u64,
    },

    #[error("counted string at 0x{offset:08X} is {length} bytes, limit is {max}")]
    StringTooLong { offset: u64, length: usize, max: usize },

    #[error("{what} shift count {shift} is out of range")]
    ShiftOutOfRange { what: &'static str, shift: u16 },

    // ==================== Read Errors ====================
    #[error("read failed ({context}): {source}")]
    Read {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("seek to 0x{offset:08X} failed ({context}): {source}")]
    Seek {
        context: &'static str,
        offset: u64,
        #[source]
        source: io::Error,
    },

    // ==================== Output Errors ====================
    #[error("unable to open output file '{path}': {source}")]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write to output file '{path}' failed: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl NeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadSignature { .. }
            | Self::ResourceAreaOverflow { .. }
            | Self::TableBounds { .. }
            | Self::StringTooLong { .. }
            | Self::ShiftOutOfRange { .. } => ErrorKind::Format,
            Self::Read { .. } | Self::Seek { .. } => ErrorKind::Read,
            Self::OutputCreate { .. } | Self::OutputWrite { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn read(context: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Read { context, source }
    }

    pub(crate) fn decode(context: &'static str) -> impl FnOnce(binrw::Error) -> Self {
        move |err| {
            let source = match err {
                binrw::Error::Io(e) => e,
                other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
            };
            Self::Read { context, source }
        }
    }

    pub(crate) fn seek(context: &'static str, offset: u64) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Seek {
            context,
            offset,
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, NeError>;
