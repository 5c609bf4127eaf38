//! Direct-storage error types.

use std::error::Error;
use std::fmt;

use fasttuple_core::RecordError;

/// Errors from direct record allocation and array access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectError {
    /// The allocator could not provide the requested block.
    AllocationFailed {
        /// Number of bytes requested.
        requested: usize,
    },
    /// `count * stride` overflowed `usize`.
    SizeOverflow {
        /// Number of records requested.
        count: usize,
        /// Size of one record in bytes.
        stride: usize,
    },
    /// A record array row index past the end.
    RowOutOfRange {
        /// The row that was requested.
        row: usize,
        /// Number of rows in the array.
        len: usize,
    },
    /// A field access inside a record failed.
    Record(RecordError),
}

impl fmt::Display for DirectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested } => {
                write!(f, "direct allocation of {requested} bytes failed")
            }
            Self::SizeOverflow { count, stride } => {
                write!(f, "{count} records of {stride} bytes overflow the address space")
            }
            Self::RowOutOfRange { row, len } => {
                write!(f, "row {row} out of range for array of {len} records")
            }
            Self::Record(e) => write!(f, "record: {e}"),
        }
    }
}

impl Error for DirectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Record(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RecordError> for DirectError {
    fn from(e: RecordError) -> Self {
        Self::Record(e)
    }
}
