//! Error types for field tables, record access and layout computation.

use std::error::Error;
use std::fmt;

use crate::kind::FieldKind;

/// Errors from indexed and generic record accessors.
///
/// Every variant is detected before any memory is touched, so a failed
/// access never leaves a partial write behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordError {
    /// The 1-based index is 0 or beyond the last field.
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// Number of fields in the record.
        field_count: usize,
    },
    /// The field at `index` is not of the requested kind.
    TypeMismatch {
        /// The 1-based index that was requested.
        index: usize,
        /// The kind the caller asked for.
        expected: FieldKind,
        /// The kind the field was declared with.
        actual: FieldKind,
    },
    /// A whole-record operation was given two records with different kinds.
    ShapeMismatch {
        /// 1-based index of the first field whose kind differs, or one past
        /// the shorter record's last field.
        index: usize,
    },
    /// A capability binding does not fit the record it was applied to.
    InvalidBinding {
        /// Capability name.
        capability: &'static str,
        /// 0-based position of the first accessor that does not fit.
        accessor: usize,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, field_count } => {
                write!(
                    f,
                    "field index {index} out of range: valid indices are 1..={field_count}"
                )
            }
            Self::TypeMismatch {
                index,
                expected,
                actual,
            } => write!(f, "field {index} is of type {actual}, not {expected}"),
            Self::ShapeMismatch { index } => {
                write!(f, "records differ in kind at field {index}")
            }
            Self::InvalidBinding {
                capability,
                accessor,
            } => write!(
                f,
                "capability {capability}: accessor {accessor} does not match the record"
            ),
        }
    }
}

impl Error for RecordError {}

/// Errors from building a [`FieldTable`](crate::FieldTable).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// A field name is not a valid identifier.
    InvalidName {
        /// The rejected name.
        name: String,
    },
    /// Two fields share a name.
    Duplicate {
        /// The repeated name.
        name: String,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName { name } => write!(f, "'{name}' is not a valid field name"),
            Self::Duplicate { name } => write!(f, "field '{name}' is declared twice"),
        }
    }
}

impl Error for FieldError {}

/// Errors from the layout engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Accumulated offsets overflowed `usize`.
    Overflow {
        /// 1-based index of the field whose placement overflowed, or
        /// `field_count + 1` when padding overflowed.
        field: usize,
    },
    /// The record is larger than the configured cap.
    ExceedsCap {
        /// Total record size in bytes.
        size: usize,
        /// The configured maximum.
        cap: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow { field } => {
                write!(f, "record layout overflows at field {field}")
            }
            Self::ExceedsCap { size, cap } => {
                write!(f, "record size {size} bytes exceeds the cap of {cap} bytes")
            }
        }
    }
}

impl Error for LayoutError {}
