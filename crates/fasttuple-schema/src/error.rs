//! Schema construction and use errors.

use std::error::Error;
use std::fmt;

use fasttuple_core::{FieldError, FieldKind, LayoutError, RecordError, UnknownKind};
use fasttuple_direct::DirectError;
use fasttuple_pool::PoolError;

/// Errors from building a schema or creating records through it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// Field names and field kinds were added in different numbers.
    LengthMismatch {
        /// Number of names supplied.
        names: usize,
        /// Number of kinds supplied.
        kinds: usize,
    },
    /// A field type name did not name a supported kind.
    UnsupportedType {
        /// The field being declared.
        field: String,
        /// The unrecognised type name.
        type_name: String,
    },
    /// A field name is not a valid identifier.
    InvalidFieldName {
        /// The rejected name.
        name: String,
    },
    /// Two fields share a name.
    DuplicateField {
        /// The repeated name.
        name: String,
    },
    /// The capability descriptor itself is malformed.
    InvalidCapability {
        /// Capability name.
        capability: &'static str,
        /// Description of the problem.
        reason: String,
    },
    /// A capability accessor has no field of the same name.
    MissingAccessor {
        /// Capability name.
        capability: &'static str,
        /// Accessor with no backing field.
        accessor: &'static str,
    },
    /// A capability accessor and its field disagree on kind.
    AccessorKindMismatch {
        /// Capability name.
        capability: &'static str,
        /// Accessor name.
        accessor: &'static str,
        /// Kind the accessor reads and writes.
        expected: FieldKind,
        /// Kind the field was declared with.
        actual: FieldKind,
    },
    /// A typed record was requested for a capability the schema does not
    /// implement.
    CapabilityMismatch {
        /// Capability requested by the caller.
        requested: &'static str,
        /// Capability the schema was built with, if any.
        declared: Option<&'static str>,
    },
    /// A record passed to the schema was produced by a different one.
    ForeignRecord,
    /// No field has the given name.
    FieldNotFound {
        /// The name looked up.
        name: String,
    },
    /// A record-level check failed.
    Record(RecordError),
    /// Layout computation failed.
    Layout(LayoutError),
    /// Direct allocation failed.
    Direct(DirectError),
    /// The schema's pool refused the operation.
    Pool(PoolError),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { names, kinds } => write!(
                f,
                "field names and field types must have equal length ({names} names, {kinds} types)"
            ),
            Self::UnsupportedType { field, type_name } => {
                write!(f, "field '{field}': unsupported field type '{type_name}'")
            }
            Self::InvalidFieldName { name } => {
                write!(f, "'{name}' is not a valid field name")
            }
            Self::DuplicateField { name } => write!(f, "field '{name}' is declared twice"),
            Self::InvalidCapability { capability, reason } => {
                write!(f, "capability {capability} is invalid: {reason}")
            }
            Self::MissingAccessor {
                capability,
                accessor,
            } => write!(f, "capability {capability}: no field named '{accessor}'"),
            Self::AccessorKindMismatch {
                capability,
                accessor,
                expected,
                actual,
            } => write!(
                f,
                "capability {capability}: accessor '{accessor}' is {expected} but the field is {actual}"
            ),
            Self::CapabilityMismatch {
                requested,
                declared: Some(declared),
            } => write!(f, "schema implements {declared}, not {requested}"),
            Self::CapabilityMismatch {
                requested,
                declared: None,
            } => write!(f, "schema implements no capability, {requested} requested"),
            Self::ForeignRecord => write!(f, "record was not produced by this schema"),
            Self::FieldNotFound { name } => write!(f, "field {name} not found"),
            Self::Record(e) => write!(f, "record: {e}"),
            Self::Layout(e) => write!(f, "layout: {e}"),
            Self::Direct(e) => write!(f, "direct storage: {e}"),
            Self::Pool(e) => write!(f, "pool: {e}"),
        }
    }
}

impl Error for SchemaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Record(e) => Some(e),
            Self::Layout(e) => Some(e),
            Self::Direct(e) => Some(e),
            Self::Pool(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldError> for SchemaError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::InvalidName { name } => Self::InvalidFieldName { name },
            FieldError::Duplicate { name } => Self::DuplicateField { name },
        }
    }
}

impl From<RecordError> for SchemaError {
    fn from(e: RecordError) -> Self {
        Self::Record(e)
    }
}

impl From<LayoutError> for SchemaError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl From<DirectError> for SchemaError {
    fn from(e: DirectError) -> Self {
        Self::Direct(e)
    }
}

impl From<PoolError> for SchemaError {
    fn from(e: PoolError) -> Self {
        Self::Pool(e)
    }
}

impl SchemaError {
    pub(crate) fn unsupported(field: &str, unknown: UnknownKind) -> Self {
        Self::UnsupportedType {
            field: field.to_string(),
            type_name: unknown.name,
        }
    }
}
