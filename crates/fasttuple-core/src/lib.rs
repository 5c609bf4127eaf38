//! Core types and traits for fasttuple records.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary the other crates share: field kinds and their fixed-width
//! codec, the ordered field table, the layout engine, the record contract
//! traits, capabilities, and record-level errors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod capability;
pub mod error;
pub mod field;
pub mod kind;
pub mod layout;
pub mod record;
pub mod string;
pub mod value;

pub use capability::{Accessor, Binding, Capability, FieldAccess, Typed};
pub use error::{FieldError, LayoutError, RecordError};
pub use field::{is_valid_identifier, FieldSpec, FieldTable};
pub use kind::{
    FieldKind, Primitive, UnknownKind, STRING_CAPACITY, STRING_FOOTPRINT, STRING_PREFIX,
};
pub use layout::{Layout, LayoutConfig};
pub use record::{Record, RecordMut};
pub use value::Value;
