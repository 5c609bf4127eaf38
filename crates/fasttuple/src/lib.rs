//! fasttuple: schema-driven records with a fixed field layout.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the fasttuple sub-crates. Adding `fasttuple` as a single dependency is
//! enough for most users.
//!
//! # Quick start
//!
//! ```rust
//! use fasttuple::prelude::*;
//!
//! capability! {
//!     /// A trade tick.
//!     pub trait Tick {
//!         id, set_id: i64;
//!         qty, set_qty: i32;
//!         price, set_price: f64;
//!     }
//! }
//!
//! let schema = SchemaBuilder::new()
//!     .add_field("id", FieldKind::Long)
//!     .add_field("qty", FieldKind::Int)
//!     .add_field("price", FieldKind::Double)
//!     .add_field_by_type_name("venue", "string")
//!     .implement::<dyn Tick>()
//!     .pool_of_size(16)
//!     .direct_memory()
//!     .pad_to_word_size(64)
//!     .build()?;
//! assert_eq!(schema.byte_size(), 64);
//!
//! // Index-based access, 1-based.
//! let mut record = schema.pool().checkout()?;
//! record.set_long(1, 7)?;
//! record.set_string(4, "XLON")?;
//!
//! // Named access through the declared capability.
//! let mut tick = schema.typed::<dyn Tick>(record)?;
//! tick.set_price(101.25);
//! assert_eq!(tick.id(), 7);
//!
//! schema.pool().release(tick.into_inner())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `fasttuple-core` | Field kinds, layout engine, record traits, capabilities |
//! | [`direct`] | `fasttuple-direct` | Contiguous byte-block records, arrays and raw access |
//! | [`pool`] | `fasttuple-pool` | Bounded or expanding object pools |
//! | [`schema`] | `fasttuple-schema` | Schema builders and storage strategies |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Field kinds, layouts and the record contract (`fasttuple-core`).
///
/// Contains [`types::FieldKind`], [`types::Layout`], the
/// [`types::Record`]/[`types::RecordMut`] traits and the
/// [`capability!`](types::capability) macro.
pub use fasttuple_core as types;

/// Byte-block records (`fasttuple-direct`).
///
/// [`direct::DirectRecord`] owns one block, [`direct::DirectRecordArray`]
/// owns a contiguous run of them, and the `raw` functions read and write
/// at an address plus offset.
pub use fasttuple_direct as direct;

/// Object pools (`fasttuple-pool`).
pub use fasttuple_pool as pool;

/// Schema builders and storage strategies (`fasttuple-schema`).
///
/// Build a [`schema::Schema`] with [`schema::SchemaBuilder`], choosing
/// [`schema::Heap`] or [`schema::Direct`] storage.
pub use fasttuple_schema as schema;

/// Common imports for typical fasttuple usage.
///
/// ```rust
/// use fasttuple::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use fasttuple_core::{capability, FieldKind, Record, RecordMut, Typed, Value};

    // Errors
    pub use fasttuple_core::{FieldError, LayoutError, RecordError};
    pub use fasttuple_direct::DirectError;
    pub use fasttuple_pool::PoolError;
    pub use fasttuple_schema::SchemaError;

    // Records
    pub use fasttuple_direct::{DirectRecord, DirectRecordArray};
    pub use fasttuple_schema::HeapRecord;

    // Pools
    pub use fasttuple_pool::{ExhaustedPolicy, Pool, PoolConfig};

    // Schemas
    pub use fasttuple_schema::{Direct, Heap, Schema, SchemaBuilder, Strategy};
}
