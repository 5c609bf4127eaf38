//! Schemas: validated record shapes bound to a storage strategy.
//!
//! A [`SchemaBuilder`] collects field declarations, an optional
//! capability and pool sizing. Choosing a strategy with
//! [`heap_memory`](SchemaBuilder::heap_memory) or
//! [`direct_memory`](SchemaBuilder::direct_memory) and calling `build()`
//! validates everything and yields a [`Schema<Heap>`] or
//! [`Schema<Direct>`], which creates records directly or through its
//! [`Pool`](fasttuple_pool::Pool).
//!
//! ```
//! use fasttuple_core::{FieldKind, Record, RecordMut};
//! use fasttuple_schema::SchemaBuilder;
//!
//! let schema = SchemaBuilder::new()
//!     .add_field("a", FieldKind::Long)
//!     .add_field("b", FieldKind::Int)
//!     .direct_memory()
//!     .build()?;
//! assert_eq!(schema.to_string(), "('a':long,'b':int)");
//!
//! let mut record = schema.create()?;
//! record.set_long(1, 42)?;
//! assert_eq!(record.get_long(1)?, 42);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod builder;
mod conformance;
pub mod error;
pub mod heap;
pub mod schema;
pub mod storage;

pub use builder::{DirectSchemaBuilder, HeapSchemaBuilder, SchemaBuilder};
pub use error::SchemaError;
pub use heap::HeapRecord;
pub use schema::{Schema, TypedArray};
pub use storage::{Direct, Heap, Storage, Strategy};
