//! Direct (off-heap style) storage for fasttuple records.
//!
//! Each record lives in one contiguous block whose size is the schema's
//! padded layout size. Fields are read and written at
//! `base + offset` in native byte order, unaligned.
//!
//! ```text
//! DirectShape (kinds + Layout, shared via Arc)
//! ├── DirectRecord        owns one block, freed on drop
//! │   ├── DirectView      borrowed, read-only
//! │   └── DirectViewMut   borrowed, writable
//! └── DirectRecordArray   owns len * stride bytes, rows adjacent
//! ```
//!
//! # Safety
//!
//! Blocks are zero-initialised `Box<[u8]>` obtained through fallible
//! allocation, so owning records never touch `unsafe`. The crate denies
//! `unsafe_code` and allows it only in `raw`, `shape` and `record`, for
//! the address-based entry points that wrap memory the caller vouches for.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod block;
pub mod error;
pub mod raw;
pub mod record;
pub mod shape;

pub use array::{DirectRecordArray, IterMut};
pub use error::DirectError;
pub use record::{DirectRecord, DirectView, DirectViewMut};
pub use shape::DirectShape;
