//! Shared schemas and capabilities for fasttuple tests.
//!
//! Builders are returned unbuilt so tests can pick the strategy and pool
//! settings they need:
//!
//! ```text
//! long_int_short().direct_memory().build()
//! every_kind().heap_memory().build()
//! ```

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::*;
