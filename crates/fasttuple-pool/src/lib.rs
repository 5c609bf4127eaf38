//! A thread-safe object pool with lazy growth.
//!
//! A [`Pool`] starts empty and allocates its first increment on the first
//! [`checkout`](Pool::checkout). Later growth depends on the
//! [`ExhaustedPolicy`]: `Throw` fails once every element is checked out,
//! `Expand` allocates another increment. [`close`](Pool::close) hands every
//! free element to the destroyer and is terminal.
//!
//! Allocation and destruction are pluggable through the [`Allocator`] and
//! [`Destroyer`] traits, both implemented for plain closures.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod pool;

pub use config::{ExhaustedPolicy, PoolConfig};
pub use error::PoolError;
pub use pool::{Allocator, Destroyer, Pool, PoolBuilder};
