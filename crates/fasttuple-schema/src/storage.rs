//! Storage strategies: where a schema's records live.
//!
//! A [`Storage`] knows how to create one record or a batch of them. It is
//! cheap to clone (it holds only shared, immutable metadata), so the
//! schema hands clones to its pools as their allocator.

use std::fmt;
use std::sync::Arc;

use fasttuple_core::{FieldKind, RecordMut};
use fasttuple_direct::{DirectRecord, DirectRecordArray, DirectShape};
use fasttuple_pool::PoolError;

use crate::error::SchemaError;
use crate::heap::HeapRecord;

/// Which storage strategy a schema uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Records are owned slot arrays.
    Heap,
    /// Records are contiguous byte blocks addressed by offset.
    Direct,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heap => write!(f, "heap"),
            Self::Direct => write!(f, "direct"),
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Heap {}
    impl Sealed for super::Direct {}
}

/// A storage strategy for [`Schema`](crate::Schema) records.
///
/// Sealed; implemented by [`Heap`] and [`Direct`].
pub trait Storage: Clone + fmt::Debug + Send + Sync + sealed::Sealed + 'static {
    /// Owning record type.
    type Record: RecordMut + fmt::Debug + Send + 'static;
    /// Record array type.
    type Array;

    /// This strategy's tag.
    const STRATEGY: Strategy;

    /// Allocate one record with every field at its default.
    fn create(&self) -> Result<Self::Record, SchemaError>;

    /// Allocate `len` records, adjacently where the strategy allows.
    fn create_array(&self, len: usize) -> Result<Self::Array, SchemaError>;

    /// Whether `record` has this storage's field kinds.
    fn owns(&self, record: &Self::Record) -> bool;

    /// Allocate `count` records for a pool.
    fn allocate_batch(&self, count: usize) -> Result<Vec<Self::Record>, PoolError> {
        let mut batch = Vec::new();
        batch
            .try_reserve_exact(count)
            .map_err(|e| PoolError::AllocationFailed {
                reason: e.to_string(),
            })?;
        for _ in 0..count {
            let record = self.create().map_err(|e| PoolError::AllocationFailed {
                reason: e.to_string(),
            })?;
            batch.push(record);
        }
        Ok(batch)
    }
}

/// Records as owned slot arrays.
#[derive(Clone, Debug)]
pub struct Heap {
    kinds: Arc<[FieldKind]>,
}

impl Heap {
    pub(crate) fn new(kinds: Arc<[FieldKind]>) -> Self {
        Self { kinds }
    }
}

impl Storage for Heap {
    type Record = HeapRecord;
    type Array = Vec<HeapRecord>;

    const STRATEGY: Strategy = Strategy::Heap;

    fn create(&self) -> Result<HeapRecord, SchemaError> {
        Ok(HeapRecord::new(Arc::clone(&self.kinds)))
    }

    fn create_array(&self, len: usize) -> Result<Vec<HeapRecord>, SchemaError> {
        Ok((0..len)
            .map(|_| HeapRecord::new(Arc::clone(&self.kinds)))
            .collect())
    }

    fn owns(&self, record: &HeapRecord) -> bool {
        record.shares_kinds(&self.kinds)
    }
}

/// Records as contiguous byte blocks.
#[derive(Clone, Debug)]
pub struct Direct {
    shape: Arc<DirectShape>,
}

impl Direct {
    pub(crate) fn new(shape: DirectShape) -> Self {
        Self {
            shape: Arc::new(shape),
        }
    }

    /// Shape shared by every record of this storage.
    pub fn shape(&self) -> &Arc<DirectShape> {
        &self.shape
    }
}

impl Storage for Direct {
    type Record = DirectRecord;
    type Array = DirectRecordArray;

    const STRATEGY: Strategy = Strategy::Direct;

    fn create(&self) -> Result<DirectRecord, SchemaError> {
        Ok(DirectRecord::allocate(Arc::clone(&self.shape))?)
    }

    fn create_array(&self, len: usize) -> Result<DirectRecordArray, SchemaError> {
        Ok(DirectRecordArray::allocate(Arc::clone(&self.shape), len)?)
    }

    fn owns(&self, record: &DirectRecord) -> bool {
        Arc::ptr_eq(record.shape(), &self.shape) || **record.shape() == *self.shape
    }
}
