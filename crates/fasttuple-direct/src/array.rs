//! Contiguous arrays of direct records.
//!
//! One block of `len * stride` bytes; record `i` starts at
//! `base + i * stride`, where `stride` is the shape's total size. Rows are
//! 0-based; fields within a row stay 1-based.

use std::fmt;
use std::mem;
use std::ops::Range;
use std::sync::Arc;

use fasttuple_core::record::resolve;
use fasttuple_core::{FieldKind, Primitive};

use crate::block;
use crate::error::DirectError;
use crate::record::{DirectView, DirectViewMut};
use crate::shape::DirectShape;

/// `len` direct records sharing one contiguous, owned block.
pub struct DirectRecordArray {
    bytes: Box<[u8]>,
    len: usize,
    shape: Arc<DirectShape>,
}

impl DirectRecordArray {
    /// Allocate `len` zeroed records of `shape` in one block.
    pub fn allocate(shape: Arc<DirectShape>, len: usize) -> Result<Self, DirectError> {
        let bytes = block::zeroed_array(len, shape.byte_size())?;
        Ok(Self { bytes, len, shape })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no records.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Distance in bytes between consecutive records.
    pub fn stride(&self) -> usize {
        self.shape.byte_size()
    }

    /// Shape shared by every record.
    pub fn shape(&self) -> &Arc<DirectShape> {
        &self.shape
    }

    /// Base address of record 0.
    pub fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    /// Mutable base address of record 0.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.bytes.as_mut_ptr()
    }

    fn check_row(&self, row: usize) -> Result<Range<usize>, DirectError> {
        if row >= self.len {
            return Err(DirectError::RowOutOfRange { row, len: self.len });
        }
        let start = row * self.stride();
        Ok(start..start + self.stride())
    }

    /// Read-only view of record `row`.
    pub fn view(&self, row: usize) -> Result<DirectView<'_>, DirectError> {
        let range = self.check_row(row)?;
        Ok(DirectView::new(&self.bytes[range], &self.shape))
    }

    /// Writable view of record `row`.
    pub fn view_mut(&mut self, row: usize) -> Result<DirectViewMut<'_>, DirectError> {
        let range = self.check_row(row)?;
        Ok(DirectViewMut::new(&mut self.bytes[range], &self.shape))
    }

    /// Read field `index` (1-based) of record `row` without building a view.
    pub fn get<P: Primitive>(&self, row: usize, index: usize) -> Result<P, DirectError> {
        let range = self.check_row(row)?;
        let slot = resolve(self.shape.kinds(), index, P::KIND)?;
        Ok(self.shape.load(&self.bytes[range], slot))
    }

    /// Write field `index` (1-based) of record `row` without building a view.
    pub fn set<P: Primitive>(&mut self, row: usize, index: usize, value: P) -> Result<(), DirectError> {
        let range = self.check_row(row)?;
        let slot = resolve(self.shape.kinds(), index, P::KIND)?;
        self.shape.store(&mut self.bytes[range], slot, value);
        Ok(())
    }

    /// Read string field `index` of record `row`.
    pub fn get_string(&self, row: usize, index: usize) -> Result<String, DirectError> {
        let range = self.check_row(row)?;
        let slot = resolve(self.shape.kinds(), index, FieldKind::Str)?;
        Ok(self.shape.load_str(&self.bytes[range], slot))
    }

    /// Write string field `index` of record `row`, truncating to capacity.
    pub fn set_string(&mut self, row: usize, index: usize, value: &str) -> Result<(), DirectError> {
        let range = self.check_row(row)?;
        let slot = resolve(self.shape.kinds(), index, FieldKind::Str)?;
        self.shape.store_str(&mut self.bytes[range], slot, value);
        Ok(())
    }

    /// Iterate read-only views in row order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = DirectView<'_>> + '_ {
        let stride = self.stride();
        (0..self.len).map(move |row| {
            let start = row * stride;
            DirectView::new(&self.bytes[start..start + stride], &self.shape)
        })
    }

    /// Iterate writable views in row order.
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            rest: &mut self.bytes,
            remaining: self.len,
            shape: &self.shape,
        }
    }
}

impl fmt::Debug for DirectRecordArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectRecordArray")
            .field("address", &self.as_ptr())
            .field("len", &self.len)
            .field("stride", &self.stride())
            .finish()
    }
}

/// Iterator over writable views of a [`DirectRecordArray`].
///
/// Unlike `chunks_exact_mut`, this also handles a zero stride.
pub struct IterMut<'a> {
    rest: &'a mut [u8],
    remaining: usize,
    shape: &'a DirectShape,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = DirectViewMut<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let rest = mem::take(&mut self.rest);
        let (head, tail) = rest.split_at_mut(self.shape.byte_size());
        self.rest = tail;
        Some(DirectViewMut::new(head, self.shape))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IterMut<'_> {}
