//! Owning direct records and borrowed views.
//!
//! ```text
//! DirectRecord   owns Box<[u8]>, freed once on drop, move-only
//!   ├── view()      -> DirectView<'_>     shared borrow
//!   └── view_mut()  -> DirectViewMut<'_>  exclusive borrow
//! DirectView::from_raw / DirectViewMut::from_raw   caller-owned memory
//! ```
//!
//! Views have no destroy operation; their lifetime ties them to whatever
//! owns the bytes.

#![allow(unsafe_code)]

use std::fmt;
use std::slice;
use std::sync::Arc;

use fasttuple_core::{FieldKind, Primitive, Record, RecordMut};

use crate::block;
use crate::error::DirectError;
use crate::shape::DirectShape;

/// A direct record that exclusively owns its memory block.
pub struct DirectRecord {
    bytes: Box<[u8]>,
    shape: Arc<DirectShape>,
}

impl DirectRecord {
    /// Allocate one zeroed record of `shape`.
    pub fn allocate(shape: Arc<DirectShape>) -> Result<Self, DirectError> {
        let bytes = block::zeroed(shape.byte_size())?;
        Ok(Self { bytes, shape })
    }

    /// Base address of the record.
    ///
    /// Stable for the record's lifetime; moving the handle does not move
    /// the block.
    pub fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    /// Mutable base address of the record.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.bytes.as_mut_ptr()
    }

    /// The record's bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the block in bytes.
    pub fn byte_size(&self) -> usize {
        self.bytes.len()
    }

    /// Shape shared with the producing schema.
    pub fn shape(&self) -> &Arc<DirectShape> {
        &self.shape
    }

    /// Borrow as a read-only view.
    pub fn view(&self) -> DirectView<'_> {
        DirectView {
            bytes: &self.bytes,
            shape: &self.shape,
        }
    }

    /// Borrow as a writable view.
    pub fn view_mut(&mut self) -> DirectViewMut<'_> {
        DirectViewMut {
            bytes: &mut self.bytes,
            shape: &self.shape,
        }
    }
}

impl Record for DirectRecord {
    fn kinds(&self) -> &[FieldKind] {
        self.shape.kinds()
    }

    #[inline]
    fn load_slot<P: Primitive>(&self, slot: usize) -> P {
        self.shape.load(&self.bytes, slot)
    }

    fn load_str_slot(&self, slot: usize) -> String {
        self.shape.load_str(&self.bytes, slot)
    }
}

impl RecordMut for DirectRecord {
    #[inline]
    fn store_slot<P: Primitive>(&mut self, slot: usize, value: P) {
        self.shape.store(&mut self.bytes, slot, value);
    }

    fn store_str_slot(&mut self, slot: usize, value: &str) {
        self.shape.store_str(&mut self.bytes, slot, value);
    }
}

impl fmt::Debug for DirectRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectRecord")
            .field("address", &self.as_ptr())
            .field("values", &self.values())
            .finish()
    }
}

/// Read-only view of a direct record owned elsewhere.
#[derive(Clone, Copy)]
pub struct DirectView<'a> {
    bytes: &'a [u8],
    shape: &'a DirectShape,
}

impl<'a> DirectView<'a> {
    pub(crate) fn new(bytes: &'a [u8], shape: &'a DirectShape) -> Self {
        debug_assert_eq!(bytes.len(), shape.byte_size());
        Self { bytes, shape }
    }

    /// View the record at a caller-supplied address.
    ///
    /// # Safety
    ///
    /// `address` must point to `shape.byte_size()` initialised bytes laid
    /// out with `shape`, valid for reads and not written through any other
    /// path for `'a`.
    pub unsafe fn from_raw(address: *const u8, shape: &'a DirectShape) -> Self {
        // SAFETY: upheld by the caller per the contract above.
        let bytes = unsafe { slice::from_raw_parts(address, shape.byte_size()) };
        Self { bytes, shape }
    }

    /// Base address of the viewed record.
    pub fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    /// The viewed bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl Record for DirectView<'_> {
    fn kinds(&self) -> &[FieldKind] {
        self.shape.kinds()
    }

    #[inline]
    fn load_slot<P: Primitive>(&self, slot: usize) -> P {
        self.shape.load(self.bytes, slot)
    }

    fn load_str_slot(&self, slot: usize) -> String {
        self.shape.load_str(self.bytes, slot)
    }
}

impl fmt::Debug for DirectView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectView")
            .field("address", &self.as_ptr())
            .field("values", &self.values())
            .finish()
    }
}

/// Writable view of a direct record owned elsewhere.
pub struct DirectViewMut<'a> {
    bytes: &'a mut [u8],
    shape: &'a DirectShape,
}

impl<'a> DirectViewMut<'a> {
    pub(crate) fn new(bytes: &'a mut [u8], shape: &'a DirectShape) -> Self {
        debug_assert_eq!(bytes.len(), shape.byte_size());
        Self { bytes, shape }
    }

    /// View the record at a caller-supplied address for writing.
    ///
    /// # Safety
    ///
    /// `address` must point to `shape.byte_size()` initialised bytes laid
    /// out with `shape`, valid for reads and writes and not accessed
    /// through any other path for `'a`.
    pub unsafe fn from_raw(address: *mut u8, shape: &'a DirectShape) -> Self {
        // SAFETY: upheld by the caller per the contract above.
        let bytes = unsafe { slice::from_raw_parts_mut(address, shape.byte_size()) };
        Self { bytes, shape }
    }

    /// Base address of the viewed record.
    pub fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    /// Mutable base address of the viewed record.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.bytes.as_mut_ptr()
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> DirectView<'_> {
        DirectView {
            bytes: &*self.bytes,
            shape: self.shape,
        }
    }
}

impl Record for DirectViewMut<'_> {
    fn kinds(&self) -> &[FieldKind] {
        self.shape.kinds()
    }

    #[inline]
    fn load_slot<P: Primitive>(&self, slot: usize) -> P {
        self.shape.load(&*self.bytes, slot)
    }

    fn load_str_slot(&self, slot: usize) -> String {
        self.shape.load_str(&*self.bytes, slot)
    }
}

impl RecordMut for DirectViewMut<'_> {
    #[inline]
    fn store_slot<P: Primitive>(&mut self, slot: usize, value: P) {
        self.shape.store(self.bytes, slot, value);
    }

    fn store_str_slot(&mut self, slot: usize, value: &str) {
        self.shape.store_str(self.bytes, slot, value);
    }
}

impl fmt::Debug for DirectViewMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectViewMut")
            .field("address", &self.as_ptr())
            .field("values", &self.values())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fasttuple_core::{LayoutConfig, RecordError, Value};

    fn shape(kinds: &[FieldKind]) -> Arc<DirectShape> {
        Arc::new(DirectShape::from_kinds(kinds, &LayoutConfig::default()).unwrap())
    }

    #[test]
    fn new_record_is_zeroed() {
        let r = DirectRecord::allocate(shape(&[FieldKind::Long, FieldKind::Str])).unwrap();
        assert_eq!(r.byte_size(), 32);
        assert_eq!(r.get_long(1), Ok(0));
        assert_eq!(r.get_string(2).unwrap(), "");
    }

    #[test]
    fn fields_land_at_layout_offsets() {
        let mut r =
            DirectRecord::allocate(shape(&[FieldKind::Byte, FieldKind::Int])).unwrap();
        r.set_byte(1, 0x11).unwrap();
        r.set_int(2, 0x2233_4455).unwrap();
        assert_eq!(r.as_bytes()[0], 0x11);
        assert_eq!(&r.as_bytes()[1..5], &0x2233_4455i32.to_ne_bytes());
    }

    #[test]
    fn view_mut_writes_are_seen_by_owner() {
        let mut r = DirectRecord::allocate(shape(&[FieldKind::Double])).unwrap();
        r.view_mut().set_double(1, 2.5).unwrap();
        assert_eq!(r.get_double(1), Ok(2.5));
        assert_eq!(r.view().get(1), Ok(Value::Double(2.5)));
    }

    #[test]
    fn failed_set_writes_nothing() {
        let mut r = DirectRecord::allocate(shape(&[FieldKind::Int, FieldKind::Int])).unwrap();
        assert!(matches!(
            r.set_long(1, -1),
            Err(RecordError::TypeMismatch { .. })
        ));
        assert!(r.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn view_from_raw_reads_owner_memory() {
        let mut r = DirectRecord::allocate(shape(&[FieldKind::Short, FieldKind::Bool])).unwrap();
        r.set_short(1, -300).unwrap();
        r.set_bool(2, true).unwrap();
        let shape = Arc::clone(r.shape());
        // SAFETY: `r` is alive and not written while the view exists.
        let view = unsafe { DirectView::from_raw(r.as_ptr(), &shape) };
        assert_eq!(view.get_short(1), Ok(-300));
        assert_eq!(view.get_bool(2), Ok(true));
    }

    #[test]
    fn view_mut_from_raw_writes_owner_memory() {
        let mut r = DirectRecord::allocate(shape(&[FieldKind::Float])).unwrap();
        let shape = Arc::clone(r.shape());
        let address = r.as_mut_ptr();
        {
            // SAFETY: no other access to `r` happens while the view exists.
            let mut view = unsafe { DirectViewMut::from_raw(address, &shape) };
            view.set_float(1, 1.25).unwrap();
        }
        assert_eq!(r.get_float(1), Ok(1.25));
    }

    #[test]
    fn address_survives_moving_the_handle() {
        let r = DirectRecord::allocate(shape(&[FieldKind::Long])).unwrap();
        let before = r.as_ptr();
        let moved = Box::new(r);
        assert_eq!(moved.as_ptr(), before);
    }

    #[test]
    fn zero_field_record_has_empty_block() {
        let r = DirectRecord::allocate(shape(&[])).unwrap();
        assert_eq!(r.byte_size(), 0);
        assert!(r.values().is_empty());
    }
}
