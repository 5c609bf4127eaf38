//! Kind table plus layout: everything needed to address a direct record.
//!
//! A [`DirectShape`] is shared (via `Arc`) by every record, view and array
//! produced from one schema. It validates 1-based field indices and maps
//! them to byte ranges, so records themselves carry no per-field metadata.

#![allow(unsafe_code)]

use std::sync::Arc;

use fasttuple_core::record::resolve;
use fasttuple_core::string::{decode_string, encode_string};
use fasttuple_core::{FieldKind, Layout, LayoutConfig, LayoutError, Primitive, RecordError};

use crate::raw;

/// Field kinds and byte layout of one direct record type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectShape {
    kinds: Arc<[FieldKind]>,
    layout: Layout,
}

impl DirectShape {
    /// Pair a kind table with a layout computed from it.
    ///
    /// # Panics
    ///
    /// Panics if `layout` does not describe `kinds.len()` fields.
    pub fn new(kinds: Arc<[FieldKind]>, layout: Layout) -> Self {
        assert_eq!(
            kinds.len(),
            layout.field_count(),
            "layout computed for a different field count"
        );
        Self { kinds, layout }
    }

    /// Compute the layout for `kinds` under `config`.
    pub fn from_kinds(kinds: &[FieldKind], config: &LayoutConfig) -> Result<Self, LayoutError> {
        let layout = Layout::compute(kinds, config)?;
        Ok(Self {
            kinds: kinds.into(),
            layout,
        })
    }

    /// Field kinds in declaration order.
    pub fn kinds(&self) -> &[FieldKind] {
        &self.kinds
    }

    /// The byte layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Size of one record in bytes, including tail padding.
    pub fn byte_size(&self) -> usize {
        self.layout.total_size()
    }

    #[inline]
    pub(crate) fn load<P: Primitive>(&self, bytes: &[u8], slot: usize) -> P {
        P::decode(&bytes[self.layout.field_range(slot)])
    }

    #[inline]
    pub(crate) fn store<P: Primitive>(&self, bytes: &mut [u8], slot: usize, value: P) {
        value.encode(&mut bytes[self.layout.field_range(slot)]);
    }

    pub(crate) fn load_str(&self, bytes: &[u8], slot: usize) -> String {
        decode_string(&bytes[self.layout.field_range(slot)])
    }

    pub(crate) fn store_str(&self, bytes: &mut [u8], slot: usize, value: &str) {
        encode_string(&mut bytes[self.layout.field_range(slot)], value);
    }

    /// Read field `index` (1-based) of the record at `address`.
    ///
    /// Index and kind are validated exactly as for record accessors; the
    /// address is not.
    ///
    /// # Safety
    ///
    /// `address` must point to [`byte_size`](Self::byte_size) readable,
    /// initialised bytes laid out with this shape.
    pub unsafe fn read_at<P: Primitive>(
        &self,
        address: *const u8,
        index: usize,
    ) -> Result<P, RecordError> {
        let slot = resolve(&self.kinds, index, P::KIND)?;
        // SAFETY: the slot's range lies within `byte_size` bytes of `address`.
        Ok(unsafe { raw::read(address, self.layout.offset(slot)) })
    }

    /// Write field `index` (1-based) of the record at `address`.
    ///
    /// Nothing is written when validation fails.
    ///
    /// # Safety
    ///
    /// `address` must point to [`byte_size`](Self::byte_size) writable bytes
    /// not aliased by any live reference.
    pub unsafe fn write_at<P: Primitive>(
        &self,
        address: *mut u8,
        index: usize,
        value: P,
    ) -> Result<(), RecordError> {
        let slot = resolve(&self.kinds, index, P::KIND)?;
        // SAFETY: the slot's range lies within `byte_size` bytes of `address`.
        unsafe { raw::write(address, self.layout.offset(slot), value) };
        Ok(())
    }

    /// Read string field `index` (1-based) of the record at `address`.
    ///
    /// # Safety
    ///
    /// Same contract as [`read_at`](Self::read_at).
    pub unsafe fn read_string_at(
        &self,
        address: *const u8,
        index: usize,
    ) -> Result<String, RecordError> {
        let slot = resolve(&self.kinds, index, FieldKind::Str)?;
        // SAFETY: a string slot spans one footprint inside the record.
        Ok(unsafe { raw::get_string(address.add(self.layout.offset(slot))) })
    }

    /// Write string field `index` (1-based) of the record at `address`.
    ///
    /// # Safety
    ///
    /// Same contract as [`write_at`](Self::write_at).
    pub unsafe fn write_string_at(
        &self,
        address: *mut u8,
        index: usize,
        value: &str,
    ) -> Result<(), RecordError> {
        let slot = resolve(&self.kinds, index, FieldKind::Str)?;
        // SAFETY: a string slot spans one footprint inside the record.
        unsafe { raw::put_string(address.add(self.layout.offset(slot)), value) };
        Ok(())
    }
}
