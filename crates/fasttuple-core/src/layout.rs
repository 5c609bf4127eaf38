//! Byte layout of direct records.
//!
//! Fields are packed in declaration order with no reordering and no
//! alignment gaps: each field starts where the previous one ended. The
//! only padding is at the tail, when a word size is requested.

use std::ops::Range;

use smallvec::SmallVec;

use crate::error::LayoutError;
use crate::kind::FieldKind;

/// Inputs to [`Layout::compute`] besides the field kinds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Round the total size up to a multiple of this many bytes.
    ///
    /// Default: 0 (no padding).
    pub word_size: usize,
    /// Reject records whose total size exceeds this many bytes.
    ///
    /// Default: `None` (limited only by `usize`).
    pub max_size: Option<usize>,
}

impl LayoutConfig {
    /// Config that pads to `word_size` bytes.
    pub fn padded(word_size: usize) -> Self {
        Self {
            word_size,
            max_size: None,
        }
    }
}

/// Offsets, per-field sizes and total size of a record.
///
/// Computed once per schema. Recomputing for the same kinds and config
/// always produces an identical layout.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    offsets: SmallVec<[usize; 16]>,
    sizes: SmallVec<[usize; 16]>,
    unpadded_size: usize,
    total_size: usize,
}

impl Layout {
    /// Compute the layout for `kinds` under `config`.
    pub fn compute(kinds: &[FieldKind], config: &LayoutConfig) -> Result<Self, LayoutError> {
        let mut offsets = SmallVec::with_capacity(kinds.len());
        let mut sizes = SmallVec::with_capacity(kinds.len());
        let mut cursor = 0usize;

        for (slot, kind) in kinds.iter().enumerate() {
            let size = kind.size();
            offsets.push(cursor);
            sizes.push(size);
            cursor = cursor
                .checked_add(size)
                .ok_or(LayoutError::Overflow { field: slot + 1 })?;
        }

        let unpadded_size = cursor;
        let total_size = pad_to(unpadded_size, config.word_size).ok_or(LayoutError::Overflow {
            field: kinds.len() + 1,
        })?;

        if let Some(cap) = config.max_size {
            if total_size > cap {
                return Err(LayoutError::ExceedsCap {
                    size: total_size,
                    cap,
                });
            }
        }

        Ok(Self {
            offsets,
            sizes,
            unpadded_size,
            total_size,
        })
    }

    /// Compute an unpadded, uncapped layout.
    pub fn packed(kinds: &[FieldKind]) -> Result<Self, LayoutError> {
        Self::compute(kinds, &LayoutConfig::default())
    }

    /// Byte offset of every field, in declaration order.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Byte size of every field, in declaration order.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Byte offset of the field at 0-based `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    pub fn offset(&self, slot: usize) -> usize {
        self.offsets[slot]
    }

    /// Byte range of the field at 0-based `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    pub fn field_range(&self, slot: usize) -> Range<usize> {
        let start = self.offsets[slot];
        start..start + self.sizes[slot]
    }

    /// Total record size in bytes, including tail padding.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Sum of all field sizes, before padding.
    pub fn unpadded_size(&self) -> usize {
        self.unpadded_size
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.offsets.len()
    }
}

/// Round `size` up to a multiple of `word`; `word == 0` means no padding.
fn pad_to(size: usize, word: usize) -> Option<usize> {
    if word == 0 {
        return Some(size);
    }
    match size % word {
        0 => Some(size),
        rem => size.checked_add(word - rem),
    }
}
