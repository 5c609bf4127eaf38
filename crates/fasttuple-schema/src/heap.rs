//! Heap records: one tagged slot per field.

use std::sync::Arc;

use fasttuple_core::string::truncate_to_capacity;
use fasttuple_core::{FieldKind, Primitive, Record, RecordMut, Value};

/// A record whose fields live in an owned slot array.
///
/// Every slot always holds a [`Value`] of its field's declared kind; the
/// record contract's kind check runs before any store. Strings are
/// truncated to the same fixed capacity as direct records.
#[derive(Clone, Debug, PartialEq)]
pub struct HeapRecord {
    kinds: Arc<[FieldKind]>,
    slots: Box<[Value]>,
}

impl HeapRecord {
    /// A record of `kinds` with every field at its kind's default.
    pub fn new(kinds: Arc<[FieldKind]>) -> Self {
        let slots = kinds.iter().map(|kind| kind.default_value()).collect();
        Self { kinds, slots }
    }

    /// Reset every field to its kind's default.
    pub fn clear(&mut self) {
        for (slot, kind) in self.slots.iter_mut().zip(self.kinds.iter()) {
            *slot = kind.default_value();
        }
    }

    pub(crate) fn shares_kinds(&self, kinds: &Arc<[FieldKind]>) -> bool {
        Arc::ptr_eq(&self.kinds, kinds) || *self.kinds == **kinds
    }
}

impl Record for HeapRecord {
    fn kinds(&self) -> &[FieldKind] {
        &self.kinds
    }

    #[inline]
    fn load_slot<P: Primitive>(&self, slot: usize) -> P {
        match P::from_value(&self.slots[slot]) {
            Some(v) => v,
            None => unreachable!("slot {slot} does not hold a {}", P::KIND),
        }
    }

    fn load_str_slot(&self, slot: usize) -> String {
        match &self.slots[slot] {
            Value::Str(s) => s.clone(),
            other => unreachable!("slot {slot} holds {other:?}, not a string"),
        }
    }
}

impl RecordMut for HeapRecord {
    #[inline]
    fn store_slot<P: Primitive>(&mut self, slot: usize, value: P) {
        self.slots[slot] = value.into_value();
    }

    fn store_str_slot(&mut self, slot: usize, value: &str) {
        match &mut self.slots[slot] {
            Value::Str(s) => {
                s.clear();
                s.push_str(truncate_to_capacity(value));
            }
            other => *other = Value::Str(truncate_to_capacity(value).to_owned()),
        }
    }
}
