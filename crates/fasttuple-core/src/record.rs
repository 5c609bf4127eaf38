//! The record contract shared by heap and direct storage.
//!
//! A record implementation supplies slot-level storage (`load_slot`,
//! `store_slot` and their string counterparts) plus its kind table. The
//! slot methods are unchecked and hidden from the documented API; the
//! provided methods layer the public contract on top: 1-based indices,
//! range checks, kind checks, and boxed [`Value`] access.
//!
//! ```text
//! get_long(2)
//!   └── get_as::<i64>(2)
//!         ├── resolve(kinds, 2, Long)   index + kind check, no access yet
//!         └── load_slot::<i64>(1)       storage-specific read
//! ```

use crate::error::RecordError;
use crate::kind::{FieldKind, Primitive};
use crate::value::Value;

/// Check a 1-based `index` against `kinds` and return its 0-based slot.
///
/// Fails with [`RecordError::IndexOutOfRange`] for 0 or an index beyond
/// the last field, and with [`RecordError::TypeMismatch`] when the field's
/// kind is not `expected`.
#[inline]
pub fn resolve(kinds: &[FieldKind], index: usize, expected: FieldKind) -> Result<usize, RecordError> {
    let slot = check_index(kinds, index)?;
    let actual = kinds[slot];
    if actual != expected {
        return Err(RecordError::TypeMismatch {
            index,
            expected,
            actual,
        });
    }
    Ok(slot)
}

/// Check a 1-based `index` against `kinds` and return its 0-based slot.
#[inline]
pub fn check_index(kinds: &[FieldKind], index: usize) -> Result<usize, RecordError> {
    if index == 0 || index > kinds.len() {
        return Err(RecordError::IndexOutOfRange {
            index,
            field_count: kinds.len(),
        });
    }
    Ok(index - 1)
}

/// Read access to a record's fields.
pub trait Record {
    /// Kind of every field, in declaration order.
    fn kinds(&self) -> &[FieldKind];

    /// Read the primitive at 0-based `slot`.
    ///
    /// The slot must hold a field of kind `P::KIND`. Callers outside a
    /// record implementation should use [`get_as`](Record::get_as).
    #[doc(hidden)]
    fn load_slot<P: Primitive>(&self, slot: usize) -> P;

    /// Read the string at 0-based `slot`, which must be a `Str` field.
    #[doc(hidden)]
    fn load_str_slot(&self, slot: usize) -> String;

    /// Number of fields.
    fn field_count(&self) -> usize {
        self.kinds().len()
    }

    /// Read field `index` (1-based) as `P`.
    #[inline]
    fn get_as<P: Primitive>(&self, index: usize) -> Result<P, RecordError> {
        let slot = resolve(self.kinds(), index, P::KIND)?;
        Ok(self.load_slot(slot))
    }

    /// Read a `byte` field.
    fn get_byte(&self, index: usize) -> Result<i8, RecordError> {
        self.get_as(index)
    }

    /// Read a `char` field.
    fn get_char(&self, index: usize) -> Result<u16, RecordError> {
        self.get_as(index)
    }

    /// Read a `short` field.
    fn get_short(&self, index: usize) -> Result<i16, RecordError> {
        self.get_as(index)
    }

    /// Read an `int` field.
    fn get_int(&self, index: usize) -> Result<i32, RecordError> {
        self.get_as(index)
    }

    /// Read a `float` field.
    fn get_float(&self, index: usize) -> Result<f32, RecordError> {
        self.get_as(index)
    }

    /// Read a `long` field.
    fn get_long(&self, index: usize) -> Result<i64, RecordError> {
        self.get_as(index)
    }

    /// Read a `double` field.
    fn get_double(&self, index: usize) -> Result<f64, RecordError> {
        self.get_as(index)
    }

    /// Read a `boolean` field.
    fn get_bool(&self, index: usize) -> Result<bool, RecordError> {
        self.get_as(index)
    }

    /// Read a `string` field.
    fn get_string(&self, index: usize) -> Result<String, RecordError> {
        let slot = resolve(self.kinds(), index, FieldKind::Str)?;
        Ok(self.load_str_slot(slot))
    }

    /// Read field `index` boxed in a [`Value`] of its declared kind.
    fn get(&self, index: usize) -> Result<Value, RecordError> {
        let slot = check_index(self.kinds(), index)?;
        Ok(match self.kinds()[slot] {
            FieldKind::Byte => Value::Byte(self.load_slot(slot)),
            FieldKind::Char => Value::Char(self.load_slot(slot)),
            FieldKind::Short => Value::Short(self.load_slot(slot)),
            FieldKind::Int => Value::Int(self.load_slot(slot)),
            FieldKind::Float => Value::Float(self.load_slot(slot)),
            FieldKind::Long => Value::Long(self.load_slot(slot)),
            FieldKind::Double => Value::Double(self.load_slot(slot)),
            FieldKind::Bool => Value::Bool(self.load_slot(slot)),
            FieldKind::Str => Value::Str(self.load_str_slot(slot)),
        })
    }

    /// All field values in declaration order.
    fn values(&self) -> Vec<Value> {
        (1..=self.field_count())
            .filter_map(|index| self.get(index).ok())
            .collect()
    }
}

/// Write access to a record's fields.
pub trait RecordMut: Record {
    /// Write the primitive at 0-based `slot`.
    ///
    /// The slot must hold a field of kind `P::KIND`. Callers outside a
    /// record implementation should use [`set_as`](RecordMut::set_as).
    #[doc(hidden)]
    fn store_slot<P: Primitive>(&mut self, slot: usize, value: P);

    /// Write the string at 0-based `slot`, truncating to capacity.
    #[doc(hidden)]
    fn store_str_slot(&mut self, slot: usize, value: &str);

    /// Write field `index` (1-based) as `P`.
    #[inline]
    fn set_as<P: Primitive>(&mut self, index: usize, value: P) -> Result<(), RecordError> {
        let slot = resolve(self.kinds(), index, P::KIND)?;
        self.store_slot(slot, value);
        Ok(())
    }

    /// Write a `byte` field.
    fn set_byte(&mut self, index: usize, value: i8) -> Result<(), RecordError> {
        self.set_as(index, value)
    }

    /// Write a `char` field.
    fn set_char(&mut self, index: usize, value: u16) -> Result<(), RecordError> {
        self.set_as(index, value)
    }

    /// Write a `short` field.
    fn set_short(&mut self, index: usize, value: i16) -> Result<(), RecordError> {
        self.set_as(index, value)
    }

    /// Write an `int` field.
    fn set_int(&mut self, index: usize, value: i32) -> Result<(), RecordError> {
        self.set_as(index, value)
    }

    /// Write a `float` field.
    fn set_float(&mut self, index: usize, value: f32) -> Result<(), RecordError> {
        self.set_as(index, value)
    }

    /// Write a `long` field.
    fn set_long(&mut self, index: usize, value: i64) -> Result<(), RecordError> {
        self.set_as(index, value)
    }

    /// Write a `double` field.
    fn set_double(&mut self, index: usize, value: f64) -> Result<(), RecordError> {
        self.set_as(index, value)
    }

    /// Write a `boolean` field.
    fn set_bool(&mut self, index: usize, value: bool) -> Result<(), RecordError> {
        self.set_as(index, value)
    }

    /// Write a `string` field, truncating to the fixed capacity.
    fn set_string(&mut self, index: usize, value: &str) -> Result<(), RecordError> {
        let slot = resolve(self.kinds(), index, FieldKind::Str)?;
        self.store_str_slot(slot, value);
        Ok(())
    }

    /// Write a boxed value; its kind must match the field's declared kind.
    fn set(&mut self, index: usize, value: Value) -> Result<(), RecordError> {
        let slot = resolve(self.kinds(), index, value.kind())?;
        match value {
            Value::Byte(v) => self.store_slot(slot, v),
            Value::Char(v) => self.store_slot(slot, v),
            Value::Short(v) => self.store_slot(slot, v),
            Value::Int(v) => self.store_slot(slot, v),
            Value::Float(v) => self.store_slot(slot, v),
            Value::Long(v) => self.store_slot(slot, v),
            Value::Double(v) => self.store_slot(slot, v),
            Value::Bool(v) => self.store_slot(slot, v),
            Value::Str(v) => self.store_str_slot(slot, &v),
        }
        Ok(())
    }

    /// Copy every field from `other`, which must have identical kinds.
    ///
    /// Fails with [`RecordError::ShapeMismatch`] before writing anything
    /// when the kind lists differ in length or in any position.
    fn copy_from<R: Record>(&mut self, other: &R) -> Result<(), RecordError> {
        let (ours, theirs) = (self.kinds(), other.kinds());
        if ours != theirs {
            let index = ours
                .iter()
                .zip(theirs)
                .take_while(|(a, b)| a == b)
                .count()
                + 1;
            return Err(RecordError::ShapeMismatch { index });
        }
        for (slot, value) in other.values().into_iter().enumerate() {
            self.set(slot + 1, value)?;
        }
        Ok(())
    }
}
