//! Capabilities: named accessor sets a record can be used through.
//!
//! A capability is declared with [`capability!`](crate::capability!),
//! which produces a trait with one getter/setter pair per accessor and a
//! [`Capability`] descriptor listing the accessors' names and kinds. A
//! schema that declares the capability checks every accessor against its
//! fields when it is built and resolves each accessor to a slot. Records
//! wrapped in [`Typed`] then implement the trait with O(1) slot access.
//!
//! Accessors are typed by any [`Primitive`] or by `str` for string fields,
//! which read as `String` and write from `&str`.
//!
//! ```
//! use fasttuple_core::capability;
//!
//! capability! {
//!     /// A labelled point on a plane.
//!     pub trait Point {
//!         x, set_x: i64;
//!         y, set_y: i64;
//!         label, set_label: str;
//!     }
//! }
//!
//! use fasttuple_core::{Capability, FieldKind};
//! assert_eq!(<dyn Point as Capability>::NAME, "Point");
//! assert_eq!(<dyn Point as Capability>::ACCESSORS[1].kind, FieldKind::Long);
//! assert_eq!(<dyn Point as Capability>::ACCESSORS[2].kind, FieldKind::Str);
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::RecordError;
use crate::kind::{FieldKind, Primitive};
use crate::record::{Record, RecordMut};

mod sealed {
    pub trait Sealed {}
    impl<P: super::Primitive> Sealed for P {}
    impl Sealed for str {}
}

/// A type a capability accessor reads and writes.
///
/// Implemented for every [`Primitive`], which is read and written by
/// value, and for `str`, which reads as an owned `String` and writes from
/// `&str` with the usual truncation to capacity.
pub trait FieldAccess: sealed::Sealed {
    /// Kind of the field backing the accessor.
    const KIND: FieldKind;
    /// What the getter returns.
    type Owned;
    /// What the setter takes.
    type Arg<'a>;

    #[doc(hidden)]
    fn load<R: Record>(record: &R, slot: usize) -> Self::Owned;

    #[doc(hidden)]
    fn store<R: RecordMut>(record: &mut R, slot: usize, value: Self::Arg<'_>);
}

impl<P: Primitive> FieldAccess for P {
    const KIND: FieldKind = <P as Primitive>::KIND;
    type Owned = P;
    type Arg<'a> = P;

    #[inline]
    fn load<R: Record>(record: &R, slot: usize) -> P {
        record.load_slot(slot)
    }

    #[inline]
    fn store<R: RecordMut>(record: &mut R, slot: usize, value: P) {
        record.store_slot(slot, value);
    }
}

impl FieldAccess for str {
    const KIND: FieldKind = FieldKind::Str;
    type Owned = String;
    type Arg<'a> = &'a str;

    fn load<R: Record>(record: &R, slot: usize) -> String {
        record.load_str_slot(slot)
    }

    fn store<R: RecordMut>(record: &mut R, slot: usize, value: &str) {
        record.store_str_slot(slot, value);
    }
}

/// One accessor pair in a capability: the field it reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Accessor {
    /// Field name the accessor binds to.
    pub name: &'static str,
    /// Kind the accessor reads and writes.
    pub kind: FieldKind,
}

/// Descriptor of a capability trait.
///
/// Implemented on `dyn Trait` by [`capability!`](crate::capability!).
pub trait Capability: 'static {
    /// Name used in configuration errors.
    const NAME: &'static str;
    /// Accessors in declaration order.
    const ACCESSORS: &'static [Accessor];
}

/// Slots a capability's accessors resolved to in one schema.
///
/// Produced by schema validation. `slots[k]` is the 0-based field slot
/// backing accessor `k`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    name: &'static str,
    slots: Arc<[usize]>,
}

impl Binding {
    /// Create a binding for capability `name`.
    ///
    /// Binding construction is only meaningful after the slots have been
    /// checked against the schema's fields.
    pub fn new(name: &'static str, slots: Vec<usize>) -> Self {
        Self {
            name,
            slots: slots.into(),
        }
    }

    /// Capability name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resolved slots, one per accessor.
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// Check that these slots back the accessors of `C` in a record whose
    /// fields have `kinds`.
    ///
    /// Every accessor needs a slot, every slot must exist, and each slot's
    /// kind must equal its accessor's kind.
    pub fn check<C: ?Sized + Capability>(&self, kinds: &[FieldKind]) -> Result<(), RecordError> {
        let invalid = |accessor| RecordError::InvalidBinding {
            capability: C::NAME,
            accessor,
        };
        if self.slots.len() != C::ACCESSORS.len() {
            return Err(invalid(self.slots.len().min(C::ACCESSORS.len())));
        }
        for (k, (&slot, accessor)) in self.slots.iter().zip(C::ACCESSORS).enumerate() {
            if kinds.get(slot) != Some(&accessor.kind) {
                return Err(invalid(k));
            }
        }
        Ok(())
    }
}

/// A record used through capability `C`.
///
/// Dereferences to nothing; access goes through the capability trait, or
/// through [`record`](Typed::record) for the indexed contract.
pub struct Typed<R, C: ?Sized> {
    record: R,
    slots: Arc<[usize]>,
    _capability: PhantomData<fn() -> Box<C>>,
}

impl<R: Record, C: ?Sized + Capability> Typed<R, C> {
    /// Wrap `record` using `binding`'s resolved slots.
    ///
    /// Fails with [`RecordError::InvalidBinding`] unless the binding fits
    /// `record` as described by [`Binding::check`], so every accessor of
    /// the result reads a field of its own kind.
    pub fn bind(record: R, binding: &Binding) -> Result<Self, RecordError> {
        binding.check::<C>(record.kinds())?;
        Ok(Self {
            record,
            slots: Arc::clone(&binding.slots),
            _capability: PhantomData,
        })
    }

    /// The underlying record.
    pub fn record(&self) -> &R {
        &self.record
    }

    /// The underlying record, mutably.
    pub fn record_mut(&mut self) -> &mut R {
        &mut self.record
    }

    /// Unwrap into the underlying record.
    pub fn into_inner(self) -> R {
        self.record
    }

    #[doc(hidden)]
    #[inline]
    pub fn load_bound<A: ?Sized + FieldAccess>(&self, accessor: usize) -> A::Owned {
        A::load(&self.record, self.slots[accessor])
    }
}

impl<R: RecordMut, C: ?Sized + Capability> Typed<R, C> {
    #[doc(hidden)]
    #[inline]
    pub fn store_bound<A: ?Sized + FieldAccess>(&mut self, accessor: usize, value: A::Arg<'_>) {
        let slot = self.slots[accessor];
        A::store(&mut self.record, slot, value);
    }
}

impl<R: fmt::Debug, C: ?Sized + Capability> fmt::Debug for Typed<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed")
            .field("capability", &C::NAME)
            .field("record", &self.record)
            .finish()
    }
}

/// Declare a capability trait and its descriptor.
///
/// Each line `getter, setter: Type;` declares an accessor pair bound to the
/// field named `getter`, where `Type` is one of the fixed-width
/// [`Primitive`] types or `str`. The macro emits:
///
/// - the trait, with `fn getter(&self) -> Type` and
///   `fn setter(&mut self, value: Type)` (`String` and `&str` for `str`);
/// - `impl Capability for dyn Trait`, listing the accessors;
/// - `impl Trait for Typed<R, dyn Trait>` for every writable record `R`.
#[macro_export]
macro_rules! capability {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident {
            $($get:ident, $set:ident : $ty:ty;)*
        }
    ) => {
        $(#[$meta])*
        $vis trait $name {
            $(
                #[allow(missing_docs)]
                fn $get(&self) -> <$ty as $crate::capability::FieldAccess>::Owned;
                #[allow(missing_docs)]
                fn $set(&mut self, value: <$ty as $crate::capability::FieldAccess>::Arg<'_>);
            )*
        }

        impl $crate::Capability for dyn $name {
            const NAME: &'static str = stringify!($name);
            const ACCESSORS: &'static [$crate::Accessor] = &[
                $($crate::Accessor {
                    name: stringify!($get),
                    kind: <$ty as $crate::capability::FieldAccess>::KIND,
                },)*
            ];
        }

        impl<R: $crate::RecordMut> $name for $crate::Typed<R, dyn $name> {
            $crate::capability!(@methods [0usize] $($get, $set : $ty;)*);
        }
    };

    (@methods [$n:expr]) => {};

    (@methods [$n:expr] $get:ident, $set:ident : $ty:ty; $($rest:tt)*) => {
        #[inline]
        fn $get(&self) -> <$ty as $crate::capability::FieldAccess>::Owned {
            self.load_bound::<$ty>($n)
        }

        #[inline]
        fn $set(&mut self, value: <$ty as $crate::capability::FieldAccess>::Arg<'_>) {
            self.store_bound::<$ty>($n, value)
        }

        $crate::capability!(@methods [$n + 1usize] $($rest)*);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    capability! {
        /// Test capability.
        trait Sample {
            id, set_id: i64;
            ratio, set_ratio: f32;
            flag, set_flag: bool;
        }
    }

    capability! {
        /// Capability with a string accessor.
        trait Named {
            id, set_id: i64;
            name, set_name: str;
        }
    }

    #[derive(Debug)]
    struct Slots {
        kinds: Vec<FieldKind>,
        values: Vec<Value>,
    }

    impl Record for Slots {
        fn kinds(&self) -> &[FieldKind] {
            &self.kinds
        }
        fn load_slot<P: Primitive>(&self, slot: usize) -> P {
            P::from_value(&self.values[slot]).unwrap()
        }
        fn load_str_slot(&self, slot: usize) -> String {
            self.values[slot].as_str().unwrap().to_string()
        }
    }

    impl Slots {
        fn new(kinds: &[FieldKind]) -> Self {
            Self {
                kinds: kinds.to_vec(),
                values: kinds.iter().map(|k| k.default_value()).collect(),
            }
        }
    }

    impl RecordMut for Slots {
        fn store_slot<P: Primitive>(&mut self, slot: usize, value: P) {
            self.values[slot] = value.into_value();
        }
        fn store_str_slot(&mut self, slot: usize, value: &str) {
            self.values[slot] = Value::Str(value.to_string());
        }
    }

    #[test]
    fn descriptor_lists_accessors_in_order() {
        assert_eq!(<dyn Sample as Capability>::NAME, "Sample");
        assert_eq!(
            <dyn Sample as Capability>::ACCESSORS,
            &[
                Accessor { name: "id", kind: FieldKind::Long },
                Accessor { name: "ratio", kind: FieldKind::Float },
                Accessor { name: "flag", kind: FieldKind::Bool },
            ]
        );
    }

    #[test]
    fn typed_accessors_follow_binding() {
        // Fields declared in a different order than the capability.
        let kinds = vec![FieldKind::Bool, FieldKind::Int, FieldKind::Long, FieldKind::Float];
        let record = Slots {
            values: kinds.iter().map(|k| k.default_value()).collect(),
            kinds,
        };
        let binding = Binding::new("Sample", vec![2, 3, 0]);
        let mut typed: Typed<Slots, dyn Sample> = Typed::bind(record, &binding).unwrap();

        typed.set_id(42);
        typed.set_ratio(0.5);
        typed.set_flag(true);
        assert_eq!(typed.id(), 42);
        assert_eq!(typed.ratio(), 0.5);
        assert!(typed.flag());

        let record = typed.into_inner();
        assert_eq!(record.get_long(3), Ok(42));
        assert_eq!(record.get_bool(1), Ok(true));
        assert_eq!(record.get_int(2), Ok(0));
    }

    #[test]
    fn string_accessors_read_and_write_str_fields() {
        assert_eq!(
            <dyn Named as Capability>::ACCESSORS[1],
            Accessor { name: "name", kind: FieldKind::Str }
        );
        let record = Slots::new(&[FieldKind::Str, FieldKind::Long]);
        let binding = Binding::new("Named", vec![1, 0]);
        let mut typed: Typed<Slots, dyn Named> = Typed::bind(record, &binding).unwrap();

        typed.set_name("alpha");
        typed.set_id(3);
        assert_eq!(typed.name(), "alpha");
        assert_eq!(typed.record().get_string(1), Ok("alpha".to_string()));
        assert_eq!(typed.record().get_long(2), Ok(3));
    }

    #[test]
    fn binding_with_wrong_kind_is_rejected() {
        let record = Slots::new(&[FieldKind::Int, FieldKind::Float, FieldKind::Bool]);
        let binding = Binding::new("Sample", vec![0, 1, 2]);
        assert_eq!(
            Typed::<Slots, dyn Sample>::bind(record, &binding).unwrap_err(),
            RecordError::InvalidBinding {
                capability: "Sample",
                accessor: 0
            }
        );
    }

    #[test]
    fn binding_past_last_field_is_rejected() {
        let record = Slots::new(&[FieldKind::Long, FieldKind::Float]);
        let binding = Binding::new("Sample", vec![0, 1, 2]);
        assert_eq!(
            Typed::<Slots, dyn Sample>::bind(record, &binding).unwrap_err(),
            RecordError::InvalidBinding {
                capability: "Sample",
                accessor: 2
            }
        );
    }

    #[test]
    fn binding_with_too_few_slots_is_rejected() {
        let record = Slots::new(&[FieldKind::Long]);
        let binding = Binding::new("Sample", vec![0]);
        assert!(matches!(
            Typed::<Slots, dyn Sample>::bind(record, &binding),
            Err(RecordError::InvalidBinding { accessor: 1, .. })
        ));
    }
}
