//! Validated schemas and record creation.

#![allow(unsafe_code)]

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use fasttuple_core::{
    Binding, Capability, FieldKind, FieldTable, Layout, Primitive, RecordError, Typed,
};
use fasttuple_direct::{DirectError, DirectRecordArray, DirectShape, DirectView, DirectViewMut};
use fasttuple_pool::{Pool, PoolConfig};

use crate::builder::Validated;
use crate::conformance::Bound;
use crate::error::SchemaError;
use crate::heap::HeapRecord;
use crate::storage::{Direct, Heap, Storage, Strategy};

/// A validated record shape with its storage strategy and pool.
///
/// Equality, hashing and display consider only the ordered field names
/// and kinds, so a heap and a direct schema with the same fields compare
/// equal.
pub struct Schema<S: Storage> {
    fields: FieldTable,
    capability: Option<Bound>,
    storage: S,
    pool: Pool<S::Record>,
}

impl<S: Storage> Schema<S> {
    pub(crate) fn assemble(validated: Validated, storage: S) -> Self {
        let Validated {
            fields,
            capability,
            pool,
        } = validated;
        let pool = new_pool(&storage, pool);
        tracing::debug!(
            fields = fields.len(),
            strategy = %S::STRATEGY,
            capability = ?capability.as_ref().map(|b| b.binding.name()),
            "schema built"
        );
        Self {
            fields,
            capability,
            storage,
            pool,
        }
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.names().map(str::to_owned).collect()
    }

    /// Field kinds in declaration order.
    pub fn field_kinds(&self) -> &[FieldKind] {
        self.fields.kinds()
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// The ordered field table.
    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    /// 1-based index of the field called `name`.
    pub fn field_index(&self, name: &str) -> Result<usize, SchemaError> {
        self.fields
            .index_of(name)
            .ok_or_else(|| SchemaError::FieldNotFound {
                name: name.to_string(),
            })
    }

    /// Name of the implemented capability, if any.
    pub fn capability_name(&self) -> Option<&'static str> {
        self.capability.as_ref().map(|b| b.binding.name())
    }

    /// This schema's storage strategy.
    pub fn strategy(&self) -> Strategy {
        S::STRATEGY
    }

    /// The storage, usable as an allocator for custom pools.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Allocate one record outside any pool.
    pub fn create(&self) -> Result<S::Record, SchemaError> {
        self.storage.create()
    }

    /// Allocate `len` records outside any pool.
    pub fn create_record_array(&self, len: usize) -> Result<S::Array, SchemaError> {
        self.storage.create_array(len)
    }

    /// Release a record created by this schema.
    pub fn destroy(&self, record: S::Record) {
        drop(record);
    }

    /// Release a record array created by this schema.
    pub fn destroy_array(&self, array: S::Array) {
        drop(array);
    }

    /// Allocate one record wrapped in capability `C`.
    pub fn create_typed<C: ?Sized + Capability>(
        &self,
    ) -> Result<Typed<S::Record, C>, SchemaError> {
        let binding = self.binding_for::<C>()?;
        Ok(Typed::bind(self.storage.create()?, binding)?)
    }

    /// Wrap a record of this schema in capability `C`.
    pub fn typed<C: ?Sized + Capability>(
        &self,
        record: S::Record,
    ) -> Result<Typed<S::Record, C>, SchemaError> {
        let binding = self.binding_for::<C>()?;
        if !self.storage.owns(&record) {
            return Err(SchemaError::ForeignRecord);
        }
        Ok(Typed::bind(record, binding)?)
    }

    /// The schema's shared pool.
    ///
    /// Sized by [`pool_of_size`](crate::SchemaBuilder::pool_of_size); nothing is
    /// allocated until the first checkout.
    pub fn pool(&self) -> &Pool<S::Record> {
        &self.pool
    }

    /// A fresh, independent pool with the same sizing as [`pool`](Self::pool).
    pub fn new_pool(&self) -> Pool<S::Record> {
        new_pool(&self.storage, *self.pool.config())
    }

    fn binding_for<C: ?Sized + Capability>(&self) -> Result<&Binding, SchemaError> {
        match &self.capability {
            Some(bound) if bound.id == TypeId::of::<C>() => Ok(&bound.binding),
            other => Err(SchemaError::CapabilityMismatch {
                requested: C::NAME,
                declared: other.as_ref().map(|b| b.binding.name()),
            }),
        }
    }
}

fn new_pool<S: Storage>(storage: &S, config: PoolConfig) -> Pool<S::Record> {
    let allocator = storage.clone();
    Pool::new(
        config,
        move |count: usize| allocator.allocate_batch(count),
        |records: Vec<S::Record>| drop(records),
    )
}

impl Schema<Heap> {
    /// Allocate `len` records wrapped in capability `C`.
    pub fn create_typed_array<C: ?Sized + Capability>(
        &self,
        len: usize,
    ) -> Result<Vec<Typed<HeapRecord, C>>, SchemaError> {
        let binding = self.binding_for::<C>()?;
        let typed = self
            .storage
            .create_array(len)?
            .into_iter()
            .map(|record| Typed::bind(record, binding))
            .collect::<Result<_, _>>()?;
        Ok(typed)
    }
}

impl Schema<Direct> {
    /// The record layout.
    pub fn layout(&self) -> &Layout {
        self.storage.shape().layout()
    }

    /// Size of one record in bytes, including padding.
    pub fn byte_size(&self) -> usize {
        self.storage.shape().byte_size()
    }

    /// The shape shared by every record of this schema.
    pub fn shape(&self) -> &DirectShape {
        self.storage.shape()
    }

    /// Allocate `len` adjacent records wrapped in capability `C`.
    pub fn create_typed_array<C: ?Sized + Capability>(
        &self,
        len: usize,
    ) -> Result<TypedArray<C>, SchemaError> {
        let binding = self.binding_for::<C>()?.clone();
        binding.check::<C>(self.shape().kinds())?;
        Ok(TypedArray {
            array: self.storage.create_array(len)?,
            binding,
            _capability: PhantomData,
        })
    }

    /// View the record at `address` without taking ownership.
    ///
    /// # Safety
    ///
    /// `address` must point to [`byte_size`](Self::byte_size) initialised
    /// bytes laid out by this schema, not written through any other path
    /// while the view lives.
    pub unsafe fn view_at(&self, address: *const u8) -> DirectView<'_> {
        // SAFETY: forwarded caller contract.
        unsafe { DirectView::from_raw(address, self.shape()) }
    }

    /// Writable view of the record at `address`.
    ///
    /// # Safety
    ///
    /// `address` must point to [`byte_size`](Self::byte_size) initialised
    /// bytes laid out by this schema, not accessed through any other path
    /// while the view lives.
    pub unsafe fn view_at_mut(&self, address: *mut u8) -> DirectViewMut<'_> {
        // SAFETY: forwarded caller contract.
        unsafe { DirectViewMut::from_raw(address, self.shape()) }
    }

    /// Read field `index` (1-based) of the record at `address`.
    ///
    /// # Safety
    ///
    /// Same contract as [`view_at`](Self::view_at).
    pub unsafe fn read_at<P: Primitive>(
        &self,
        address: *const u8,
        index: usize,
    ) -> Result<P, RecordError> {
        // SAFETY: forwarded caller contract.
        unsafe { self.shape().read_at(address, index) }
    }

    /// Write field `index` (1-based) of the record at `address`.
    ///
    /// # Safety
    ///
    /// Same contract as [`view_at_mut`](Self::view_at_mut).
    pub unsafe fn write_at<P: Primitive>(
        &self,
        address: *mut u8,
        index: usize,
        value: P,
    ) -> Result<(), RecordError> {
        // SAFETY: forwarded caller contract.
        unsafe { self.shape().write_at(address, index, value) }
    }

    /// Read string field `index` (1-based) of the record at `address`.
    ///
    /// # Safety
    ///
    /// Same contract as [`view_at`](Self::view_at).
    pub unsafe fn read_string_at(
        &self,
        address: *const u8,
        index: usize,
    ) -> Result<String, RecordError> {
        // SAFETY: forwarded caller contract.
        unsafe { self.shape().read_string_at(address, index) }
    }

    /// Write string field `index` (1-based) of the record at `address`.
    ///
    /// # Safety
    ///
    /// Same contract as [`view_at_mut`](Self::view_at_mut).
    pub unsafe fn write_string_at(
        &self,
        address: *mut u8,
        index: usize,
        value: &str,
    ) -> Result<(), RecordError> {
        // SAFETY: forwarded caller contract.
        unsafe { self.shape().write_string_at(address, index, value) }
    }
}

impl<S: Storage, T: Storage> PartialEq<Schema<T>> for Schema<S> {
    fn eq(&self, other: &Schema<T>) -> bool {
        self.fields == other.fields
    }
}

impl<S: Storage> Eq for Schema<S> {}

impl<S: Storage> Hash for Schema<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fields.hash(state);
    }
}

impl<S: Storage> fmt::Display for Schema<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fields, f)
    }
}

impl<S: Storage> fmt::Debug for Schema<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &format_args!("{}", self.fields))
            .field("strategy", &S::STRATEGY)
            .field("capability", &self.capability_name())
            .field("pool", &self.pool)
            .finish()
    }
}

/// Adjacent direct records used through capability `C`.
pub struct TypedArray<C: ?Sized + Capability> {
    array: DirectRecordArray,
    binding: Binding,
    _capability: PhantomData<fn() -> Box<C>>,
}

impl<C: ?Sized + Capability> TypedArray<C> {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.array.len()
    }

    /// Whether the array holds no records.
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Record `row` wrapped in the capability.
    pub fn row_mut(&mut self, row: usize) -> Result<Typed<DirectViewMut<'_>, C>, DirectError> {
        let view = self.array.view_mut(row)?;
        Ok(Typed::bind(view, &self.binding)?)
    }

    /// Every record wrapped in the capability, in row order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = Typed<DirectViewMut<'_>, C>> + '_ {
        let binding = &self.binding;
        // Rows share the array's kinds, which the binding was checked
        // against when the array was created, so no row is skipped.
        self.array
            .iter_mut()
            .filter_map(move |view| Typed::bind(view, binding).ok())
    }

    /// The underlying untyped array.
    pub fn array(&self) -> &DirectRecordArray {
        &self.array
    }

    /// Unwrap into the underlying untyped array.
    pub fn into_inner(self) -> DirectRecordArray {
        self.array
    }
}

impl<C: ?Sized + Capability> fmt::Debug for TypedArray<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedArray")
            .field("capability", &C::NAME)
            .field("array", &self.array)
            .finish()
    }
}
