//! Schema builders.
//!
//! ```text
//! SchemaBuilder::new()
//!   .add_field("id", FieldKind::Long)      fields, capability, pool sizing
//!   .implement::<dyn Trait>()
//!   .pool_of_size(64)
//!   ├── .heap_memory()   -> HeapSchemaBuilder   -> Schema<Heap>
//!   └── .direct_memory() -> DirectSchemaBuilder -> Schema<Direct>
//!         .pad_to_word_size(64)
//!         .max_record_size(4096)
//! ```
//!
//! Nothing is validated until `build()`. Validation order: name/kind list
//! lengths, type names, then identifiers and duplicates field by field,
//! capability conformance, then (Direct only) layout.

use std::sync::Arc;

use fasttuple_core::{Capability, FieldKind, FieldSpec, FieldTable, LayoutConfig, UnknownKind};
use fasttuple_direct::DirectShape;
use fasttuple_pool::{ExhaustedPolicy, PoolConfig};

use crate::conformance::{self, Bound, Declared};
use crate::error::SchemaError;
use crate::schema::Schema;
use crate::storage::{Direct, Heap};

/// Fields, capability and pool sizing shared by both strategies.
#[derive(Clone, Debug, Default)]
pub struct SchemaBuilder {
    names: Vec<String>,
    kinds: Vec<Result<FieldKind, UnknownKind>>,
    capability: Option<Declared>,
    pool: PoolConfig,
}

/// Checked fields and capability, ready for a storage strategy.
pub(crate) struct Validated {
    pub(crate) fields: FieldTable,
    pub(crate) capability: Option<Bound>,
    pub(crate) pool: PoolConfig,
}

impl SchemaBuilder {
    /// An empty builder: no fields, no capability, a pool of size 0 that
    /// does not expand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    pub fn add_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.names.push(name.into());
        self.kinds.push(Ok(kind));
        self
    }

    /// Append a field whose kind is given by type name (`"long"`,
    /// `"boolean"`, ...). An unknown name fails at build time.
    pub fn add_field_by_type_name(mut self, name: impl Into<String>, type_name: &str) -> Self {
        self.names.push(name.into());
        self.kinds.push(type_name.parse());
        self
    }

    /// Append field names only; pair with [`add_field_kinds`](Self::add_field_kinds).
    pub fn add_field_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Append field kinds only; pair with [`add_field_names`](Self::add_field_names).
    pub fn add_field_kinds<I>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = FieldKind>,
    {
        self.kinds.extend(kinds.into_iter().map(Ok));
        self
    }

    /// Declare that records of this schema implement capability `C`.
    ///
    /// `C` is the `dyn Trait` of a trait declared with
    /// [`capability!`](fasttuple_core::capability!). Replaces any earlier
    /// declaration.
    pub fn implement<C: ?Sized + Capability>(mut self) -> Self {
        self.capability = Some(Declared::of::<C>());
        self
    }

    /// Elements the schema's pool allocates per growth step.
    pub fn pool_of_size(mut self, size: usize) -> Self {
        self.pool.increment = size;
        self
    }

    /// Let the schema's pool grow when exhausted instead of failing.
    pub fn expanding_pool(mut self) -> Self {
        self.pool.policy = ExhaustedPolicy::Expand;
        self
    }

    /// Store records as owned slot arrays.
    pub fn heap_memory(self) -> HeapSchemaBuilder {
        HeapSchemaBuilder { base: self }
    }

    /// Store records as contiguous byte blocks.
    pub fn direct_memory(self) -> DirectSchemaBuilder {
        DirectSchemaBuilder {
            base: self,
            layout: LayoutConfig::default(),
        }
    }

    pub(crate) fn validate(self) -> Result<Validated, SchemaError> {
        if self.names.len() != self.kinds.len() {
            return Err(SchemaError::LengthMismatch {
                names: self.names.len(),
                kinds: self.kinds.len(),
            });
        }

        let mut specs = Vec::with_capacity(self.names.len());
        for (name, kind) in self.names.into_iter().zip(self.kinds) {
            let kind = kind.map_err(|unknown| SchemaError::unsupported(&name, unknown))?;
            specs.push(FieldSpec::new(name, kind));
        }

        let fields = FieldTable::from_specs(specs)?;
        let capability = self
            .capability
            .map(|declared| conformance::bind(&fields, &declared))
            .transpose()?;

        Ok(Validated {
            fields,
            capability,
            pool: self.pool,
        })
    }
}

/// Builder for a [`Schema<Heap>`].
#[derive(Clone, Debug)]
pub struct HeapSchemaBuilder {
    base: SchemaBuilder,
}

impl HeapSchemaBuilder {
    /// Validate and build the schema.
    pub fn build(self) -> Result<Schema<Heap>, SchemaError> {
        let validated = self.base.validate()?;
        let storage = Heap::new(validated.fields.shared_kinds());
        Ok(Schema::assemble(validated, storage))
    }
}

/// Builder for a [`Schema<Direct>`].
#[derive(Clone, Debug)]
pub struct DirectSchemaBuilder {
    base: SchemaBuilder,
    layout: LayoutConfig,
}

impl DirectSchemaBuilder {
    /// Round the record size up to a multiple of `bytes`. Default: no
    /// padding.
    pub fn pad_to_word_size(mut self, bytes: usize) -> Self {
        self.layout.word_size = bytes;
        self
    }

    /// Reject layouts larger than `bytes` at build time. Default: no cap.
    pub fn max_record_size(mut self, bytes: usize) -> Self {
        self.layout.max_size = Some(bytes);
        self
    }

    /// Validate, compute the layout and build the schema.
    pub fn build(self) -> Result<Schema<Direct>, SchemaError> {
        let validated = self.base.validate()?;
        let kinds: Arc<[FieldKind]> = validated.fields.shared_kinds();
        let layout = fasttuple_core::Layout::compute(&kinds, &self.layout)?;
        let storage = Direct::new(DirectShape::new(kinds, layout));
        Ok(Schema::assemble(validated, storage))
    }
}
