//! Capability conformance: resolving accessors to field slots.

use std::any::TypeId;

use fasttuple_core::{Accessor, Binding, Capability, FieldTable};

use crate::error::SchemaError;

/// A capability recorded on a builder, before it is checked.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Declared {
    pub(crate) id: TypeId,
    pub(crate) name: &'static str,
    pub(crate) accessors: &'static [Accessor],
}

impl Declared {
    pub(crate) fn of<C: ?Sized + Capability>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: C::NAME,
            accessors: C::ACCESSORS,
        }
    }
}

/// A capability checked against a schema's fields.
#[derive(Clone, Debug)]
pub(crate) struct Bound {
    pub(crate) id: TypeId,
    pub(crate) binding: Binding,
}

/// Check every accessor of `declared` against `fields` and resolve slots.
///
/// Accessors are checked in declaration order; the first failure wins.
pub(crate) fn bind(fields: &FieldTable, declared: &Declared) -> Result<Bound, SchemaError> {
    let capability = declared.name;
    let mut slots = Vec::with_capacity(declared.accessors.len());

    for (k, accessor) in declared.accessors.iter().enumerate() {
        if declared.accessors[..k]
            .iter()
            .any(|earlier| earlier.name == accessor.name)
        {
            return Err(SchemaError::InvalidCapability {
                capability,
                reason: format!("accessor '{}' is declared twice", accessor.name),
            });
        }

        let index = fields
            .index_of(accessor.name)
            .ok_or(SchemaError::MissingAccessor {
                capability,
                accessor: accessor.name,
            })?;
        let actual = fields.kinds()[index - 1];
        if actual != accessor.kind {
            return Err(SchemaError::AccessorKindMismatch {
                capability,
                accessor: accessor.name,
                expected: accessor.kind,
                actual,
            });
        }
        slots.push(index - 1);
    }

    Ok(Bound {
        id: declared.id,
        binding: Binding::new(capability, slots),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fasttuple_core::{capability, FieldKind, FieldSpec};

    capability! {
        /// Two coordinates.
        trait Pair {
            x, set_x: i64;
            y, set_y: i32;
        }
    }

    fn table(specs: &[(&str, FieldKind)]) -> FieldTable {
        FieldTable::from_specs(specs.iter().map(|&(n, k)| FieldSpec::new(n, k))).unwrap()
    }

    #[test]
    fn accessors_resolve_to_slots_in_any_field_order() {
        let fields = table(&[
            ("pad", FieldKind::Byte),
            ("y", FieldKind::Int),
            ("x", FieldKind::Long),
        ]);
        let bound = bind(&fields, &Declared::of::<dyn Pair>()).unwrap();
        assert_eq!(bound.binding.slots(), &[2, 1]);
        assert_eq!(bound.binding.name(), "Pair");
    }

    #[test]
    fn missing_field_is_reported() {
        let fields = table(&[("x", FieldKind::Long)]);
        assert_eq!(
            bind(&fields, &Declared::of::<dyn Pair>()).unwrap_err(),
            SchemaError::MissingAccessor {
                capability: "Pair",
                accessor: "y"
            }
        );
    }

    #[test]
    fn kind_disagreement_is_reported() {
        let fields = table(&[("x", FieldKind::Long), ("y", FieldKind::Long)]);
        assert_eq!(
            bind(&fields, &Declared::of::<dyn Pair>()).unwrap_err(),
            SchemaError::AccessorKindMismatch {
                capability: "Pair",
                accessor: "y",
                expected: FieldKind::Int,
                actual: FieldKind::Long,
            }
        );
    }

    #[test]
    fn repeated_accessor_is_invalid() {
        static TWICE: &[Accessor] = &[
            Accessor {
                name: "x",
                kind: FieldKind::Long,
            },
            Accessor {
                name: "x",
                kind: FieldKind::Long,
            },
        ];
        let declared = Declared {
            id: TypeId::of::<()>(),
            name: "Twice",
            accessors: TWICE,
        };
        let fields = table(&[("x", FieldKind::Long)]);
        assert!(matches!(
            bind(&fields, &declared),
            Err(SchemaError::InvalidCapability { capability: "Twice", .. })
        ));
    }
}
