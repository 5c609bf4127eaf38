//! Integration test: the record contract on both storage strategies.
//!
//! The same assertions run against heap and direct records: index
//! validation on a long/int/short schema, boundary round trips for every
//! kind, string truncation, and capability access.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use fasttuple_core::{Binding, FieldKind, Record, RecordError, RecordMut, Typed};
use fasttuple_schema::{Schema, SchemaBuilder, SchemaError, Storage, Strategy};
use fasttuple_test_utils::{
    boundary_values, every_kind, fill, labelled, long_int_short, point3, same_bits, Counter,
    Labelled, LongIntShort, Point3,
};
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn check_index_validation<S: Storage>(schema: &Schema<S>) {
    let mut r = schema.create().unwrap();
    let mismatch = |e: Result<(), RecordError>| matches!(e, Err(RecordError::TypeMismatch { .. }));
    let out_of_range =
        |e: Result<(), RecordError>| matches!(e, Err(RecordError::IndexOutOfRange { .. }));

    assert!(mismatch(r.get_long(2).map(drop)));
    assert!(mismatch(r.get_long(3).map(drop)));
    assert!(mismatch(r.get_int(1).map(drop)));
    assert!(mismatch(r.get_int(3).map(drop)));
    assert!(mismatch(r.get_short(1).map(drop)));
    assert!(mismatch(r.get_short(2).map(drop)));
    assert!(mismatch(r.set_long(2, 1)));
    assert!(mismatch(r.set_int(3, 1)));
    assert!(mismatch(r.set_short(1, 1)));

    assert!(out_of_range(r.get_long(0).map(drop)));
    assert!(out_of_range(r.get_short(4).map(drop)));
    assert!(out_of_range(r.set_int(0, 1)));
    assert!(out_of_range(r.set_short(4, 1)));
    assert!(out_of_range(r.get(4).map(drop)));
}

fn check_boundary_round_trip<S: Storage>(schema: &Schema<S>) {
    for values in boundary_values() {
        let mut r = schema.create().unwrap();
        fill(&mut r, &values);
        let read = r.values();
        assert_eq!(read.len(), values.len());
        for (slot, (got, want)) in read.iter().zip(&values).enumerate() {
            assert!(
                same_bits(got, want),
                "{} field {}: {got:?} != {want:?}",
                schema.strategy(),
                slot + 1
            );
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[test]
fn index_validation_heap() {
    check_index_validation(&long_int_short().heap_memory().build().unwrap());
}

#[test]
fn index_validation_direct() {
    check_index_validation(&long_int_short().direct_memory().build().unwrap());
}

#[test]
fn boundary_round_trip_heap() {
    check_boundary_round_trip(&every_kind().heap_memory().build().unwrap());
}

#[test]
fn boundary_round_trip_direct() {
    check_boundary_round_trip(&every_kind().direct_memory().build().unwrap());
}

#[test]
fn strings_truncate_identically_on_both_strategies() {
    let heap = every_kind().heap_memory().build().unwrap();
    let direct = every_kind().direct_memory().build().unwrap();
    let input = "ünïcödé strings are longer than twenty bytes";

    let mut h = heap.create().unwrap();
    let mut d = direct.create().unwrap();
    h.set_string(9, input).unwrap();
    d.set_string(9, input).unwrap();

    let stored = h.get_string(9).unwrap();
    assert_eq!(stored, d.get_string(9).unwrap());
    assert!(stored.len() <= 20);
    assert!(input.starts_with(&stored));
}

#[test]
fn schemas_compare_by_fields_only() {
    let heap = long_int_short().heap_memory().build().unwrap();
    let direct = long_int_short().direct_memory().pad_to_word_size(64).build().unwrap();
    assert!(heap == direct);
    assert_eq!(heap.to_string(), "('a':long,'b':int,'c':short)");

    let reordered = SchemaBuilder::new()
        .add_field("b", FieldKind::Int)
        .add_field("a", FieldKind::Long)
        .add_field("c", FieldKind::Short)
        .heap_memory()
        .build()
        .unwrap();
    assert!(heap != reordered);
}

#[test]
fn equal_schemas_hash_equally() {
    let a = long_int_short().direct_memory().build().unwrap();
    let b = long_int_short().direct_memory().build().unwrap();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn schema_metadata() {
    let schema = long_int_short().direct_memory().pad_to_word_size(32).build().unwrap();
    assert_eq!(schema.field_names(), vec!["a", "b", "c"]);
    assert_eq!(
        schema.field_kinds(),
        &[FieldKind::Long, FieldKind::Int, FieldKind::Short]
    );
    assert_eq!(schema.strategy(), Strategy::Direct);
    assert_eq!(schema.capability_name(), Some("LongIntShort"));
    assert_eq!(schema.layout().offsets(), &[0, 8, 12]);
    assert_eq!(schema.layout().unpadded_size(), 14);
    assert_eq!(schema.byte_size(), 32);
    assert_eq!(schema.field_index("c"), Ok(3));
}

#[test]
fn padding_examples() {
    let longs = SchemaBuilder::new()
        .add_field("a", FieldKind::Long)
        .add_field("b", FieldKind::Long)
        .direct_memory()
        .pad_to_word_size(64)
        .build()
        .unwrap();
    assert_eq!(longs.byte_size(), 64);

    let mixed = SchemaBuilder::new()
        .add_field_by_type_name("a", "byte")
        .add_field_by_type_name("b", "long")
        .direct_memory()
        .pad_to_word_size(32)
        .build()
        .unwrap();
    assert_eq!(mixed.byte_size(), 32);
}

#[test]
fn capabilities_work_on_both_strategies() {
    let heap = point3().heap_memory().build().unwrap();
    let mut p = heap.create_typed::<dyn Point3>().unwrap();
    p.set_x(1.0);
    p.set_y(-2.0);
    p.set_z(0.5);
    assert_eq!((p.x(), p.y(), p.z()), (1.0, -2.0, 0.5));
    assert_eq!(p.record().get_double(2), Ok(-2.0));

    let direct = long_int_short().direct_memory().build().unwrap();
    let record = direct.create().unwrap();
    let mut t = direct.typed::<dyn LongIntShort>(record).unwrap();
    t.set_a(i64::MAX);
    t.set_b(-3);
    t.set_c(9);
    let record = t.into_inner();
    assert_eq!(record.get_long(1), Ok(i64::MAX));
    assert_eq!(record.get_int(2), Ok(-3));
    assert_eq!(record.get_short(3), Ok(9));
}

fn check_string_accessors<S: Storage>(schema: &Schema<S>) {
    let mut t = schema.create_typed::<dyn Labelled>().unwrap();
    t.set_id(7);
    t.set_label("short");
    assert_eq!((t.id(), t.label()), (7, "short".to_owned()));

    let input = "ünïcödé labels are longer than twenty bytes";
    t.set_label(input);
    let stored = t.label();
    assert!(stored.len() <= 20);
    assert!(input.starts_with(&stored));
    assert_eq!(t.record().get_string(2), Ok(stored));
}

#[test]
fn string_accessors_heap() {
    check_string_accessors(&labelled().heap_memory().build().unwrap());
}

#[test]
fn string_accessors_direct() {
    check_string_accessors(&labelled().direct_memory().build().unwrap());
}

#[test]
fn string_accessor_on_non_string_field_is_rejected() {
    let err = SchemaBuilder::new()
        .add_field("id", FieldKind::Long)
        .add_field("label", FieldKind::Char)
        .implement::<dyn Labelled>()
        .direct_memory()
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        SchemaError::AccessorKindMismatch {
            capability: "Labelled",
            accessor: "label",
            expected: FieldKind::Str,
            actual: FieldKind::Char,
        }
    );
}

#[test]
fn hand_built_binding_is_checked_against_the_record() {
    let schema = long_int_short().heap_memory().build().unwrap();
    let record = schema.create().unwrap();
    let slots_for_point = Binding::new("Point3", vec![0, 1, 2]);
    let err = Typed::<_, dyn Point3>::bind(record, &slots_for_point).unwrap_err();
    assert_eq!(
        err,
        RecordError::InvalidBinding {
            capability: "Point3",
            accessor: 0
        }
    );
}

#[test]
fn typed_heap_arrays() {
    let heap = point3().heap_memory().build().unwrap();
    let mut points = heap.create_typed_array::<dyn Point3>(4).unwrap();
    for (i, p) in points.iter_mut().enumerate() {
        p.set_x(i as f64);
    }
    assert_eq!(points[3].x(), 3.0);
}

#[test]
fn capability_conformance_failures() {
    let missing = SchemaBuilder::new()
        .add_field("tag", FieldKind::Char)
        .add_field("live", FieldKind::Bool)
        .implement::<dyn Counter>()
        .heap_memory()
        .build()
        .unwrap_err();
    assert_eq!(
        missing,
        SchemaError::MissingAccessor {
            capability: "Counter",
            accessor: "count"
        }
    );

    let wrong_kind = SchemaBuilder::new()
        .add_field("tag", FieldKind::Char)
        .add_field("count", FieldKind::Int)
        .add_field("live", FieldKind::Bool)
        .implement::<dyn Counter>()
        .direct_memory()
        .build()
        .unwrap_err();
    assert_eq!(
        wrong_kind,
        SchemaError::AccessorKindMismatch {
            capability: "Counter",
            accessor: "count",
            expected: FieldKind::Long,
            actual: FieldKind::Int,
        }
    );
}

#[test]
fn typed_creation_without_capability_fails() {
    let plain = SchemaBuilder::new()
        .add_field("x", FieldKind::Double)
        .heap_memory()
        .build()
        .unwrap();
    assert_eq!(
        plain.create_typed::<dyn Point3>().unwrap_err(),
        SchemaError::CapabilityMismatch {
            requested: "Point3",
            declared: None
        }
    );
}

proptest! {
    #[test]
    fn heap_and_direct_agree(a in any::<i64>(), b in any::<i32>(), c in any::<i16>()) {
        let heap = long_int_short().heap_memory().build().unwrap();
        let direct = long_int_short().direct_memory().build().unwrap();
        let mut h = heap.create().unwrap();
        let mut d = direct.create().unwrap();
        h.set_long(1, a).unwrap();
        h.set_int(2, b).unwrap();
        h.set_short(3, c).unwrap();
        d.copy_from(&h).unwrap();
        prop_assert_eq!(d.values(), h.values());
    }
}
