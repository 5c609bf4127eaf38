//! Schema builders, capabilities and sample values.

use fasttuple_core::{capability, FieldKind, RecordMut, Value};
use fasttuple_schema::SchemaBuilder;

capability! {
    /// Typed access to the `a`/`b`/`c` fields of [`long_int_short`].
    pub trait LongIntShort {
        a, set_a: i64;
        b, set_b: i32;
        c, set_c: i16;
    }
}

capability! {
    /// A three-dimensional point of doubles.
    pub trait Point3 {
        x, set_x: f64;
        y, set_y: f64;
        z, set_z: f64;
    }
}

capability! {
    /// A tagged counter; `count` is a long.
    pub trait Counter {
        tag, set_tag: u16;
        count, set_count: i64;
        live, set_live: bool;
    }
}

capability! {
    /// An id with a short text label.
    pub trait Labelled {
        id, set_id: i64;
        label, set_label: str;
    }
}

/// Every kind, in declaration order, one field each.
pub const EVERY_KIND: [(&str, FieldKind); 9] = [
    ("b", FieldKind::Byte),
    ("ch", FieldKind::Char),
    ("s", FieldKind::Short),
    ("i", FieldKind::Int),
    ("f", FieldKind::Float),
    ("l", FieldKind::Long),
    ("d", FieldKind::Double),
    ("flag", FieldKind::Bool),
    ("name", FieldKind::Str),
];

/// `a: long, b: int, c: short`, implementing [`LongIntShort`].
pub fn long_int_short() -> SchemaBuilder {
    SchemaBuilder::new()
        .add_field("a", FieldKind::Long)
        .add_field("b", FieldKind::Int)
        .add_field("c", FieldKind::Short)
        .implement::<dyn LongIntShort>()
}

/// `x, y, z: double`, implementing [`Point3`].
pub fn point3() -> SchemaBuilder {
    SchemaBuilder::new()
        .add_field_names(["x", "y", "z"])
        .add_field_kinds([FieldKind::Double; 3])
        .implement::<dyn Point3>()
}

/// `id: long, label: string`, implementing [`Labelled`].
pub fn labelled() -> SchemaBuilder {
    SchemaBuilder::new()
        .add_field("id", FieldKind::Long)
        .add_field("label", FieldKind::Str)
        .implement::<dyn Labelled>()
}

/// One field of each kind, see [`EVERY_KIND`].
pub fn every_kind() -> SchemaBuilder {
    EVERY_KIND
        .iter()
        .fold(SchemaBuilder::new(), |builder, &(name, kind)| {
            builder.add_field(name, kind)
        })
}

/// Boundary values for each entry of [`EVERY_KIND`].
pub fn boundary_values() -> Vec<Vec<Value>> {
    vec![
        vec![
            Value::Byte(i8::MIN),
            Value::Char(0),
            Value::Short(i16::MIN),
            Value::Int(i32::MIN),
            Value::Float(f32::MIN),
            Value::Long(i64::MIN),
            Value::Double(f64::MIN),
            Value::Bool(false),
            Value::Str(String::new()),
        ],
        vec![
            Value::Byte(i8::MAX),
            Value::Char(u16::MAX),
            Value::Short(i16::MAX),
            Value::Int(i32::MAX),
            Value::Float(f32::MAX),
            Value::Long(i64::MAX),
            Value::Double(f64::MAX),
            Value::Bool(true),
            Value::Str("exactly twenty bytes".into()),
        ],
        vec![
            Value::Byte(-1),
            Value::Char(0xd800),
            Value::Short(-1),
            Value::Int(-1),
            Value::Float(f32::from_bits(0x7fc0_0001)),
            Value::Long(-1),
            Value::Double(f64::from_bits(0x7ff8_0000_0000_0001)),
            Value::Bool(true),
            Value::Str("héllo".into()),
        ],
    ]
}

/// Write `values` into `record` in field order.
pub fn fill<R: RecordMut>(record: &mut R, values: &[Value]) {
    for (slot, value) in values.iter().enumerate() {
        record
            .set(slot + 1, value.clone())
            .unwrap_or_else(|e| panic!("fixture value {slot} rejected: {e}"));
    }
}

/// Compare values, treating floats by bit pattern so NaN payloads count.
pub fn same_bits(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
        (Value::Double(x), Value::Double(y)) => x.to_bits() == y.to_bits(),
        _ => a == b,
    }
}
