//! Benchmark profiles for fasttuple.
//!
//! - [`tick_profile`]: a five-field market tick implementing [`Tick`]
//! - [`populate`]: deterministic field values derived from a row number

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use fasttuple_core::{capability, FieldKind, RecordError, RecordMut};
use fasttuple_schema::SchemaBuilder;

/// Rows per array in the array benchmarks.
pub const ROWS: usize = 10_000;

capability! {
    /// Named access to a [`tick_profile`] record.
    pub trait Tick {
        id, set_id: i64;
        qty, set_qty: i32;
        price, set_price: f64;
        venue, set_venue: i16;
        live, set_live: bool;
    }
}

/// `id: long, qty: int, price: double, venue: short, live: boolean`,
/// implementing [`Tick`]. 25 bytes unpadded.
pub fn tick_profile() -> SchemaBuilder {
    SchemaBuilder::new()
        .add_field("id", FieldKind::Long)
        .add_field("qty", FieldKind::Int)
        .add_field("price", FieldKind::Double)
        .add_field("venue", FieldKind::Short)
        .add_field("live", FieldKind::Bool)
        .implement::<dyn Tick>()
}

/// Write every field of a [`tick_profile`] record from `row`.
pub fn populate<R: RecordMut>(record: &mut R, row: usize) -> Result<(), RecordError> {
    record.set_long(1, row as i64)?;
    record.set_int(2, (row % 1000) as i32)?;
    record.set_double(3, row as f64 * 0.25)?;
    record.set_short(4, (row % 16) as i16)?;
    record.set_bool(5, row % 2 == 0)
}
