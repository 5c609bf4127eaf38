//! Unchecked fixed-width reads and writes at raw addresses.
//!
//! These are the primitives behind address-based field access: one
//! native-order, unaligned read or write at `address + offset`, with no
//! bounds checking. Bounds and kinds are enforced one layer up, by
//! [`DirectShape`](crate::DirectShape).
//!
//! Every function here is `unsafe`; the caller guarantees that the touched
//! bytes lie inside a live allocation, are initialised (for reads), and are
//! not concurrently accessed through any other path (for writes).

#![allow(unsafe_code)]

use std::slice;

use fasttuple_core::string::{decode_string, encode_string};
use fasttuple_core::{Primitive, STRING_FOOTPRINT};

/// Read a `P` at `address + offset`.
///
/// # Safety
///
/// `address + offset .. + P::KIND.size()` must be valid for reads and
/// initialised.
#[inline]
pub unsafe fn read<P: Primitive>(address: *const u8, offset: usize) -> P {
    // SAFETY: the caller guarantees the range is readable and initialised.
    let bytes = unsafe { slice::from_raw_parts(address.add(offset), P::KIND.size()) };
    P::decode(bytes)
}

/// Write `value` at `address + offset`.
///
/// # Safety
///
/// `address + offset .. + P::KIND.size()` must be valid for writes and not
/// aliased by any live reference.
#[inline]
pub unsafe fn write<P: Primitive>(address: *mut u8, offset: usize, value: P) {
    // SAFETY: the caller guarantees the range is writable and unaliased.
    let bytes = unsafe { slice::from_raw_parts_mut(address.add(offset), P::KIND.size()) };
    value.encode(bytes);
}

/// Read a fixed-capacity string at `address`.
///
/// # Safety
///
/// `address .. + STRING_FOOTPRINT` must be valid for reads and initialised.
pub unsafe fn get_string(address: *const u8) -> String {
    // SAFETY: the caller guarantees the footprint is readable.
    let bytes = unsafe { slice::from_raw_parts(address, STRING_FOOTPRINT) };
    decode_string(bytes)
}

/// Write a fixed-capacity string at `address`, truncating to capacity.
///
/// # Safety
///
/// `address .. + STRING_FOOTPRINT` must be valid for writes and not aliased
/// by any live reference.
pub unsafe fn put_string(address: *mut u8, value: &str) {
    // SAFETY: the caller guarantees the footprint is writable and unaliased.
    let bytes = unsafe { slice::from_raw_parts_mut(address, STRING_FOOTPRINT) };
    encode_string(bytes, value);
}

macro_rules! typed_raw {
    ($get:ident, $put:ident, $ty:ty) => {
        #[doc = concat!("Read a `", stringify!($ty), "` at `address + offset`.")]
        ///
        /// # Safety
        ///
        /// Same contract as [`read`].
        #[inline]
        pub unsafe fn $get(address: *const u8, offset: usize) -> $ty {
            // SAFETY: forwarded caller contract.
            unsafe { read::<$ty>(address, offset) }
        }

        #[doc = concat!("Write a `", stringify!($ty), "` at `address + offset`.")]
        ///
        /// # Safety
        ///
        /// Same contract as [`write`].
        #[inline]
        pub unsafe fn $put(address: *mut u8, offset: usize, value: $ty) {
            // SAFETY: forwarded caller contract.
            unsafe { write::<$ty>(address, offset, value) }
        }
    };
}

typed_raw!(get_byte, put_byte, i8);
typed_raw!(get_char, put_char, u16);
typed_raw!(get_short, put_short, i16);
typed_raw!(get_int, put_int, i32);
typed_raw!(get_float, put_float, f32);
typed_raw!(get_long, put_long, i64);
typed_raw!(get_double, put_double, f64);
typed_raw!(get_bool, put_bool, bool);
