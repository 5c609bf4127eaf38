//! Field kinds and the fixed-width [`Primitive`] codec.

use std::fmt;
use std::str::FromStr;

use crate::value::Value;

/// Maximum number of UTF-8 bytes a string field stores.
pub const STRING_CAPACITY: usize = 20;

/// Width of the length prefix in front of string bytes.
pub const STRING_PREFIX: usize = 4;

/// Total footprint reserved for a string field: prefix plus capacity.
pub const STRING_FOOTPRINT: usize = STRING_PREFIX + STRING_CAPACITY;

/// Classification of a field's storage type.
///
/// Every kind has a fixed byte footprint, which is what makes records
/// fixed-size and lets the layout engine assign offsets once per schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Signed 8-bit integer (`i8`).
    Byte,
    /// UTF-16 code unit (`u16`).
    Char,
    /// Signed 16-bit integer (`i16`).
    Short,
    /// Signed 32-bit integer (`i32`).
    Int,
    /// 32-bit IEEE float (`f32`).
    Float,
    /// Signed 64-bit integer (`i64`).
    Long,
    /// 64-bit IEEE float (`f64`).
    Double,
    /// Boolean stored as a single byte.
    Bool,
    /// Length-prefixed UTF-8 string of at most [`STRING_CAPACITY`] bytes.
    Str,
}

impl FieldKind {
    /// All kinds, in declaration order.
    pub const ALL: [FieldKind; 9] = [
        Self::Byte,
        Self::Char,
        Self::Short,
        Self::Int,
        Self::Float,
        Self::Long,
        Self::Double,
        Self::Bool,
        Self::Str,
    ];

    /// Number of bytes a field of this kind occupies in a direct record.
    pub const fn size(self) -> usize {
        match self {
            Self::Byte | Self::Bool => 1,
            Self::Char | Self::Short => 2,
            Self::Int | Self::Float => 4,
            Self::Long | Self::Double => 8,
            Self::Str => STRING_FOOTPRINT,
        }
    }

    /// The type name used in schema descriptions (`"long"`, `"boolean"`, ...).
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Float => "float",
            Self::Long => "long",
            Self::Double => "double",
            Self::Bool => "boolean",
            Self::Str => "string",
        }
    }

    /// Zero value used to initialise fresh heap slots.
    pub fn default_value(self) -> Value {
        match self {
            Self::Byte => Value::Byte(0),
            Self::Char => Value::Char(0),
            Self::Short => Value::Short(0),
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::Long => Value::Long(0),
            Self::Double => Value::Double(0.0),
            Self::Bool => Value::Bool(false),
            Self::Str => Value::Str(String::new()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Error returned when a type name does not correspond to any [`FieldKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownKind {
    /// The unrecognised type name.
    pub name: String,
}

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported field type '{}'", self.name)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for FieldKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "byte" => Ok(Self::Byte),
            "char" => Ok(Self::Char),
            "short" => Ok(Self::Short),
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "long" => Ok(Self::Long),
            "double" => Ok(Self::Double),
            "boolean" | "bool" => Ok(Self::Bool),
            "string" => Ok(Self::Str),
            other => Err(UnknownKind {
                name: other.to_string(),
            }),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width value that can live in a record field.
///
/// Implemented for the Rust type backing each fixed-width [`FieldKind`]:
/// `i8`, `u16`, `i16`, `i32`, `f32`, `i64`, `f64` and `bool`. Encoding is
/// native byte order; floats round-trip bit-exactly, NaN payloads included.
pub trait Primitive: Copy + PartialEq + fmt::Debug + Send + Sync + sealed::Sealed + 'static {
    /// The kind this type is stored as.
    const KIND: FieldKind;

    /// Write `self` into the first `KIND.size()` bytes of `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than the kind's size.
    fn encode(self, out: &mut [u8]);

    /// Read a value from the first `KIND.size()` bytes of `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than the kind's size.
    fn decode(bytes: &[u8]) -> Self;

    /// Box into the generic [`Value`] variant.
    fn into_value(self) -> Value;

    /// Unbox from a [`Value`], or `None` if the variant differs.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_primitive {
    ($ty:ty, $kind:ident) => {
        impl sealed::Sealed for $ty {}

        impl Primitive for $ty {
            const KIND: FieldKind = FieldKind::$kind;

            #[inline]
            fn encode(self, out: &mut [u8]) {
                out[..std::mem::size_of::<$ty>()].copy_from_slice(&self.to_ne_bytes());
            }

            #[inline]
            fn decode(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(&bytes[..std::mem::size_of::<$ty>()]);
                <$ty>::from_ne_bytes(raw)
            }

            #[inline]
            fn into_value(self) -> Value {
                Value::$kind(self)
            }

            #[inline]
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$kind(v) => Some(*v),
                    _ => None,
                }
            }
        }
    };
}

impl_primitive!(i8, Byte);
impl_primitive!(u16, Char);
impl_primitive!(i16, Short);
impl_primitive!(i32, Int);
impl_primitive!(f32, Float);
impl_primitive!(i64, Long);
impl_primitive!(f64, Double);

impl sealed::Sealed for bool {}

impl Primitive for bool {
    const KIND: FieldKind = FieldKind::Bool;

    #[inline]
    fn encode(self, out: &mut [u8]) {
        out[0] = self as u8;
    }

    // Any non-zero byte reads as true.
    #[inline]
    fn decode(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }

    #[inline]
    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}
