//! The boxed [`Value`] used by generic field access.

use std::fmt;

use crate::kind::FieldKind;

/// A field value tagged with its kind.
///
/// Returned by [`Record::get`](crate::Record::get) and accepted by
/// [`RecordMut::set`](crate::RecordMut::set). Heap records also use it as
/// their slot representation.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `byte` field value.
    Byte(i8),
    /// `char` field value (UTF-16 code unit).
    Char(u16),
    /// `short` field value.
    Short(i16),
    /// `int` field value.
    Int(i32),
    /// `float` field value.
    Float(f32),
    /// `long` field value.
    Long(i64),
    /// `double` field value.
    Double(f64),
    /// `boolean` field value.
    Bool(bool),
    /// `string` field value.
    Str(String),
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Byte(_) => FieldKind::Byte,
            Self::Char(_) => FieldKind::Char,
            Self::Short(_) => FieldKind::Short,
            Self::Int(_) => FieldKind::Int,
            Self::Float(_) => FieldKind::Float,
            Self::Long(_) => FieldKind::Long,
            Self::Double(_) => FieldKind::Double,
            Self::Bool(_) => FieldKind::Bool,
            Self::Str(_) => FieldKind::Str,
        }
    }

    /// Borrow the string payload, if this is a `Str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(v) => write!(f, "{v}"),
            Self::Char(v) => match char::from_u32(u32::from(*v)) {
                Some(c) => write!(f, "{c}"),
                None => write!(f, "\\u{v:04x}"),
            },
            Self::Short(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
        }
    }
}

macro_rules! value_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

value_from!(i8, Byte);
value_from!(u16, Char);
value_from!(i16, Short);
value_from!(i32, Int);
value_from!(f32, Float);
value_from!(i64, Long);
value_from!(f64, Double);
value_from!(bool, Bool);
value_from!(String, Str);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_variant() {
        assert_eq!(Value::from(1i8).kind(), FieldKind::Byte);
        assert_eq!(Value::from(1u16).kind(), FieldKind::Char);
        assert_eq!(Value::from(1i16).kind(), FieldKind::Short);
        assert_eq!(Value::from(1i32).kind(), FieldKind::Int);
        assert_eq!(Value::from(1.0f32).kind(), FieldKind::Float);
        assert_eq!(Value::from(1i64).kind(), FieldKind::Long);
        assert_eq!(Value::from(1.0f64).kind(), FieldKind::Double);
        assert_eq!(Value::from(true).kind(), FieldKind::Bool);
        assert_eq!(Value::from("x").kind(), FieldKind::Str);
    }

    #[test]
    fn display_renders_char_as_character() {
        assert_eq!(Value::Char(u16::from(b'Z')).to_string(), "Z");
        assert_eq!(Value::Char(0xd800).to_string(), "\\ud800");
        assert_eq!(Value::Str("hi".into()).to_string(), "\"hi\"");
    }

    #[test]
    fn default_values_match_their_kind() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.default_value().kind(), kind);
        }
    }
}
