use num_bigint::BigInt;
use bigdecimal::BigDecimal;
use scalarbind_primitives::ScalarKind;
use std::fmt;

///
/// ScalarValue
///
/// Dynamically-typed decode result. Used by the "any number" decoder,
/// by registry lookups that erase the target type, and by problem handlers
/// that supply replacement values.
///
/// Null → the decoded value is absent (a wrapper target's null substitute).
///

#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BigInteger(BigInt),
    BigDecimal(BigDecimal),
}

impl ScalarValue {
    /// Scalar kind of the carried value; `None` for `Null`.
    #[must_use]
    pub const fn kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ScalarKind::Bool),
            Self::Byte(_) => Some(ScalarKind::Byte),
            Self::Short(_) => Some(ScalarKind::Short),
            Self::Char(_) => Some(ScalarKind::Char),
            Self::Int(_) => Some(ScalarKind::Int),
            Self::Long(_) => Some(ScalarKind::Long),
            Self::Float(_) => Some(ScalarKind::Float),
            Self::Double(_) => Some(ScalarKind::Double),
            Self::BigInteger(_) => Some(ScalarKind::BigInteger),
            Self::BigDecimal(_) => Some(ScalarKind::BigDecimal),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::BigInteger(v) => write!(f, "{v}"),
            Self::BigDecimal(v) => write!(f, "{v}"),
        }
    }
}

impl<T: Into<Self>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

///
/// FromScalar
///
/// Exact-variant extraction used when a problem handler supplies a
/// replacement value. No widening or narrowing happens here.
///

pub trait FromScalar: Sized {
    fn from_scalar(value: ScalarValue) -> Option<Self>;
}

impl FromScalar for ScalarValue {
    fn from_scalar(value: ScalarValue) -> Option<Self> {
        Some(value)
    }
}

macro_rules! impl_scalar_conversions {
    ( $( $ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$ty> for ScalarValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl FromScalar for $ty {
                fn from_scalar(value: ScalarValue) -> Option<Self> {
                    match value {
                        ScalarValue::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_scalar_conversions! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    char => Char,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    BigInt => BigInteger,
    BigDecimal => BigDecimal,
}
