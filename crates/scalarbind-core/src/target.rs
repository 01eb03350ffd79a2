//! Target type identity for decoder lookup.
//!
//! A target is a scalar kind plus a primitive flag. Primitive targets are the
//! bare Rust types (`i32`), wrapper targets are their nullable counterparts
//! (`Option<i32>`). Kinds without a primitive form only exist as wrappers.

use crate::value::ScalarValue;
use num_bigint::BigInt;
use bigdecimal::BigDecimal;
use scalarbind_primitives::{ALL_SCALAR_KINDS, LogicalType, ScalarKind};
use std::{any::TypeId, fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// TargetType
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TargetType {
    pub kind: ScalarKind,
    pub primitive: bool,
}

impl TargetType {
    #[must_use]
    pub const fn primitive(kind: ScalarKind) -> Self {
        Self {
            kind,
            primitive: true,
        }
    }

    #[must_use]
    pub const fn wrapper(kind: ScalarKind) -> Self {
        Self {
            kind,
            primitive: false,
        }
    }

    #[must_use]
    pub const fn logical_type(self) -> LogicalType {
        self.kind.logical_type()
    }

    /// Map a Rust type to its target identity, if it is a supported scalar.
    #[must_use]
    pub fn of<T: 'static>() -> Option<Self> {
        let id = TypeId::of::<T>();

        type_table()
            .into_iter()
            .find_map(|(type_id, target)| (type_id == id).then_some(target))
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rust_type = self.kind.rust_type();

        if !self.primitive && self.kind.has_primitive() {
            write!(f, "Option<{rust_type}>")
        } else {
            f.write_str(rust_type)
        }
    }
}

fn type_table() -> [(TypeId, TargetType); 22] {
    use ScalarKind as K;

    [
        (TypeId::of::<bool>(), TargetType::primitive(K::Bool)),
        (TypeId::of::<Option<bool>>(), TargetType::wrapper(K::Bool)),
        (TypeId::of::<i8>(), TargetType::primitive(K::Byte)),
        (TypeId::of::<Option<i8>>(), TargetType::wrapper(K::Byte)),
        (TypeId::of::<i16>(), TargetType::primitive(K::Short)),
        (TypeId::of::<Option<i16>>(), TargetType::wrapper(K::Short)),
        (TypeId::of::<char>(), TargetType::primitive(K::Char)),
        (TypeId::of::<Option<char>>(), TargetType::wrapper(K::Char)),
        (TypeId::of::<i32>(), TargetType::primitive(K::Int)),
        (TypeId::of::<Option<i32>>(), TargetType::wrapper(K::Int)),
        (TypeId::of::<i64>(), TargetType::primitive(K::Long)),
        (TypeId::of::<Option<i64>>(), TargetType::wrapper(K::Long)),
        (TypeId::of::<f32>(), TargetType::primitive(K::Float)),
        (TypeId::of::<Option<f32>>(), TargetType::wrapper(K::Float)),
        (TypeId::of::<f64>(), TargetType::primitive(K::Double)),
        (TypeId::of::<Option<f64>>(), TargetType::wrapper(K::Double)),
        (TypeId::of::<BigInt>(), TargetType::wrapper(K::BigInteger)),
        (TypeId::of::<Option<BigInt>>(), TargetType::wrapper(K::BigInteger)),
        (TypeId::of::<BigDecimal>(), TargetType::wrapper(K::BigDecimal)),
        (TypeId::of::<Option<BigDecimal>>(), TargetType::wrapper(K::BigDecimal)),
        (TypeId::of::<ScalarValue>(), TargetType::wrapper(K::Number)),
        (TypeId::of::<String>(), TargetType::wrapper(K::Text)),
    ]
}

///
/// UnknownTypeName
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown scalar type name: '{0}'")]
pub struct UnknownTypeName(pub String);

// Alternate primitive spellings accepted beside the Rust type names.
const PRIMITIVE_ALIASES: [(&str, ScalarKind); 7] = [
    ("boolean", ScalarKind::Bool),
    ("byte", ScalarKind::Byte),
    ("short", ScalarKind::Short),
    ("int", ScalarKind::Int),
    ("long", ScalarKind::Long),
    ("float", ScalarKind::Float),
    ("double", ScalarKind::Double),
];

fn primitive_kind_named(name: &str) -> Option<ScalarKind> {
    ALL_SCALAR_KINDS
        .into_iter()
        .find(|kind| kind.has_primitive() && kind.rust_type() == name)
        .or_else(|| {
            PRIMITIVE_ALIASES
                .into_iter()
                .find_map(|(alias, kind)| (alias == name).then_some(kind))
        })
}

impl FromStr for TargetType {
    type Err = UnknownTypeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        if let Some(inner) = name
            .strip_prefix("Option<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            let inner = inner.trim();
            if let Some(kind) = primitive_kind_named(inner) {
                return Ok(Self::wrapper(kind));
            }

            return ALL_SCALAR_KINDS
                .into_iter()
                .find(|kind| !kind.has_primitive() && kind.rust_type() == inner)
                .map(Self::wrapper)
                .ok_or_else(|| UnknownTypeName(s.to_string()));
        }

        if let Some(kind) = primitive_kind_named(name) {
            return Ok(Self::primitive(kind));
        }

        ALL_SCALAR_KINDS
            .into_iter()
            .find(|kind| {
                kind.label() == name || (!kind.has_primitive() && kind.rust_type() == name)
            })
            .map(Self::wrapper)
            .ok_or_else(|| UnknownTypeName(s.to_string()))
    }
}
