#[macro_use]
mod macros;


use std::fmt;

///
/// ScalarKind
///
/// Canonical scalar kind used for shared decoder metadata.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ScalarKind {
    Bool,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
    Number,
    Text,
}

impl ScalarKind {
    /// Return the full metadata descriptor for one scalar kind.
    #[must_use]
    pub const fn metadata(self) -> ScalarMetadata {
        scalar_kind_registry!(metadata_from_registry, self)
    }

    /// Return the coercion logical type for this scalar kind.
    #[must_use]
    pub const fn logical_type(self) -> LogicalType {
        self.metadata().logical_type
    }

    /// Human-readable kind label used in diagnostics ("not a valid Integer value").
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.metadata().label
    }

    /// Name of the Rust type decoded for this kind.
    #[must_use]
    pub const fn rust_type(self) -> &'static str {
        self.metadata().rust_type
    }

    /// Return whether this kind has a non-nullable primitive form.
    #[must_use]
    pub const fn has_primitive(self) -> bool {
        self.metadata().has_primitive
    }

    /// Return whether a scalar decoder exists for this kind.
    #[must_use]
    pub const fn has_decoder(self) -> bool {
        self.metadata().has_decoder
    }

    /// Return whether this kind decodes IEEE special literals (`Infinity`, `NaN`).
    #[must_use]
    pub const fn accepts_ieee_specials(self) -> bool {
        matches!(self, Self::Float | Self::Double | Self::Number)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// ScalarMetadata
///
/// Per-kind metadata shared across the decoder layers.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScalarMetadata {
    pub logical_type: LogicalType,
    pub label: &'static str,
    pub rust_type: &'static str,
    pub has_primitive: bool,
    pub has_decoder: bool,
}

///
/// LogicalType
///
/// Coarse target classification used only to pick coercion rules.
/// It says nothing about bit width or representable range.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum LogicalType {
    Boolean,
    Integer,
    Float,
    OtherScalar,
}

impl LogicalType {
    /// Scalar logical types are governed by the `allow_coercion_of_scalars` flag.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::Boolean | Self::Integer | Self::Float)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::OtherScalar => "other_scalar",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered list of all scalar kinds in registry order.
pub const ALL_SCALAR_KINDS: [ScalarKind; 12] = scalar_kind_registry!(all_kinds_from_registry);
