#[macro_export]
macro_rules! scalar_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                Bool,
                Boolean,
                label = "Boolean",
                rust_type = "bool",
                has_primitive = true,
                has_decoder = true
            ),
            (
                Byte,
                Integer,
                label = "Byte",
                rust_type = "i8",
                has_primitive = true,
                has_decoder = true
            ),
            (
                Short,
                Integer,
                label = "Short",
                rust_type = "i16",
                has_primitive = true,
                has_decoder = true
            ),
            (
                Char,
                Integer,
                label = "Character",
                rust_type = "char",
                has_primitive = true,
                has_decoder = true
            ),
            (
                Int,
                Integer,
                label = "Integer",
                rust_type = "i32",
                has_primitive = true,
                has_decoder = true
            ),
            (
                Long,
                Integer,
                label = "Long",
                rust_type = "i64",
                has_primitive = true,
                has_decoder = true
            ),
            (
                Float,
                Float,
                label = "Float",
                rust_type = "f32",
                has_primitive = true,
                has_decoder = true
            ),
            (
                Double,
                Float,
                label = "Double",
                rust_type = "f64",
                has_primitive = true,
                has_decoder = true
            ),
            (
                BigInteger,
                Integer,
                label = "BigInteger",
                rust_type = "BigInt",
                has_primitive = false,
                has_decoder = true
            ),
            (
                BigDecimal,
                Float,
                label = "BigDecimal",
                rust_type = "BigDecimal",
                has_primitive = false,
                has_decoder = true
            ),
            (
                Number,
                Integer,
                label = "Number",
                rust_type = "ScalarValue",
                has_primitive = false,
                has_decoder = true
            ),
            (
                Text,
                OtherScalar,
                label = "String",
                rust_type = "String",
                has_primitive = false,
                has_decoder = false
            ),
        }
    };
}

#[macro_export]
macro_rules! scalar_kind_registry {
    ($macro:ident) => {
        $crate::scalar_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::scalar_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($scalar:ident, $logical:ident, label = $label:expr, rust_type = $rust_type:expr, has_primitive = $has_primitive:expr, has_decoder = $has_decoder:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::ScalarKind::$scalar => $crate::ScalarMetadata {
                    logical_type: $crate::LogicalType::$logical,
                    label: $label,
                    rust_type: $rust_type,
                    has_primitive: $has_primitive,
                    has_decoder: $has_decoder,
                },
            )*
        }
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($scalar:ident, $logical:ident, label = $label:expr, rust_type = $rust_type:expr, has_primitive = $has_primitive:expr, has_decoder = $has_decoder:expr) ),* $(,)? ) => {
        [ $( $crate::ScalarKind::$scalar ),* ]
    };
}
