//! JSON-text entry points.
//!
//! These parse one JSON document into a `TokenBuffer` and run the
//! registered decoder for the requested Rust type over it.

use crate::Error;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use scalarbind_core::{
    config::DecodeConfig,
    context::{DecodeContext, ProblemHandler},
    decode::ValueDecoder,
    registry::{DecoderRegistry, DecoderResolver},
    target::TargetType,
    token::TokenBuffer,
    value::{FromScalar, ScalarValue},
};
use std::{any::type_name, sync::LazyLock};

static RESOLVER: LazyLock<DecoderResolver> = LazyLock::new(DecoderResolver::new);

///
/// FromJsonScalar
///
/// Rust types with a registered scalar decoder. `Option<T>` receives the
/// decoded null; a bare type turns it into `Error::NullValue`.
///

pub trait FromJsonScalar: Sized + 'static {
    fn from_decoded(value: ScalarValue) -> Option<Self>;
}

impl FromJsonScalar for ScalarValue {
    fn from_decoded(value: ScalarValue) -> Option<Self> {
        Some(value)
    }
}

macro_rules! impl_from_json_scalar {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl FromJsonScalar for $ty {
                fn from_decoded(value: ScalarValue) -> Option<Self> {
                    <$ty as FromScalar>::from_scalar(value)
                }
            }

            impl FromJsonScalar for Option<$ty> {
                fn from_decoded(value: ScalarValue) -> Option<Self> {
                    match value {
                        ScalarValue::Null => Some(None),
                        value => <$ty as FromScalar>::from_scalar(value).map(Some),
                    }
                }
            }
        )*
    };
}

impl_from_json_scalar!(bool, i8, i16, char, i32, i64, f32, f64, BigInt, BigDecimal);

/// Decode a single JSON scalar into `T`.
pub fn from_json_str<T: FromJsonScalar>(json: &str, config: &DecodeConfig) -> Result<T, Error> {
    decode_typed(json, DecodeContext::new(config))
}

/// Like `from_json_str`, with a custom problem handler in place of the
/// configured recovery mode.
pub fn from_json_str_with_handler<T: FromJsonScalar>(
    json: &str,
    config: &DecodeConfig,
    handler: &dyn ProblemHandler,
) -> Result<T, Error> {
    decode_typed(json, DecodeContext::new(config).with_handler(handler))
}

/// Decode a JSON scalar for a target named at runtime (`"i32"`,
/// `"Option<i64>"`, `"BigDecimal"`, ...).
pub fn decode_named(
    type_name: &str,
    json: &str,
    config: &DecodeConfig,
) -> Result<ScalarValue, Error> {
    let decoder = RESOLVER
        .resolve(type_name)
        .ok_or_else(|| Error::Unsupported(type_name.to_string()))?;

    run(decoder, json, DecodeContext::new(config))
}

fn decode_typed<T: FromJsonScalar>(json: &str, ctx: DecodeContext<'_>) -> Result<T, Error> {
    let unsupported = || Error::Unsupported(type_name::<T>().to_string());

    let target = TargetType::of::<T>().ok_or_else(unsupported)?;
    let decoder = DecoderRegistry::global()
        .find(target)
        .ok_or_else(unsupported)?;

    let value = run(decoder, json, ctx)?;

    T::from_decoded(value).ok_or(Error::NullValue(target))
}

fn run(
    decoder: &dyn ValueDecoder,
    json: &str,
    ctx: DecodeContext<'_>,
) -> Result<ScalarValue, Error> {
    let mut buffer = TokenBuffer::from_json_str(json)?;

    Ok(decoder.decode_value(&mut buffer, &ctx)?)
}
