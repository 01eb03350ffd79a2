use crate::{
    coercion::InputShape,
    context::DecodeContext,
    decode::{
        Coerced, DecoderSpec, ScalarDecoder, StringInput, accept, coerce, decode_from_array,
        decode_null, parse_fractional, parse_literal, prepare_string, unexpected,
    },
    error::DecodeError,
    target::TargetType,
    text::{self, TextParseError},
    token::{TokenCursor, TokenShape},
    value::FromScalar,
};
use scalarbind_primitives::ScalarKind;

///
/// IntegralValue
///
/// Fixed-width integer decoded by `IntegralDecoder`. Narrow widths parse a
/// wider intermediate first, then range-check.
///

pub trait IntegralValue: Copy + FromScalar + Send + Sync + 'static {
    const KIND: ScalarKind;
    const ZERO: Self;

    /// Read the current numeric token, truncating floating tokens.
    fn read(cursor: &dyn TokenCursor) -> Result<Self, DecodeError>;

    fn parse(text: &str) -> Result<Self, TextParseError>;
}

macro_rules! impl_integral_value {
    ( $( $ty:ty => $kind:ident, $read:ident, $parse:path );* $(;)? ) => {
        $(
            impl IntegralValue for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;
                const ZERO: Self = 0;

                fn read(cursor: &dyn TokenCursor) -> Result<Self, DecodeError> {
                    cursor.$read()
                }

                fn parse(text: &str) -> Result<Self, TextParseError> {
                    $parse(text)
                }
            }
        )*
    };
}

impl_integral_value! {
    i8 => Byte, i8_value, text::parse_byte_strict;
    i16 => Short, i16_value, text::parse_short_strict;
    i32 => Int, i32_value, text::parse_int_strict;
    i64 => Long, i64_value, text::parse_long_strict;
}

///
/// IntegralDecoder
///

#[derive(Debug)]
pub struct IntegralDecoder<T: IntegralValue> {
    spec: DecoderSpec<T>,
}

impl<T: IntegralValue> IntegralDecoder<T> {
    /// Non-nullable form; null decodes to zero unless the config forbids it.
    #[must_use]
    pub const fn primitive() -> Self {
        Self {
            spec: DecoderSpec::new(
                TargetType::primitive(T::KIND),
                Some(T::ZERO),
                Some(T::ZERO),
            ),
        }
    }

    #[must_use]
    pub const fn wrapper() -> Self {
        Self {
            spec: DecoderSpec::new(TargetType::wrapper(T::KIND), None, Some(T::ZERO)),
        }
    }
}

impl<T: IntegralValue> ScalarDecoder for IntegralDecoder<T> {
    type Output = T;

    fn spec(&self) -> &DecoderSpec<T> {
        &self.spec
    }

    fn decode(
        &self,
        cursor: &mut dyn TokenCursor,
        ctx: &DecodeContext<'_>,
    ) -> Result<Option<T>, DecodeError> {
        let spec = &self.spec;

        if cursor.has_shape(TokenShape::Int) {
            return accept(spec, ctx, T::read(cursor));
        }

        match cursor.current_shape() {
            Some(TokenShape::Float) => {
                let literal = cursor.text().unwrap_or_default();
                match coerce(spec, ctx, InputShape::FloatForIntegerTarget, literal)? {
                    Coerced::Value(value) => Ok(value),
                    Coerced::Proceed => accept(spec, ctx, T::read(cursor)),
                }
            }
            Some(TokenShape::String) => {
                let raw = cursor.text().unwrap_or_default();
                match prepare_string(spec, ctx, raw)? {
                    StringInput::Resolved(value) => Ok(value),
                    StringInput::Literal(text) if text::is_fractional_literal(text) => {
                        parse_fractional(spec, ctx, text, |whole| T::parse(&whole.to_string()))
                    }
                    StringInput::Literal(text) => parse_literal(spec, ctx, text, T::parse),
                }
            }
            Some(TokenShape::Null) => decode_null(spec, ctx),
            Some(TokenShape::StartArray) => decode_from_array(self, cursor, ctx),
            shape => unexpected(spec, ctx, shape),
        }
    }
}
