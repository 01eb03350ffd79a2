use crate::{
    coercion::InputShape,
    context::DecodeContext,
    decode::{
        Coerced, DecoderSpec, ScalarDecoder, StringInput, accept, coerce, decode_from_array,
        decode_null, parse_fractional, parse_literal, prepare_string, unexpected,
    },
    error::DecodeError,
    target::TargetType,
    text,
    token::{TokenCursor, TokenShape},
};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;
use scalarbind_primitives::ScalarKind;

///
/// BigIntegerDecoder
///
/// Arbitrary-precision integers. Wrapper only; floating tokens and
/// fractional strings truncate when the float-to-int rule allows it.
///

#[derive(Debug)]
pub struct BigIntegerDecoder {
    spec: DecoderSpec<BigInt>,
}

impl BigIntegerDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            spec: DecoderSpec::new(
                TargetType::wrapper(ScalarKind::BigInteger),
                None,
                Some(BigInt::default()),
            ),
        }
    }
}

impl Default for BigIntegerDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalarDecoder for BigIntegerDecoder {
    type Output = BigInt;

    fn spec(&self) -> &DecoderSpec<BigInt> {
        &self.spec
    }

    fn decode(
        &self,
        cursor: &mut dyn TokenCursor,
        ctx: &DecodeContext<'_>,
    ) -> Result<Option<BigInt>, DecodeError> {
        let spec = &self.spec;

        match cursor.current_shape() {
            Some(TokenShape::Int) => accept(spec, ctx, cursor.big_integer_value()),
            Some(TokenShape::Float) => {
                let literal = cursor.text().unwrap_or_default();
                match coerce(spec, ctx, InputShape::FloatForIntegerTarget, literal)? {
                    Coerced::Value(value) => Ok(value),
                    Coerced::Proceed => accept(spec, ctx, cursor.big_integer_value()),
                }
            }
            Some(TokenShape::String) => {
                let raw = cursor.text().unwrap_or_default();
                match prepare_string(spec, ctx, raw)? {
                    StringInput::Resolved(value) => Ok(value),
                    StringInput::Literal(text) if text::is_fractional_literal(text) => {
                        parse_fractional(spec, ctx, text, Ok)
                    }
                    StringInput::Literal(text) => {
                        parse_literal(spec, ctx, text, text::parse_big_integer_strict)
                    }
                }
            }
            Some(TokenShape::Null) => decode_null(spec, ctx),
            Some(TokenShape::StartArray) => decode_from_array(self, cursor, ctx),
            shape => unexpected(spec, ctx, shape),
        }
    }
}

///
/// BigDecimalDecoder
///

#[derive(Debug)]
pub struct BigDecimalDecoder {
    spec: DecoderSpec<BigDecimal>,
}

impl BigDecimalDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            spec: DecoderSpec::new(
                TargetType::wrapper(ScalarKind::BigDecimal),
                None,
                Some(BigDecimal::zero()),
            ),
        }
    }
}

impl Default for BigDecimalDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalarDecoder for BigDecimalDecoder {
    type Output = BigDecimal;

    fn spec(&self) -> &DecoderSpec<BigDecimal> {
        &self.spec
    }

    fn decode(
        &self,
        cursor: &mut dyn TokenCursor,
        ctx: &DecodeContext<'_>,
    ) -> Result<Option<BigDecimal>, DecodeError> {
        let spec = &self.spec;

        match cursor.current_shape() {
            Some(TokenShape::Int | TokenShape::Float) => accept(spec, ctx, cursor.decimal_value()),
            Some(TokenShape::String) => {
                let raw = cursor.text().unwrap_or_default();
                match prepare_string(spec, ctx, raw)? {
                    StringInput::Resolved(value) => Ok(value),
                    StringInput::Literal(text) => {
                        parse_literal(spec, ctx, text, text::parse_decimal_strict)
                    }
                }
            }
            Some(TokenShape::Null) => decode_null(spec, ctx),
            Some(TokenShape::StartArray) => decode_from_array(self, cursor, ctx),
            shape => unexpected(spec, ctx, shape),
        }
    }
}
