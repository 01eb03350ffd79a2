use crate::{
    config::DecodeConfig,
    context::DecodeContext,
    decode::{
        DecoderSpec, ScalarDecoder, StringInput, accept, decode_from_array, decode_null,
        parse_literal, prepare_string, unexpected,
    },
    error::DecodeError,
    target::TargetType,
    text::{self, TextParseError},
    token::{NumberType, TokenCursor, TokenShape},
    value::ScalarValue,
};
use scalarbind_primitives::ScalarKind;

///
/// NumberDecoder
///
/// "Any number" target. Picks the narrowest natural representation unless
/// the config asks for long, big-integer or big-decimal results.
///

#[derive(Debug)]
pub struct NumberDecoder {
    spec: DecoderSpec<ScalarValue>,
}

impl NumberDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            spec: DecoderSpec::new(TargetType::wrapper(ScalarKind::Number), None, None),
        }
    }
}

impl Default for NumberDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalarDecoder for NumberDecoder {
    type Output = ScalarValue;

    fn spec(&self) -> &DecoderSpec<ScalarValue> {
        &self.spec
    }

    fn decode(
        &self,
        cursor: &mut dyn TokenCursor,
        ctx: &DecodeContext<'_>,
    ) -> Result<Option<ScalarValue>, DecodeError> {
        let spec = &self.spec;
        let config = ctx.config();

        match cursor.current_shape() {
            Some(TokenShape::Int) => accept(spec, ctx, int_token_value(cursor, config)),
            Some(TokenShape::Float) => accept(spec, ctx, float_token_value(cursor, config)),
            Some(TokenShape::String) => {
                let raw = cursor.text().unwrap_or_default();
                match prepare_string(spec, ctx, raw)? {
                    StringInput::Resolved(value) => Ok(value),
                    StringInput::Literal(text) => match spec.ieee_special(text) {
                        Some(special) => Ok(Some(ScalarValue::Double(special))),
                        None => {
                            parse_literal(spec, ctx, text, |text| number_from_text(text, config))
                        }
                    },
                }
            }
            Some(TokenShape::Null) => decode_null(spec, ctx),
            Some(TokenShape::StartArray) => decode_from_array(self, cursor, ctx),
            shape => unexpected(spec, ctx, shape),
        }
    }
}

fn int_token_value(
    cursor: &dyn TokenCursor,
    config: &DecodeConfig,
) -> Result<ScalarValue, DecodeError> {
    if config.use_big_integer_for_ints {
        return cursor.big_integer_value().map(ScalarValue::BigInteger);
    }

    match cursor.number_type() {
        Some(NumberType::Int) if !config.use_long_for_ints => {
            cursor.i32_value().map(ScalarValue::Int)
        }
        Some(NumberType::Int | NumberType::Long) => cursor.i64_value().map(ScalarValue::Long),
        _ => cursor.big_integer_value().map(ScalarValue::BigInteger),
    }
}

fn float_token_value(
    cursor: &dyn TokenCursor,
    config: &DecodeConfig,
) -> Result<ScalarValue, DecodeError> {
    // NaN has no decimal form
    if config.use_big_decimal_for_floats && !cursor.is_nan() {
        return cursor.decimal_value().map(ScalarValue::BigDecimal);
    }

    cursor.f64_value().map(ScalarValue::Double)
}

fn number_from_text(text: &str, config: &DecodeConfig) -> Result<ScalarValue, TextParseError> {
    if text::is_integer_literal(text) {
        if config.use_big_integer_for_ints {
            return text::parse_big_integer_strict(text).map(ScalarValue::BigInteger);
        }

        return match text::parse_wide_integer(text) {
            Ok(wide) => match i32::try_from(wide) {
                Ok(narrow) if !config.use_long_for_ints => Ok(ScalarValue::Int(narrow)),
                _ => Ok(ScalarValue::Long(wide)),
            },
            Err(TextParseError::Overflow) => {
                text::parse_big_integer_strict(text).map(ScalarValue::BigInteger)
            }
            Err(TextParseError::Invalid) => Err(TextParseError::Invalid),
        };
    }

    if config.use_big_decimal_for_floats {
        return text::parse_decimal_strict(text).map(ScalarValue::BigDecimal);
    }

    text::parse_double_strict(text).map(ScalarValue::Double)
}
