use crate::{
    context::DecodeContext,
    decode::{
        DecoderSpec, ScalarDecoder, StringInput, accept, decode_from_array, decode_null,
        parse_literal, prepare_string, unexpected,
    },
    error::DecodeError,
    target::TargetType,
    text::{self, TextParseError},
    token::{TokenCursor, TokenShape},
    value::FromScalar,
};
use scalarbind_primitives::ScalarKind;

///
/// FloatValue
///

pub trait FloatValue: Copy + FromScalar + Send + Sync + 'static {
    const KIND: ScalarKind;
    const ZERO: Self;

    fn read(cursor: &dyn TokenCursor) -> Result<Self, DecodeError>;

    fn parse(text: &str) -> Result<Self, TextParseError>;

    /// Narrow an IEEE special value to this width.
    fn from_special(value: f64) -> Self;
}

impl FloatValue for f32 {
    const KIND: ScalarKind = ScalarKind::Float;
    const ZERO: Self = 0.0;

    fn read(cursor: &dyn TokenCursor) -> Result<Self, DecodeError> {
        cursor.f32_value()
    }

    fn parse(text: &str) -> Result<Self, TextParseError> {
        text::parse_float_strict(text)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_special(value: f64) -> Self {
        value as Self
    }
}

impl FloatValue for f64 {
    const KIND: ScalarKind = ScalarKind::Double;
    const ZERO: Self = 0.0;

    fn read(cursor: &dyn TokenCursor) -> Result<Self, DecodeError> {
        cursor.f64_value()
    }

    fn parse(text: &str) -> Result<Self, TextParseError> {
        text::parse_double_strict(text)
    }

    fn from_special(value: f64) -> Self {
        value
    }
}

///
/// FloatDecoder
///

#[derive(Debug)]
pub struct FloatDecoder<T: FloatValue> {
    spec: DecoderSpec<T>,
}

impl<T: FloatValue> FloatDecoder<T> {
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

impl<T: FloatValue> ScalarDecoder for FloatDecoder<T> {
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

        if cursor.has_shape(TokenShape::Float) {
            return accept(spec, ctx, T::read(cursor));
        }

        match cursor.current_shape() {
            // integer tokens widen safely
            Some(TokenShape::Int) => accept(spec, ctx, T::read(cursor)),
            Some(TokenShape::String) => {
                let raw = cursor.text().unwrap_or_default();
                match prepare_string(spec, ctx, raw)? {
                    StringInput::Resolved(value) => Ok(value),
                    StringInput::Literal(text) => match spec.ieee_special(text) {
                        Some(special) => Ok(Some(T::from_special(special))),
                        None => parse_literal(spec, ctx, text, T::parse),
                    },
                }
            }
            Some(TokenShape::Null) => decode_null(spec, ctx),
            Some(TokenShape::StartArray) => decode_from_array(self, cursor, ctx),
            shape => unexpected(spec, ctx, shape),
        }
    }
}
