use crate::{
    coercion::InputShape,
    context::DecodeContext,
    decode::{
        Coerced, DecoderSpec, ScalarDecoder, StringInput, coerce, decode_from_array,
        decode_null, prepare_string, report, unexpected,
    },
    error::DecodeError,
    target::TargetType,
    text,
    token::{TokenCursor, TokenShape},
};
use scalarbind_primitives::ScalarKind;

///
/// BooleanDecoder
///

#[derive(Debug)]
pub struct BooleanDecoder {
    spec: DecoderSpec<bool>,
}

impl BooleanDecoder {
    #[must_use]
    pub const fn primitive() -> Self {
        Self {
            spec: DecoderSpec::new(
                TargetType::primitive(ScalarKind::Bool),
                Some(false),
                Some(false),
            ),
        }
    }

    #[must_use]
    pub const fn wrapper() -> Self {
        Self {
            spec: DecoderSpec::new(TargetType::wrapper(ScalarKind::Bool), None, Some(false)),
        }
    }
}

impl ScalarDecoder for BooleanDecoder {
    type Output = bool;

    fn spec(&self) -> &DecoderSpec<bool> {
        &self.spec
    }

    fn decode(
        &self,
        cursor: &mut dyn TokenCursor,
        ctx: &DecodeContext<'_>,
    ) -> Result<Option<bool>, DecodeError> {
        let spec = &self.spec;

        match cursor.current_shape() {
            Some(TokenShape::True) => Ok(Some(true)),
            Some(TokenShape::False) => Ok(Some(false)),
            Some(TokenShape::Int) => {
                let literal = cursor.text().unwrap_or_default();
                match coerce(spec, ctx, InputShape::IntegerForBooleanTarget, literal)? {
                    Coerced::Value(value) => Ok(value),
                    // zero is false, anything else (including overflow) is true
                    Coerced::Proceed => Ok(Some(!cursor.i64_value().is_ok_and(|v| v == 0))),
                }
            }
            Some(TokenShape::String) => {
                let raw = cursor.text().unwrap_or_default();
                match prepare_string(spec, ctx, raw)? {
                    StringInput::Resolved(value) => Ok(value),
                    StringInput::Literal(text) if text::is_true(text) => Ok(Some(true)),
                    StringInput::Literal(text) if text::is_false(text) => Ok(Some(false)),
                    StringInput::Literal(text) => {
                        let error = DecodeError::invalid_literal(
                            spec.target,
                            text,
                            "only \"true\" or \"false\" recognized",
                        );
                        report(spec, ctx, error)
                    }
                }
            }
            Some(TokenShape::Null) => decode_null(spec, ctx),
            Some(TokenShape::StartArray) => decode_from_array(self, cursor, ctx),
            shape => unexpected(spec, ctx, shape),
        }
    }
}
