use crate::{
    coercion::InputShape,
    context::DecodeContext,
    decode::{
        Coerced, DecoderSpec, ScalarDecoder, StringInput, coerce, decode_from_array,
        decode_null, prepare_string, report, unexpected,
    },
    error::{DecodeError, DecodeErrorKind},
    target::TargetType,
    token::{TokenCursor, TokenShape},
};
use scalarbind_primitives::ScalarKind;

///
/// CharDecoder
///
/// Decodes a single UTF-16 code unit. Strings pass the string coercion
/// policy like any other scalar and must be exactly one unit long after
/// trimming; integer codes need scalar coercion to be enabled.
///

#[derive(Debug)]
pub struct CharDecoder {
    spec: DecoderSpec<char>,
}

impl CharDecoder {
    #[must_use]
    pub const fn primitive() -> Self {
        Self {
            spec: DecoderSpec::new(
                TargetType::primitive(ScalarKind::Char),
                Some('\0'),
                Some('\0'),
            ),
        }
    }

    #[must_use]
    pub const fn wrapper() -> Self {
        Self {
            spec: DecoderSpec::new(TargetType::wrapper(ScalarKind::Char), None, Some('\0')),
        }
    }

    fn decode_code(
        &self,
        cursor: &dyn TokenCursor,
        ctx: &DecodeContext<'_>,
    ) -> Result<Option<char>, DecodeError> {
        let spec = &self.spec;
        let literal = cursor.text().unwrap_or_default();

        let code = match cursor.i64_value() {
            Ok(code) if (0..=0xFFFF).contains(&code) => code,
            _ => {
                let error = DecodeError::shape_mismatch(
                    spec.target,
                    format!(
                        "Cannot decode value of type `{}` from Integer value ({literal}): not a 16-bit code unit",
                        spec.target
                    ),
                )
                .with_literal(literal);

                return report(spec, ctx, error);
            }
        };

        match u32::try_from(code).ok().and_then(char::from_u32) {
            Some(c) => Ok(Some(c)),
            None => {
                let error = DecodeError::new(
                    DecodeErrorKind::InvalidLiteral,
                    Some(spec.target),
                    format!(
                        "Cannot decode value of type `{}` from Integer value ({literal}): surrogate code unit",
                        spec.target
                    ),
                )
                .with_literal(literal);

                report(spec, ctx, error)
            }
        }
    }
}

impl ScalarDecoder for CharDecoder {
    type Output = char;

    fn spec(&self) -> &DecoderSpec<char> {
        &self.spec
    }

    fn decode(
        &self,
        cursor: &mut dyn TokenCursor,
        ctx: &DecodeContext<'_>,
    ) -> Result<Option<char>, DecodeError> {
        let spec = &self.spec;

        match cursor.current_shape() {
            Some(TokenShape::String) => {
                let raw = cursor.text().unwrap_or_default();
                match prepare_string(spec, ctx, raw)? {
                    StringInput::Resolved(value) => Ok(value),
                    StringInput::Literal(text) => match single_code_unit(text) {
                        Some(c) => Ok(Some(c)),
                        None => {
                            let error = DecodeError::invalid_literal(
                                spec.target,
                                text,
                                "expected either Integer value code or 1-character String",
                            );
                            report(spec, ctx, error)
                        }
                    },
                }
            }
            Some(TokenShape::Int) => {
                let literal = cursor.text().unwrap_or_default();
                match coerce(spec, ctx, InputShape::IntegerForCharTarget, literal)? {
                    Coerced::Value(value) => Ok(value),
                    Coerced::Proceed => self.decode_code(cursor, ctx),
                }
            }
            Some(TokenShape::Null) => decode_null(spec, ctx),
            Some(TokenShape::StartArray) => decode_from_array(self, cursor, ctx),
            shape => unexpected(spec, ctx, shape),
        }
    }
}

fn single_code_unit(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let c = chars.next()?;

    (chars.next().is_none() && c.len_utf16() == 1).then_some(c)
}
