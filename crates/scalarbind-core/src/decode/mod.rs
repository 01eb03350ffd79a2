//! Scalar decoder family.
//!
//! Every decoder holds an immutable `DecoderSpec` and shares the helpers in
//! this module for the slow paths (string coercion, null tokens, array
//! unwrapping, error reporting). Shape mismatches always go through
//! `coercion::decide_with_source`.

mod big;
mod boolean;
mod character;
mod floating;
mod integral;
mod number;

#[cfg(test)]
mod tests;

pub use big::{BigDecimalDecoder, BigIntegerDecoder};
pub use boolean::BooleanDecoder;
pub use character::CharDecoder;
pub use floating::{FloatDecoder, FloatValue};
pub use integral::{IntegralDecoder, IntegralValue};
pub use number::NumberDecoder;

use crate::{
    coercion::{self, CoercionAction, CoercionDecision, DecisionSource, InputShape},
    context::{DecodeContext, Recovery},
    error::{DecodeError, DecodeErrorKind},
    target::TargetType,
    text::{self, TextParseError},
    token::{TokenCursor, TokenShape},
    value::{FromScalar, ScalarValue},
};
use num_bigint::BigInt;
use scalarbind_primitives::LogicalType;
use std::sync::LazyLock;

///
/// DECODER SINGLETONS
///

pub static BOOL: BooleanDecoder = BooleanDecoder::primitive();
pub static BOOL_WRAPPER: BooleanDecoder = BooleanDecoder::wrapper();
pub static BYTE: IntegralDecoder<i8> = IntegralDecoder::primitive();
pub static BYTE_WRAPPER: IntegralDecoder<i8> = IntegralDecoder::wrapper();
pub static SHORT: IntegralDecoder<i16> = IntegralDecoder::primitive();
pub static SHORT_WRAPPER: IntegralDecoder<i16> = IntegralDecoder::wrapper();
pub static CHAR: CharDecoder = CharDecoder::primitive();
pub static CHAR_WRAPPER: CharDecoder = CharDecoder::wrapper();
pub static INT: IntegralDecoder<i32> = IntegralDecoder::primitive();
pub static INT_WRAPPER: IntegralDecoder<i32> = IntegralDecoder::wrapper();
pub static LONG: IntegralDecoder<i64> = IntegralDecoder::primitive();
pub static LONG_WRAPPER: IntegralDecoder<i64> = IntegralDecoder::wrapper();
pub static FLOAT: FloatDecoder<f32> = FloatDecoder::primitive();
pub static FLOAT_WRAPPER: FloatDecoder<f32> = FloatDecoder::wrapper();
pub static DOUBLE: FloatDecoder<f64> = FloatDecoder::primitive();
pub static DOUBLE_WRAPPER: FloatDecoder<f64> = FloatDecoder::wrapper();
pub static BIG_INTEGER: LazyLock<BigIntegerDecoder> = LazyLock::new(BigIntegerDecoder::new);
pub static BIG_DECIMAL: LazyLock<BigDecimalDecoder> = LazyLock::new(BigDecimalDecoder::new);
pub static NUMBER: NumberDecoder = NumberDecoder::new();

///
/// AccessPattern
///
/// How null-substitute resolution behaves for one decoder.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccessPattern {
    /// Wrapper whose null substitute is absent.
    AlwaysNull,
    /// Fixed non-null substitute.
    Constant,
    /// Primitive target; a null must be checked against the config per call.
    Dynamic,
}

///
/// DecoderSpec
///
/// Immutable per-decoder state: target identity plus null and empty
/// substitutes. The access pattern is derived once, here.
///

#[derive(Clone, Debug, PartialEq)]
pub struct DecoderSpec<T> {
    pub target: TargetType,
    pub null_value: Option<T>,
    pub empty_value: Option<T>,
    pub access: AccessPattern,
}

impl<T> DecoderSpec<T> {
    #[must_use]
    pub const fn new(target: TargetType, null_value: Option<T>, empty_value: Option<T>) -> Self {
        let access = if target.primitive {
            AccessPattern::Dynamic
        } else if null_value.is_none() {
            AccessPattern::AlwaysNull
        } else {
            AccessPattern::Constant
        };

        Self {
            target,
            null_value,
            empty_value,
            access,
        }
    }

    #[must_use]
    pub const fn logical_type(&self) -> LogicalType {
        self.target.logical_type()
    }

    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        self.target.primitive
    }

    /// Value of an IEEE special literal, for targets that admit one.
    #[must_use]
    pub fn ieee_special(&self, text: &str) -> Option<f64> {
        if self.target.kind.accepts_ieee_specials() {
            text::ieee_special(text)
        } else {
            None
        }
    }
}

///
/// ScalarDecoder
///
/// One stateless implementation per target type. `None` is the decoded
/// null; primitive decoders only produce it when a problem handler asks.
///

pub trait ScalarDecoder: Send + Sync {
    type Output: Clone + FromScalar;

    fn spec(&self) -> &DecoderSpec<Self::Output>;

    fn decode(
        &self,
        cursor: &mut dyn TokenCursor,
        ctx: &DecodeContext<'_>,
    ) -> Result<Option<Self::Output>, DecodeError>;

    /// Scalars never carry an embedded type id, so this matches `decode`.
    fn decode_with_type(
        &self,
        cursor: &mut dyn TokenCursor,
        ctx: &DecodeContext<'_>,
    ) -> Result<Option<Self::Output>, DecodeError> {
        self.decode(cursor, ctx)
    }

    /// Null substitute, re-validated against the config for primitives.
    fn null_value(&self, ctx: &DecodeContext<'_>) -> Result<Option<Self::Output>, DecodeError> {
        decode_null(self.spec(), ctx)
    }

    fn empty_value(&self) -> Option<Self::Output> {
        self.spec().empty_value.clone()
    }
}

///
/// ValueDecoder
///
/// Type-erased view of a `ScalarDecoder`, stored by the registry.
///

pub trait ValueDecoder: Send + Sync {
    fn target(&self) -> TargetType;

    fn logical_type(&self) -> LogicalType;

    fn null_access_pattern(&self) -> AccessPattern;

    fn decode_value(
        &self,
        cursor: &mut dyn TokenCursor,
        ctx: &DecodeContext<'_>,
    ) -> Result<ScalarValue, DecodeError>;
}

impl<D> ValueDecoder for D
where
    D: ScalarDecoder,
    D::Output: Into<ScalarValue>,
{
    fn target(&self) -> TargetType {
        self.spec().target
    }

    fn logical_type(&self) -> LogicalType {
        self.spec().logical_type()
    }

    fn null_access_pattern(&self) -> AccessPattern {
        self.spec().access
    }

    fn decode_value(
        &self,
        cursor: &mut dyn TokenCursor,
        ctx: &DecodeContext<'_>,
    ) -> Result<ScalarValue, DecodeError> {
        self.decode(cursor, ctx).map(ScalarValue::from)
    }
}

///
/// SHARED DECODE HELPERS
///

/// Outcome of consulting the coercion policy for one shape.
pub(crate) enum Coerced<T> {
    Value(Option<T>),
    Proceed,
}

/// String token after the empty/blank/textual-null checks.
pub(crate) enum StringInput<'t, T> {
    Resolved(Option<T>),
    Literal(&'t str),
}

/// Offer a failure to the error channel and apply its answer.
pub(crate) fn report<T: Clone + FromScalar>(
    spec: &DecoderSpec<T>,
    ctx: &DecodeContext<'_>,
    error: DecodeError,
) -> Result<Option<T>, DecodeError> {
    let value = match ctx.recover(&error) {
        Recovery::Propagate => return Err(error),
        Recovery::UseNull | Recovery::Replace(ScalarValue::Null) => spec.null_value.clone(),
        Recovery::UseEmpty => spec.empty_value.clone(),
        Recovery::Replace(replacement) => match T::from_scalar(replacement) {
            Some(value) => Some(value),
            None => return Err(error),
        },
    };

    log::debug!(
        "recovered {} while decoding `{}`: {}",
        error.kind,
        spec.target,
        error.message
    );

    Ok(value)
}

/// Wrap a cursor accessor result, reporting its failure against the target.
pub(crate) fn accept<T: Clone + FromScalar>(
    spec: &DecoderSpec<T>,
    ctx: &DecodeContext<'_>,
    result: Result<T, DecodeError>,
) -> Result<Option<T>, DecodeError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) => report(spec, ctx, err.for_target(spec.target)),
    }
}

/// Consult the coercion policy for `shape` and apply non-`Convert` actions.
pub(crate) fn coerce<T: Clone + FromScalar>(
    spec: &DecoderSpec<T>,
    ctx: &DecodeContext<'_>,
    shape: InputShape,
    literal: &str,
) -> Result<Coerced<T>, DecodeError> {
    let decision = coercion::decide_with_source(
        shape,
        spec.logical_type(),
        spec.is_primitive(),
        ctx.config(),
    );

    match decision.action {
        CoercionAction::Convert => Ok(Coerced::Proceed),
        CoercionAction::SubstituteNull => Ok(Coerced::Value(spec.null_value.clone())),
        CoercionAction::SubstituteEmpty => Ok(Coerced::Value(spec.empty_value.clone())),
        CoercionAction::Fail => {
            let error = coercion_failure(spec.target, shape, decision, literal);
            report(spec, ctx, error).map(Coerced::Value)
        }
    }
}

fn coercion_failure(
    target: TargetType,
    shape: InputShape,
    decision: CoercionDecision,
    literal: &str,
) -> DecodeError {
    let mut message = format!("Cannot coerce {} to `{target}`", shape.describe());
    match decision.source {
        DecisionSource::Feature(feature) => {
            message.push_str(&format!(" (refused by `{}`)", feature.config_key()));
        }
        DecisionSource::Rule => message.push_str(" (refused by coercion rule)"),
        DecisionSource::Default => {}
    }

    DecodeError::new(decision.failure_kind(shape), Some(target), message).with_literal(literal)
}

/// Run the empty, blank, non-numeric and textual-null checks on a string token.
pub(crate) fn prepare_string<'t, T: Clone + FromScalar>(
    spec: &DecoderSpec<T>,
    ctx: &DecodeContext<'_>,
    raw: &'t str,
) -> Result<StringInput<'t, T>, DecodeError> {
    let shape = if raw.is_empty() {
        InputShape::EmptyString
    } else if text::is_blank(raw) {
        InputShape::BlankString
    } else {
        InputShape::NonNumericString
    };

    if let Coerced::Value(value) = coerce(spec, ctx, shape, raw)? {
        return Ok(StringInput::Resolved(value));
    }

    let trimmed = text::trim(raw);
    if text::is_textual_null(trimmed) {
        return match coerce(spec, ctx, InputShape::TextualNull, trimmed)? {
            Coerced::Value(value) => Ok(StringInput::Resolved(value)),
            Coerced::Proceed => Ok(StringInput::Resolved(spec.null_value.clone())),
        };
    }

    Ok(StringInput::Literal(trimmed))
}

/// Report a strict-parse failure for `text`.
pub(crate) fn literal_error(target: TargetType, text: &str, err: TextParseError) -> DecodeError {
    let label = target.kind.label();

    match err {
        TextParseError::Invalid => {
            DecodeError::invalid_literal(target, text, &format!("not a valid {label} value"))
        }
        TextParseError::Overflow => {
            DecodeError::range_overflow(target, text, &format!("value out of range of {label}"))
        }
    }
}

/// Strict-parse `text`, reporting failures through the error channel.
pub(crate) fn parse_literal<T: Clone + FromScalar>(
    spec: &DecoderSpec<T>,
    ctx: &DecodeContext<'_>,
    text: &str,
    parse: impl FnOnce(&str) -> Result<T, TextParseError>,
) -> Result<Option<T>, DecodeError> {
    match parse(text) {
        Ok(value) => Ok(Some(value)),
        Err(err) => report(spec, ctx, literal_error(spec.target, text, err)),
    }
}

/// Fractional text (`"7.9"`, `"1e3"`) bound for an integer target. The
/// float-to-int policy decides first; accepted values truncate toward zero
/// and `narrow` range-checks the whole part.
pub(crate) fn parse_fractional<T: Clone + FromScalar>(
    spec: &DecoderSpec<T>,
    ctx: &DecodeContext<'_>,
    text: &str,
    narrow: impl FnOnce(BigInt) -> Result<T, TextParseError>,
) -> Result<Option<T>, DecodeError> {
    match coerce(spec, ctx, InputShape::FloatForIntegerTarget, text)? {
        Coerced::Value(value) => Ok(value),
        Coerced::Proceed => parse_literal(spec, ctx, text, |literal| {
            text::truncate_decimal(literal).and_then(narrow)
        }),
    }
}

/// Null token handling, driven by the spec's access pattern.
pub(crate) fn decode_null<T: Clone + FromScalar>(
    spec: &DecoderSpec<T>,
    ctx: &DecodeContext<'_>,
) -> Result<Option<T>, DecodeError> {
    match spec.access {
        AccessPattern::AlwaysNull => Ok(None),
        AccessPattern::Constant => Ok(spec.null_value.clone()),
        AccessPattern::Dynamic if ctx.config().fail_on_null_for_primitives => {
            let error = DecodeError::configuration_rejected(
                spec.target,
                format!(
                    "Cannot map `null` into type `{}` (set `fail_on_null_for_primitives` to false to allow)",
                    spec.target
                ),
            )
            .with_literal(text::TEXTUAL_NULL);

            report(spec, ctx, error)
        }
        AccessPattern::Dynamic => Ok(spec.null_value.clone()),
    }
}

/// Report the current token as undecodable for this target.
pub(crate) fn unexpected<T: Clone + FromScalar>(
    spec: &DecoderSpec<T>,
    ctx: &DecodeContext<'_>,
    shape: Option<TokenShape>,
) -> Result<Option<T>, DecodeError> {
    let label = shape.map_or("end-of-input", TokenShape::label);

    report(spec, ctx, DecodeError::unexpected_token(spec.target, label))
}

/// Start-of-array handling: empty-array coercion, then single-value unwrap
/// when enabled. Leaves the cursor on the closing `]`, including when a
/// failure is recovered.
pub(crate) fn decode_from_array<D: ScalarDecoder + ?Sized>(
    decoder: &D,
    cursor: &mut dyn TokenCursor,
    ctx: &DecodeContext<'_>,
) -> Result<Option<D::Output>, DecodeError> {
    let spec = decoder.spec();
    let next = cursor.next_token()?;

    if next == Some(TokenShape::EndArray) {
        return match coerce(spec, ctx, InputShape::EmptyArray, "[]")? {
            Coerced::Value(value) => Ok(value),
            Coerced::Proceed => Ok(spec.null_value.clone()),
        };
    }

    if !ctx.config().unwrap_single_value_arrays {
        let recovered = unexpected(spec, ctx, Some(TokenShape::StartArray))?;
        skip_to_array_end(cursor)?;

        return Ok(recovered);
    }

    if next == Some(TokenShape::StartArray) {
        let error = DecodeError::shape_mismatch(
            spec.target,
            format!(
                "Cannot decode value of type `{}` from nested Array: only a single wrapper Array is allowed with `unwrap_single_value_arrays`",
                spec.target
            ),
        );
        let recovered = report(spec, ctx, error)?;
        skip_to_array_end(cursor)?;

        return Ok(recovered);
    }

    let value = decoder.decode(cursor, ctx)?;

    if cursor.next_token()? == Some(TokenShape::EndArray) {
        return Ok(value);
    }

    let error = DecodeError::shape_mismatch(
        spec.target,
        format!(
            "Attempted to unwrap a single `{}` value from an Array with more than one value",
            spec.target
        ),
    );
    let recovered = report(spec, ctx, error)?;
    skip_to_array_end(cursor)?;

    Ok(recovered)
}

/// Advance from the current token to the `]` closing the enclosing array.
fn skip_to_array_end(cursor: &mut dyn TokenCursor) -> Result<(), DecodeError> {
    let mut depth = 0usize;
    let mut shape = cursor.current_shape();

    loop {
        match shape {
            Some(TokenShape::EndArray) if depth == 0 => return Ok(()),
            Some(TokenShape::StartArray | TokenShape::StartObject) => depth += 1,
            Some(TokenShape::EndArray | TokenShape::EndObject) => depth = depth.saturating_sub(1),
            Some(_) => {}
            None => {
                return Err(DecodeError::new(
                    DecodeErrorKind::ShapeMismatch,
                    None,
                    "Unexpected end-of-input inside Array",
                ));
            }
        }

        shape = cursor.next_token()?;
    }
}
