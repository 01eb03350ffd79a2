//! Shape detection and strict literal parsing over trimmed text.
//!
//! Every helper here is a pure function. Callers trim first (`trim`), then run
//! the textual-null and IEEE-special checks, and only then strict-parse.


use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;
use std::{num::IntErrorKind, str::FromStr};

/// Literal marker decoded as null.
pub const TEXTUAL_NULL: &str = "null";

/// Largest power of ten `truncate_decimal` will expand.
pub const MAX_TRUNCATED_EXPONENT: i64 = 4_096;

///
/// TextParseError
///
/// Why a strict parse failed: syntactically invalid, or a valid literal
/// outside the target's representable range.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextParseError {
    Invalid,
    Overflow,
}

/// Trim leading and trailing control and space characters.
#[must_use]
pub fn trim(text: &str) -> &str {
    text.trim_matches(|c: char| c <= ' ')
}

/// True for non-empty text made only of control and space characters.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c <= ' ')
}

/// Optional sign followed by one or more ASCII digits.
#[must_use]
pub fn is_integer_literal(text: &str) -> bool {
    let digits = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);

    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Optional sign, mantissa with at least one digit, optional exponent.
#[must_use]
pub fn is_decimal_literal(text: &str) -> bool {
    let body = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(at) => (&body[..at], Some(&body[at + 1..])),
        None => (body, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return false;
    }

    exponent.is_none_or(is_integer_literal)
}

/// Decimal literal with a fraction or exponent, e.g. `1.0` or `2e3`.
#[must_use]
pub fn is_fractional_literal(text: &str) -> bool {
    is_decimal_literal(text) && !is_integer_literal(text)
}

#[must_use]
pub fn is_positive_infinity(text: &str) -> bool {
    text == "Infinity" || text == "INF"
}

#[must_use]
pub fn is_negative_infinity(text: &str) -> bool {
    text == "-Infinity" || text == "-INF"
}

#[must_use]
pub fn is_nan(text: &str) -> bool {
    text == "NaN"
}

/// Value of an IEEE special literal, if `text` is one.
#[must_use]
pub fn ieee_special(text: &str) -> Option<f64> {
    if is_positive_infinity(text) {
        Some(f64::INFINITY)
    } else if is_negative_infinity(text) {
        Some(f64::NEG_INFINITY)
    } else if is_nan(text) {
        Some(f64::NAN)
    } else {
        None
    }
}

#[must_use]
pub fn is_textual_null(text: &str) -> bool {
    text == TEXTUAL_NULL
}

/// Accepted spellings of boolean `true`.
#[must_use]
pub fn is_true(text: &str) -> bool {
    matches!(text, "true" | "True" | "TRUE")
}

/// Accepted spellings of boolean `false`.
#[must_use]
pub fn is_false(text: &str) -> bool {
    matches!(text, "false" | "False" | "FALSE")
}

///
/// STRICT PARSING
///

/// Parse into the widest fixed integer; narrower targets range-check after.
pub fn parse_wide_integer(text: &str) -> Result<i64, TextParseError> {
    i64::from_str(text).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => TextParseError::Overflow,
        _ => TextParseError::Invalid,
    })
}

/// Byte literals admit -128..=255; values above 127 wrap to negative.
#[allow(clippy::cast_possible_truncation)]
pub fn parse_byte_strict(text: &str) -> Result<i8, TextParseError> {
    let wide = parse_wide_integer(text)?;
    if !(-128..=255).contains(&wide) {
        return Err(TextParseError::Overflow);
    }

    Ok(wide as i8)
}

pub fn parse_short_strict(text: &str) -> Result<i16, TextParseError> {
    let wide = parse_wide_integer(text)?;

    i16::try_from(wide).map_err(|_| TextParseError::Overflow)
}

pub fn parse_int_strict(text: &str) -> Result<i32, TextParseError> {
    let wide = parse_wide_integer(text)?;

    i32::try_from(wide).map_err(|_| TextParseError::Overflow)
}

pub fn parse_long_strict(text: &str) -> Result<i64, TextParseError> {
    parse_wide_integer(text)
}

pub fn parse_big_integer_strict(text: &str) -> Result<BigInt, TextParseError> {
    if !is_integer_literal(text) {
        return Err(TextParseError::Invalid);
    }

    let digits = text.strip_prefix('+').unwrap_or(text);
    BigInt::from_str(digits).map_err(|_| TextParseError::Invalid)
}

pub fn parse_float_strict(text: &str) -> Result<f32, TextParseError> {
    if !is_decimal_literal(text) {
        return Err(TextParseError::Invalid);
    }

    f32::from_str(text).map_err(|_| TextParseError::Invalid)
}

pub fn parse_double_strict(text: &str) -> Result<f64, TextParseError> {
    if !is_decimal_literal(text) {
        return Err(TextParseError::Invalid);
    }

    f64::from_str(text).map_err(|_| TextParseError::Invalid)
}

/// Parse an exact, arbitrary-precision decimal.
pub fn parse_decimal_strict(text: &str) -> Result<BigDecimal, TextParseError> {
    if !is_decimal_literal(text) {
        return Err(TextParseError::Invalid);
    }

    let unsigned = text.strip_prefix('+').unwrap_or(text);

    BigDecimal::from_str(unsigned).map_err(|_| TextParseError::Invalid)
}

/// Exact integral part of a decimal literal, truncated toward zero.
///
/// Literals scaled past `10^MAX_TRUNCATED_EXPONENT` report `Overflow`
/// rather than materializing the digits.
pub fn truncate_decimal(text: &str) -> Result<BigInt, TextParseError> {
    let decimal = parse_decimal_strict(text)?;
    let (digits, scale) = decimal.as_bigint_and_exponent();

    if digits.is_zero() {
        return Ok(BigInt::zero());
    }
    if scale < -MAX_TRUNCATED_EXPONENT {
        return Err(TextParseError::Overflow);
    }
    if scale > 0 && scale.unsigned_abs() > digit_count(&digits) {
        return Ok(BigInt::zero());
    }

    Ok(decimal.with_scale(0).into_bigint_and_exponent().0)
}

fn digit_count(value: &BigInt) -> u64 {
    u64::try_from(value.magnitude().to_string().len()).unwrap_or(u64::MAX)
}
