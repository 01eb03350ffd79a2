//! Token model and the cursor contract decoders read from.
//!
//! Numeric tokens carry their literal text so that arbitrary-precision
//! targets see the exact digits. Fixed-width accessors parse on demand.

mod buffer;


pub use buffer::TokenBuffer;

use crate::{
    error::{DecodeError, DecodeErrorKind},
    text::{self, TextParseError},
};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::fmt;

///
/// Token
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    FieldName(String),
    String(String),
    /// Integer literal text, e.g. `-42`.
    Int(String),
    /// Floating literal text, e.g. `1.5e3`.
    Float(String),
    True,
    False,
    Null,
}

impl Token {
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::String(text.into())
    }

    #[must_use]
    pub fn int(value: impl fmt::Display) -> Self {
        Self::Int(value.to_string())
    }

    #[must_use]
    pub fn float(value: impl fmt::Display) -> Self {
        Self::Float(value.to_string())
    }

    #[must_use]
    pub const fn shape(&self) -> TokenShape {
        match self {
            Self::StartObject => TokenShape::StartObject,
            Self::EndObject => TokenShape::EndObject,
            Self::StartArray => TokenShape::StartArray,
            Self::EndArray => TokenShape::EndArray,
            Self::FieldName(_) => TokenShape::FieldName,
            Self::String(_) => TokenShape::String,
            Self::Int(_) => TokenShape::Int,
            Self::Float(_) => TokenShape::Float,
            Self::True => TokenShape::True,
            Self::False => TokenShape::False,
            Self::Null => TokenShape::Null,
        }
    }

    /// Raw text for text-bearing tokens; the literal spelling for the rest.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::FieldName(text) | Self::String(text) | Self::Int(text) | Self::Float(text) => {
                text
            }
            Self::StartObject => "{",
            Self::EndObject => "}",
            Self::StartArray => "[",
            Self::EndArray => "]",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
        }
    }
}

///
/// TokenShape
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenShape {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    FieldName,
    String,
    Int,
    Float,
    True,
    False,
    Null,
}

impl TokenShape {
    /// Label used in "unexpected token" diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StartObject => "Object",
            Self::EndObject => "end-of-Object",
            Self::StartArray => "Array",
            Self::EndArray => "end-of-Array",
            Self::FieldName => "field name",
            Self::String => "String",
            Self::Int => "Integer",
            Self::Float => "Floating-point",
            Self::True | Self::False => "Boolean",
            Self::Null => "Null",
        }
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

impl fmt::Display for TokenShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// NumberType
///
/// Narrowest natural representation of the current numeric token.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NumberType {
    Int,
    Long,
    BigInteger,
    Double,
}

///
/// TokenCursor
///
/// Read access to a token stream positioned on the value being decoded.
/// Implementors supply the three required methods; the numeric accessors
/// are derived from the current token's literal text.
///
/// Accessor errors carry no target; decoders attach one.
///

pub trait TokenCursor {
    /// Shape of the current token; `None` at end of input.
    fn current_shape(&self) -> Option<TokenShape>;

    /// Raw text of the current token.
    fn text(&self) -> Option<&str>;

    /// Advance to the next token and return its shape.
    fn next_token(&mut self) -> Result<Option<TokenShape>, DecodeError>;

    /// Fast-path query: does the current token already have this shape?
    fn has_shape(&self, shape: TokenShape) -> bool {
        self.current_shape() == Some(shape)
    }

    fn number_type(&self) -> Option<NumberType> {
        match self.current_shape()? {
            TokenShape::Int => {
                let text = self.text()?;
                Some(match text::parse_wide_integer(text) {
                    Ok(value) if i32::try_from(value).is_ok() => NumberType::Int,
                    Ok(_) => NumberType::Long,
                    Err(_) => NumberType::BigInteger,
                })
            }
            TokenShape::Float => Some(NumberType::Double),
            _ => None,
        }
    }

    /// 8-bit value; accepts -128..=255 so unsigned bytes survive.
    #[allow(clippy::cast_possible_truncation)]
    fn i8_value(&self) -> Result<i8, DecodeError> {
        let value = bounded_integer(self, -128, 255, "i8")?;

        Ok(value as i8)
    }

    fn i16_value(&self) -> Result<i16, DecodeError> {
        let value = bounded_integer(self, i16::MIN.into(), i16::MAX.into(), "i16")?;

        Ok(i16::try_from(value).unwrap_or_default())
    }

    fn i32_value(&self) -> Result<i32, DecodeError> {
        let value = bounded_integer(self, i32::MIN.into(), i32::MAX.into(), "i32")?;

        Ok(i32::try_from(value).unwrap_or_default())
    }

    fn i64_value(&self) -> Result<i64, DecodeError> {
        bounded_integer(self, i64::MIN, i64::MAX, "i64")
    }

    fn f32_value(&self) -> Result<f32, DecodeError> {
        let text = numeric_text(self)?;

        text.parse::<f32>().map_err(|_| malformed_number(text))
    }

    fn f64_value(&self) -> Result<f64, DecodeError> {
        let text = numeric_text(self)?;

        text.parse::<f64>().map_err(|_| malformed_number(text))
    }

    fn decimal_value(&self) -> Result<BigDecimal, DecodeError> {
        let text = numeric_text(self)?;

        text::parse_decimal_strict(text).map_err(|_| malformed_number(text))
    }

    /// Arbitrary-precision integer; floating tokens are truncated exactly.
    fn big_integer_value(&self) -> Result<BigInt, DecodeError> {
        let text = numeric_text(self)?;

        if self.has_shape(TokenShape::Int) {
            return text::parse_big_integer_strict(text).map_err(|_| malformed_number(text));
        }

        truncated_float(text, "BigInt")
    }

    /// True when the current floating token is NaN.
    fn is_nan(&self) -> bool {
        self.has_shape(TokenShape::Float) && self.f64_value().is_ok_and(f64::is_nan)
    }
}

/// Integer view of the current numeric token, bounded to `[min, max]`.
/// Floating tokens are truncated toward zero first.
fn bounded_integer<C: TokenCursor + ?Sized>(
    cursor: &C,
    min: i64,
    max: i64,
    type_name: &str,
) -> Result<i64, DecodeError> {
    let text = numeric_text(cursor)?;

    let value = if cursor.has_shape(TokenShape::Int) {
        text::parse_wide_integer(text).map_err(|err| match err {
            TextParseError::Overflow => out_of_range(text, type_name),
            TextParseError::Invalid => malformed_number(text),
        })?
    } else {
        truncated_float(text, type_name)?
            .to_i64()
            .ok_or_else(|| out_of_range(text, type_name))?
    };

    if value < min || value > max {
        return Err(out_of_range(text, type_name));
    }

    Ok(value)
}

fn truncated_float(text: &str, type_name: &str) -> Result<BigInt, DecodeError> {
    text::truncate_decimal(text).map_err(|err| match err {
        TextParseError::Overflow => out_of_range(text, type_name),
        TextParseError::Invalid => malformed_number(text),
    })
}

fn numeric_text<C: TokenCursor + ?Sized>(cursor: &C) -> Result<&str, DecodeError> {
    match cursor.current_shape() {
        Some(shape) if shape.is_numeric() => cursor.text().ok_or_else(|| {
            DecodeError::new(
                DecodeErrorKind::InternalInvariantViolation,
                None,
                "numeric token without text",
            )
        }),
        Some(shape) => Err(DecodeError::new(
            DecodeErrorKind::ShapeMismatch,
            None,
            format!("Current token ({shape}) not numeric, cannot use numeric value accessors"),
        )),
        None => Err(DecodeError::new(
            DecodeErrorKind::ShapeMismatch,
            None,
            "No current token, cannot use numeric value accessors",
        )),
    }
}

fn out_of_range(text: &str, type_name: &str) -> DecodeError {
    DecodeError::new(
        DecodeErrorKind::RangeOverflow,
        None,
        format!("Numeric value ({text}) out of range of {type_name}"),
    )
    .with_literal(text)
}

fn malformed_number(text: &str) -> DecodeError {
    DecodeError::new(
        DecodeErrorKind::InvalidLiteral,
        None,
        format!("Malformed numeric token ({text})"),
    )
    .with_literal(text)
}
