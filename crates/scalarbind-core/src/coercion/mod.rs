//! Coercion policy.
//!
//! Maps (observed input shape, target logical type, primitive flag, config)
//! to a `CoercionAction`. Decoders never hard-code shape-mismatch behavior;
//! every mismatch is routed through `decide`.
//!
//! Resolution order:
//! 1. explicit rule for (logical type, shape), then the shape default rule
//! 2. feature flags (`accept_float_as_int`, `allow_coercion_of_scalars`,
//!    `fail_on_null_for_primitives`, `accept_empty_array_as_null`)
//! 3. built-in defaults


use crate::{config::DecodeConfig, error::DecodeErrorKind};
use scalarbind_primitives::LogicalType;
use serde::Deserialize;
use std::fmt;

///
/// InputShape
///
/// Observed input shape that does not match the target's natural shape.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum InputShape {
    /// `""`
    EmptyString,
    /// Whitespace-only string.
    BlankString,
    /// The string `"null"` after trimming.
    TextualNull,
    /// Any other string token presented to a non-textual target.
    NonNumericString,
    /// Floating token (`1.0`) presented to an integral target.
    FloatForIntegerTarget,
    /// Integer token presented to a boolean target.
    IntegerForBooleanTarget,
    /// Integer token presented to a character target.
    IntegerForCharTarget,
    /// `[]` presented to a scalar target.
    EmptyArray,
}

impl InputShape {
    /// Diagnostic description of the offending input.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::EmptyString => "empty String (\"\")",
            Self::BlankString => "blank String (all whitespace)",
            Self::TextualNull => "String \"null\"",
            Self::NonNumericString => "String value",
            Self::FloatForIntegerTarget => "Floating-point value",
            Self::IntegerForBooleanTarget | Self::IntegerForCharTarget => "Integer value",
            Self::EmptyArray => "empty Array",
        }
    }
}

///
/// CoercionAction
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CoercionAction {
    Fail,
    SubstituteNull,
    SubstituteEmpty,
    Convert,
}

impl fmt::Display for CoercionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Fail => "fail",
            Self::SubstituteNull => "substitute_null",
            Self::SubstituteEmpty => "substitute_empty",
            Self::Convert => "convert",
        };
        write!(f, "{label}")
    }
}

///
/// DecisionSource
///
/// Which layer produced a decision. A `Fail` from a feature flag is a
/// configuration rejection; any other `Fail` is a shape mismatch.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecisionSource {
    Rule,
    Feature(Feature),
    Default,
}

///
/// Feature
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Feature {
    AllowCoercionOfScalars,
    FailOnNullForPrimitives,
    AcceptFloatAsInt,
    AcceptEmptyArrayAsNull,
    AcceptBlankAsEmpty,
}

impl Feature {
    /// Config key that controls this feature.
    #[must_use]
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::AllowCoercionOfScalars => "allow_coercion_of_scalars",
            Self::FailOnNullForPrimitives => "fail_on_null_for_primitives",
            Self::AcceptFloatAsInt => "accept_float_as_int",
            Self::AcceptEmptyArrayAsNull => "accept_empty_array_as_null",
            Self::AcceptBlankAsEmpty => "coercion.accept_blank_as_empty",
        }
    }
}

///
/// CoercionDecision
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CoercionDecision {
    pub action: CoercionAction,
    pub source: DecisionSource,
}

impl CoercionDecision {
    /// Error kind reported when this decision is `Fail`.
    #[must_use]
    pub const fn failure_kind(self, shape: InputShape) -> DecodeErrorKind {
        match (shape, self.source) {
            (InputShape::FloatForIntegerTarget, _) => DecodeErrorKind::RangeOverflow,
            (_, DecisionSource::Feature(_)) => DecodeErrorKind::ConfigurationRejected,
            _ => DecodeErrorKind::ShapeMismatch,
        }
    }

    const fn rule(action: CoercionAction) -> Self {
        Self {
            action,
            source: DecisionSource::Rule,
        }
    }

    const fn feature(action: CoercionAction, feature: Feature) -> Self {
        Self {
            action,
            source: DecisionSource::Feature(feature),
        }
    }

    const fn default(action: CoercionAction) -> Self {
        Self {
            action,
            source: DecisionSource::Default,
        }
    }
}

/// Decide how to handle one observed shape for one target.
#[must_use]
pub fn decide(
    shape: InputShape,
    logical_type: LogicalType,
    primitive: bool,
    config: &DecodeConfig,
) -> CoercionAction {
    decide_with_source(shape, logical_type, primitive, config).action
}

/// Like `decide`, but also reports which layer produced the action.
#[must_use]
pub fn decide_with_source(
    shape: InputShape,
    logical_type: LogicalType,
    primitive: bool,
    config: &DecodeConfig,
) -> CoercionDecision {
    if shape == InputShape::BlankString {
        return decide_blank(logical_type, primitive, config);
    }

    if let Some(action) = config.coercion.rule(logical_type, shape) {
        return CoercionDecision::rule(action);
    }

    match shape {
        InputShape::FloatForIntegerTarget if logical_type == LogicalType::Integer => {
            if !config.accept_float_as_int {
                return CoercionDecision::feature(CoercionAction::Fail, Feature::AcceptFloatAsInt);
            }
        }
        InputShape::EmptyArray => {
            return if config.accept_empty_array_as_null {
                CoercionDecision::feature(
                    CoercionAction::SubstituteNull,
                    Feature::AcceptEmptyArrayAsNull,
                )
            } else {
                CoercionDecision::default(CoercionAction::Fail)
            };
        }
        _ => {}
    }

    if logical_type.is_scalar() && !config.allow_coercion_of_scalars {
        return CoercionDecision::feature(CoercionAction::Fail, Feature::AllowCoercionOfScalars);
    }

    match shape {
        InputShape::EmptyString => CoercionDecision::default(CoercionAction::Fail),
        InputShape::TextualNull => {
            if primitive && config.fail_on_null_for_primitives {
                CoercionDecision::feature(CoercionAction::Fail, Feature::FailOnNullForPrimitives)
            } else {
                CoercionDecision::default(CoercionAction::SubstituteNull)
            }
        }
        _ => CoercionDecision::default(CoercionAction::Convert),
    }
}

// Blank strings resolve exactly like empty strings unless blanks are refused.
fn decide_blank(
    logical_type: LogicalType,
    primitive: bool,
    config: &DecodeConfig,
) -> CoercionDecision {
    if let Some(action) = config
        .coercion
        .rule(logical_type, InputShape::BlankString)
    {
        return CoercionDecision::rule(action);
    }

    if config.coercion.accept_blank_as_empty == Some(false) {
        return CoercionDecision::feature(CoercionAction::Fail, Feature::AcceptBlankAsEmpty);
    }

    decide_with_source(InputShape::EmptyString, logical_type, primitive, config)
}
