use crate::target::TargetType;
use std::fmt;
use thiserror::Error as ThisError;

///
/// DecodeError
///
/// Structured decode failure with a stable kind classification.
/// Data-level kinds are offered to the context's problem handler before
/// they propagate; invariant violations never are.
///

#[derive(Clone, Debug, ThisError)]
#[error("{message}")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub target: Option<TargetType>,
    pub message: String,

    /// Offending literal or token description, when one exists.
    pub literal: Option<String>,
}

impl DecodeError {
    pub fn new(
        kind: DecodeErrorKind,
        target: Option<TargetType>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            target,
            message: message.into(),
            literal: None,
        }
    }

    #[must_use]
    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.literal = Some(literal.into());
        self
    }

    /// Construct a shape mismatch reported by a failing coercion decision.
    pub(crate) fn shape_mismatch(target: TargetType, message: impl Into<String>) -> Self {
        Self::new(DecodeErrorKind::ShapeMismatch, Some(target), message)
    }

    /// Construct the standard "unexpected token" shape mismatch.
    pub(crate) fn unexpected_token(target: TargetType, token: &str) -> Self {
        Self::new(
            DecodeErrorKind::ShapeMismatch,
            Some(target),
            format!("Cannot decode value of type `{target}` from {token} token"),
        )
        .with_literal(token)
    }

    /// Construct a "not a valid X value" failure for a string literal.
    pub(crate) fn invalid_literal(target: TargetType, text: &str, reason: &str) -> Self {
        Self::new(
            DecodeErrorKind::InvalidLiteral,
            Some(target),
            format!("Cannot decode value of type `{target}` from String \"{text}\": {reason}"),
        )
        .with_literal(text)
    }

    /// Construct a range overflow for a literal that parsed but does not fit.
    pub(crate) fn range_overflow(target: TargetType, text: &str, reason: &str) -> Self {
        Self::new(
            DecodeErrorKind::RangeOverflow,
            Some(target),
            format!("Cannot decode value of type `{target}` from \"{text}\": {reason}"),
        )
        .with_literal(text)
    }

    /// Construct a rejection caused by an explicit configuration flag.
    pub(crate) fn configuration_rejected(target: TargetType, message: impl Into<String>) -> Self {
        Self::new(
            DecodeErrorKind::ConfigurationRejected,
            Some(target),
            message,
        )
    }

    /// Construct a registry/decoder construction invariant violation.
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::new(DecodeErrorKind::InternalInvariantViolation, None, message)
    }

    /// Re-target an error raised by a cursor accessor that had no target context.
    #[must_use]
    pub(crate) fn for_target(mut self, target: TargetType) -> Self {
        if self.target.is_none() {
            self.target = Some(target);
        }
        self
    }

    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        self.kind.is_recoverable()
    }
}

///
/// DecodeErrorKind
///
/// Stable error-kind taxonomy for decode failures.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DecodeErrorKind {
    ShapeMismatch,
    InvalidLiteral,
    RangeOverflow,
    ConfigurationRejected,
    InternalInvariantViolation,
}

impl DecodeErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShapeMismatch => "shape_mismatch",
            Self::InvalidLiteral => "invalid_literal",
            Self::RangeOverflow => "range_overflow",
            Self::ConfigurationRejected => "configuration_rejected",
            Self::InternalInvariantViolation => "internal_invariant_violation",
        }
    }

    /// Only invariant violations bypass the problem handler.
    #[must_use]
    pub const fn is_recoverable(self) -> bool {
        !matches!(self, Self::InternalInvariantViolation)
    }
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid decode configuration: {0}")]
    Toml(#[from] toml::de::Error),
}
