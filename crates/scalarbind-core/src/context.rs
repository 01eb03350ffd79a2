use crate::{
    config::{DecodeConfig, RecoveryMode},
    error::DecodeError,
    value::ScalarValue,
};

///
/// Recovery
///
/// What the error channel wants done with a data-level decode failure.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Recovery {
    Propagate,
    UseNull,
    UseEmpty,

    /// Use this value instead. It must be exactly the decoder's output type,
    /// otherwise the original error propagates. `ScalarValue::Null` behaves
    /// like `UseNull`.
    Replace(ScalarValue),
}

///
/// ProblemHandler
///
/// Error-reporting channel consulted before a recoverable failure propagates.
///

pub trait ProblemHandler: Send + Sync {
    fn handle(&self, error: &DecodeError) -> Recovery;
}

impl<F> ProblemHandler for F
where
    F: Fn(&DecodeError) -> Recovery + Send + Sync,
{
    fn handle(&self, error: &DecodeError) -> Recovery {
        self(error)
    }
}

///
/// DecodeContext
///
/// Per-call view of the active configuration plus an optional custom
/// problem handler. Cheap to copy; borrows everything.
///

#[derive(Clone, Copy)]
pub struct DecodeContext<'a> {
    config: &'a DecodeConfig,
    handler: Option<&'a dyn ProblemHandler>,
}

impl<'a> DecodeContext<'a> {
    #[must_use]
    pub const fn new(config: &'a DecodeConfig) -> Self {
        Self {
            config,
            handler: None,
        }
    }

    #[must_use]
    pub const fn with_handler(mut self, handler: &'a dyn ProblemHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &'a DecodeConfig {
        self.config
    }

    /// Ask the error channel what to do. Invariant violations always propagate.
    #[must_use]
    pub fn recover(&self, error: &DecodeError) -> Recovery {
        if !error.is_recoverable() {
            return Recovery::Propagate;
        }

        match self.handler {
            Some(handler) => handler.handle(error),
            None => match self.config.recovery {
                RecoveryMode::Fail => Recovery::Propagate,
                RecoveryMode::UseNull => Recovery::UseNull,
                RecoveryMode::UseEmpty => Recovery::UseEmpty,
            },
        }
    }
}

impl std::fmt::Debug for DecodeContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeContext")
            .field("config", self.config)
            .field("custom_handler", &self.handler.is_some())
            .finish()
    }
}
