//! Scalar decoding core: coercion policy, strict numeric text parsing, the
//! scalar decoder family, the decoder registry, and the bounded cache that
//! memoizes name resolution.
//!
//! Decoders read from a `TokenCursor` and take an immutable `DecodeConfig`
//! through a `DecodeContext`. Nothing here performs I/O.

// public exports are one module level down
pub mod cache;
pub mod coercion;
pub mod config;
pub mod context;
pub mod decode;
pub mod error;
pub mod registry;
pub mod target;
pub mod text;
pub mod token;
pub mod value;

pub use scalarbind_primitives::{ALL_SCALAR_KINDS, LogicalType, ScalarKind, ScalarMetadata};

///
/// Prelude
///
/// Types needed to drive a decode call. Decoder singletons stay under
/// `decode`.
///

pub mod prelude {
    pub use crate::{
        config::{DecodeConfig, RecoveryMode},
        context::{DecodeContext, ProblemHandler, Recovery},
        decode::{ScalarDecoder, ValueDecoder},
        error::{DecodeError, DecodeErrorKind},
        registry::{DecoderRegistry, DecoderResolver},
        target::TargetType,
        token::{TokenBuffer, TokenCursor},
        value::ScalarValue,
    };
}
