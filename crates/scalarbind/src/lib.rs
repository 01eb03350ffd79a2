//! ## Crate layout
//! - `core`: coercion policy, numeric text parsing, scalar decoders, the
//!   decoder registry and the bounded cache.
//! - `primitives`: the scalar kind table shared by every layer.
//! - `json`: decode JSON text straight into Rust scalars.
//!
//! The `prelude` module carries what a caller needs for one decode call.

pub use scalarbind_core as core;
pub use scalarbind_primitives as primitives;

pub mod json;


use scalarbind_core::{error::DecodeError, target::TargetType};
use thiserror::Error as ThisError;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("decoded null into non-nullable `{0}`")]
    NullValue(TargetType),

    #[error("no scalar decoder for `{0}`")]
    Unsupported(String),
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error,
        json::{FromJsonScalar, decode_named, from_json_str, from_json_str_with_handler},
    };
    pub use scalarbind_core::prelude::*;
}
