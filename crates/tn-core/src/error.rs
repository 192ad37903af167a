//! Engine-wide base error type.
//!
//! Sub-crates define their own error enums and wrap this one where a core
//! failure can surface through them.

use thiserror::Error;

/// The top-level error type for `tn-core`.
#[derive(Debug, Error)]
pub enum TnError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `tn-core`.
pub type TnResult<T> = Result<T, TnError>;
