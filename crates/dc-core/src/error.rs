//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `DcError` as one variant
//! where configuration problems can reach them.

use thiserror::Error;

/// The top-level error type for `dc-core`.
#[derive(Debug, Error)]
pub enum DcError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `dc-core`.
pub type DcResult<T> = Result<T, DcError>;
