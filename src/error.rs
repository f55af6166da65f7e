//! Error handling.
//!
//! Everything in this crate is a pure, deterministic construction, so errors are
//! always reported to the caller of the failing operation and never retried.

use thiserror::Error;

/// A wrapper type for pdftile errors.
pub type TileResult<T> = Result<T, TileError>;

/// An error in pdftile.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum TileError {
    /// A parameter was out of its valid range, for example a non-positive
    /// step or a malformed bounding box.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// A ring or polygon could not be turned into a path.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// No free resource name could be found for the given prefix.
    #[error("no free resource name with prefix `{prefix}` after {attempts} attempts")]
    ResourceExhausted {
        /// The prefix of the names that were tried.
        prefix: &'static str,
        /// The number of candidates that were tried.
        attempts: u32,
    },
    /// A value can't be represented in PDF syntax.
    #[error("encoding error: {0}")]
    EncodingError(String),
}
