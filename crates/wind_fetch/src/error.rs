//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! degenerate grid shapes, invalid scan parameters, and padding widths that
//! would crop the entire array away.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("padding of {pad} cells too large for a {rows}x{cols} array")]
    PaddingTooLarge { pad: usize, rows: usize, cols: usize },
}
