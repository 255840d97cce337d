//! Error types for oxicc

use thiserror::Error;

use crate::icc::CodecError;

/// Result type for oxicc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in oxicc operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Profile bytes could not be decoded or encoded
    #[error("ICC codec error: {0}")]
    Codec(#[from] CodecError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
