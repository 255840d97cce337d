//! ICC Codec Error Types

use std::fmt;

use super::types::Signature;

/// Errors that can occur when decoding or encoding ICC profiles
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    /// A declared length runs past the available bytes
    TruncatedInput {
        context: &'static str,
        needed: usize,
        available: usize,
    },
    /// Profile file signature is not 'acsp'
    BadMagic(Signature),
    /// An element payload length is inconsistent with its record layout
    BadLength { context: &'static str, len: usize },
    /// Parametric curve function type outside 0..=4
    UnknownCurveFunction(u16),
    /// A directory entry references an element missing from the pool
    InconsistentDirectory { signature: Signature, element: u32 },
    /// Version override is not a valid "major.minor.bugfix" string
    InvalidVersion(String),
}

impl CodecError {
    pub(crate) fn truncated(context: &'static str, needed: usize, available: usize) -> Self {
        Self::TruncatedInput {
            context,
            needed,
            available,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedInput {
                context,
                needed,
                available,
            } => {
                write!(
                    f,
                    "Truncated {}: need {} bytes, have {}",
                    context, needed, available
                )
            }
            Self::BadMagic(sig) => {
                write!(f, "Invalid profile signature: '{}' (expected 'acsp')", sig)
            }
            Self::BadLength { context, len } => {
                write!(f, "Bad {} length: {} bytes", context, len)
            }
            Self::UnknownCurveFunction(func) => {
                write!(f, "Unknown parametric curve function type: {}", func)
            }
            Self::InconsistentDirectory { signature, element } => {
                write!(
                    f,
                    "Tag '{}' references element #{} which is not in the element pool",
                    signature, element
                )
            }
            Self::InvalidVersion(version) => {
                write!(
                    f,
                    "Invalid version number '{}' (expected major.minor.bugfix)",
                    version
                )
            }
        }
    }
}

impl std::error::Error for CodecError {}
