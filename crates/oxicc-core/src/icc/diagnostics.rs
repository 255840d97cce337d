//! Decode Diagnostics
//!
//! Advisories found while decoding that do not stop the decode. They are
//! returned next to the profile and logged at warn level.

use std::fmt;

use serde::Serialize;

use super::types::Signature;

/// A non-fatal finding from decoding a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Directory signature not in the known tag table
    UnknownTagSignature { signature: Signature },
    /// Known tag pointing at an element type it is not registered for
    UnexpectedElementType {
        signature: Signature,
        element_type: Signature,
    },
    /// Two entries share an offset but declare different sizes; the first
    /// decoded element is kept
    SharedSizeMismatch {
        signature: Signature,
        offset: u32,
        kept_size: u32,
        declared_size: u32,
    },
    /// Header profile size disagrees with the input length
    ProfileSizeMismatch { declared: u32, actual: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTagSignature { signature } => {
                write!(f, "unknown tag signature '{}'", signature)
            }
            Self::UnexpectedElementType {
                signature,
                element_type,
            } => {
                write!(
                    f,
                    "tag '{}' holds unexpected element type '{}'",
                    signature, element_type
                )
            }
            Self::SharedSizeMismatch {
                signature,
                offset,
                kept_size,
                declared_size,
            } => {
                write!(
                    f,
                    "tag '{}' shares offset 0x{:x} with size {} but declares {}",
                    signature, offset, kept_size, declared_size
                )
            }
            Self::ProfileSizeMismatch { declared, actual } => {
                write!(
                    f,
                    "header profile size {} differs from input length {}",
                    declared, actual
                )
            }
        }
    }
}
