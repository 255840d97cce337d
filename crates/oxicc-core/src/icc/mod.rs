//! ICC Profile Codec
//!
//! Native ICC profile decoding and encoding according to ICC.1:2022.
//!
//! # Structure
//!
//! An ICC profile consists of:
//! 1. A 128-byte header
//! 2. A tag table listing all tags
//! 3. Tag data (may overlap)
//!
//! # Supported Element Types
//!
//! - text, desc, mluc (descriptions and copyright)
//! - XYZ, sf32 (colorants, white point, adaptation matrix)
//! - curv, para (tone reproduction curves)
//! - chrm (phosphor chromaticities)
//!
//! Every other element type is carried through verbatim.
//!
//! # Example
//!
//! ```ignore
//! use oxicc_core::icc::{DecodeOptions, Profile};
//!
//! let decoded = Profile::decode(&bytes, &DecodeOptions::default())?;
//! for diagnostic in &decoded.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! ```

pub mod diagnostics;
pub mod header;
pub mod profile;
pub mod render;
pub mod signatures;
pub mod tags;
pub mod types;

mod error;

pub use diagnostics::Diagnostic;
pub use error::CodecError;
pub use header::{IccHeader, ProfileClass, VersionNumber};
pub use profile::{DecodeOptions, Decoded, ElementId, Profile, RemovalReport, TagEntry};
pub use tags::{Element, ElementData, pack_element, parse_element};
pub use types::{
    DateTimeNumber, S15Fixed16, Signature, U16Fixed16, XyzNumber, decode_signed, decode_unsigned,
    encode_signed, encode_unsigned, to_float_signed, to_float_unsigned,
};
