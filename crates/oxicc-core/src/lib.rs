//! # oxicc - Oxidized ICC profile codec
//!
//! Decode ICC color profiles into an editable model and encode them back.
//!
//! ## Goals
//!
//! - **Lossless**: unmodified profiles re-encode byte for byte; element types
//!   without a codec here are carried through verbatim
//! - **Safe**: every length and offset is bounds-checked before use
//! - **Shared elements**: tags pointing at one element keep sharing it, and
//!   removing one of them never drops data another still needs
//!
//! ## Quick Start
//!
//! ```no_run
//! use oxicc_core::{decode, encode, remove_tag_class};
//!
//! let bytes = std::fs::read("display.icc").unwrap();
//! let mut profile = decode(&bytes, None).unwrap();
//!
//! let report = remove_tag_class(&mut profile, "cprt");
//! println!("removed {} tags", report.entries_removed);
//!
//! let out = encode(&profile);
//! std::fs::write("display-nocprt.icc", out).unwrap();
//! ```

pub mod error;
pub mod icc;
pub mod io;

pub use error::{Error, Result};
pub use icc::render::{to_display_string, to_structured_map, to_summary_map};
pub use icc::{
    CodecError, DecodeOptions, Decoded, Diagnostic, Element, ElementData, ElementId, IccHeader,
    Profile, RemovalReport, Signature, TagEntry, VersionNumber,
};

/// Version of oxicc
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decode a profile, optionally forcing the header version ("major.minor.bugfix")
///
/// Advisories found while decoding are logged; use [`decode_with_options`]
/// to get them back as values.
pub fn decode(
    bytes: &[u8],
    version_override: Option<&str>,
) -> std::result::Result<Profile, CodecError> {
    let version_override = version_override
        .map(str::parse::<VersionNumber>)
        .transpose()?;
    let options = DecodeOptions { version_override };
    Ok(decode_with_options(bytes, &options)?.profile)
}

/// Decode a profile, returning its diagnostics alongside
pub fn decode_with_options(
    bytes: &[u8],
    options: &DecodeOptions,
) -> std::result::Result<Decoded, CodecError> {
    Profile::decode(bytes, options)
}

/// Encode a profile into a contiguous blob
pub fn encode(profile: &Profile) -> Vec<u8> {
    profile.encode()
}

/// Encode a profile, failing with [`CodecError::InconsistentDirectory`] if a
/// tag entry has no element
pub fn try_encode(profile: &Profile) -> std::result::Result<Vec<u8>, CodecError> {
    profile.try_encode()
}

/// Remove every tag with the given 4-character signature
///
/// A signature that is not exactly 4 bytes long matches nothing.
pub fn remove_tag_class(profile: &mut Profile, signature: &str) -> RemovalReport {
    match Signature::from_str_exact(signature) {
        Some(signature) => profile.remove_tag_class(signature),
        None => {
            log::warn!("'{}' is not a 4-character tag signature", signature);
            RemovalReport::default()
        }
    }
}
