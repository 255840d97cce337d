//! # icc-tests
//!
//! Integration testing framework for oxicc.
//!
//! This crate provides:
//! - Element payload encoders written independently of the codec
//! - A profile byte builder that lays out header, tag table, and elements
//! - Ready-made synthetic profiles (v2 and v4 display profiles)
//! - Optional corpus of real profiles under `testdata/`
//!
//! ## Test Categories
//!
//! 1. **Round Trip**: decode then encode reproduces the input
//! 2. **Tag Removal**: sharing safety and directory order
//! 3. **Fixed Point**: seeded sweeps over the 16.16 codecs
//! 4. **Edge Cases**: truncated and malformed inputs
//! 5. **Rendering**: structured, text, and summary dumps

pub mod builder;
pub mod corpus;
pub mod payload;

pub use builder::ProfileBuilder;

/// v4 RGB display profile: mluc description and copyright, colorants, a
/// parametric TRC shared by all three channels, adaptation matrix, and an
/// element type without a codec ('meas')
pub fn display_profile_v4() -> Vec<u8> {
    ProfileBuilder::new()
        .version(4, 3, 0)
        .tag(
            b"desc",
            payload::mluc(&[(*b"en", *b"US", "Synthetic Display")]),
        )
        .tag(
            b"cprt",
            payload::mluc(&[
                (*b"en", *b"US", "No copyright, use freely"),
                (*b"de", *b"DE", "Kein Urheberrecht"),
            ]),
        )
        .tag(b"wtpt", payload::xyz(&[[0.9642, 1.0, 0.8249]]))
        .tag(b"rXYZ", payload::xyz(&[[0.4361, 0.2225, 0.0139]]))
        .tag(b"gXYZ", payload::xyz(&[[0.3851, 0.7169, 0.0971]]))
        .tag(b"bXYZ", payload::xyz(&[[0.1431, 0.0606, 0.7141]]))
        .tag(
            b"rTRC",
            payload::para(3, &[2.4, 0.9479, 0.0521, 0.0774, 0.0405]),
        )
        .shared_tag(b"gTRC", b"rTRC")
        .shared_tag(b"bTRC", b"rTRC")
        .tag(
            b"chad",
            payload::sf32(&[
                1.0479, 0.0229, -0.0502, 0.0296, 0.9904, -0.0171, -0.0093, 0.0151, 0.7519,
            ]),
        )
        .tag(b"meas", payload::unknown(b"meas", &[0u8; 28]))
        .build()
}

/// v2 RGB display profile: 'desc' description, 'text' copyright, sampled
/// TRCs, and chromaticities
pub fn display_profile_v2() -> Vec<u8> {
    let gamma_table: Vec<u16> = (0..16u32)
        .map(|i| ((i as f64 / 15.0).powf(2.2) * 65535.0).round() as u16)
        .collect();

    ProfileBuilder::new()
        .version(2, 1, 0)
        .tag(b"desc", payload::desc("sRGB IEC61966-2.1"))
        .tag(b"cprt", payload::text("Copyright (c) 1998 Hewlett-Packard Company"))
        .tag(b"wtpt", payload::xyz(&[[0.9505, 1.0, 1.0891]]))
        .tag(b"rTRC", payload::curv(&gamma_table))
        .shared_tag(b"gTRC", b"rTRC")
        .shared_tag(b"bTRC", b"rTRC")
        .tag(
            b"chrm",
            payload::chrm(1, &[(0.64, 0.33), (0.30, 0.60), (0.15, 0.06)]),
        )
        .tag(b"dmnd", payload::desc("IEC http://www.iec.ch"))
        .build()
}

/// Profile holding a single 'cprt' text element
pub fn copyright_only_profile(text: &str) -> Vec<u8> {
    ProfileBuilder::new()
        .tag(b"cprt", payload::text(text))
        .build()
}
