//! Codec Benchmarks
//!
//! Decode, encode, and tag removal over a synthetic matrix/TRC display profile.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use oxicc_core::icc::tags::{CurveData, MlucData, MlucRecord, ParametricCurveData, XyzData};
use oxicc_core::icc::{
    Element, ElementData, IccHeader, Profile, S15Fixed16, Signature, VersionNumber, XyzNumber,
};
use oxicc_core::{DecodeOptions, to_structured_map};

fn xyz(x: f64, y: f64, z: f64) -> XyzNumber {
    let fixed = |v: f64| {
        let raw = (v * 65536.0).round() as i32;
        S15Fixed16::new((raw >> 16) as i16, (raw & 0xFFFF) as u16)
    };
    XyzNumber {
        x: fixed(x),
        y: fixed(y),
        z: fixed(z),
    }
}

/// Display profile with colorants, a sampled TRC of `curve_len` entries shared
/// by all three channels, and localized description and copyright
fn generate_profile(curve_len: usize) -> Vec<u8> {
    let header = IccHeader::new(
        VersionNumber::new(4, 3, 0),
        Signature(*b"mntr"),
        Signature(*b"RGB "),
        Signature(*b"XYZ "),
    );
    let mut profile = Profile::new(header);

    let mluc = |text: &str| {
        Element::new(ElementData::MultiLocalizedUnicode(MlucData::new(vec![
            MlucRecord::new(*b"en", *b"US", text),
            MlucRecord::new(*b"de", *b"DE", text),
        ])))
    };
    profile.push_tag(Signature(*b"desc"), mluc("Synthetic Display"));
    profile.push_tag(Signature(*b"cprt"), mluc("No copyright, use freely"));

    for (sig, value) in [
        (b"wtpt", xyz(0.9642, 1.0, 0.8249)),
        (b"rXYZ", xyz(0.4361, 0.2225, 0.0139)),
        (b"gXYZ", xyz(0.3851, 0.7169, 0.0971)),
        (b"bXYZ", xyz(0.1431, 0.0606, 0.7141)),
    ] {
        profile.push_tag(
            Signature(*sig),
            Element::new(ElementData::Xyz(XyzData::new(vec![value]))),
        );
    }

    let entries: Vec<u16> = (0..curve_len)
        .map(|i| {
            let x = i as f64 / (curve_len - 1) as f64;
            (x.powf(2.2) * 65535.0).round() as u16
        })
        .collect();
    let trc = profile.push_tag(
        Signature(*b"rTRC"),
        Element::new(ElementData::Curve(CurveData::new(entries))),
    );
    for sig in [b"gTRC", b"bTRC"] {
        let _ = profile.link_tag(Signature(*sig), trc);
    }

    let para = ParametricCurveData::new(
        3,
        vec![
            S15Fixed16::new(2, 0x6666),
            S15Fixed16::new(0, 0xF2A7),
            S15Fixed16::new(0, 0x0D59),
            S15Fixed16::new(0, 0x13D0),
            S15Fixed16::new(0, 0x0A5B),
        ],
    );
    if let Ok(para) = para {
        profile.push_tag(
            Signature(*b"kTRC"),
            Element::new(ElementData::ParametricCurve(para)),
        );
    }

    profile.encode()
}

// ============================================================================
// Decode / Encode
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for curve_len in [2, 256, 4096] {
        let data = generate_profile(curve_len);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(curve_len), &data, |b, data| {
            b.iter(|| Profile::decode(black_box(data), &DecodeOptions::default()))
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for curve_len in [2, 256, 4096] {
        let data = generate_profile(curve_len);
        let profile = Profile::decode(&data, &DecodeOptions::default())
            .unwrap()
            .profile;
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(curve_len), &profile, |b, p| {
            b.iter(|| black_box(p).encode())
        });
    }

    group.finish();
}

// ============================================================================
// Edit / Render
// ============================================================================

fn bench_remove_and_encode(c: &mut Criterion) {
    let data = generate_profile(256);
    let profile = Profile::decode(&data, &DecodeOptions::default())
        .unwrap()
        .profile;

    c.bench_function("remove_copyright_encode", |b| {
        b.iter(|| {
            let mut p = profile.clone();
            p.remove_copyright();
            p.encode()
        })
    });
}

fn bench_structured_map(c: &mut Criterion) {
    let data = generate_profile(256);
    let profile = Profile::decode(&data, &DecodeOptions::default())
        .unwrap()
        .profile;

    c.bench_function("structured_map", |b| {
        b.iter(|| to_structured_map(black_box(&profile)))
    });
}

criterion_group!(
    benches,
    bench_decode,
    bench_encode,
    bench_remove_and_encode,
    bench_structured_map
);
criterion_main!(benches);
