//! Fixed Point Property Tests
//!
//! Seeded sweeps over the 16.16 codecs, checked against the hand-written
//! encoders in `icc_tests::payload`.

use icc_tests::payload;
use oxicc_core::CodecError;
use oxicc_core::icc::{
    decode_signed, decode_unsigned, encode_signed, encode_unsigned, to_float_signed,
    to_float_unsigned,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SAMPLES: usize = 10_000;

#[test]
fn test_known_values() {
    assert_eq!(decode_signed(&[0, 1, 0, 0]).unwrap(), (1, 0));
    assert_eq!(decode_signed(&[0xFF, 0xFF, 0x80, 0x00]).unwrap(), (-1, 0x8000));
    assert_eq!(to_float_signed((-1, 0x8000)), -0.5);
    assert_eq!(to_float_signed((i16::MIN, 0)), -32768.0);
    assert_eq!(to_float_unsigned((0, 0x8000)), 0.5);
    assert_eq!(to_float_unsigned((1, 0)), 1.0);
    assert!((to_float_unsigned((u16::MAX, u16::MAX)) - 65535.99998).abs() < 1e-4);
    assert_eq!(encode_signed((-2, 0)), [0xFF, 0xFE, 0, 0]);
    assert_eq!(encode_unsigned((0x1234, 0x5678)), [0x12, 0x34, 0x56, 0x78]);
}

#[test]
fn test_signed_value_is_raw_over_65536() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x1CC);
    for _ in 0..SAMPLES {
        let raw: i32 = rng.r#gen();
        let bytes = raw.to_be_bytes();
        let pair = decode_signed(&bytes).unwrap();

        assert_eq!(to_float_signed(pair), raw as f64 / 65536.0);
        assert_eq!(encode_signed(pair), bytes);
    }
}

#[test]
fn test_unsigned_value_is_raw_over_65536() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x1CC + 1);
    for _ in 0..SAMPLES {
        let raw: u32 = rng.r#gen();
        let bytes = raw.to_be_bytes();
        let pair = decode_unsigned(&bytes).unwrap();

        assert_eq!(to_float_unsigned(pair), raw as f64 / 65536.0);
        assert_eq!(encode_unsigned(pair), bytes);
    }
}

#[test]
fn test_signed_ordering_matches_float_ordering() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..SAMPLES {
        let a: i32 = rng.r#gen();
        let b: i32 = rng.r#gen();
        let fa = to_float_signed(decode_signed(&a.to_be_bytes()).unwrap());
        let fb = to_float_signed(decode_signed(&b.to_be_bytes()).unwrap());
        assert_eq!(a.cmp(&b), fa.partial_cmp(&fb).unwrap());
    }
}

#[test]
fn test_encoding_agrees_with_float_encoders() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..SAMPLES {
        let v: f64 = rng.gen_range(-32768.0..32767.0);
        let pair = decode_signed(&payload::s15(v)).unwrap();
        assert!((to_float_signed(pair) - v).abs() <= 0.5 / 65536.0);

        let u: f64 = rng.gen_range(0.0..65535.0);
        let pair = decode_unsigned(&payload::u16f16(u)).unwrap();
        assert!((to_float_unsigned(pair) - u).abs() <= 0.5 / 65536.0);
    }
}

#[test]
fn test_only_first_four_bytes_read() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..100 {
        let mut bytes = [0u8; 8];
        rng.fill(&mut bytes);
        assert_eq!(
            decode_signed(&bytes).unwrap(),
            decode_signed(&bytes[..4]).unwrap()
        );
        assert_eq!(
            decode_unsigned(&bytes).unwrap(),
            decode_unsigned(&bytes[..4]).unwrap()
        );
    }
}

#[test]
fn test_short_input_rejected() {
    for len in 0..4 {
        let bytes = vec![0xFF; len];
        assert!(matches!(
            decode_signed(&bytes),
            Err(CodecError::TruncatedInput { needed: 4, available, .. }) if available == len
        ));
        assert!(matches!(
            decode_unsigned(&bytes),
            Err(CodecError::TruncatedInput { needed: 4, .. })
        ));
    }
}
