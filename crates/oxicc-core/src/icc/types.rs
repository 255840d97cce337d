//! ICC Profile Basic Types
//!
//! Fixed-point numbers, signatures, and the other small value types shared by
//! the header and tag element codecs. All multi-byte values are big-endian.

use std::fmt;

use super::error::CodecError;

/// Four-byte ASCII code (tag signature, type signature, color space, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Signature(pub [u8; 4]);

impl Signature {
    /// Create from 4 ASCII characters
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(b)
    }

    /// Parse a 4-character string; any other length yields `None`
    pub fn from_str_exact(s: &str) -> Option<Self> {
        let bytes: [u8; 4] = s.as_bytes().try_into().ok()?;
        Some(Self(bytes))
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Tag signatures used by the codec itself
    pub const COPYRIGHT: Self = Self::from_bytes(*b"cprt");
    pub const PROFILE_DESC: Self = Self::from_bytes(*b"desc");
    pub const ACSP: Self = Self::from_bytes(*b"acsp");
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

impl serde::Serialize for Signature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<[u8; 4]> for Signature {
    fn from(b: [u8; 4]) -> Self {
        Self(b)
    }
}

/// Type signatures of the element kinds the codec implements
pub mod type_sig {
    use super::Signature;

    pub const TEXT: Signature = Signature::from_bytes(*b"text");
    pub const DESC: Signature = Signature::from_bytes(*b"desc");
    pub const MLUC: Signature = Signature::from_bytes(*b"mluc");
    pub const XYZ: Signature = Signature::from_bytes(*b"XYZ ");
    pub const SF32: Signature = Signature::from_bytes(*b"sf32");
    pub const CURVE: Signature = Signature::from_bytes(*b"curv");
    pub const PARA: Signature = Signature::from_bytes(*b"para");
    pub const CHRM: Signature = Signature::from_bytes(*b"chrm");
}

/// s15Fixed16Number - signed 16.16 fixed point
///
/// Stored as a signed whole part and an unsigned fraction, matching the two
/// big-endian fields on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct S15Fixed16 {
    pub whole: i16,
    pub frac: u16,
}

impl S15Fixed16 {
    pub const fn new(whole: i16, frac: u16) -> Self {
        Self { whole, frac }
    }

    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self {
            whole: i16::from_be_bytes([bytes[0], bytes[1]]),
            frac: u16::from_be_bytes([bytes[2], bytes[3]]),
        }
    }

    pub fn to_be_bytes(self) -> [u8; 4] {
        let w = self.whole.to_be_bytes();
        let f = self.frac.to_be_bytes();
        [w[0], w[1], f[0], f[1]]
    }

    /// Convert to f64 (`whole + frac / 65536`)
    pub fn to_f64(self) -> f64 {
        self.whole as f64 + self.frac as f64 / 65536.0
    }
}

/// u16Fixed16Number - unsigned 16.16 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct U16Fixed16 {
    pub whole: u16,
    pub frac: u16,
}

impl U16Fixed16 {
    pub const fn new(whole: u16, frac: u16) -> Self {
        Self { whole, frac }
    }

    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self {
            whole: u16::from_be_bytes([bytes[0], bytes[1]]),
            frac: u16::from_be_bytes([bytes[2], bytes[3]]),
        }
    }

    pub fn to_be_bytes(self) -> [u8; 4] {
        let w = self.whole.to_be_bytes();
        let f = self.frac.to_be_bytes();
        [w[0], w[1], f[0], f[1]]
    }

    pub fn to_f64(self) -> f64 {
        self.whole as f64 + self.frac as f64 / 65536.0
    }
}

/// Decode a signed 16.16 number from the first 4 bytes of `bytes`
pub fn decode_signed(bytes: &[u8]) -> Result<(i16, u16), CodecError> {
    let raw = first_four(bytes, "s15Fixed16Number")?;
    let v = S15Fixed16::from_be_bytes(raw);
    Ok((v.whole, v.frac))
}

/// Encode a signed 16.16 number
pub fn encode_signed((whole, frac): (i16, u16)) -> [u8; 4] {
    S15Fixed16::new(whole, frac).to_be_bytes()
}

/// Decode an unsigned 16.16 number from the first 4 bytes of `bytes`
pub fn decode_unsigned(bytes: &[u8]) -> Result<(u16, u16), CodecError> {
    let raw = first_four(bytes, "u16Fixed16Number")?;
    let v = U16Fixed16::from_be_bytes(raw);
    Ok((v.whole, v.frac))
}

/// Encode an unsigned 16.16 number
pub fn encode_unsigned((whole, frac): (u16, u16)) -> [u8; 4] {
    U16Fixed16::new(whole, frac).to_be_bytes()
}

/// Float value of a signed 16.16 component, for display
pub fn to_float_signed((whole, frac): (i16, u16)) -> f64 {
    S15Fixed16::new(whole, frac).to_f64()
}

/// Float value of an unsigned 16.16 component, for display
pub fn to_float_unsigned((whole, frac): (u16, u16)) -> f64 {
    U16Fixed16::new(whole, frac).to_f64()
}

fn first_four(bytes: &[u8], context: &'static str) -> Result<[u8; 4], CodecError> {
    match bytes.get(..4) {
        Some(b) => Ok([b[0], b[1], b[2], b[3]]),
        None => Err(CodecError::truncated(context, 4, bytes.len())),
    }
}

/// XYZNumber - ICC XYZ value (3 × s15Fixed16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XyzNumber {
    pub x: S15Fixed16,
    pub y: S15Fixed16,
    pub z: S15Fixed16,
}

impl XyzNumber {
    pub const SIZE: usize = 12;

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            x: reader.read_s15f16()?,
            y: reader.read_s15f16()?,
            z: reader.read_s15f16()?,
        })
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.x.to_be_bytes());
        out.extend_from_slice(&self.y.to_be_bytes());
        out.extend_from_slice(&self.z.to_be_bytes());
    }

    pub fn to_f64(&self) -> [f64; 3] {
        [self.x.to_f64(), self.y.to_f64(), self.z.to_f64()]
    }
}

impl fmt::Display for XyzNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.to_f64();
        write!(f, "{} {} {}", x, y, z)
    }
}

/// dateTimeNumber - ICC date/time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeNumber {
    pub year: u16,
    pub month: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

impl DateTimeNumber {
    pub const SIZE: usize = 12;

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            year: reader.read_u16()?,
            month: reader.read_u16()?,
            day: reader.read_u16()?,
            hour: reader.read_u16()?,
            minute: reader.read_u16()?,
            second: reader.read_u16()?,
        })
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        for v in [
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        ] {
            out.extend_from_slice(&v.to_be_bytes());
        }
    }
}

impl fmt::Display for DateTimeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Bounds-checked big-endian cursor over a byte slice
#[derive(Debug, Clone)]
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    context: &'static str,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8], context: &'static str) -> Self {
        Self {
            data,
            pos: 0,
            context,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                CodecError::truncated(self.context, self.pos.saturating_add(n), self.data.len())
            })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Consume everything left
    pub fn rest(&mut self) -> &'a [u8] {
        let slice = &self.data[self.pos..];
        self.pos = self.data.len();
        slice
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_signature(&mut self) -> Result<Signature, CodecError> {
        Ok(Signature(self.read_array()?))
    }

    pub fn read_s15f16(&mut self) -> Result<S15Fixed16, CodecError> {
        Ok(S15Fixed16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u16f16(&mut self) -> Result<U16Fixed16, CodecError> {
        Ok(U16Fixed16::from_be_bytes(self.read_array()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s15fixed16() {
        let one = S15Fixed16::from_be_bytes([0x00, 0x01, 0x00, 0x00]);
        assert_eq!(one, S15Fixed16::new(1, 0));
        assert!((one.to_f64() - 1.0).abs() < 1e-9);

        let half = S15Fixed16::from_be_bytes([0x00, 0x00, 0x80, 0x00]);
        assert!((half.to_f64() - 0.5).abs() < 1e-9);

        // -1.5 is whole -2 plus 0.5
        let neg = S15Fixed16::from_be_bytes([0xFF, 0xFE, 0x80, 0x00]);
        assert_eq!(neg.whole, -2);
        assert!((neg.to_f64() - (-1.5)).abs() < 1e-9);
        assert_eq!(neg.to_be_bytes(), [0xFF, 0xFE, 0x80, 0x00]);
    }

    #[test]
    fn test_fixed_point_functions() {
        assert_eq!(encode_signed((-3, 0x1234)), [0xFF, 0xFD, 0x12, 0x34]);
        assert_eq!(decode_signed(&[0xFF, 0xFD, 0x12, 0x34]).unwrap(), (-3, 0x1234));
        assert_eq!(encode_unsigned((0xFFFF, 1)), [0xFF, 0xFF, 0x00, 0x01]);
        assert_eq!(decode_unsigned(&[0xFF, 0xFF, 0x00, 0x01]).unwrap(), (0xFFFF, 1));
        assert!((to_float_unsigned((2, 0x4000)) - 2.25).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_point_truncated() {
        assert!(matches!(
            decode_signed(&[0, 1, 2]),
            Err(CodecError::TruncatedInput { needed: 4, available: 3, .. })
        ));
        assert!(decode_unsigned(&[]).is_err());
    }

    #[test]
    fn test_xyz_number() {
        // D50 white point in ICC encoding
        let bytes: [u8; 12] = [
            0x00, 0x00, 0xF6, 0xD6, // X = 0.9642
            0x00, 0x01, 0x00, 0x00, // Y = 1.0
            0x00, 0x00, 0xD3, 0x2D, // Z = 0.8249
        ];
        let mut reader = ByteReader::new(&bytes, "test");
        let xyz = XyzNumber::read(&mut reader).unwrap();
        let [x, y, z] = xyz.to_f64();

        assert!((x - 0.9642).abs() < 0.001);
        assert!((y - 1.0).abs() < 0.001);
        assert!((z - 0.8249).abs() < 0.001);

        let mut out = Vec::new();
        xyz.write(&mut out);
        assert_eq!(out, bytes);
    }

    #[test]
    fn test_date_time_display() {
        let dt = DateTimeNumber {
            year: 2023,
            month: 2,
            day: 9,
            hour: 7,
            minute: 5,
            second: 0,
        };
        assert_eq!(dt.to_string(), "2023-02-09T07:05:00");
    }

    #[test]
    fn test_reader_truncation() {
        let data = [1u8, 2, 3];
        let mut reader = ByteReader::new(&data, "element");
        assert_eq!(reader.read_u16().unwrap(), 0x0102);
        let err = reader.read_u32().unwrap_err();
        assert_eq!(
            err,
            CodecError::TruncatedInput {
                context: "element",
                needed: 6,
                available: 3
            }
        );
        assert_eq!(reader.rest(), &[3]);
    }

    #[test]
    fn test_signature() {
        assert_eq!(Signature::COPYRIGHT.to_string(), "cprt");
        assert_eq!(Signature::from_str_exact("rXYZ"), Some(Signature(*b"rXYZ")));
        assert_eq!(Signature::from_str_exact("abc"), None);
        assert_eq!(Signature([b'a', 0, b'b', b' ']).to_string(), "a\\x00b ");
    }
}
