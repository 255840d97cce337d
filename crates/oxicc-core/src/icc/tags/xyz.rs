//! XYZ and s15Fixed16 Array Tag Types
//!
//! The XYZType contains an array of XYZ values. Used for colorant tags,
//! white point, black point, etc. The s15Fixed16ArrayType is a flat array of
//! signed fixed-point numbers, most often the 3×3 'chad' matrix.
//!
//! See ICC.1:2022 Sections 10.31 (XYZ) and 10.22 (sf32)

use crate::icc::error::CodecError;
use crate::icc::types::{ByteReader, S15Fixed16, XyzNumber};

/// XYZ tag data - contains zero or more XYZ values
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XyzData {
    pub reserved: u32,
    /// XYZ values stored in the tag
    pub values: Vec<XyzNumber>,
}

impl XyzData {
    pub fn new(values: Vec<XyzNumber>) -> Self {
        Self {
            reserved: 0,
            values,
        }
    }

    pub(crate) fn parse(payload: &[u8]) -> Result<Self, CodecError> {
        let mut r = ByteReader::new(payload, "XYZ element");
        r.take(4)?;
        let reserved = r.read_u32()?;

        // Each XYZNumber is 12 bytes (3 × s15Fixed16)
        if r.remaining() % XyzNumber::SIZE != 0 {
            return Err(CodecError::BadLength {
                context: "XYZ element",
                len: payload.len(),
            });
        }

        let count = r.remaining() / XyzNumber::SIZE;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(XyzNumber::read(&mut r)?);
        }

        Ok(Self { reserved, values })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.reserved.to_be_bytes());
        for xyz in &self.values {
            xyz.write(out);
        }
    }

    /// Get the first XYZ value (most common case)
    pub fn first(&self) -> Option<&XyzNumber> {
        self.values.first()
    }
}

/// s15Fixed16 array tag data
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct S15Fixed16ArrayData {
    pub reserved: u32,
    pub values: Vec<S15Fixed16>,
}

impl S15Fixed16ArrayData {
    pub fn new(values: Vec<S15Fixed16>) -> Self {
        Self {
            reserved: 0,
            values,
        }
    }

    pub(crate) fn parse(payload: &[u8]) -> Result<Self, CodecError> {
        let mut r = ByteReader::new(payload, "sf32 element");
        r.take(4)?;
        let reserved = r.read_u32()?;

        if r.remaining() % 4 != 0 {
            return Err(CodecError::BadLength {
                context: "sf32 element",
                len: payload.len(),
            });
        }

        let count = r.remaining() / 4;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(r.read_s15f16()?);
        }

        Ok(Self { reserved, values })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.reserved.to_be_bytes());
        for v in &self.values {
            out.extend_from_slice(&v.to_be_bytes());
        }
    }
}
