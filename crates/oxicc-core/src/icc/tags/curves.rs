//! Curve Tag Types
//!
//! ICC profiles use curves for tone reproduction (TRC).
//! Two main types:
//! - curv: Simple gamma or lookup table
//! - para: Parametric curves with formula
//!
//! See ICC.1:2022 Sections 10.6 (curv) and 10.18 (para)

use crate::icc::error::CodecError;
use crate::icc::types::{ByteReader, S15Fixed16};

/// Curve tag data (curv type)
///
/// Zero entries is the identity curve, one entry is a u8Fixed8 gamma, and
/// anything longer is a sampled table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CurveData {
    pub reserved: u32,
    pub entries: Vec<u16>,
    /// Bytes after the last entry (usually alignment padding)
    pub trailing: Vec<u8>,
}

/// Shape of a 'curv' element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveKind {
    Identity,
    Gamma(f64),
    Table(usize),
}

impl CurveData {
    pub fn new(entries: Vec<u16>) -> Self {
        Self {
            reserved: 0,
            entries,
            trailing: Vec::new(),
        }
    }

    pub(crate) fn parse(payload: &[u8]) -> Result<Self, CodecError> {
        let mut r = ByteReader::new(payload, "curv element");
        r.take(4)?;
        let reserved = r.read_u32()?;
        let count = r.read_u32()? as usize;

        let table = r.take(count.saturating_mul(2))?;
        let entries = table
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();

        Ok(Self {
            reserved,
            entries,
            trailing: r.rest().to_vec(),
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.reserved.to_be_bytes());
        out.extend_from_slice(&(self.entries.len() as u32).to_be_bytes());
        for v in &self.entries {
            out.extend_from_slice(&v.to_be_bytes());
        }
        out.extend_from_slice(&self.trailing);
    }

    pub fn kind(&self) -> CurveKind {
        match self.entries.as_slice() {
            [] => CurveKind::Identity,
            [gamma] => CurveKind::Gamma(*gamma as f64 / 256.0),
            table => CurveKind::Table(table.len()),
        }
    }
}

/// Parametric curve data (para type)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParametricCurveData {
    pub reserved: u32,
    /// Function type selector, 0..=4
    pub function: u16,
    pub reserved2: u16,
    /// Parameters g, a, b, c, d, e, f (as many as the function uses)
    pub params: Vec<S15Fixed16>,
    /// Bytes after the last parameter (usually alignment padding)
    pub trailing: Vec<u8>,
}

impl ParametricCurveData {
    /// Create a curve, checking the parameter count against the function
    pub fn new(function: u16, params: Vec<S15Fixed16>) -> Result<Self, CodecError> {
        let expected = Self::param_count(function)?;
        if params.len() != expected {
            return Err(CodecError::BadLength {
                context: "para parameters",
                len: params.len(),
            });
        }
        Ok(Self {
            reserved: 0,
            function,
            reserved2: 0,
            params,
            trailing: Vec::new(),
        })
    }

    /// Number of parameters a function type takes
    pub fn param_count(function: u16) -> Result<usize, CodecError> {
        match function {
            0 => Ok(1),
            1 => Ok(3),
            2 => Ok(4),
            3 => Ok(5),
            4 => Ok(7),
            _ => Err(CodecError::UnknownCurveFunction(function)),
        }
    }

    pub(crate) fn parse(payload: &[u8]) -> Result<Self, CodecError> {
        let mut r = ByteReader::new(payload, "para element");
        r.take(4)?;
        let reserved = r.read_u32()?;
        let function = r.read_u16()?;
        let reserved2 = r.read_u16()?;

        let count = Self::param_count(function)?;
        let mut params = Vec::with_capacity(count);
        for _ in 0..count {
            params.push(r.read_s15f16()?);
        }

        Ok(Self {
            reserved,
            function,
            reserved2,
            params,
            trailing: r.rest().to_vec(),
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.reserved.to_be_bytes());
        out.extend_from_slice(&self.function.to_be_bytes());
        out.extend_from_slice(&self.reserved2.to_be_bytes());
        for p in &self.params {
            out.extend_from_slice(&p.to_be_bytes());
        }
        out.extend_from_slice(&self.trailing);
    }

    /// Gamma parameter, present for every function type
    pub fn gamma(&self) -> Option<f64> {
        self.params.first().map(|g| g.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curv(entries: &[u16]) -> Vec<u8> {
        let mut data = b"curv\0\0\0\0".to_vec();
        data.extend_from_slice(&(entries.len() as u32).to_be_bytes());
        for e in entries {
            data.extend_from_slice(&e.to_be_bytes());
        }
        data
    }

    #[test]
    fn test_curve_identity() {
        let curve = CurveData::parse(&curv(&[])).unwrap();
        assert_eq!(curve.kind(), CurveKind::Identity);
    }

    #[test]
    fn test_curve_gamma() {
        // Gamma 2.2 as u8Fixed8 = 2.2 * 256 = 563.2 ≈ 563 = 0x0233
        let mut data = curv(&[0x0233]);
        data.extend_from_slice(&[0, 0]); // padding
        let curve = CurveData::parse(&data).unwrap();

        if let CurveKind::Gamma(g) = curve.kind() {
            assert!((g - 2.199).abs() < 0.01);
        } else {
            panic!("Expected Gamma curve");
        }
        assert_eq!(curve.trailing, vec![0, 0]);

        let mut out = b"curv".to_vec();
        curve.write(&mut out);
        assert_eq!(out, data);
    }

    #[test]
    fn test_curve_table() {
        let curve = CurveData::parse(&curv(&[0, 0x8000, 0xFFFF])).unwrap();
        assert_eq!(curve.kind(), CurveKind::Table(3));
        assert_eq!(curve.entries, vec![0, 0x8000, 0xFFFF]);
    }

    #[test]
    fn test_curve_count_overrun() {
        let mut data = curv(&[1, 2]);
        data[11] = 9;
        assert!(matches!(
            CurveData::parse(&data),
            Err(CodecError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_parametric_type0() {
        // Type 0: Y = X^g, with g = 2.2
        let mut data = b"para\0\0\0\0".to_vec();
        data.extend_from_slice(&[0, 0, 0, 0]); // function 0, reserved
        // g = 2.2 as s15Fixed16 = 2.2 * 65536 = 144179.2 ≈ 0x00023333
        data.extend_from_slice(&[0x00, 0x02, 0x33, 0x33]);

        let curve = ParametricCurveData::parse(&data).unwrap();
        assert_eq!(curve.function, 0);
        assert_eq!(curve.params.len(), 1);
        assert!((curve.gamma().unwrap() - 2.2).abs() < 0.001);

        let mut out = b"para".to_vec();
        curve.write(&mut out);
        assert_eq!(out, data);
    }

    #[test]
    fn test_parametric_param_counts() {
        for (function, count) in [(0u16, 1usize), (1, 3), (2, 4), (3, 5), (4, 7)] {
            let mut data = b"para\0\0\0\0".to_vec();
            data.extend_from_slice(&function.to_be_bytes());
            data.extend_from_slice(&[0, 0]);
            data.extend_from_slice(&vec![0u8; count * 4]);
            let curve = ParametricCurveData::parse(&data).unwrap();
            assert_eq!(curve.params.len(), count);
            assert!(curve.trailing.is_empty());
        }
    }

    #[test]
    fn test_parametric_unknown_function() {
        let mut data = b"para\0\0\0\0".to_vec();
        data.extend_from_slice(&[0, 7, 0, 0]);
        data.extend_from_slice(&[0u8; 28]);
        assert_eq!(
            ParametricCurveData::parse(&data),
            Err(CodecError::UnknownCurveFunction(7))
        );
    }

    #[test]
    fn test_parametric_missing_params() {
        let mut data = b"para\0\0\0\0".to_vec();
        data.extend_from_slice(&[0, 3, 0, 0]);
        data.extend_from_slice(&[0u8; 8]);
        assert!(matches!(
            ParametricCurveData::parse(&data),
            Err(CodecError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_parametric_new_checks_count() {
        assert!(ParametricCurveData::new(1, vec![S15Fixed16::new(2, 0)]).is_err());
        assert!(ParametricCurveData::new(0, vec![S15Fixed16::new(2, 0)]).is_ok());
        assert_eq!(
            ParametricCurveData::new(5, vec![]),
            Err(CodecError::UnknownCurveFunction(5))
        );
    }
}
