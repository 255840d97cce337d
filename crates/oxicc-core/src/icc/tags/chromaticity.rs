//! Chromaticity Tag Type
//!
//! The chromaticityType gives the CIE xy coordinates of each phosphor or
//! colorant, optionally tagged with a standard colorant set.
//!
//! See ICC.1:2022 Section 10.3

use crate::icc::error::CodecError;
use crate::icc::signatures::phosphor_colorant_name;
use crate::icc::types::{ByteReader, U16Fixed16};

/// Chromaticity tag data (chrm type)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChromaticityData {
    pub reserved: u32,
    /// Phosphor or colorant type (see [`ChromaticityData::colorant_name`])
    pub colorant_type: u16,
    /// (x, y) per channel
    pub coordinates: Vec<(U16Fixed16, U16Fixed16)>,
    /// Bytes after the last coordinate pair
    pub trailing: Vec<u8>,
}

impl ChromaticityData {
    pub fn new(colorant_type: u16, coordinates: Vec<(U16Fixed16, U16Fixed16)>) -> Self {
        Self {
            reserved: 0,
            colorant_type,
            coordinates,
            trailing: Vec::new(),
        }
    }

    pub(crate) fn parse(payload: &[u8]) -> Result<Self, CodecError> {
        let mut r = ByteReader::new(payload, "chrm element");
        r.take(4)?;
        let reserved = r.read_u32()?;
        let channels = r.read_u16()?;
        let colorant_type = r.read_u16()?;

        let mut coordinates = Vec::with_capacity(channels as usize);
        for _ in 0..channels {
            let x = r.read_u16f16()?;
            let y = r.read_u16f16()?;
            coordinates.push((x, y));
        }

        Ok(Self {
            reserved,
            colorant_type,
            coordinates,
            trailing: r.rest().to_vec(),
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.reserved.to_be_bytes());
        out.extend_from_slice(&(self.coordinates.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.colorant_type.to_be_bytes());
        for (x, y) in &self.coordinates {
            out.extend_from_slice(&x.to_be_bytes());
            out.extend_from_slice(&y.to_be_bytes());
        }
        out.extend_from_slice(&self.trailing);
    }

    /// Name of the standard colorant set, if the type is a known one
    pub fn colorant_name(&self) -> Option<&'static str> {
        phosphor_colorant_name(self.colorant_type)
    }
}
