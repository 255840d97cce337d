//! ICC Profile Tag Element Parsing
//!
//! Tagged elements contain the actual profile data. Each element has:
//! - A 4-byte type signature identifying the data format
//! - Reserved bytes
//! - Type-specific data
//!
//! The type is self-describing: dispatch uses the element's own signature,
//! never the directory signature that points at it. Types without a codec
//! here are kept verbatim as [`ElementData::Unimplemented`], so packing them
//! is lossless.
//!
//! See ICC.1:2022 Section 10.

mod chromaticity;
mod curves;
mod text;
mod xyz;

pub use chromaticity::ChromaticityData;
pub use curves::{CurveData, CurveKind, ParametricCurveData};
pub use text::{MAC_DESCRIPTION_SIZE, MlucData, MlucRecord, TextData, TextDescriptionData};
pub use xyz::{S15Fixed16ArrayData, XyzData};

use super::error::CodecError;
use super::types::{Signature, type_sig};

/// A decoded tagged element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Type signature (first 4 bytes of the payload)
    pub type_signature: Signature,
    /// Payload length the element was decoded from
    pub decoded_len: usize,
    /// Kind-specific contents
    pub data: ElementData,
}

/// Element contents, one variant per implemented element type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementData {
    /// 'text' - plain ASCII text
    Text(TextData),
    /// 'desc' - v2 text description
    TextDescription(TextDescriptionData),
    /// 'mluc' - multi-localized Unicode
    MultiLocalizedUnicode(MlucData),
    /// 'XYZ ' - array of XYZ numbers
    Xyz(XyzData),
    /// 'sf32' - array of s15Fixed16 numbers
    S15Fixed16Array(S15Fixed16ArrayData),
    /// 'curv' - sampled curve
    Curve(CurveData),
    /// 'para' - parametric curve
    ParametricCurve(ParametricCurveData),
    /// 'chrm' - phosphor/colorant chromaticity
    Chromaticity(ChromaticityData),
    /// Any other type; the full payload (signature included) kept verbatim
    Unimplemented { payload: Vec<u8> },
}

impl Element {
    /// Wrap element data, deriving the type signature from the variant
    pub fn new(data: ElementData) -> Self {
        let type_signature = data.type_signature();
        let mut element = Self {
            type_signature,
            decoded_len: 0,
            data,
        };
        element.decoded_len = element.pack().len();
        element
    }

    /// Parse an element payload
    ///
    /// Never fails on an unrecognized type signature. Fails only when a
    /// recognized type's internal lengths disagree with the payload length.
    pub fn parse(payload: &[u8]) -> Result<Self, CodecError> {
        let Some(sig_bytes) = payload.get(..4) else {
            let mut padded = [0u8; 4];
            padded[..payload.len()].copy_from_slice(payload);
            return Ok(Self::unimplemented(Signature(padded), payload));
        };
        let type_signature = Signature([sig_bytes[0], sig_bytes[1], sig_bytes[2], sig_bytes[3]]);

        let data = match type_signature {
            type_sig::TEXT => ElementData::Text(TextData::parse(payload)?),
            type_sig::DESC => ElementData::TextDescription(TextDescriptionData::parse(payload)?),
            type_sig::MLUC => ElementData::MultiLocalizedUnicode(MlucData::parse(payload)?),
            type_sig::XYZ => ElementData::Xyz(XyzData::parse(payload)?),
            type_sig::SF32 => ElementData::S15Fixed16Array(S15Fixed16ArrayData::parse(payload)?),
            type_sig::CURVE => ElementData::Curve(CurveData::parse(payload)?),
            type_sig::PARA => ElementData::ParametricCurve(ParametricCurveData::parse(payload)?),
            type_sig::CHRM => ElementData::Chromaticity(ChromaticityData::parse(payload)?),
            _ => return Ok(Self::unimplemented(type_signature, payload)),
        };

        Ok(Self {
            type_signature,
            decoded_len: payload.len(),
            data,
        })
    }

    fn unimplemented(type_signature: Signature, payload: &[u8]) -> Self {
        Self {
            type_signature,
            decoded_len: payload.len(),
            data: ElementData::Unimplemented {
                payload: payload.to_vec(),
            },
        }
    }

    /// Serialize the element
    pub fn pack(&self) -> Vec<u8> {
        if let ElementData::Unimplemented { payload } = &self.data {
            return payload.clone();
        }

        let mut out = Vec::with_capacity(self.decoded_len);
        out.extend_from_slice(self.type_signature.as_bytes());
        match &self.data {
            ElementData::Text(d) => d.write(&mut out),
            ElementData::TextDescription(d) => d.write(&mut out),
            ElementData::MultiLocalizedUnicode(d) => d.write(&mut out),
            ElementData::Xyz(d) => d.write(&mut out),
            ElementData::S15Fixed16Array(d) => d.write(&mut out),
            ElementData::Curve(d) => d.write(&mut out),
            ElementData::ParametricCurve(d) => d.write(&mut out),
            ElementData::Chromaticity(d) => d.write(&mut out),
            ElementData::Unimplemented { .. } => {}
        }
        out
    }

    /// Whether the element type has a codec here
    pub fn is_implemented(&self) -> bool {
        !matches!(self.data, ElementData::Unimplemented { .. })
    }

    /// Best-effort text content for the text-like element kinds
    pub fn text(&self) -> Option<String> {
        match &self.data {
            ElementData::Text(t) => Some(t.to_string_lossy()),
            ElementData::TextDescription(d) => Some(d.ascii_string()),
            ElementData::MultiLocalizedUnicode(m) => m.first_text(),
            _ => None,
        }
    }

    pub fn as_xyz(&self) -> Option<&XyzData> {
        match &self.data {
            ElementData::Xyz(xyz) => Some(xyz),
            _ => None,
        }
    }

    pub fn as_curve(&self) -> Option<&CurveData> {
        match &self.data {
            ElementData::Curve(curve) => Some(curve),
            _ => None,
        }
    }

    pub fn as_parametric_curve(&self) -> Option<&ParametricCurveData> {
        match &self.data {
            ElementData::ParametricCurve(curve) => Some(curve),
            _ => None,
        }
    }
}

impl ElementData {
    /// Type signature implied by the variant
    pub fn type_signature(&self) -> Signature {
        match self {
            Self::Text(_) => type_sig::TEXT,
            Self::TextDescription(_) => type_sig::DESC,
            Self::MultiLocalizedUnicode(_) => type_sig::MLUC,
            Self::Xyz(_) => type_sig::XYZ,
            Self::S15Fixed16Array(_) => type_sig::SF32,
            Self::Curve(_) => type_sig::CURVE,
            Self::ParametricCurve(_) => type_sig::PARA,
            Self::Chromaticity(_) => type_sig::CHRM,
            Self::Unimplemented { payload } => {
                let mut sig = [0u8; 4];
                let n = payload.len().min(4);
                sig[..n].copy_from_slice(&payload[..n]);
                Signature(sig)
            }
        }
    }
}

/// Parse an element payload (see [`Element::parse`])
pub fn parse_element(payload: &[u8]) -> Result<Element, CodecError> {
    Element::parse(payload)
}

/// Serialize an element (see [`Element::pack`])
pub fn pack_element(element: &Element) -> Vec<u8> {
    element.pack()
}
