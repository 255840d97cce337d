//! Static signature tables
//!
//! Tag signatures (ICC.1:2022 Section 9.2) with the element types each tag is
//! allowed to carry, plus element type names. The tables are immutable and
//! shared by every decode.

use super::types::Signature;

/// A registered tag: its name, directory signature, and allowed element types
#[derive(Debug, Clone, Copy)]
pub struct TagInfo {
    pub name: &'static str,
    pub signature: Signature,
    pub element_types: &'static [Signature],
}

const fn sig(b: &[u8; 4]) -> Signature {
    Signature::from_bytes(*b)
}

const XYZ_TYPE: Signature = sig(b"XYZ ");
const CURVE_TYPE: Signature = sig(b"curv");
const PARA_TYPE: Signature = sig(b"para");
const LUT8_TYPE: Signature = sig(b"mft1");
const LUT16_TYPE: Signature = sig(b"mft2");
const LUT_ATOB_TYPE: Signature = sig(b"mAB ");
const LUT_BTOA_TYPE: Signature = sig(b"mBA ");
const MPET_TYPE: Signature = sig(b"mpet");
const MLUC_TYPE: Signature = sig(b"mluc");
const TEXT_TYPE: Signature = sig(b"text");
const DESC_TYPE: Signature = sig(b"desc");
const SIG_TYPE: Signature = sig(b"sig ");

const A2B_TYPES: &[Signature] = &[LUT8_TYPE, LUT16_TYPE, LUT_ATOB_TYPE];
const B2A_TYPES: &[Signature] = &[LUT8_TYPE, LUT16_TYPE, LUT_BTOA_TYPE];
const TRC_TYPES: &[Signature] = &[CURVE_TYPE, PARA_TYPE];
const MPE_TYPES: &[Signature] = &[MPET_TYPE];
const XYZ_TYPES: &[Signature] = &[XYZ_TYPE];
const SIG_TYPES: &[Signature] = &[SIG_TYPE];
const CHRM_TYPES: &[Signature] = &[sig(b"chrm")];
const CICP_TYPES: &[Signature] = &[sig(b"cicp")];
const CLRO_TYPES: &[Signature] = &[sig(b"clro")];
const CLRT_TYPES: &[Signature] = &[sig(b"clrt")];
const DICT_TYPES: &[Signature] = &[sig(b"dict")];
const DTIM_TYPES: &[Signature] = &[sig(b"dtim")];
const MEAS_TYPES: &[Signature] = &[sig(b"meas")];
const NCL2_TYPES: &[Signature] = &[sig(b"ncl2")];
const PSEQ_TYPES: &[Signature] = &[sig(b"pseq")];
const PSID_TYPES: &[Signature] = &[sig(b"psid")];
const RCS2_TYPES: &[Signature] = &[sig(b"rcs2")];
const SF32_TYPES: &[Signature] = &[sig(b"sf32")];
const VIEW_TYPES: &[Signature] = &[sig(b"view")];
// v2 profiles carry 'text' and 'desc' where v4 uses 'mluc'
const DESCRIPTION_TYPES: &[Signature] = &[MLUC_TYPE, TEXT_TYPE, DESC_TYPE];

const fn tag(name: &'static str, s: &[u8; 4], element_types: &'static [Signature]) -> TagInfo {
    TagInfo {
        name,
        signature: sig(s),
        element_types,
    }
}

/// Known directory signatures
pub static TAG_TABLE: &[TagInfo] = &[
    tag("AToB0Tag", b"A2B0", A2B_TYPES),
    tag("AToB1Tag", b"A2B1", A2B_TYPES),
    tag("AToB2Tag", b"A2B2", A2B_TYPES),
    tag("blueMatrixColumnTag", b"bXYZ", XYZ_TYPES),
    tag("blueTRCTag", b"bTRC", TRC_TYPES),
    tag("BToA0Tag", b"B2A0", B2A_TYPES),
    tag("BToA1Tag", b"B2A1", B2A_TYPES),
    tag("BToA2Tag", b"B2A2", B2A_TYPES),
    tag("BToD0Tag", b"B2D0", MPE_TYPES),
    tag("BToD1Tag", b"B2D1", MPE_TYPES),
    tag("BToD2Tag", b"B2D2", MPE_TYPES),
    tag("BToD3Tag", b"B2D3", MPE_TYPES),
    tag("calibrationDateTimeTag", b"calt", DTIM_TYPES),
    tag("charTargetTag", b"targ", &[TEXT_TYPE]),
    tag("chromaticAdaptationTag", b"chad", SF32_TYPES),
    tag("chromaticityTag", b"chrm", CHRM_TYPES),
    tag("cicpTag", b"cicp", CICP_TYPES),
    tag("colorantOrderTag", b"clro", CLRO_TYPES),
    tag("colorantTableTag", b"clrt", CLRT_TYPES),
    tag("colorantTableOutTag", b"clot", CLRT_TYPES),
    tag("colorimetricIntentImageStateTag", b"ciis", SIG_TYPES),
    tag("copyrightTag", b"cprt", DESCRIPTION_TYPES),
    tag("deviceMfgDescTag", b"dmnd", DESCRIPTION_TYPES),
    tag("deviceModelDescTag", b"dmdd", DESCRIPTION_TYPES),
    tag("DToB0Tag", b"D2B0", MPE_TYPES),
    tag("DToB1Tag", b"D2B1", MPE_TYPES),
    tag("DToB2Tag", b"D2B2", MPE_TYPES),
    tag("DToB3Tag", b"D2B3", MPE_TYPES),
    tag("gamutTag", b"gamt", B2A_TYPES),
    tag("grayTRCTag", b"kTRC", TRC_TYPES),
    tag("greenMatrixColumnTag", b"gXYZ", XYZ_TYPES),
    tag("greenTRCTag", b"gTRC", TRC_TYPES),
    tag("luminanceTag", b"lumi", XYZ_TYPES),
    tag("measurementTag", b"meas", MEAS_TYPES),
    tag("metadataTag", b"meta", DICT_TYPES),
    tag("mediaBlackPointTag", b"bkpt", XYZ_TYPES),
    tag("mediaWhitePointTag", b"wtpt", XYZ_TYPES),
    tag("namedColor2Tag", b"ncl2", NCL2_TYPES),
    tag("outputResponseTag", b"resp", RCS2_TYPES),
    tag("perceptualRenderingIntentGamutTag", b"rig0", SIG_TYPES),
    tag(
        "preview0Tag",
        b"pre0",
        &[LUT8_TYPE, LUT16_TYPE, LUT_ATOB_TYPE, LUT_BTOA_TYPE],
    ),
    tag("preview1Tag", b"pre1", B2A_TYPES),
    tag("preview2Tag", b"pre2", B2A_TYPES),
    tag("profileDescriptionTag", b"desc", DESCRIPTION_TYPES),
    tag("profileSequenceDescTag", b"pseq", PSEQ_TYPES),
    tag("profileSequenceIdentifierTag", b"psid", PSID_TYPES),
    tag("redMatrixColumnTag", b"rXYZ", XYZ_TYPES),
    tag("redTRCTag", b"rTRC", TRC_TYPES),
    tag("saturationRenderingIntentGamutTag", b"rig2", SIG_TYPES),
    tag("technologyTag", b"tech", SIG_TYPES),
    tag("viewingCondDescTag", b"vued", DESCRIPTION_TYPES),
    tag("viewingConditionsTag", b"view", VIEW_TYPES),
];

/// Element type signatures and their ICC type names
pub static ELEMENT_TYPE_TABLE: &[(&str, Signature)] = &[
    ("textType", TEXT_TYPE),
    ("textDescriptionType", DESC_TYPE),
    ("multiLocalizedUnicodeType", MLUC_TYPE),
    ("XYZType", XYZ_TYPE),
    ("s15Fixed16ArrayType", sig(b"sf32")),
    ("curveType", CURVE_TYPE),
    ("parametricCurveType", PARA_TYPE),
    ("chromaticityType", sig(b"chrm")),
];

/// Look up a directory signature
pub fn tag_info(signature: Signature) -> Option<&'static TagInfo> {
    TAG_TABLE.iter().find(|t| t.signature == signature)
}

/// ICC type name for an element type signature, if implemented
pub fn element_type_name(signature: Signature) -> Option<&'static str> {
    ELEMENT_TYPE_TABLE
        .iter()
        .find(|(_, s)| *s == signature)
        .map(|(name, _)| *name)
}

/// Phosphor or colorant type names (ICC.1:2022 Table 36)
pub fn phosphor_colorant_name(value: u16) -> Option<&'static str> {
    match value {
        0 => Some("unknown"),
        1 => Some("ITU-R BT.709"),
        2 => Some("SMPTE RP145-1994"),
        3 => Some("EBU Tech.3213-E"),
        4 => Some("P22"),
        _ => None,
    }
}
