//! ICC Profile Header
//!
//! The ICC profile header is exactly 128 bytes and contains basic profile information.
//! See ICC.1:2022 Section 7.2.
//!
//! Every field is kept verbatim so that [`IccHeader::pack`] is the structural
//! inverse of [`IccHeader::parse`]. The only field not written back as decoded
//! is the profile size, which the assembly step recomputes.

use std::fmt;
use std::str::FromStr;

use super::error::CodecError;
use super::types::{ByteReader, DateTimeNumber, S15Fixed16, Signature, XyzNumber};

/// Profile file signature - must be 'acsp'
pub const PROFILE_SIGNATURE: Signature = Signature::ACSP;

/// Size of the fixed header
pub const HEADER_SIZE: usize = 128;

/// PCS illuminant as profiles encode it (X = 0.9642, Y = 1.0, Z = 0.8249)
pub const D50_ILLUMINANT: XyzNumber = XyzNumber {
    x: S15Fixed16::new(0, 0xF6D6),
    y: S15Fixed16::new(1, 0),
    z: S15Fixed16::new(0, 0xD32D),
};

/// ICC Profile Header (128 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IccHeader {
    /// Profile size in bytes, as decoded
    pub size: u32,
    /// Preferred CMM type signature
    pub cmm_type: u32,
    /// Profile version
    pub version: VersionNumber,
    /// Device class (display, input, output, etc.)
    pub device_class: Signature,
    /// Color space of data (RGB, CMYK, etc.)
    pub color_space: Signature,
    /// Profile connection space (XYZ or Lab)
    pub pcs: Signature,
    /// Date and time profile was created
    pub creation_date: DateTimeNumber,
    /// Profile file signature (always 'acsp' once parsed)
    pub signature: Signature,
    /// Primary platform signature
    pub platform: Signature,
    /// Profile flags
    pub flags: u32,
    /// Device manufacturer signature
    pub manufacturer: u32,
    /// Device model signature
    pub model: u32,
    /// Device attributes
    pub attributes: [u8; 8],
    /// Rendering intent (raw value; 0..=3 are defined)
    pub rendering_intent: u32,
    /// PCS illuminant (should be D50)
    pub illuminant: XyzNumber,
    /// Profile creator signature
    pub creator: u32,
    /// Profile ID (MD5 hash, or zero)
    pub profile_id: [u8; 16],
    /// Reserved tail, normally zero
    pub reserved: [u8; 28],
}

impl IccHeader {
    /// Header for a new profile with a D50 illuminant and zeroed optional fields
    pub fn new(
        version: VersionNumber,
        device_class: Signature,
        color_space: Signature,
        pcs: Signature,
    ) -> Self {
        Self {
            size: HEADER_SIZE as u32,
            cmm_type: 0,
            version,
            device_class,
            color_space,
            pcs,
            creation_date: DateTimeNumber::default(),
            signature: PROFILE_SIGNATURE,
            platform: Signature::default(),
            flags: 0,
            manufacturer: 0,
            model: 0,
            attributes: [0; 8],
            rendering_intent: 0,
            illuminant: D50_ILLUMINANT,
            creator: 0,
            profile_id: [0; 16],
            reserved: [0; 28],
        }
    }

    /// Parse header from bytes
    ///
    /// When `version_override` is given it replaces the decoded version number.
    pub fn parse(data: &[u8], version_override: Option<VersionNumber>) -> Result<Self, CodecError> {
        if data.len() < HEADER_SIZE {
            return Err(CodecError::truncated("header", HEADER_SIZE, data.len()));
        }

        let mut r = ByteReader::new(&data[..HEADER_SIZE], "header");

        let size = r.read_u32()?;
        let cmm_type = r.read_u32()?;
        let version = VersionNumber::from_be_bytes(r.read_array()?);
        let device_class = r.read_signature()?;
        let color_space = r.read_signature()?;
        let pcs = r.read_signature()?;
        let creation_date = DateTimeNumber::read(&mut r)?;

        let signature = r.read_signature()?;
        if signature != PROFILE_SIGNATURE {
            return Err(CodecError::BadMagic(signature));
        }

        let platform = r.read_signature()?;
        let flags = r.read_u32()?;
        let manufacturer = r.read_u32()?;
        let model = r.read_u32()?;
        let attributes = r.read_array()?;
        let rendering_intent = r.read_u32()?;
        let illuminant = XyzNumber::read(&mut r)?;
        let creator = r.read_u32()?;
        let profile_id = r.read_array()?;
        let reserved = r.read_array()?;

        Ok(Self {
            size,
            cmm_type,
            version: version_override.unwrap_or(version),
            device_class,
            color_space,
            pcs,
            creation_date,
            signature,
            platform,
            flags,
            manufacturer,
            model,
            attributes,
            rendering_intent,
            illuminant,
            creator,
            profile_id,
            reserved,
        })
    }

    /// Serialize the header with the given total profile size
    pub fn pack(&self, profile_size: u32) -> [u8; HEADER_SIZE] {
        let mut out = Vec::with_capacity(HEADER_SIZE);
        out.extend_from_slice(&profile_size.to_be_bytes());
        out.extend_from_slice(&self.cmm_type.to_be_bytes());
        out.extend_from_slice(&self.version.to_be_bytes());
        out.extend_from_slice(self.device_class.as_bytes());
        out.extend_from_slice(self.color_space.as_bytes());
        out.extend_from_slice(self.pcs.as_bytes());
        self.creation_date.write(&mut out);
        out.extend_from_slice(self.signature.as_bytes());
        out.extend_from_slice(self.platform.as_bytes());
        out.extend_from_slice(&self.flags.to_be_bytes());
        out.extend_from_slice(&self.manufacturer.to_be_bytes());
        out.extend_from_slice(&self.model.to_be_bytes());
        out.extend_from_slice(&self.attributes);
        out.extend_from_slice(&self.rendering_intent.to_be_bytes());
        self.illuminant.write(&mut out);
        out.extend_from_slice(&self.creator.to_be_bytes());
        out.extend_from_slice(&self.profile_id);
        out.extend_from_slice(&self.reserved);
        debug_assert_eq!(out.len(), HEADER_SIZE);

        let mut header = [0u8; HEADER_SIZE];
        header.copy_from_slice(&out);
        header
    }

    /// Decoded device class, if it is one of the standard ones
    pub fn profile_class(&self) -> Option<ProfileClass> {
        ProfileClass::from_signature(self.device_class)
    }

    /// Human-readable device class, if it is one of the standard ones
    pub fn device_class_name(&self) -> Option<&'static str> {
        self.profile_class().map(|c| c.description())
    }
}

/// ICC Profile Version
///
/// Packed as major byte, minor/bugfix nibbles, then a reserved low word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionNumber {
    pub major: u8,
    pub minor: u8,
    pub bugfix: u8,
    pub reserved: u16,
}

impl VersionNumber {
    pub const fn new(major: u8, minor: u8, bugfix: u8) -> Self {
        Self {
            major,
            minor,
            bugfix,
            reserved: 0,
        }
    }

    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self {
            major: bytes[0],
            minor: bytes[1] >> 4,
            bugfix: bytes[1] & 0x0F,
            reserved: u16::from_be_bytes([bytes[2], bytes[3]]),
        }
    }

    pub fn to_be_bytes(self) -> [u8; 4] {
        let rem = self.reserved.to_be_bytes();
        [
            self.major,
            (self.minor << 4) | (self.bugfix & 0x0F),
            rem[0],
            rem[1],
        ]
    }

    /// Get the version as a tuple (major, minor, bugfix)
    pub fn triple(&self) -> (u8, u8, u8) {
        (self.major, self.minor, self.bugfix)
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.bugfix)
    }
}

impl FromStr for VersionNumber {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CodecError::InvalidVersion(s.to_string());

        let mut parts = s.trim().split('.');
        let mut next = || parts.next().and_then(|p| p.parse::<u8>().ok());
        let (major, minor, bugfix) = match (next(), next(), next()) {
            (Some(major), Some(minor), Some(bugfix)) => (major, minor, bugfix),
            _ => return Err(invalid()),
        };
        if parts.next().is_some() || minor > 0x0F || bugfix > 0x0F {
            return Err(invalid());
        }

        Ok(Self::new(major, minor, bugfix))
    }
}

/// ICC Profile Class (Device Class)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileClass {
    /// Input device (scanner, camera)
    Input,
    /// Display device (monitor)
    Display,
    /// Output device (printer)
    Output,
    /// Device link
    DeviceLink,
    /// Color space conversion
    ColorSpace,
    /// Abstract profile
    Abstract,
    /// Named color profile
    NamedColor,
}

impl ProfileClass {
    pub fn from_signature(sig: Signature) -> Option<Self> {
        match sig.as_bytes() {
            b"scnr" => Some(Self::Input),
            b"mntr" => Some(Self::Display),
            b"prtr" => Some(Self::Output),
            b"link" => Some(Self::DeviceLink),
            b"spac" => Some(Self::ColorSpace),
            b"abst" => Some(Self::Abstract),
            b"nmcl" => Some(Self::NamedColor),
            _ => None,
        }
    }

    pub fn signature(&self) -> Signature {
        Signature::from_bytes(match self {
            Self::Input => *b"scnr",
            Self::Display => *b"mntr",
            Self::Output => *b"prtr",
            Self::DeviceLink => *b"link",
            Self::ColorSpace => *b"spac",
            Self::Abstract => *b"abst",
            Self::NamedColor => *b"nmcl",
        })
    }

    /// Human-readable name (ICC.1:2022 Table 11)
    pub fn description(&self) -> &'static str {
        match self {
            Self::Input => "Input Device Profile",
            Self::Display => "Display Device Profile",
            Self::Output => "Output Device Profile",
            Self::DeviceLink => "DeviceLink profile",
            Self::ColorSpace => "ColorSpace Conversion profile",
            Self::Abstract => "Abstract profile",
            Self::NamedColor => "Named colour profile",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header_bytes() -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        data[0..4].copy_from_slice(&(HEADER_SIZE as u32).to_be_bytes());
        data[4..8].copy_from_slice(b"lcms");
        // Version 2.1.0
        data[8] = 2;
        data[9] = 0x10;
        data[12..16].copy_from_slice(b"mntr");
        data[16..20].copy_from_slice(b"RGB ");
        data[20..24].copy_from_slice(b"XYZ ");
        data[24..26].copy_from_slice(&2023u16.to_be_bytes());
        data[26..28].copy_from_slice(&7u16.to_be_bytes());
        data[28..30].copy_from_slice(&14u16.to_be_bytes());
        data[36..40].copy_from_slice(b"acsp");
        data[40..44].copy_from_slice(b"APPL");
        data[56] = 0xAB;
        data[64..68].copy_from_slice(&1u32.to_be_bytes());
        // D50 illuminant
        data[68..80].copy_from_slice(&[
            0x00, 0x00, 0xF6, 0xD6, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0xD3, 0x2D,
        ]);
        data[84] = 0x5A;
        data[127] = 0x01;
        data
    }

    #[test]
    fn test_parse_header_fields() {
        let data = sample_header_bytes();
        let header = IccHeader::parse(&data, None).unwrap();

        assert_eq!(header.size, 128);
        assert_eq!(header.version.triple(), (2, 1, 0));
        assert_eq!(header.device_class, Signature(*b"mntr"));
        assert_eq!(header.profile_class(), Some(ProfileClass::Display));
        assert_eq!(header.creation_date.year, 2023);
        assert_eq!(header.platform.to_string(), "APPL");
        assert_eq!(header.attributes[0], 0xAB);
        assert_eq!(header.rendering_intent, 1);
        assert_eq!(header.profile_id[0], 0x5A);
        assert_eq!(header.reserved[27], 0x01);
    }

    #[test]
    fn test_pack_is_inverse() {
        let data = sample_header_bytes();
        let header = IccHeader::parse(&data, None).unwrap();
        assert_eq!(header.pack(128).as_slice(), data.as_slice());

        let resized = header.pack(4096);
        assert_eq!(&resized[0..4], &4096u32.to_be_bytes());
        assert_eq!(&resized[4..], &data[4..]);
    }

    #[test]
    fn test_header_too_small() {
        let data = vec![0u8; 100];
        assert_eq!(
            IccHeader::parse(&data, None),
            Err(CodecError::truncated("header", 128, 100))
        );
    }

    #[test]
    fn test_bad_magic() {
        let mut data = sample_header_bytes();
        data[36..40].copy_from_slice(b"acsq");
        assert_eq!(
            IccHeader::parse(&data, None),
            Err(CodecError::BadMagic(Signature(*b"acsq")))
        );
    }

    #[test]
    fn test_version_override() {
        let mut data = sample_header_bytes();
        data[10] = 0x12;
        let forced = "4.3.0".parse::<VersionNumber>().unwrap();
        let header = IccHeader::parse(&data, Some(forced)).unwrap();
        assert_eq!(header.version.triple(), (4, 3, 0));
        assert_eq!(&header.pack(128)[8..12], &[4, 0x30, 0, 0]);
    }

    #[test]
    fn test_version_parse() {
        assert_eq!("2.4.1".parse(), Ok(VersionNumber::new(2, 4, 1)));
        for bad in ["4.3", "4.3.0.1", "a.b.c", "4.16.0", "256.0.0", ""] {
            assert!(bad.parse::<VersionNumber>().is_err(), "{bad}");
        }
        let v = VersionNumber::from_be_bytes([4, 0x43, 0xBE, 0xEF]);
        assert_eq!(v.to_string(), "4.4.3");
        assert_eq!(v.to_be_bytes(), [4, 0x43, 0xBE, 0xEF]);
    }

    #[test]
    fn test_new_header_packs_and_parses() {
        let header = IccHeader::new(
            VersionNumber::new(4, 3, 0),
            ProfileClass::Display.signature(),
            Signature(*b"RGB "),
            Signature(*b"XYZ "),
        );
        let packed = header.pack(128);
        assert_eq!(&packed[36..40], b"acsp");
        assert_eq!(&packed[68..80], &sample_header_bytes()[68..80]);

        let back = IccHeader::parse(&packed, None).unwrap();
        assert_eq!(back, header);
        assert_eq!(back.device_class_name(), Some("Display Device Profile"));
    }

    #[test]
    fn test_profile_class_roundtrip() {
        for class in [
            ProfileClass::Input,
            ProfileClass::Display,
            ProfileClass::Output,
            ProfileClass::DeviceLink,
            ProfileClass::NamedColor,
        ] {
            let back = ProfileClass::from_signature(class.signature());
            assert_eq!(Some(class), back);
        }
        assert_eq!(ProfileClass::from_signature(Signature(*b"xxxx")), None);
    }
}
