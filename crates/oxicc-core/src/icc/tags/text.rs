//! Text Tag Types
//!
//! ICC profiles can contain text in several formats:
//! - text: Simple ASCII text
//! - desc: Profile description (v2 format)
//! - mluc: Multi-localized Unicode (v4 format)
//!
//! Text is kept as raw bytes / UTF-16 code units so that packing reproduces
//! the original payload even when it holds invalid characters.
//!
//! See ICC.1:2022 Sections 10.24 (text), 10.15 (mluc) and ICC.1:2001-04
//! Section 6.5.17 (textDescriptionType).

use crate::icc::error::CodecError;
use crate::icc::types::ByteReader;

/// Size of the fixed Macintosh description buffer in 'desc'
pub const MAC_DESCRIPTION_SIZE: usize = 67;

/// 'text' element: reserved word followed by text up to the end of the payload
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextData {
    pub reserved: u32,
    /// Raw text bytes (ASCII, possibly NUL terminated)
    pub text: Vec<u8>,
}

impl TextData {
    /// Create from a string
    pub fn new(text: &str) -> Self {
        Self {
            reserved: 0,
            text: text.as_bytes().to_vec(),
        }
    }

    pub(crate) fn parse(payload: &[u8]) -> Result<Self, CodecError> {
        let mut r = ByteReader::new(payload, "text element");
        r.take(4)?;
        let reserved = r.read_u32()?;
        Ok(Self {
            reserved,
            text: r.rest().to_vec(),
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.reserved.to_be_bytes());
        out.extend_from_slice(&self.text);
    }

    /// Text with trailing NULs removed
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(trim_nul(&self.text)).into_owned()
    }
}

/// 'desc' element (v2 textDescriptionType)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDescriptionData {
    pub reserved: u32,
    /// ASCII invariant description, including its NUL terminator
    pub ascii: Vec<u8>,
    pub unicode_language: u32,
    /// Unicode localizable description as UTF-16 code units
    pub unicode: Vec<u16>,
    pub scriptcode_code: u16,
    pub macintosh_length: u8,
    pub macintosh_description: [u8; MAC_DESCRIPTION_SIZE],
    /// Bytes after the Macintosh buffer (usually alignment padding)
    pub trailing: Vec<u8>,
}

impl TextDescriptionData {
    pub(crate) fn parse(payload: &[u8]) -> Result<Self, CodecError> {
        let mut r = ByteReader::new(payload, "desc element");
        r.take(4)?;
        let reserved = r.read_u32()?;

        let ascii_len = r.read_u32()? as usize;
        let ascii = r.take(ascii_len)?.to_vec();

        let unicode_language = r.read_u32()?;
        // Unicode count is in 2-byte characters
        let unicode_count = r.read_u32()? as usize;
        let unicode_bytes = r.take(unicode_count.saturating_mul(2))?;
        let unicode = unicode_bytes
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();

        let scriptcode_code = r.read_u16()?;
        let macintosh_length = r.read_u8()?;
        let macintosh_description = r.read_array()?;

        Ok(Self {
            reserved,
            ascii,
            unicode_language,
            unicode,
            scriptcode_code,
            macintosh_length,
            macintosh_description,
            trailing: r.rest().to_vec(),
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.reserved.to_be_bytes());
        out.extend_from_slice(&(self.ascii.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.ascii);
        out.extend_from_slice(&self.unicode_language.to_be_bytes());
        out.extend_from_slice(&(self.unicode.len() as u32).to_be_bytes());
        for unit in &self.unicode {
            out.extend_from_slice(&unit.to_be_bytes());
        }
        out.extend_from_slice(&self.scriptcode_code.to_be_bytes());
        out.push(self.macintosh_length);
        out.extend_from_slice(&self.macintosh_description);
        out.extend_from_slice(&self.trailing);
    }

    /// ASCII description without NUL padding
    pub fn ascii_string(&self) -> String {
        String::from_utf8_lossy(trim_nul(&self.ascii)).into_owned()
    }

    pub fn unicode_string(&self) -> String {
        decode_utf16(&self.unicode)
    }
}

/// One 'mluc' name record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MlucRecord {
    pub language: [u8; 2],
    pub country: [u8; 2],
    /// Content as UTF-16 code units
    pub content: Vec<u16>,
    /// Content length in bytes, as decoded
    pub length: u32,
    /// Content offset from the element start, as decoded; written back
    /// unchanged while the string storage still holds this content there
    pub offset: u32,
}

impl MlucRecord {
    pub fn new(language: [u8; 2], country: [u8; 2], text: &str) -> Self {
        let content: Vec<u16> = text.encode_utf16().collect();
        Self {
            language,
            country,
            length: (content.len() * 2) as u32,
            content,
            offset: 0,
        }
    }

    pub fn text(&self) -> String {
        decode_utf16(&self.content)
    }
}

/// 'mluc' element (multiLocalizedUnicodeType)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MlucData {
    pub reserved: u32,
    /// Size of each name record, normally 12
    pub record_size: u32,
    pub records: Vec<MlucRecord>,
    /// Bytes after the last content string (usually alignment padding)
    pub trailing: Vec<u8>,
    /// Offset the decoded string storage started at
    storage_start: usize,
    /// Everything after the record table as decoded: strings, gaps, padding
    storage: Vec<u8>,
}

/// Bytes before the first name record: signature, reserved, count, record size
const MLUC_TABLE_START: usize = 16;
const MLUC_MIN_RECORD_SIZE: u32 = 12;

impl MlucData {
    pub fn new(records: Vec<MlucRecord>) -> Self {
        Self {
            reserved: 0,
            record_size: MLUC_MIN_RECORD_SIZE,
            records,
            trailing: Vec::new(),
            storage_start: 0,
            storage: Vec::new(),
        }
    }

    pub(crate) fn parse(payload: &[u8]) -> Result<Self, CodecError> {
        let mut r = ByteReader::new(payload, "mluc element");
        r.take(4)?;
        let reserved = r.read_u32()?;
        let count = r.read_u32()? as usize;
        let record_size = r.read_u32()?;

        if record_size < MLUC_MIN_RECORD_SIZE {
            return Err(CodecError::BadLength {
                context: "mluc record",
                len: record_size as usize,
            });
        }

        let table_len = count
            .checked_mul(record_size as usize)
            .ok_or_else(|| CodecError::truncated("mluc record table", usize::MAX, payload.len()))?;
        let table = r.take(table_len)?;
        let table_end = MLUC_TABLE_START + table_len;
        let mut content_end = table_end;

        let mut records = Vec::with_capacity(count);
        for record in table.chunks_exact(record_size as usize) {
            let mut rr = ByteReader::new(record, "mluc record");
            let language = rr.read_array()?;
            let country = rr.read_array()?;
            let length = rr.read_u32()?;
            let offset = rr.read_u32()?;

            if length % 2 != 0 {
                return Err(CodecError::BadLength {
                    context: "mluc string",
                    len: length as usize,
                });
            }

            let start = offset as usize;
            let end = start
                .checked_add(length as usize)
                .filter(|&end| end <= payload.len())
                .ok_or_else(|| {
                    CodecError::truncated(
                        "mluc string",
                        start.saturating_add(length as usize),
                        payload.len(),
                    )
                })?;
            content_end = content_end.max(end);

            let content = payload[start..end]
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();

            records.push(MlucRecord {
                language,
                country,
                content,
                length,
                offset,
            });
        }

        Ok(Self {
            reserved,
            record_size,
            records,
            trailing: payload[content_end..].to_vec(),
            storage_start: table_end,
            storage: payload[table_end..].to_vec(),
        })
    }

    /// Whether every record still finds its own content at its decoded
    /// offset inside the decoded string storage
    fn storage_matches(&self, table_end: usize) -> bool {
        self.storage_start == table_end
            && self.records.iter().all(|record| {
                let length = record.content.len() * 2;
                if length == 0 {
                    return record.length == 0;
                }
                let Some(start) = (record.offset as usize).checked_sub(table_end) else {
                    return false;
                };
                record.length as usize == length
                    && self
                        .storage
                        .get(start..start + length)
                        .is_some_and(|bytes| {
                            bytes
                                .chunks_exact(2)
                                .zip(&record.content)
                                .all(|(b, &unit)| u16::from_be_bytes([b[0], b[1]]) == unit)
                        })
            })
    }

    /// Write the element body
    ///
    /// While every record still points at its own content, the decoded
    /// offsets and string storage are written back as they were. Otherwise
    /// strings are laid out after the record table in record order, identical
    /// strings stored once, followed by the trailing bytes.
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        let record_size = self.record_size.max(MLUC_MIN_RECORD_SIZE);
        let record_padding = (record_size - MLUC_MIN_RECORD_SIZE) as usize;
        let table_end = MLUC_TABLE_START + self.records.len() * record_size as usize;

        out.extend_from_slice(&self.reserved.to_be_bytes());
        out.extend_from_slice(&(self.records.len() as u32).to_be_bytes());
        out.extend_from_slice(&record_size.to_be_bytes());

        let write_record = |out: &mut Vec<u8>, record: &MlucRecord, offset: u32| {
            out.extend_from_slice(&record.language);
            out.extend_from_slice(&record.country);
            out.extend_from_slice(&((record.content.len() * 2) as u32).to_be_bytes());
            out.extend_from_slice(&offset.to_be_bytes());
            out.resize(out.len() + record_padding, 0);
        };

        if self.storage_matches(table_end) {
            for record in &self.records {
                write_record(out, record, record.offset);
            }
            out.extend_from_slice(&self.storage);
            return;
        }

        let mut strings: Vec<(&[u16], u32)> = Vec::new();
        let mut next = table_end;
        for record in &self.records {
            let content = record.content.as_slice();
            let offset = match strings.iter().find(|(s, _)| *s == content) {
                Some(&(_, offset)) => offset,
                None => {
                    let offset = next as u32;
                    strings.push((content, offset));
                    next += content.len() * 2;
                    offset
                }
            };
            write_record(out, record, offset);
        }

        for (content, _) in &strings {
            for unit in *content {
                out.extend_from_slice(&unit.to_be_bytes());
            }
        }
        out.extend_from_slice(&self.trailing);
    }

    /// Text of the first record (usually en-US)
    pub fn first_text(&self) -> Option<String> {
        self.records.first().map(MlucRecord::text)
    }

    /// Get text for a specific language code
    pub fn get_language(&self, lang: &str) -> Option<String> {
        self.records
            .iter()
            .find(|r| r.language.as_slice() == lang.as_bytes())
            .map(MlucRecord::text)
    }
}

fn trim_nul(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}

/// Decode UTF-16 code units, dropping a NUL terminator if present
fn decode_utf16(units: &[u16]) -> String {
    let end = units.iter().position(|&c| c == 0).unwrap_or(units.len());
    String::from_utf16_lossy(&units[..end])
}
