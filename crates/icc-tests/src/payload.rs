//! Element payload encoders
//!
//! Hand-laid element bytes for building test profiles, written against the
//! ICC layout directly rather than through the codec under test.

/// Encode a float as s15Fixed16
pub fn s15(v: f64) -> [u8; 4] {
    ((v * 65536.0).round() as i32).to_be_bytes()
}

/// Encode a float as u16Fixed16
pub fn u16f16(v: f64) -> [u8; 4] {
    ((v * 65536.0).round() as u32).to_be_bytes()
}

fn start(type_sig: &[u8; 4]) -> Vec<u8> {
    let mut out = type_sig.to_vec();
    out.extend_from_slice(&[0, 0, 0, 0]);
    out
}

/// 'text' with a NUL terminator
pub fn text(s: &str) -> Vec<u8> {
    let mut out = start(b"text");
    out.extend_from_slice(s.as_bytes());
    out.push(0);
    out
}

/// 'desc' with an ASCII description only
pub fn desc(ascii: &str) -> Vec<u8> {
    desc_with_unicode(ascii, "")
}

/// 'desc' with ASCII and Unicode descriptions, empty Macintosh description
pub fn desc_with_unicode(ascii: &str, unicode: &str) -> Vec<u8> {
    let mut out = start(b"desc");
    out.extend_from_slice(&(ascii.len() as u32 + 1).to_be_bytes());
    out.extend_from_slice(ascii.as_bytes());
    out.push(0);

    let units: Vec<u16> = unicode.encode_utf16().collect();
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&(units.len() as u32).to_be_bytes());
    for unit in units {
        out.extend_from_slice(&unit.to_be_bytes());
    }

    out.extend_from_slice(&0u16.to_be_bytes());
    out.push(0);
    out.extend_from_slice(&[0u8; 67]);
    out
}

/// 'mluc' with 12-byte records and content in record order
pub fn mluc(records: &[([u8; 2], [u8; 2], &str)]) -> Vec<u8> {
    let mut out = start(b"mluc");
    out.extend_from_slice(&(records.len() as u32).to_be_bytes());
    out.extend_from_slice(&12u32.to_be_bytes());

    let contents: Vec<Vec<u8>> = records
        .iter()
        .map(|(_, _, s)| s.encode_utf16().flat_map(|u| u.to_be_bytes()).collect())
        .collect();

    let mut offset = 16 + 12 * records.len();
    for ((language, country, _), content) in records.iter().zip(&contents) {
        out.extend_from_slice(language);
        out.extend_from_slice(country);
        out.extend_from_slice(&(content.len() as u32).to_be_bytes());
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        offset += content.len();
    }
    for content in &contents {
        out.extend_from_slice(content);
    }
    out
}

/// 'XYZ ' with the given triples
pub fn xyz(values: &[[f64; 3]]) -> Vec<u8> {
    let mut out = start(b"XYZ ");
    for triple in values {
        for &v in triple {
            out.extend_from_slice(&s15(v));
        }
    }
    out
}

/// 'sf32' with the given scalars
pub fn sf32(values: &[f64]) -> Vec<u8> {
    let mut out = start(b"sf32");
    for &v in values {
        out.extend_from_slice(&s15(v));
    }
    out
}

/// 'curv' with the given samples
pub fn curv(entries: &[u16]) -> Vec<u8> {
    let mut out = start(b"curv");
    out.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    for e in entries {
        out.extend_from_slice(&e.to_be_bytes());
    }
    out
}

/// 'para' with the given function type and parameters
pub fn para(function: u16, params: &[f64]) -> Vec<u8> {
    let mut out = start(b"para");
    out.extend_from_slice(&function.to_be_bytes());
    out.extend_from_slice(&[0, 0]);
    for &p in params {
        out.extend_from_slice(&s15(p));
    }
    out
}

/// 'chrm' with the given colorant type and (x, y) pairs
pub fn chrm(colorant_type: u16, coordinates: &[(f64, f64)]) -> Vec<u8> {
    let mut out = start(b"chrm");
    out.extend_from_slice(&(coordinates.len() as u16).to_be_bytes());
    out.extend_from_slice(&colorant_type.to_be_bytes());
    for &(x, y) in coordinates {
        out.extend_from_slice(&u16f16(x));
        out.extend_from_slice(&u16f16(y));
    }
    out
}

/// Element of an arbitrary type: signature followed by `body`
pub fn unknown(type_sig: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = type_sig.to_vec();
    out.extend_from_slice(body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_point_encoders() {
        assert_eq!(s15(1.0), [0, 1, 0, 0]);
        assert_eq!(s15(-1.5), [0xFF, 0xFE, 0x80, 0x00]);
        assert_eq!(u16f16(0.5), [0, 0, 0x80, 0]);
    }

    #[test]
    fn test_mluc_layout() {
        let data = mluc(&[(*b"en", *b"US", "ab"), (*b"de", *b"DE", "c")]);
        assert_eq!(data.len(), 16 + 24 + 6);
        assert_eq!(&data[20..24], &4u32.to_be_bytes());
        assert_eq!(&data[24..28], &40u32.to_be_bytes());
        assert_eq!(&data[36..40], &44u32.to_be_bytes());
    }

    #[test]
    fn test_desc_layout() {
        let data = desc("ab");
        // sig + reserved + len + "ab\0" + lang + count + script + mac len + mac
        assert_eq!(data.len(), 8 + 4 + 3 + 4 + 4 + 2 + 1 + 67);
    }
}
