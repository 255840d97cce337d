//! Profile Rendering
//!
//! Read-only projections of a [`Profile`]:
//! - [`to_structured_map`]: every header field and tag, in order
//! - [`to_display_string`]: the same tree as indented (or one-line) text
//! - [`to_summary_map`]: a short digest of the commonly inspected tags
//!
//! Raw bytes and free text are escaped so that only `[A-Za-z0-9._-]` appear
//! literally; everything else is written as `\xHH`.

use std::fmt::{self, Write};

use serde_json::{Map, Value, json};

use super::header::IccHeader;
use super::profile::{Profile, TagEntry};
use super::signatures::phosphor_colorant_name;
use super::tags::{Element, ElementData, MlucData};

/// Indent unit for the multi-line text dump
const TAB: &str = "  ";

fn is_portable(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Escape raw bytes, one `\xHH` per byte outside the portable set
pub fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        let c = b as char;
        if is_portable(c) {
            out.push(c);
        } else {
            let _ = write!(out, "\\x{:02x}", b);
        }
    }
    out
}

/// Escape text, one `\x..` (code point in hex) per char outside the portable set
pub fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if is_portable(c) {
            out.push(c);
        } else {
            let _ = write!(out, "\\x{:02x}", c as u32);
        }
    }
    out
}

fn join<T: fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Header fields, with `profile_size` as the size the profile would encode to
pub fn header_map(header: &IccHeader, profile_size: usize) -> Map<String, Value> {
    let mut m = Map::new();
    m.insert("profile_size".into(), json!(profile_size));
    m.insert(
        "preferred_cmm_type".into(),
        json!(escape_bytes(&header.cmm_type.to_be_bytes())),
    );
    m.insert(
        "profile_version_number".into(),
        json!(header.version.to_string()),
    );
    m.insert(
        "profile_device_class".into(),
        json!(header.device_class.to_string()),
    );
    m.insert("color_space".into(), json!(header.color_space.to_string()));
    m.insert(
        "profile_connection_space".into(),
        json!(header.pcs.to_string()),
    );
    m.insert(
        "date_and_time".into(),
        json!(header.creation_date.to_string()),
    );
    m.insert(
        "profile_file_signature".into(),
        json!(header.signature.to_string()),
    );
    m.insert(
        "primary_platform_signature".into(),
        json!(escape_bytes(header.platform.as_bytes())),
    );
    m.insert("profile_flags".into(), json!(header.flags));
    m.insert("device_manufacturer".into(), json!(header.manufacturer));
    m.insert("device_model".into(), json!(header.model));
    m.insert(
        "device_attributes".into(),
        json!(escape_bytes(&header.attributes)),
    );
    m.insert("rendering_intent".into(), json!(header.rendering_intent));
    m.insert(
        "xyz_illuminant".into(),
        json!(header.illuminant.to_string()),
    );
    m.insert("profile_creator_field".into(), json!(header.creator));
    m.insert("profile_id".into(), json!(escape_bytes(&header.profile_id)));
    m.insert("reserved".into(), json!(escape_bytes(&header.reserved)));
    m
}

/// Fields of one element, sizes and string offsets as encoded
pub fn element_map(element: &Element) -> Map<String, Value> {
    let packed = element.pack();
    let mut m = Map::new();
    m.insert("element_size".into(), json!(packed.len()));
    m.insert(
        "element_signature".into(),
        json!(element.type_signature.to_string()),
    );

    let trailing: &[u8] = match &element.data {
        ElementData::Text(t) => {
            m.insert("reserved".into(), json!(t.reserved));
            m.insert("text".into(), json!(escape_bytes(&t.text)));
            &[]
        }
        ElementData::TextDescription(d) => {
            m.insert("reserved".into(), json!(d.reserved));
            m.insert(
                "ascii_invariant_description".into(),
                json!(escape_bytes(&d.ascii)),
            );
            m.insert("unicode_language_code".into(), json!(d.unicode_language));
            m.insert(
                "unicode_localizable_description".into(),
                json!(escape_str(&d.unicode_string())),
            );
            m.insert("scriptcode_code".into(), json!(d.scriptcode_code));
            let mac_len = (d.macintosh_length as usize).min(d.macintosh_description.len());
            m.insert(
                "macintosh_description".into(),
                json!(escape_bytes(&d.macintosh_description[..mac_len])),
            );
            d.trailing.as_slice()
        }
        ElementData::MultiLocalizedUnicode(mluc) => {
            m.insert("reserved".into(), json!(mluc.reserved));
            m.insert("number_of_names".into(), json!(mluc.records.len()));
            m.insert("name_record_size".into(), json!(mluc.record_size));
            let placed = MlucData::parse(&packed).map(|p| p.records);
            let names: Vec<Value> = placed
                .as_deref()
                .unwrap_or(mluc.records.as_slice())
                .iter()
                .map(|r| {
                    json!({
                        "language_code": escape_bytes(&r.language),
                        "country_code": escape_bytes(&r.country),
                        "length": r.length,
                        "offset": r.offset,
                        "content": escape_str(&r.text()),
                    })
                })
                .collect();
            m.insert("names".into(), Value::Array(names));
            mluc.trailing.as_slice()
        }
        ElementData::Xyz(xyz) => {
            m.insert("reserved".into(), json!(xyz.reserved));
            let numbers: Vec<Value> = xyz.values.iter().map(|v| json!(v.to_f64())).collect();
            m.insert("numbers".into(), Value::Array(numbers));
            &[]
        }
        ElementData::S15Fixed16Array(arr) => {
            m.insert("reserved".into(), json!(arr.reserved));
            let numbers: Vec<f64> = arr.values.iter().map(|v| v.to_f64()).collect();
            m.insert("numbers".into(), json!(numbers));
            &[]
        }
        ElementData::Curve(curve) => {
            m.insert("reserved".into(), json!(curve.reserved));
            m.insert("curve_count".into(), json!(curve.entries.len()));
            m.insert("curve_value".into(), json!(curve.entries));
            curve.trailing.as_slice()
        }
        ElementData::ParametricCurve(para) => {
            m.insert("reserved".into(), json!(para.reserved));
            m.insert("function_type".into(), json!(para.function));
            m.insert("reserved2".into(), json!(para.reserved2));
            let params: Vec<f64> = para.params.iter().map(|p| p.to_f64()).collect();
            m.insert("parameters".into(), json!(params));
            para.trailing.as_slice()
        }
        ElementData::Chromaticity(chrm) => {
            m.insert("reserved".into(), json!(chrm.reserved));
            m.insert("num_device_channels".into(), json!(chrm.coordinates.len()));
            m.insert(
                "phosphor_colorant_type".into(),
                json!(chrm.colorant_type),
            );
            let coords: Vec<Value> = chrm
                .coordinates
                .iter()
                .map(|(x, y)| json!([x.to_f64(), y.to_f64()]))
                .collect();
            m.insert("cie_xy_coordinates".into(), Value::Array(coords));
            chrm.trailing.as_slice()
        }
        ElementData::Unimplemented { payload } => {
            let rest = payload.get(4..).unwrap_or_default();
            m.insert("remaining".into(), json!(escape_bytes(rest)));
            &[]
        }
    };

    if !trailing.is_empty() {
        m.insert("trailing".into(), json!(escape_bytes(trailing)));
    }
    m
}

/// Fields of one directory entry; `entry` carries its encoded offset and size
fn tag_map(profile: &Profile, entry: &TagEntry) -> Map<String, Value> {
    let mut m = Map::new();
    m.insert(
        "header_signature".into(),
        json!(entry.signature.to_string()),
    );
    m.insert("header_offset".into(), json!(entry.offset));
    m.insert("header_size".into(), json!(entry.size));
    m.insert("element_id".into(), json!(entry.element.index()));
    if let Some(element) = profile.element(entry.element) {
        m.extend(element_map(element));
    }
    m
}

/// Full ordered field map: header fields, `tag_count`, then `tag` entries in
/// directory order (shared elements appear under every entry)
///
/// Sizes and offsets are the ones [`Profile::encode`] would write.
pub fn to_structured_map(profile: &Profile) -> Map<String, Value> {
    let mut m = header_map(profile.header(), profile.encoded_size());
    m.insert("tag_count".into(), json!(profile.tag_count()));
    let tags: Vec<Value> = profile
        .encoded_entries()
        .iter()
        .map(|entry| Value::Object(tag_map(profile, entry)))
        .collect();
    m.insert("tag".into(), Value::Array(tags));
    m
}

/// Text dump of [`to_structured_map`]
///
/// `compact` puts everything on one line separated by spaces; otherwise each
/// field gets its own line, nested blocks indented by two spaces.
pub fn to_display_string(profile: &Profile, compact: bool) -> String {
    let map = to_structured_map(profile);
    let mut out = String::new();
    for (key, value) in &map {
        write_value(&mut out, Some(key), value, 0, compact);
    }
    out.trim().to_string()
}

fn write_prefix(out: &mut String, depth: usize, compact: bool) {
    if compact {
        out.push(' ');
    } else {
        out.push('\n');
        for _ in 0..depth {
            out.push_str(TAB);
        }
    }
}

fn write_value(out: &mut String, key: Option<&str>, value: &Value, depth: usize, compact: bool) {
    write_prefix(out, depth, compact);
    match value {
        Value::Object(map) => {
            if let Some(key) = key {
                out.push_str(key);
                out.push(' ');
            }
            out.push('{');
            for (k, v) in map {
                write_value(out, Some(k), v, depth + 1, compact);
            }
            write_prefix(out, depth, compact);
            out.push('}');
        }
        Value::Array(items) => {
            if let Some(key) = key {
                out.push_str(key);
                out.push(' ');
            }
            out.push('[');
            for item in items {
                write_value(out, None, item, depth + 1, compact);
            }
            write_prefix(out, depth, compact);
            out.push(']');
        }
        Value::String(s) => {
            if let Some(key) = key {
                let _ = write!(out, "{}: ", key);
            }
            let _ = write!(out, "\"{}\"", s);
        }
        scalar => {
            if let Some(key) = key {
                let _ = write!(out, "{}: ", key);
            }
            let _ = write!(out, "{}", scalar);
        }
    }
    if key.is_none() {
        out.push(',');
    }
}

fn trc_summary(element: &Element) -> Option<String> {
    match &element.data {
        ElementData::ParametricCurve(para) => Some(join(para.params.iter().map(|p| p.to_f64()))),
        ElementData::Curve(curve) => Some(join(&curve.entries)),
        _ => None,
    }
}

fn first_xyz(element: &Element) -> Option<String> {
    element.as_xyz()?.first().map(|v| v.to_string())
}

/// Short digest of the header and the commonly inspected tags
pub fn to_summary_map(profile: &Profile) -> Map<String, Value> {
    let header = profile.header();
    let mut m = Map::new();
    m.insert("profile_version".into(), json!(header.version.to_string()));
    m.insert(
        "profile_class".into(),
        json!(header
            .device_class_name()
            .map_or_else(|| header.device_class.to_string(), str::to_string)),
    );
    m.insert("color_space".into(), json!(header.color_space.to_string()));
    m.insert(
        "profile_connection_space".into(),
        json!(header.pcs.to_string()),
    );
    m.insert(
        "xyz_illuminant".into(),
        json!(header.illuminant.to_string()),
    );

    for entry in profile.entries() {
        let Some(element) = profile.element(entry.element) else {
            continue;
        };
        let put = |m: &mut Map<String, Value>, key: &str, value: Option<String>| {
            if let Some(value) = value {
                m.insert(key.into(), json!(value));
            }
        };

        match entry.signature.as_bytes() {
            b"desc" => put(&mut m, "profile_description", element.text()),
            b"cprt" => put(&mut m, "profile_copyright", element.text()),
            b"dmdd" => put(&mut m, "device_model_desc", element.text()),
            b"dmnd" => put(&mut m, "device_mfg_desc", element.text()),
            b"wtpt" => put(&mut m, "media_white_point", first_xyz(element)),
            b"bkpt" => put(&mut m, "media_black_point", first_xyz(element)),
            b"rXYZ" => put(&mut m, "red_matrix_column", first_xyz(element)),
            b"gXYZ" => put(&mut m, "green_matrix_column", first_xyz(element)),
            b"bXYZ" => put(&mut m, "blue_matrix_column", first_xyz(element)),
            b"rTRC" => put(&mut m, "red_trc", trc_summary(element)),
            b"gTRC" => put(&mut m, "green_trc", trc_summary(element)),
            b"bTRC" => put(&mut m, "blue_trc", trc_summary(element)),
            b"kTRC" => put(&mut m, "gray_trc", trc_summary(element)),
            b"chad" => {
                if let ElementData::S15Fixed16Array(arr) = &element.data {
                    put(
                        &mut m,
                        "chromatic_adaptation",
                        Some(join(arr.values.iter().map(|v| v.to_f64()))),
                    );
                }
            }
            b"chrm" => {
                if let ElementData::Chromaticity(chrm) = &element.data {
                    m.insert(
                        "chromaticity_channels".into(),
                        json!(chrm.coordinates.len()),
                    );
                    m.insert(
                        "chromaticity_phosphor_colorant_type".into(),
                        json!(phosphor_colorant_name(chrm.colorant_type).unwrap_or("unknown")),
                    );
                    for (i, (x, y)) in chrm.coordinates.iter().enumerate() {
                        m.insert(
                            format!("chromaticity_channel_{}", i),
                            json!(join([x.to_f64(), y.to_f64()])),
                        );
                    }
                }
            }
            _ => log::debug!("no summary for tag '{}'", entry.signature),
        }
    }
    m
}
