//! ICC Profile
//!
//! Tag table parsing, the element pool, and profile assembly.
//!
//! # Structure
//!
//! An ICC profile consists of:
//! 1. A 128-byte header
//! 2. A tag table: count, then `count × (signature, offset, size)`
//! 3. Tag data (entries may share an element by pointing at one offset)
//!
//! Elements live in a pool keyed by [`ElementId`], assigned in ascending
//! order of the offset they were decoded from. Directory entries refer to
//! pool ids, never to byte offsets, so offsets are free to move on encode.
//!
//! # Usage
//!
//! ```ignore
//! let decoded = Profile::decode(&bytes, &DecodeOptions::default())?;
//! let mut profile = decoded.profile;
//! profile.remove_copyright();
//! let out = profile.encode();
//! ```

use std::collections::BTreeMap;
use std::fmt;

use super::diagnostics::Diagnostic;
use super::error::CodecError;
use super::header::{HEADER_SIZE, IccHeader, VersionNumber};
use super::signatures::tag_info;
use super::tags::Element;
use super::types::{ByteReader, Signature};

/// Size of one tag table entry
pub const TAG_ENTRY_SIZE: usize = 12;

/// Offset of the first element when a profile has `count` tags
pub const fn element_region_start(count: usize) -> usize {
    HEADER_SIZE + 4 + TAG_ENTRY_SIZE * count
}

/// Stable handle to an element in a profile's pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

impl ElementId {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tag table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEntry {
    /// Tag signature
    pub signature: Signature,
    /// Element this tag points at
    pub element: ElementId,
    /// Offset the entry was decoded with (0 for entries added in memory);
    /// see [`Profile::encoded_entries`] for the offset it will be written at
    pub offset: u32,
    /// Size the entry was decoded with
    pub size: u32,
}

/// Options for decoding a profile
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Replace the header version number
    pub version_override: Option<VersionNumber>,
}

impl DecodeOptions {
    pub fn with_version_override(mut self, version: VersionNumber) -> Self {
        self.version_override = Some(version);
        self
    }
}

/// A decoded profile together with the advisories found while decoding it
#[derive(Debug, Clone)]
pub struct Decoded {
    pub profile: Profile,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of removing a tag class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemovalReport {
    /// Directory entries deleted
    pub entries_removed: usize,
    /// Pool elements deleted (no longer referenced by any entry)
    pub elements_removed: usize,
}

/// An ICC profile: header, ordered tag directory, and element pool
///
/// Every entry's element is in the pool and every pool element is referenced
/// by at least one entry. The fields are private to keep it that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    header: IccHeader,
    entries: Vec<TagEntry>,
    elements: BTreeMap<ElementId, Element>,
}

impl Profile {
    /// Create an empty profile around a header
    pub fn new(header: IccHeader) -> Self {
        Self {
            header,
            entries: Vec::new(),
            elements: BTreeMap::new(),
        }
    }

    /// Decode a profile from bytes
    pub fn decode(data: &[u8], options: &DecodeOptions) -> Result<Decoded, CodecError> {
        let header = IccHeader::parse(data, options.version_override)?;
        let mut diagnostics = Vec::new();

        if header.size as usize != data.len() {
            diagnostics.push(Diagnostic::ProfileSizeMismatch {
                declared: header.size,
                actual: data.len(),
            });
        }

        let raw_entries = Self::parse_tag_table(data)?;

        // First entry at an offset decides the element's size
        let mut sizes: BTreeMap<u32, u32> = BTreeMap::new();
        for &(signature, offset, size) in &raw_entries {
            let kept = *sizes.entry(offset).or_insert(size);
            if kept != size {
                diagnostics.push(Diagnostic::SharedSizeMismatch {
                    signature,
                    offset,
                    kept_size: kept,
                    declared_size: size,
                });
            }
        }

        let mut elements = BTreeMap::new();
        let mut ids = BTreeMap::new();
        for (index, (&offset, &size)) in sizes.iter().enumerate() {
            let start = offset as usize;
            let end = start
                .checked_add(size as usize)
                .filter(|&end| end <= data.len())
                .ok_or_else(|| {
                    CodecError::truncated(
                        "tag element",
                        start.saturating_add(size as usize),
                        data.len(),
                    )
                })?;

            let id = ElementId(index as u32);
            elements.insert(id, Element::parse(&data[start..end])?);
            ids.insert(offset, id);
        }

        let entries: Vec<TagEntry> = raw_entries
            .iter()
            .map(|&(signature, offset, size)| TagEntry {
                signature,
                element: ids[&offset],
                offset,
                size,
            })
            .collect();

        for entry in &entries {
            let element_type = elements[&entry.element].type_signature;
            match tag_info(entry.signature) {
                None => diagnostics.push(Diagnostic::UnknownTagSignature {
                    signature: entry.signature,
                }),
                Some(info) if !info.element_types.contains(&element_type) => {
                    diagnostics.push(Diagnostic::UnexpectedElementType {
                        signature: entry.signature,
                        element_type,
                    })
                }
                Some(_) => {}
            }
        }

        log::debug!(
            "decoded {} tags sharing {} elements",
            entries.len(),
            elements.len()
        );
        for diagnostic in &diagnostics {
            log::warn!("{}", diagnostic);
        }

        Ok(Decoded {
            profile: Self {
                header,
                entries,
                elements,
            },
            diagnostics,
        })
    }

    /// Parse the tag table into (signature, offset, size) triples
    fn parse_tag_table(data: &[u8]) -> Result<Vec<(Signature, u32, u32)>, CodecError> {
        let mut r = ByteReader::new(data, "tag table");
        r.take(HEADER_SIZE)?;
        let count = r.read_u32()? as usize;

        let table_len = count.checked_mul(TAG_ENTRY_SIZE).ok_or_else(|| {
            CodecError::truncated("tag table", usize::MAX, data.len())
        })?;
        let mut table = ByteReader::new(r.take(table_len)?, "tag table");

        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let signature = table.read_signature()?;
            let offset = table.read_u32()?;
            let size = table.read_u32()?;
            entries.push((signature, offset, size));
        }
        Ok(entries)
    }

    /// Pack pool elements in id order, recording each one's region offset
    /// and length
    fn pack_elements(&self) -> (Vec<u8>, BTreeMap<ElementId, (usize, usize)>) {
        let mut region = Vec::new();
        let mut placement = BTreeMap::new();
        for (&id, element) in &self.elements {
            let packed = element.pack();
            placement.insert(id, (region.len(), packed.len()));
            region.extend_from_slice(&packed);
        }
        (region, placement)
    }

    /// Directory entries with the offsets and sizes of the given placement
    ///
    /// Entries whose element is missing from the placement are left out.
    fn place_entries(&self, placement: &BTreeMap<ElementId, (usize, usize)>) -> Vec<TagEntry> {
        let region_start = element_region_start(self.entries.len());
        self.entries
            .iter()
            .filter_map(|entry| {
                let &(offset, len) = placement.get(&entry.element)?;
                Some(TagEntry {
                    offset: (region_start + offset) as u32,
                    size: len as u32,
                    ..*entry
                })
            })
            .collect()
    }

    /// Serialize the profile
    ///
    /// Elements are packed back to back in pool order directly after the tag
    /// table, with no padding. Offsets, sizes, and the header profile size are
    /// all recomputed.
    pub fn encode(&self) -> Vec<u8> {
        let (region, placement) = self.pack_elements();
        let entries = self.place_entries(&placement);
        if entries.len() != self.entries.len() {
            log::error!(
                "dropping {} tag entries without an element",
                self.entries.len() - entries.len()
            );
        }

        let total = element_region_start(entries.len()) + region.len();
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&self.header.pack(total as u32));
        out.extend_from_slice(&(entries.len() as u32).to_be_bytes());
        for entry in &entries {
            out.extend_from_slice(entry.signature.as_bytes());
            out.extend_from_slice(&entry.offset.to_be_bytes());
            out.extend_from_slice(&entry.size.to_be_bytes());
        }
        out.extend_from_slice(&region);

        debug_assert_eq!(out.len(), total);
        out
    }

    /// Serialize the profile, failing if an entry has no element in the pool
    pub fn try_encode(&self) -> Result<Vec<u8>, CodecError> {
        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| !self.elements.contains_key(&entry.element))
        {
            return Err(CodecError::InconsistentDirectory {
                signature: entry.signature,
                element: entry.element.0,
            });
        }
        Ok(self.encode())
    }

    /// Tag table entries with the offsets and sizes [`Profile::encode`]
    /// writes, in directory order
    pub fn encoded_entries(&self) -> Vec<TagEntry> {
        let (_, placement) = self.pack_elements();
        self.place_entries(&placement)
    }

    /// Size [`Profile::encode`] would produce
    pub fn encoded_size(&self) -> usize {
        let (region, placement) = self.pack_elements();
        element_region_start(self.place_entries(&placement).len()) + region.len()
    }

    /// Remove every entry with the given signature
    ///
    /// Elements that were referenced by a removed entry are deleted only if no
    /// remaining entry still points at them.
    pub fn remove_tag_class(&mut self, signature: Signature) -> RemovalReport {
        let (removed, retained): (Vec<TagEntry>, Vec<TagEntry>) = self
            .entries
            .iter()
            .copied()
            .partition(|entry| entry.signature == signature);

        let mut elements_removed = 0;
        for entry in &removed {
            let still_used = retained.iter().any(|r| r.element == entry.element);
            if !still_used && self.elements.remove(&entry.element).is_some() {
                elements_removed += 1;
            }
        }

        log::debug!(
            "removed {} '{}' entries, {} elements",
            removed.len(),
            signature,
            elements_removed
        );

        self.entries = retained;
        RemovalReport {
            entries_removed: removed.len(),
            elements_removed,
        }
    }

    /// Remove the copyright tag ('cprt')
    pub fn remove_copyright(&mut self) -> RemovalReport {
        self.remove_tag_class(Signature::COPYRIGHT)
    }

    /// Add a tag pointing at a new element
    pub fn push_tag(&mut self, signature: Signature, element: Element) -> ElementId {
        let id = self
            .elements
            .keys()
            .next_back()
            .map_or(ElementId(0), |last| ElementId(last.0 + 1));
        self.elements.insert(id, element);
        self.entries.push(TagEntry {
            signature,
            element: id,
            offset: 0,
            size: 0,
        });
        id
    }

    /// Add a tag sharing an existing element
    pub fn link_tag(&mut self, signature: Signature, element: ElementId) -> Result<(), CodecError> {
        if !self.elements.contains_key(&element) {
            return Err(CodecError::InconsistentDirectory {
                signature,
                element: element.0,
            });
        }
        self.entries.push(TagEntry {
            signature,
            element,
            offset: 0,
            size: 0,
        });
        Ok(())
    }

    pub fn header(&self) -> &IccHeader {
        &self.header
    }

    /// Tag table entries in directory order
    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    pub fn tag_count(&self) -> usize {
        self.entries.len()
    }

    /// Pool elements in id order
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements.iter().map(|(&id, e)| (id, e))
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Mutable access to an element; shared by every entry pointing at it
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Check if profile has a specific tag
    pub fn has_tag(&self, signature: Signature) -> bool {
        self.entries.iter().any(|e| e.signature == signature)
    }

    /// Element of the first entry with the given signature
    pub fn tag(&self, signature: Signature) -> Option<&Element> {
        self.entries
            .iter()
            .find(|e| e.signature == signature)
            .and_then(|e| self.elements.get(&e.element))
    }

    /// Get profile description
    pub fn description(&self) -> Option<String> {
        self.tag(Signature::PROFILE_DESC).and_then(Element::text)
    }

    /// Get copyright text
    pub fn copyright(&self) -> Option<String> {
        self.tag(Signature::COPYRIGHT).and_then(Element::text)
    }
}
