//! Profile byte builder
//!
//! Lays out a 128-byte header, the tag table, and elements back to back in
//! the order they were added. Tags added with [`ProfileBuilder::shared_tag`]
//! point at an existing element's offset.

/// Builder for synthetic ICC profile bytes
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    version: (u8, u8, u8),
    device_class: [u8; 4],
    color_space: [u8; 4],
    pcs: [u8; 4],
    declared_size: Option<u32>,
    tags: Vec<([u8; 4], usize)>,
    elements: Vec<Vec<u8>>,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileBuilder {
    /// RGB display profile, version 4.3.0, no tags
    pub fn new() -> Self {
        Self {
            version: (4, 3, 0),
            device_class: *b"mntr",
            color_space: *b"RGB ",
            pcs: *b"XYZ ",
            declared_size: None,
            tags: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn version(mut self, major: u8, minor: u8, bugfix: u8) -> Self {
        self.version = (major, minor, bugfix);
        self
    }

    pub fn device_class(mut self, class: &[u8; 4]) -> Self {
        self.device_class = *class;
        self
    }

    /// Write this value in the header size field instead of the real size
    pub fn declared_size(mut self, size: u32) -> Self {
        self.declared_size = Some(size);
        self
    }

    /// Add a tag with its own element
    pub fn tag(mut self, signature: &[u8; 4], payload: Vec<u8>) -> Self {
        self.elements.push(payload);
        self.tags.push((*signature, self.elements.len() - 1));
        self
    }

    /// Add a tag sharing the element of the first tag named `existing`
    ///
    /// # Panics
    ///
    /// If no tag named `existing` was added before.
    pub fn shared_tag(mut self, signature: &[u8; 4], existing: &[u8; 4]) -> Self {
        let index = self
            .tags
            .iter()
            .find(|(sig, _)| sig == existing)
            .map(|&(_, index)| index)
            .unwrap_or_else(|| panic!("no tag {:?} to share", existing));
        self.tags.push((*signature, index));
        self
    }

    /// Offset of the first element
    pub fn region_start(&self) -> usize {
        128 + 4 + 12 * self.tags.len()
    }

    /// (offset, size) of each element, in the order added
    pub fn element_layout(&self) -> Vec<(usize, usize)> {
        let mut offset = self.region_start();
        self.elements
            .iter()
            .map(|e| {
                let placed = (offset, e.len());
                offset += e.len();
                placed
            })
            .collect()
    }

    fn header(&self, size: u32) -> Vec<u8> {
        let (major, minor, bugfix) = self.version;
        let mut h = vec![0u8; 128];
        h[0..4].copy_from_slice(&self.declared_size.unwrap_or(size).to_be_bytes());
        h[4..8].copy_from_slice(b"oxic");
        h[8] = major;
        h[9] = (minor << 4) | (bugfix & 0x0F);
        h[12..16].copy_from_slice(&self.device_class);
        h[16..20].copy_from_slice(&self.color_space);
        h[20..24].copy_from_slice(&self.pcs);
        // 2024-03-01 12:30:00
        for (i, v) in [2024u16, 3, 1, 12, 30, 0].iter().enumerate() {
            h[24 + i * 2..26 + i * 2].copy_from_slice(&v.to_be_bytes());
        }
        h[36..40].copy_from_slice(b"acsp");
        h[40..44].copy_from_slice(b"APPL");
        // D50 illuminant
        h[68..80].copy_from_slice(&[
            0x00, 0x00, 0xF6, 0xD6, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0xD3, 0x2D,
        ]);
        h[80..84].copy_from_slice(b"oxic");
        h
    }

    /// Assemble the profile bytes
    pub fn build(&self) -> Vec<u8> {
        let layout = self.element_layout();
        let total = self.region_start() + self.elements.iter().map(Vec::len).sum::<usize>();

        let mut out = self.header(total as u32);
        out.extend_from_slice(&(self.tags.len() as u32).to_be_bytes());
        for (signature, index) in &self.tags {
            let (offset, size) = layout[*index];
            out.extend_from_slice(signature);
            out.extend_from_slice(&(offset as u32).to_be_bytes());
            out.extend_from_slice(&(size as u32).to_be_bytes());
        }
        for element in &self.elements {
            out.extend_from_slice(element);
        }
        out
    }
}
