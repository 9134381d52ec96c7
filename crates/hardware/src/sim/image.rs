//! Loader-facing memory image.
//!
//! The binary format of guest executables is entirely the external loader's
//! concern; the core accepts only this pre-resolved image of byte segments
//! plus an entry point.

/// One contiguous span of bytes to place in guest memory.
#[derive(Clone, Debug)]
pub struct Segment {
    /// Guest address of the first byte.
    pub base: u32,
    /// Raw bytes to copy.
    pub bytes: Vec<u8>,
}

/// A pre-populated instruction/data image and its entry point.
#[derive(Clone, Debug, Default)]
pub struct MemoryImage {
    /// Segments to copy into guest memory, in order.
    pub segments: Vec<Segment>,
    /// Guest entry point (initial PC).
    pub entry: u32,
}

impl MemoryImage {
    /// Creates an empty image with the given entry point.
    pub fn new(entry: u32) -> Self {
        Self {
            segments: Vec::new(),
            entry,
        }
    }

    /// Adds a raw byte segment.
    pub fn with_segment(mut self, base: u32, bytes: Vec<u8>) -> Self {
        self.segments.push(Segment { base, bytes });
        self
    }

    /// Adds a segment of instruction words, serialized big-endian.
    pub fn with_words(self, base: u32, words: &[u32]) -> Self {
        let mut bytes = Vec::with_capacity(words.len() * 4);
        for word in words {
            bytes.extend_from_slice(&word.to_be_bytes());
        }
        self.with_segment(base, bytes)
    }
}
