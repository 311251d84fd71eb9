// Record tag codec
//
// Every NMF record starts with one 32-bit tag word:
//   bits 0-7   fixed 0xFF marker
//   bits 8-15  record kind
//   bits 16-31 payload size in 32-bit words

use crate::error::{NmfError, Result};

/// Marker byte carried in the low bits of every tag word
pub const TAG_MARKER: u8 = 0xFF;

/// Record kinds used by the container layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    Header = 1,
    Track = 2,
    Index = 3,
}

impl ChunkKind {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(ChunkKind::Header),
            2 => Some(ChunkKind::Track),
            3 => Some(ChunkKind::Index),
            _ => None,
        }
    }
}

/// Decoded record tag: kind byte plus payload size in words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub kind: u8,
    pub size: u16,
}

impl Tag {
    pub fn new(kind: u8, size: u16) -> Self {
        Tag { kind, size }
    }

    /// Pack this tag into its wire word
    pub fn encode(self) -> u32 {
        TAG_MARKER as u32 | (self.kind as u32) << 8 | (self.size as u32) << 16
    }

    /// Unpack a wire word, checking the marker byte
    pub fn decode(word: u32) -> Result<Self> {
        if word & 0xFF != TAG_MARKER as u32 {
            return Err(NmfError::InvalidMarker(word));
        }
        Ok(Tag {
            kind: (word >> 8) as u8,
            size: (word >> 16) as u16,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_bijection() {
        for kind in [0u8, 1, 2, 3, 0x7F, 0xFF] {
            for size in [0u16, 1, 2, 3, 0x00FF, 0x7FFF, 0xFFFF] {
                let tag = Tag::new(kind, size);
                assert_eq!(Tag::decode(tag.encode()).unwrap(), tag);
            }
        }
    }

    #[test]
    fn test_known_encoding() {
        // Header record with a 2-word payload, as written at the top of
        // every container.
        assert_eq!(Tag::new(ChunkKind::Header as u8, 2).encode(), 0x0002_01FF);
    }

    #[test]
    fn test_decode_rejects_bad_marker() {
        match Tag::decode(0x0002_01FE) {
            Err(NmfError::InvalidMarker(word)) => assert_eq!(word, 0x0002_01FE),
            other => panic!("expected InvalidMarker, got {:?}", other),
        }
    }

    #[test]
    fn test_chunk_kind_from_byte() {
        assert_eq!(ChunkKind::from_byte(1), Some(ChunkKind::Header));
        assert_eq!(ChunkKind::from_byte(2), Some(ChunkKind::Track));
        assert_eq!(ChunkKind::from_byte(3), Some(ChunkKind::Index));
        assert_eq!(ChunkKind::from_byte(0), None);
        assert_eq!(ChunkKind::from_byte(4), None);
    }
}
