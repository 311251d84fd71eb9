// NMF container codec
//
// Top-level file layout:
//   magic (u32) | total word count W (u32) | W words of tag-framed records
// The record stream carries one Header, `track_num` scattered Track records
// addressed by their own index byte, and one Index record. Everything is
// little-endian.

use serde::Serialize;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{NmfError, Result};
use crate::tag::{ChunkKind, Tag};
use crate::utils::io::{check_signature, read_le_u32, read_words, write_le_u32, write_words};

/// NMF file magic number (the bytes "NMEF" on disk)
pub const NMF_MAGIC: u32 = 0x4645_4D4E;

/// Four-character codes for known codecs
pub mod fourcc {
    /// Motion JPEG video ("MJPG")
    pub const MJPG: u32 = 0x4750_4A4D;
    /// FLAC audio ("fLaC")
    pub const FLAC: u32 = 0x4361_4C66;
}

const HEADER_WORDS: u16 = 2;
const TRACK_SUBHEADER_WORDS: u16 = 2;
const INDEX_WORDS: u16 = 3;

/// Container header record payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Header {
    /// Total duration in seconds
    pub duration: f32,
    /// Number of slots in the track table
    pub track_num: u32,
}

/// Track type byte of the track subheader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackKind {
    Unknown = 0,
    Video = 1,
    Audio = 2,
}

impl TrackKind {
    /// Unrecognized type bytes fall back to `Unknown`
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => TrackKind::Video,
            2 => TrackKind::Audio,
            _ => TrackKind::Unknown,
        }
    }
}

/// One per-stream descriptor plus its opaque codec configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    /// Slot in the track table; cluster frames reference this value
    pub index: u8,
    pub kind: TrackKind,
    /// Four-character codec code, see [`fourcc`]
    pub codec: u32,
    /// Codec-specific configuration words, may be empty
    pub payload: Vec<u32>,
}

/// Index record payload: seek metadata carried but not interpreted here
///
/// `fp == 0` means the file has no cue table and is meant for sequential
/// streaming only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IndexPointer {
    /// Byte offset of the external cue table
    pub fp: u32,
    /// Timestamp unit in nanoseconds per tick
    pub scale: u32,
    /// Number of clusters the cue table references
    pub count: u32,
}

impl IndexPointer {
    /// Overwrite a previously written index payload in place
    ///
    /// `offset` is the value returned by [`Container::write`]. This is the
    /// second half of the two-phase protocol: write the container with a
    /// placeholder index, append the cluster stream, then patch the real
    /// `fp`/`count` once the cue data is known.
    pub fn patch<W: Write + Seek>(&self, writer: &mut W, offset: u64) -> Result<()> {
        writer.seek(SeekFrom::Start(offset))?;
        write_words(writer, &[self.fp, self.scale, self.count])?;
        Ok(())
    }
}

/// Parsed top-level file structure
///
/// Owns the track table and every track's payload buffer; everything is
/// released when the container is dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    pub header: Header,
    /// Track table; slot `i` always holds the track whose `index` is `i`
    pub tracks: Vec<Track>,
    pub index: IndexPointer,
}

impl Container {
    /// Check whether the stream starts with the NMF magic, restoring the
    /// stream position
    pub fn check_magic<R: Read + Seek>(reader: &mut R) -> Result<bool> {
        Ok(check_signature(reader, NMF_MAGIC)?)
    }

    /// Read and parse a container from the start of `reader`
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let magic = read_le_u32(reader)?;
        if magic != NMF_MAGIC {
            return Err(NmfError::BadMagic(magic));
        }
        let declared = read_le_u32(reader)?;
        let words = read_words(reader, declared)?;
        Self::parse(&words)
    }

    /// Parse the record stream of an already-buffered container body
    pub fn parse(words: &[u32]) -> Result<Self> {
        let mut header: Option<Header> = None;
        let mut slots: Vec<Option<Track>> = Vec::new();
        let mut index = IndexPointer::default();

        let mut cursor = 0usize;
        while cursor < words.len() {
            let tag = Tag::decode(words[cursor])?;
            let end = cursor + 1 + tag.size as usize;
            if end > words.len() {
                return Err(NmfError::TruncatedOrOverrun {
                    declared: words.len() as u32,
                    used: end as u32,
                });
            }
            let payload = &words[cursor + 1..end];
            match ChunkKind::from_byte(tag.kind) {
                Some(ChunkKind::Header) => {
                    if header.is_some() {
                        return Err(NmfError::HeaderAlreadySeen);
                    }
                    let parsed = parse_header(tag.size, payload)?;
                    slots = std::iter::repeat_with(|| None)
                        .take(parsed.track_num as usize)
                        .collect();
                    header = Some(parsed);
                }
                Some(ChunkKind::Track) => {
                    if header.is_none() {
                        return Err(NmfError::OutOfOrderChunk);
                    }
                    parse_track(tag.size, payload, &mut slots)?;
                }
                Some(ChunkKind::Index) => {
                    // A repeated Index record overwrites: last one wins.
                    index = parse_index(tag.size, payload)?;
                }
                None => return Err(NmfError::UnknownChunkType(tag.kind)),
            }
            cursor = end;
        }

        let header = header.ok_or(NmfError::MissingHeader)?;
        let mut tracks = Vec::with_capacity(slots.len());
        for (slot, track) in slots.into_iter().enumerate() {
            tracks.push(track.ok_or(NmfError::MissingTrack(slot as u32))?);
        }
        Ok(Container {
            header,
            tracks,
            index,
        })
    }

    /// Serialize the container, returning the byte offset of the index
    /// record's payload
    ///
    /// The index content may be a placeholder at this point; seek back to the
    /// returned offset and use [`IndexPointer::patch`] once the trailing
    /// cluster stream has been appended and the true cue data is known.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<u64> {
        if self.header.track_num as usize != self.tracks.len() {
            return Err(NmfError::TrackCountMismatch {
                declared: self.header.track_num,
                actual: self.tracks.len(),
            });
        }
        let mut track_sizes = Vec::with_capacity(self.tracks.len());
        for (slot, track) in self.tracks.iter().enumerate() {
            if track.index as usize != slot {
                return Err(NmfError::InvalidTrackIndex {
                    index: track.index,
                    track_num: self.header.track_num,
                });
            }
            track_sizes.push(record_size(TRACK_SUBHEADER_WORDS, track.payload.len())?);
        }

        let mut total = (1 + HEADER_WORDS as u32) + (1 + INDEX_WORDS as u32);
        for &size in &track_sizes {
            total += 1 + size as u32;
        }

        write_le_u32(writer, NMF_MAGIC)?;
        write_le_u32(writer, total)?;

        write_le_u32(writer, Tag::new(ChunkKind::Header as u8, HEADER_WORDS).encode())?;
        write_le_u32(writer, self.header.duration.to_bits())?;
        write_le_u32(writer, self.header.track_num)?;

        for (track, &size) in self.tracks.iter().zip(&track_sizes) {
            write_le_u32(writer, Tag::new(ChunkKind::Track as u8, size).encode())?;
            write_le_u32(writer, track.index as u32 | (track.kind as u32) << 8)?;
            write_le_u32(writer, track.codec)?;
            write_words(writer, &track.payload)?;
        }

        write_le_u32(writer, Tag::new(ChunkKind::Index as u8, INDEX_WORDS).encode())?;
        // Magic and count take 8 bytes; every word before the index payload
        // except the payload itself has been written.
        let patch_offset = 8 + 4 * (total as u64 - INDEX_WORDS as u64);
        write_words(writer, &[self.index.fp, self.index.scale, self.index.count])?;
        Ok(patch_offset)
    }
}

fn parse_header(size: u16, payload: &[u32]) -> Result<Header> {
    if size != HEADER_WORDS {
        return Err(NmfError::WrongRecordSize {
            kind: "header",
            expected: HEADER_WORDS,
            actual: size,
        });
    }
    let header = Header {
        duration: f32::from_bits(payload[0]),
        track_num: payload[1],
    };
    // Slots are addressed by a u8, so a larger table could never be filled.
    // Rejecting here also keeps the slot allocation bounded.
    if header.track_num > 0x100 {
        return Err(NmfError::TrackTableTooLarge(header.track_num));
    }
    Ok(header)
}

fn parse_track(size: u16, payload: &[u32], slots: &mut [Option<Track>]) -> Result<()> {
    if size < TRACK_SUBHEADER_WORDS {
        return Err(NmfError::WrongRecordSize {
            kind: "track",
            expected: TRACK_SUBHEADER_WORDS,
            actual: size,
        });
    }
    let index = payload[0] as u8;
    let kind = TrackKind::from_byte((payload[0] >> 8) as u8);
    // Bits 16-31 of the first subheader word are reserved.
    let codec = payload[1];

    let slot = match slots.get_mut(index as usize) {
        Some(slot) if slot.is_none() => slot,
        _ => {
            return Err(NmfError::InvalidTrackIndex {
                index,
                track_num: slots.len() as u32,
            })
        }
    };
    *slot = Some(Track {
        index,
        kind,
        codec,
        payload: payload[TRACK_SUBHEADER_WORDS as usize..].to_vec(),
    });
    Ok(())
}

fn parse_index(size: u16, payload: &[u32]) -> Result<IndexPointer> {
    if size != INDEX_WORDS {
        return Err(NmfError::WrongRecordSize {
            kind: "index",
            expected: INDEX_WORDS,
            actual: size,
        });
    }
    Ok(IndexPointer {
        fp: payload[0],
        scale: payload[1],
        count: payload[2],
    })
}

pub(crate) fn record_size(base: u16, payload_words: usize) -> Result<u16> {
    u16::try_from(base as usize + payload_words)
        .map_err(|_| NmfError::OversizedPayload(payload_words))
}
