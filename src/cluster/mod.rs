// NMF cluster codec
//
// Clusters carry the streaming portion of a file, after the container's
// fixed part. Each cluster record is:
//   word count (u32) | stamp (u32) | frame_num (u32) | frame_num frames
// and each frame is one tag word followed by its payload words. The frame
// tag reuses the record tag layout: the kind byte names the owning track
// and the size field is the payload length in words, on both the read and
// the write path.

use serde::Serialize;
use std::io::{Read, Write};

use crate::container::record_size;
use crate::error::Result;
use crate::tag::Tag;
use crate::utils::io::{read_le_u32, read_words, write_le_u32, write_words};

const CLUSTER_HEADER_WORDS: u32 = 2;

/// One encoded media unit belonging to a single track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Track table slot this frame belongs to
    pub track: u8,
    /// Encoded media data, opaque at this layer
    pub payload: Vec<u32>,
}

/// A timestamped batch of frames
///
/// Produced per streaming read and owned by the caller; drop it once the
/// frames are consumed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Timestamp in ticks of the container's index scale
    pub stamp: u32,
    pub frames: Vec<Frame>,
}

impl Cluster {
    /// Read one cluster record from the stream
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        // The leading word count is informational; frame tags drive the
        // actual parse.
        let _declared = read_le_u32(reader)?;
        let stamp = read_le_u32(reader)?;
        let frame_num = read_le_u32(reader)?;

        let mut frames = Vec::new();
        for _ in 0..frame_num {
            let tag = Tag::decode(read_le_u32(reader)?)?;
            frames.push(Frame {
                track: tag.kind,
                payload: read_words(reader, tag.size as u32)?,
            });
        }
        Ok(Cluster { stamp, frames })
    }

    /// Write one cluster record to the stream
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut frame_sizes = Vec::with_capacity(self.frames.len());
        for frame in &self.frames {
            frame_sizes.push(record_size(0, frame.payload.len())?);
        }

        let mut total = CLUSTER_HEADER_WORDS;
        for &size in &frame_sizes {
            total += 1 + size as u32;
        }

        write_le_u32(writer, total)?;
        write_le_u32(writer, self.stamp)?;
        write_le_u32(writer, self.frames.len() as u32)?;
        for (frame, &size) in self.frames.iter().zip(&frame_sizes) {
            write_le_u32(writer, Tag::new(frame.track, size).encode())?;
            write_words(writer, &frame.payload)?;
        }
        Ok(())
    }
}
