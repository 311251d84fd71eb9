// Error types for NMF parsing and serialization

use std::fmt;
use std::io;

/// Result alias for NMF operations
pub type Result<T> = std::result::Result<T, NmfError>;

/// Errors raised while reading or writing NMF structures
///
/// Every malformed-input condition surfaces here; the codec never aborts the
/// process and performs no rollback on a partially written stream.
#[derive(Debug)]
pub enum NmfError {
    /// The first four bytes of the file are not the NMF magic number
    BadMagic(u32),
    /// A record tag word does not carry the 0xFF marker in its low byte
    InvalidMarker(u32),
    /// A fixed-size record payload declared the wrong number of words
    WrongRecordSize {
        kind: &'static str,
        expected: u16,
        actual: u16,
    },
    /// A record's kind byte is not Header, Track, or Index
    UnknownChunkType(u8),
    /// A Track record appeared before the Header record
    OutOfOrderChunk,
    /// More than one Header record in the container
    HeaderAlreadySeen,
    /// A track's index is out of range or duplicates a filled slot
    InvalidTrackIndex { index: u8, track_num: u32 },
    /// The container ended without a Header record
    MissingHeader,
    /// A track slot declared by the header was never filled
    MissingTrack(u32),
    /// The header declares more track slots than 8-bit indices can address
    TrackTableTooLarge(u32),
    /// The record cursor did not land exactly on the declared word count
    TruncatedOrOverrun { declared: u32, used: u32 },
    /// `header.track_num` disagrees with the track table length on write
    TrackCountMismatch { declared: u32, actual: usize },
    /// A payload is longer than a record tag can express
    OversizedPayload(usize),
    /// A codec attachment payload is malformed
    InvalidAttachment(String),
    /// Underlying I/O failure, including short reads and short writes
    Io(io::Error),
}

impl fmt::Display for NmfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NmfError::BadMagic(found) => {
                write!(f, "not an NMF file: magic {:#010x}", found)
            }
            NmfError::InvalidMarker(word) => {
                write!(f, "invalid tag word {:#010x}: missing 0xFF marker", word)
            }
            NmfError::WrongRecordSize {
                kind,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "wrong {} record size: expected {} words, got {}",
                    kind, expected, actual
                )
            }
            NmfError::UnknownChunkType(kind) => write!(f, "unknown chunk type {:#04x}", kind),
            NmfError::OutOfOrderChunk => {
                write!(f, "track record before header record")
            }
            NmfError::HeaderAlreadySeen => write!(f, "duplicate header record"),
            NmfError::InvalidTrackIndex { index, track_num } => {
                write!(
                    f,
                    "invalid track index {} (track table holds {})",
                    index, track_num
                )
            }
            NmfError::MissingHeader => write!(f, "container has no header record"),
            NmfError::MissingTrack(index) => {
                write!(f, "track slot {} was never filled", index)
            }
            NmfError::TrackTableTooLarge(count) => {
                write!(
                    f,
                    "track table of {} slots cannot be filled by 8-bit track indices",
                    count
                )
            }
            NmfError::TruncatedOrOverrun { declared, used } => {
                write!(
                    f,
                    "record stream mismatch: declared {} words, records cover {}",
                    declared, used
                )
            }
            NmfError::TrackCountMismatch { declared, actual } => {
                write!(
                    f,
                    "header declares {} tracks but table holds {}",
                    declared, actual
                )
            }
            NmfError::OversizedPayload(words) => {
                write!(f, "payload of {} words exceeds the tag size field", words)
            }
            NmfError::InvalidAttachment(msg) => write!(f, "invalid attachment: {}", msg),
            NmfError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for NmfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NmfError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for NmfError {
    fn from(e: io::Error) -> Self {
        NmfError::Io(e)
    }
}
