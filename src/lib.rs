//! # nmf
//!
//! A lightweight (de)serialization library for the NMF tagged-chunk media
//! container.
//!
//! An NMF file opens with a fixed part (one header record, a track table
//! whose slots are addressed by each track's own index byte, and a seek-index
//! record) followed by a stream of timestamped frame clusters. Every record
//! is framed by a 32-bit tag word (0xFF marker, kind byte, payload size in
//! words) and everything on the wire is little-endian.
//!
//! This crate is purely structural framing plus its seek-index bookkeeping.
//! It does not encode or decode media, and it does not interpret the cue
//! table the index record points at.
//!
//! The index record supports a two-phase write: [`Container::write`] returns
//! the byte offset of the index payload, so a writer can emit a placeholder,
//! append clusters, and patch the real values afterwards.
//!
//! ```no_run
//! use nmf::{fourcc, Cluster, Container, Frame, Header, IndexPointer, Track, TrackKind};
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let container = Container {
//!     header: Header { duration: 1.0, track_num: 1 },
//!     tracks: vec![Track {
//!         index: 0,
//!         kind: TrackKind::Video,
//!         codec: fourcc::MJPG,
//!         payload: Vec::new(),
//!     }],
//!     index: IndexPointer { fp: 0, scale: 1_000_000, count: 0 },
//! };
//!
//! let mut file = File::create("out.nmf")?;
//! let patch_offset = container.write(&mut file)?;
//!
//! let cluster = Cluster {
//!     stamp: 0,
//!     frames: vec![Frame { track: 0, payload: vec![0; 16] }],
//! };
//! cluster.write(&mut file)?;
//!
//! // Once the cue table is written, commit the real index values.
//! IndexPointer { fp: 0, scale: 1_000_000, count: 1 }.patch(&mut file, patch_offset)?;
//! # Ok(())
//! # }
//! ```

pub mod attach;
pub mod cluster;
pub mod container;
pub mod error;
pub mod tag;
mod utils;

pub use attach::{JfifParams, PixelFormat};
pub use cluster::{Cluster, Frame};
pub use container::{fourcc, Container, Header, IndexPointer, Track, TrackKind, NMF_MAGIC};
pub use error::{NmfError, Result};
pub use tag::{ChunkKind, Tag, TAG_MARKER};
