// Codec-specific attachment decoders
//
// Track payloads are opaque to the container layer; these decoders interpret
// them once a track's fourcc identifies the codec.

pub mod flac;
pub mod jfif;

pub use jfif::{JfifParams, PixelFormat};
