// FLAC audio-metadata attachment
//
// Audio tracks using the FLAC fourcc may carry codec configuration in their
// payload. Nothing downstream consumes it yet, so this decoder only accepts
// the payload without interpreting it.
//
// TODO: decode the STREAMINFO fields (sample rate, channels, bit depth) once
// the playback side needs them.

use crate::error::Result;

/// Accept a FLAC track payload; currently a no-op placeholder
pub fn parse(_payload: &[u32]) -> Result<()> {
    Ok(())
}
