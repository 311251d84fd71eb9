// JFIF image-parameter attachment
//
// Video tracks using an image codec (MJPG) carry a fixed 12-byte parameter
// block as their payload:
//   width: u16 | height: u16 | format: u32 | interval: u32 (ns per frame)

use serde::Serialize;

use crate::error::{NmfError, Result};

const JFIF_WORDS: u16 = 3;

/// Pixel layout of the encoded images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PixelFormat {
    Yuv444 = 0,
    Yuv422 = 1,
    Yuv420 = 2,
    Grey = 3,
    /// Greyscale with the default quantization table
    DefaultDqt = 4,
}

impl PixelFormat {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(PixelFormat::Yuv444),
            1 => Some(PixelFormat::Yuv422),
            2 => Some(PixelFormat::Yuv420),
            3 => Some(PixelFormat::Grey),
            4 => Some(PixelFormat::DefaultDqt),
            _ => None,
        }
    }
}

/// Decoded image parameters of a video track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JfifParams {
    pub width: u16,
    pub height: u16,
    pub format: PixelFormat,
    /// Frame interval in nanoseconds
    pub interval: u32,
}

impl JfifParams {
    /// Decode the parameter block from a track payload
    pub fn parse(payload: &[u32]) -> Result<Self> {
        if payload.len() != JFIF_WORDS as usize {
            return Err(NmfError::WrongRecordSize {
                kind: "jfif attachment",
                expected: JFIF_WORDS,
                actual: payload.len() as u16,
            });
        }
        let format = PixelFormat::from_u32(payload[1]).ok_or_else(|| {
            NmfError::InvalidAttachment(format!("unknown pixel format {}", payload[1]))
        })?;
        Ok(JfifParams {
            width: payload[0] as u16,
            height: (payload[0] >> 16) as u16,
            format,
            interval: payload[2],
        })
    }

    /// Encode the parameter block as a track payload
    pub fn to_words(self) -> [u32; 3] {
        [
            self.width as u32 | (self.height as u32) << 16,
            self.format as u32,
            self.interval,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let params = JfifParams::parse(&[0x0438_0780, 2, 33_333_333]).unwrap();
        assert_eq!(
            params,
            JfifParams {
                width: 1920,
                height: 1080,
                format: PixelFormat::Yuv420,
                interval: 33_333_333,
            }
        );
    }

    #[test]
    fn test_round_trip() {
        let params = JfifParams {
            width: 640,
            height: 480,
            format: PixelFormat::Grey,
            interval: 40_000_000,
        };
        assert_eq!(JfifParams::parse(&params.to_words()).unwrap(), params);
    }

    #[test]
    fn test_wrong_size() {
        let err = JfifParams::parse(&[0, 0]).unwrap_err();
        assert!(matches!(
            err,
            NmfError::WrongRecordSize {
                kind: "jfif attachment",
                expected: 3,
                actual: 2,
            }
        ));
    }

    #[test]
    fn test_unknown_pixel_format() {
        let err = JfifParams::parse(&[0, 5, 0]).unwrap_err();
        assert!(matches!(err, NmfError::InvalidAttachment(_)));
    }
}
