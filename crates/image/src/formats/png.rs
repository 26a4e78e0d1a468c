//! PNG codec: IHDR chunk parse plus full decode.

use std::sync::Arc;

use crate::formats::{decode_with, FormatCodec};
use crate::{ImageColorType, ImageError, Result, Shape};

pub(crate) struct PngCodec;

impl FormatCodec for PngCodec {
    fn peek_shape(&self, data: &[u8]) -> Result<Shape> {
        peek_png_shape(data)
    }

    fn decode(&self, color_type: ImageColorType, data: &[u8]) -> Result<(Arc<[u8]>, Shape)> {
        decode_with(image::ImageFormat::Png, color_type, data)
    }
}

/// 8-byte signature, then the IHDR chunk with geometry at fixed offsets.
fn peek_png_shape(data: &[u8]) -> Result<Shape> {
    if data.len() < 26 {
        return Err(ImageError::InvalidHeader(
            "PNG data shorter than the IHDR chunk".into(),
        ));
    }
    if &data[12..16] != b"IHDR" {
        return Err(ImageError::InvalidHeader(
            "first PNG chunk is not IHDR".into(),
        ));
    }

    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    let channels = match data[25] {
        0 => 1, // grayscale
        2 => 3, // truecolor
        3 => 3, // palette
        4 => 2, // grayscale + alpha
        6 => 4, // truecolor + alpha
        other => {
            return Err(ImageError::InvalidHeader(format!(
                "unknown PNG color type {other}"
            )));
        }
    };

    Ok(Shape::new(height, width, channels))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Signature + IHDR for the given geometry and color type byte.
    fn ihdr(width: u32, height: u32, color_type: u8) -> Vec<u8> {
        let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.push(8); // bit depth
        data.push(color_type);
        data.extend_from_slice(&[0, 0, 0]); // compression, filter, interlace
        data.extend_from_slice(&[0; 4]); // crc, unchecked by the peek
        data
    }

    #[test]
    fn peeks_ihdr_geometry() {
        assert_eq!(
            peek_png_shape(&ihdr(640, 480, 2)).unwrap(),
            Shape::new(480, 640, 3)
        );
    }

    #[test]
    fn channels_follow_color_type() {
        for (color_type, channels) in [(0u8, 1u32), (2, 3), (3, 3), (4, 2), (6, 4)] {
            assert_eq!(
                peek_png_shape(&ihdr(2, 2, color_type)).unwrap().channels,
                channels
            );
        }
    }

    #[test]
    fn bad_color_type_is_an_error() {
        assert!(matches!(
            peek_png_shape(&ihdr(2, 2, 7)),
            Err(ImageError::InvalidHeader(_))
        ));
    }

    #[test]
    fn short_data_is_an_error() {
        assert!(matches!(
            peek_png_shape(&[0x89, 0x50, 0x4E, 0x47]),
            Err(ImageError::InvalidHeader(_))
        ));
    }
}
