//! BMP codec: BITMAPINFOHEADER parse plus full decode.

use std::sync::Arc;

use crate::formats::{decode_with, FormatCodec};
use crate::{ImageColorType, ImageError, Result, Shape};

pub(crate) struct BmpCodec;

impl FormatCodec for BmpCodec {
    fn peek_shape(&self, data: &[u8]) -> Result<Shape> {
        peek_bmp_shape(data)
    }

    fn decode(&self, color_type: ImageColorType, data: &[u8]) -> Result<(Arc<[u8]>, Shape)> {
        decode_with(image::ImageFormat::Bmp, color_type, data)
    }
}

/// 14-byte file header, then a BITMAPINFOHEADER (or one of its extensions).
/// Width and height are signed; a negative height means top-down rows.
fn peek_bmp_shape(data: &[u8]) -> Result<Shape> {
    if data.len() < 30 {
        return Err(ImageError::InvalidHeader(
            "BMP data shorter than the info header".into(),
        ));
    }

    let dib_size = u32::from_le_bytes([data[14], data[15], data[16], data[17]]);
    if dib_size < 40 {
        return Err(ImageError::InvalidHeader(format!(
            "unsupported BMP header size {dib_size}"
        )));
    }

    let width = i32::from_le_bytes([data[18], data[19], data[20], data[21]]);
    let height = i32::from_le_bytes([data[22], data[23], data[24], data[25]]);
    let bits_per_pixel = u16::from_le_bytes([data[28], data[29]]);
    let channels = match bits_per_pixel {
        // Palette and 16-bit entries expand to RGB
        1 | 4 | 8 | 16 | 24 => 3,
        32 => 4,
        other => {
            return Err(ImageError::InvalidHeader(format!(
                "unsupported BMP bit depth {other}"
            )));
        }
    };

    Ok(Shape::new(
        height.unsigned_abs(),
        width.unsigned_abs(),
        channels,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bmp_header(width: i32, height: i32, bits_per_pixel: u16) -> Vec<u8> {
        let mut data = b"BM".to_vec();
        data.extend_from_slice(&[0; 12]); // file size, reserved, data offset
        data.extend_from_slice(&40u32.to_le_bytes());
        data.extend_from_slice(&width.to_le_bytes());
        data.extend_from_slice(&height.to_le_bytes());
        data.extend_from_slice(&1u16.to_le_bytes()); // planes
        data.extend_from_slice(&bits_per_pixel.to_le_bytes());
        data
    }

    #[test]
    fn peeks_info_header() {
        assert_eq!(
            peek_bmp_shape(&bmp_header(7, 5, 24)).unwrap(),
            Shape::new(5, 7, 3)
        );
    }

    #[test]
    fn top_down_height_is_reported_positive() {
        assert_eq!(
            peek_bmp_shape(&bmp_header(7, -5, 32)).unwrap(),
            Shape::new(5, 7, 4)
        );
    }

    #[test]
    fn core_header_is_rejected() {
        let mut data = b"BM".to_vec();
        data.extend_from_slice(&[0; 12]);
        data.extend_from_slice(&12u32.to_le_bytes()); // BITMAPCOREHEADER
        data.extend_from_slice(&[0; 16]);
        assert!(matches!(
            peek_bmp_shape(&data),
            Err(ImageError::InvalidHeader(_))
        ));
    }
}
